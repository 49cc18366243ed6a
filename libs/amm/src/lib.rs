//! # Mobius AMM Library - Off-Chain Swap Quote Engine
//!
//! ## Purpose
//!
//! Deterministic replica of the Mobius pool's swap pricing. Given a snapshot of
//! each asset's cash, liability and oracle price, it produces the same output
//! amount and haircut the on-chain pool would compute, without sending a
//! transaction. Quotes are integer-exact: every value is a WAD fixed-point
//! `U256` and every division truncates the way the ledger does.
//!
//! ## Integration Points
//!
//! - **Input Sources**: State-sync collaborators writing through [`AssetStateSink`]
//! - **Output Destinations**: Quoting services, routing aggregators, transaction builders
//! - **Pool Types**: Stable pools (1:1 ideal amount) and variant pools (oracle-priced)
//! - **Precision**: Native token decimals in and out (18 for USDe/WETH, 6 for USDC/USDT)
//!
//! ## Architecture Role
//!
//! ```text
//! AssetUpdate → [MobiusPool] → snapshot → [SwapQuoteEngine] → SwapQuote
//!                  ↓                            ↓
//!            RwLock'd asset map        WadMath + SolvencyCurve
//! ```
//!
//! The quote pipeline: convert the input to WAD, derive the ideal destination
//! amount, score both coverage transitions on the solvency curve, scale by
//! `1 + Si - Sj`, deduct the haircut, convert back to native units.

pub mod asset;
pub mod error;
pub mod intent;
pub mod pool;
pub mod quote;
pub mod serde_helpers;
pub mod solvency;
pub mod traits;
pub mod wad;

pub use asset::{Address, AssetKind, AssetState, PoolConfig, PoolType};
pub use error::{QuoteError, QuoteResult};
pub use intent::{SwapIntent, SWAP_FUNCTION_SIGNATURE};
pub use pool::MobiusPool;
pub use quote::{QuoteBreakdown, SwapQuote, SwapQuoteEngine};
pub use solvency::SolvencyCurve;
pub use traits::{AssetStateSink, AssetUpdate};
pub use wad::{WadMath, WAD, WAD_DECIMALS};

/// Common types for quote calculations
pub use primitive_types::U256;
