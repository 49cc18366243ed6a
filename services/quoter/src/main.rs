//! Mobius swap quote CLI
//!
//! Usage:
//!   mobius-quote quote --from USDe --to USDC --amount 100000000000000000000
//!   mobius-quote -c config/variant_pool.toml --price cmETH=1.1 quote --from WETH --to cmETH --amount 10000000000000000000 --detailed
//!   mobius-quote validate --from USDC --to USDT --amount 5000000
//!   mobius-quote state --token USDe
//!   mobius-quote intent --from USDe --to USDC --amount 100000000000000000000 --slippage-bps 50 --recipient 0x...
//!
//! Amounts are integers in the source token's native units. Results are
//! printed as JSON on stdout; logs go to stderr.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{parse_price_override, Session};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default time a swap intent stays executable
const DEFAULT_DEADLINE_SECS: u64 = 20 * 60;

#[derive(Parser, Debug)]
#[command(name = "mobius-quote")]
#[command(about = "Off-chain swap quotes for Mobius pools")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Pool settings file
    #[arg(short, long, default_value = "config/stable_pool.toml", global = true)]
    config: PathBuf,

    /// Oracle price override, TOKEN=PRICE (repeatable)
    #[arg(long = "price", value_parser = parse_price_override, global = true)]
    prices: Vec<(String, String)>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Pretty-print command output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quote a swap
    Quote {
        /// Source token symbol or address
        #[arg(long)]
        from: String,
        /// Destination token symbol or address
        #[arg(long)]
        to: String,
        /// Source amount in native units
        #[arg(long, allow_negative_numbers = true)]
        amount: i128,
        /// Include the canonical-scale breakdown
        #[arg(long)]
        detailed: bool,
    },
    /// Check whether a swap would quote successfully
    Validate {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: i128,
    },
    /// Show asset state
    State {
        /// Limit output to one token
        #[arg(long)]
        token: Option<String>,
    },
    /// Quote a swap and shape it into pool `swap` call parameters
    Intent {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: i128,
        /// Tolerated downward movement in basis points
        #[arg(long, default_value_t = 50)]
        slippage_bps: u32,
        #[arg(long)]
        recipient: String,
        /// Unix timestamp; defaults to twenty minutes from now
        #[arg(long)]
        deadline: Option<u64>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    info!("Using pool settings {:?}", args.config);
    let session = Session::open(&args.config, &args.prices)?;

    match &args.command {
        Command::Quote {
            from,
            to,
            amount,
            detailed,
        } => print(&session.quote(from, to, *amount, *detailed)?, args.pretty),
        Command::Validate { from, to, amount } => {
            print(&session.validate(from, to, *amount)?, args.pretty)
        }
        Command::State { token } => print(&session.state(token.as_deref())?, args.pretty),
        Command::Intent {
            from,
            to,
            amount,
            slippage_bps,
            recipient,
            deadline,
        } => {
            let deadline = match deadline {
                Some(deadline) => *deadline,
                None => default_deadline()?,
            };
            let report = session.intent(from, to, *amount, *slippage_bps, recipient, deadline)?;
            print(&report, args.pretty)
        }
    }
}

fn init_logging(args: &Args) {
    // RUST_LOG takes precedence over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.to_lowercase()));

    if args.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn default_deadline() -> Result<u64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the Unix epoch")?;
    Ok(now.as_secs() + DEFAULT_DEADLINE_SECS)
}

fn print<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}
