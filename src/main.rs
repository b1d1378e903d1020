//! Ladder Taker - Replay Entry Point
//!
//! Replays recorded trading states through the configured product strategies
//! and prints one compact log line per tick.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ladder_taker::config::load_config;
use ladder_taker::replay::{parse_states, replay};
use ladder_taker::{TickLogger, Trader};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Recorded trading states (JSON array or one object per line); stdin if omitted
    #[arg(short, long)]
    input: Option<String>,

    /// Only trade these products (repeatable)
    #[arg(long = "product")]
    products: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(Some(args.config.as_str())).context("loading configuration")?;

    // Initialize logging
    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting ladder taker replay");
    info!("Configuration file: {}", args.config);

    let raw = match &args.input {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let states = parse_states(&raw)?;

    let mut trader = Trader::from_config(&config);
    if !args.products.is_empty() {
        let wanted: Vec<String> = args.products.iter().map(|p| p.to_ascii_uppercase()).collect();
        trader.retain_symbols(&wanted);
    }
    info!("Trading products: {:?}", trader.symbols());

    let mut logger = TickLogger::new(config.trader.max_log_length);
    for line in replay(&trader, states, &mut logger)? {
        println!("{}", line);
    }

    Ok(())
}
