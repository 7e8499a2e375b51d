//! # Bob's Bagels Till
//!
//! Command-line front end for `bagels-core`: reads the till configuration,
//! replays an order given as arguments and prints the receipt.
//!
//! ## Module Organization
//! ```text
//! bagels_till/
//! ├── lib.rs          ◄─── You are here (clap arguments, run, tracing)
//! ├── config.rs       ◄─── TillConfig (TOML file + environment)
//! ├── order.rs        ◄─── Order tokens and replay
//! └── error.rs        ◄─── TillError
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize tracing (stderr, RUST_LOG or info,bagels=debug)          │
//! │  2. Parse arguments (clap)                                              │
//! │  3. Load TillConfig, apply --menu / --capacity, validate                │
//! │  4. Build the catalog (menu file or built-in)                           │
//! │  5. Parse the order tokens                                              │
//! │  6. Replay the order into a basket                                      │
//! │  7. Print the receipt (stdout) or a JSON report (--json)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod order;

use std::path::PathBuf;
use std::sync::Arc;

use bagels_core::{Basket, BasketSummary, MemorySink, OutputSink, Receipt, StdoutSink};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::TillConfig;
pub use error::{TillError, TillResult};
pub use order::{parse_order, run_order, OrderOutcome, OrderStep};

/// Order token reference shown after `--help`.
const ORDER_HELP: &str = "\
Order tokens:
  SKU                 add one item (e.g. BGLO)
  SKU+FILL[+FILL]     add a bagel with fillings (e.g. BGLS+FILB+FILE)
  -SKU                remove the first item with this SKU (e.g. -COFB)
  @RULE:SKU[,SKU]     apply a bundle: b6, b12 or bac (e.g. @bac:BGLO,COFB)

Options go before the order. A removal that reads like an option
(-c, -m, -h, -V) needs `--` first: till -- BGLO -c";

// =============================================================================
// Arguments
// =============================================================================

/// Build a Bob's Bagels basket from an order and print the receipt
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "till")]
#[command(about = "Bob's Bagels till: build a basket and print the receipt", long_about = None)]
#[command(version)]
#[command(after_help = ORDER_HELP)]
pub struct TillArgs {
    /// Till config file (defaults to the platform config directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Menu file (overrides config)
    #[arg(short, long, value_name = "PATH")]
    pub menu: Option<PathBuf>,

    /// Basket capacity (overrides config)
    #[arg(long, value_name = "N")]
    pub capacity: Option<usize>,

    /// Print a JSON report instead of the receipt
    #[arg(long)]
    pub json: bool,

    /// Order tokens, replayed in order
    #[arg(value_name = "ORDER", required = true, allow_hyphen_values = true)]
    pub order: Vec<String>,
}

// =============================================================================
// Checkout
// =============================================================================

/// Builds a basket from `config` and replays `steps` into it.
pub fn checkout(
    config: &TillConfig,
    steps: &[OrderStep],
    output: impl OutputSink + 'static,
) -> TillResult<(Basket, OrderOutcome)> {
    let catalog = Arc::new(config.catalog()?);
    let mut basket = Basket::with_output(catalog, output).with_receipt_style(config.receipt_style());
    basket.change_capacity(config.basket.capacity);

    let outcome = run_order(&mut basket, steps)?;
    info!(
        added = outcome.added,
        rejected = outcome.rejected,
        bundles = outcome.bundles_applied,
        total = %basket.total_cost(),
        "Order replayed"
    );

    Ok((basket, outcome))
}

/// `--json` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub summary: BasketSummary,
    pub receipt: Receipt,
    pub notices: Vec<String>,
}

/// Runs the till for parsed command-line arguments.
///
/// An explicit `--config` must load cleanly. Without one, a broken default
/// config file falls back to defaults with a warning.
pub fn run(args: TillArgs) -> TillResult<()> {
    let mut config = match args.config {
        Some(path) => TillConfig::load(Some(path))?,
        None => TillConfig::load_or_default(None),
    };
    if let Some(menu) = args.menu {
        config.menu.path = Some(menu);
    }
    if let Some(capacity) = args.capacity {
        config.basket.capacity = capacity;
    }
    config.validate()?;

    let steps = parse_order(&args.order)?;

    if args.json {
        let sink = MemorySink::new();
        let (basket, _) = checkout(&config, &steps, sink.clone())?;
        let report = JsonReport {
            summary: basket.summary(),
            receipt: basket.receipt(),
            notices: sink.non_empty_lines(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let (mut basket, _) = checkout(&config, &steps, StdoutSink)?;
        basket.print_receipt();
    }

    Ok(())
}

/// Installs the stderr tracing subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,bagels=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
