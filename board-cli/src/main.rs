//! # Memory Board CLI
//!
//! Loads a board slot, runs one subcommand against it and saves the result.

use anyhow::Context;
use board_cli::{CliArgs, CliConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with optional JSON output.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,board_core=debug,board_cli=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format in production (RUST_LOG_FORMAT=json)
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = CliConfig::from(&args);

    if let Some(ref dir) = config.data_dir {
        tracing::info!("Data directory: {}", dir.display());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    board_cli::run(&config, &args.command, &mut out)
        .with_context(|| format!("command failed on slot {}", config.slot))?;

    Ok(())
}
