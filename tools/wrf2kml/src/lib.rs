//! Shared plumbing for the wrf2kml command-line tools.
//!
//! Each binary is a batch renderer: parse arguments, run one pipeline,
//! exit. Exit codes are stable per error kind (see `VizError::exit_code`),
//! with code 1 reserved for malformed invocations.

use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;
use viz_common::VizError;

/// Parse CLI arguments, printing usage and exiting with code 1 on error.
pub fn parse_args<T: Parser>() -> T {
    T::try_parse().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

/// Initialize tracing for a batch tool.
pub fn init_tracing(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    // Safe to ignore: only fails when a subscriber is already installed
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Report a pipeline failure and terminate with its exit code.
pub fn exit_with(err: VizError) -> ! {
    error!("{err}");
    std::process::exit(err.exit_code());
}
