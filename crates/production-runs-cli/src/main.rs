//! Production runs CLI
//!
//! # Usage
//!
//! ```bash
//! # List every run
//! production-runs list
//!
//! # Show one run as JSON
//! production-runs get 42 --format json
//!
//! # Create a run from a YAML file against another server
//! production-runs --base-url http://runs.internal:9000/ create --file run.yaml
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Request failed (network error or error status)
//! - 2: Run not found
//! - 3: Invalid input or configuration
//! - 10: Internal error

mod cli;

use clap::Parser;
use cli::RunsCli;

#[tokio::main]
async fn main() {
    let cli = RunsCli::parse();

    // Logs go to stderr so table/JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(verbosity_level(cli.verbose).into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    std::process::exit(i32::from(exit_code));
}

fn verbosity_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}
