//! # Chocoline - Production Line Quality Inspection
//!
//! The main binary for the Chocoline inspection simulator.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 apps/chocoline (THE BINARY)                 │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────┐    │
//! │  │   CLI       │    │ Config/Feed │    │   Renderer   │    │
//! │  │  (clap)     │    │ (toml/json) │    │ (text/json)  │    │
//! │  └──────┬──────┘    └──────┬──────┘    └──────┬───────┘    │
//! │         └──────────────────┼──────────────────┘            │
//! │                            ▼                               │
//! │                   ┌────────────────┐                       │
//! │                   │ chocoline-core │                       │
//! │                   │  (THE LOGIC)   │                       │
//! │                   └────────────────┘                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! chocoline inspect --id LOTE-1 --seed 42
//! chocoline simulate -n 100 --history
//! chocoline feed -f units.json --config line.toml
//! chocoline catalog --json-mode
//! ```

use chocoline::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // CHOCOLINE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("CHOCOLINE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "chocoline=debug"
    } else {
        "chocoline=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so --json-mode output stays parseable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Chocoline startup banner.
fn print_banner() {
    println!(
        r#"
  CHOCOLINE - Quality Control v{}
  Molding • Packaging • Report
"#,
        env!("CARGO_PKG_VERSION")
    );
}
