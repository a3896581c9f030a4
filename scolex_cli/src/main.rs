//! Scolex — S-expression values with interned symbols.
//!
//! Command-line driver that builds sample values and prints their canonical
//! renderings.

mod args;
mod config;
mod demo;

use args::ExecutionMode;
use config::CliConfig;
use scolex_core::SymbolRegistry;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments (skip argv[0] = program name).
    let raw_args: Vec<String> = std::env::args().skip(1).collect();

    let parsed = match args::parse_args_vec(&raw_args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("scolex: {}", e);
            eprintln!("{}", args::help_text());
            return ExitCode::from(args::EXIT_USAGE_ERROR);
        }
    };

    // Handle immediate-exit modes before building config.
    match &parsed.mode {
        ExecutionMode::PrintVersion => {
            println!("{}", args::version_string());
            return ExitCode::SUCCESS;
        }
        ExecutionMode::PrintHelp => {
            println!("{}", args::help_text());
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let config = CliConfig::from_args(&parsed);
    init_logging(&config);

    let registry = SymbolRegistry::with_config(config.registry);
    tracing::debug!(policy = ?registry.policy(), "symbol registry ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match &parsed.mode {
        ExecutionMode::Demo => demo::run_demo(&registry, &mut out),
        ExecutionMode::Render(words) => demo::render_words(&registry, words, &mut out),
        ExecutionMode::PrintVersion | ExecutionMode::PrintHelp => {
            unreachable!("handled above")
        }
    };

    match result.and_then(|()| out.flush()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("scolex: write failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr tracing subscriber.
fn init_logging(config: &CliConfig) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|e| {
        eprintln!(
            "scolex: ignoring invalid {} '{}': {}",
            config::LOG_ENV,
            config.log_filter,
            e
        );
        EnvFilter::new("warn")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
