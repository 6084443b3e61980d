//! dockbump - runtime Docker build definition updater
//!
//! Resolves which tracked major versions are behind upstream releases and
//! regenerates their definitions from templates.

use clap::Parser;
use dockbump::cli::CliArgs;
use dockbump::config::RunConfig;
use dockbump::orchestrator::Orchestrator;
use dockbump::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Handle version flag
    if args.print_version {
        println!("dockbump {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    init_tracing(&args);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Structured logging on stderr; RUST_LOG wins over the verbosity flags
fn init_tracing(args: &CliArgs) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = RunConfig::load(&args)?;

    if args.verbose {
        eprintln!("dockbump v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Definitions: {}", config.root.display());
        if config.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let orchestrator = Orchestrator::new(config)?.with_progress(args.show_progress());
    let report = orchestrator.run().await?;

    let output_config = OutputConfig::from_cli(args.json, args.summary, args.verbose, args.quiet);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    if report.has_errors() {
        // Partial success - some definitions could not be written
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
