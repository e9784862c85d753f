//! costkit CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration error
//! - 4: Precondition violation

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use costkit_core::CostError;
use costkit_discovery::DiscoveryError;
use costkit_store::StoreError;

mod commands;
mod config;
mod report;

use commands::{Cli, Commands, Context};
use config::CliConfig;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIGURATION_ERROR: u8 = 3;
    pub const PRECONDITION_VIOLATION: u8 = 4;
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "costkit=debug"
    } else if quiet {
        "costkit=warn"
    } else {
        "costkit=info"
    };

    let mut filter = EnvFilter::from_default_env();
    for directive in [level, "warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    // Logs go to stderr so `--json` output stays parseable
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn build_context(cli: &Cli) -> anyhow::Result<Context> {
    let cwd = std::env::current_dir()?;
    let mut config = CliConfig::load(&cwd)?;
    if let Some(currency) = cli.currency {
        config.currency = currency;
    }
    if let Some(credits) = cli.credits_per_unit {
        if !(credits.is_finite() && credits > 0.0) {
            anyhow::bail!("Invalid argument --credits-per-unit: must be positive, got {}", credits);
        }
        config.credits_per_unit = credits;
    }
    Ok(Context {
        config,
        cwd,
        quiet: cli.quiet,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match build_context(&cli) {
        Ok(ctx) => match cli.command {
            Commands::Estimate(args) => commands::estimate::execute(args, &ctx).await,
            Commands::Discover(args) => commands::discover::execute(args, &ctx).await,
            Commands::Replay(args) => commands::replay::execute(args, &ctx).await,
            Commands::Catalog(args) => commands::catalog::execute(args, &ctx).await,
            Commands::Sessions(args) => commands::sessions::execute(args, &ctx).await,
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

fn categorize_cost_error(e: &CostError) -> u8 {
    if e.is_precondition() {
        ExitCodes::PRECONDITION_VIOLATION
    } else {
        ExitCodes::CONFIGURATION_ERROR
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(err) = cause.downcast_ref::<CostError>() {
            return categorize_cost_error(err);
        }
        if let Some(err) = cause.downcast_ref::<StoreError>() {
            match err {
                StoreError::Catalog(cost) => return categorize_cost_error(cost),
                StoreError::SessionNotFound(_)
                | StoreError::InvalidSessionId(_)
                | StoreError::UnsupportedFormat(_) => return ExitCodes::INVALID_ARGS,
                StoreError::Yaml(_) | StoreError::Json(_) | StoreError::Toml(_) => {
                    return ExitCodes::CONFIGURATION_ERROR
                }
                _ => {}
            }
        }
        if let Some(DiscoveryError::UnknownScenario(_)) = cause.downcast_ref::<DiscoveryError>() {
            return ExitCodes::INVALID_ARGS;
        }
    }

    if e.to_string().to_lowercase().contains("invalid argument") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
