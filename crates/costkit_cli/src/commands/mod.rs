//! CLI command definitions.
//!
//! Each subcommand maps to one way of producing or inspecting an estimate.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use costkit_core::{complete_breakdown, CostBreakdown, PricingCatalog, WorkloadDescription};
use costkit_store::CatalogLoader;

use crate::config::CliConfig;
use crate::report::{self, Currency, Money};

pub mod catalog;
pub mod discover;
pub mod estimate;
pub mod replay;
pub mod sessions;

/// costkit - cost estimation for agent workflows
#[derive(Parser)]
#[command(name = "costkit")]
#[command(version, about = "costkit - cost estimation for agent workflows")]
#[command(long_about = r#"
costkit estimates what an agent workflow costs to run: per transaction,
per month and per year, plus one-time setup.

WORKFLOWS:
  estimate  → Price a workload description file
  discover  → Answer guided questions and price the result
  replay    → Play a scripted discovery scenario
  catalog   → Validate and list a pricing catalog
  sessions  → List or delete saved discovery sessions

CONFIGURATION:
  costkit.toml in the working directory, then COSTKIT_CURRENCY,
  COSTKIT_CREDITS_PER_UNIT, COSTKIT_CATALOG and COSTKIT_SESSIONS_ROOT,
  then command-line flags.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration error (catalog missing or disabling an entry)
  4 - Precondition violation (unknown model, empty model id)
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Currency for displayed amounts
    #[arg(long, global = true, value_enum, ignore_case = true)]
    pub currency: Option<Currency>,

    /// Credits that make one unit of currency
    #[arg(long, global = true)]
    pub credits_per_unit: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Price a workload description (YAML, JSON or TOML)
    Estimate(estimate::EstimateArgs),

    /// Describe a workflow through guided questions
    Discover(discover::DiscoverArgs),

    /// Replay a built-in or file-based discovery scenario
    Replay(replay::ReplayArgs),

    /// Validate and list a pricing catalog
    Catalog(catalog::CatalogArgs),

    /// Manage saved discovery sessions
    Sessions(sessions::SessionsArgs),
}

/// Settings shared by every command
pub struct Context {
    pub config: CliConfig,
    pub cwd: PathBuf,
    pub quiet: bool,
}

impl Context {
    pub fn money(&self) -> Money {
        Money::new(self.config.currency, self.config.credits_per_unit)
    }

    /// Load the catalog named by a flag, the configuration, or the built-in one
    pub fn load_catalog(&self, flag: Option<&Path>) -> Result<PricingCatalog> {
        let path = self.config.catalog(flag).map(|p| self.cwd.join(p));
        let catalog = CatalogLoader::load_or_default(path.as_deref()).with_context(|| match &path {
            Some(path) => format!("Failed to load catalog {}", path.display()),
            None => "Failed to load built-in catalog".to_string(),
        })?;
        Ok(catalog)
    }

    pub fn sessions_root(&self) -> PathBuf {
        self.config.sessions_root(&self.cwd)
    }
}

/// Price a workload and print the breakdown with projections
pub fn print_estimate(
    ctx: &Context,
    workload: &WorkloadDescription,
    catalog: &PricingCatalog,
) -> Result<CostBreakdown> {
    let breakdown = complete_breakdown(workload, catalog)
        .with_context(|| format!("Cannot price workload for model '{}'", workload.model))?;
    let money = ctx.money();

    println!("{}", report::render_breakdown(&breakdown, &money));
    println!();
    println!("Volume scenarios");
    println!("{}", report::render_projections(&breakdown, &money));
    Ok(breakdown)
}
