//! Estimate command - Price a workload description file.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use costkit_core::{complete_breakdown, WorkloadDescription};
use costkit_store::read_document;

use super::{print_estimate, Context};
use crate::report::EstimateReport;

#[derive(Args)]
pub struct EstimateArgs {
    /// Workload description file
    #[arg(short, long)]
    workload: PathBuf,

    /// Pricing catalog file (defaults to the configured or built-in catalog)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Print the estimate as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: EstimateArgs, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(&args.workload);
    let workload: WorkloadDescription = read_document(&path)
        .with_context(|| format!("Failed to read workload {}", path.display()))?;
    let catalog = ctx.load_catalog(args.catalog.as_deref())?;

    info!("Estimating workload: {}", path.display());

    if args.json {
        let breakdown = complete_breakdown(&workload, &catalog)
            .with_context(|| format!("Cannot price workload for model '{}'", workload.model))?;
        let report = EstimateReport::new(&breakdown, &ctx.money());
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_estimate(ctx, &workload, &catalog)?;
    Ok(())
}
