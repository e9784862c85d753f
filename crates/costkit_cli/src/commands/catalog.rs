//! Catalog command - Validate and list a pricing catalog.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::Context;
use crate::report::render_catalog;

#[derive(Args)]
pub struct CatalogArgs {
    /// Pricing catalog file (defaults to the configured or built-in catalog)
    #[arg(short, long)]
    catalog: Option<PathBuf>,
}

pub async fn execute(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let source = ctx.config.catalog(args.catalog.as_deref());
    let catalog = ctx.load_catalog(args.catalog.as_deref())?;

    match &source {
        Some(path) => {
            info!("Validated catalog: {}", path.display());
            if !ctx.quiet {
                println!("✅ Catalog {} is complete", path.display());
            }
        }
        None => {
            if !ctx.quiet {
                println!("Using the built-in catalog");
            }
        }
    }
    let report = catalog.validate();
    if !ctx.quiet {
        for warning in &report.warnings {
            println!("⚠️  {}", warning);
        }
    }
    println!();
    println!("{}", render_catalog(&catalog, &ctx.money()));
    Ok(())
}
