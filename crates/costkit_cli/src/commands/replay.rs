//! Replay command - Play a scripted discovery scenario.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use costkit_discovery::{builtin_scenarios, find_scenario, Scenario, ScenarioPlayer};

use super::{print_estimate, Context};

#[derive(Args)]
pub struct ReplayArgs {
    /// Built-in scenario name or path to a scenario YAML file
    scenario: Option<String>,

    /// Pause between answers, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// List the built-in scenarios
    #[arg(long)]
    list: bool,

    /// Pricing catalog file (defaults to the configured or built-in catalog)
    #[arg(short, long)]
    catalog: Option<PathBuf>,
}

/// Resolve a scenario from a YAML path or a built-in name
pub fn resolve_scenario(name_or_path: &str, cwd: &Path) -> Result<Scenario> {
    let path = cwd.join(name_or_path);
    let looks_like_file = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if looks_like_file {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        return Scenario::from_yaml(&content)
            .with_context(|| format!("Invalid scenario file {}", path.display()));
    }
    Ok(find_scenario(name_or_path)?)
}

pub async fn execute(args: ReplayArgs, ctx: &Context) -> Result<()> {
    if args.list {
        for scenario in builtin_scenarios()? {
            println!("{:<22}{}", scenario.name, scenario.title);
        }
        return Ok(());
    }

    let Some(name) = args.scenario.as_deref() else {
        anyhow::bail!("Invalid argument: a scenario name or file is required (see --list)");
    };
    let scenario = resolve_scenario(name, &ctx.cwd)?;
    let catalog = ctx.load_catalog(args.catalog.as_deref())?;

    info!("Replaying scenario: {}", scenario.name);
    println!("▶️  {}", scenario.title);
    if !scenario.description.is_empty() && !ctx.quiet {
        println!("   {}", scenario.description);
    }

    let player = ScenarioPlayer::default();
    let total = player.engine().len();
    let delay = Duration::from_millis(args.delay_ms);
    let mut last_state = None;

    for step in player.steps(&scenario) {
        if !delay.is_zero() && step.index > 0 {
            tokio::time::sleep(delay).await;
        }
        println!();
        println!("[{}/{}] {}", step.index + 1, total, step.entry.prompt);
        println!("   → {}", step.entry.answer.display());
        last_state = Some(step.state);
    }

    let state = last_state.unwrap_or_else(|| player.engine().initialize_conversation());
    println!();
    println!("{}", player.engine().generate_workflow_summary(&state.extracted));
    println!();
    print_estimate(ctx, state.workload(), &catalog)?;
    Ok(())
}
