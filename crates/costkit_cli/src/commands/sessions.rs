//! Sessions command - List or delete saved discovery sessions.

use anyhow::{Context as _, Result};
use chrono::Local;
use clap::{Args, Subcommand};
use tracing::info;

use costkit_discovery::default_questions;
use costkit_store::{FileSessionStore, SessionStore};

use super::Context;

#[derive(Args)]
pub struct SessionsArgs {
    #[command(subcommand)]
    action: SessionsAction,
}

#[derive(Subcommand)]
enum SessionsAction {
    /// List saved sessions, most recent first
    List,

    /// Delete a saved session
    Delete {
        /// Session id
        id: String,
    },
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

pub async fn execute(args: SessionsArgs, ctx: &Context) -> Result<()> {
    let store = FileSessionStore::new(ctx.sessions_root());

    match args.action {
        SessionsAction::List => {
            let sessions = store.list().context("Failed to list sessions")?;
            if sessions.is_empty() {
                println!("No saved sessions in {}", store.sessions_dir().display());
                return Ok(());
            }
            let total = default_questions().len();
            for session in sessions {
                println!(
                    "{:<38}{:>3}/{:<3} {}  {}",
                    session.id,
                    session.current_step.min(total),
                    total,
                    session.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    truncate(&session.workflow_description, 40)
                );
            }
        }
        SessionsAction::Delete { id } => {
            store
                .delete(&id)
                .with_context(|| format!("Cannot delete session {}", id))?;
            info!("Deleted session {}", id);
            if !ctx.quiet {
                println!("🗑️  Deleted session {}", id);
            }
        }
    }
    Ok(())
}
