//! Discover command - Guided, resumable workload discovery.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use costkit_discovery::{parse_number, Answer, ConversationEngine, InputKind, Question};
use costkit_store::{DiscoveryDriver, FileSessionStore};

use super::{print_estimate, Context};

#[derive(Args)]
pub struct DiscoverArgs {
    /// Resume a saved session instead of starting a new one
    #[arg(short, long)]
    session: Option<String>,

    /// Pricing catalog file (defaults to the configured or built-in catalog)
    #[arg(short, long)]
    catalog: Option<PathBuf>,
}

/// Turn a typed line into an answer for the given question.
///
/// `skip` or an empty line skips. Choice questions accept option numbers
/// ("2" or "1,3") as well as free text.
pub fn parse_input(question: &Question, line: &str) -> Answer {
    let text = line.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("skip") {
        return Answer::Skipped;
    }

    match question.kind {
        InputKind::FreeText => Answer::text(text),
        InputKind::Number => parse_number(text)
            .map(Answer::Number)
            .unwrap_or_else(|| Answer::text(text)),
        InputKind::SingleChoice => match choice_by_number(question, text) {
            Some(choice) => Answer::choice(choice),
            None => Answer::choice(text),
        },
        InputKind::MultiChoice => {
            let picked: Option<Vec<&str>> = text
                .split([',', ' '])
                .filter(|part| !part.is_empty())
                .map(|part| choice_by_number(question, part))
                .collect();
            match picked {
                Some(choices) if !choices.is_empty() => Answer::choices(choices),
                _ => Answer::text(text),
            }
        }
    }
}

fn choice_by_number<'a>(question: &'a Question, text: &str) -> Option<&'a str> {
    let index: usize = text.trim().parse().ok()?;
    question
        .choices
        .get(index.checked_sub(1)?)
        .map(String::as_str)
}

fn print_question(question: &Question, step: usize, total: usize) {
    println!();
    println!("[{}/{}] {}", step + 1, total, question.prompt);
    for (i, choice) in question.choices.iter().enumerate() {
        println!("   {}. {}", i + 1, choice);
    }
    if question.kind == InputKind::MultiChoice {
        println!("   (several allowed, e.g. 1,3)");
    }
}

pub async fn execute(args: DiscoverArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(args.catalog.as_deref())?;
    let store = FileSessionStore::new(ctx.sessions_root());
    let engine = ConversationEngine::new();

    let mut driver = match &args.session {
        Some(id) => DiscoveryDriver::resume(engine, store, id)
            .with_context(|| format!("Cannot resume session {}", id))?,
        None => DiscoveryDriver::start(engine, store).context("Cannot start a session")?,
    };
    info!("Discovery session: {}", driver.session_id());

    if !ctx.quiet {
        println!("📋 Session {} - type 'skip' to skip a question", driver.session_id());
    }

    let total = driver.engine().len();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    while let Some(question) = driver.current_question() {
        print_question(question, driver.state().current_step, total);
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            println!(
                "Session saved. Resume with: costkit discover --session {}",
                driver.session_id()
            );
            return Ok(());
        }

        let answer = parse_input(question, &line);
        driver.answer(answer).context("Failed to save session")?;
    }

    println!();
    println!("✅ Discovery complete");
    println!();
    println!("{}", driver.engine().generate_workflow_summary(&driver.state().extracted));
    println!();
    print_estimate(ctx, driver.state().workload(), &catalog)?;
    Ok(())
}
