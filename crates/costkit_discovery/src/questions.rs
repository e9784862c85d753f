//! The default discovery questionnaire.
//!
//! Ten questions asked in a fixed order. Each extractor receives the data
//! accumulated so far, which is how the volume answer is split across the
//! channels chosen one question earlier.

use costkit_core::{ChannelVolumes, WORKING_DAYS_PER_MONTH};

use crate::question::{Answer, InputKind, Question};
use crate::state::{Channel, Complexity, ExtractedData};

/// Model choices and the catalog ids they map to
pub const MODEL_CHOICES: [(&str, &str); 6] = [
    ("Claude Sonnet (balanced)", "claude-sonnet"),
    ("Claude Haiku (fast)", "claude-haiku"),
    ("GPT-4o", "gpt-4o"),
    ("GPT-4o mini", "gpt-4o-mini"),
    ("Gemini Flash", "gemini-flash"),
    ("Bring your own model", "custom"),
];

pub const KNOWLEDGE_CHOICES: [&str; 3] = ["None", "A few documents", "Large knowledge base"];

pub const INTEGRATION_CHOICES: [&str; 5] =
    ["CRM", "Ticketing", "Database", "Calendar", "Web search"];

pub const CAPABILITY_CHOICES: [&str; 3] = [
    "Remember past conversations",
    "Quality-check every response",
    "Deep-crawl websites",
];

pub const EVALUATION_CHOICES: [&str; 3] = [
    "No formal evaluation",
    "Basic test suite",
    "Comprehensive evaluation",
];

/// Tokens exchanged per transaction for every agent beyond the first
pub const INTER_AGENT_TOKENS_PER_EXTRA_AGENT: u64 = 400;

/// Build the default ordered question list
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::new(
            "workflow",
            "Describe the workflow your agent will handle.",
            InputKind::FreeText,
            extract_workflow,
        ),
        Question::new(
            "channels",
            "Which channels will customers reach the agent through?",
            InputKind::MultiChoice,
            extract_channels,
        )
        .with_choices(Channel::ALL.iter().map(|c| c.label())),
        Question::new(
            "volume",
            "How many interactions do you expect per month in total?",
            InputKind::Number,
            extract_volume,
        ),
        Question::new(
            "model",
            "Which model should power the agent?",
            InputKind::SingleChoice,
            extract_model,
        )
        .with_choices(MODEL_CHOICES.iter().map(|(label, _)| *label)),
        Question::new(
            "complexity",
            "How involved is a typical interaction?",
            InputKind::SingleChoice,
            extract_complexity,
        )
        .with_choices(Complexity::ALL.iter().map(|c| c.label())),
        Question::new(
            "knowledge",
            "Does the agent need to look things up in your documents?",
            InputKind::SingleChoice,
            extract_knowledge,
        )
        .with_choices(KNOWLEDGE_CHOICES),
        Question::new(
            "integrations",
            "Which systems will the agent work with?",
            InputKind::MultiChoice,
            extract_integrations,
        )
        .with_choices(INTEGRATION_CHOICES),
        Question::new(
            "agents",
            "How many specialised agents will cooperate on each interaction?",
            InputKind::Number,
            extract_agents,
        ),
        Question::new(
            "capabilities",
            "Which extra capabilities do you need?",
            InputKind::MultiChoice,
            extract_capabilities,
        )
        .with_choices(CAPABILITY_CHOICES),
        Question::new(
            "evaluation",
            "How thoroughly should the agent be evaluated before launch?",
            InputKind::SingleChoice,
            extract_evaluation,
        )
        .with_choices(EVALUATION_CHOICES),
    ]
}

/// Split a monthly total across the selected channels.
///
/// * Email and Chat together: 60% email, the remainder to chat.
/// * One conversational channel: all of it.
/// * Any other mix of conversational channels: an even split, remainder to
///   the earliest channels.
/// * No conversational channel: read as daily triggers over working days.
///
/// Total for every `total`; the conversational shares always add back up to it.
pub fn split_volume(total: u64, channels: &[Channel]) -> ChannelVolumes {
    let conversational: Vec<Channel> = Channel::ALL
        .into_iter()
        .filter(|c| c.is_conversational() && channels.contains(c))
        .collect();

    let mut volume = ChannelVolumes::default();
    match conversational.as_slice() {
        [] => {
            let rounds_up = total % WORKING_DAYS_PER_MONTH >= WORKING_DAYS_PER_MONTH / 2;
            volume.daily_triggers = total / WORKING_DAYS_PER_MONTH + u64::from(rounds_up);
        }
        [Channel::Email, Channel::Chat] => {
            let email = total / 100 * 60 + (total % 100 * 60 + 50) / 100;
            volume.emails_per_month = email;
            volume.chats_per_month = total - email;
        }
        selected => {
            let count = selected.len() as u64;
            let share = total / count;
            let remainder = total % count;
            for (index, channel) in selected.iter().enumerate() {
                let extra = u64::from((index as u64) < remainder);
                set_channel_volume(&mut volume, *channel, share + extra);
            }
        }
    }
    volume
}

fn set_channel_volume(volume: &mut ChannelVolumes, channel: Channel, amount: u64) {
    match channel {
        Channel::Email => volume.emails_per_month = amount,
        Channel::Chat => volume.chats_per_month = amount,
        Channel::Voice => volume.voice_calls_per_month = amount,
        Channel::ScheduledTrigger => volume.daily_triggers = amount,
    }
}

fn has_label(answer: &Answer, needle: &str) -> bool {
    answer
        .labels()
        .iter()
        .any(|label| label.to_lowercase().contains(needle))
}

/// "None" or "No ..." as a whole word, so "unknown" or "knowledge" do not count
fn is_negative(answer: &Answer) -> bool {
    answer.labels().iter().any(|label| {
        label
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word.eq_ignore_ascii_case("no") || word.eq_ignore_ascii_case("none"))
    })
}

fn extract_workflow(answer: &Answer, data: &ExtractedData) -> ExtractedData {
    let text = answer.display();
    let description = text.trim();
    if description.is_empty() {
        return data.clone();
    }
    ExtractedData {
        workflow_description: description.to_string(),
        ..data.clone()
    }
}

fn extract_channels(answer: &Answer, data: &ExtractedData) -> ExtractedData {
    let mut channels: Vec<Channel> = answer
        .labels()
        .iter()
        .filter_map(|label| Channel::from_label(label))
        .collect();
    channels.sort();
    channels.dedup();

    // An explicit empty selection means triggers only; anything unrecognised is ignored
    let explicitly_empty = matches!(answer, Answer::Choices(labels) if labels.is_empty());
    if channels.is_empty() && !explicitly_empty {
        return data.clone();
    }

    let mut next = data.clone();
    next.workload.volume = split_volume(data.monthly_volume, &channels);
    next.channels = channels;
    next
}

fn extract_volume(answer: &Answer, data: &ExtractedData) -> ExtractedData {
    let Some(total) = answer.as_number() else {
        return data.clone();
    };
    let mut next = data.clone();
    next.monthly_volume = total;
    next.workload.volume = split_volume(total, &data.channels);
    next
}

fn extract_model(answer: &Answer, data: &ExtractedData) -> ExtractedData {
    let labels = answer.labels();
    let Some(label) = labels.first() else {
        return data.clone();
    };
    let lower = label.trim().to_lowercase();
    if lower.is_empty() {
        return data.clone();
    }
    let model = MODEL_CHOICES
        .iter()
        .find(|(choice, id)| choice.to_lowercase() == lower || *id == lower)
        .or_else(|| {
            MODEL_CHOICES
                .iter()
                .find(|(choice, _)| {
                    let choice = choice.to_lowercase();
                    lower.contains(&choice) || choice.contains(&lower)
                })
        })
        .map(|(_, id)| *id);

    let mut next = data.clone();
    if let Some(id) = model {
        next.workload.model = id.to_string();
    }
    next
}

fn extract_complexity(answer: &Answer, data: &ExtractedData) -> ExtractedData {
    let complexity = answer
        .labels()
        .iter()
        .find_map(|label| Complexity::from_label(label));
    let Some(complexity) = complexity else {
        return data.clone();
    };
    let (input_tokens, output_tokens) = complexity.token_profile();
    let mut next = data.clone();
    next.complexity = complexity;
    next.workload.tokens.input_tokens = input_tokens;
    next.workload.tokens.output_tokens = output_tokens;
    next
}

fn extract_knowledge(answer: &Answer, data: &ExtractedData) -> ExtractedData {
    let (queries, bases) = if has_label(answer, "large") {
        (3, 2)
    } else if has_label(answer, "few") || has_label(answer, "document") {
        (1, 1)
    } else if is_negative(answer) {
        (0, 0)
    } else {
        return data.clone();
    };
    let mut next = data.clone();
    next.workload.features.knowledge_queries = queries;
    next.workload.setup.knowledge_bases = bases;
    next
}

fn extract_integrations(answer: &Answer, data: &ExtractedData) -> ExtractedData {
    let integrations: Vec<String> = INTEGRATION_CHOICES
        .iter()
        .filter(|choice| has_label(answer, &choice.to_lowercase()))
        .map(|choice| choice.to_string())
        .collect();

    let has = |name: &str| integrations.iter().any(|i| i == name);
    let tool_integrations = integrations
        .iter()
        .filter(|i| i.as_str() != "Database" && i.as_str() != "Web search")
        .count() as u64;

    let mut next = data.clone();
    next.workload.features.tool_calls = tool_integrations;
    next.workload.features.database_queries = if has("Database") { 2 } else { 0 };
    next.workload.features.web_fetches = if has("Web search") { 1 } else { 0 };
    next.workload.setup.tools = integrations.len() as u64;
    next.integrations = integrations;
    next
}

fn extract_agents(answer: &Answer, data: &ExtractedData) -> ExtractedData {
    let Some(agents) = answer.as_number() else {
        return data.clone();
    };
    let agents = agents.max(1);
    let mut next = data.clone();
    next.workload.setup.agents = agents;
    next.workload.tokens.inter_agent_tokens =
        (agents - 1).saturating_mul(INTER_AGENT_TOKENS_PER_EXTRA_AGENT);
    next
}

fn extract_capabilities(answer: &Answer, data: &ExtractedData) -> ExtractedData {
    let mut next = data.clone();
    let features = &mut next.workload.features;
    let remembers = has_label(answer, "remember") || has_label(answer, "memory");
    let reflects = has_label(answer, "quality") || has_label(answer, "reflect");
    features.memory_operations = if remembers { 4 } else { 0 };
    features.reflection_runs = if reflects { 1 } else { 0 };
    features.deep_crawl_pages = if has_label(answer, "crawl") { 5 } else { 0 };
    next
}

fn extract_evaluation(answer: &Answer, data: &ExtractedData) -> ExtractedData {
    let suites = if has_label(answer, "comprehensive") {
        3
    } else if has_label(answer, "basic") {
        1
    } else if is_negative(answer) {
        0
    } else {
        return data.clone();
    };
    let mut next = data.clone();
    next.workload.setup.evaluation_suites = suites;
    next
}
