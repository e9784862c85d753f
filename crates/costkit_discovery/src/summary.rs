//! Human-readable workflow summary.

use costkit_core::FeatureKind;

use crate::state::{Channel, ExtractedData};

fn plural(count: u64, singular: &str) -> String {
    if count == 1 {
        format!("1 {}", singular)
    } else if let Some(stem) = singular.strip_suffix('y') {
        format!("{} {}ies", count, stem)
    } else {
        format!("{} {}s", count, singular)
    }
}

fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}

/// Describe the extracted workflow in one paragraph
pub fn generate_workflow_summary(data: &ExtractedData) -> String {
    let workload = &data.workload;
    let mut sentences = Vec::new();

    let channels: Vec<String> = data
        .channels
        .iter()
        .map(|c| match c {
            Channel::ScheduledTrigger => "scheduled triggers".to_string(),
            other => other.label().to_lowercase(),
        })
        .collect();
    let reach = if channels.is_empty() {
        "scheduled triggers".to_string()
    } else {
        join_list(&channels)
    };

    sentences.push(format!(
        "This workflow handles {} over {}, with about {} per month on the {} model.",
        data.workflow_description.trim_end_matches('.'),
        reach,
        plural(workload.transactions_per_month(), "transaction"),
        workload.model
    ));

    sentences.push(format!(
        "Each transaction averages {} input and {} output tokens",
        workload.tokens.input_tokens, workload.tokens.output_tokens
    ));
    if workload.tokens.inter_agent_tokens > 0 {
        let last = sentences.len() - 1;
        sentences[last].push_str(&format!(
            ", plus {} tokens of coordination between agents",
            workload.tokens.inter_agent_tokens
        ));
    }
    let last = sentences.len() - 1;
    sentences[last].push('.');

    let features: Vec<String> = FeatureKind::ALL
        .iter()
        .filter(|kind| workload.features.count(**kind) > 0)
        .map(|kind| plural(workload.features.count(*kind), kind.display_name()))
        .collect();
    if features.is_empty() {
        sentences.push("It uses no auxiliary features.".to_string());
    } else {
        sentences.push(format!("Per transaction it makes {}.", join_list(&features)));
    }

    if !data.integrations.is_empty() {
        sentences.push(format!("It integrates with {}.", join_list(&data.integrations)));
    }

    let setup = &workload.setup;
    sentences.push(format!(
        "Setup covers {}, {}, {} and {}.",
        plural(setup.agents, "agent"),
        plural(setup.knowledge_bases, "knowledge base"),
        plural(setup.tools, "tool"),
        plural(setup.evaluation_suites, "evaluation suite")
    ));

    sentences.join(" ")
}
