//! Conversation state and the data extracted from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use costkit_core::{ChannelVolumes, TokenUsage, WorkloadDescription};

use crate::question::Answer;

/// Channel a workflow receives transactions on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Chat,
    Voice,
    ScheduledTrigger,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Self::Email, Self::Chat, Self::Voice, Self::ScheduledTrigger];

    /// Label shown as a choice
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Chat => "Chat",
            Self::Voice => "Voice",
            Self::ScheduledTrigger => "Scheduled triggers",
        }
    }

    /// Interactive channels share the monthly volume; triggers do not
    pub fn is_conversational(&self) -> bool {
        !matches!(self, Self::ScheduledTrigger)
    }

    /// Match a free-form label, case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        if lower.contains("email") || lower.contains("e-mail") {
            Some(Self::Email)
        } else if lower.contains("chat") {
            Some(Self::Chat)
        } else if lower.contains("voice") || lower.contains("phone") || lower.contains("call") {
            Some(Self::Voice)
        } else if lower.contains("trigger") || lower.contains("schedule") {
            Some(Self::ScheduledTrigger)
        } else {
            None
        }
    }
}

/// Typical size of a single agent response
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Short,
    #[default]
    Moderate,
    Detailed,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Self::Short, Self::Moderate, Self::Detailed];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Short => "Short answers",
            Self::Moderate => "Moderate back-and-forth",
            Self::Detailed => "Detailed, multi-step work",
        }
    }

    /// Average input / output tokens per transaction
    pub fn token_profile(&self) -> (u64, u64) {
        match self {
            Self::Short => (1000, 300),
            Self::Moderate => (2000, 800),
            Self::Detailed => (4000, 1500),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.trim().to_lowercase();
        if lower.starts_with("short") || lower.contains("simple") {
            Some(Self::Short)
        } else if lower.starts_with("moderate") || lower.contains("medium") {
            Some(Self::Moderate)
        } else if lower.starts_with("detailed") || lower.contains("complex") {
            Some(Self::Detailed)
        } else {
            None
        }
    }
}

/// Workload description accumulated over a conversation.
///
/// The default is a complete, priceable record so that a conversation can be
/// estimated at any step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    pub workflow_description: String,
    pub channels: Vec<Channel>,
    /// Total monthly volume as answered, before splitting across channels
    pub monthly_volume: u64,
    pub complexity: Complexity,
    pub integrations: Vec<String>,
    pub workload: WorkloadDescription,
}

impl Default for ExtractedData {
    fn default() -> Self {
        let complexity = Complexity::default();
        let (input_tokens, output_tokens) = complexity.token_profile();
        let monthly_volume = 1000;

        Self {
            workflow_description: "a general-purpose agent workflow".to_string(),
            channels: vec![Channel::Chat],
            monthly_volume,
            complexity,
            integrations: Vec::new(),
            workload: WorkloadDescription {
                tokens: TokenUsage {
                    input_tokens,
                    output_tokens,
                    inter_agent_tokens: 0,
                },
                volume: ChannelVolumes {
                    chats_per_month: monthly_volume,
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }
}

/// Immutable snapshot of a discovery conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    /// Index of the next question to ask
    pub current_step: usize,
    /// Raw answers keyed by question id
    pub responses: BTreeMap<String, Answer>,
    pub extracted: ExtractedData,
}

impl ConversationState {
    /// Fresh state at step zero with defaulted data
    pub fn new() -> Self {
        Self::default()
    }

    /// The workload extracted so far
    pub fn workload(&self) -> &WorkloadDescription {
        &self.extracted.workload
    }
}
