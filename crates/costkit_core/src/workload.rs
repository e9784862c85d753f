//! Workload description: the usage profile of an agent workflow.
//!
//! A [`WorkloadDescription`] is everything the cost engine needs to price a
//! workflow: token volumes per transaction, feature calls per transaction,
//! one-time setup requirements and the monthly channel volumes.

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_MODEL;

/// Working days used to turn daily triggers into a monthly volume.
pub const WORKING_DAYS_PER_MONTH: u64 = 22;

/// Auxiliary capabilities billed per invocation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Knowledge-base (RAG) lookup
    KnowledgeQuery,
    /// External tool call
    ToolCall,
    /// Database query
    DatabaseQuery,
    /// Memory read or write
    MemoryOperation,
    /// Reflection / quality-check run
    ReflectionRun,
    /// Single-page web fetch
    WebFetch,
    /// Page visited by a deep crawl
    DeepCrawlPage,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 7] = [
        FeatureKind::KnowledgeQuery,
        FeatureKind::ToolCall,
        FeatureKind::DatabaseQuery,
        FeatureKind::MemoryOperation,
        FeatureKind::ReflectionRun,
        FeatureKind::WebFetch,
        FeatureKind::DeepCrawlPage,
    ];

    /// Catalog row name for this feature
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KnowledgeQuery => "knowledge_query",
            Self::ToolCall => "tool_call",
            Self::DatabaseQuery => "database_query",
            Self::MemoryOperation => "memory_operation",
            Self::ReflectionRun => "reflection_run",
            Self::WebFetch => "web_fetch",
            Self::DeepCrawlPage => "deep_crawl_page",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::KnowledgeQuery => "knowledge lookup",
            Self::ToolCall => "tool call",
            Self::DatabaseQuery => "database query",
            Self::MemoryOperation => "memory operation",
            Self::ReflectionRun => "quality check",
            Self::WebFetch => "web fetch",
            Self::DeepCrawlPage => "deep-crawl page",
        }
    }

    /// Parse a catalog row name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// One-time setup items, charged once regardless of volume
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SetupItem {
    Agent,
    KnowledgeBase,
    Tool,
    EvaluationSuite,
}

impl SetupItem {
    pub const ALL: [SetupItem; 4] = [
        SetupItem::Agent,
        SetupItem::KnowledgeBase,
        SetupItem::Tool,
        SetupItem::EvaluationSuite,
    ];

    /// Catalog row name for this setup item
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::KnowledgeBase => "knowledge_base",
            Self::Tool => "tool",
            Self::EvaluationSuite => "evaluation_suite",
        }
    }

    /// Parse a catalog row name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.as_str() == name)
    }
}

/// Average tokens per transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// Tokens exchanged between cooperating agents
    pub inter_agent_tokens: u64,
}

/// Feature invocations per transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureUsage {
    pub knowledge_queries: u64,
    pub tool_calls: u64,
    pub database_queries: u64,
    pub memory_operations: u64,
    pub reflection_runs: u64,
    pub web_fetches: u64,
    pub deep_crawl_pages: u64,
}

impl FeatureUsage {
    /// Invocations of a single feature kind
    pub fn count(&self, kind: FeatureKind) -> u64 {
        match kind {
            FeatureKind::KnowledgeQuery => self.knowledge_queries,
            FeatureKind::ToolCall => self.tool_calls,
            FeatureKind::DatabaseQuery => self.database_queries,
            FeatureKind::MemoryOperation => self.memory_operations,
            FeatureKind::ReflectionRun => self.reflection_runs,
            FeatureKind::WebFetch => self.web_fetches,
            FeatureKind::DeepCrawlPage => self.deep_crawl_pages,
        }
    }

    /// Total invocations across all features
    pub fn total(&self) -> u64 {
        FeatureKind::ALL
            .iter()
            .fold(0u64, |total, kind| total.saturating_add(self.count(*kind)))
    }
}

/// One-time setup requirements
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SetupRequirements {
    pub agents: u64,
    pub knowledge_bases: u64,
    pub tools: u64,
    pub evaluation_suites: u64,
}

impl Default for SetupRequirements {
    fn default() -> Self {
        Self {
            agents: 1,
            knowledge_bases: 0,
            tools: 0,
            evaluation_suites: 0,
        }
    }
}

impl SetupRequirements {
    /// Units of a single setup item
    pub fn count(&self, item: SetupItem) -> u64 {
        match item {
            SetupItem::Agent => self.agents,
            SetupItem::KnowledgeBase => self.knowledge_bases,
            SetupItem::Tool => self.tools,
            SetupItem::EvaluationSuite => self.evaluation_suites,
        }
    }
}

/// Monthly volume per channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelVolumes {
    pub emails_per_month: u64,
    pub chats_per_month: u64,
    pub voice_calls_per_month: u64,
    /// Workflow triggers per working day
    pub daily_triggers: u64,
}

impl ChannelVolumes {
    /// Monthly transactions across every channel, or `None` when the total
    /// does not fit in a `u64`
    pub fn checked_transactions_per_month(&self) -> Option<u64> {
        self.daily_triggers
            .checked_mul(WORKING_DAYS_PER_MONTH)?
            .checked_add(self.emails_per_month)?
            .checked_add(self.chats_per_month)?
            .checked_add(self.voice_calls_per_month)
    }

    /// Monthly transactions across every channel, saturating at `u64::MAX`
    pub fn transactions_per_month(&self) -> u64 {
        self.checked_transactions_per_month().unwrap_or(u64::MAX)
    }
}

/// Complete usage profile of a workflow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadDescription {
    /// Catalog model id
    pub model: String,
    #[serde(default)]
    pub tokens: TokenUsage,
    #[serde(default)]
    pub features: FeatureUsage,
    #[serde(default)]
    pub setup: SetupRequirements,
    #[serde(default)]
    pub volume: ChannelVolumes,
}

impl Default for WorkloadDescription {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            tokens: TokenUsage::default(),
            features: FeatureUsage::default(),
            setup: SetupRequirements::default(),
            volume: ChannelVolumes::default(),
        }
    }
}

impl WorkloadDescription {
    /// Create a workload for a model with every other field defaulted
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Derived monthly transaction count; never stored
    pub fn transactions_per_month(&self) -> u64 {
        self.volume.transactions_per_month()
    }
}
