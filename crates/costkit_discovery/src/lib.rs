//! # costkit_discovery
//!
//! Guided discovery of an agent workload.
//!
//! A fixed sequence of questions turns a user's answers into a priceable
//! [`WorkloadDescription`](costkit_core::WorkloadDescription). The engine is
//! pure: every transition returns a new [`ConversationState`] and the caller
//! decides what to keep.
//!
//! ## Example
//!
//! ```rust
//! use costkit_discovery::{Answer, ConversationEngine};
//!
//! let engine = ConversationEngine::new();
//! let state = engine.initialize_conversation();
//! let state = engine.process_response(&state, Answer::text("Route support emails"));
//! let state = engine.process_response(&state, Answer::choices(["Email", "Chat"]));
//! let state = engine.process_response(&state, Answer::Number(5000));
//!
//! assert_eq!(state.workload().volume.emails_per_month, 3000);
//! assert_eq!(state.workload().volume.chats_per_month, 2000);
//! ```

pub mod engine;
pub mod error;
pub mod question;
pub mod questions;
pub mod scenario;
pub mod state;
pub mod summary;

pub use engine::ConversationEngine;
pub use error::{DiscoveryError, DiscoveryResult};
pub use question::{parse_number, Answer, Extractor, InputKind, Question};
pub use questions::{default_questions, split_volume, INTER_AGENT_TOKENS_PER_EXTRA_AGENT};
pub use scenario::{
    builtin_scenarios, find_scenario, Scenario, ScenarioOutcome, ScenarioPlayer, ScenarioStep,
    ScenarioSteps, ScriptedAnswer, TranscriptEntry,
};
pub use state::{Channel, Complexity, ConversationState, ExtractedData};
pub use summary::generate_workflow_summary;
