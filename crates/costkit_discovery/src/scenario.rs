//! Scripted discovery scenarios.
//!
//! A scenario is a named list of answers keyed by question id. The player
//! walks the engine's questions in order, feeding each the scripted answer
//! for its id or `Skipped` when the script has none. Script entries whose id
//! matches no question are ignored.

use serde::{Deserialize, Serialize};

use crate::engine::ConversationEngine;
use crate::error::{DiscoveryError, DiscoveryResult};
use crate::question::Answer;
use crate::state::ConversationState;

const BUILTIN_SOURCES: [&str; 3] = [
    include_str!("../scenarios/customer-support.yaml"),
    include_str!("../scenarios/lead-qualification.yaml"),
    include_str!("../scenarios/invoice-processing.yaml"),
];

/// One scripted answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptedAnswer {
    pub question_id: String,
    pub answer: Answer,
}

/// A named, replayable set of answers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub answers: Vec<ScriptedAnswer>,
}

impl Scenario {
    /// Parse a scenario from YAML
    pub fn from_yaml(source: &str) -> DiscoveryResult<Self> {
        let scenario: Scenario = serde_yaml::from_str(source)?;
        if scenario.name.trim().is_empty() {
            return Err(DiscoveryError::InvalidScenario {
                name: scenario.title,
                message: "name must not be empty".to_string(),
            });
        }
        Ok(scenario)
    }

    /// Scripted answer for a question, if any
    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers
            .iter()
            .find(|scripted| scripted.question_id == question_id)
            .map(|scripted| &scripted.answer)
    }
}

/// Parse the scenarios shipped with the crate
pub fn builtin_scenarios() -> DiscoveryResult<Vec<Scenario>> {
    BUILTIN_SOURCES.iter().map(|source| Scenario::from_yaml(source)).collect()
}

/// Look up a built-in scenario by name
pub fn find_scenario(name: &str) -> DiscoveryResult<Scenario> {
    builtin_scenarios()?
        .into_iter()
        .find(|scenario| scenario.name == name)
        .ok_or_else(|| DiscoveryError::UnknownScenario(name.to_string()))
}

/// Question and answer as they were played
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub question_id: String,
    pub prompt: String,
    pub answer: Answer,
}

/// One played step and the snapshot it produced
#[derive(Debug, Clone)]
pub struct ScenarioStep {
    pub index: usize,
    pub entry: TranscriptEntry,
    pub state: ConversationState,
}

/// Final state of a replay plus what was asked and answered
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub state: ConversationState,
    pub transcript: Vec<TranscriptEntry>,
}

/// Replays scenarios through a [`ConversationEngine`]
#[derive(Debug, Clone, Default)]
pub struct ScenarioPlayer {
    engine: ConversationEngine,
}

impl ScenarioPlayer {
    pub fn new(engine: ConversationEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ConversationEngine {
        &self.engine
    }

    /// Iterate the replay one question at a time
    pub fn steps<'a>(&'a self, scenario: &'a Scenario) -> ScenarioSteps<'a> {
        ScenarioSteps {
            engine: &self.engine,
            scenario,
            state: self.engine.initialize_conversation(),
        }
    }

    /// Run the whole scenario to its terminal state
    pub fn play(&self, scenario: &Scenario) -> ScenarioOutcome {
        let mut state = self.engine.initialize_conversation();
        let mut transcript = Vec::with_capacity(self.engine.len());
        for step in self.steps(scenario) {
            transcript.push(step.entry);
            state = step.state;
        }
        ScenarioOutcome { state, transcript }
    }
}

/// Iterator returned by [`ScenarioPlayer::steps`]
pub struct ScenarioSteps<'a> {
    engine: &'a ConversationEngine,
    scenario: &'a Scenario,
    state: ConversationState,
}

impl Iterator for ScenarioSteps<'_> {
    type Item = ScenarioStep;

    fn next(&mut self) -> Option<Self::Item> {
        let question = self.engine.next_question(&self.state)?;
        let answer = self
            .scenario
            .answer_for(&question.id)
            .cloned()
            .unwrap_or(Answer::Skipped);

        let entry = TranscriptEntry {
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            answer: answer.clone(),
        };
        let index = self.state.current_step;
        self.state = self.engine.process_response(&self.state, answer);

        Some(ScenarioStep {
            index,
            entry,
            state: self.state.clone(),
        })
    }
}
