//! Conversation engine - a fixed, linear sequence of questions.
//!
//! States are step indices `0..=N`. Every response moves exactly one step
//! forward, so a conversation over `N` questions always terminates after `N`
//! responses whatever the answers are. Transitions return new snapshots and
//! never touch the state they were given; the caller swaps its held state
//! for the returned one.

use crate::question::{Answer, Question};
use crate::questions::default_questions;
use crate::state::{ConversationState, ExtractedData};
use crate::summary;

/// Drives a discovery conversation over an ordered question list
#[derive(Debug, Clone)]
pub struct ConversationEngine {
    questions: Vec<Question>,
}

impl Default for ConversationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationEngine {
    /// Engine over the default questionnaire
    pub fn new() -> Self {
        Self::with_questions(default_questions())
    }

    /// Engine over a custom question list
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions, which is also the terminal step
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Start a conversation at step zero with defaulted data
    pub fn initialize_conversation(&self) -> ConversationState {
        ConversationState::new()
    }

    /// The question at the current step, or `None` once terminal
    pub fn next_question<'a>(&'a self, state: &ConversationState) -> Option<&'a Question> {
        self.questions.get(state.current_step)
    }

    pub fn is_complete(&self, state: &ConversationState) -> bool {
        state.current_step >= self.questions.len()
    }

    /// Apply an answer to the current question and return the next snapshot.
    ///
    /// A terminal state is returned unchanged.
    pub fn process_response(&self, state: &ConversationState, answer: Answer) -> ConversationState {
        let Some(question) = self.next_question(state) else {
            return state.clone();
        };

        let extracted = question.apply(&answer, &state.extracted);
        let mut responses = state.responses.clone();
        responses.insert(question.id.clone(), answer);

        ConversationState {
            current_step: state.current_step + 1,
            responses,
            extracted,
        }
    }

    /// Skip the current question
    pub fn skip(&self, state: &ConversationState) -> ConversationState {
        self.process_response(state, Answer::Skipped)
    }

    /// Fraction of questions answered or skipped
    pub fn progress(&self, state: &ConversationState) -> f64 {
        if self.questions.is_empty() {
            return 1.0;
        }
        state.current_step.min(self.questions.len()) as f64 / self.questions.len() as f64
    }

    /// One-paragraph description of the extracted workflow
    pub fn generate_workflow_summary(&self, data: &ExtractedData) -> String {
        summary::generate_workflow_summary(data)
    }
}
