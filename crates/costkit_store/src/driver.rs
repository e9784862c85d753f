//! Persisted discovery conversations.
//!
//! [`DiscoveryDriver`] owns the single current snapshot of a conversation.
//! Each answer produces the next snapshot, which is saved first and only then
//! replaces the held one. A failed save returns the error and leaves the
//! driver exactly where it was.

use costkit_discovery::{Answer, ConversationEngine, ConversationState, Question};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::session_store::{SessionStore, StoredSession};

pub struct DiscoveryDriver<S: SessionStore> {
    engine: ConversationEngine,
    store: S,
    session: StoredSession,
}

impl<S: SessionStore> DiscoveryDriver<S> {
    /// Start a new session and persist its initial snapshot
    pub fn start(engine: ConversationEngine, store: S) -> StoreResult<Self> {
        let session = StoredSession::new(engine.initialize_conversation());
        Self::start_with(engine, store, session)
    }

    /// Start a session under a caller-chosen id
    pub fn start_with_id(
        engine: ConversationEngine,
        store: S,
        id: impl Into<String>,
    ) -> StoreResult<Self> {
        let session = StoredSession::with_id(id, engine.initialize_conversation());
        Self::start_with(engine, store, session)
    }

    fn start_with(
        engine: ConversationEngine,
        store: S,
        session: StoredSession,
    ) -> StoreResult<Self> {
        store.save(&session)?;
        info!(session = %session.id, "Started discovery session");
        Ok(Self { engine, store, session })
    }

    /// Continue a previously saved session
    pub fn resume(engine: ConversationEngine, store: S, id: &str) -> StoreResult<Self> {
        let session = store.load(id)?;
        info!(session = %id, step = session.state.current_step, "Resumed discovery session");
        Ok(Self { engine, store, session })
    }

    pub fn session_id(&self) -> &str {
        &self.session.id
    }

    pub fn session(&self) -> &StoredSession {
        &self.session
    }

    pub fn state(&self) -> &ConversationState {
        &self.session.state
    }

    pub fn engine(&self) -> &ConversationEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.engine.next_question(&self.session.state)
    }

    pub fn is_complete(&self) -> bool {
        self.engine.is_complete(&self.session.state)
    }

    /// Answer the current question, persisting before advancing
    pub fn answer(&mut self, answer: Answer) -> StoreResult<&ConversationState> {
        let next_state = self.engine.process_response(&self.session.state, answer);
        let next = self.session.advanced(next_state);

        self.store.save(&next)?;
        debug!(session = %next.id, step = next.state.current_step, "Advanced discovery session");
        self.session = next;

        Ok(&self.session.state)
    }

    pub fn skip(&mut self) -> StoreResult<&ConversationState> {
        self.answer(Answer::Skipped)
    }

    /// Consume the driver, returning the final snapshot
    pub fn into_state(self) -> ConversationState {
        self.session.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::session_store::MemorySessionStore;

    #[test]
    fn test_start_persists_initial_snapshot() {
        let store = MemorySessionStore::new();
        let driver = DiscoveryDriver::start(ConversationEngine::new(), store.clone()).unwrap();

        assert_eq!(store.call_count("save"), 1);
        let saved = store.load(driver.session_id()).unwrap();
        assert_eq!(saved.state.current_step, 0);
        assert_eq!(driver.current_question().map(|q| q.id.as_str()), Some("workflow"));
    }

    #[test]
    fn test_answers_are_saved_in_order() {
        let store = MemorySessionStore::new();
        let mut driver =
            DiscoveryDriver::start_with_id(ConversationEngine::new(), store.clone(), "s1").unwrap();

        driver.answer(Answer::text("Book appointments")).unwrap();
        driver.answer(Answer::choices(["Voice"])).unwrap();

        let saved = store.load("s1").unwrap();
        assert_eq!(saved.state.current_step, 2);
        assert_eq!(saved.state, *driver.state());
        assert_eq!(store.call_count("save"), 3);
    }

    #[test]
    fn test_failed_save_leaves_state_unchanged() {
        let store = MemorySessionStore::new();
        let mut driver =
            DiscoveryDriver::start_with_id(ConversationEngine::new(), store.clone(), "s2").unwrap();
        driver.answer(Answer::text("Screen job applicants")).unwrap();
        let before = driver.state().clone();

        store.set_fail_saves(Some("disk full".to_string()));
        let err = driver.answer(Answer::choices(["Email"])).unwrap_err();

        assert!(matches!(err, StoreError::Simulated(_)));
        assert_eq!(driver.state(), &before);
        assert_eq!(store.load("s2").unwrap().state, before);

        store.set_fail_saves(None);
        driver.answer(Answer::choices(["Email"])).unwrap();
        assert_eq!(driver.state().current_step, 2);
    }

    #[test]
    fn test_resume_continues_where_it_stopped() {
        let store = MemorySessionStore::new();
        {
            let mut driver =
                DiscoveryDriver::start_with_id(ConversationEngine::new(), store.clone(), "s3")
                    .unwrap();
            driver.answer(Answer::text("Summarise meeting notes")).unwrap();
            driver.skip().unwrap();
        }

        let driver = DiscoveryDriver::resume(ConversationEngine::new(), store, "s3").unwrap();
        assert_eq!(driver.state().current_step, 2);
        assert_eq!(driver.current_question().map(|q| q.id.as_str()), Some("volume"));
    }

    #[test]
    fn test_resume_unknown_session() {
        let store = MemorySessionStore::new();
        let result = DiscoveryDriver::resume(ConversationEngine::new(), store, "missing");
        assert!(matches!(result, Err(StoreError::SessionNotFound(_))));
    }

    #[test]
    fn test_failed_start_returns_error() {
        let store = MemorySessionStore::new().fail_saves("read-only");
        assert!(DiscoveryDriver::start(ConversationEngine::new(), store.clone()).is_err());
        assert!(store.is_empty());
    }
}
