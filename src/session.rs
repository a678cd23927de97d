//! Session store — one conversation per open widget, kept in memory.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::dialogue::{ConversationState, DialogueEngine, Turn, TurnReport, UserAction};
use crate::error::SessionError;

/// In-memory conversations keyed by session id, sharing one engine.
pub struct SessionStore {
    engine: DialogueEngine,
    sessions: RwLock<HashMap<Uuid, ConversationState>>,
}

impl SessionStore {
    pub fn new(engine: DialogueEngine) -> Arc<Self> {
        Arc::new(Self {
            engine,
            sessions: RwLock::new(HashMap::new()),
        })
    }

    /// Start a conversation and return its id with the greeting.
    pub async fn open(&self, last_visit: Option<chrono::DateTime<Utc>>) -> (Uuid, TurnReport) {
        let id = Uuid::new_v4();
        let mut state = ConversationState::new();
        let turn = self.engine.open(&mut state, last_visit, Utc::now());
        let report = TurnReport::new(turn, &state);

        self.sessions.write().await.insert(id, state);
        info!(session_id = %id, "Session opened");
        (id, report)
    }

    /// Classify raw widget input against the session and run one turn.
    pub async fn send(&self, id: Uuid, raw: &str) -> Result<TurnReport, SessionError> {
        let mut sessions = self.sessions.write().await;
        let state = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;

        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(TurnReport::new(Turn::default(), state));
        }

        let action = UserAction::classify_for(raw, state);
        debug!(session_id = %id, action = ?action, "Applying user action");
        let turn = self.engine.apply(state, action);
        Ok(TurnReport::new(turn, state))
    }

    /// Clear the conversation and greet again.
    pub async fn reset(&self, id: Uuid) -> Result<TurnReport, SessionError> {
        let mut sessions = self.sessions.write().await;
        let state = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;

        state.reset();
        let turn = self.engine.open(state, None, Utc::now());
        info!(session_id = %id, "Session reset");
        Ok(TurnReport::new(turn, state))
    }

    pub async fn get(&self, id: Uuid) -> Option<ConversationState> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drop a session. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Session removed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChatConfig;
    use crate::dialogue::DialoguePhase;

    fn store() -> Arc<SessionStore> {
        SessionStore::new(DialogueEngine::new(ChatConfig::default().without_delays()))
    }

    #[tokio::test]
    async fn open_creates_greeted_session() {
        let store = store();
        let (id, report) = store.open(None).await;
        assert_eq!(report.replies.len(), 1);
        assert_eq!(report.phase, DialoguePhase::Greeting);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(id).await.unwrap().transcript.len(), 1);
    }

    #[tokio::test]
    async fn send_advances_questionnaire() {
        let store = store();
        let (id, _) = store.open(None).await;
        let report = store.send(id, "Asha").await.unwrap();
        assert_eq!(report.step, 1);
        assert_eq!(report.phase, DialoguePhase::Collecting);
        let state = store.get(id).await.unwrap();
        assert_eq!(state.profile.name.as_deref(), Some("Asha"));
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let store = store();
        let (id, _) = store.open(None).await;
        let report = store.send(id, "   ").await.unwrap();
        assert!(report.replies.is_empty());
        assert_eq!(report.step, 0);
        assert_eq!(store.get(id).await.unwrap().transcript.len(), 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = store();
        let (a, _) = store.open(None).await;
        let (b, _) = store.open(None).await;
        store.send(a, "Asha").await.unwrap();
        assert_eq!(store.get(b).await.unwrap().step, 0);
    }

    #[tokio::test]
    async fn reset_returns_to_greeting() {
        let store = store();
        let (id, _) = store.open(None).await;
        store.send(id, "Asha").await.unwrap();
        store.send(id, "bye").await.unwrap();

        let report = store.reset(id).await.unwrap();
        assert_eq!(report.phase, DialoguePhase::Greeting);
        assert_eq!(report.step, 0);
        let state = store.get(id).await.unwrap();
        assert!(state.profile.is_empty());
        assert_eq!(state.transcript.len(), 1);
    }

    #[tokio::test]
    async fn unknown_session_is_an_error() {
        let store = store();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.send(id, "hi").await,
            Err(SessionError::NotFound { id: missing }) if missing == id
        ));
        assert!(store.reset(id).await.is_err());
        assert!(!store.remove(id).await);
    }

    #[tokio::test]
    async fn remove_drops_session() {
        let store = store();
        let (id, _) = store.open(None).await;
        assert!(store.remove(id).await);
        assert!(store.get(id).await.is_none());
        assert_eq!(store.len().await, 0);
    }
}
