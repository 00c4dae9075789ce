use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::errors::DomainError;
use crate::session::{
    normalize_description, ChannelRef, MessageRef, ParticipantId, Session, SessionId, VoteValue,
};

/// Process-wide mapping from session id to session record.
///
/// The store is an owned object injected into handlers rather than a
/// module-level singleton. All mutations go through one async mutex so
/// concurrent event delivery cannot lose updates to `statuses` or `closed`;
/// no lock is held across an await point. Sessions are never deleted.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an empty-vote session and returns its id. A generated id
    /// that collides with a live session is rejected rather than
    /// overwritten.
    pub async fn create(
        &self,
        channel: ChannelRef,
        title: impl Into<String>,
        description: &str,
    ) -> Result<Session, DomainError> {
        let session = Session::new(channel, title, description);
        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&session.id) {
            return Err(DomainError::IdCollision(session.id));
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    /// Snapshot of a session, if it exists.
    pub async fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions.lock().await.get(id).cloned()
    }

    /// Records or overwrites the participant's vote. Closed sessions
    /// permanently reject voting.
    pub async fn record_vote(
        &self,
        id: &SessionId,
        participant: ParticipantId,
        value: VoteValue,
    ) -> Result<Session, DomainError> {
        let mut sessions = self.sessions.lock().await;
        let session =
            sessions.get_mut(id).ok_or_else(|| DomainError::SessionNotFound(id.clone()))?;
        if session.closed {
            return Err(DomainError::SessionClosed(id.clone()));
        }
        session.statuses.insert(participant, value);
        Ok(session.clone())
    }

    /// Clears every vote while preserving title, description, id, and the
    /// card binding.
    pub async fn reset(&self, id: &SessionId) -> Result<Session, DomainError> {
        let mut sessions = self.sessions.lock().await;
        let session =
            sessions.get_mut(id).ok_or_else(|| DomainError::SessionNotFound(id.clone()))?;
        session.statuses.clear();
        Ok(session.clone())
    }

    /// Binds the posted status card to the session. Set once; the binding
    /// is immutable thereafter.
    pub async fn set_message(&self, id: &SessionId, message: MessageRef) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().await;
        let session =
            sessions.get_mut(id).ok_or_else(|| DomainError::SessionNotFound(id.clone()))?;
        if session.message.is_some() {
            return Err(DomainError::MessageAlreadyBound(id.clone()));
        }
        session.message = Some(message);
        Ok(())
    }

    /// Mutates title and/or description in place. An empty description
    /// restores the fixed placeholder, never an empty string.
    pub async fn edit(
        &self,
        id: &SessionId,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Session, DomainError> {
        let mut sessions = self.sessions.lock().await;
        let session =
            sessions.get_mut(id).ok_or_else(|| DomainError::SessionNotFound(id.clone()))?;
        if let Some(title) = title {
            session.title = title;
        }
        if let Some(description) = description {
            session.description = normalize_description(&description);
        }
        Ok(session.clone())
    }

    /// Irreversibly closes the session; there is no reopen operation.
    pub async fn close(&self, id: &SessionId) -> Result<Session, DomainError> {
        let mut sessions = self.sessions.lock().await;
        let session =
            sessions.get_mut(id).ok_or_else(|| DomainError::SessionNotFound(id.clone()))?;
        session.closed = true;
        Ok(session.clone())
    }

    /// Looks a session up by its posted card, for the context-menu edit
    /// entry point.
    pub async fn find_by_message(&self, message: &MessageRef) -> Option<Session> {
        self.sessions
            .lock()
            .await
            .values()
            .find(|session| session.message.as_ref() == Some(message))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;
    use crate::errors::DomainError;
    use crate::session::{
        ChannelRef, MessageRef, ParticipantId, SessionId, VoteValue, DEFAULT_DESCRIPTION,
    };

    fn channel() -> ChannelRef {
        ChannelRef("C-1".to_owned())
    }

    fn alice() -> ParticipantId {
        ParticipantId("U-A".to_owned())
    }

    #[tokio::test]
    async fn create_inserts_an_empty_session() {
        let store = SessionStore::new();
        let session = store.create(channel(), "Pro Clubs", "").await.expect("create");

        let fetched = store.get(&session.id).await.expect("session should exist");
        assert_eq!(fetched.title, "Pro Clubs");
        assert_eq!(fetched.description, DEFAULT_DESCRIPTION);
        assert!(fetched.statuses.is_empty());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn revoting_overwrites_the_prior_vote() {
        let store = SessionStore::new();
        let session = store.create(channel(), "Pro Clubs", "").await.expect("create");

        store.record_vote(&session.id, alice(), VoteValue::Available).await.expect("vote");
        let updated =
            store.record_vote(&session.id, alice(), VoteValue::Unsure).await.expect("revote");

        assert_eq!(updated.statuses.len(), 1);
        assert_eq!(updated.vote_of(&alice()), Some(VoteValue::Unsure));
    }

    #[tokio::test]
    async fn voting_on_an_unknown_session_fails() {
        let store = SessionStore::new();
        let missing = SessionId("session-missing".to_owned());
        let error = store
            .record_vote(&missing, alice(), VoteValue::Available)
            .await
            .expect_err("vote should fail");
        assert_eq!(error, DomainError::SessionNotFound(missing));
    }

    #[tokio::test]
    async fn closed_sessions_permanently_reject_votes() {
        let store = SessionStore::new();
        let session = store.create(channel(), "Pro Clubs", "").await.expect("create");
        store.close(&session.id).await.expect("close");

        let error = store
            .record_vote(&session.id, alice(), VoteValue::Available)
            .await
            .expect_err("closed session must reject voting");
        assert_eq!(error, DomainError::SessionClosed(session.id));
    }

    #[tokio::test]
    async fn reset_clears_votes_but_preserves_metadata() {
        let store = SessionStore::new();
        let session = store.create(channel(), "Pro Clubs", "Friday lineup").await.expect("create");
        store.set_message(&session.id, MessageRef("M-1".to_owned())).await.expect("bind");
        store.record_vote(&session.id, alice(), VoteValue::Available).await.expect("vote");

        let reset = store.reset(&session.id).await.expect("reset");

        assert!(reset.statuses.is_empty());
        assert_eq!(reset.title, "Pro Clubs");
        assert_eq!(reset.description, "Friday lineup");
        assert_eq!(reset.id, session.id);
        assert_eq!(reset.message, Some(MessageRef("M-1".to_owned())));
    }

    #[tokio::test]
    async fn card_binding_is_immutable_once_set() {
        let store = SessionStore::new();
        let session = store.create(channel(), "Pro Clubs", "").await.expect("create");
        store.set_message(&session.id, MessageRef("M-1".to_owned())).await.expect("bind");

        let error = store
            .set_message(&session.id, MessageRef("M-2".to_owned()))
            .await
            .expect_err("rebinding should fail");
        assert_eq!(error, DomainError::MessageAlreadyBound(session.id));
    }

    #[tokio::test]
    async fn edit_with_empty_description_restores_the_placeholder() {
        let store = SessionStore::new();
        let session = store.create(channel(), "Pro Clubs", "Friday lineup").await.expect("create");

        let edited = store
            .edit(&session.id, Some("Pro Clubs II".to_owned()), Some(String::new()))
            .await
            .expect("edit");

        assert_eq!(edited.title, "Pro Clubs II");
        assert_eq!(edited.description, DEFAULT_DESCRIPTION);
    }

    #[tokio::test]
    async fn edit_leaves_omitted_fields_untouched() {
        let store = SessionStore::new();
        let session = store.create(channel(), "Pro Clubs", "Friday lineup").await.expect("create");

        let edited = store.edit(&session.id, None, None).await.expect("edit");

        assert_eq!(edited.title, "Pro Clubs");
        assert_eq!(edited.description, "Friday lineup");
    }

    #[tokio::test]
    async fn find_by_message_resolves_the_bound_card() {
        let store = SessionStore::new();
        let session = store.create(channel(), "Pro Clubs", "").await.expect("create");
        store.set_message(&session.id, MessageRef("M-9".to_owned())).await.expect("bind");

        let found = store.find_by_message(&MessageRef("M-9".to_owned())).await;
        assert_eq!(found.map(|session| session.id), Some(session.id));
        assert!(store.find_by_message(&MessageRef("M-404".to_owned())).await.is_none());
    }
}
