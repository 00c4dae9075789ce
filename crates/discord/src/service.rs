use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use rollcall_core::{
    present, reminder_targets, AccessPolicy, AvailabilitySummary, Caller, ChannelRef, DomainError,
    MessageRef, Session, SessionId, SessionStore, VoteValue,
};

use crate::api::{CallerContext, ChatApi, ChatApiError, FormSpec};
use crate::cards::{availability_card, panel_card, reminder_text};

/// Event-facing availability operations: authorize, mutate the injected
/// store, re-render the status card, and emit outbound effects through the
/// `ChatApi` capability.
///
/// Domain failures (`NotAuthorized`, `SessionNotFound`, `SessionClosed`) are
/// terminal for the triggering event: they produce a caller-only notice and
/// leave both the store and the visible card untouched. Platform failures
/// bubble up as `ChatApiError` with no retry.
pub struct AvailabilityService {
    store: Arc<SessionStore>,
    api: Arc<dyn ChatApi>,
    policy: AccessPolicy,
}

impl AvailabilityService {
    pub fn new(store: Arc<SessionStore>, api: Arc<dyn ChatApi>, policy: AccessPolicy) -> Self {
        Self { store, api, policy }
    }

    /// Posts the standing panel into the channel.
    pub async fn post_panel(
        &self,
        channel: &ChannelRef,
        context: &CallerContext,
    ) -> Result<(), ChatApiError> {
        self.api.post_card(channel, &panel_card()).await?;
        info!(event_name = "availability.panel_posted", channel = %channel.0, "panel posted");
        self.api.respond_privately(context, "✅ Panel sent.").await
    }

    /// Panel button click: authorized callers get the create form.
    pub async fn open_create_form(
        &self,
        caller: &Caller,
        context: &CallerContext,
    ) -> Result<(), ChatApiError> {
        if let Err(error) = self.policy.authorize(caller) {
            return self.reject(context, caller, &error).await;
        }
        self.api.open_form(context, FormSpec::CreateSession).await
    }

    /// Create-form submission: insert the session, post its card, bind the
    /// card reference, confirm privately.
    pub async fn create_session(
        &self,
        channel: &ChannelRef,
        title: &str,
        description: &str,
        caller: &Caller,
        context: &CallerContext,
    ) -> Result<(), ChatApiError> {
        if let Err(error) = self.policy.authorize(caller) {
            return self.reject(context, caller, &error).await;
        }

        let session = match self.store.create(channel.clone(), title, description).await {
            Ok(session) => session,
            Err(error) => return self.reject(context, caller, &error).await,
        };

        let summary = self.summarize(&session).await?;
        let message = self.api.post_card(channel, &availability_card(&session, &summary)).await?;

        if let Err(error) = self.store.set_message(&session.id, message).await {
            return self.reject(context, caller, &error).await;
        }

        info!(
            event_name = "availability.session_created",
            session_id = %session.id,
            channel = %channel.0,
            "availability session created"
        );
        self.api.respond_privately(context, "✅ Availability session created.").await
    }

    /// Vote button click. No authorization; re-voting overwrites. Success
    /// refreshes the card and sends no private confirmation.
    pub async fn vote(
        &self,
        session_id: &SessionId,
        caller: &Caller,
        value: VoteValue,
        context: &CallerContext,
    ) -> Result<(), ChatApiError> {
        let session =
            match self.store.record_vote(session_id, caller.id.clone(), value).await {
                Ok(session) => session,
                Err(error) => return self.reject(context, caller, &error).await,
            };

        info!(
            event_name = "availability.vote_recorded",
            session_id = %session.id,
            participant = %caller.id,
            vote = value.label(),
            "vote recorded"
        );
        self.refresh_card(&session).await
    }

    /// Reminder button click: broadcast one message mentioning everyone
    /// unset or unsure, or privately report that no reminder is needed.
    pub async fn send_reminder(
        &self,
        session_id: &SessionId,
        caller: &Caller,
        context: &CallerContext,
    ) -> Result<(), ChatApiError> {
        if let Err(error) = self.policy.authorize(caller) {
            return self.reject(context, caller, &error).await;
        }

        let Some(session) = self.store.get(session_id).await else {
            return self
                .reject(context, caller, &DomainError::SessionNotFound(session_id.clone()))
                .await;
        };

        let roster = self.api.channel_roster(&session.channel).await?;
        let targets = reminder_targets(&session, &roster);

        if targets.is_empty() {
            return self.api.respond_privately(context, "✅ Everyone already voted.").await;
        }

        let mut mentions = Vec::with_capacity(targets.len());
        for target in &targets {
            if let Some(display) =
                self.api.resolve_participant(&session.channel, target).await?
            {
                mentions.push(display);
            }
        }

        self.api.broadcast(&session.channel, &reminder_text(&mentions)).await?;
        info!(
            event_name = "availability.reminder_sent",
            session_id = %session.id,
            target_count = targets.len(),
            "reminder broadcast"
        );
        self.api.respond_privately(context, "🔔 Reminder sent.").await
    }

    /// Clears every vote while keeping the session metadata and card.
    pub async fn reset_votes(
        &self,
        session_id: &SessionId,
        caller: &Caller,
        context: &CallerContext,
    ) -> Result<(), ChatApiError> {
        if let Err(error) = self.policy.authorize(caller) {
            return self.reject(context, caller, &error).await;
        }

        let session = match self.store.reset(session_id).await {
            Ok(session) => session,
            Err(error) => return self.reject(context, caller, &error).await,
        };

        self.refresh_card(&session).await?;
        info!(event_name = "availability.votes_reset", session_id = %session.id, "votes reset");
        self.api.respond_privately(context, "🔄 Votes reset.").await
    }

    /// Irreversibly closes the session and locks its card.
    pub async fn close_session(
        &self,
        session_id: &SessionId,
        caller: &Caller,
        context: &CallerContext,
    ) -> Result<(), ChatApiError> {
        if let Err(error) = self.policy.authorize(caller) {
            return self.reject(context, caller, &error).await;
        }

        let session = match self.store.close(session_id).await {
            Ok(session) => session,
            Err(error) => return self.reject(context, caller, &error).await,
        };

        self.refresh_card(&session).await?;
        info!(event_name = "availability.session_closed", session_id = %session.id, "session closed");
        self.api.respond_privately(context, "🔒 Session closed.").await
    }

    /// Context-menu edit entry point: look the session up by its card and
    /// open the prefilled edit form.
    pub async fn open_edit_form_for_card(
        &self,
        message: &MessageRef,
        caller: &Caller,
        context: &CallerContext,
    ) -> Result<(), ChatApiError> {
        if let Err(error) = self.policy.authorize(caller) {
            return self.reject(context, caller, &error).await;
        }

        let Some(session) = self.store.find_by_message(message).await else {
            return self
                .api
                .respond_privately(context, "❌ This is not an availability message.")
                .await;
        };

        self.api
            .open_form(
                context,
                FormSpec::EditSession {
                    session_id: session.id,
                    title: session.title,
                    description: session.description,
                },
            )
            .await
    }

    /// Edit-form submission (explicit-identifier entry point): mutate
    /// title/description and update the existing card in place.
    pub async fn edit_session(
        &self,
        session_id: &SessionId,
        title: &str,
        description: &str,
        caller: &Caller,
        context: &CallerContext,
    ) -> Result<(), ChatApiError> {
        if let Err(error) = self.policy.authorize(caller) {
            return self.reject(context, caller, &error).await;
        }

        let session = match self
            .store
            .edit(session_id, Some(title.to_owned()), Some(description.to_owned()))
            .await
        {
            Ok(session) => session,
            Err(error) => return self.reject(context, caller, &error).await,
        };

        self.refresh_card(&session).await?;
        info!(event_name = "availability.session_edited", session_id = %session.id, "metadata edited");
        self.api.respond_privately(context, "✅ Availability updated.").await
    }

    /// Resolves every voter through the membership directory and buckets
    /// them. Voters who no longer resolve are dropped from display only.
    async fn summarize(&self, session: &Session) -> Result<AvailabilitySummary, ChatApiError> {
        let mut directory = HashMap::new();
        for participant in session.statuses.keys() {
            if let Some(display) =
                self.api.resolve_participant(&session.channel, participant).await?
            {
                directory.insert(participant.clone(), display);
            }
        }

        Ok(present(session, |participant| directory.get(participant).cloned()))
    }

    async fn refresh_card(&self, session: &Session) -> Result<(), ChatApiError> {
        let Some(message) = &session.message else {
            return Ok(());
        };
        let summary = self.summarize(session).await?;
        self.api.edit_card(message, &availability_card(session, &summary)).await
    }

    async fn reject(
        &self,
        context: &CallerContext,
        caller: &Caller,
        error: &DomainError,
    ) -> Result<(), ChatApiError> {
        warn!(
            event_name = "availability.request_rejected",
            participant = %caller.id,
            error = %error,
            "request rejected"
        );
        self.api.respond_privately(context, error.user_notice()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use rollcall_core::{
        AccessPolicy, Caller, ChannelRef, DisplayRef, MessageRef, ParticipantId, RosterEntry,
        SessionId, SessionStore, VoteValue, DEFAULT_DESCRIPTION,
    };

    use super::AvailabilityService;
    use crate::api::{CallerContext, ChatApi, ChatApiError, FormSpec};
    use crate::cards::CardMessage;

    #[derive(Default)]
    struct RecordingChatApi {
        state: Mutex<RecordedCalls>,
        roster: Vec<RosterEntry>,
    }

    #[derive(Default)]
    struct RecordedCalls {
        posted: Vec<(ChannelRef, CardMessage)>,
        edits: Vec<(MessageRef, CardMessage)>,
        broadcasts: Vec<(ChannelRef, String)>,
        private: Vec<String>,
        forms: Vec<FormSpec>,
    }

    impl RecordingChatApi {
        fn with_roster(roster: Vec<RosterEntry>) -> Self {
            Self { state: Mutex::default(), roster }
        }

        async fn private_responses(&self) -> Vec<String> {
            self.state.lock().await.private.clone()
        }

        async fn broadcasts(&self) -> Vec<String> {
            self.state.lock().await.broadcasts.iter().map(|(_, text)| text.clone()).collect()
        }

        async fn edits(&self) -> Vec<(MessageRef, CardMessage)> {
            self.state.lock().await.edits.clone()
        }

        async fn posted_count(&self) -> usize {
            self.state.lock().await.posted.len()
        }

        async fn forms(&self) -> Vec<FormSpec> {
            self.state.lock().await.forms.clone()
        }
    }

    #[async_trait]
    impl ChatApi for RecordingChatApi {
        async fn resolve_participant(
            &self,
            _channel: &ChannelRef,
            participant: &ParticipantId,
        ) -> Result<Option<DisplayRef>, ChatApiError> {
            Ok(Some(DisplayRef(format!("<@{participant}>"))))
        }

        async fn channel_roster(
            &self,
            _channel: &ChannelRef,
        ) -> Result<Vec<RosterEntry>, ChatApiError> {
            Ok(self.roster.clone())
        }

        async fn post_card(
            &self,
            channel: &ChannelRef,
            message: &CardMessage,
        ) -> Result<MessageRef, ChatApiError> {
            let mut state = self.state.lock().await;
            let reference = MessageRef(format!("card-{}", state.posted.len()));
            state.posted.push((channel.clone(), message.clone()));
            Ok(reference)
        }

        async fn edit_card(
            &self,
            message: &MessageRef,
            content: &CardMessage,
        ) -> Result<(), ChatApiError> {
            self.state.lock().await.edits.push((message.clone(), content.clone()));
            Ok(())
        }

        async fn broadcast(&self, channel: &ChannelRef, text: &str) -> Result<(), ChatApiError> {
            self.state.lock().await.broadcasts.push((channel.clone(), text.to_owned()));
            Ok(())
        }

        async fn respond_privately(
            &self,
            _context: &CallerContext,
            text: &str,
        ) -> Result<(), ChatApiError> {
            self.state.lock().await.private.push(text.to_owned());
            Ok(())
        }

        async fn open_form(
            &self,
            _context: &CallerContext,
            form: FormSpec,
        ) -> Result<(), ChatApiError> {
            self.state.lock().await.forms.push(form);
            Ok(())
        }
    }

    fn channel() -> ChannelRef {
        ChannelRef("C-1".to_owned())
    }

    fn context() -> CallerContext {
        CallerContext("interaction-1".to_owned())
    }

    fn service(api: Arc<RecordingChatApi>) -> (AvailabilityService, Arc<SessionStore>) {
        let store = Arc::new(SessionStore::new());
        let service = AvailabilityService::new(store.clone(), api, AccessPolicy::AdminOnly);
        (service, store)
    }

    async fn created_session_id(store: &SessionStore) -> SessionId {
        store
            .find_by_message(&MessageRef("card-0".to_owned()))
            .await
            .expect("session bound to first card")
            .id
    }

    #[tokio::test]
    async fn create_session_posts_card_binds_it_and_confirms_privately() {
        let api = Arc::new(RecordingChatApi::default());
        let (service, store) = service(api.clone());

        service
            .create_session(&channel(), "Pro Clubs", "", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");

        assert_eq!(api.posted_count().await, 1);
        let session = store.find_by_message(&MessageRef("card-0".to_owned())).await;
        let session = session.expect("card bound");
        assert_eq!(session.title, "Pro Clubs");
        assert_eq!(session.description, DEFAULT_DESCRIPTION);
        assert_eq!(
            api.private_responses().await,
            vec!["✅ Availability session created.".to_owned()]
        );
    }

    #[tokio::test]
    async fn unauthorized_create_mutates_nothing() {
        let api = Arc::new(RecordingChatApi::default());
        let (service, store) = service(api.clone());

        service
            .create_session(&channel(), "Pro Clubs", "", &Caller::member("U-1"), &context())
            .await
            .expect("handled");

        assert!(store.is_empty().await);
        assert_eq!(api.posted_count().await, 0);
        assert_eq!(api.private_responses().await, vec!["❌ You are not allowed to do that."]);
    }

    #[tokio::test]
    async fn voting_refreshes_the_card_in_place() {
        let api = Arc::new(RecordingChatApi::default());
        let (service, store) = service(api.clone());
        service
            .create_session(&channel(), "Pro Clubs", "", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");
        let session_id = created_session_id(&store).await;

        service
            .vote(&session_id, &Caller::member("U-A"), VoteValue::Available, &context())
            .await
            .expect("vote");

        let edits = api.edits().await;
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].0, MessageRef("card-0".to_owned()));
        assert_eq!(edits[0].1.card.fields[0].name, "✅ Accepted (1)");
        assert_eq!(edits[0].1.card.fields[0].value, "<@U-A>");
    }

    #[tokio::test]
    async fn revoting_moves_the_member_between_groups() {
        let api = Arc::new(RecordingChatApi::default());
        let (service, store) = service(api.clone());
        service
            .create_session(&channel(), "Pro Clubs", "", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");
        let session_id = created_session_id(&store).await;

        for (member, value) in [
            ("U-A", VoteValue::Available),
            ("U-B", VoteValue::Unsure),
            ("U-C", VoteValue::Unavailable),
            ("U-A", VoteValue::Unsure),
        ] {
            service
                .vote(&session_id, &Caller::member(member), value, &context())
                .await
                .expect("vote");
        }

        let edits = api.edits().await;
        let card = &edits.last().expect("card edits").1.card;
        assert_eq!(card.fields[0].name, "✅ Accepted (0)");
        assert_eq!(card.fields[1].name, "❔ Tentative (2)");
        assert_eq!(card.fields[1].value, "<@U-A>\n<@U-B>");
        assert_eq!(card.fields[2].value, "<@U-C>");
    }

    #[tokio::test]
    async fn voting_on_a_closed_session_is_rejected_privately() {
        let api = Arc::new(RecordingChatApi::default());
        let (service, store) = service(api.clone());
        service
            .create_session(&channel(), "Pro Clubs", "", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");
        let session_id = created_session_id(&store).await;
        service
            .close_session(&session_id, &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("close");
        let edits_after_close = api.edits().await.len();

        service
            .vote(&session_id, &Caller::member("U-A"), VoteValue::Available, &context())
            .await
            .expect("handled");

        assert_eq!(api.edits().await.len(), edits_after_close);
        assert!(api
            .private_responses()
            .await
            .contains(&"❌ This session is closed.".to_owned()));
        let session = store.get(&session_id).await.expect("session");
        assert!(session.statuses.is_empty());
    }

    #[tokio::test]
    async fn closing_locks_the_rendered_card() {
        let api = Arc::new(RecordingChatApi::default());
        let (service, store) = service(api.clone());
        service
            .create_session(&channel(), "Pro Clubs", "", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");
        let session_id = created_session_id(&store).await;

        service
            .close_session(&session_id, &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("close");

        let edits = api.edits().await;
        let message = &edits.last().expect("closing edit").1;
        assert!(message.card.title.ends_with("🔒 (Closed)"));
        assert!(message.rows.iter().flatten().all(|button| button.disabled));
        assert!(store.get(&session_id).await.expect("session").closed);
    }

    #[tokio::test]
    async fn reminder_targets_unset_and_unsure_members_only() {
        let api = Arc::new(RecordingChatApi::with_roster(vec![
            RosterEntry::member("U-A"),
            RosterEntry::member("U-B"),
            RosterEntry::member("U-C"),
            RosterEntry::bot("U-BOT"),
        ]));
        let (service, store) = service(api.clone());
        service
            .create_session(&channel(), "Pro Clubs", "", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");
        let session_id = created_session_id(&store).await;
        service
            .vote(&session_id, &Caller::member("U-A"), VoteValue::Available, &context())
            .await
            .expect("vote");
        service
            .vote(&session_id, &Caller::member("U-B"), VoteValue::Unsure, &context())
            .await
            .expect("vote");

        service
            .send_reminder(&session_id, &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("remind");

        let broadcasts = api.broadcasts().await;
        assert_eq!(broadcasts.len(), 1);
        assert!(broadcasts[0].contains("<@U-B>"));
        assert!(broadcasts[0].contains("<@U-C>"));
        assert!(!broadcasts[0].contains("<@U-A>"));
        assert!(!broadcasts[0].contains("U-BOT"));
        assert!(api.private_responses().await.contains(&"🔔 Reminder sent.".to_owned()));
    }

    #[tokio::test]
    async fn reminder_with_everyone_voted_sends_no_broadcast() {
        let api = Arc::new(RecordingChatApi::with_roster(vec![RosterEntry::member("U-A")]));
        let (service, store) = service(api.clone());
        service
            .create_session(&channel(), "Pro Clubs", "", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");
        let session_id = created_session_id(&store).await;
        service
            .vote(&session_id, &Caller::member("U-A"), VoteValue::Available, &context())
            .await
            .expect("vote");

        service
            .send_reminder(&session_id, &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("remind");

        assert!(api.broadcasts().await.is_empty());
        assert!(api
            .private_responses()
            .await
            .contains(&"✅ Everyone already voted.".to_owned()));
    }

    #[tokio::test]
    async fn unauthorized_reminder_neither_broadcasts_nor_mutates() {
        let api = Arc::new(RecordingChatApi::with_roster(vec![RosterEntry::member("U-A")]));
        let (service, store) = service(api.clone());
        service
            .create_session(&channel(), "Pro Clubs", "", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");
        let session_id = created_session_id(&store).await;
        let before = store.get(&session_id).await.expect("session");

        service
            .send_reminder(&session_id, &Caller::member("U-1"), &context())
            .await
            .expect("handled");

        assert!(api.broadcasts().await.is_empty());
        assert_eq!(store.get(&session_id).await.expect("session"), before);
        assert!(api
            .private_responses()
            .await
            .contains(&"❌ You are not allowed to do that.".to_owned()));
    }

    #[tokio::test]
    async fn reset_clears_votes_and_refreshes_the_card() {
        let api = Arc::new(RecordingChatApi::default());
        let (service, store) = service(api.clone());
        service
            .create_session(&channel(), "Pro Clubs", "Friday", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");
        let session_id = created_session_id(&store).await;
        service
            .vote(&session_id, &Caller::member("U-A"), VoteValue::Available, &context())
            .await
            .expect("vote");

        service
            .reset_votes(&session_id, &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("reset");

        let session = store.get(&session_id).await.expect("session");
        assert!(session.statuses.is_empty());
        assert_eq!(session.title, "Pro Clubs");
        assert_eq!(session.description, "Friday");
        let edits = api.edits().await;
        let card = &edits.last().expect("refresh edit").1.card;
        assert_eq!(card.fields[0].name, "✅ Accepted (0)");
    }

    #[tokio::test]
    async fn edit_by_unknown_card_reports_not_an_availability_message() {
        let api = Arc::new(RecordingChatApi::default());
        let (service, _store) = service(api.clone());

        service
            .open_edit_form_for_card(
                &MessageRef("card-404".to_owned()),
                &Caller::admin("U-ADMIN"),
                &context(),
            )
            .await
            .expect("handled");

        assert!(api.forms().await.is_empty());
        assert_eq!(
            api.private_responses().await,
            vec!["❌ This is not an availability message.".to_owned()]
        );
    }

    #[tokio::test]
    async fn edit_by_card_opens_a_prefilled_form() {
        let api = Arc::new(RecordingChatApi::default());
        let (service, store) = service(api.clone());
        service
            .create_session(&channel(), "Pro Clubs", "Friday", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");
        let session_id = created_session_id(&store).await;

        service
            .open_edit_form_for_card(
                &MessageRef("card-0".to_owned()),
                &Caller::admin("U-ADMIN"),
                &context(),
            )
            .await
            .expect("open form");

        assert_eq!(
            api.forms().await,
            vec![FormSpec::EditSession {
                session_id,
                title: "Pro Clubs".to_owned(),
                description: "Friday".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn edit_with_empty_description_restores_the_placeholder() {
        let api = Arc::new(RecordingChatApi::default());
        let (service, store) = service(api.clone());
        service
            .create_session(&channel(), "Pro Clubs", "Friday", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");
        let session_id = created_session_id(&store).await;

        service
            .edit_session(&session_id, "Pro Clubs II", "", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("edit");

        let session = store.get(&session_id).await.expect("session");
        assert_eq!(session.title, "Pro Clubs II");
        assert_eq!(session.description, DEFAULT_DESCRIPTION);
        let edits = api.edits().await;
        let card = &edits.last().expect("refresh edit").1.card;
        assert_eq!(card.title, "Pro Clubs II");
        assert!(api.private_responses().await.contains(&"✅ Availability updated.".to_owned()));
    }

    #[tokio::test]
    async fn unauthorized_edit_changes_nothing() {
        let api = Arc::new(RecordingChatApi::default());
        let (service, store) = service(api.clone());
        service
            .create_session(&channel(), "Pro Clubs", "Friday", &Caller::admin("U-ADMIN"), &context())
            .await
            .expect("create");
        let session_id = created_session_id(&store).await;
        let edits_before = api.edits().await.len();

        service
            .edit_session(&session_id, "Hijacked", "", &Caller::member("U-1"), &context())
            .await
            .expect("handled");

        let session = store.get(&session_id).await.expect("session");
        assert_eq!(session.title, "Pro Clubs");
        assert_eq!(session.description, "Friday");
        assert_eq!(api.edits().await.len(), edits_before);
    }

    #[tokio::test]
    async fn role_holders_pass_the_role_policy() {
        let api = Arc::new(RecordingChatApi::default());
        let store = Arc::new(SessionStore::new());
        let service = AvailabilityService::new(
            store.clone(),
            api.clone(),
            AccessPolicy::AdminOrRole { role: "Coordinator".to_owned() },
        );

        service
            .create_session(
                &channel(),
                "Pro Clubs",
                "",
                &Caller::member("U-1").with_role("Coordinator"),
                &context(),
            )
            .await
            .expect("create");

        assert_eq!(store.len().await, 1);
    }
}
