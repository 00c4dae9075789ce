use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use thiserror::Error;

use rollcall_core::{ChannelRef, DisplayRef, MessageRef, ParticipantId, RosterEntry, SessionId};

use crate::cards::CardMessage;

/// Opaque handle for answering the member behind one incoming interaction.
/// Private responses and form opens are only visible to that member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerContext(pub String);

/// A form the platform should render for the caller. Submissions come back
/// as `FormSubmit` events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormSpec {
    CreateSession,
    EditSession { session_id: SessionId, title: String, description: String },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ChatApiError {
    #[error("chat platform call failed: {0}")]
    Request(String),
}

/// Capability surface of the excluded chat-platform collaborator. Every
/// call is a fallible remote request with no retry; a failure propagates to
/// the triggering event and nothing else is attempted.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Membership-directory lookup; `None` when the member left the group.
    async fn resolve_participant(
        &self,
        channel: &ChannelRef,
        participant: &ParticipantId,
    ) -> Result<Option<DisplayRef>, ChatApiError>;

    /// Full channel roster including bot flags.
    async fn channel_roster(&self, channel: &ChannelRef) -> Result<Vec<RosterEntry>, ChatApiError>;

    async fn post_card(
        &self,
        channel: &ChannelRef,
        message: &CardMessage,
    ) -> Result<MessageRef, ChatApiError>;

    async fn edit_card(
        &self,
        message: &MessageRef,
        content: &CardMessage,
    ) -> Result<(), ChatApiError>;

    async fn broadcast(&self, channel: &ChannelRef, text: &str) -> Result<(), ChatApiError>;

    async fn respond_privately(
        &self,
        context: &CallerContext,
        text: &str,
    ) -> Result<(), ChatApiError>;

    async fn open_form(&self, context: &CallerContext, form: FormSpec)
        -> Result<(), ChatApiError>;
}

/// Offline implementation: resolves every participant to a plain mention,
/// reports an empty roster, and swallows outbound messages while keeping
/// posted-card references unique.
#[derive(Default)]
pub struct NoopChatApi {
    next_message: AtomicU64,
}

#[async_trait]
impl ChatApi for NoopChatApi {
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
        Ok(Vec::new())
    }

    async fn post_card(
        &self,
        _channel: &ChannelRef,
        _message: &CardMessage,
    ) -> Result<MessageRef, ChatApiError> {
        let serial = self.next_message.fetch_add(1, Ordering::Relaxed);
        Ok(MessageRef(format!("noop-message-{serial}")))
    }

    async fn edit_card(
        &self,
        _message: &MessageRef,
        _content: &CardMessage,
    ) -> Result<(), ChatApiError> {
        Ok(())
    }

    async fn broadcast(&self, _channel: &ChannelRef, _text: &str) -> Result<(), ChatApiError> {
        Ok(())
    }

    async fn respond_privately(
        &self,
        _context: &CallerContext,
        _text: &str,
    ) -> Result<(), ChatApiError> {
        Ok(())
    }

    async fn open_form(
        &self,
        _context: &CallerContext,
        _form: FormSpec,
    ) -> Result<(), ChatApiError> {
        Ok(())
    }
}
