use thiserror::Error;

use crate::session::SessionId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("caller lacks the required capability for this action")]
    NotAuthorized,
    #[error("no session found for `{0}`")]
    SessionNotFound(SessionId),
    #[error("session `{0}` is closed")]
    SessionClosed(SessionId),
    #[error("session `{0}` already has a status card bound")]
    MessageAlreadyBound(SessionId),
    #[error("session id collision on `{0}`")]
    IdCollision(SessionId),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("chat platform call failed: {0}")]
    Collaborator(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl DomainError {
    /// Caller-only rejection text. Every domain failure is reported
    /// privately and leaves both the store and the visible card untouched.
    pub fn user_notice(&self) -> &'static str {
        match self {
            Self::NotAuthorized => "❌ You are not allowed to do that.",
            Self::SessionNotFound(_) => "❌ Unknown availability session.",
            Self::SessionClosed(_) => "❌ This session is closed.",
            Self::MessageAlreadyBound(_) | Self::IdCollision(_) => {
                "❌ Something went wrong setting up this session."
            }
        }
    }
}
