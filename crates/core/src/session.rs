use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Description shown on a card when the creator left the field empty.
/// Editing a session back to an empty description restores this value.
pub const DEFAULT_DESCRIPTION: &str = "Vote if you will attend";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Random high-entropy id. The original scheme derived ids from
    /// wall-clock seconds, which collides when two sessions are created
    /// within the same second.
    pub fn generate() -> Self {
        Self(format!("session-{}", Uuid::new_v4()))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to the channel a session was posted in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelRef(pub String);

/// Opaque reference to a posted status card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef(pub String);

/// Platform identity of a channel member.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub String);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Displayable handle for a participant (a mention string on Discord).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRef(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteValue {
    Available,
    Unsure,
    Unavailable,
}

impl VoteValue {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unsure => "unsure",
            Self::Unavailable => "unavailable",
        }
    }
}

impl std::str::FromStr for VoteValue {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "unsure" => Ok(Self::Unsure),
            "unavailable" => Ok(Self::Unavailable),
            other => Err(format!("unknown vote value `{other}`")),
        }
    }
}

/// One availability poll tied to one posted status card.
///
/// `statuses` holds at most one vote per participant; re-voting overwrites.
/// A `BTreeMap` keeps presentation order deterministic across renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub channel: ChannelRef,
    pub title: String,
    pub description: String,
    pub statuses: BTreeMap<ParticipantId, VoteValue>,
    pub message: Option<MessageRef>,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(channel: ChannelRef, title: impl Into<String>, description: &str) -> Self {
        Self {
            id: SessionId::generate(),
            channel,
            title: title.into(),
            description: normalize_description(description),
            statuses: BTreeMap::new(),
            message: None,
            closed: false,
            created_at: Utc::now(),
        }
    }

    pub fn vote_of(&self, participant: &ParticipantId) -> Option<VoteValue> {
        self.statuses.get(participant).copied()
    }
}

/// Empty or whitespace-only descriptions fall back to the fixed placeholder.
pub fn normalize_description(description: &str) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        DEFAULT_DESCRIPTION.to_owned()
    } else {
        trimmed.to_owned()
    }
}
