use std::collections::HashSet;

use crate::session::{ParticipantId, Session, VoteValue};

/// One channel member as reported by the platform roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: ParticipantId,
    pub is_bot: bool,
}

impl RosterEntry {
    pub fn member(id: impl Into<String>) -> Self {
        Self { id: ParticipantId(id.into()), is_bot: false }
    }

    pub fn bot(id: impl Into<String>) -> Self {
        Self { id: ParticipantId(id.into()), is_bot: true }
    }
}

/// Everyone who still needs nudging: members with no vote at all plus
/// members currently on `unsure`, deduplicated, in roster order. Bots are
/// never reminded.
pub fn reminder_targets(session: &Session, roster: &[RosterEntry]) -> Vec<ParticipantId> {
    let mut seen = HashSet::new();
    roster
        .iter()
        .filter(|entry| !entry.is_bot)
        .filter(|entry| matches!(session.vote_of(&entry.id), None | Some(VoteValue::Unsure)))
        .filter(|entry| seen.insert(entry.id.clone()))
        .map(|entry| entry.id.clone())
        .collect()
}
