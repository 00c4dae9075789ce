use crate::session::{DisplayRef, ParticipantId, Session, VoteValue};

/// Rendered in place of an empty voter group.
pub const EMPTY_GROUP_PLACEHOLDER: &str = "—";

/// Three named groups of resolved participant references plus their counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailabilitySummary {
    pub accepted: Vec<DisplayRef>,
    pub tentative: Vec<DisplayRef>,
    pub declined: Vec<DisplayRef>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupCounts {
    pub accepted: usize,
    pub tentative: usize,
    pub declined: usize,
}

impl AvailabilitySummary {
    pub fn counts(&self) -> GroupCounts {
        GroupCounts {
            accepted: self.accepted.len(),
            tentative: self.tentative.len(),
            declined: self.declined.len(),
        }
    }
}

/// Buckets the session's votes by value, resolving each voter through the
/// supplied membership-directory capability. Voters the resolver no longer
/// knows (members who left) are dropped from display only; their stored
/// votes are untouched. Deterministic for a given session and resolver.
pub fn present<R>(session: &Session, resolve: R) -> AvailabilitySummary
where
    R: Fn(&ParticipantId) -> Option<DisplayRef>,
{
    let mut summary = AvailabilitySummary::default();

    for (participant, vote) in &session.statuses {
        let Some(display) = resolve(participant) else {
            continue;
        };

        match vote {
            VoteValue::Available => summary.accepted.push(display),
            VoteValue::Unsure => summary.tentative.push(display),
            VoteValue::Unavailable => summary.declined.push(display),
        }
    }

    summary
}
