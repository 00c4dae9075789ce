use crate::errors::DomainError;
use crate::session::ParticipantId;

/// Who may create sessions, send reminders, reset votes, close sessions,
/// and edit metadata. Voting itself is never gated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Caller must hold the administrator capability on the group.
    AdminOnly,
    /// Administrator capability, or possession of the named role tag.
    AdminOrRole { role: String },
}

/// Identity and capability flags for the member behind an incoming event,
/// supplied per event by the platform collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub id: ParticipantId,
    pub is_admin: bool,
    pub roles: Vec<String>,
}

impl Caller {
    pub fn member(id: impl Into<String>) -> Self {
        Self { id: ParticipantId(id.into()), is_admin: false, roles: Vec::new() }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self { id: ParticipantId(id.into()), is_admin: true, roles: Vec::new() }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }
}

impl AccessPolicy {
    pub fn authorize(&self, caller: &Caller) -> Result<(), DomainError> {
        let permitted = match self {
            Self::AdminOnly => caller.is_admin,
            Self::AdminOrRole { role } => {
                caller.is_admin || caller.roles.iter().any(|held| held == role)
            }
        };

        if permitted {
            Ok(())
        } else {
            Err(DomainError::NotAuthorized)
        }
    }
}
