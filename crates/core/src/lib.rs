//! Rollcall domain core.
//!
//! Everything the bot knows about availability sessions lives here: the
//! session entity and its vote map, the injected in-memory store, the pure
//! presenter that turns a session into a three-bucket summary, the
//! authorization policy, and reminder-target computation. No chat-platform
//! types appear in this crate; participant resolution and message delivery
//! are capabilities supplied by the caller.

pub mod config;
pub mod errors;
pub mod policy;
pub mod presenter;
pub mod reminder;
pub mod session;
pub mod store;

pub use errors::{ApplicationError, DomainError};
pub use policy::{AccessPolicy, Caller};
pub use presenter::{present, AvailabilitySummary, GroupCounts, EMPTY_GROUP_PLACEHOLDER};
pub use reminder::{reminder_targets, RosterEntry};
pub use session::{
    ChannelRef, DisplayRef, MessageRef, ParticipantId, Session, SessionId, VoteValue,
    DEFAULT_DESCRIPTION,
};
pub use store::SessionStore;
