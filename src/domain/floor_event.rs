//! Events produced by state-changing floor operations.
//!
//! [`FloorEvent`] is the one-shot record of the most recent mutation, used
//! to enrich chat replies. [`BoardUpdate`] is what the [`super::EventBus`]
//! broadcasts to WebSocket subscribers; it also covers table releases,
//! which do not produce a [`FloorEvent`] on their own.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{EntryId, TableId};

/// Notification of the most recent state-changing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum FloorEvent {
    /// A guest was seated at a table.
    #[serde(rename = "table_assigned")]
    TableAssigned {
        /// Table the guest was seated at.
        #[serde(rename = "table")]
        table_id: TableId,
        /// Seated guest.
        #[serde(rename = "name")]
        guest_name: String,
        /// Seat count for direct assignments, waiting party size for
        /// waitlist promotions.
        party_size: u32,
    },

    /// A party joined the waitlist.
    #[serde(rename = "waitlist")]
    Waitlisted {
        /// New entry identifier.
        entry_id: EntryId,
        /// Guest name.
        name: String,
        /// Number of guests.
        party_size: u32,
        /// 1-based position at the time of joining.
        position: usize,
    },
}

impl FloorEvent {
    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::TableAssigned { .. } => "table_assigned",
            Self::Waitlisted { .. } => "waitlist",
        }
    }
}

/// Kind of board update, used for WebSocket subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardUpdateKind {
    /// See [`BoardUpdate::TableAssigned`].
    TableAssigned,
    /// See [`BoardUpdate::Waitlisted`].
    Waitlisted,
    /// See [`BoardUpdate::TableReleased`].
    TableReleased,
}

impl BoardUpdateKind {
    /// Parses a subscription kind string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "table_assigned" => Some(Self::TableAssigned),
            "waitlisted" => Some(Self::Waitlisted),
            "table_released" => Some(Self::TableReleased),
            _ => None,
        }
    }

    /// Returns the wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TableAssigned => "table_assigned",
            Self::Waitlisted => "waitlisted",
            Self::TableReleased => "table_released",
        }
    }
}

/// Live update broadcast to dashboard clients after every mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardUpdate {
    /// A guest was seated, directly or from the waitlist.
    TableAssigned {
        /// Table identifier.
        table_id: TableId,
        /// Seated guest.
        guest_name: String,
        /// Party size as recorded in the floor event.
        party_size: u32,
        /// When the update happened.
        timestamp: DateTime<Utc>,
    },

    /// A party joined the waitlist.
    Waitlisted {
        /// Entry identifier.
        entry_id: EntryId,
        /// Guest name.
        name: String,
        /// Number of guests.
        party_size: u32,
        /// 1-based position.
        position: usize,
        /// When the update happened.
        timestamp: DateTime<Utc>,
    },

    /// A table was checked out.
    TableReleased {
        /// Table identifier.
        table_id: TableId,
        /// Guest who left, if the table was occupied.
        cleared_guest: Option<String>,
        /// When the update happened.
        timestamp: DateTime<Utc>,
    },
}

impl BoardUpdate {
    /// Returns the subscription kind of this update.
    #[must_use]
    pub const fn kind(&self) -> BoardUpdateKind {
        match self {
            Self::TableAssigned { .. } => BoardUpdateKind::TableAssigned,
            Self::Waitlisted { .. } => BoardUpdateKind::Waitlisted,
            Self::TableReleased { .. } => BoardUpdateKind::TableReleased,
        }
    }
}

impl From<&FloorEvent> for BoardUpdate {
    fn from(event: &FloorEvent) -> Self {
        let timestamp = Utc::now();
        match event {
            FloorEvent::TableAssigned {
                table_id,
                guest_name,
                party_size,
            } => Self::TableAssigned {
                table_id: table_id.clone(),
                guest_name: guest_name.clone(),
                party_size: *party_size,
                timestamp,
            },
            FloorEvent::Waitlisted {
                entry_id,
                name,
                party_size,
                position,
            } => Self::Waitlisted {
                entry_id: *entry_id,
                name: name.clone(),
                party_size: *party_size,
                position: *position,
                timestamp,
            },
        }
    }
}
