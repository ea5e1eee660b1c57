//! Physical tables and their occupancy state.
//!
//! A [`Table`] keeps its status and occupant private and only changes them
//! together through [`Table::seat`] and [`Table::release`], so a table has
//! an occupant exactly when it is [`TableStatus::Occupied`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of a table, e.g. `"T2-1"` or `"BAR-3"`.
///
/// Stable for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TableId(String);

impl TableId {
    /// Creates a table ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the `{prefix}-{index}` ID used by the seed inventory.
    #[must_use]
    pub fn numbered(prefix: &str, index: usize) -> Self {
        Self(format!("{prefix}-{index}"))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Occupancy state of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    /// Nobody is seated.
    Free,
    /// A guest (party) is seated.
    Occupied,
}

/// A seating unit with fixed capacity and binary occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Table {
    /// Unique table identifier.
    pub id: TableId,
    /// Seat capacity (always positive).
    pub seats: u32,
    /// Category tag such as `"bar"` or `"standard"`. Informational only.
    #[serde(rename = "type")]
    pub kind: String,
    status: TableStatus,
    #[serde(rename = "guest_name")]
    occupant: Option<String>,
}

impl Table {
    /// Creates a free table.
    #[must_use]
    pub fn new(id: TableId, seats: u32, kind: impl Into<String>) -> Self {
        Self {
            id,
            seats,
            kind: kind.into(),
            status: TableStatus::Free,
            occupant: None,
        }
    }

    /// Current occupancy state.
    #[must_use]
    pub const fn status(&self) -> TableStatus {
        self.status
    }

    /// Name of the seated guest, if any.
    #[must_use]
    pub fn occupant(&self) -> Option<&str> {
        self.occupant.as_deref()
    }

    /// Returns `true` if nobody is seated.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.status == TableStatus::Free
    }

    /// Seats `guest_name`, replacing any previous occupant.
    pub fn seat(&mut self, guest_name: impl Into<String>) {
        self.status = TableStatus::Occupied;
        self.occupant = Some(guest_name.into());
    }

    /// Frees the table and returns whoever was seated.
    pub fn release(&mut self) -> Option<String> {
        self.status = TableStatus::Free;
        self.occupant.take()
    }
}
