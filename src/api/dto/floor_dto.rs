//! Floor DTOs for status and checkout.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Release, TableId, WaitlistEntry};

/// Request body for `POST /api/checkout`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    /// Table to check out.
    #[serde(default)]
    pub table_id: Option<String>,
}

/// Response body for a successful `POST /api/checkout`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    /// Always `true`.
    pub success: bool,
    /// The checked-out table.
    pub table: TableId,
    /// Guest who was seated before checkout.
    pub cleared_guest: Option<String>,
    /// Waitlist entry seated in the freed table.
    pub assigned_guest: Option<WaitlistEntry>,
    /// Announcement for the promoted party.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
}

impl From<Release> for CheckoutResponse {
    fn from(release: Release) -> Self {
        Self {
            success: true,
            table: release.table_id,
            cleared_guest: release.cleared_guest,
            assigned_guest: release.promoted,
            announcement: release.announcement,
        }
    }
}

/// Response body for a failed `POST /api/checkout` (400).
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutFailure {
    /// Always `false`.
    pub success: bool,
    /// Why the checkout failed.
    pub message: String,
}

impl CheckoutFailure {
    /// Creates a failure body.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
