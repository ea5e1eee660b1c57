//! Floor service: serializes access to the engine and emits updates.

use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{
    BoardUpdate, CheckoutResult, EntryId, EventBus, Floor, FloorEvent, FloorStatus, PartySize,
    Table, TableId,
};
use crate::error::ConciergeError;

/// Result of [`FloorService::seat_party`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seating {
    /// The party was seated.
    Seated {
        /// Assigned table.
        table_id: TableId,
        /// The assignment event.
        event: FloorEvent,
    },
    /// No free table is large enough.
    NoCapacity,
}

/// Result of [`FloorService::add_to_waitlist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waitlisting {
    /// New entry identifier.
    pub entry_id: EntryId,
    /// 1-based position.
    pub position: usize,
    /// Estimated wait in minutes at the time of joining.
    pub eta_minutes: u32,
    /// The waitlist event.
    pub event: FloorEvent,
}

/// Shared handle to the allocation engine.
///
/// Holds the single [`Floor`] behind one mutex. Each method runs a whole
/// engine sequence (including check-then-assign) and drains the engine's
/// event slot inside one critical section, then returns the event to the
/// caller. Concurrent callers therefore never see each other's events and
/// never assign the same free table twice.
#[derive(Debug)]
pub struct FloorService {
    floor: Mutex<Floor>,
    event_bus: EventBus,
}

impl FloorService {
    /// Creates a new `FloorService` owning `floor`.
    #[must_use]
    pub fn new(floor: Floor, event_bus: EventBus) -> Self {
        Self {
            floor: Mutex::new(floor),
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a copy of the first free table that seats the party.
    pub async fn check_availability(&self, party_size: PartySize) -> Option<Table> {
        let floor = self.floor.lock().await;
        floor.check_availability(party_size).cloned()
    }

    /// Finds a free table and seats the party in one step.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError::Internal`] if the engine loses the table
    /// between lookup and assignment, which the lock rules out.
    pub async fn seat_party(
        &self,
        guest_name: &str,
        party_size: PartySize,
    ) -> Result<Seating, ConciergeError> {
        let mut floor = self.floor.lock().await;
        let Some(table_id) = floor.check_availability(party_size).map(|t| t.id.clone()) else {
            tracing::debug!(guest = guest_name, party = %party_size, "no table available");
            return Ok(Seating::NoCapacity);
        };
        let table_id = floor.assign_table(&table_id, guest_name)?;
        let event = floor
            .consume_event()
            .ok_or_else(|| ConciergeError::Internal("assignment recorded no event".to_string()))?;
        drop(floor);

        self.event_bus.publish(BoardUpdate::from(&event));
        tracing::info!(%table_id, guest = guest_name, party = %party_size, "party seated");
        Ok(Seating::Seated { table_id, event })
    }

    /// Adds a party to the waitlist.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError::Internal`] if the engine records no
    /// waitlist event.
    pub async fn add_to_waitlist(
        &self,
        name: &str,
        party_size: PartySize,
    ) -> Result<Waitlisting, ConciergeError> {
        let mut floor = self.floor.lock().await;
        let position = floor.add_to_waitlist(name, party_size);
        let event = floor.consume_event();
        let Some(event @ FloorEvent::Waitlisted { entry_id, .. }) = event else {
            return Err(ConciergeError::Internal(
                "waitlist add recorded no waitlist event".to_string(),
            ));
        };
        let eta_minutes = floor.eta_for(entry_id).unwrap_or_default();
        drop(floor);

        self.event_bus.publish(BoardUpdate::from(&event));
        tracing::info!(%entry_id, guest = name, party = %party_size, position, eta_minutes, "party waitlisted");
        Ok(Waitlisting {
            entry_id,
            position,
            eta_minutes,
            event,
        })
    }

    /// Checks out a table and promotes the first waiting party that fits.
    ///
    /// Returns the engine's result together with the promotion event, if
    /// any.
    pub async fn checkout(&self, table_id: &TableId) -> (CheckoutResult, Option<FloorEvent>) {
        let mut floor = self.floor.lock().await;
        let result = floor.checkout_and_fill_waitlist(table_id);
        let event = floor.consume_event();
        drop(floor);

        match &result {
            CheckoutResult::Released(release) => {
                self.event_bus.publish(BoardUpdate::TableReleased {
                    table_id: release.table_id.clone(),
                    cleared_guest: release.cleared_guest.clone(),
                    timestamp: Utc::now(),
                });
                if let Some(event) = &event {
                    self.event_bus.publish(BoardUpdate::from(event));
                }
                tracing::info!(
                    %table_id,
                    cleared = release.cleared_guest.as_deref().unwrap_or(""),
                    promoted = release.promoted.as_ref().map_or("", |e| e.name.as_str()),
                    "table checked out"
                );
            }
            CheckoutResult::NotFound(_) => {
                tracing::warn!(%table_id, "checkout of unknown table");
            }
        }
        (result, event)
    }

    /// Returns a snapshot of all tables and the waitlist.
    pub async fn status(&self) -> FloorStatus {
        self.floor.lock().await.get_status()
    }

    /// Looks up one table by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError::TableNotFound`] if no table has this ID.
    pub async fn table(&self, table_id: &TableId) -> Result<Table, ConciergeError> {
        let floor = self.floor.lock().await;
        floor
            .table(table_id)
            .cloned()
            .ok_or_else(|| ConciergeError::TableNotFound(table_id.to_string()))
    }

    /// Current ETA of a waiting entry, `None` once it has been seated.
    pub async fn eta_for(&self, entry_id: EntryId) -> Option<u32> {
        self.floor.lock().await.eta_for(entry_id)
    }
}
