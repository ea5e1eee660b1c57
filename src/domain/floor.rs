//! The table and waitlist allocation engine.
//!
//! [`Floor`] exclusively owns the table inventory and the waitlist. It is
//! plain synchronous data with no locking of its own; callers that share it
//! across tasks go through [`crate::service::FloorService`], which keeps
//! check-then-assign sequences inside one critical section.
//!
//! Every mutating operation records a [`FloorEvent`] in a single-slot
//! mailbox. A later mutation overwrites an unread event, and
//! [`Floor::consume_event`] clears it.

use std::collections::HashSet;

use serde::Serialize;
use utoipa::ToSchema;

use super::{EntryId, FloorEvent, PartySize, Table, TableId, Waitlist, WaitlistEntry};
use crate::error::ConciergeError;

/// Seed inventory: `(id prefix, table count, seats, kind)`.
const DEFAULT_INVENTORY: [(&str, usize, u32, &str); 4] = [
    ("BAR", 5, 1, "bar"),
    ("T2", 5, 2, "standard"),
    ("T4", 5, 4, "standard"),
    ("T6", 2, 6, "standard"),
];

/// Default average time for a table to turn over.
pub const DEFAULT_TURNOVER_MINUTES: u32 = 15;

/// Waitlist ETA policy: `position × turnover_minutes`.
///
/// Assumes one table of the right size frees up every
/// `turnover_minutes`, independent of party size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtaPolicy {
    turnover_minutes: u32,
}

impl EtaPolicy {
    /// Creates a policy with the given average turnover.
    #[must_use]
    pub const fn new(turnover_minutes: u32) -> Self {
        Self { turnover_minutes }
    }

    /// Estimated wait in minutes for the party at 1-based `position`.
    #[must_use]
    pub fn eta_minutes(&self, position: usize) -> u32 {
        u32::try_from(position)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.turnover_minutes)
    }
}

impl Default for EtaPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TURNOVER_MINUTES)
    }
}

/// A waitlist row in a [`FloorStatus`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WaitlistRow {
    /// Entry identifier.
    pub id: EntryId,
    /// Guest name.
    pub name: String,
    /// Number of guests.
    pub party_size: PartySize,
    /// 1-based position.
    pub position: usize,
    /// Estimated wait in minutes.
    pub eta_minutes: u32,
}

/// Read-only snapshot of the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FloorStatus {
    /// All tables in inventory order.
    pub tables: Vec<Table>,
    /// Waiting parties in arrival order.
    pub waitlist: Vec<WaitlistRow>,
}

/// Successful checkout of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// The checked-out table.
    pub table_id: TableId,
    /// Who was seated before checkout, if anyone.
    pub cleared_guest: Option<String>,
    /// Waitlist entry promoted into the table, if any.
    pub promoted: Option<WaitlistEntry>,
    /// Guest-facing announcement for the promoted party.
    pub announcement: Option<String>,
}

/// Outcome of [`Floor::checkout_and_fill_waitlist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutResult {
    /// The table was freed and possibly refilled from the waitlist.
    Released(Release),
    /// No table has this ID. Nothing changed.
    NotFound(TableId),
}

impl CheckoutResult {
    /// Returns `true` for [`CheckoutResult::Released`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Released(_))
    }
}

/// The allocation engine: table inventory, waitlist, and event slot.
#[derive(Debug, Clone)]
pub struct Floor {
    tables: Vec<Table>,
    waitlist: Waitlist,
    eta: EtaPolicy,
    last_event: Option<FloorEvent>,
}

impl Floor {
    /// Creates a floor with the default seed inventory.
    #[must_use]
    pub fn new(eta: EtaPolicy) -> Self {
        Self {
            tables: Self::default_inventory(),
            waitlist: Waitlist::new(),
            eta,
            last_event: None,
        }
    }

    /// Creates a floor with the given tables. An empty list falls back to
    /// the default seed inventory.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError::InvalidRequest`] if two tables share an ID
    /// or a table has no seats.
    pub fn with_tables(tables: Vec<Table>, eta: EtaPolicy) -> Result<Self, ConciergeError> {
        if tables.is_empty() {
            return Ok(Self::new(eta));
        }
        let mut seen = HashSet::with_capacity(tables.len());
        for table in &tables {
            if table.seats == 0 {
                return Err(ConciergeError::InvalidRequest(format!(
                    "table {} has no seats",
                    table.id
                )));
            }
            if !seen.insert(&table.id) {
                return Err(ConciergeError::InvalidRequest(format!(
                    "duplicate table id {}",
                    table.id
                )));
            }
        }
        Ok(Self {
            tables,
            waitlist: Waitlist::new(),
            eta,
            last_event: None,
        })
    }

    /// Builds the seed inventory: 5 bar seats, 5 two-tops, 5 four-tops
    /// and 2 six-tops, IDs numbered from 1 within each prefix.
    #[must_use]
    pub fn default_inventory() -> Vec<Table> {
        DEFAULT_INVENTORY
            .iter()
            .flat_map(|&(prefix, count, seats, kind)| {
                (1..=count).map(move |i| Table::new(TableId::numbered(prefix, i), seats, kind))
            })
            .collect()
    }

    /// All tables in inventory order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// The current waitlist.
    #[must_use]
    pub fn waitlist(&self) -> &Waitlist {
        &self.waitlist
    }

    /// Looks up a table by ID.
    #[must_use]
    pub fn table(&self, table_id: &TableId) -> Option<&Table> {
        self.tables.iter().find(|t| &t.id == table_id)
    }

    fn table_mut(&mut self, table_id: &TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| &t.id == table_id)
    }

    /// Returns the first free table, in inventory order, that seats the
    /// party. `None` means no capacity right now.
    #[must_use]
    pub fn check_availability(&self, party_size: PartySize) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.is_free() && party_size.fits(t.seats))
    }

    /// Seats `guest_name` at the table and records a
    /// [`FloorEvent::TableAssigned`] whose `party_size` is the table's seat
    /// count.
    ///
    /// Does not re-check that the table is still free; pair it with
    /// [`Floor::check_availability`] under the same lock.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError::TableNotFound`] if no table has this ID.
    pub fn assign_table(
        &mut self,
        table_id: &TableId,
        guest_name: &str,
    ) -> Result<TableId, ConciergeError> {
        let table = self
            .table_mut(table_id)
            .ok_or_else(|| ConciergeError::TableNotFound(table_id.to_string()))?;
        table.seat(guest_name);
        let event = FloorEvent::TableAssigned {
            table_id: table.id.clone(),
            guest_name: guest_name.to_string(),
            party_size: table.seats,
        };
        let id = table.id.clone();
        self.record_event(event);
        Ok(id)
    }

    /// Appends a party to the waitlist and returns its 1-based position.
    pub fn add_to_waitlist(&mut self, name: &str, party_size: PartySize) -> usize {
        let entry = WaitlistEntry::new(name, party_size);
        let entry_id = entry.id;
        let position = self.waitlist.push(entry);
        self.record_event(FloorEvent::Waitlisted {
            entry_id,
            name: name.to_string(),
            party_size: party_size.get(),
            position,
        });
        position
    }

    /// Returns a snapshot of every table and the waitlist with ETAs.
    #[must_use]
    pub fn get_status(&self) -> FloorStatus {
        let waitlist = self
            .waitlist
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let position = idx + 1;
                WaitlistRow {
                    id: entry.id,
                    name: entry.name.clone(),
                    party_size: entry.party_size,
                    position,
                    eta_minutes: self.eta.eta_minutes(position),
                }
            })
            .collect();
        FloorStatus {
            tables: self.tables.clone(),
            waitlist,
        }
    }

    /// Estimated wait for a waiting entry, or `None` if it is no longer
    /// on the waitlist.
    #[must_use]
    pub fn eta_for(&self, entry_id: EntryId) -> Option<u32> {
        self.waitlist
            .position_of(entry_id)
            .map(|position| self.eta.eta_minutes(position))
    }

    /// Frees a table and seats the first waiting party that fits.
    ///
    /// The waitlist is scanned in arrival order, skipping parties larger
    /// than the table. A promotion records a [`FloorEvent::TableAssigned`]
    /// for the promoted guest. An unknown table changes nothing and records
    /// no event.
    pub fn checkout_and_fill_waitlist(&mut self, table_id: &TableId) -> CheckoutResult {
        let Some(table) = self.tables.iter_mut().find(|t| &t.id == table_id) else {
            return CheckoutResult::NotFound(table_id.clone());
        };

        let cleared_guest = table.release();
        let promoted = self.waitlist.take_first_fit(table.seats);

        let mut announcement = None;
        let mut event = None;
        if let Some(entry) = &promoted {
            table.seat(entry.name.clone());
            announcement = Some(format!(
                "Party for {}, your table {} is ready!",
                entry.name, table.id
            ));
            event = Some(FloorEvent::TableAssigned {
                table_id: table.id.clone(),
                guest_name: entry.name.clone(),
                party_size: entry.party_size.get(),
            });
        }

        let release = Release {
            table_id: table.id.clone(),
            cleared_guest,
            promoted,
            announcement,
        };
        if let Some(event) = event {
            self.record_event(event);
        }
        CheckoutResult::Released(release)
    }

    /// Takes the pending event, leaving the slot empty.
    pub fn consume_event(&mut self) -> Option<FloorEvent> {
        self.last_event.take()
    }

    fn record_event(&mut self, event: FloorEvent) {
        self.last_event = Some(event);
    }
}

impl Default for Floor {
    fn default() -> Self {
        Self::new(EtaPolicy::default())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::TableStatus;

    fn size(n: u32) -> PartySize {
        let Ok(size) = PartySize::new(n) else {
            panic!("valid size");
        };
        size
    }

    fn assert_capacity_invariant(floor: &Floor) {
        for table in floor.tables() {
            assert_eq!(
                table.occupant().is_some(),
                table.status() == TableStatus::Occupied,
                "table {} breaks occupant/status invariant",
                table.id
            );
        }
    }

    fn seat(floor: &mut Floor, name: &str, party: u32) -> TableId {
        let Some(table) = floor.check_availability(size(party)) else {
            panic!("expected a free table for {party}");
        };
        let id = table.id.clone();
        let Ok(assigned) = floor.assign_table(&id, name) else {
            panic!("assignment failed");
        };
        assigned
    }

    #[test]
    fn default_inventory_layout() {
        let floor = Floor::default();
        let ids: Vec<&str> = floor.tables().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 17);
        assert_eq!(ids.first(), Some(&"BAR-1"));
        assert!(ids.contains(&"T2-5"));
        assert!(ids.contains(&"T4-1"));
        assert_eq!(ids.last(), Some(&"T6-2"));
        assert_eq!(floor.tables().iter().filter(|t| t.kind == "bar").count(), 5);
        assert!(floor.tables().iter().all(Table::is_free));
    }

    #[test]
    fn supplied_tables_replace_seed() {
        let Ok(floor) = Floor::with_tables(
            vec![Table::new(TableId::new("A"), 3, "patio")],
            EtaPolicy::default(),
        ) else {
            panic!("valid inventory");
        };
        assert_eq!(floor.tables().len(), 1);
    }

    #[test]
    fn duplicate_table_ids_are_rejected() {
        let result = Floor::with_tables(
            vec![
                Table::new(TableId::new("A"), 2, "standard"),
                Table::new(TableId::new("A"), 2, "standard"),
            ],
            EtaPolicy::default(),
        );
        assert!(matches!(result, Err(ConciergeError::InvalidRequest(_))));
    }

    #[test]
    fn seatless_table_is_rejected() {
        let result = Floor::with_tables(
            vec![
                Table::new(TableId::new("A"), 2, "standard"),
                Table::new(TableId::new("Z"), 0, "standard"),
            ],
            EtaPolicy::default(),
        );
        assert!(matches!(result, Err(ConciergeError::InvalidRequest(_))));
    }

    #[test]
    fn empty_inventory_falls_back_to_seed() {
        let Ok(floor) = Floor::with_tables(Vec::new(), EtaPolicy::default()) else {
            panic!("empty list uses the seed");
        };
        assert_eq!(floor.tables().len(), 17);
    }

    #[test]
    fn check_availability_returns_first_fit_without_mutating() {
        let floor = Floor::default();
        let Some(table) = floor.check_availability(size(2)) else {
            panic!("expected a table");
        };
        assert_eq!(table.id.as_str(), "T2-1");
        assert!(table.is_free());

        let Some(single) = floor.check_availability(size(1)) else {
            panic!("expected a bar seat");
        };
        assert_eq!(single.id.as_str(), "BAR-1");
        assert!(floor.check_availability(size(7)).is_none());
    }

    #[test]
    fn assign_table_end_to_end() {
        let mut floor = Floor::default();
        let id = seat(&mut floor, "Sam", 2);
        assert_eq!(id.as_str(), "T2-1");

        let Some(table) = floor.table(&id) else {
            panic!("table vanished");
        };
        assert_eq!(table.status(), TableStatus::Occupied);
        assert_eq!(table.occupant(), Some("Sam"));

        assert_eq!(
            floor.consume_event(),
            Some(FloorEvent::TableAssigned {
                table_id: TableId::new("T2-1"),
                guest_name: "Sam".to_string(),
                party_size: 2,
            })
        );
        assert_capacity_invariant(&floor);
    }

    #[test]
    fn assigned_event_reports_table_seats_not_party() {
        let mut floor = Floor::default();
        // Every 2-top taken, so a party of 2 lands on a 4-top.
        for i in 0..5 {
            let _ = seat(&mut floor, &format!("G{i}"), 2);
        }
        let _ = floor.consume_event();
        let id = seat(&mut floor, "Ana", 2);
        assert_eq!(id.as_str(), "T4-1");
        let Some(FloorEvent::TableAssigned { party_size, .. }) = floor.consume_event() else {
            panic!("expected assignment event");
        };
        assert_eq!(party_size, 4);
    }

    #[test]
    fn assign_unknown_table_is_an_error() {
        let mut floor = Floor::default();
        let result = floor.assign_table(&TableId::new("NOPE"), "X");
        assert!(matches!(result, Err(ConciergeError::TableNotFound(_))));
        assert!(floor.consume_event().is_none());
    }

    #[test]
    fn add_to_waitlist_returns_position_and_event() {
        let mut floor = Floor::default();
        assert_eq!(floor.add_to_waitlist("A", size(2)), 1);
        assert_eq!(floor.add_to_waitlist("B", size(4)), 2);

        let Some(FloorEvent::Waitlisted {
            name, position, ..
        }) = floor.consume_event()
        else {
            panic!("expected waitlist event");
        };
        assert_eq!(name, "B");
        assert_eq!(position, 2);
    }

    #[test]
    fn event_slot_keeps_only_latest() {
        let mut floor = Floor::default();
        let _ = floor.add_to_waitlist("X", size(2));
        let _ = seat(&mut floor, "Y", 2);

        let Some(event) = floor.consume_event() else {
            panic!("expected an event");
        };
        assert_eq!(event.event_type_str(), "table_assigned");
        assert!(floor.consume_event().is_none());
    }

    #[test]
    fn consume_is_idempotent() {
        let mut floor = Floor::default();
        let _ = floor.add_to_waitlist("X", size(2));
        assert!(floor.consume_event().is_some());
        assert!(floor.consume_event().is_none());
    }

    #[test]
    fn checkout_skips_parties_that_do_not_fit() {
        let Ok(mut floor) = Floor::with_tables(
            vec![Table::new(TableId::new("T2-1"), 2, "standard")],
            EtaPolicy::default(),
        ) else {
            panic!("valid inventory");
        };
        let _ = floor.add_to_waitlist("Alice", size(4));
        let _ = floor.add_to_waitlist("Bob", size(2));
        let _ = floor.consume_event();

        let CheckoutResult::Released(release) =
            floor.checkout_and_fill_waitlist(&TableId::new("T2-1"))
        else {
            panic!("checkout should succeed");
        };
        let Some(promoted) = release.promoted else {
            panic!("Bob should be promoted");
        };
        assert_eq!(promoted.name, "Bob");
        assert_eq!(
            release.announcement.as_deref(),
            Some("Party for Bob, your table T2-1 is ready!")
        );

        let remaining: Vec<&str> = floor.waitlist().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(remaining, vec!["Alice"]);
        let status = floor.get_status();
        let Some(alice) = status.waitlist.first() else {
            panic!("Alice should still wait");
        };
        assert_eq!(alice.position, 1);
        assert_capacity_invariant(&floor);
    }

    #[test]
    fn checkout_preserves_order_of_remaining_entries() {
        let mut floor = Floor::default();
        for (name, party) in [("A", 6), ("B", 4), ("C", 6), ("D", 4), ("E", 2)] {
            let _ = floor.add_to_waitlist(name, size(party));
        }
        let _ = floor.checkout_and_fill_waitlist(&TableId::new("T4-1"));
        let remaining: Vec<&str> = floor.waitlist().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(remaining, vec!["A", "C", "D", "E"]);
    }

    #[test]
    fn checkout_empty_table_still_promotes() {
        let mut floor = Floor::default();
        let _ = floor.add_to_waitlist("Kim", size(1));
        let _ = floor.consume_event();

        let CheckoutResult::Released(release) =
            floor.checkout_and_fill_waitlist(&TableId::new("BAR-1"))
        else {
            panic!("checkout should succeed");
        };
        assert_eq!(release.cleared_guest, None);
        assert!(release.promoted.is_some());
        assert!(floor.consume_event().is_some());
    }

    #[test]
    fn checkout_without_waiters_frees_table_and_records_nothing() {
        let mut floor = Floor::default();
        let id = seat(&mut floor, "Sam", 2);
        let _ = floor.consume_event();

        let CheckoutResult::Released(release) = floor.checkout_and_fill_waitlist(&id) else {
            panic!("checkout should succeed");
        };
        assert_eq!(release.cleared_guest.as_deref(), Some("Sam"));
        assert!(release.promoted.is_none());
        assert!(release.announcement.is_none());
        assert!(floor.table(&id).is_some_and(Table::is_free));
        assert!(floor.consume_event().is_none());
    }

    #[test]
    fn checkout_unknown_table_changes_nothing() {
        let mut floor = Floor::default();
        let _ = floor.add_to_waitlist("Kim", size(2));
        let _ = floor.consume_event();
        let before = floor.get_status();

        let result = floor.checkout_and_fill_waitlist(&TableId::new("T9-9"));
        assert!(!result.is_success());
        assert_eq!(floor.get_status(), before);
        assert!(floor.consume_event().is_none());
    }

    #[test]
    fn waitlist_then_promote_scenario() {
        let mut floor = Floor::default();
        for i in 1..=5 {
            let id = seat(&mut floor, &format!("G{i}"), 2);
            assert_eq!(id, TableId::numbered("T2", i));
        }
        assert_eq!(floor.add_to_waitlist("Kim", size(2)), 1);

        let result = floor.checkout_and_fill_waitlist(&TableId::new("T2-3"));
        assert!(result.is_success());
        assert_eq!(
            floor.consume_event(),
            Some(FloorEvent::TableAssigned {
                table_id: TableId::new("T2-3"),
                guest_name: "Kim".to_string(),
                party_size: 2,
            })
        );
        assert!(floor.waitlist().is_empty());
        assert!(
            floor
                .table(&TableId::new("T2-3"))
                .is_some_and(|t| t.occupant() == Some("Kim"))
        );
        assert_capacity_invariant(&floor);
    }

    #[test]
    fn eta_is_position_times_turnover() {
        let mut floor = Floor::new(EtaPolicy::new(20));
        let _ = floor.add_to_waitlist("A", size(2));
        let _ = floor.add_to_waitlist("B", size(2));
        let Some(FloorEvent::Waitlisted { entry_id, .. }) = floor.consume_event() else {
            panic!("expected waitlist event");
        };

        assert_eq!(floor.eta_for(entry_id), Some(40));
        let status = floor.get_status();
        let etas: Vec<u32> = status.waitlist.iter().map(|r| r.eta_minutes).collect();
        assert_eq!(etas, vec![20, 40]);
        let row = status.waitlist.iter().find(|r| r.id == entry_id);
        assert_eq!(row.map(|r| r.position), Some(2));
    }

    #[test]
    fn duplicate_name_and_size_get_distinct_ids() {
        let mut floor = Floor::default();
        let _ = floor.add_to_waitlist("Lee", size(2));
        let Some(FloorEvent::Waitlisted { entry_id: first, .. }) = floor.consume_event() else {
            panic!("expected waitlist event");
        };
        let _ = floor.add_to_waitlist("Lee", size(2));
        let Some(FloorEvent::Waitlisted { entry_id: second, .. }) = floor.consume_event() else {
            panic!("expected waitlist event");
        };
        assert_ne!(first, second);
        assert_eq!(floor.eta_for(first), Some(DEFAULT_TURNOVER_MINUTES));
        assert_eq!(floor.eta_for(second), Some(2 * DEFAULT_TURNOVER_MINUTES));
    }
}
