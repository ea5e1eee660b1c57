//! FIFO waitlist with capacity-filtered promotion.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{EntryId, PartySize};

/// A party waiting for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WaitlistEntry {
    /// Unique entry identifier.
    pub id: EntryId,
    /// Guest name as given at the host stand.
    pub name: String,
    /// Number of guests in the party.
    pub party_size: PartySize,
    /// When the party joined the waitlist.
    pub joined_at: DateTime<Utc>,
}

impl WaitlistEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>, party_size: PartySize) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            party_size,
            joined_at: Utc::now(),
        }
    }
}

/// Ordered queue of waiting parties.
///
/// Entries keep arrival order. The only way an entry leaves is
/// [`Waitlist::take_first_fit`], which removes it without reordering the
/// rest.
#[derive(Debug, Clone, Default)]
pub struct Waitlist {
    entries: Vec<WaitlistEntry>,
}

impl Waitlist {
    /// Creates an empty waitlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns its 1-based position.
    pub fn push(&mut self, entry: WaitlistEntry) -> usize {
        self.entries.push(entry);
        self.entries.len()
    }

    /// Removes and returns the earliest entry whose party fits `seats`.
    ///
    /// Larger parties ahead in the queue are skipped, not blocking.
    pub fn take_first_fit(&mut self, seats: u32) -> Option<WaitlistEntry> {
        let idx = self
            .entries
            .iter()
            .position(|entry| entry.party_size.fits(seats))?;
        Some(self.entries.remove(idx))
    }

    /// Returns the 1-based position of the entry with `id`.
    #[must_use]
    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .map(|idx| idx + 1)
    }

    /// Iterates entries in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &WaitlistEntry> {
        self.entries.iter()
    }

    /// Number of waiting parties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nobody is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn entry(name: &str, size: u32) -> WaitlistEntry {
        let Ok(size) = PartySize::new(size) else {
            panic!("valid size");
        };
        WaitlistEntry::new(name, size)
    }

    fn names(list: &Waitlist) -> Vec<&str> {
        list.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn push_returns_own_position() {
        let mut list = Waitlist::new();
        assert_eq!(list.push(entry("A", 2)), 1);
        assert_eq!(list.push(entry("B", 2)), 2);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn take_first_fit_skips_larger_parties() {
        let mut list = Waitlist::new();
        list.push(entry("Alice", 4));
        list.push(entry("Bob", 2));
        list.push(entry("Cara", 2));

        let Some(taken) = list.take_first_fit(2) else {
            panic!("Bob should fit");
        };
        assert_eq!(taken.name, "Bob");
        assert_eq!(names(&list), vec!["Alice", "Cara"]);
    }

    #[test]
    fn take_first_fit_returns_none_when_nothing_fits() {
        let mut list = Waitlist::new();
        list.push(entry("Big", 6));
        assert!(list.take_first_fit(4).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn position_of_tracks_removals() {
        let mut list = Waitlist::new();
        let first = entry("A", 4);
        let second = entry("B", 2);
        let second_id = second.id;
        list.push(first);
        list.push(second);
        assert_eq!(list.position_of(second_id), Some(2));

        let _ = list.take_first_fit(4);
        assert_eq!(list.position_of(second_id), Some(1));
        assert_eq!(list.position_of(EntryId::new()), None);
    }
}
