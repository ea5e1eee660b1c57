//! Per-connection subscription manager.
//!
//! Tracks which board update kinds a WebSocket client wants and filters
//! broadcasts server-side.

use std::collections::HashSet;

use crate::domain::BoardUpdateKind;

/// Wildcard subscription token.
pub const WILDCARD: &str = "*";

/// Manages the set of update kinds for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed kinds. If `subscribe_all` is true, this set is ignored.
    kinds: HashSet<BoardUpdateKind>,
    /// Whether the client subscribes to every kind (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds kinds by wire name. `"*"` enables the wildcard.
    ///
    /// Returns the names that were not recognized.
    pub fn subscribe(&mut self, names: &[String]) -> Vec<String> {
        let mut unknown = Vec::new();
        for name in names {
            if name == WILDCARD {
                self.subscribe_all = true;
            } else if let Some(kind) = BoardUpdateKind::parse(name) {
                self.kinds.insert(kind);
            } else {
                unknown.push(name.clone());
            }
        }
        unknown
    }

    /// Removes kinds by wire name. `"*"` clears the wildcard.
    pub fn unsubscribe(&mut self, names: &[String]) {
        for name in names {
            if name == WILDCARD {
                self.subscribe_all = false;
            } else if let Some(kind) = BoardUpdateKind::parse(name) {
                self.kinds.remove(&kind);
            }
        }
    }

    /// Returns `true` if `kind` passes the subscription filter.
    #[must_use]
    pub fn matches(&self, kind: BoardUpdateKind) -> bool {
        self.subscribe_all || self.kinds.contains(&kind)
    }

    /// Explicitly subscribed kinds, sorted by wire name.
    #[must_use]
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.kinds.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(BoardUpdateKind::TableAssigned));
    }

    #[test]
    fn subscribe_specific_kind() {
        let mut mgr = SubscriptionManager::new();
        assert!(mgr.subscribe(&names(&["waitlisted"])).is_empty());
        assert!(mgr.matches(BoardUpdateKind::Waitlisted));
        assert!(!mgr.matches(BoardUpdateKind::TableReleased));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&names(&["*"]));
        assert!(mgr.matches(BoardUpdateKind::TableAssigned));
        assert!(mgr.matches(BoardUpdateKind::TableReleased));
        mgr.unsubscribe(&names(&["*"]));
        assert!(!mgr.is_subscribed_all());
    }

    #[test]
    fn unknown_kinds_are_reported() {
        let mut mgr = SubscriptionManager::new();
        let unknown = mgr.subscribe(&names(&["table_assigned", "menu_updated"]));
        assert_eq!(unknown, names(&["menu_updated"]));
        assert_eq!(mgr.kinds(), vec!["table_assigned"]);
    }

    #[test]
    fn unsubscribe_removes_kind() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&names(&["table_released", "waitlisted"]));
        mgr.unsubscribe(&names(&["waitlisted"]));
        assert_eq!(mgr.kinds(), vec!["table_released"]);
    }
}
