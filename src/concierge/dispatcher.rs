//! Runs tool commands against the floor and phrases the results.

use std::sync::Arc;

use super::command::{GuestAction, ToolCommand, ToolError};
use crate::domain::FloorEvent;
use crate::service::{FloorService, Seating};

/// Text for the model plus the floor event the call produced, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    /// Natural-language result handed back to the model.
    pub text: String,
    /// Event from a mutating command.
    pub event: Option<FloorEvent>,
}

impl ToolOutcome {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            event: None,
        }
    }
}

/// Executes [`ToolCommand`]s. Holds no state of its own.
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    floor: Arc<FloorService>,
}

impl ToolDispatcher {
    /// Creates a dispatcher over the shared floor.
    #[must_use]
    pub fn new(floor: Arc<FloorService>) -> Self {
        Self { floor }
    }

    /// Parses and runs one function call. Every failure is turned into
    /// text for the model; nothing here is fatal to the turn.
    pub async fn dispatch_call(&self, name: &str, args: &serde_json::Value) -> ToolOutcome {
        match ToolCommand::parse(name, args) {
            Ok(command) => self.dispatch(command).await,
            Err(ToolError::InvalidAction(_)) => ToolOutcome::text(
                "Invalid action. Use 'check_in' to assign a table or 'waitlist' to add to waitlist.",
            ),
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "rejected tool call");
                ToolOutcome::text(e.to_string())
            }
        }
    }

    /// Runs a parsed command.
    pub async fn dispatch(&self, command: ToolCommand) -> ToolOutcome {
        match command {
            ToolCommand::CheckAvailability { party_size } => {
                match self.floor.check_availability(party_size).await {
                    Some(table) => ToolOutcome::text(format!(
                        "Table {} is available for {party_size} guests.",
                        table.id
                    )),
                    None => ToolOutcome::text("No table available."),
                }
            }
            ToolCommand::AddGuest {
                name,
                party_size,
                action: GuestAction::CheckIn,
            } => match self.floor.seat_party(&name, party_size).await {
                Ok(Seating::Seated { table_id, event }) => ToolOutcome {
                    text: format!("Assigned table {table_id} to {name}."),
                    event: Some(event),
                },
                Ok(Seating::NoCapacity) => ToolOutcome::text(format!(
                    "No table available for {party_size} guests. Use action='waitlist' to add them to the waitlist."
                )),
                Err(e) => ToolOutcome::text(format!("Could not seat {name}: {e}")),
            },
            ToolCommand::AddGuest {
                name,
                party_size,
                action: GuestAction::Waitlist,
            } => match self.floor.add_to_waitlist(&name, party_size).await {
                Ok(waiting) => ToolOutcome {
                    text: format!(
                        "Added {name} to waitlist at position {}. Estimated wait time: {} minutes.",
                        waiting.position, waiting.eta_minutes
                    ),
                    event: Some(waiting.event),
                },
                Err(e) => ToolOutcome::text(format!("Could not add {name} to the waitlist: {e}")),
            },
            ToolCommand::GetStatus => {
                let status = self.floor.status().await;
                ToolOutcome::text(
                    serde_json::to_string(&status)
                        .unwrap_or_else(|e| format!("Status unavailable: {e}")),
                )
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::concierge::command::{ADD_GUEST_TOOL, CHECK_AVAILABILITY_TOOL, GET_STATUS_TOOL};
    use crate::domain::{EtaPolicy, EventBus, Floor, Table, TableId};

    fn dispatcher_with(tables: Vec<Table>) -> ToolDispatcher {
        let Ok(floor) = Floor::with_tables(tables, EtaPolicy::new(10)) else {
            panic!("valid inventory");
        };
        ToolDispatcher::new(Arc::new(FloorService::new(floor, EventBus::new(16))))
    }

    #[tokio::test]
    async fn check_availability_phrasing() {
        let dispatcher = dispatcher_with(Vec::new());
        let outcome = dispatcher
            .dispatch_call(CHECK_AVAILABILITY_TOOL, &json!({ "party_size": 2 }))
            .await;
        assert_eq!(outcome.text, "Table T2-1 is available for 2 guests.");
        assert!(outcome.event.is_none());

        let outcome = dispatcher
            .dispatch_call(CHECK_AVAILABILITY_TOOL, &json!({ "party_size": 9 }))
            .await;
        assert_eq!(outcome.text, "No table available.");
    }

    #[tokio::test]
    async fn check_in_assigns_and_returns_event() {
        let dispatcher = dispatcher_with(Vec::new());
        let outcome = dispatcher
            .dispatch_call(ADD_GUEST_TOOL, &json!({ "name": "Sam", "party_size": 2 }))
            .await;
        assert_eq!(outcome.text, "Assigned table T2-1 to Sam.");
        assert!(matches!(outcome.event, Some(FloorEvent::TableAssigned { .. })));
    }

    #[tokio::test]
    async fn check_in_when_full_suggests_waitlist() {
        let dispatcher = dispatcher_with(vec![Table::new(TableId::new("T2-1"), 2, "standard")]);
        let _ = dispatcher
            .dispatch_call(ADD_GUEST_TOOL, &json!({ "name": "Sam", "party_size": 2 }))
            .await;
        let outcome = dispatcher
            .dispatch_call(ADD_GUEST_TOOL, &json!({ "name": "Kim", "party_size": 2 }))
            .await;
        assert_eq!(
            outcome.text,
            "No table available for 2 guests. Use action='waitlist' to add them to the waitlist."
        );
        assert!(outcome.event.is_none());
    }

    #[tokio::test]
    async fn waitlist_reports_position_and_eta() {
        let dispatcher = dispatcher_with(Vec::new());
        let outcome = dispatcher
            .dispatch_call(
                ADD_GUEST_TOOL,
                &json!({ "name": "Kim", "party_size": 2, "action": "waitlist" }),
            )
            .await;
        assert_eq!(
            outcome.text,
            "Added Kim to waitlist at position 1. Estimated wait time: 10 minutes."
        );
        assert!(matches!(outcome.event, Some(FloorEvent::Waitlisted { .. })));
    }

    #[tokio::test]
    async fn invalid_action_text() {
        let dispatcher = dispatcher_with(Vec::new());
        let outcome = dispatcher
            .dispatch_call(
                ADD_GUEST_TOOL,
                &json!({ "name": "Kim", "party_size": 2, "action": "teleport" }),
            )
            .await;
        assert_eq!(
            outcome.text,
            "Invalid action. Use 'check_in' to assign a table or 'waitlist' to add to waitlist."
        );
    }

    #[tokio::test]
    async fn status_is_json_snapshot() {
        let dispatcher = dispatcher_with(Vec::new());
        let outcome = dispatcher.dispatch_call(GET_STATUS_TOOL, &json!({})).await;
        let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&outcome.text) else {
            panic!("status should be JSON");
        };
        assert_eq!(parsed["tables"].as_array().map(Vec::len), Some(17));
    }

    #[tokio::test]
    async fn bad_arguments_are_reported_as_text() {
        let dispatcher = dispatcher_with(Vec::new());
        let outcome = dispatcher
            .dispatch_call(ADD_GUEST_TOOL, &json!({ "party_size": 2 }))
            .await;
        assert!(outcome.text.starts_with("invalid arguments for add_guest_tool"));
        assert!(outcome.event.is_none());
    }
}
