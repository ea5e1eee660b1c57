//! Tool commands the chat model can invoke.
//!
//! The model names a function and passes JSON arguments. [`ToolCommand`]
//! turns that pair into a typed command; [`tool_specs`] describes the same
//! tools back to the model.

use serde::Deserialize;
use serde_json::{Value, json};

use super::model::ToolSpec;
use crate::domain::PartySize;

/// Function name for [`ToolCommand::CheckAvailability`].
pub const CHECK_AVAILABILITY_TOOL: &str = "check_availability_tool";
/// Function name for [`ToolCommand::AddGuest`].
pub const ADD_GUEST_TOOL: &str = "add_guest_tool";
/// Function name for [`ToolCommand::GetStatus`].
pub const GET_STATUS_TOOL: &str = "get_status_tool";

/// What to do with a guest in [`ToolCommand::AddGuest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestAction {
    /// Seat the guest now if a table is free.
    CheckIn,
    /// Put the guest on the waitlist.
    Waitlist,
}

impl GuestAction {
    /// Parses an action name case-insensitively. Missing or empty means
    /// [`GuestAction::CheckIn`].
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidAction`] for any other value.
    pub fn parse(raw: Option<&str>) -> Result<Self, ToolError> {
        let action = raw.map(str::trim).unwrap_or_default().to_lowercase();
        match action.as_str() {
            "" | "check_in" => Ok(Self::CheckIn),
            "waitlist" => Ok(Self::Waitlist),
            _ => Err(ToolError::InvalidAction(action)),
        }
    }
}

/// A typed tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCommand {
    /// Look for a free table without changing anything.
    CheckAvailability {
        /// Number of guests.
        party_size: PartySize,
    },
    /// Seat a guest or add them to the waitlist.
    AddGuest {
        /// Guest name.
        name: String,
        /// Number of guests.
        party_size: PartySize,
        /// Seat now or waitlist.
        action: GuestAction,
    },
    /// Dump tables and waitlist.
    GetStatus,
}

/// Why a function call could not become a [`ToolCommand`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// The model called a function we do not expose.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// Arguments were missing or had the wrong type.
    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments {
        /// Tool name.
        tool: String,
        /// Parser message.
        reason: String,
    },
    /// `action` was neither `check_in` nor `waitlist`.
    #[error("invalid action: {0}")]
    InvalidAction(String),
}

#[derive(Deserialize)]
struct CheckAvailabilityArgs {
    party_size: PartySize,
}

#[derive(Deserialize)]
struct AddGuestArgs {
    name: String,
    party_size: PartySize,
    #[serde(default)]
    action: Option<String>,
}

impl ToolCommand {
    /// Parses a model function call.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`] for unknown tools, malformed arguments, or
    /// an unsupported guest action.
    pub fn parse(name: &str, args: &Value) -> Result<Self, ToolError> {
        match name {
            CHECK_AVAILABILITY_TOOL => {
                let args: CheckAvailabilityArgs = decode_args(name, args)?;
                Ok(Self::CheckAvailability {
                    party_size: args.party_size,
                })
            }
            ADD_GUEST_TOOL => {
                let args: AddGuestArgs = decode_args(name, args)?;
                let action = GuestAction::parse(args.action.as_deref())?;
                Ok(Self::AddGuest {
                    name: args.name,
                    party_size: args.party_size,
                    action,
                })
            }
            GET_STATUS_TOOL => Ok(Self::GetStatus),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

fn decode_args<T: serde::de::DeserializeOwned>(tool: &str, args: &Value) -> Result<T, ToolError> {
    // Models send `null` or omit args for zero-argument calls.
    let args = if args.is_null() { json!({}) } else { args.clone() };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

/// Declarations of every tool, in the JSON-schema subset models accept.
#[must_use]
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: CHECK_AVAILABILITY_TOOL,
            description: "Check whether a table is free for a party of the given size.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "party_size": { "type": "integer", "description": "Number of guests." }
                },
                "required": ["party_size"]
            }),
        },
        ToolSpec {
            name: ADD_GUEST_TOOL,
            description: "Seat a guest at a free table (action='check_in') or add them to the \
                          waitlist (action='waitlist').",
            parameters: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Guest name." },
                    "party_size": { "type": "integer", "description": "Number of guests." },
                    "action": {
                        "type": "string",
                        "enum": ["check_in", "waitlist"],
                        "description": "Defaults to check_in."
                    }
                },
                "required": ["name", "party_size"]
            }),
        },
        ToolSpec {
            name: GET_STATUS_TOOL,
            description: "Return every table with its status and the current waitlist.",
            parameters: json!({ "type": "object", "properties": {} }),
        },
    ]
}
