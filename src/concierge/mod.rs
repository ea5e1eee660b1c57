//! Conversational layer: the chat model, its tools, and personas.
//!
//! ```text
//! guest message
//!     │
//!     ├── ConciergeAgent      transcript + model loop
//!     │     └── ChatModel     Gemini (or a test double)
//!     │
//!     └── ToolDispatcher      ToolCommand → FloorService → text
//! ```

pub mod agent;
pub mod command;
pub mod dispatcher;
pub mod gemini;
pub mod model;
pub mod profile;

pub use agent::{AgentReply, ConciergeAgent};
pub use command::{GuestAction, ToolCommand, ToolError};
pub use dispatcher::{ToolDispatcher, ToolOutcome};
pub use gemini::GeminiModel;
pub use model::{ChatModel, ModelReply, ToolCall, ToolResult, ToolSpec, Turn};
pub use profile::ConciergeProfile;
