//! Provider-agnostic chat model interface.
//!
//! [`ChatModel`] is the only seam between the concierge and a language
//! model backend. A reply is either plain text for the guest or a batch of
//! function calls the agent must run before asking again.

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Function name.
    pub name: String,
    /// JSON arguments.
    pub args: Value,
}

/// Output of a function call, fed back to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    /// Function name the result answers.
    pub name: String,
    /// Text returned by the tool.
    pub output: String,
}

/// One entry in the conversation transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// Guest message.
    User(String),
    /// Model text reply.
    Model(String),
    /// Function calls the model requested.
    ToolCalls(Vec<ToolCall>),
    /// Results of those calls.
    ToolResults(Vec<ToolResult>),
}

/// What the model produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// Final text for the guest.
    Text(String),
    /// Functions to run before the model continues.
    ToolCalls(Vec<ToolCall>),
}

/// Declaration of a callable tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    /// Function name.
    pub name: &'static str,
    /// What the tool does, for the model.
    pub description: &'static str,
    /// JSON-schema of the arguments object.
    pub parameters: Value,
}

/// A chat model with function calling.
#[async_trait]
pub trait ChatModel: Send + Sync + Debug {
    /// Name of the preferred model, for logs.
    fn name(&self) -> &str;

    /// Generates the next reply for `transcript`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers with
    /// something that is neither text nor function calls.
    async fn generate(
        &self,
        system_prompt: &str,
        transcript: &[Turn],
        tools: &[ToolSpec],
    ) -> anyhow::Result<ModelReply>;
}
