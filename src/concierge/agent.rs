//! The concierge agent: one chat session driving the floor through tools.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use super::command::tool_specs;
use super::dispatcher::ToolDispatcher;
use super::model::{ChatModel, ModelReply, ToolResult, ToolSpec, Turn};
use super::profile::ConciergeProfile;
use crate::domain::FloorEvent;
use crate::error::ConciergeError;

/// Upper bound on model → tools → model rounds within one guest message.
pub const MAX_TOOL_ROUNDS: usize = 5;

/// Upper bound on transcript entries kept between guest messages. Older
/// exchanges are dropped whole, starting from the oldest guest message.
pub const MAX_TRANSCRIPT_TURNS: usize = 40;

/// Reply to one guest message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    /// Text for the guest.
    pub text: String,
    /// Last floor event produced during this turn.
    pub event: Option<FloorEvent>,
}

/// Conversational front end for the floor.
///
/// Keeps one running transcript, like a single host at the stand. The
/// transcript is cleared once a guest is seated or waitlisted, and is
/// otherwise capped at [`MAX_TRANSCRIPT_TURNS`]. The transcript lock
/// serializes turns; the floor lock is only taken inside individual tool
/// calls, never across a model request.
#[derive(Debug)]
pub struct ConciergeAgent {
    model: Option<Arc<dyn ChatModel>>,
    dispatcher: ToolDispatcher,
    profile: ConciergeProfile,
    tools: Vec<ToolSpec>,
    transcript: Mutex<Vec<Turn>>,
}

impl ConciergeAgent {
    /// Creates an agent. Without a model every turn fails with
    /// [`ConciergeError::ModelUnavailable`].
    #[must_use]
    pub fn new(
        model: Option<Arc<dyn ChatModel>>,
        dispatcher: ToolDispatcher,
        profile: ConciergeProfile,
    ) -> Self {
        Self {
            model,
            dispatcher,
            profile,
            tools: tool_specs(),
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// The active persona.
    #[must_use]
    pub fn profile(&self) -> &ConciergeProfile {
        &self.profile
    }

    /// Returns `true` if a chat model is configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// Handles one guest message.
    ///
    /// Runs tool calls until the model answers in text. If several
    /// mutations happen in one turn, only the last event is returned. A
    /// turn that produced an event ends the guest's interaction and starts
    /// the next guest on an empty transcript.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError::ModelUnavailable`] without a model,
    /// [`ConciergeError::Model`] if the backend fails or keeps calling
    /// tools past [`MAX_TOOL_ROUNDS`]. The transcript is rolled back to
    /// before the message on error; floor changes already made stay.
    pub async fn respond(&self, message: &str) -> Result<AgentReply, ConciergeError> {
        let model = self.model.as_ref().ok_or(ConciergeError::ModelUnavailable)?;

        let mut transcript = self.transcript.lock().await;
        let checkpoint = transcript.len();
        transcript.push(Turn::User(message.to_string()));

        let start = Instant::now();
        let result = self.run_turn(model.as_ref(), &mut transcript).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(reply) => {
                tracing::info!(
                    model = model.name(),
                    chars = message.chars().count(),
                    duration_ms = elapsed_ms,
                    event = reply.event.as_ref().map_or("none", FloorEvent::event_type_str),
                    "concierge replied"
                );
                tracing::debug!(user = message, reply = %reply.text, "concierge exchange");
                if reply.event.is_some() {
                    transcript.clear();
                } else {
                    trim_transcript(&mut transcript, MAX_TRANSCRIPT_TURNS);
                }
                Ok(reply)
            }
            Err(e) => {
                transcript.truncate(checkpoint);
                tracing::error!(model = model.name(), error = %e, "concierge turn failed");
                Err(e)
            }
        }
    }

    async fn run_turn(
        &self,
        model: &dyn ChatModel,
        transcript: &mut Vec<Turn>,
    ) -> Result<AgentReply, ConciergeError> {
        let mut event = None;
        for _ in 0..MAX_TOOL_ROUNDS {
            let reply = model
                .generate(&self.profile.prompt, transcript, &self.tools)
                .await
                .map_err(|e| ConciergeError::Model(e.to_string()))?;

            match reply {
                ModelReply::Text(text) => {
                    transcript.push(Turn::Model(text.clone()));
                    return Ok(AgentReply { text, event });
                }
                ModelReply::ToolCalls(calls) => {
                    let mut results = Vec::with_capacity(calls.len());
                    for call in &calls {
                        let outcome = self.dispatcher.dispatch_call(&call.name, &call.args).await;
                        tracing::debug!(tool = %call.name, result = %outcome.text, "tool call");
                        if outcome.event.is_some() {
                            event = outcome.event;
                        }
                        results.push(ToolResult {
                            name: call.name.clone(),
                            output: outcome.text,
                        });
                    }
                    transcript.push(Turn::ToolCalls(calls));
                    transcript.push(Turn::ToolResults(results));
                }
            }
        }
        Err(ConciergeError::Model(format!(
            "no reply after {MAX_TOOL_ROUNDS} tool rounds"
        )))
    }
}

/// Drops the oldest guest exchanges until at most `max` entries remain.
/// The exchange in progress is never split.
fn trim_transcript(transcript: &mut Vec<Turn>, max: usize) {
    while transcript.len() > max {
        let Some(next_user) = transcript
            .iter()
            .skip(1)
            .position(|turn| matches!(turn, Turn::User(_)))
        else {
            break;
        };
        transcript.drain(..=next_user);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::concierge::model::ToolCall;
    use crate::concierge::model::scripted::ScriptedModel;
    use crate::domain::{EtaPolicy, EventBus, Floor};
    use crate::service::FloorService;

    fn call(name: &str, args: serde_json::Value) -> ToolCall {
        ToolCall {
            name: name.to_string(),
            args,
        }
    }

    fn agent_with(replies: Vec<ModelReply>) -> ConciergeAgent {
        let floor = Arc::new(FloorService::new(
            Floor::new(EtaPolicy::default()),
            EventBus::new(16),
        ));
        ConciergeAgent::new(
            Some(Arc::new(ScriptedModel::new(replies))),
            ToolDispatcher::new(floor),
            ConciergeProfile::builtin(None),
        )
    }

    #[tokio::test]
    async fn plain_text_reply_has_no_event() {
        let agent = agent_with(vec![ModelReply::Text("Hi! Name and party size?".to_string())]);
        let Ok(reply) = agent.respond("hello").await else {
            panic!("turn failed");
        };
        assert_eq!(reply.text, "Hi! Name and party size?");
        assert!(reply.event.is_none());
    }

    #[tokio::test]
    async fn tool_round_trip_surfaces_event() {
        let agent = agent_with(vec![
            ModelReply::ToolCalls(vec![call(
                "check_availability_tool",
                json!({ "party_size": 2 }),
            )]),
            ModelReply::ToolCalls(vec![call(
                "add_guest_tool",
                json!({ "name": "Sam", "party_size": 2, "action": "check_in" }),
            )]),
            ModelReply::Text("Table T2-1 is yours, Sam!".to_string()),
        ]);
        let Ok(reply) = agent.respond("Sam, two people").await else {
            panic!("turn failed");
        };
        let Some(FloorEvent::TableAssigned { guest_name, .. }) = reply.event else {
            panic!("expected assignment event");
        };
        assert_eq!(guest_name, "Sam");
        assert!(agent.transcript.lock().await.is_empty());
    }

    #[tokio::test]
    async fn text_turns_accumulate_until_guest_is_seated() {
        let agent = agent_with(vec![
            ModelReply::Text("Hi! Name and party size?".to_string()),
            ModelReply::Text("How many of you?".to_string()),
        ]);
        let Ok(_) = agent.respond("hello").await else {
            panic!("turn failed");
        };
        let Ok(_) = agent.respond("I'm Sam").await else {
            panic!("turn failed");
        };
        assert_eq!(agent.transcript.lock().await.len(), 4);
    }

    #[tokio::test]
    async fn transcript_stays_bounded_over_many_guests() {
        let replies = (0..200)
            .map(|i| ModelReply::Text(format!("reply {i}")))
            .collect();
        let agent = agent_with(replies);
        for i in 0..200 {
            let Ok(_) = agent.respond(&format!("message {i}")).await else {
                panic!("turn {i} failed");
            };
        }
        let transcript = agent.transcript.lock().await;
        assert!(transcript.len() <= MAX_TRANSCRIPT_TURNS);
        assert!(matches!(transcript.first(), Some(Turn::User(_))));
        assert_eq!(transcript.last(), Some(&Turn::Model("reply 199".to_string())));
    }

    #[test]
    fn trim_keeps_whole_exchanges() {
        let mut transcript = vec![
            Turn::User("a".to_string()),
            Turn::ToolCalls(Vec::new()),
            Turn::ToolResults(Vec::new()),
            Turn::Model("a!".to_string()),
            Turn::User("b".to_string()),
            Turn::Model("b!".to_string()),
        ];
        trim_transcript(&mut transcript, 3);
        assert_eq!(
            transcript,
            vec![Turn::User("b".to_string()), Turn::Model("b!".to_string())]
        );
    }

    #[tokio::test]
    async fn last_event_in_turn_wins() {
        let agent = agent_with(vec![
            ModelReply::ToolCalls(vec![
                call(
                    "add_guest_tool",
                    json!({ "name": "X", "party_size": 2, "action": "waitlist" }),
                ),
                call("add_guest_tool", json!({ "name": "Y", "party_size": 2 })),
            ]),
            ModelReply::Text("done".to_string()),
        ]);
        let Ok(reply) = agent.respond("two parties").await else {
            panic!("turn failed");
        };
        assert!(matches!(reply.event, Some(FloorEvent::TableAssigned { .. })));
    }

    #[tokio::test]
    async fn missing_model_is_unavailable() {
        let floor = Arc::new(FloorService::new(Floor::default(), EventBus::new(4)));
        let agent = ConciergeAgent::new(
            None,
            ToolDispatcher::new(floor),
            ConciergeProfile::builtin(None),
        );
        assert!(!agent.is_available());
        assert!(matches!(
            agent.respond("hi").await,
            Err(ConciergeError::ModelUnavailable)
        ));
    }

    #[tokio::test]
    async fn endless_tool_calls_are_cut_off_and_rolled_back() {
        let replies = (0..MAX_TOOL_ROUNDS)
            .map(|_| ModelReply::ToolCalls(vec![call("get_status_tool", json!({}))]))
            .collect();
        let agent = agent_with(replies);
        assert!(matches!(
            agent.respond("status?").await,
            Err(ConciergeError::Model(_))
        ));
        assert!(agent.transcript.lock().await.is_empty());
    }
}
