//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered board updates.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage};
use super::subscription::SubscriptionManager;
use crate::domain::BoardUpdate;
use crate::service::FloorService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and answers them.
/// - Forwards matching updates from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut update_rx: broadcast::Receiver<BoardUpdate>,
    floor: Arc<FloorService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs, &floor).await;
                        if let Some(reply) = reply
                            && ws_tx.send(Message::text(reply)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            update = update_rx.recv() => {
                match update {
                    Ok(update) => {
                        if subs.matches(update.kind()) {
                            let msg = WsMessage::event(
                                serde_json::to_value(&update).unwrap_or_default(),
                            );
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON reply.
pub async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    floor: &FloorService,
) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error(String::new(), 400, "malformed JSON"))
            .ok();
    };

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return serde_json::to_string(&WsMessage::error(msg.id, 404, "unknown command")).ok();
    };

    let reply = match command {
        WsCommand::Subscribe { kinds } => {
            let unknown = subs.subscribe(&kinds);
            WsMessage::response(
                msg.id,
                serde_json::json!({
                    "subscribed": subs.kinds(),
                    "wildcard": subs.is_subscribed_all(),
                    "unknown": unknown,
                }),
            )
        }
        WsCommand::Unsubscribe { kinds } => {
            subs.unsubscribe(&kinds);
            WsMessage::response(
                msg.id,
                serde_json::json!({
                    "subscribed": subs.kinds(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::GetStatus => {
            let status = floor.status().await;
            WsMessage::response(msg.id, serde_json::to_value(&status).unwrap_or_default())
        }
    };
    serde_json::to_string(&reply).ok()
}
