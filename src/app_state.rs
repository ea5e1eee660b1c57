//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::api::metrics::HttpMetrics;
use crate::concierge::ConciergeAgent;
use crate::domain::EventBus;
use crate::service::FloorService;
use crate::speech::SpeechSynthesizer;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Lock-guarded allocation engine.
    pub floor: Arc<FloorService>,
    /// Conversational concierge.
    pub agent: Arc<ConciergeAgent>,
    /// Speech backend.
    pub speech: Arc<dyn SpeechSynthesizer>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
    /// Prometheus request metrics.
    pub metrics: Arc<HttpMetrics>,
}
