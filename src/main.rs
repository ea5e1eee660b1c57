//! cafe-concierge server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use cafe_concierge::api;
use cafe_concierge::api::metrics::HttpMetrics;
use cafe_concierge::app_state::AppState;
use cafe_concierge::concierge::{
    ChatModel, ConciergeAgent, ConciergeProfile, GeminiModel, ToolDispatcher,
};
use cafe_concierge::config::ConciergeConfig;
use cafe_concierge::domain::{EtaPolicy, EventBus, Floor};
use cafe_concierge::service::FloorService;
use cafe_concierge::speech::{GoogleTts, SpeechSynthesizer};
use cafe_concierge::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; LOG_FORMAT=json switches to structured output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = ConciergeConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        profile = %config.concierge_id,
        "starting cafe-concierge"
    );

    // Build domain layer
    let floor = Floor::new(EtaPolicy::new(config.turnover_minutes));
    let event_bus = EventBus::new(config.event_bus_capacity);

    // Build service layer
    let floor_service = Arc::new(FloorService::new(floor, event_bus.clone()));

    // Build concierge and speech backends
    let profile = ConciergeProfile::builtin(Some(&config.concierge_id));
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()?;

    let model: Option<Arc<dyn ChatModel>> = match &config.google_api_key {
        Some(key) => Some(Arc::new(
            GeminiModel::new(key, &profile.model)
                .with_base_url(&config.gemini_base_url)
                .with_http_client(http.clone()),
        )),
        None => {
            tracing::warn!("GOOGLE_API_KEY not set; chat and speech disabled");
            None
        }
    };
    let speech: Arc<dyn SpeechSynthesizer> = Arc::new(
        GoogleTts::new(config.google_api_key.clone(), &profile.tts_voice)
            .with_base_url(&config.tts_base_url)
            .with_http_client(http),
    );

    tracing::info!(
        profile = %profile.id,
        model = %profile.model,
        voice = %profile.tts_voice,
        chat = model.is_some(),
        speech = speech.is_available(),
        "concierge ready"
    );

    let agent = Arc::new(ConciergeAgent::new(
        model,
        ToolDispatcher::new(Arc::clone(&floor_service)),
        profile,
    ));

    // Build application state
    let app_state = AppState {
        floor: floor_service,
        agent,
        speech,
        event_bus,
        metrics: Arc::new(HttpMetrics::new()?),
    };

    // Build router
    tracing::info!(dir = %config.static_dir.display(), "serving browser client");
    let app = Router::new()
        .merge(api::build_router(&app_state))
        .route("/ws", get(ws_handler))
        .fallback_service(api::static_files(&config.static_dir));

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::docs::ApiDoc::openapi()),
        )
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
