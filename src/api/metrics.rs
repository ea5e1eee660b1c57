//! Prometheus request metrics.
//!
//! [`track_metrics`] is installed as a route layer, so the `path` label is
//! the matched route template (`/api/tables/{id}`), not the raw URI.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

const LABELS: [&str; 3] = ["method", "path", "status"];
const DURATION_BUCKETS: [f64; 8] = [0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0];

/// Request counter and latency histogram, labelled by method, path and
/// status.
pub struct HttpMetrics {
    registry: Registry,
    requests: IntCounterVec,
    duration: HistogramVec,
}

impl std::fmt::Debug for HttpMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMetrics").finish_non_exhaustive()
    }
}

impl HttpMetrics {
    /// Creates the collectors in a private registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a collector definition is rejected by the
    /// registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new("concierge_request_total", "Total HTTP requests"),
            &LABELS,
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new(
                "concierge_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &LABELS,
        )?;
        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        Ok(Self {
            registry,
            requests,
            duration,
        })
    }

    /// Records one finished request.
    pub fn observe(&self, method: &str, path: &str, status: u16, seconds: f64) {
        let status = status.to_string();
        let labels = [method, path, status.as_str()];
        self.requests.with_label_values(&labels).inc();
        self.duration.with_label_values(&labels).observe(seconds);
    }

    /// Renders all metrics in the Prometheus text format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}

/// Middleware recording method, matched path, status and duration of
/// every routed request.
pub async fn track_metrics(
    State(metrics): State<Arc<HttpMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_string(), |p| p.as_str().to_string());
    let start = Instant::now();

    let response = next.run(req).await;

    metrics.observe(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn observe_renders_counter_and_histogram() {
        let Ok(metrics) = HttpMetrics::new() else {
            panic!("collectors should register");
        };
        metrics.observe("POST", "/api/chat", 200, 0.3);
        metrics.observe("POST", "/api/chat", 200, 0.7);
        let Ok(text) = metrics.render() else {
            panic!("render failed");
        };
        assert!(text.contains(
            r#"concierge_request_total{method="POST",path="/api/chat",status="200"} 2"#
        ));
        assert!(text.contains(
            r#"concierge_request_duration_seconds_bucket{method="POST",path="/api/chat",status="200",le="0.5"} 1"#
        ));
    }
}
