/// Request metrics middleware
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use missionsync_core::services::metrics::MetricUnit;
use std::sync::Arc;
use std::time::Instant;

use crate::context::ApiContext;

/// Emits request count, response time and error count per endpoint.
///
/// The endpoint dimension uses the route template so path ids do not
/// create one metric series per item.
pub async fn metrics_middleware(
    State(ctx): State<Arc<ApiContext>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let endpoint = format!("{} {}", request.method(), path);

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status().as_u16().to_string();
    let dimensions = [("Endpoint", endpoint.as_str()), ("StatusCode", status.as_str())];

    ctx.metrics
        .record_counter("RequestCount", 1.0, &dimensions)
        .await;
    ctx.metrics
        .record_histogram(
            "ResponseTime",
            duration.as_millis() as f64,
            MetricUnit::Milliseconds,
            &dimensions,
        )
        .await;

    if response.status().is_client_error() || response.status().is_server_error() {
        ctx.metrics
            .record_counter("ErrorCount", 1.0, &dimensions)
            .await;
    }

    response
}
