/// Missionsync API - HTTP API Lambda
///
/// Serves the reconciled mission view and triggers folder metadata
/// collection and SharePoint-to-S3 transfers.
pub mod api;
pub mod context;
pub mod error;
pub mod middleware;

pub use context::ApiContext;
pub use error::ApiError;

use axum::{
    Router,
    body::Body as AxumBody,
    http::{Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use lambda_http::{Body, Error as LambdaError, Request, Response};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Builds the application router
pub fn router(ctx: Arc<ApiContext>) -> Router {
    let v1_router = Router::new()
        .route("/health", get(api::health::handler))
        .route("/missions", get(api::missions::list))
        .route("/missions/metadata", post(api::missions::collect_metadata))
        .route(
            "/videos/{video_id}/transcripts/{transcript_id}",
            post(api::transfer::transfer),
        );

    Router::new()
        .nest("/v1", v1_router)
        // Add observability middleware (logging + metrics)
        .route_layer(axum_middleware::from_fn(middleware::logging_middleware))
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&ctx),
            middleware::metrics_middleware,
        ))
        // Add CORS middleware allowing all origins
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .with_state(ctx)
}

/// Main API handler - converts Lambda HTTP request to Axum router
pub async fn handler(ctx: Arc<ApiContext>, event: Request) -> Result<Response<Body>, LambdaError> {
    info!("Processing API request: {} {}", event.method(), event.uri().path());

    let app = router(ctx);

    // Convert Lambda HTTP request to Axum request
    let (parts, body) = event.into_parts();
    let axum_request = http::Request::from_parts(parts, AxumBody::from(body.to_vec()));

    match app.oneshot(axum_request).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();

            // Convert Axum response body to Lambda response body
            let body_bytes = axum::body::to_bytes(body, usize::MAX)
                .await
                .unwrap_or_default();

            Ok(Response::from_parts(parts, Body::from(body_bytes.to_vec())))
        }
        Err(err) => {
            error!("Axum router error: {}", err);
            let response = Response::builder().status(500).body(Body::from(
                serde_json::json!({
                    "error": "Internal server error"
                })
                .to_string(),
            ))?;
            Ok(response)
        }
    }
}
