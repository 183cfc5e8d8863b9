//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the fixture handlers
//! - Wire up middleware (request ID, tracing, metrics, echo timeouts)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::FixtureConfig;
use crate::fixtures;
use crate::http::request::{self, UuidRequestId, X_REQUEST_ID};
use crate::http::response;

/// HTTP server hosting the fixtures.
pub struct HttpServer {
    router: Router,
    config: FixtureConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: FixtureConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The request timeout covers the health probe and echo routes. Upload
    /// routes are bounded by the body limit only.
    #[allow(deprecated)]
    fn build_router(config: &FixtureConfig) -> Router {
        let timeout = Duration::from_secs(config.timeouts.request_secs);

        let timed = Router::new()
            .route(&config.routes.health_path, get(response::health))
            .merge(fixtures::echo_router(config))
            .layer(TimeoutLayer::new(timeout));

        timed
            .merge(fixtures::upload_router(config))
            .layer(middleware::from_fn(response::track_metrics))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(
                        |req: &Request<Body>| {
                            tracing::info_span!(
                                "request",
                                method = %req.method(),
                                uri = %req.uri(),
                                request_id = %request::request_id(req),
                            )
                        },
                    ))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upload_dir = %self.config.upload.directory,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
