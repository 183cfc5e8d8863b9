//! Response bookkeeping.
//!
//! # Responsibilities
//! - Record status and latency for every routed response
//! - Answer liveness probes
//!
//! # Design Decisions
//! - Metrics are labelled by the matched route pattern, never the raw URI,
//!   to keep label cardinality bounded

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

/// Middleware recording request count and duration per route.
pub async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;

    metrics::record_request(&route, response.status().as_u16(), start);
    response
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
