// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP server for health probes and Prometheus metrics.
//!
//! Endpoints:
//! - `/healthz` - Liveness probe (always 200 while the process serves)
//! - `/readyz` - Readiness probe, 200 when a cycle succeeded recently, 503 otherwise
//! - `/metrics` - Prometheus metrics in text format

use crate::constants::{HEALTHZ_PATH, HEALTH_SERVER_BIND_ADDRESS, METRICS_SERVER_PATH, READYZ_PATH};
use crate::health::HealthState;
use crate::metrics::gather_metrics;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Build the router serving the probe and metrics endpoints.
pub fn router(health: Arc<HealthState>) -> Router {
    Router::new()
        .route(HEALTHZ_PATH, get(healthz_handler))
        .route(READYZ_PATH, get(readyz_handler))
        .route(METRICS_SERVER_PATH, get(metrics_handler))
        .with_state(health)
}

/// Bind `0.0.0.0:<port>`.
///
/// # Errors
///
/// Returns an error if the port cannot be bound.
pub async fn bind(port: u16) -> anyhow::Result<TcpListener> {
    let addr = format!("{HEALTH_SERVER_BIND_ADDRESS}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("Health and metrics server listening on {}", addr);
    Ok(listener)
}

/// Serve on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn serve<F>(
    listener: TcpListener,
    health: Arc<HealthState>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(health))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn healthz_handler() -> impl IntoResponse {
    StatusCode::OK
}

async fn readyz_handler(State(health): State<Arc<HealthState>>) -> impl IntoResponse {
    let status = if health.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health.snapshot()))
}

async fn metrics_handler() -> impl IntoResponse {
    match gather_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        ),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                format!("Failed to encode metrics: {e}"),
            )
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod server_tests;
