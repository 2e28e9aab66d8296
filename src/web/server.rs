// file: src/web/server.rs
// description: axum router construction and server lifecycle
// reference: https://docs.rs/axum/latest/axum/fn.serve.html

use crate::error::Result;
use crate::pipeline::DiagnosisSession;
use crate::web::handlers;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub fn router(session: Arc<DiagnosisSession>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/embed", post(handlers::embed))
        .route("/query", post(handlers::query))
        .route("/api/query", post(handlers::api_query))
        .route("/health", get(handlers::health))
        .with_state(session)
}

pub async fn serve(session: Arc<DiagnosisSession>) -> Result<()> {
    let server = &session.config().server;
    let address = format!("{}:{}", server.host, server.port);

    let listener = TcpListener::bind(&address).await?;
    info!("Symptom advisor listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(Arc::clone(&session)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
