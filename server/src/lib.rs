//! HTTP front end for the todo service.
//!
//! # Overview
//! One resource endpoint, `/todos`, multiplexed by verb (GET read, POST
//! create, PUT update, DELETE delete) plus a store-independent `/healthz`.
//! Handlers only decode, validate and map; all persistence goes through
//! `todo_core::TodoService`.
//!
//! # Design
//! - Request state is the cloned `TodoService`; nothing else is shared.
//! - A request timeout drops the handler future, and with it any in-flight
//!   store call, then answers 408.
//! - Error responses carry a status code and no body.

pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod model;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use todo_core::TodoService;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use error::{ApiError, Error, Result};

pub fn app(service: TodoService, config: &ServerConfig) -> Router {
    Router::new()
        .route("/healthz", get(handler::healthz))
        .route(
            "/todos",
            get(handler::read_todos)
                .post(handler::create_todo)
                .put(handler::update_todo)
                .delete(handler::delete_todos),
        )
        .with_state(service)
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

/// Serve until Ctrl-C or SIGTERM.
pub async fn run(
    listener: TcpListener,
    service: TodoService,
    config: &ServerConfig,
) -> Result<()> {
    axum::serve(listener, app(service, config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
