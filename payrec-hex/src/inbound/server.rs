//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use payrec_types::PaymentRecordRepository;

use super::handlers::{self, AppState};
use crate::PaymentRecordService;

/// HTTP Server for the payment record API.
pub struct HttpServer<R: PaymentRecordRepository> {
    state: Arc<AppState<R>>,
}

impl<R: PaymentRecordRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: PaymentRecordService<R>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes, without the metrics layer.
    pub fn routes(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route(
                "/payments",
                get(handlers::list_payments::<R>).post(handlers::create_payment::<R>),
            )
            .route(
                "/payments/{id}",
                get(handlers::get_payment::<R>)
                    .put(handlers::update_payment::<R>)
                    .delete(handlers::delete_payment::<R>),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Builds the full router, including HTTP metrics.
    pub fn router(&self) -> Router {
        // Uses the globally set MeterProvider
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();
        self.routes().layer(metrics)
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
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
                tracing::error!("failed to install SIGTERM handler: {e}");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
