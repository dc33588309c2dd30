//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_venue_routes, health_routes};
use crate::config::{ServiceConfig, StoreBackend};
use crate::core::service::{VenueService, VenueStore};
use crate::storage::InMemoryVenueStore;
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the venue HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryVenueStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn VenueStore>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
        }
    }

    /// Set the venue store (required)
    pub fn with_store(mut self, store: impl VenueStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Open the store selected by the configuration
    pub async fn with_configured_store(self, config: &ServiceConfig) -> Result<Self> {
        match config.store.backend {
            StoreBackend::InMemory => {
                tracing::info!("Using in-memory venue store");
                Ok(self.with_store(InMemoryVenueStore::new()))
            }
            #[cfg(feature = "mongodb_backend")]
            StoreBackend::Mongodb => {
                let store = crate::storage::MongoVenueStore::connect(
                    &config.store.uri,
                    &config.store.database,
                    &config.store.collection,
                )
                .await?;
                Ok(self.with_store(store))
            }
            #[cfg(not(feature = "mongodb_backend"))]
            StoreBackend::Mongodb => Err(anyhow!(
                "MongoDB backend requested but the mongodb_backend feature is disabled"
            )),
        }
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let store = self
            .store
            .ok_or_else(|| anyhow!("Venue store is required"))?;

        let state = AppState {
            venues: VenueService::from_arc(store),
        };

        let app = health_routes().merge(build_venue_routes(state));

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
