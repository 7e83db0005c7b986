//! Application startup and lifecycle management.

use crate::config::Config;
use crate::handlers;
use crate::middleware::metrics_middleware;
use crate::services::{MongoProductStore, ProductStore};
use axum::{
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use mongodb::{options::ClientOptions, Client};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/api/v1/product/new", post(handlers::create_product))
        .route("/api/v1/product", get(handlers::list_products))
        .route(
            "/api/v1/product/:id",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    db: mongodb::Database,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// An unreachable store is logged, not fatal: the service keeps serving
    /// and each request fails against the store until it comes up.
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let mut client_options = ClientOptions::parse(&config.mongodb.uri).await?;
        client_options.app_name = Some("product-service".to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.mongodb.database);

        let store = MongoProductStore::new(&db);
        match store.ping().await {
            Ok(()) => tracing::info!(database = %config.mongodb.database, "Connected to MongoDB"),
            Err(e) => tracing::error!(
                error = %e,
                "MongoDB ping failed; store operations will error until it is reachable"
            ),
        }

        let state = AppState {
            store: Arc::new(store),
        };

        let router = build_router(state);

        // Port 0 binds an ephemeral port for tests.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            anyhow::Error::new(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
            db,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &mongodb::Database {
        &self.db
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        tracing::info!("Listening on port {}", self.port);
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }
}
