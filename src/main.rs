use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wingstats::identity::{IdentityConfig, IdentityResolver};
use wingstats::shared::AppState;
use wingstats::storage::InMemoryTableStore;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wingstats=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting WingStats score service");

    // Identity mappings are configuration: loaded once here, immutable for
    // the process lifetime
    let identities = match std::env::var("PLAYERS_FILE") {
        Ok(path) => match IdentityConfig::from_file(&path) {
            Ok(config) => {
                info!(path = %path, registered = config.len(), "Loaded registered players");
                IdentityResolver::new(config)
            }
            Err(err) => {
                warn!(error = %err, path = %path, "Failed to load players file, starting with no registrations");
                IdentityResolver::empty()
            }
        },
        Err(_) => {
            info!("PLAYERS_FILE not set, starting with no registrations");
            IdentityResolver::empty()
        }
    };

    // In-memory table for development. For production, swap in the hosted
    // table client implementing TableStore.
    let store = Arc::new(InMemoryTableStore::new());

    let app_state = AppState::new(store, Arc::new(identities));

    let app = wingstats::router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    info!("Server running on http://{bind_addr}");
    axum::serve(listener, app).await.unwrap();
}
