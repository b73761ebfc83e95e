use sewa_rental::{
    adapters::memory::InMemoryStore,
    adapters::postgres::{PostgresBookStore, PostgresMemberStore, PostgresRentalStore},
    api::{handlers::AppState, router::create_router},
    application::ServiceDependencies,
    config::{Config, StorageBackend},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sewa_rental=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    // Initialize store adapters
    let service_deps = match config.storage {
        StorageBackend::Postgres => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await
                .expect("Failed to connect to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run migrations");

            tracing::info!("Using PostgreSQL store");
            ServiceDependencies {
                member_store: Arc::new(PostgresMemberStore::new(pool.clone())),
                book_store: Arc::new(PostgresBookStore::new(pool.clone())),
                rental_store: Arc::new(PostgresRentalStore::new(pool)),
            }
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on shutdown");
            let store = Arc::new(InMemoryStore::new());
            ServiceDependencies {
                member_store: store.clone(),
                book_store: store.clone(),
                rental_store: store,
            }
        }
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
