//! TechFunding Backend
//!
//! A production-grade REST backend for the TechFunding crowdfunding &
//! marketplace application, with SQLite persistence and a cancellable
//! simulated payment settlement flow.

mod api;
mod catalog;
mod config;
mod db;
mod errors;
mod flow;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{CatalogStore, Repository};
use flow::FlowManager;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub flow: FlowManager,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TechFunding Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Settlement delay: {}ms", config.settle_delay_ms);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Repository::new(pool);

    // Seed the sample catalog into a fresh database
    if config.seed_sample_data {
        match db::seed_sample_data(&repo).await {
            Ok(true) => tracing::info!("Sample catalog seeded"),
            Ok(false) => tracing::debug!("Catalog already populated, seed skipped"),
            Err(e) => tracing::warn!("Failed to seed sample catalog: {}", e),
        }
    }

    let store: Arc<dyn CatalogStore> = Arc::new(repo);
    let flow = FlowManager::new(store.clone(), config.settle_delay());

    // Create application state
    let state = AppState { store, flow };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Categories
        .route("/categories", get(api::list_categories))
        .route("/categories/{id}", get(api::get_category))
        // Projects
        .route("/projects", get(api::list_projects))
        .route("/projects", post(api::create_project))
        .route("/projects/{id}", get(api::get_project))
        .route("/projects/{id}/fundings", post(api::begin_funding))
        .route("/projects/{id}/qna", get(api::list_questions))
        .route("/projects/{id}/qna", post(api::create_question))
        // Products
        .route("/products", get(api::list_products))
        .route("/products", post(api::create_product))
        .route("/products/{id}", get(api::get_product))
        .route("/products/{id}/purchases", post(api::create_purchase))
        .route("/products/{id}/reviews", get(api::list_reviews))
        .route("/products/{id}/reviews", post(api::create_review))
        // Funding flow
        .route("/fundings/{id}", get(api::get_funding))
        .route("/fundings/{id}/confirm", post(api::confirm_funding))
        .route("/fundings/{id}/cancel", post(api::cancel_funding))
        .route("/fundings/{id}/dismiss", post(api::dismiss_funding))
        // Purchases
        .route("/purchases/{id}", get(api::get_purchase))
        // QnA threads
        .route("/qna/{id}", get(api::get_question))
        .route("/qna/{id}/answers", post(api::create_answer));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
