//! Lingap Server - Blood Bank Management System
//!
//! A REST API server for blood bank management.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lingap_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("lingap_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lingap Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        .route("/auth/profile", put(api::auth::update_profile))
        // Donors
        .route("/donors", get(api::donors::list_donors))
        .route("/donors", post(api::donors::create_donor))
        .route("/donors/me", get(api::donors::get_own_profile))
        .route("/donors/me", post(api::donors::create_own_profile))
        .route("/donors/me/history", get(api::donors::get_own_history))
        .route("/donors/:id", get(api::donors::get_donor))
        .route("/donors/:id", put(api::donors::update_donor))
        .route("/donors/:id", delete(api::donors::delete_donor))
        // Campaigns
        .route("/campaigns", get(api::campaigns::list_campaigns))
        .route("/campaigns", post(api::campaigns::create_campaign))
        .route("/campaigns/:id", get(api::campaigns::get_campaign))
        .route("/campaigns/:id", put(api::campaigns::update_campaign))
        .route("/campaigns/:id", delete(api::campaigns::delete_campaign))
        .route("/campaigns/:id/join", post(api::campaigns::join_campaign))
        .route(
            "/campaigns/:id/donors/:donor_id/donations",
            post(api::campaigns::record_donation),
        )
        // Inventory
        .route("/inventory", get(api::inventory::list_units))
        .route("/inventory", post(api::inventory::create_unit))
        .route("/inventory/:id", get(api::inventory::get_unit))
        .route("/inventory/:id", put(api::inventory::update_unit))
        .route("/inventory/:id", delete(api::inventory::delete_unit))
        // Requests
        .route("/requests", get(api::requests::list_requests))
        .route("/requests", post(api::requests::create_request))
        .route("/requests/:id", get(api::requests::get_request))
        .route(
            "/requests/:id/candidate-units",
            get(api::requests::candidate_units),
        )
        .route(
            "/requests/:id/disposition",
            put(api::requests::dispose_request),
        )
        // Volunteers
        .route("/volunteers", get(api::volunteers::list_volunteers))
        .route("/volunteers", post(api::volunteers::create_volunteer))
        .route("/volunteers/:id", put(api::volunteers::update_volunteer))
        .route("/volunteers/:id", delete(api::volunteers::delete_volunteer))
        // Statistics
        .route("/stats", get(api::stats::dashboard))
        .route("/stats/admin", get(api::stats::admin_dashboard))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
