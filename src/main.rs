//! Athenaeum Server - Campus Library Management System
//!
//! A Rust REST API server for library accounts, catalog, reservations,
//! fines, and group-discussion room bookings.

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

use athenaeum_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("athenaeum_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Athenaeum Server v{}", env!("CARGO_PKG_VERSION"));

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
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

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

    let api = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/login", post(api::auth::login))
        // Students
        .route("/students/register", post(api::students::register))
        .route("/students/profile", get(api::students::get_profile))
        .route("/students/profile", put(api::students::update_profile))
        .route("/students/all", get(api::students::list_all))
        .route("/students/:id", put(api::students::update))
        .route("/students/:id", delete(api::students::delete))
        // Librarians
        .route("/librarians/register", post(api::librarians::register))
        .route("/librarians", get(api::librarians::list))
        .route("/librarians/:id", delete(api::librarians::delete))
        // Books
        .route("/books", get(api::books::list))
        .route("/books", post(api::books::create))
        .route("/books/:id", put(api::books::update))
        .route("/books/:id", delete(api::books::delete))
        // Authors and publishers
        .route("/authors", get(api::authors::list))
        .route("/authors", post(api::authors::create))
        .route("/publishers", get(api::publishers::list))
        .route("/publishers", post(api::publishers::create))
        // Reservations
        .route("/reservations", post(api::reservations::reserve))
        .route("/reservations", get(api::reservations::list_own))
        .route("/reservations/return", post(api::reservations::return_book))
        .route("/reservations/all", get(api::reservations::list_all))
        .route("/reservations/:id", delete(api::reservations::admin_delete))
        // Fines
        .route("/fines", post(api::fines::issue))
        .route("/fines", get(api::fines::list_own))
        .route("/fines/pay", post(api::fines::pay))
        .route("/fines/all", get(api::fines::list_all))
        .route("/fines/:id", delete(api::fines::delete))
        // GD rooms
        .route("/gd/rooms", get(api::gd::list_rooms))
        .route("/gd/rooms", post(api::gd::create_room))
        .route("/gd", post(api::gd::reserve))
        .route("/gd", get(api::gd::list_own))
        .route("/gd/all", get(api::gd::list_all))
        .route("/gd/:id", delete(api::gd::cancel))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
