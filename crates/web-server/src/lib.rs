use axum::{Router, routing::get};
use configuration::settings::Settings;
use database::ClimateRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub repo: ClimateRepository,
}

/// Builds the router with every API route and the HTTP middleware.
///
/// The static `/api/v1.0/*` routes take priority over the `:start_date` captures.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([axum::http::Method::GET])
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/v1.0/precipitation", get(handlers::get_precipitation))
        .route("/api/v1.0/stations", get(handlers::get_stations))
        .route("/api/v1.0/tobs", get(handlers::get_tobs))
        .route("/api/v1.0/:start_date", get(handlers::get_temperature_stats_from))
        .route(
            "/api/v1.0/:start_date/:end_date",
            get(handlers::get_temperature_stats_between),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialized by the caller. Start-up fails if the
/// database file is missing or its schema does not match the record types.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;

    let pool = database::connect(&settings.database).await?;
    database::verify_schema(&pool).await?;
    let repo = ClimateRepository::new(pool.clone());

    let app = app(Arc::new(AppState { repo }));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Web server stopped.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
}
