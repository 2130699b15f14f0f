use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder,
    key_extractor::SmartIpKeyExtractor,
    GovernorLayer,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod entities;
pub mod error;
pub mod models;
pub mod mutations;
pub mod query;
pub mod reports;
pub mod routes;
pub mod store;

use error::AppError;
use routes::{reports as report_routes, startups as startup_routes};
use store::StartupStore;

/// Shared by every handler; cloning is cheap.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: StartupStore,
    /// Search results returned when the caller gives no `limit`.
    pub search_limit: u64,
}

impl AppState {
    pub fn new(store: StartupStore, search_limit: u64) -> Self {
        Self { store, search_limit }
    }
}

/// Health check endpoint, reports whether the store answers.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String),
        (status = 503, description = "Store unreachable", body = String)
    )
)]
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "Service is healthy"),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Store unreachable")
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "StartupLens API",
        version = "0.1.0",
        description = "Search, edit and chart startup funding records"
    ),
    paths(
        health_check,
        startup_routes::search_startups,
        startup_routes::get_startup,
        startup_routes::create_startup,
        startup_routes::update_startup,
        startup_routes::delete_startup,
        startup_routes::list_industries,
        startup_routes::list_countries,
        report_routes::summary,
        report_routes::funding_by_industry,
        report_routes::funding_by_year,
        report_routes::funding_by_country,
        report_routes::rounds_by_type
    ),
    components(schemas(
        models::StartupRecord,
        models::FundingRound,
        models::NewStartup,
        models::NewFundingRound,
        models::UpdateStartup,
        models::DeleteStartup,
        models::ReportRow,
        models::Summary,
        entities::Status,
        startup_routes::SearchResponse,
        startup_routes::MutationResponse,
        startup_routes::OptionsResponse,
        report_routes::ReportResponse
    ))
)]
struct ApiDoc;

fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/startups",
            get(startup_routes::search_startups).post(startup_routes::create_startup),
        )
        .route(
            "/startups/{id}",
            get(startup_routes::get_startup)
                .patch(startup_routes::update_startup)
                .delete(startup_routes::delete_startup),
        )
        .route("/options/industries", get(startup_routes::list_industries))
        .route("/options/countries", get(startup_routes::list_countries))
        .route("/reports/summary", get(report_routes::summary))
        .route("/reports/funding-by-industry", get(report_routes::funding_by_industry))
        .route("/reports/funding-by-year", get(report_routes::funding_by_year))
        .route("/reports/funding-by-country", get(report_routes::funding_by_country))
        .route("/reports/rounds-by-type", get(report_routes::rounds_by_type))
        .with_state(state)
}

fn finish(api_routes: Router) -> Router {
    let docs_router = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(api_routes)
        .merge(docs_router)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Create the application with all routes and middleware, without rate limiting.
pub fn create_app(state: AppState) -> Router {
    finish(api_routes(state))
}

/// Same as [`create_app`], with per-IP rate limiting on the API routes (not the docs).
///
/// The server must be started with connect info so the client IP can be extracted.
pub fn create_rate_limited_app(state: AppState, per_minute: u32) -> Result<Router, AppError> {
    if per_minute == 0 {
        return Ok(create_app(state));
    }

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .period(Duration::from_secs(60) / per_minute)
            .burst_size(per_minute.min(20))
            .finish()
            .ok_or_else(|| AppError::Internal("invalid rate limit configuration".to_string()))?,
    );

    let limited = api_routes(state).layer(GovernorLayer {
        config: governor_conf,
    });
    Ok(finish(limited))
}
