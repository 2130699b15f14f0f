use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{DeleteStartup, NewStartup, StartupRecord, UpdateStartup};
use crate::mutations;
use crate::query::StartupFilter;
use crate::routes::JsonBody;
use crate::AppState;

/// Hard cap on `limit`, whatever the caller asks for.
pub const MAX_SEARCH_LIMIT: u64 = 500;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the startup name
    #[serde(default)]
    name: Option<String>,
    /// Exact industry; "All" or empty for any
    #[serde(default)]
    industry: Option<String>,
    /// Exact country code; "All" or empty for any
    #[serde(default)]
    country: Option<String>,
    /// Optional: maximum number of results. Defaults to the configured search limit.
    #[serde(default)]
    #[param(required = false)]
    limit: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    /// Number of startups returned
    pub count: usize,
    pub startups: Vec<StartupRecord>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
    /// Identifier of the created startup (insert only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OptionsResponse {
    /// Distinct values present in the store, sorted
    pub values: Vec<String>,
}

/// Search startups by name, industry and country
#[utoipa::path(
    get,
    path = "/startups",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching startups in insertion order", body = SearchResponse),
        (status = 503, description = "Store unavailable")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn search_startups(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let limit = query
        .limit
        .unwrap_or(state.search_limit)
        .clamp(1, MAX_SEARCH_LIMIT);
    let filter = StartupFilter {
        name: query.name,
        industry: query.industry,
        country: query.country,
    };

    let startups = state.store.find_limited(&filter, Some(limit)).await?;
    tracing::info!("Found {} startups", startups.len());

    Ok(Json(SearchResponse {
        count: startups.len(),
        startups,
    }))
}

/// Fetch one startup
#[utoipa::path(
    get,
    path = "/startups/{id}",
    params(("id" = Uuid, Path, description = "Startup identifier")),
    responses(
        (status = 200, description = "The startup", body = StartupRecord),
        (status = 404, description = "No startup with this identifier")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_startup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StartupRecord>, AppError> {
    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("startup {id}")))
}

/// Add a startup
#[utoipa::path(
    post,
    path = "/startups",
    request_body = NewStartup,
    responses(
        (status = 201, description = "Startup added", body = MutationResponse),
        (status = 400, description = "Missing, malformed or out-of-range fields"),
        (status = 503, description = "Store unavailable")
    )
)]
#[tracing::instrument(skip(state, input))]
pub async fn create_startup(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewStartup>,
) -> Result<impl IntoResponse, AppError> {
    let name = input.name.trim().to_string();
    let id = mutations::create_startup(&state.store, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            success: true,
            message: format!("Successfully added startup: {name}"),
            id: Some(id),
        }),
    ))
}

/// Update a startup's status and/or append a funding round
#[utoipa::path(
    patch,
    path = "/startups/{id}",
    params(("id" = Uuid, Path, description = "Startup identifier")),
    request_body = UpdateStartup,
    responses(
        (status = 200, description = "Startup updated", body = MutationResponse),
        (status = 400, description = "Nothing to update or invalid round"),
        (status = 404, description = "No startup with this identifier")
    )
)]
#[tracing::instrument(skip(state, input))]
pub async fn update_startup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(input): JsonBody<UpdateStartup>,
) -> Result<Json<MutationResponse>, AppError> {
    let applied = mutations::update_startup(&state.store, id, input).await?;

    let mut changes = Vec::new();
    if let Some(status) = applied.status {
        changes.push(format!("Status updated to: {status}"));
    }
    if let Some(round) = applied.append_round {
        changes.push(format!("Added {} round of ${:.0}", round.round_type, round.amount));
    }

    Ok(Json(MutationResponse {
        success: true,
        message: changes.join("; "),
        id: None,
    }))
}

/// Delete a startup after confirming its name
#[utoipa::path(
    delete,
    path = "/startups/{id}",
    params(("id" = Uuid, Path, description = "Startup identifier")),
    request_body = DeleteStartup,
    responses(
        (status = 200, description = "Startup deleted", body = MutationResponse),
        (status = 404, description = "No startup with this identifier"),
        (status = 409, description = "Confirmation name does not match")
    )
)]
#[tracing::instrument(skip(state, input))]
pub async fn delete_startup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(input): JsonBody<DeleteStartup>,
) -> Result<Json<MutationResponse>, AppError> {
    let name = mutations::delete_startup(&state.store, id, &input.confirm_name).await?;

    Ok(Json(MutationResponse {
        success: true,
        message: format!("Successfully deleted: {name}"),
        id: None,
    }))
}

/// Industries available for filtering
#[utoipa::path(
    get,
    path = "/options/industries",
    responses((status = 200, description = "Distinct industries", body = OptionsResponse))
)]
pub async fn list_industries(
    State(state): State<AppState>,
) -> Result<Json<OptionsResponse>, AppError> {
    let values = state.store.distinct_industries().await?;
    Ok(Json(OptionsResponse { values }))
}

/// Countries available for filtering
#[utoipa::path(
    get,
    path = "/options/countries",
    responses((status = 200, description = "Distinct country codes", body = OptionsResponse))
)]
pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<OptionsResponse>, AppError> {
    let values = state.store.distinct_countries().await?;
    Ok(Json(OptionsResponse { values }))
}
