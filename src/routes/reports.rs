use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::models::{ReportRow, Summary};
use crate::reports;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    /// Chart title
    pub title: String,
    /// (key, value) pairs in display order
    pub rows: Vec<ReportRow>,
}

impl ReportResponse {
    fn new(title: &str, rows: Vec<ReportRow>) -> Json<Self> {
        Json(Self {
            title: title.to_string(),
            rows,
        })
    }
}

/// Dashboard metrics
#[utoipa::path(
    get,
    path = "/reports/summary",
    responses((status = 200, description = "Totals across the store", body = Summary))
)]
pub async fn summary(State(state): State<AppState>) -> Result<Json<Summary>, AppError> {
    Ok(Json(reports::summary(&state.store).await?))
}

/// Top 10 industries by total funding
#[utoipa::path(
    get,
    path = "/reports/funding-by-industry",
    responses((status = 200, description = "Totals in USD, largest first", body = ReportResponse))
)]
pub async fn funding_by_industry(
    State(state): State<AppState>,
) -> Result<Json<ReportResponse>, AppError> {
    let rows = reports::funding_by_industry(&state.store).await?;
    Ok(ReportResponse::new("Top 10 Industries by Total Funding", rows))
}

/// Total funding per year
#[utoipa::path(
    get,
    path = "/reports/funding-by-year",
    responses((status = 200, description = "Totals in USD, oldest year first", body = ReportResponse))
)]
pub async fn funding_by_year(
    State(state): State<AppState>,
) -> Result<Json<ReportResponse>, AppError> {
    let rows = reports::funding_by_year(&state.store).await?;
    Ok(ReportResponse::new("Total Funding Over Time", rows))
}

/// Top 10 countries by total funding
#[utoipa::path(
    get,
    path = "/reports/funding-by-country",
    responses((status = 200, description = "Totals in USD, largest first", body = ReportResponse))
)]
pub async fn funding_by_country(
    State(state): State<AppState>,
) -> Result<Json<ReportResponse>, AppError> {
    let rows = reports::funding_by_country(&state.store).await?;
    Ok(ReportResponse::new("Top Countries by Total Funding", rows))
}

/// Number of funding rounds per round type
#[utoipa::path(
    get,
    path = "/reports/rounds-by-type",
    responses((status = 200, description = "Round counts, most common first", body = ReportResponse))
)]
pub async fn rounds_by_type(
    State(state): State<AppState>,
) -> Result<Json<ReportResponse>, AppError> {
    let rows = reports::rounds_by_type(&state.store).await?;
    Ok(ReportResponse::new("Distribution of Funding Round Types", rows))
}
