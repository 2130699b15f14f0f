//! Chart-ready aggregations over funding rounds.
//!
//! Each report unwinds funding rounds (one row per round, joined to its startup),
//! groups them by a key and reduces with a sum or a count. Equal values are
//! ordered by key so chart output is stable between runs.

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryOrder, QuerySelect, RelationTrait,
};

use crate::entities::{funding_round, startup};
use crate::error::AppError;
use crate::models::{ReportRow, Summary};
use crate::store::StartupStore;

/// Bars shown on the ranked charts.
pub const TOP_N: u64 = 10;

/// Year of the round date; dates are stored as `YYYY-MM-DD`.
const ROUND_YEAR_SQL: &str = r#"SUBSTR(CAST("funding_rounds"."date" AS TEXT), 1, 4)"#;

enum Ranking {
    /// Largest totals first, truncated.
    TopByValue(u64),
    /// Ascending by key, full range.
    ByKey,
}

/// Total funding per industry, largest first, top 10.
#[tracing::instrument(skip(store))]
pub async fn funding_by_industry(store: &StartupStore) -> Result<Vec<ReportRow>, AppError> {
    let key = Expr::col((startup::Entity, startup::Column::Industry)).into();
    funding_totals(store.connection(), key, Ranking::TopByValue(TOP_N)).await
}

/// Total funding per round year, oldest first.
#[tracing::instrument(skip(store))]
pub async fn funding_by_year(store: &StartupStore) -> Result<Vec<ReportRow>, AppError> {
    funding_totals(store.connection(), Expr::cust(ROUND_YEAR_SQL), Ranking::ByKey).await
}

/// Total funding per country, largest first, top 10.
#[tracing::instrument(skip(store))]
pub async fn funding_by_country(store: &StartupStore) -> Result<Vec<ReportRow>, AppError> {
    let key = Expr::col((startup::Entity, startup::Column::Country)).into();
    funding_totals(store.connection(), key, Ranking::TopByValue(TOP_N)).await
}

/// Number of rounds per round type (case-folded), most common first.
#[tracing::instrument(skip(store))]
pub async fn rounds_by_type(store: &StartupStore) -> Result<Vec<ReportRow>, AppError> {
    let key: SimpleExpr =
        Func::lower(Expr::col((funding_round::Entity, funding_round::Column::RoundType))).into();
    let count = funding_round::Column::Id.count();

    let rows: Vec<(String, i64)> = funding_round::Entity::find()
        .select_only()
        .column_as(key.clone(), "key")
        .column_as(count.clone(), "value")
        .group_by(key.clone())
        .order_by_desc(count)
        .order_by_asc(key)
        .into_tuple()
        .all(store.connection())
        .await?;

    Ok(rows
        .into_iter()
        .map(|(key, count)| ReportRow::new(key, count as f64))
        .collect())
}

/// Dashboard headline metrics.
#[tracing::instrument(skip(store))]
pub async fn summary(store: &StartupStore) -> Result<Summary, AppError> {
    let total_funding: Option<Option<f64>> = funding_round::Entity::find()
        .select_only()
        .column_as(funding_round::Column::Amount.sum(), "total")
        .into_tuple()
        .one(store.connection())
        .await?;

    Ok(Summary {
        total_startups: store.count().await?,
        total_funding: total_funding.flatten().unwrap_or(0.0),
        industries: store.distinct_industries().await?.len(),
        countries: store.distinct_countries().await?.len(),
    })
}

async fn funding_totals(
    db: &DatabaseConnection,
    key: SimpleExpr,
    ranking: Ranking,
) -> Result<Vec<ReportRow>, AppError> {
    let total = funding_round::Column::Amount.sum();

    let select = funding_round::Entity::find()
        .select_only()
        .column_as(key.clone(), "key")
        .column_as(total.clone(), "value")
        .join(JoinType::InnerJoin, funding_round::Relation::Startup.def())
        .group_by(key.clone());

    let select = match ranking {
        Ranking::TopByValue(limit) => select.order_by_desc(total).order_by_asc(key).limit(limit),
        Ranking::ByKey => select.order_by_asc(key),
    };

    let rows: Vec<(String, f64)> = select.into_tuple().all(db).await?;
    tracing::debug!("report produced {} rows", rows.len());

    Ok(rows
        .into_iter()
        .map(|(key, total)| ReportRow::new(key, total))
        .collect())
}
