use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{funding_round, startup, Status};
use crate::error::AppError;

/// One startup together with its funding history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StartupRecord {
    /// System-assigned identifier
    pub id: Uuid,
    pub name: String,
    /// Industry, lower-cased (e.g. "ai", "fintech")
    pub industry: String,
    /// Country code, upper-cased (e.g. "USA", "GBR")
    pub country: String,
    pub founded_year: i32,
    pub status: Status,
    pub founders: Vec<String>,
    /// Funding rounds in the order they were added
    pub funding_rounds: Vec<FundingRound>,
    pub created_at: DateTime<Utc>,
}

impl StartupRecord {
    pub(crate) fn from_models(
        startup: startup::Model,
        mut rounds: Vec<funding_round::Model>,
    ) -> Result<Self, AppError> {
        rounds.sort_by_key(|round| round.position);
        let funding_rounds = rounds
            .into_iter()
            .map(FundingRound::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: startup.id,
            name: startup.name,
            industry: startup.industry,
            country: startup.country,
            founded_year: startup.founded_year,
            status: startup.status,
            founders: serde_json::from_value(startup.founders)?,
            funding_rounds,
            created_at: startup.created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FundingRound {
    /// Round label, e.g. "Seed", "Series A"
    pub round_type: String,
    /// Amount raised in USD
    pub amount: f64,
    pub date: NaiveDate,
    /// Post-money valuation in USD, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuation: Option<f64>,
    #[serde(default)]
    pub investors: Vec<String>,
}

impl TryFrom<funding_round::Model> for FundingRound {
    type Error = AppError;

    fn try_from(model: funding_round::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            round_type: model.round_type,
            amount: model.amount,
            date: model.date,
            valuation: model.valuation,
            investors: serde_json::from_value(model.investors)?,
        })
    }
}

/// Validated input for a new record, ready to be written.
#[derive(Clone, Debug, PartialEq)]
pub struct StartupDraft {
    pub name: String,
    pub industry: String,
    pub country: String,
    pub founded_year: i32,
    pub status: Status,
    pub founders: Vec<String>,
    pub initial_round: Option<FundingRound>,
}

/// Changes applied to one existing record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StartupMutation {
    pub status: Option<Status>,
    pub append_round: Option<FundingRound>,
}

impl StartupMutation {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.append_round.is_none()
    }
}

/// Request body for adding a startup
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct NewStartup {
    pub name: String,
    pub industry: String,
    pub country: String,
    pub founded_year: i32,
    pub status: Status,
    #[serde(default)]
    pub founders: Vec<String>,
    /// Optional first round; ignored unless it has a round type and a positive amount
    #[serde(default)]
    pub initial_round: Option<NewFundingRound>,
}

/// Funding round fields as submitted by a form
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct NewFundingRound {
    pub round_type: String,
    pub amount: f64,
    /// Defaults to today (UTC)
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Must be positive when given
    #[serde(default)]
    pub valuation: Option<f64>,
    #[serde(default)]
    pub investors: Vec<String>,
}

/// Request body for updating a startup
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateStartup {
    /// New status
    #[serde(default)]
    pub status: Option<Status>,
    /// Round to append to the funding history
    #[serde(default)]
    pub new_round: Option<NewFundingRound>,
}

/// Request body for deleting a startup
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteStartup {
    /// Must equal the stored name exactly
    pub confirm_name: String,
}

/// One bar/slice of a chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportRow {
    pub key: String,
    pub value: f64,
}

impl ReportRow {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Headline numbers for the dashboard
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Summary {
    pub total_startups: u64,
    /// Sum of every funding round, USD
    pub total_funding: f64,
    /// Number of distinct industries
    pub industries: usize,
    /// Number of distinct countries
    pub countries: usize,
}
