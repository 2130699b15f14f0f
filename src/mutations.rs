//! Insert, update and delete, with validation at the boundary.

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    FundingRound, NewFundingRound, NewStartup, StartupDraft, StartupMutation, UpdateStartup,
};
use crate::query::{normalize_country, normalize_industry};
use crate::store::StartupStore;

pub const MIN_FOUNDED_YEAR: i32 = 1900;
pub const MAX_FOUNDED_YEAR: i32 = 2030;

/// Validates and stores a new startup, returning its identifier.
#[tracing::instrument(skip(store, input), fields(name = %input.name))]
pub async fn create_startup(store: &StartupStore, input: NewStartup) -> Result<Uuid, AppError> {
    let draft = validate_new_startup(input)?;
    store.insert(draft).await
}

/// Applies a status change and/or appends a funding round.
#[tracing::instrument(skip(store, input))]
pub async fn update_startup(
    store: &StartupStore,
    id: Uuid,
    input: UpdateStartup,
) -> Result<StartupMutation, AppError> {
    let mutation = validate_update(input)?;
    store.update_one(id, mutation.clone()).await?;
    Ok(mutation)
}

/// Deletes a startup once `confirm_name` matches its stored name exactly.
#[tracing::instrument(skip(store, confirm_name))]
pub async fn delete_startup(
    store: &StartupStore,
    id: Uuid,
    confirm_name: &str,
) -> Result<String, AppError> {
    let Some(existing) = store.get(id).await? else {
        return Err(AppError::NotFound(format!("startup {id}")));
    };

    if confirm_name != existing.name {
        tracing::warn!(%id, "delete confirmation did not match stored name");
        return Err(AppError::ConfirmationMismatch(format!(
            "type \"{}\" exactly to delete this startup",
            existing.name
        )));
    }

    if !store.delete_one(id).await? {
        return Err(AppError::NotFound(format!("startup {id}")));
    }

    tracing::info!(%id, name = %existing.name, "startup deleted");
    Ok(existing.name)
}

pub fn validate_new_startup(input: NewStartup) -> Result<StartupDraft, AppError> {
    let name = input.name.trim().to_string();
    let industry = normalize_industry(&input.industry);
    let country = normalize_country(&input.country);

    let missing: Vec<&str> = [("name", &name), ("industry", &industry), ("country", &country)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    if !(MIN_FOUNDED_YEAR..=MAX_FOUNDED_YEAR).contains(&input.founded_year) {
        return Err(AppError::Validation(format!(
            "founded_year must be between {MIN_FOUNDED_YEAR} and {MAX_FOUNDED_YEAR}, got {}",
            input.founded_year
        )));
    }

    // An unfilled initial round (no type or no amount) is simply left out.
    let initial_round = match input.initial_round {
        Some(round) if !round.round_type.trim().is_empty() && round.amount > 0.0 => {
            Some(validate_round(round)?)
        }
        _ => None,
    };

    Ok(StartupDraft {
        name,
        industry,
        country,
        founded_year: input.founded_year,
        status: input.status,
        founders: clean_names(input.founders),
        initial_round,
    })
}

pub fn validate_update(input: UpdateStartup) -> Result<StartupMutation, AppError> {
    let mutation = StartupMutation {
        status: input.status,
        append_round: input.new_round.map(validate_round).transpose()?,
    };

    if mutation.is_empty() {
        return Err(AppError::Validation(
            "nothing to update: supply a status and/or a new round".to_string(),
        ));
    }
    Ok(mutation)
}

pub fn validate_round(round: NewFundingRound) -> Result<FundingRound, AppError> {
    let round_type = round.round_type.trim().to_string();
    if round_type.is_empty() {
        return Err(AppError::Validation("round_type is required".to_string()));
    }
    if !round.amount.is_finite() || round.amount < 0.0 {
        return Err(AppError::Validation(format!(
            "amount must be a non-negative number, got {}",
            round.amount
        )));
    }
    if let Some(valuation) = round.valuation.filter(|v| !v.is_finite() || *v <= 0.0) {
        return Err(AppError::Validation(format!(
            "valuation must be a positive number when given, got {valuation}"
        )));
    }

    Ok(FundingRound {
        round_type,
        amount: round.amount,
        date: round.date.unwrap_or_else(|| Utc::now().date_naive()),
        valuation: round.valuation,
        investors: clean_names(round.investors),
    })
}

fn clean_names(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
