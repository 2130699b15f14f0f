#![allow(dead_code)]

use std::sync::Once;

use chrono::NaiveDate;
use sea_orm::ConnectOptions;
use startuplens::entities::Status;
use startuplens::models::{NewFundingRound, NewStartup, StartupRecord};
use startuplens::query::StartupFilter;
use startuplens::store::StartupStore;
use startuplens::{create_app, AppState};

static INIT: Once = Once::new();

pub fn setup() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// Fresh, migrated in-memory store. A single pooled connection keeps every
/// query on the same in-memory database.
pub async fn store() -> StartupStore {
    setup();
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    StartupStore::connect(options)
        .await
        .expect("in-memory sqlite store")
}

pub async fn app() -> (axum::Router, StartupStore) {
    let store = store().await;
    let app = create_app(AppState::new(store.clone(), 50));
    (app, store)
}

pub fn startup(name: &str, industry: &str, country: &str) -> NewStartup {
    NewStartup {
        name: name.to_string(),
        industry: industry.to_string(),
        country: country.to_string(),
        founded_year: 2020,
        status: Status::Seed,
        founders: vec!["Ada Founder".to_string()],
        initial_round: None,
    }
}

pub fn round(round_type: &str, amount: f64, date: &str) -> NewFundingRound {
    NewFundingRound {
        round_type: round_type.to_string(),
        amount,
        date: Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid date")),
        valuation: None,
        investors: vec![],
    }
}

pub fn funded(name: &str, industry: &str, country: &str, amount: f64, date: &str) -> NewStartup {
    NewStartup {
        initial_round: Some(round("Seed", amount, date)),
        ..startup(name, industry, country)
    }
}

pub fn by_name(name: &str) -> StartupFilter {
    StartupFilter {
        name: Some(name.to_string()),
        ..StartupFilter::default()
    }
}

pub fn total_funding(record: &StartupRecord) -> f64 {
    record.funding_rounds.iter().map(|round| round.amount).sum()
}
