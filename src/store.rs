use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    IntoActiveModel, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{funding_round, startup};
use crate::error::AppError;
use crate::models::{FundingRound, StartupDraft, StartupMutation, StartupRecord};
use crate::query::{fold_name, StartupFilter};

/// Handle to the startup records. Cloning shares the underlying pool.
#[derive(Clone, Debug)]
pub struct StartupStore {
    db: DatabaseConnection,
}

impl StartupStore {
    /// Opens the pool and brings the schema up to date.
    #[tracing::instrument(skip(options), fields(url = %redact(options.get_url())))]
    pub async fn connect(options: ConnectOptions) -> Result<Self, AppError> {
        let db = Database::connect(options).await.map_err(|e| {
            tracing::error!("failed to connect to database: {}", e);
            AppError::Connection(e.to_string())
        })?;
        Migrator::up(&db, None).await?;
        tracing::info!("database connected and migrated");
        Ok(Self { db })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.db.ping().await.map_err(|e| AppError::Connection(e.to_string()))
    }

    pub async fn close(self) -> Result<(), AppError> {
        self.db.close().await?;
        Ok(())
    }

    /// All records matching `filter`, in insertion order.
    pub async fn find(&self, filter: &StartupFilter) -> Result<Vec<StartupRecord>, AppError> {
        self.find_limited(filter, None).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_limited(
        &self,
        filter: &StartupFilter,
        limit: Option<u64>,
    ) -> Result<Vec<StartupRecord>, AppError> {
        let startups = startup::Entity::find()
            .filter(filter.condition())
            .order_by_asc(startup::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        tracing::debug!("matched {} startups", startups.len());
        self.assemble(startups).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<StartupRecord>, AppError> {
        let Some(found) = startup::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.assemble(vec![found]).await?.pop())
    }

    /// Writes the record (and its first round, if any) and returns the new identifier.
    /// Identifiers are UUID v7, so ordering by id is insertion order.
    #[tracing::instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn insert(&self, draft: StartupDraft) -> Result<Uuid, AppError> {
        let id = Uuid::now_v7();
        let txn = self.db.begin().await?;

        startup::ActiveModel {
            id: Set(id),
            name_folded: Set(fold_name(&draft.name)),
            name: Set(draft.name),
            industry: Set(draft.industry),
            country: Set(draft.country),
            founded_year: Set(draft.founded_year),
            status: Set(draft.status),
            founders: Set(serde_json::to_value(&draft.founders)?),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        if let Some(round) = draft.initial_round {
            round_model(id, 0, &round)?.insert(&txn).await?;
        }

        txn.commit().await?;
        tracing::info!(%id, "startup inserted");
        Ok(id)
    }

    /// Applies a status change and/or appends one round. Existing rounds are never touched.
    #[tracing::instrument(skip(self, mutation))]
    pub async fn update_one(&self, id: Uuid, mutation: StartupMutation) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        // FOR UPDATE serializes appends per startup; SQLite ignores it.
        let Some(existing) = startup::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            return Err(AppError::NotFound(format!("startup {id}")));
        };

        if let Some(status) = mutation.status {
            let mut active = existing.into_active_model();
            active.status = Set(status);
            active.update(&txn).await?;
            tracing::info!(%id, %status, "status updated");
        }

        if let Some(round) = mutation.append_round {
            let position = funding_round::Entity::find()
                .filter(funding_round::Column::StartupId.eq(id))
                .count(&txn)
                .await?;
            let position = i32::try_from(position)
                .map_err(|_| AppError::Internal(format!("too many rounds for startup {id}")))?;
            round_model(id, position, &round)?.insert(&txn).await?;
            tracing::info!(%id, position, round_type = %round.round_type, "funding round appended");
        }

        txn.commit().await?;
        Ok(())
    }

    /// Hard delete. Returns whether a record was removed.
    #[tracing::instrument(skip(self))]
    pub async fn delete_one(&self, id: Uuid) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;

        funding_round::Entity::delete_many()
            .filter(funding_round::Column::StartupId.eq(id))
            .exec(&txn)
            .await?;
        let removed = startup::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(removed.rows_affected > 0)
    }

    pub async fn distinct_industries(&self) -> Result<Vec<String>, AppError> {
        self.distinct_values(startup::Column::Industry).await
    }

    pub async fn distinct_countries(&self) -> Result<Vec<String>, AppError> {
        self.distinct_values(startup::Column::Country).await
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(startup::Entity::find().count(&self.db).await?)
    }

    async fn distinct_values(&self, column: startup::Column) -> Result<Vec<String>, AppError> {
        let values = startup::Entity::find()
            .select_only()
            .column(column)
            .distinct()
            .filter(column.ne(""))
            .order_by_asc(column)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;
        Ok(values)
    }

    async fn assemble(&self, startups: Vec<startup::Model>) -> Result<Vec<StartupRecord>, AppError> {
        let rounds = startups.load_many(funding_round::Entity, &self.db).await?;
        startups
            .into_iter()
            .zip(rounds)
            .map(|(startup, rounds)| StartupRecord::from_models(startup, rounds))
            .collect()
    }
}

fn round_model(
    startup_id: Uuid,
    position: i32,
    round: &FundingRound,
) -> Result<funding_round::ActiveModel, AppError> {
    Ok(funding_round::ActiveModel {
        id: Set(Uuid::now_v7()),
        startup_id: Set(startup_id),
        position: Set(position),
        round_type: Set(round.round_type.clone()),
        amount: Set(round.amount),
        date: Set(round.date),
        valuation: Set(round.valuation),
        investors: Set(serde_json::to_value(&round.investors)?),
    })
}

/// Strips credentials from a connection URL before it is logged.
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
