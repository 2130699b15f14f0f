use sea_orm_migration::prelude::*;

use crate::m20250419_154927_create_startups_table::Startups;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FundingRounds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FundingRounds::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(FundingRounds::StartupId).uuid().not_null())
                    .col(ColumnDef::new(FundingRounds::Position).integer().not_null())
                    .col(ColumnDef::new(FundingRounds::RoundType).string().not_null())
                    .col(ColumnDef::new(FundingRounds::Amount).double().not_null())
                    .col(ColumnDef::new(FundingRounds::Date).date().not_null())
                    .col(ColumnDef::new(FundingRounds::Valuation).double().null())
                    .col(ColumnDef::new(FundingRounds::Investors).json_binary().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_funding_rounds_startup")
                            .from(FundingRounds::Table, FundingRounds::StartupId)
                            .to(Startups::Table, Startups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One round per slot; appends serialize on the parent row.
        manager
            .create_index(
                Index::create()
                    .name("idx_funding_rounds_startup_position")
                    .unique()
                    .table(FundingRounds::Table)
                    .col(FundingRounds::StartupId)
                    .col(FundingRounds::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FundingRounds::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FundingRounds {
    Table,
    Id,
    StartupId,
    Position,
    RoundType,
    Amount,
    Date,
    Valuation,
    Investors,
}
