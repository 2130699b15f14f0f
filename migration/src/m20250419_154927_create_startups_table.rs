use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Startups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Startups::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Startups::Name).string().not_null())
                    .col(ColumnDef::new(Startups::NameFolded).string().not_null())
                    .col(ColumnDef::new(Startups::Industry).string().not_null())
                    .col(ColumnDef::new(Startups::Country).string().not_null())
                    .col(ColumnDef::new(Startups::FoundedYear).integer().not_null())
                    .col(ColumnDef::new(Startups::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Startups::Founders).json_binary().not_null())
                    .col(
                        ColumnDef::new(Startups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Search filters and the distinct option lists hit these two columns.
        manager
            .create_index(
                Index::create()
                    .name("idx_startups_industry")
                    .table(Startups::Table)
                    .col(Startups::Industry)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_startups_country")
                    .table(Startups::Table)
                    .col(Startups::Country)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Startups::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Startups {
    Table,
    Id,
    Name,
    NameFolded,
    Industry,
    Country,
    FoundedYear,
    Status,
    Founders,
    CreatedAt,
}
