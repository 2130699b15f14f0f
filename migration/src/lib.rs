pub use sea_orm_migration::prelude::*;

mod m20250419_154927_create_startups_table;
mod m20250419_160412_create_funding_rounds_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250419_154927_create_startups_table::Migration),
            Box::new(m20250419_160412_create_funding_rounds_table::Migration),
        ]
    }
}
