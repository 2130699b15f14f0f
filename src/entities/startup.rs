use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "startups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,                          // v7: time-ordered, never reused
    pub name: String,
    pub name_folded: String,               // lower-cased name, the search key
    pub industry: String,                  // stored lower-cased
    pub country: String,                   // stored upper-cased
    pub founded_year: i32,
    pub status: Status,
    #[sea_orm(column_type = "JsonBinary")]
    pub founders: Json,                    // JSON array of names
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::funding_round::Entity")]
    FundingRound,
}

impl Related<super::funding_round::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FundingRound.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lifecycle stage of a startup. Any value may change to any other.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Status {
    #[sea_orm(string_value = "Seed")]
    #[serde(rename = "Seed")]
    Seed,
    #[sea_orm(string_value = "Series A")]
    #[serde(rename = "Series A")]
    SeriesA,
    #[sea_orm(string_value = "Series B")]
    #[serde(rename = "Series B")]
    SeriesB,
    #[sea_orm(string_value = "Series C+")]
    #[serde(rename = "Series C+")]
    SeriesCPlus,
    #[sea_orm(string_value = "Active")]
    #[serde(rename = "Active")]
    Active,
    #[sea_orm(string_value = "Acquired")]
    #[serde(rename = "Acquired")]
    Acquired,
    #[sea_orm(string_value = "Inactive")]
    #[serde(rename = "Inactive")]
    Inactive,
    #[sea_orm(string_value = "Closed")]
    #[serde(rename = "Closed")]
    Closed,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Seed => "Seed",
            Status::SeriesA => "Series A",
            Status::SeriesB => "Series B",
            Status::SeriesCPlus => "Series C+",
            Status::Active => "Active",
            Status::Acquired => "Acquired",
            Status::Inactive => "Inactive",
            Status::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
