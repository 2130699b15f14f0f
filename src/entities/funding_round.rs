use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "funding_rounds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub startup_id: Uuid,
    pub position: i32,                     // append order within the startup
    pub round_type: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,                       // USD
    pub date: Date,
    #[sea_orm(column_type = "Double", nullable)]
    pub valuation: Option<f64>,
    #[sea_orm(column_type = "JsonBinary")]
    pub investors: Json,                   // JSON array of names
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::startup::Entity",
        from = "Column::StartupId",
        to = "super::startup::Column::Id",
        on_delete = "Cascade"
    )]
    Startup,
}

impl Related<super::startup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Startup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
