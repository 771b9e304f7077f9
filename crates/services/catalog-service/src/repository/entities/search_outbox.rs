//! Search outbox database entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "search_outbox")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub object_id: String,
    /// Serialized `IndexOperation`
    pub operation: Json,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub created: DateTimeUtc,
    /// NULL until the search provider acknowledged the operation
    pub delivered: Option<DateTimeUtc>,
    /// Lease held by the relay applying this row
    pub claimed_until: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
