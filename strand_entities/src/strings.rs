use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One analyzed string.
///
/// `id` is a surrogate key that fixes creation order; `value` is the unique
/// business key. `properties` holds the ordered property object as JSON text
/// so key order survives every backend.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "strings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, column_type = "Text")]
    pub value: String,
    pub sha256_hash: String,
    #[sea_orm(column_type = "Text")]
    pub properties: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
