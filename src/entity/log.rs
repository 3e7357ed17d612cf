use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "log")]
pub struct Model {
    /// Nanoseconds since the Unix epoch.
    #[sea_orm(primary_key, auto_increment = false)]
    pub timestamp: i64,
    pub level: i32,
    pub thread: Option<i64>,
    pub msgid: Option<i64>,
    pub logger: Option<String>,
    pub message: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
