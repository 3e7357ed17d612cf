use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A kind of measurement ("temperature", "humidity", ...) and its unit.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "valname")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub unit_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id"
    )]
    Unit,
    #[sea_orm(has_many = "super::valreal::Entity")]
    Valreal,
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::valreal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Valreal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
