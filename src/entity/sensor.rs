use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sensor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::valreal::Entity")]
    Valreal,
    #[sea_orm(has_many = "super::valsensor::Entity")]
    Valsensor,
}

impl Related<super::valreal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Valreal.def()
    }
}

impl Related<super::valsensor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Valsensor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
