use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw value history. `timestamp` is UTC without an offset, as SQLite's
/// `CURRENT_TIMESTAMP` writes it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "valreal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub timestamp: DateTime,
    #[sea_orm(primary_key, auto_increment = false)]
    pub sensor_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub valname_id: i32,
    pub value: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sensor::Entity",
        from = "Column::SensorId",
        to = "super::sensor::Column::Id"
    )]
    Sensor,
    #[sea_orm(
        belongs_to = "super::valname::Entity",
        from = "Column::ValnameId",
        to = "super::valname::Column::Id"
    )]
    Valname,
}

impl Related<super::sensor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sensor.def()
    }
}

impl Related<super::valname::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Valname.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
