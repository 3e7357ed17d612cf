use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Statement,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::common::TimeWindow;
use crate::entity::{sensor, unit, valname, valreal, valsensor};
use crate::error::AppResult;
use crate::services::series::Reading;

/// Latest value of one sensor for one value name, with display names.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct CurrentValue {
    pub sensor_id: i32,
    pub sensor_name: String,
    pub value_name: String,
    pub unit_name: Option<String>,
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

const CURRENT_VALUES_SQL: &str = r"
    SELECT
        valsensor.sensor_id AS sensor_id,
        sensor.name AS sensor_name,
        valname.name AS value_name,
        unit.name AS unit_name,
        valsensor.timestamp AS timestamp,
        valsensor.value AS value
    FROM valsensor
    JOIN sensor ON sensor.id = valsensor.sensor_id
    JOIN valname ON valname.id = valsensor.valname_id
    LEFT JOIN unit ON unit.id = valname.unit_id
    ORDER BY valsensor.sensor_id ASC, valname.name ASC
";

/// One row per (sensor, value name) from the snapshot table, ordered by sensor.
pub async fn current_values(db: &DatabaseConnection) -> AppResult<Vec<CurrentValue>> {
    let rows = CurrentValue::find_by_statement(Statement::from_string(
        db.get_database_backend(),
        CURRENT_VALUES_SQL,
    ))
    .all(db)
    .await?;

    tracing::debug!(rows = rows.len(), "current_values");
    Ok(rows)
}

/// Sensors that report `value_name`, for the graph form's sensor picker.
pub async fn sensor_options(
    db: &DatabaseConnection,
    value_name: &str,
) -> AppResult<Vec<sensor::Model>> {
    Ok(sensor::Entity::find()
        .join(JoinType::InnerJoin, sensor::Relation::Valsensor.def())
        .join(JoinType::InnerJoin, valsensor::Relation::Valname.def())
        .filter(valname::Column::Name.eq(value_name))
        .order_by_asc(sensor::Column::Id)
        .all(db)
        .await?)
}

/// Existing sensors among `ids`, in the order of `ids`. Unknown ids are dropped.
pub async fn sensors_by_ids(db: &DatabaseConnection, ids: &[i32]) -> AppResult<Vec<sensor::Model>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let mut found: HashMap<i32, sensor::Model> = sensor::Entity::find()
        .filter(sensor::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
}

pub async fn value_name(db: &DatabaseConnection, name: &str) -> AppResult<Option<valname::Model>> {
    Ok(valname::Entity::find()
        .filter(valname::Column::Name.eq(name))
        .one(db)
        .await?)
}

/// Display name of the unit a value name is measured in.
pub async fn unit_name(
    db: &DatabaseConnection,
    value_name: &valname::Model,
) -> AppResult<Option<String>> {
    let Some(unit_id) = value_name.unit_id else {
        return Ok(None);
    };

    Ok(unit::Entity::find_by_id(unit_id)
        .one(db)
        .await?
        .map(|u| u.name))
}

/// History of `sensor_ids` for one value name inside `window`, oldest first.
/// Rows with a NULL value are skipped.
pub async fn readings(
    db: &DatabaseConnection,
    sensor_ids: &[i32],
    valname_id: i32,
    window: &TimeWindow,
) -> AppResult<Vec<Reading>> {
    if sensor_ids.is_empty() {
        return Ok(vec![]);
    }

    let (from, to) = window.naive_bounds();
    let rows = valreal::Entity::find()
        .filter(valreal::Column::SensorId.is_in(sensor_ids.iter().copied()))
        .filter(valreal::Column::ValnameId.eq(valname_id))
        .filter(valreal::Column::Timestamp.gte(from))
        .filter(valreal::Column::Timestamp.lt(to))
        .order_by_asc(valreal::Column::Timestamp)
        .all(db)
        .await?;

    let readings: Vec<Reading> = rows
        .into_iter()
        .filter_map(|row| {
            row.value
                .map(|value| Reading::new(row.sensor_id, row.timestamp.and_utc(), value))
        })
        .collect();

    tracing::debug!(
        sensors = sensor_ids.len(),
        valname_id,
        readings = readings.len(),
        "graph_readings"
    );
    Ok(readings)
}
