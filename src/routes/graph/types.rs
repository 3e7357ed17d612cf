use chrono::{Local, TimeZone};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::common::time::{format_local, parse_local, FORM_FORMAT};
use crate::common::TimeWindow;
use crate::entity::sensor;
use crate::error::{AppError, AppResult};
use crate::services::series::{dedup_preserving_order, AlignedSeries, SeriesStat};

const CSV_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw graph inputs as they arrive in the query string or form body.
///
/// `sensors` may repeat, be comma separated or use the `sensors[]` name.
/// Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphParams {
    pub sensors: Vec<String>,
    pub value: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub format: Option<String>,
}

impl GraphParams {
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut params = Self::default();
        for (key, raw) in pairs {
            let value = raw.trim();
            match key.as_str() {
                "sensors" | "sensors[]" => params.sensors.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from),
                ),
                _ if value.is_empty() => {}
                "value" => params.value = Some(value.to_string()),
                "date_from" => params.date_from = Some(value.to_string()),
                "date_to" => params.date_to = Some(value.to_string()),
                "format" => params.format = Some(value.to_lowercase()),
                _ => {}
            }
        }
        params
    }

    /// Fill fields absent here from `fallback`. Used with the form as `self`
    /// and the query string as the fallback.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            sensors: if self.sensors.is_empty() {
                fallback.sensors
            } else {
                self.sensors
            },
            value: self.value.or(fallback.value),
            date_from: self.date_from.or(fallback.date_from),
            date_to: self.date_to.or(fallback.date_to),
            format: self.format.or(fallback.format),
        }
    }

    #[must_use]
    pub fn wants_csv(&self) -> bool {
        self.format.as_deref() == Some("csv")
    }

    /// Ids of the selected sensors, deduplicated; ids that are not numbers
    /// are skipped.
    #[must_use]
    pub fn sensor_ids(&self) -> Vec<i32> {
        let ids: Vec<i32> = self
            .sensors
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        dedup_preserving_order(&ids)
    }

    /// Turn the inputs into a graph request, reading dates in `tz`.
    ///
    /// `Ok(None)` when an input is missing, which callers treat as "nothing
    /// to draw". Unparseable dates and an empty or inverted window are
    /// rejected.
    pub fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> AppResult<Option<GraphRequest>> {
        let (Some(value), Some(from), Some(to)) = (&self.value, &self.date_from, &self.date_to)
        else {
            return Ok(None);
        };

        let sensor_ids = self.sensor_ids();
        if sensor_ids.is_empty() {
            return Ok(None);
        }

        let from = parse_local(from, tz)
            .ok_or_else(|| AppError::InvalidDate {
                field: "date_from",
                input: from.clone(),
            })?;
        let to = parse_local(to, tz)
            .ok_or_else(|| AppError::InvalidDate {
                field: "date_to",
                input: to.clone(),
            })?;
        if from >= to {
            return Err(AppError::EmptyWindow {
                from_field: "date_from",
                to_field: "date_to",
            });
        }

        Ok(Some(GraphRequest {
            sensor_ids,
            value_name: value.clone(),
            window: TimeWindow::new(from, to),
        }))
    }

    /// Query string that reproduces these inputs on `GET /graph`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = self
            .sensors
            .iter()
            .map(|s| format!("sensors={}", urlencoding::encode(s)))
            .collect();

        let named = [
            ("value", &self.value),
            ("date_from", &self.date_from),
            ("date_to", &self.date_to),
        ];
        for (name, value) in named {
            if let Some(value) = value {
                parts.push(format!("{name}={}", urlencoding::encode(value)));
            }
        }
        parts.join("&")
    }
}

/// Validated graph inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphRequest {
    pub sensor_ids: Vec<i32>,
    pub value_name: String,
    pub window: TimeWindow,
}

/// Everything the graph section shows.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphView {
    pub value_type: String,
    pub unit: Option<String>,
    pub window: TimeWindow,
    /// Resolved sensors, in request order. Columns of `series` and entries of
    /// `stats` follow this order.
    pub sensors: Vec<sensor::Model>,
    pub series: AlignedSeries,
    pub stats: Vec<Option<SeriesStat>>,
}

impl GraphView {
    /// The window as the form shows it, in local time.
    #[must_use]
    pub fn period(&self) -> [String; 2] {
        [
            format_local(self.window.from, &Local, FORM_FORMAT),
            format_local(self.window.to, &Local, FORM_FORMAT),
        ]
    }

    #[must_use]
    pub fn payload(&self, snippets: BTreeMap<String, String>) -> GraphPayload {
        GraphPayload {
            unit: self.unit.clone(),
            value_type: self.value_type.clone(),
            firstrow: self.sensors.iter().map(|s| s.name.clone()).collect(),
            values: self
                .series
                .rows
                .iter()
                .map(|row| {
                    std::iter::once(Value::from(row.timestamp.timestamp()))
                        .chain(row.values.iter().map(|v| v.map_or(Value::Null, Value::from)))
                        .collect()
                })
                .collect(),
            period: self.period(),
            stats: self
                .sensors
                .iter()
                .zip(&self.stats)
                .map(|(sensor, stat)| SensorStat {
                    sensor_id: sensor.id,
                    sensor: sensor.name.clone(),
                    average: stat.map(|s| s.average),
                    min: stat.map(|s| s.min),
                    max: stat.map(|s| s.max),
                    diff: stat.map(|s| s.diff),
                })
                .collect(),
            snippets,
        }
    }

    /// `timestamp,<sensor names>` followed by one line per aligned row.
    /// Timestamps are UTC; missing values are empty cells.
    pub fn to_csv(&self) -> AppResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let header = std::iter::once("timestamp").chain(self.sensors.iter().map(|s| s.name.as_str()));
        writer.write_record(header)?;

        for row in &self.series.rows {
            let record = std::iter::once(row.timestamp.format(CSV_TIME_FORMAT).to_string())
                .chain(row.values.iter().map(|v| v.map_or_else(String::new, |v| v.to_string())));
            writer.write_record(record)?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Csv(e.into_error().into()))
    }
}

/// Summary of one sensor; all fields are `null` when there is not enough data.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SensorStat {
    pub sensor_id: i32,
    pub sensor: String,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub diff: Option<f64>,
}

/// Response of an AJAX graph update.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GraphPayload {
    pub unit: Option<String>,
    pub value_type: String,
    /// Sensor names, one per value column.
    pub firstrow: Vec<String>,
    /// `[epoch_seconds, value_or_null, ...]` per distinct timestamp.
    #[schema(value_type = Vec<Vec<f64>>)]
    pub values: Vec<Vec<Value>>,
    /// `[from, to]` as shown in the form.
    #[schema(value_type = Vec<String>)]
    pub period: [String; 2],
    pub stats: Vec<SensorStat>,
    pub snippets: BTreeMap<String, String>,
}
