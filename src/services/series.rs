//! Series aggregation for the graph view.
//!
//! Readings of several sensors are pivoted into one row per distinct
//! timestamp with a column per sensor, and each sensor gets a time-weighted
//! summary over the requested window.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use crate::common::TimeWindow;

/// One observation of one sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub sensor_id: i32,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Reading {
    #[must_use]
    pub fn new(sensor_id: i32, timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            sensor_id,
            timestamp,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedRow {
    pub timestamp: DateTime<Utc>,
    /// Same length and order as the sensor list the series was built for.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignedSeries {
    pub rows: Vec<AlignedRow>,
}

impl AlignedSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Summary of one sensor over a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStat {
    /// Time-weighted average of the step function through the readings.
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// `max - min`
    pub diff: f64,
}

/// Pivot `readings` into one row per distinct timestamp, ascending.
///
/// Row slots follow `sensor_ids`; a slot stays `None` when that sensor has no
/// reading at exactly that timestamp. Readings of sensors outside
/// `sensor_ids` are ignored and do not create rows.
#[must_use]
pub fn align(sensor_ids: &[i32], readings: &[Reading]) -> AlignedSeries {
    let column: HashMap<i32, usize> = sensor_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i))
        .collect();

    let mut rows: BTreeMap<DateTime<Utc>, Vec<Option<f64>>> = BTreeMap::new();
    for reading in readings {
        let Some(&idx) = column.get(&reading.sensor_id) else {
            continue;
        };
        rows.entry(reading.timestamp)
            .or_insert_with(|| vec![None; sensor_ids.len()])[idx] = Some(reading.value);
    }

    AlignedSeries {
        rows: rows
            .into_iter()
            .map(|(timestamp, values)| AlignedRow { timestamp, values })
            .collect(),
    }
}

/// Summarise one sensor's readings inside `window`.
///
/// The readings are treated as a step function: each value holds until the
/// next reading. The last reading opens an interval that is never closed, so
/// it counts towards min/max but adds nothing to the average.
///
/// Returns `None` with fewer than two readings or when they all share one
/// instant.
#[must_use]
pub fn stats(readings: &[Reading], window: &TimeWindow) -> Option<SeriesStat> {
    let mut points: Vec<(DateTime<Utc>, f64)> = readings
        .iter()
        .filter(|r| window.contains(r.timestamp))
        .map(|r| (r.timestamp, r.value))
        .collect();

    if points.len() < 2 {
        return None;
    }
    points.sort_by_key(|(t, _)| *t);

    let first = points[0].0;
    let last = points[points.len() - 1].0;
    let span = seconds_between(first, last);
    if span <= 0.0 {
        return None;
    }

    let average = points
        .windows(2)
        .map(|pair| pair[0].1 * (seconds_between(pair[0].0, pair[1].0) / span))
        .sum();

    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), (_, v)| {
            (min.min(*v), max.max(*v))
        });

    Some(SeriesStat {
        average,
        min,
        max,
        diff: max - min,
    })
}

/// Group readings by sensor, keeping their relative order.
#[must_use]
pub fn by_sensor(readings: &[Reading]) -> HashMap<i32, Vec<Reading>> {
    let mut grouped: HashMap<i32, Vec<Reading>> = HashMap::new();
    for reading in readings {
        grouped.entry(reading.sensor_id).or_default().push(*reading);
    }
    grouped
}

/// Drop repeated items, keeping the first occurrence of each.
#[must_use]
pub fn dedup_preserving_order<T: Eq + Hash + Copy>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().copied().filter(|item| seen.insert(*item)).collect()
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}
