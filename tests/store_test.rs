//! Store queries against migrated in-memory SQLite databases.
//!
//! Run with: cargo test --test store_test

mod common;

use chrono::Duration;
use tokio_test::assert_ok;

use common::{at, insert_log, insert_reading, seed_sensors, utc_at, HUMIDITY, TEMPERATURE};
use sensor_dashboard::common::TimeWindow;
use sensor_dashboard::error::AppError;
use sensor_dashboard::routes::graph::{build_graph, GraphRequest};
use sensor_dashboard::store::logs::{self, LogFilter, LogLevel, SCRIPT_PAGE_SIZE};
use sensor_dashboard::store::{scripts, sensors};

#[tokio::test]
async fn script_upsert_keeps_one_row_per_name() {
    let db = common::script_db().await;

    assert_ok!(scripts::upsert(&db, "lights", "on()").await);
    assert_ok!(scripts::upsert(&db, " lights ", "off()").await);
    assert_ok!(scripts::upsert(&db, "heating", "set(21)").await);

    let list = assert_ok!(scripts::list(&db).await);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].name, "lights");
    assert_eq!(list[0].content, "off()");
    assert_eq!(list[1].name, "heating");
}

#[tokio::test]
async fn script_upsert_requires_both_fields() {
    let db = common::script_db().await;

    assert!(matches!(
        scripts::upsert(&db, "  ", "on()").await,
        Err(AppError::MissingScriptField("name"))
    ));
    assert!(matches!(
        scripts::upsert(&db, "lights", "").await,
        Err(AppError::MissingScriptField("content"))
    ));
    assert!(assert_ok!(scripts::list(&db).await).is_empty());
}

#[tokio::test]
async fn script_delete_of_missing_name_is_noop() {
    let db = common::script_db().await;
    assert_ok!(scripts::upsert(&db, "lights", "on()").await);

    assert!(!assert_ok!(scripts::delete(&db, "absent").await));
    assert_eq!(assert_ok!(scripts::list(&db).await).len(), 1);

    assert!(assert_ok!(scripts::delete(&db, "lights").await));
    assert!(assert_ok!(scripts::list(&db).await).is_empty());
}

#[tokio::test]
async fn script_delete_trims_name_like_upsert() {
    let db = common::script_db().await;
    assert_ok!(scripts::upsert(&db, "job ", "run()").await);
    assert_eq!(assert_ok!(scripts::list(&db).await)[0].name, "job");

    assert!(assert_ok!(scripts::delete(&db, "  job ").await));
    assert!(assert_ok!(scripts::list(&db).await).is_empty());
}

#[tokio::test]
async fn log_query_applies_threshold_and_orders_newest_first() {
    let db = common::log_db().await;
    for (minute, level) in [(0, 0), (1, 3), (2, 1), (3, 5), (4, 4), (5, 2)] {
        insert_log(&db, utc_at(10, minute, 0), level, &format!("m{minute}")).await;
    }

    let filter = LogFilter {
        min_level: LogLevel::Warning,
        window: TimeWindow::new(utc_at(9, 0, 0), utc_at(11, 0, 0)),
        limit: 200,
    };
    let entries = assert_ok!(logs::query(&db, &filter).await);

    let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["m4", "m3", "m1"]);
    assert!(entries.iter().all(|e| e.level >= 3));
    assert_eq!(entries[0].level_label(), "Error");
    assert_eq!(entries[0].timestamp, utc_at(10, 4, 0));
}

#[tokio::test]
async fn log_query_respects_window_and_cap() {
    let db = common::log_db().await;
    for second in 0..60 {
        insert_log(&db, utc_at(10, 0, second), 4, "burst").await;
    }
    insert_log(&db, utc_at(12, 0, 0), 5, "outside").await;

    let filter = LogFilter {
        min_level: LogLevel::Trace,
        window: TimeWindow::new(utc_at(10, 0, 0), utc_at(11, 0, 0)),
        limit: SCRIPT_PAGE_SIZE,
    };
    let entries = assert_ok!(logs::query(&db, &filter).await);

    assert_eq!(entries.len(), 50);
    assert_eq!(entries[0].timestamp, utc_at(10, 0, 59));
    assert!(entries.iter().all(|e| e.message == "burst"));

    // The upper bound is exclusive.
    let before_first = LogFilter {
        window: TimeWindow::new(utc_at(9, 0, 0), utc_at(10, 0, 0)),
        ..filter
    };
    assert!(assert_ok!(logs::query(&db, &before_first).await).is_empty());
}

#[tokio::test]
async fn recent_log_filter_covers_last_day() {
    let now = utc_at(12, 0, 0);
    let filter = LogFilter::recent(now, 200);

    assert_eq!(filter.min_level, LogLevel::Warning);
    assert_eq!(filter.window, TimeWindow::ending_at(now, Duration::hours(24)));
}

#[tokio::test]
async fn current_values_follow_latest_reading() {
    let db = common::sensor_db().await;
    seed_sensors(&db).await;
    insert_reading(&db, 2, TEMPERATURE, at(10, 0, 0), 19.5).await;
    insert_reading(&db, 1, TEMPERATURE, at(10, 0, 0), 21.0).await;
    insert_reading(&db, 1, TEMPERATURE, at(10, 5, 0), 21.5).await;
    insert_reading(&db, 1, HUMIDITY, at(10, 5, 0), 40.0).await;

    let rows = assert_ok!(sensors::current_values(&db).await);

    let summary: Vec<(i32, &str, Option<f64>)> = rows
        .iter()
        .map(|r| (r.sensor_id, r.value_name.as_str(), r.value))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, "humidity", Some(40.0)),
            (1, "temperature", Some(21.5)),
            (2, "temperature", Some(19.5)),
        ]
    );
    assert_eq!(rows[1].sensor_name, "living room");
    assert_eq!(rows[1].unit_name.as_deref(), Some("°C"));
    assert_eq!(rows[1].timestamp, at(10, 5, 0));
    assert_eq!(rows[0].unit_name, None);
}

#[tokio::test]
async fn sensor_options_list_sensors_reporting_a_value() {
    let db = common::sensor_db().await;
    seed_sensors(&db).await;
    insert_reading(&db, 3, TEMPERATURE, at(10, 0, 0), 2.0).await;
    insert_reading(&db, 1, TEMPERATURE, at(10, 0, 0), 21.0).await;
    insert_reading(&db, 2, HUMIDITY, at(10, 0, 0), 55.0).await;

    let options = assert_ok!(sensors::sensor_options(&db, "temperature").await);

    let ids: Vec<i32> = options.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(assert_ok!(sensors::sensor_options(&db, "pressure").await).is_empty());
}

#[tokio::test]
async fn sensors_by_ids_keeps_request_order_and_drops_unknown() {
    let db = common::sensor_db().await;
    seed_sensors(&db).await;

    let found = assert_ok!(sensors::sensors_by_ids(&db, &[3, 99, 1]).await);

    let names: Vec<&str> = found.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["garden", "living room"]);
}

#[tokio::test]
async fn graph_aligns_sensors_and_computes_stats() {
    let db = common::sensor_db().await;
    seed_sensors(&db).await;
    insert_reading(&db, 1, TEMPERATURE, at(10, 0, 0), 10.0).await;
    insert_reading(&db, 2, TEMPERATURE, at(10, 0, 0), 2.0).await;
    insert_reading(&db, 1, TEMPERATURE, at(10, 0, 10), 20.0).await;
    insert_reading(&db, 1, TEMPERATURE, at(10, 0, 20), 10.0).await;
    // Outside the window and another value name.
    insert_reading(&db, 1, TEMPERATURE, at(12, 0, 0), 99.0).await;
    insert_reading(&db, 1, HUMIDITY, at(10, 0, 5), 45.0).await;

    let request = GraphRequest {
        sensor_ids: vec![1, 2, 99],
        value_name: "temperature".into(),
        window: TimeWindow::new(utc_at(9, 0, 0), utc_at(11, 0, 0)),
    };
    let view = assert_ok!(build_graph(&db, &request).await);

    assert_eq!(view.unit.as_deref(), Some("°C"));
    assert_eq!(view.sensors.len(), 2);
    assert_eq!(view.series.len(), 3);
    assert_eq!(view.series.rows[0].values, vec![Some(10.0), Some(2.0)]);
    assert_eq!(view.series.rows[1].values, vec![Some(20.0), None]);

    let stat = view.stats[0].expect("three readings");
    assert!((stat.average - 15.0).abs() < 1e-9);
    assert_eq!(stat.diff, 10.0);
    assert_eq!(view.stats[1], None);

    let payload = view.payload(Default::default());
    assert_eq!(payload.firstrow, vec!["living room", "bedroom"]);
    assert_eq!(payload.values[1][0], serde_json::json!(utc_at(10, 0, 10).timestamp()));
    assert_eq!(payload.values[1][2], serde_json::Value::Null);
    assert_eq!(payload.stats[1].average, None);

    let csv = String::from_utf8(assert_ok!(view.to_csv())).expect("utf-8");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "timestamp,living room,bedroom");
    assert_eq!(lines[1], "2026-01-10 10:00:00,10,2");
    assert_eq!(lines[2], "2026-01-10 10:00:10,20,");
}

#[tokio::test]
async fn graph_for_unknown_value_name_is_empty() {
    let db = common::sensor_db().await;
    seed_sensors(&db).await;
    insert_reading(&db, 1, TEMPERATURE, at(10, 0, 0), 10.0).await;

    let request = GraphRequest {
        sensor_ids: vec![1],
        value_name: "pressure".into(),
        window: TimeWindow::new(utc_at(9, 0, 0), utc_at(11, 0, 0)),
    };
    let view = assert_ok!(build_graph(&db, &request).await);

    assert!(view.series.is_empty());
    assert_eq!(view.unit, None);
    assert_eq!(view.stats, vec![None]);
}
