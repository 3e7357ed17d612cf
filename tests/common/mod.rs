//! Shared fixtures: migrated in-memory stores, a test configuration and
//! seeded sensor data.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sea_orm::{ActiveValue::Set, ConnectOptions, Database, DatabaseConnection, EntityTrait};
use sea_orm_migration::MigratorTrait;

use migration::{LogMigrator, ScriptMigrator, SensorDataMigrator};
use sensor_dashboard::common::time::utc_to_nanos;
use sensor_dashboard::common::AppState;
use sensor_dashboard::config::{Config, Deployment};
use sensor_dashboard::entity::{log, sensor, unit, valname, valreal};
use sensor_dashboard::services::i18n::Language;
use sensor_dashboard::services::session::SESSION_COOKIE;

/// PBKDF2-SHA3-512 of "admin" with salt "sůl" and 1000 rounds.
pub const ADMIN_HASH: &str = "0319a1a80e18f591300ddb71cc8077cf385f3d388389d391058cd5f9e903799d53bc20f99edabc502d969eb7b4499192f2f9737c2a3c57f17ecbf7bd2ecb2c6e";

pub const TEMPERATURE: i32 = 1;
pub const HUMIDITY: i32 = 2;

/// A private in-memory database. One pooled connection, since every SQLite
/// memory connection is its own database.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options).await.expect("connect sqlite memory")
}

pub async fn sensor_db() -> DatabaseConnection {
    let db = memory_db().await;
    SensorDataMigrator::up(&db, None).await.expect("sensor migrations");
    db
}

pub async fn log_db() -> DatabaseConnection {
    let db = memory_db().await;
    LogMigrator::up(&db, None).await.expect("log migrations");
    db
}

pub async fn script_db() -> DatabaseConnection {
    let db = memory_db().await;
    ScriptMigrator::up(&db, None).await.expect("script migrations");
    db
}

pub fn test_config() -> Config {
    Config {
        sensor_database_url: "sqlite::memory:".into(),
        log_database_url: "sqlite::memory:".into(),
        script_database_url: "sqlite::memory:".into(),
        run_migrations: true,
        api_host: "127.0.0.1".into(),
        api_port: 0,
        users: vec![("admin".into(), ADMIN_HASH.into())],
        password_salt: "sůl".into(),
        password_iterations: 1000,
        session_ttl_seconds: 3600,
        language: Language::English,
        disable_rate_limiting: true,
        rate_limit_signin_per_second: 2,
        rate_limit_signin_burst: 10,
        deployment: Deployment::Local,
    }
}

pub async fn test_state() -> AppState {
    AppState::new(sensor_db().await, log_db().await, script_db().await, test_config())
}

/// `Cookie` header value of a fresh session for "admin".
pub async fn session_cookie(state: &AppState) -> String {
    let token = state.sessions.create("admin").await;
    format!("{SESSION_COOKIE}={token}")
}

pub fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 10)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .expect("valid fixture time")
}

pub fn utc_at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    at(hour, minute, second).and_utc()
}

/// Sensors 1 "living room", 2 "bedroom", 3 "garden"; value names
/// temperature (°C) and humidity (no unit).
pub async fn seed_sensors(db: &DatabaseConnection) {
    for (id, name) in [(1, "living room"), (2, "bedroom"), (3, "garden")] {
        sensor::Entity::insert(sensor::ActiveModel {
            id: Set(id),
            name: Set(name.into()),
        })
        .exec_without_returning(db)
        .await
        .expect("insert sensor");
    }

    unit::Entity::insert(unit::ActiveModel {
        id: Set(1),
        name: Set("°C".into()),
    })
    .exec_without_returning(db)
    .await
    .expect("insert unit");

    for (id, name, unit_id) in [(TEMPERATURE, "temperature", Some(1)), (HUMIDITY, "humidity", None)] {
        valname::Entity::insert(valname::ActiveModel {
            id: Set(id),
            name: Set(name.into()),
            unit_id: Set(unit_id),
        })
        .exec_without_returning(db)
        .await
        .expect("insert valname");
    }
}

pub async fn insert_reading(
    db: &DatabaseConnection,
    sensor_id: i32,
    valname_id: i32,
    timestamp: NaiveDateTime,
    value: f64,
) {
    valreal::Entity::insert(valreal::ActiveModel {
        timestamp: Set(timestamp),
        sensor_id: Set(sensor_id),
        valname_id: Set(valname_id),
        value: Set(Some(value)),
    })
    .exec_without_returning(db)
    .await
    .expect("insert reading");
}

pub async fn insert_log(db: &DatabaseConnection, timestamp: DateTime<Utc>, level: i32, message: &str) {
    log::Entity::insert(log::ActiveModel {
        timestamp: Set(utc_to_nanos(timestamp)),
        level: Set(level),
        thread: Set(Some(1)),
        msgid: Set(None),
        logger: Set(Some("test".into())),
        message: Set(Some(message.into())),
    })
    .exec_without_returning(db)
    .await
    .expect("insert log");
}
