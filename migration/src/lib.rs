//! Schema for the three dashboard stores.
//!
//! Each store lives in its own database, so each gets its own migrator and
//! its own `seaql_migrations` bookkeeping table. The acquisition daemons create
//! the same tables on their side, which is why every statement here is
//! `IF NOT EXISTS`.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_sensor_data;
mod m20260301_000002_log;
mod m20260301_000003_script;

pub use m20260301_000001_sensor_data::{Sensor, Unit, Valname, Valreal, Valsensor};
pub use m20260301_000002_log::Log;
pub use m20260301_000003_script::Script;

/// Sensor metadata, value history and the current-value snapshot.
pub struct SensorDataMigrator;

#[async_trait::async_trait]
impl MigratorTrait for SensorDataMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260301_000001_sensor_data::Migration)]
    }
}

/// Module log messages.
pub struct LogMigrator;

#[async_trait::async_trait]
impl MigratorTrait for LogMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260301_000002_log::Migration)]
    }
}

/// Scripts consumed by the exe module.
pub struct ScriptMigrator;

#[async_trait::async_trait]
impl MigratorTrait for ScriptMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260301_000003_script::Migration)]
    }
}
