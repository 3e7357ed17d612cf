use sea_orm_migration::prelude::*;

/// Runs the migration CLI against one store, selected by `MIGRATION_STORE`
/// (`sensor`, `log` or `script`). The database itself comes from `DATABASE_URL`.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    match std::env::var("MIGRATION_STORE").as_deref() {
        Ok("log") => cli::run_cli(migration::LogMigrator).await,
        Ok("script") => cli::run_cli(migration::ScriptMigrator).await,
        _ => cli::run_cli(migration::SensorDataMigrator).await,
    }
}
