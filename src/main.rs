use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use migration::{LogMigrator, ScriptMigrator, SensorDataMigrator};
use sensor_dashboard::common::AppState;
use sensor_dashboard::config::Config;
use sensor_dashboard::routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("Starting sensor-dashboard...");

    // Load configuration (fail-fast)
    let config = Config::from_env()?;
    tracing::info!(
        deployment = ?config.deployment,
        host = %config.api_host,
        port = config.api_port,
        language = config.language.code(),
        users = config.users.len(),
        "Configuration loaded"
    );

    // Connect to the three stores (fail-fast)
    let sensor_db = connect("sensor", &config.sensor_database_url).await?;
    let log_db = connect("log", &config.log_database_url).await?;
    let script_db = connect("script", &config.script_database_url).await?;

    if config.run_migrations {
        tracing::info!("Running migrations...");
        SensorDataMigrator::up(&sensor_db, None).await?;
        LogMigrator::up(&log_db, None).await?;
        ScriptMigrator::up(&script_db, None).await?;
        tracing::info!("Migrations completed");
    } else {
        tracing::info!("Migrations skipped (RUN_MIGRATIONS=false)");
    }

    let addr = config.bind_address();
    let state = AppState::new(sensor_db, log_db, script_db, config);
    let app = routes::build_router(state);

    // Start server with graceful shutdown
    tracing::info!(address = %addr, "Starting server");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` switches to
/// one JSON object per line.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,sensor_dashboard=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn connect(store: &'static str, url: &str) -> Result<DatabaseConnection, sea_orm::DbErr> {
    tracing::info!(store, "Connecting to database...");
    let db = Database::connect(url).await?;
    tracing::info!(store, "Database connection established");
    Ok(db)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
