use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::auth::{Authenticator, PasswordHasher, StaticAuthenticator};
use crate::services::i18n::Translator;
use crate::services::session::SessionStore;

/// Everything a handler may touch. The three stores are separate databases
/// and are passed on to the store functions explicitly.
#[derive(Clone)]
pub struct AppState {
    pub sensor_db: DatabaseConnection,
    pub log_db: DatabaseConnection,
    pub script_db: DatabaseConnection,
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub authenticator: Arc<dyn Authenticator>,
    pub hasher: Arc<PasswordHasher>,
    pub translator: Arc<Translator>,
}

impl AppState {
    pub fn new(
        sensor_db: DatabaseConnection,
        log_db: DatabaseConnection,
        script_db: DatabaseConnection,
        config: Config,
    ) -> Self {
        let authenticator = StaticAuthenticator::new(config.users.clone());
        if authenticator.user_count() == 0 {
            tracing::warn!("DASHBOARD_USERS is empty, nobody can sign in");
        }

        Self {
            sensor_db,
            log_db,
            script_db,
            sessions: SessionStore::new(Duration::from_secs(config.session_ttl_seconds)),
            authenticator: Arc::new(authenticator),
            hasher: Arc::new(PasswordHasher::new(
                config.password_salt.clone(),
                config.password_iterations,
            )),
            translator: Arc::new(Translator::new(config.language)),
            config: Arc::new(config),
        }
    }
}
