use std::env;

use crate::services::i18n::Language;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Databases
    pub sensor_database_url: String,
    pub log_database_url: String,
    pub script_database_url: String,
    pub run_migrations: bool,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Sign-in
    pub users: Vec<(String, String)>,
    pub password_salt: String,
    pub password_iterations: u32,
    pub session_ttl_seconds: u64,

    // Presentation
    pub language: Language,

    // Rate limiting
    pub disable_rate_limiting: bool,
    pub rate_limit_signin_per_second: u64,
    pub rate_limit_signin_burst: u32,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set,
    /// and `ConfigError::Invalid` if `DASHBOARD_USERS` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            // Databases
            sensor_database_url: env::var("SENSOR_DATABASE_URL")
                .map_err(|_| ConfigError::Missing("SENSOR_DATABASE_URL"))?,
            log_database_url: env::var("LOG_DATABASE_URL")
                .map_err(|_| ConfigError::Missing("LOG_DATABASE_URL"))?,
            script_database_url: env::var("SCRIPT_DATABASE_URL")
                .map_err(|_| ConfigError::Missing("SCRIPT_DATABASE_URL"))?,
            run_migrations: env::var("RUN_MIGRATIONS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            // Sign-in
            users: parse_users(&env::var("DASHBOARD_USERS").unwrap_or_default())?,
            password_salt: env::var("PASSWORD_SALT").unwrap_or_else(|_| "sůl".to_string()),
            password_iterations: env::var("PASSWORD_ITERATIONS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap_or(1000),
            session_ttl_seconds: env::var("SESSION_TTL_SECONDS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600),

            // Presentation
            language: Language::from_str(
                &env::var("DASHBOARD_LANGUAGE").unwrap_or_else(|_| "cs".to_string()),
            ),

            // Rate limiting
            disable_rate_limiting: env::var("DISABLE_RATE_LIMITING")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            rate_limit_signin_per_second: env::var("RATE_LIMIT_SIGNIN_PER_SECOND")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .unwrap_or(2),
            rate_limit_signin_burst: env::var("RATE_LIMIT_SIGNIN_BURST")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

/// Parse `user:hexhash,user2:hexhash` into pairs. Blank input means no users.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` for an entry without a `:` or with an empty side.
pub fn parse_users(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((user, hash)) if !user.trim().is_empty() && !hash.trim().is_empty() => {
                Ok((user.trim().to_string(), hash.trim().to_lowercase()))
            }
            _ => Err(ConfigError::Invalid(
                "DASHBOARD_USERS",
                format!("expected user:hash, got '{entry}'"),
            )),
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
