use chrono::{DateTime, Duration, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;

use crate::common::time::nanos_to_utc;
use crate::common::TimeWindow;
use crate::entity::log;
use crate::error::AppResult;

/// Rows shown by the main log browser.
pub const MAIN_PAGE_SIZE: u64 = 200;

/// Rows shown under the script editor.
pub const SCRIPT_PAGE_SIZE: u64 = 50;

/// Severity as stored in the log table. `Off` is never written by a logger
/// but is a valid threshold that hides everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
    Off = 6,
}

impl LogLevel {
    /// Levels offered in the filter form.
    pub const SELECTABLE: [LogLevel; 6] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    pub const DEFAULT: LogLevel = LogLevel::Warning;

    #[must_use]
    pub fn from_i32(level: i32) -> Option<Self> {
        match level {
            0 => Some(Self::Trace),
            1 => Some(Self::Debug),
            2 => Some(Self::Info),
            3 => Some(Self::Warning),
            4 => Some(Self::Error),
            5 => Some(Self::Critical),
            6 => Some(Self::Off),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// English label, also the translation key.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Trace => "Trace",
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Critical => "Critical",
            Self::Off => "Off",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFilter {
    pub min_level: LogLevel,
    pub window: TimeWindow,
    pub limit: u64,
}

impl LogFilter {
    /// Default browser filter: warnings and above from the last day.
    #[must_use]
    pub fn recent(now: DateTime<Utc>, limit: u64) -> Self {
        Self {
            min_level: LogLevel::DEFAULT,
            window: TimeWindow::ending_at(now, Duration::hours(24)),
            limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: i32,
    pub logger: Option<String>,
    pub message: String,
}

impl LogEntry {
    #[must_use]
    pub fn level_label(&self) -> &'static str {
        LogLevel::from_i32(self.level).map_or("?", LogLevel::label)
    }
}

impl From<log::Model> for LogEntry {
    fn from(row: log::Model) -> Self {
        Self {
            timestamp: nanos_to_utc(row.timestamp),
            level: row.level,
            logger: row.logger,
            message: row.message.unwrap_or_default(),
        }
    }
}

/// Entries at or above the threshold inside the window, newest first.
pub async fn query(db: &DatabaseConnection, filter: &LogFilter) -> AppResult<Vec<LogEntry>> {
    let (from, to) = filter.window.nanos_bounds();

    let rows = log::Entity::find()
        .filter(log::Column::Level.gte(filter.min_level.as_i32()))
        .filter(log::Column::Timestamp.gte(from))
        .filter(log::Column::Timestamp.lt(to))
        .order_by_desc(log::Column::Timestamp)
        .limit(filter.limit)
        .all(db)
        .await?;

    tracing::debug!(
        min_level = filter.min_level.as_i32(),
        limit = filter.limit,
        rows = rows.len(),
        "log_query"
    );
    Ok(rows.into_iter().map(LogEntry::from).collect())
}
