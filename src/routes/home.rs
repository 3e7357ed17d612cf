use axum::{extract::State, response::Html};
use chrono::{Duration, Utc};

use crate::common::{AppState, TimeWindow};
use crate::error::AppResult;
use crate::routes::extract::CurrentUser;
use crate::store::logs::{self, LogFilter, MAIN_PAGE_SIZE};
use crate::store::{scripts, sensors};
use crate::views::{self, home::HomeView};

/// Landing page: current values, the log browser with its default filter and
/// the script list.
pub async fn current_values(user: CurrentUser, State(state): State<AppState>) -> AppResult<Html<String>> {
    let now = Utc::now();
    let current = sensors::current_values(&state.sensor_db).await?;
    let log_filter = LogFilter::recent(now, MAIN_PAGE_SIZE);
    let log_entries = logs::query(&state.log_db, &log_filter).await?;
    let script_list = scripts::list(&state.script_db).await?;

    let view = HomeView {
        current: &current,
        graph_window: TimeWindow::ending_at(now, Duration::hours(24)),
        log_filter: &log_filter,
        logs: &log_entries,
        scripts: &script_list,
    };
    Ok(Html(views::home::page(&state.translator, &user.username, &view).into_string()))
}
