use maud::{html, Markup};

use super::{form_time, layout, logs, number, scripts, table_time};
use crate::common::TimeWindow;
use crate::entity::script;
use crate::routes::graph::GraphParams;
use crate::services::i18n::Translator;
use crate::store::logs::{LogEntry, LogFilter};
use crate::store::sensors::CurrentValue;

/// Data for the landing page.
#[derive(Debug, Clone, Copy)]
pub struct HomeView<'a> {
    pub current: &'a [CurrentValue],
    /// Window the graph links open with.
    pub graph_window: TimeWindow,
    pub log_filter: &'a LogFilter,
    pub logs: &'a [LogEntry],
    pub scripts: &'a [script::Model],
}

/// `/graph` link for one sensor and value name over `window`.
#[must_use]
pub fn graph_link(sensor_id: i32, value_name: &str, window: &TimeWindow) -> String {
    let params = GraphParams {
        sensors: vec![sensor_id.to_string()],
        value: Some(value_name.to_string()),
        date_from: Some(form_time(window.from)),
        date_to: Some(form_time(window.to)),
        format: None,
    };
    format!("/graph?{}", params.to_query_string())
}

#[must_use]
pub fn current_values(t: &Translator, rows: &[CurrentValue], graph_window: &TimeWindow) -> Markup {
    html! {
        section {
            h2 { (t.tr("Current values")) }
            @if rows.is_empty() {
                p.muted { (t.tr("no data")) }
            } @else {
                table {
                    thead {
                        tr {
                            th { (t.tr("Sensor")) }
                            th { (t.tr("value")) }
                            th {}
                            th { (t.tr("Unit")) }
                            th { (t.tr("Time")) }
                            th {}
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                td { (row.sensor_name) }
                                td { (row.value_name) }
                                td { (number(row.value)) }
                                td { (row.unit_name.as_deref().unwrap_or("")) }
                                td { (table_time(row.timestamp.and_utc())) }
                                td {
                                    a href=(graph_link(row.sensor_id, &row.value_name, graph_window)) {
                                        (t.tr("Graph"))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn page(t: &Translator, user: &str, view: &HomeView<'_>) -> Markup {
    let body = html! {
        (current_values(t, view.current, &view.graph_window))
        (logs::browser(t, view.log_filter, view.logs))
        (scripts::section(t, view.scripts))
    };
    layout(t, Some(user), t.tr("Current values"), body)
}
