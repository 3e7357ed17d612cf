use maud::{html, Markup};

use super::{form_time, layout, snippet, table_time, SNIPPET_LOG_BROWSER};
use crate::services::i18n::Translator;
use crate::store::logs::{LogEntry, LogFilter, LogLevel};

/// Level and window filter. Posts to `/logs`; the dashboard script turns the
/// submit into an AJAX request that refreshes the `LogBrowser` snippet.
#[must_use]
pub fn filter_form(t: &Translator, filter: &LogFilter) -> Markup {
    html! {
        form.ajax method="post" action="/logs" {
            label {
                (t.tr("Level")) ": "
                select name="level" {
                    @for level in LogLevel::SELECTABLE {
                        option value=(level.as_i32()) selected[level == filter.min_level] {
                            (t.tr(level.label()))
                        }
                    }
                }
            }
            " "
            label {
                (t.tr("Log from")) ": "
                input type="text" name="log_from" value=(form_time(filter.window.from)) required;
            }
            " "
            label {
                (t.tr("Log to")) ": "
                input type="text" name="log_to" value=(form_time(filter.window.to)) required;
            }
            " "
            button type="submit" { (t.tr("Update Log")) }
        }
    }
}

/// Entries, newest first.
#[must_use]
pub fn entries(t: &Translator, entries: &[LogEntry]) -> Markup {
    html! {
        @if entries.is_empty() {
            p.muted { (t.tr("no data")) }
        } @else {
            table {
                thead {
                    tr {
                        th { (t.tr("Time")) }
                        th { (t.tr("Level")) }
                        th { "Logger" }
                        th { (t.tr("Message")) }
                    }
                }
                tbody {
                    @for entry in entries {
                        tr {
                            td { (table_time(entry.timestamp)) }
                            td { (t.tr(entry.level_label())) }
                            td { (entry.logger.as_deref().unwrap_or("")) }
                            td { (entry.message) }
                        }
                    }
                }
            }
        }
    }
}

/// Filter form plus the refreshable entry list.
#[must_use]
pub fn browser(t: &Translator, filter: &LogFilter, log_entries: &[LogEntry]) -> Markup {
    html! {
        section {
            h2 { (t.tr("Log")) " " (t.tr("Browser")) }
            (filter_form(t, filter))
            (snippet(SNIPPET_LOG_BROWSER, entries(t, log_entries)))
        }
    }
}

#[must_use]
pub fn page(t: &Translator, user: &str, filter: &LogFilter, log_entries: &[LogEntry]) -> Markup {
    layout(t, Some(user), t.tr("Log"), browser(t, filter, log_entries))
}
