//! HTML rendering with `maud`.
//!
//! Every page is the shared layout around one or more sections. Sections that
//! can be refreshed by an AJAX request are wrapped in a snippet container whose
//! id is `snippet--<Name>`; the partial responses carry the inner HTML of
//! exactly those containers.

pub mod assets;
pub mod graph;
pub mod home;
pub mod logs;
pub mod scripts;
pub mod sign;

use chrono::{DateTime, Local, Utc};
use maud::{html, Markup, DOCTYPE};

use crate::common::time::{format_local, FORM_FORMAT, TABLE_FORMAT};
use crate::services::i18n::Translator;

pub const SNIPPET_EXE: &str = "Exe";
pub const SNIPPET_LOG_BROWSER: &str = "LogBrowser";
pub const SNIPPET_GRAPH: &str = "Graph";

const UPLOT_CSS: &str = "https://cdn.jsdelivr.net/npm/uplot@1.6.31/dist/uPlot.min.css";
const UPLOT_JS: &str = "https://cdn.jsdelivr.net/npm/uplot@1.6.31/dist/uPlot.iife.min.js";

const STYLE: &str = r"
:root { --bg: #f8fafc; --surface: #ffffff; --border: #e2e8f0; --text: #1e293b; --muted: #64748b; --accent: #2563eb; }
* { box-sizing: border-box; }
body { font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--text); margin: 0; }
.container { max-width: 1200px; margin: 0 auto; padding: 1.5rem; }
header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1.5rem; }
header nav a { margin-left: 1rem; color: var(--accent); text-decoration: none; }
section { background: var(--surface); border: 1px solid var(--border); border-radius: 0.5rem; padding: 1rem; margin-bottom: 1.5rem; }
table { border-collapse: collapse; width: 100%; font-size: 0.875rem; }
th, td { border-bottom: 1px solid var(--border); padding: 0.35rem 0.5rem; text-align: left; }
.muted { color: var(--muted); }
.error { color: #b91c1c; }
form.inline { display: inline; }
#graph-chart { min-height: 400px; }
";

/// Id of the container a snippet is rendered into.
#[must_use]
pub fn snippet_id(name: &str) -> String {
    format!("snippet--{name}")
}

/// Wrap `content` in the snippet container called `name`.
#[must_use]
pub fn snippet(name: &str, content: Markup) -> Markup {
    html! {
        div id=(snippet_id(name)) { (content) }
    }
}

/// Page shell. `user` is the signed-in username; the navigation is only shown
/// to signed-in users.
#[must_use]
pub fn layout(t: &Translator, user: Option<&str>, title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(t.language().code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(UPLOT_CSS);
                style { (STYLE) }
                script src=(UPLOT_JS) {}
                script src=(assets::DASHBOARD_JS_PATH) defer {}
            }
            body {
                div.container {
                    header {
                        h1 { (title) }
                        @if let Some(user) = user {
                            nav {
                                a href="/" { (t.tr("Current values")) }
                                a href="/logs" { (t.tr("Log")) }
                                a href="/scripts" { (t.tr("Exe")) }
                                span.muted { " " (user) }
                                a href="/sign/out" { (t.tr("Sign out")) }
                            }
                        }
                    }
                    (body)
                }
            }
        }
    }
}

/// Table cell text for a stored instant.
#[must_use]
pub fn table_time(t: DateTime<Utc>) -> String {
    format_local(t, &Local, TABLE_FORMAT)
}

/// Form field text for an instant.
#[must_use]
pub fn form_time(t: DateTime<Utc>) -> String {
    format_local(t, &Local, FORM_FORMAT)
}

/// Number formatting shared by tables and statistics.
#[must_use]
pub fn number(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.2}"))
}
