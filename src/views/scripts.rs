use maud::{html, Markup};

use super::{layout, logs, snippet, SNIPPET_EXE};
use crate::entity::script;
use crate::services::i18n::Translator;
use crate::store::logs::LogEntry;

/// Stored scripts, each with a remove button.
#[must_use]
pub fn list(t: &Translator, scripts: &[script::Model]) -> Markup {
    html! {
        @if scripts.is_empty() {
            p.muted { (t.tr("No")) " " (t.tr("values")) }
        } @else {
            table {
                thead {
                    tr {
                        th { (t.tr("Script name")) }
                        th { (t.tr("Script content")) }
                        th {}
                    }
                }
                tbody {
                    @for s in scripts {
                        tr {
                            td { (s.name) }
                            td { pre { (s.content) } }
                            td {
                                form.ajax.inline method="post" action="/scripts/delete" {
                                    input type="hidden" name="name" value=(s.name);
                                    button type="submit" { (t.tr("Remove")) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Create-or-replace form; an existing name is overwritten.
#[must_use]
pub fn editor(t: &Translator) -> Markup {
    html! {
        form.ajax method="post" action="/scripts" {
            p {
                label {
                    (t.tr("Script name")) ": "
                    input type="text" name="name" required title=(t.tr("This field is required."));
                }
            }
            p {
                label {
                    (t.tr("Script content")) ":"
                    br;
                    textarea name="script" rows="12" cols="100" required title=(t.tr("This field is required.")) {}
                }
            }
            button type="submit" { (t.tr("Add Script")) }
        }
    }
}

/// List and editor; the list is the refreshable `Exe` snippet.
#[must_use]
pub fn section(t: &Translator, scripts: &[script::Model]) -> Markup {
    html! {
        section {
            h2 { (t.tr("Exe")) }
            (snippet(SNIPPET_EXE, list(t, scripts)))
            (editor(t))
        }
    }
}

/// Script management with the newest log messages underneath.
#[must_use]
pub fn page(t: &Translator, user: &str, scripts: &[script::Model], log_entries: &[LogEntry]) -> Markup {
    let body = html! {
        (section(t, scripts))
        section {
            h2 { (t.tr("Log")) }
            (logs::entries(t, log_entries))
        }
    };
    layout(t, Some(user), t.tr("Exe"), body)
}
