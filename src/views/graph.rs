use maud::{html, Markup, PreEscaped};

use super::{layout, number, snippet, SNIPPET_GRAPH};
use crate::entity::sensor;
use crate::routes::graph::GraphView;
use crate::services::i18n::Translator;

/// Values the graph form is filled with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphForm {
    pub value: String,
    pub selected: Vec<i32>,
    pub date_from: String,
    pub date_to: String,
    /// Sensors that report `value`.
    pub options: Vec<sensor::Model>,
}

#[must_use]
pub fn form(t: &Translator, form: &GraphForm) -> Markup {
    html! {
        form.ajax method="post" action="/graph/update" {
            input type="hidden" name="value" value=(form.value);
            fieldset {
                legend { (t.tr("Sensors")) }
                @for option in &form.options {
                    label {
                        input type="checkbox" name="sensors" value=(option.id)
                            checked[form.selected.contains(&option.id)];
                        " " (option.name)
                    }
                    " "
                }
            }
            label {
                (t.tr("Measurement from")) ": "
                input type="text" name="date_from" value=(form.date_from) required;
            }
            " "
            label {
                (t.tr("Measurement to")) ": "
                input type="text" name="date_to" value=(form.date_to) required;
            }
            " "
            button type="submit" { (t.tr("Update Graph")) }
        }
    }
}

/// Statistics table and chart. The series is embedded as JSON for the
/// dashboard script to draw.
#[must_use]
pub fn chart(t: &Translator, view: Option<&GraphView>) -> Markup {
    let Some(view) = view else {
        return html! { p.muted { (t.tr("No")) " " (t.tr("graph")) } };
    };
    let [from, to] = view.period();
    let unit = view.unit.as_deref().unwrap_or("");

    html! {
        h2 {
            (t.tr("Progress in Time")) " " (view.value_type) " "
            (t.tr("from")) " " (from) " " (t.tr("to")) " " (to)
        }
        @if view.series.is_empty() {
            p.muted { (t.tr("no data")) }
        } @else {
            div id="graph-chart" {}
            script type="application/json" id="graph-data" {
                (PreEscaped(embedded_json(view)))
            }
        }
        table {
            thead {
                tr {
                    th { (t.tr("Sensor")) }
                    th { (t.tr("Average")) }
                    th { (t.tr("Minimum")) }
                    th { (t.tr("Maximum")) }
                    th { (t.tr("Maximal")) " " (t.tr("difference")) }
                }
            }
            tbody {
                @for (sensor, stat) in view.sensors.iter().zip(&view.stats) {
                    tr {
                        td { (sensor.name) }
                        @if let Some(stat) = stat {
                            td { (number(Some(stat.average))) " " (unit) }
                            td { (number(Some(stat.min))) " " (unit) }
                            td { (number(Some(stat.max))) " " (unit) }
                            td { (number(Some(stat.diff))) " " (unit) }
                        } @else {
                            td.muted colspan="4" { (t.tr("no data")) }
                        }
                    }
                }
            }
        }
    }
}

/// Payload JSON safe to place inside a `<script>` element.
fn embedded_json(view: &GraphView) -> String {
    serde_json::to_string(&view.payload(Default::default()))
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

#[must_use]
pub fn page(t: &Translator, user: &str, graph_form: &GraphForm, view: Option<&GraphView>) -> Markup {
    let body = html! {
        section {
            (form(t, graph_form))
        }
        section {
            (snippet(SNIPPET_GRAPH, chart(t, view)))
        }
    };
    layout(t, Some(user), t.tr("Graph"), body)
}
