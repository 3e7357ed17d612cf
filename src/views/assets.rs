//! Client script: turns `.ajax` forms into XHR submissions, applies the
//! returned snippets and draws the graph with uPlot.

pub const DASHBOARD_JS_PATH: &str = "/static/dashboard.js";

pub const DASHBOARD_JS: &str = r#"(function () {
  "use strict";

  var chart = null;

  function drawGraph() {
    var holder = document.getElementById("graph-chart");
    var data = document.getElementById("graph-data");
    if (chart) { chart.destroy(); chart = null; }
    if (!holder || !data || typeof uPlot === "undefined") { return; }

    var payload = JSON.parse(data.textContent);
    if (!payload || !payload.values.length) { return; }

    var columns = [payload.values.map(function (row) { return row[0]; })];
    var series = [{}];
    payload.firstrow.forEach(function (name, i) {
      columns.push(payload.values.map(function (row) { return row[i + 1]; }));
      series.push({ label: name, stroke: "hsl(" + (i * 67 % 360) + ",70%,45%)", spanGaps: true });
    });

    chart = new uPlot({
      width: holder.clientWidth || 800,
      height: 400,
      series: series,
      axes: [{}, { label: payload.unit || "" }]
    }, columns, holder);
  }

  function applySnippets(payload) {
    var snippets = (payload && payload.snippets) || {};
    Object.keys(snippets).forEach(function (id) {
      var el = document.getElementById(id);
      if (el) { el.innerHTML = snippets[id]; }
    });
    drawGraph();
  }

  function submit(form) {
    var body = new URLSearchParams(new FormData(form));
    var method = (form.getAttribute("method") || "get").toUpperCase();
    var url = form.getAttribute("action") || window.location.pathname;
    var init = { method: method, headers: { "X-Requested-With": "XMLHttpRequest" }, credentials: "same-origin" };
    if (method === "GET") {
      url += (url.indexOf("?") < 0 ? "?" : "&") + body.toString();
    } else {
      init.body = body;
    }

    fetch(url, init)
      .then(function (res) {
        if (res.redirected) { window.location = res.url; return null; }
        if (!res.ok) { throw new Error("HTTP " + res.status); }
        return res.json();
      })
      .then(function (payload) { if (payload) { applySnippets(payload); } })
      .catch(function (err) { console.error("ajax request failed", err); });
  }

  document.addEventListener("submit", function (event) {
    var form = event.target;
    if (form.classList && form.classList.contains("ajax")) {
      event.preventDefault();
      submit(form);
    }
  });

  document.addEventListener("DOMContentLoaded", drawGraph);
})();
"#;
