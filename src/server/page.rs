use crate::charts::style::DASH_BACKGROUND;
use crate::config::{DashboardConfig, SliderSpec};

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Congratulations</title>
<style>
  html, body { margin: 0; height: 100%; background: __BACKGROUND__; color: white; font-family: "Open Sans", verdana, arial, sans-serif; }
  #root { position: relative; display: flex; justify-content: center; align-items: center; flex-direction: row; height: 100vh; background: __BACKGROUND__; }
  .corner { position: absolute; }
  .corner.top { top: 0; } .corner.bottom { bottom: 0; }
  .corner.left { left: 0; } .corner.right { right: 0; }
  .controls { display: flex; justify-content: center; align-items: center; flex-direction: column; }
  .slider { margin: 20px; width: 80%; }
  .slider input { width: 100%; }
  #example-graph { width: 450px; height: 450px; image-rendering: auto; }
  .chart { display: block; }
  footer { position: fixed; bottom: 0; width: 100%; text-align: center; overflow: hidden; white-space: nowrap; }
  .scrolling-text { display: inline-block; padding-left: 100%; animation: scroll-left 15s linear infinite; }
  @keyframes scroll-left { from { transform: translateX(0); } to { transform: translateX(-100%); } }
</style>
</head>
<body>
<div id="root">
  <div class="corner top left"><img src="__BACKGROUND_URL__" alt=""></div>
  <div class="corner top right"><img src="__BACKGROUND_URL__" alt=""></div>
  <div class="corner bottom left"><img src="__BACKGROUND_URL__" alt=""></div>
  <div class="corner bottom right"><img src="__BACKGROUND_URL__" alt=""></div>
  <div id="scatter-graph" class="chart"></div>
  <div class="controls">
__SLIDERS__
    <div style="text-align: center"><img id="example-graph" class="chart" src="/charts/image" alt="Congratulations Plotly!"></div>
  </div>
  <img id="line-graph" class="chart" src="/charts/line" alt="downloads over time">
  <footer><p class="scrolling-text">__FOOTER__</p></footer>
</div>
<script>
const TICK_MS = __TICK_MS__;
let scatterRevision = null;

async function sendSlider(slider) {
  const response = await fetch("/api/events", {
    method: "POST",
    headers: { "content-type": "application/json" },
    body: JSON.stringify({ source: slider.id, value: Number(slider.value) }),
  });
  if (!response.ok) { return; }
  const update = await response.json();
  document.getElementById("example-graph").src = "/charts/image?rev=" + update.revision;
}

async function pollScatter() {
  try {
    const state = await (await fetch("/api/state")).json();
    const entry = state.charts.find((chart) => chart.chart === "scatter");
    if (!entry || entry.revision === scatterRevision) { return; }
    scatterRevision = entry.revision;
    document.getElementById("scatter-graph").innerHTML = await (await fetch("/charts/scatter")).text();
  } catch (err) {
    console.warn("scatter refresh failed", err);
  }
}

document.querySelectorAll("input[type=range]").forEach((slider) => {
  slider.addEventListener("change", () => sendSlider(slider));
});
pollScatter();
setInterval(pollScatter, TICK_MS);
</script>
</body>
</html>
"##;

/// Renders the single page from the config.
#[must_use]
pub fn render_page(config: &DashboardConfig) -> String {
    let sliders = [&config.big_slider, &config.small_slider]
        .into_iter()
        .map(slider_markup)
        .collect::<Vec<_>>()
        .join("\n");

    PAGE_TEMPLATE
        .replace("__BACKGROUND__", &DASH_BACKGROUND.to_hex())
        .replace("__BACKGROUND_URL__", &escape_html(&config.background_image_url))
        .replace("__SLIDERS__", &sliders)
        .replace("__FOOTER__", &escape_html(&config.footer_text))
        .replace("__TICK_MS__", &config.tick_interval_ms.to_string())
}

fn slider_markup(spec: &SliderSpec) -> String {
    let id = escape_html(&spec.id);
    let options = spec
        .marks()
        .into_iter()
        .map(|mark| format!(r#"<option value="{mark}"></option>"#))
        .collect::<String>();
    format!(
        r#"    <div class="slider">
      <input type="range" id="{id}" min="{min}" max="{max}" step="{step}" value="{value}" list="{id}-marks">
      <datalist id="{id}-marks">{options}</datalist>
    </div>"#,
        min = spec.min,
        max = spec.max,
        step = spec.step,
        value = spec.default,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
