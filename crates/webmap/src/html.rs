//! Self-contained HTML rendering of the map document.
//!
//! The page is a fixed template: Leaflet and its locate control from CDN,
//! a JSON island holding the serialized [`MapDocument`], and a script that
//! builds the map from the model. `render` only substitutes the title and
//! the JSON; all layout lives in the template.

use crate::document::MapDocument;
use thiserror::Error;

/// Map document rendering errors.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Failed to serialize map model: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl MapDocument {
    /// Render the document into one self-contained HTML page.
    pub fn render(&self) -> Result<String, ComposeError> {
        let json = serde_json::to_string(self)?;
        // A `</` inside the inline script block would end it early.
        let json = json.replace("</", "<\\/");

        tracing::debug!(
            "rendering page with {} layer(s), banner: {}, chart: {}",
            self.layers.len(),
            self.banner.is_some(),
            self.chart_svg.is_some()
        );

        Ok(PAGE_TEMPLATE
            .replace("__SCOUTMAP_TITLE__", &escape_html(&self.title))
            .replace("__SCOUTMAP_JSON__", &json))
    }
}

/// Minimal HTML text escaping for the title slot.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>__SCOUTMAP_TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<link rel="stylesheet" href="https://unpkg.com/leaflet.locatecontrol@0.79.0/dist/L.Control.Locate.min.css" />
<script src="https://unpkg.com/leaflet.locatecontrol@0.79.0/dist/L.Control.Locate.min.js"></script>
<style>
  body { margin: 0; font-family: system-ui, sans-serif; background: #fafafa; }
  header { padding: 12px 16px; }
  header h1 { margin: 0; font-size: 1.4em; }
  #alert-banner { display: none; margin: 0 16px 12px; padding: 12px 16px; background: #c62828; color: #fff; font-weight: bold; border-radius: 4px; }
  #alert-banner a { color: #ffe082; margin-left: 12px; }
  #trend-chart { display: none; margin: 0 16px 12px; padding: 8px; background: #fff; border: 1px solid #ddd; border-radius: 4px; overflow-x: auto; }
  #map { height: 70vh; margin: 0 16px 16px; border: 1px solid #ddd; border-radius: 4px; }
  .popup-warning { color: #c62828; font-weight: bold; }
</style>
</head>
<body>
<header><h1 id="page-title"></h1></header>
<div id="alert-banner"></div>
<div id="trend-chart"></div>
<div id="map"></div>
<script>
var model = __SCOUTMAP_JSON__;

document.getElementById('page-title').textContent = model.title;

if (model.banner) {
  var banner = document.getElementById('alert-banner');
  var text = document.createElement('span');
  text.textContent = model.banner.message;
  banner.appendChild(text);
  if (model.banner.link_url) {
    var link = document.createElement('a');
    link.href = model.banner.link_url;
    link.target = '_blank';
    link.rel = 'noopener';
    link.textContent = model.banner.link_label || model.banner.link_url;
    banner.appendChild(link);
  }
  banner.style.display = 'block';
}

if (model.chart_svg) {
  var chart = document.getElementById('trend-chart');
  chart.innerHTML = model.chart_svg;
  chart.style.display = 'block';
}

var map = L.map('map').setView(model.center, model.zoom);
L.tileLayer(model.tile_url, { attribution: model.tile_attribution }).addTo(map);
L.control.locate().addTo(map);

var overlays = {};
model.layers.forEach(function (layer) {
  var group = L.layerGroup();
  layer.markers.forEach(function (m) {
    L.circleMarker([m.lat, m.lon], {
      radius: 7,
      color: m.color,
      fillColor: m.color,
      fillOpacity: 0.85
    }).bindPopup(m.popup).addTo(group);
  });
  if (layer.overlay) {
    L.imageOverlay(layer.overlay.href, layer.overlay.bounds, {
      opacity: layer.overlay.opacity
    }).addTo(group);
  }
  overlays[layer.label] = group;
});
if (model.layers.length) {
  L.control.layers(null, overlays, { collapsed: false, position: 'topright' }).addTo(map);
}
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"Pest <watch> & "friends""#),
            "Pest &lt;watch&gt; &amp; &quot;friends&quot;"
        );
        assert_eq!(escape_html("plain title"), "plain title");
    }
}
