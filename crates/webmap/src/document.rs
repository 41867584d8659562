//! Typed model of the map page.
//!
//! Everything the page's script needs is carried by [`MapDocument`] and
//! serialized into the document as one JSON blob; the JavaScript side only
//! walks this model, it never re-derives colors or thresholds.

use scout_common::{
    BoundingBox, DashboardConfig, Observation, Severity, TimeSlice, ALERT_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// A colored circle marker with a popup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    /// CSS hex fill color from the severity tier.
    pub color: String,
    /// Popup HTML: date, value, and a warning line at critical pressure.
    pub popup: String,
}

impl Marker {
    /// Marker for one observation.
    pub fn for_observation(o: &Observation) -> Self {
        let mut popup = format!("<b>Date:</b> {}<br><b>Value:</b> {}", o.date, o.value);
        if o.value >= ALERT_THRESHOLD {
            popup.push_str("<br><span class=\"popup-warning\">Level &ge; 7</span>");
        }
        Self {
            lat: o.lat,
            lon: o.lon,
            color: Severity::classify(o.value).color().hex(),
            popup,
        }
    }
}

/// An interpolated heat image pinned to geographic bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayImage {
    /// PNG as a `data:` URI.
    pub href: String,
    /// `[[south, west], [north, east]]`
    pub bounds: [[f64; 2]; 2],
    pub opacity: f64,
}

impl OverlayImage {
    pub fn new(href: impl Into<String>, bounds: BoundingBox, opacity: f64) -> Self {
        Self {
            href: href.into(),
            bounds: bounds.leaflet_bounds(),
            opacity,
        }
    }
}

/// One toggleable layer per time slice: markers plus an optional overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliceLayer {
    /// Name shown in the layer control.
    pub label: String,
    pub markers: Vec<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlayImage>,
}

impl SliceLayer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            markers: Vec::new(),
            overlay: None,
        }
    }

    /// A layer carrying one marker per observation of the slice.
    pub fn from_slice(slice: &TimeSlice) -> Self {
        let mut layer = Self::new(slice.label.clone());
        layer.markers = slice
            .observations
            .iter()
            .map(Marker::for_observation)
            .collect();
        layer
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_overlay(mut self, overlay: OverlayImage) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// True when the layer would show nothing.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.overlay.is_none()
    }
}

/// The alert banner shown above the map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertBanner {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_label: Option<String>,
}

impl AlertBanner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            link_url: None,
            link_label: None,
        }
    }

    /// Attach the outbound notification link.
    pub fn with_link(mut self, url: impl Into<String>, label: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self.link_label = Some(label.into());
        self
    }
}

/// The full page model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapDocument {
    pub title: String,
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
    /// Slice layers in source column order, all hidden until toggled on.
    pub layers: Vec<SliceLayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<AlertBanner>,
    /// Inline SVG markup for the trend chart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_svg: Option<String>,
}

impl MapDocument {
    /// A document over the configured base map with no layers yet.
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            title: config.title.clone(),
            center: config.center,
            zoom: config.zoom,
            tile_url: config.tile_url.clone(),
            tile_attribution: config.tile_attribution.clone(),
            layers: Vec::new(),
            banner: None,
            chart_svg: None,
        }
    }

    /// Add a slice layer. Layers with nothing to show are dropped.
    pub fn with_layer(mut self, layer: SliceLayer) -> Self {
        if layer.is_empty() {
            tracing::debug!("skipping empty layer {:?}", layer.label);
            return self;
        }
        self.layers.push(layer);
        self
    }

    pub fn with_banner(mut self, banner: AlertBanner) -> Self {
        self.banner = Some(banner);
        self
    }

    pub fn with_chart(mut self, svg: impl Into<String>) -> Self {
        self.chart_svg = Some(svg.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(value: f64) -> Observation {
        Observation {
            lat: 3.45,
            lon: -76.53,
            date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            value,
        }
    }

    #[test]
    fn test_marker_color_follows_tier() {
        assert_eq!(Marker::for_observation(&obs(0.5)).color, "#0000ff");
        assert_eq!(Marker::for_observation(&obs(4.0)).color, "#ffff00");
        assert_eq!(Marker::for_observation(&obs(9.0)).color, "#ff0000");
    }

    #[test]
    fn test_popup_warning_only_at_threshold() {
        let calm = Marker::for_observation(&obs(6.9));
        assert!(calm.popup.contains("<b>Date:</b> 2025-10-01"));
        assert!(calm.popup.contains("<b>Value:</b> 6.9"));
        assert!(!calm.popup.contains("popup-warning"));

        let critical = Marker::for_observation(&obs(7.0));
        assert!(critical.popup.contains("popup-warning"));
        assert!(critical.popup.contains("Level &ge; 7"));
    }

    #[test]
    fn test_overlay_bounds_in_leaflet_order() {
        let bbox = BoundingBox::new(-76.60, 3.40, -76.50, 3.50);
        let overlay = OverlayImage::new("data:image/png;base64,AAAA", bbox, 0.6);
        assert_eq!(overlay.bounds, [[3.40, -76.60], [3.50, -76.50]]);
    }

    #[test]
    fn test_empty_layers_are_dropped() {
        let config = DashboardConfig::default();
        let doc = MapDocument::new(&config)
            .with_layer(SliceLayer::new("Sampling 1"))
            .with_layer(SliceLayer::new("Sampling 2").with_marker(Marker::for_observation(&obs(3.0))));
        assert_eq!(doc.layers.len(), 1);
        assert_eq!(doc.layers[0].label, "Sampling 2");
    }

    #[test]
    fn test_optional_fields_stay_out_of_json() {
        let doc = MapDocument::new(&DashboardConfig::default());
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("banner").is_none());
        assert!(json.get("chart_svg").is_none());

        let with_banner = MapDocument::new(&DashboardConfig::default())
            .with_banner(AlertBanner::new("alert").with_link("https://wa.me/?text=x", "Notify"));
        let json = serde_json::to_value(&with_banner).unwrap();
        assert_eq!(json["banner"]["message"], "alert");
        assert_eq!(json["banner"]["link_label"], "Notify");
    }
}
