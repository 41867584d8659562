//! Dashboard configuration.
//!
//! JSON-based configuration for the map page and overlay rendering. Every
//! field has a default matching the reference deployment over the Cauca
//! valley, so `{}` is a complete config. The severity scale and the alert
//! threshold are fixed constants, not configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Page title, also used as the map document heading.
    #[serde(default = "default_title")]
    pub title: String,

    /// Initial map center as `[lat, lon]`.
    #[serde(default = "default_center")]
    pub center: [f64; 2],

    /// Initial map zoom level.
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Base tile layer URL template.
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    /// Attribution line for the base tile layer.
    #[serde(default = "default_tile_attribution")]
    pub tile_attribution: String,

    /// Interpolation grid size per axis (the raster is N x N).
    #[serde(default = "default_grid_resolution")]
    pub grid_resolution: usize,

    /// Heat overlay opacity in [0, 1].
    #[serde(default = "default_overlay_opacity")]
    pub overlay_opacity: f64,

    /// Banner text shown when the alert triggers.
    #[serde(default = "default_alert_message")]
    pub alert_message: String,

    /// Outbound notification link shown next to the alert banner.
    #[serde(default = "default_alert_link_url")]
    pub alert_link_url: String,

    /// Label for the notification link.
    #[serde(default = "default_alert_link_label")]
    pub alert_link_label: String,
}

fn default_title() -> String {
    "Pest scouting dashboard".to_string()
}

fn default_center() -> [f64; 2] {
    [3.45, -76.53]
}

fn default_zoom() -> u8 {
    8
}

fn default_tile_url() -> String {
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
        .to_string()
}

fn default_tile_attribution() -> String {
    "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, \
     Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community"
        .to_string()
}

fn default_grid_resolution() -> usize {
    200
}

fn default_overlay_opacity() -> f64 {
    0.6
}

fn default_alert_message() -> String {
    "High pest pressure detected in the monitored field".to_string()
}

fn default_alert_link_url() -> String {
    "https://wa.me/?text=Alert:+high+pest+pressure+detected+in+the+monitored+field".to_string()
}

fn default_alert_link_label() -> String {
    "Send alert via WhatsApp".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            center: default_center(),
            zoom: default_zoom(),
            tile_url: default_tile_url(),
            tile_attribution: default_tile_attribution(),
            grid_resolution: default_grid_resolution(),
            overlay_opacity: default_overlay_opacity(),
            alert_message: default_alert_message(),
            alert_link_url: default_alert_link_url(),
            alert_link_label: default_alert_link_label(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_resolution < 2 {
            return Err(ConfigError::ValidationError(
                "grid_resolution must be at least 2".to_string(),
            ));
        }
        if self.grid_resolution > 2048 {
            return Err(ConfigError::ValidationError(
                "grid_resolution must be at most 2048".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(ConfigError::ValidationError(
                "overlay_opacity must be within [0, 1]".to_string(),
            ));
        }
        if !self.center[0].is_finite() || !self.center[1].is_finite() {
            return Err(ConfigError::ValidationError(
                "center coordinates must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_complete() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config.center, [3.45, -76.53]);
        assert_eq!(config.zoom, 8);
        assert_eq!(config.grid_resolution, 200);
        assert_eq!(config.overlay_opacity, 0.6);
        assert!(config.tile_url.contains("World_Imagery"));
    }

    #[test]
    fn test_partial_override() {
        let config =
            DashboardConfig::from_json(r#"{"zoom": 12, "grid_resolution": 100}"#).unwrap();
        assert_eq!(config.zoom, 12);
        assert_eq!(config.grid_resolution, 100);
        // Untouched fields keep their defaults.
        assert_eq!(config.overlay_opacity, 0.6);
    }

    #[test]
    fn test_validation_rejects_bad_ranges() {
        assert!(DashboardConfig::from_json(r#"{"grid_resolution": 1}"#).is_err());
        assert!(DashboardConfig::from_json(r#"{"grid_resolution": 4096}"#).is_err());
        assert!(DashboardConfig::from_json(r#"{"overlay_opacity": 1.5}"#).is_err());
        assert!(DashboardConfig::from_json(r#"{"overlay_opacity": -0.1}"#).is_err());
    }

    #[test]
    fn test_default_matches_empty_json() {
        let from_json = DashboardConfig::from_json("{}").unwrap();
        let from_default = DashboardConfig::default();
        assert_eq!(from_json.title, from_default.title);
        assert_eq!(from_json.center, from_default.center);
        assert_eq!(from_json.tile_url, from_default.tile_url);
        assert_eq!(from_json.alert_link_url, from_default.alert_link_url);
    }
}
