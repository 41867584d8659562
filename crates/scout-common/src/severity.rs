//! Severity classification for pest-pressure values.
//!
//! Values are scouting counts on a nominal 0-10 scale. The five tiers and
//! their cutoffs mirror the agronomists' field card, and the same five
//! colors anchor the continuous overlay ramp in the renderer.

/// Pooled daily means at or above this value trigger the dashboard alert.
///
/// Equal to the lower bound of the Critical tier.
pub const ALERT_THRESHOLD: f64 = 7.0;

/// One of the five ordered pressure tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Minimal,
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// Classify a raw observation value.
    ///
    /// Total over all of `f64`; out-of-range values saturate into the end
    /// tiers. The cascade is asymmetric around 4: exactly 4 is Moderate,
    /// while the rest of (3, 6] is High. NaN falls through to Critical;
    /// ingestion never admits non-finite values.
    pub fn classify(value: f64) -> Severity {
        if value <= 1.0 {
            Severity::Minimal
        } else if value <= 3.0 {
            Severity::Low
        } else if value == 4.0 {
            Severity::Moderate
        } else if value <= 6.0 {
            Severity::High
        } else {
            Severity::Critical
        }
    }

    /// Ordinal position of the tier, `Minimal` = 0 through `Critical` = 4.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Minimal => 0,
            Severity::Low => 1,
            Severity::Moderate => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    /// Marker and chart color for the tier.
    pub fn color(&self) -> Color {
        match self {
            Severity::Minimal => Color::BLUE,
            Severity::Low => Color::GREEN,
            Severity::Moderate => Color::YELLOW,
            Severity::High => Color::ORANGE,
            Severity::Critical => Color::RED,
        }
    }
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    // CSS color values, shared with the overlay ramp anchors.
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const GREEN: Color = Color::new(0, 128, 0);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const ORANGE: Color = Color::new(255, 165, 0);
    pub const RED: Color = Color::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. `#ffa500`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
