//! The fixed pressure color ramp.
//!
//! Continuous five-stop gradient anchored at the severity-tier colors on
//! the global 0-10 scale: blue at 0, green at 2, yellow at 4, orange at 6,
//! red at 10. Every slice shares this ramp, so equal values render as equal
//! colors across layers. Note the anchors are a smooth reference for the
//! bucketed marker scale, not a copy of it: the ramp and the classifier
//! agree exactly at 4, while mid-tier values blend.

use scout_common::Color;

/// Pressure color scale (0-10 value range).
///
/// Values outside the range clamp to the end colors; this is display-only
/// clamping, raster values themselves are never altered. NaN takes the
/// final arm, but overlay rendering turns NaN cells transparent before any
/// color lookup.
pub fn pressure_color(value: f64) -> Color {
    match value {
        v if v <= 0.0 => Color::BLUE,
        v if v < 2.0 => interpolate_color(Color::BLUE, Color::GREEN, v / 2.0),
        v if v < 4.0 => interpolate_color(Color::GREEN, Color::YELLOW, (v - 2.0) / 2.0),
        v if v < 6.0 => interpolate_color(Color::YELLOW, Color::ORANGE, (v - 4.0) / 2.0),
        v if v < 10.0 => interpolate_color(Color::ORANGE, Color::RED, (v - 6.0) / 4.0),
        _ => Color::RED,
    }
}

/// Linear color interpolation.
fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f64 * t_inv) + (color2.r as f64 * t)) as u8,
        ((color1.g as f64 * t_inv) + (color2.g as f64 * t)) as u8,
        ((color1.b as f64 * t_inv) + (color2.b as f64 * t)) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_values_hit_tier_colors() {
        assert_eq!(pressure_color(0.0), Color::BLUE);
        assert_eq!(pressure_color(2.0), Color::GREEN);
        assert_eq!(pressure_color(4.0), Color::YELLOW);
        assert_eq!(pressure_color(6.0), Color::ORANGE);
        assert_eq!(pressure_color(10.0), Color::RED);
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(pressure_color(-3.0), Color::BLUE);
        assert_eq!(pressure_color(25.0), Color::RED);
    }

    #[test]
    fn test_midpoint_blend() {
        // Halfway from blue to green.
        let mid = pressure_color(1.0);
        assert_eq!(mid, Color::new(0, 64, 127));
    }

    #[test]
    fn test_continuity_near_anchor() {
        let below = pressure_color(3.999);
        let at = pressure_color(4.0);
        assert!((below.r as i16 - at.r as i16).abs() <= 2);
        assert!((below.g as i16 - at.g as i16).abs() <= 2);
        assert!((below.b as i16 - at.b as i16).abs() <= 2);
    }
}
