//! The pooled daily-mean trend chart.

use chrono::{Duration, NaiveDate};
use plotters::coord::types::RangedDate;
use plotters::prelude::*;
use scout_common::Severity;
use thiserror::Error;

/// Chart rendering errors.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No daily means to chart")]
    NoData,

    #[error("Chart backend error: {0}")]
    Backend(String),
}

/// Render the daily-mean trend as an SVG document string.
///
/// Input must already be in chronological order (the aggregator's output
/// order). The y axis is fixed to the 0-10 scale. Each segment between
/// consecutive days takes the tier color of its starting mean; each point
/// gets a tier-colored marker over a black ring and a one-decimal
/// annotation above it.
pub fn render_trend_chart(
    daily: &[(NaiveDate, f64)],
    width: u32,
    height: u32,
) -> Result<String, ChartError> {
    if daily.is_empty() {
        return Err(ChartError::NoData);
    }

    let first = daily[0].0;
    let last = daily[daily.len() - 1].0;
    // A single date still needs a non-empty x range.
    let (x_min, x_max) = if first == last {
        (first - Duration::days(1), last + Duration::days(1))
    } else {
        (first, last)
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(backend_err)?;

        let x_range: RangedDate<NaiveDate> = (x_min..x_max).into();
        let mut chart = ChartBuilder::on(&root)
            .margin(16)
            .caption("Mean pressure per sampling date", ("sans-serif", 18))
            .x_label_area_size(64)
            .y_label_area_size(42)
            .build_cartesian_2d(x_range, 0f64..10f64)
            .map_err(backend_err)?;

        chart
            .configure_mesh()
            .x_labels(daily.len().clamp(2, 12))
            .x_label_formatter(&|d| d.format("%Y-%m-%d").to_string())
            .x_label_style(
                TextStyle::from(("sans-serif", 11).into_font())
                    .transform(FontTransform::Rotate90),
            )
            .y_desc("Mean value")
            .light_line_style(&RGBColor(235, 235, 235))
            .draw()
            .map_err(backend_err)?;

        // Segments take the color of their starting day's tier.
        for pair in daily.windows(2) {
            let (d0, v0) = pair[0];
            let (d1, v1) = pair[1];
            chart
                .draw_series(LineSeries::new(
                    vec![(d0, v0), (d1, v1)],
                    tier_rgb(v0).stroke_width(4),
                ))
                .map_err(backend_err)?;
        }

        // Tier-colored markers over a black ring.
        chart
            .draw_series(
                daily
                    .iter()
                    .map(|&(d, v)| Circle::new((d, v), 7, BLACK.filled())),
            )
            .map_err(backend_err)?;
        chart
            .draw_series(
                daily
                    .iter()
                    .map(|&(d, v)| Circle::new((d, v), 5, tier_rgb(v).filled())),
            )
            .map_err(backend_err)?;

        // One-decimal annotations just above each point.
        chart
            .draw_series(daily.iter().map(|&(d, v)| {
                Text::new(
                    format!("{v:.1}"),
                    (d, (v + 0.45).min(9.8)),
                    ("sans-serif", 12).into_font(),
                )
            }))
            .map_err(backend_err)?;

        root.present().map_err(backend_err)?;
    }

    Ok(svg)
}

fn tier_rgb(value: f64) -> RGBColor {
    let c = Severity::classify(value).color();
    RGBColor(c.r, c.g, c.b)
}

fn backend_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Backend(e.to_string())
}
