//! The dashboard build pipeline.
//!
//! One synchronous pass: ingest the table, build a raster + overlay per
//! slice, aggregate the trend, then write `map.html` and `chart.svg`.

use anyhow::{Context, Result};
use std::path::Path;

use ingestion::{ingest_file, IngestError, IngestOutcome};
use renderer::chart::{render_trend_chart, ChartError};
use renderer::{rasterize_slice, render_overlay};
use scout_common::{DashboardConfig, TimeSlice};
use tracing::{error, info, warn};
use trend::summarize;
use webmap::{AlertBanner, MapDocument, OverlayImage, SliceLayer};

// 8x5 inches at 100 dpi.
const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 500;

/// Build the dashboard artifacts from a scouting CSV.
///
/// A schema-level problem (missing `lat`/`lon` header, no date/value pairs)
/// still produces a base map page so the upload is visibly broken rather
/// than silently absent; data-level problems were already dropped row by
/// row during ingestion.
pub fn render(input: &Path, out_dir: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let outcome = match ingest_file(input) {
        Ok(outcome) => outcome,
        Err(IngestError::Schema(err)) => {
            error!("{err}; writing base map only");
            let html = MapDocument::new(&config).render()?;
            return write_artifact(&out_dir.join("map.html"), html.as_bytes());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to ingest {}", input.display()));
        }
    };
    log_ingest_summary(&outcome);
    let survey = outcome.survey;

    let mut document = MapDocument::new(&config);
    for slice in &survey.slices {
        document = document.with_layer(build_layer(slice, &config));
    }

    let summary = summarize(&survey);
    if summary.alert.triggered {
        let dates: Vec<String> = summary.alert.dates.iter().map(|d| d.to_string()).collect();
        warn!(
            "daily mean at or above alert threshold on: {}",
            dates.join(", ")
        );
        document = document.with_banner(
            AlertBanner::new(&config.alert_message)
                .with_link(&config.alert_link_url, &config.alert_link_label),
        );
    }

    match render_trend_chart(&summary.points(), CHART_WIDTH, CHART_HEIGHT) {
        Ok(svg) => {
            write_artifact(&out_dir.join("chart.svg"), svg.as_bytes())?;
            document = document.with_chart(svg);
        }
        Err(ChartError::NoData) => warn!("no daily means; skipping the trend chart"),
        Err(err) => return Err(err).context("Failed to render the trend chart"),
    }

    let html = document.render()?;
    write_artifact(&out_dir.join("map.html"), html.as_bytes())
}

/// Write the empty scouting sheet template.
pub fn write_template(output: &Path) -> Result<()> {
    ingestion::write_template(output)
        .with_context(|| format!("Failed to write template {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

/// Markers for every observation of the slice, plus the interpolated heat
/// overlay when the scatter supports one.
fn build_layer(slice: &TimeSlice, config: &DashboardConfig) -> SliceLayer {
    let mut layer = SliceLayer::from_slice(slice);

    let bbox = match slice.bounds() {
        Some(bbox) if !bbox.is_degenerate() => bbox,
        _ => return layer,
    };

    let raster = rasterize_slice(
        &slice.observations,
        bbox,
        config.grid_resolution,
        config.grid_resolution,
    );
    if raster.defined_cells() == 0 {
        info!(
            "slice {}: no interpolation surface from {} observation(s)",
            slice.index,
            slice.observations.len()
        );
        return layer;
    }

    match render_overlay(&raster, config.overlay_opacity) {
        Ok(overlay) => {
            layer = layer.with_overlay(OverlayImage::new(
                overlay.data_uri(),
                overlay.bounds,
                config.overlay_opacity,
            ));
        }
        Err(err) => {
            // Markers still render without the overlay.
            warn!("slice {}: {err}", slice.index);
        }
    }
    layer
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(DashboardConfig::default()),
    }
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn log_ingest_summary(outcome: &IngestOutcome) {
    info!(
        "ingested {} observation(s) across {} slice(s)",
        outcome.survey.observation_count(),
        outcome.survey.slices.len()
    );
    if !outcome.is_clean() {
        warn!(
            "dropped {} bad row(s)/cell pair(s) during ingestion",
            outcome.dropped.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{write_csv_fixture, DIRTY_CSV, MISSING_LON_CSV, TWO_SLICE_CSV};

    #[test]
    fn test_render_writes_both_artifacts() {
        let input = write_csv_fixture(TWO_SLICE_CSV);
        let out = tempfile::tempdir().unwrap();

        render(input.path(), out.path(), None).unwrap();

        let map = std::fs::read_to_string(out.path().join("map.html")).unwrap();
        assert!(map.contains("Sampling 1"));
        assert!(map.contains("Sampling 2"));
        // Slice 1 has three non-collinear stations, so it gets an overlay
        assert!(map.contains("data:image/png;base64,"));
        // The 2025-10-09 mean is 8.0, so the alert banner rides along
        assert!(map.contains("\"banner\""));

        let chart = std::fs::read_to_string(out.path().join("chart.svg")).unwrap();
        assert!(chart.contains("<svg"));
        // The same SVG rides along inside the page model
        assert!(map.contains("\"chart_svg\""));
    }

    #[test]
    fn test_dirty_rows_drop_without_sinking_the_page() {
        let input = write_csv_fixture(DIRTY_CSV);
        let out = tempfile::tempdir().unwrap();

        render(input.path(), out.path(), None).unwrap();

        let map = std::fs::read_to_string(out.path().join("map.html")).unwrap();
        assert!(map.contains("Sampling 1"));
        // The two surviving stations cannot triangulate, so markers only
        assert!(!map.contains("data:image/png;base64,"));
        // Their mean is 4.5, below the alert line
        assert!(!map.contains("\"banner\""));
        assert!(out.path().join("chart.svg").exists());
    }

    #[test]
    fn test_schema_error_still_writes_base_map() {
        let input = write_csv_fixture(MISSING_LON_CSV);
        let out = tempfile::tempdir().unwrap();

        render(input.path(), out.path(), None).unwrap();

        let map = std::fs::read_to_string(out.path().join("map.html")).unwrap();
        assert!(map.contains("\"layers\":[]"));
        assert!(!out.path().join("chart.svg").exists());
    }

    #[test]
    fn test_template_round_trips_through_ingestion() {
        let out = tempfile::tempdir().unwrap();
        let path = out.path().join("template.csv");

        write_template(&path).unwrap();

        let outcome = ingest_file(&path).unwrap();
        assert!(outcome.is_clean());
        assert_eq!(outcome.survey.slices.len(), 1);
        assert_eq!(outcome.survey.observation_count(), 2);
    }

    #[test]
    fn test_template_input_renders_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("template.csv");
        let out = dir.path().join("out");

        write_template(&input).unwrap();
        render(&input, &out, None).unwrap();

        assert!(out.join("map.html").exists());
        // Both example stations share one date, so the chart has one mean
        let chart = std::fs::read_to_string(out.join("chart.svg")).unwrap();
        assert!(chart.contains("5.5"));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let out = tempfile::tempdir().unwrap();
        assert!(render(Path::new("does-not-exist.csv"), out.path(), None).is_err());
    }
}
