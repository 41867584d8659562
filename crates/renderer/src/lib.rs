//! Surface and image rendering for scouting observations.
//!
//! Implements the visual pipeline for one time slice:
//! - Delaunay triangulation of the observation scatter
//! - Piecewise-linear interpolation onto a regular raster
//! - Color ramp over the fixed 0-10 pressure scale
//! - PNG overlay encoding (indexed or RGBA)
//! - The pooled daily-mean trend chart (SVG)

pub mod chart;
pub mod colormap;
pub mod error;
pub mod overlay;
pub mod png;
pub mod surface;
pub mod triangulate;

pub use chart::{render_trend_chart, ChartError};
pub use colormap::pressure_color;
pub use error::RenderError;
pub use overlay::{render_overlay, Overlay};
pub use surface::{rasterize_slice, Raster};
pub use triangulate::{triangulate, Point, Triangle};
