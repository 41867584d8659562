//! Piecewise-linear interpolation of scattered observations onto a raster.

use crate::triangulate::{triangulate, Point, Triangle};
use scout_common::{BoundingBox, Observation};

/// A regular grid of interpolated values over a bounding box.
///
/// Row-major storage with row 0 at the SOUTH edge and column 0 at the west
/// edge; sample nodes sit on an inclusive-endpoint lattice (node `j` at
/// `min + j * extent / (n - 1)`). NaN marks cells with no data.
#[derive(Debug, Clone)]
pub struct Raster {
    values: Vec<f32>,
    width: usize,
    height: usize,
    bbox: BoundingBox,
}

impl Raster {
    fn no_data(width: usize, height: usize, bbox: BoundingBox) -> Self {
        Self {
            values: vec![f32::NAN; width * height],
            width,
            height,
            bbox,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Value at (col, row); row 0 is the south row.
    pub fn get(&self, col: usize, row: usize) -> f32 {
        self.values[row * self.width + col]
    }

    /// Raw row-major values, south row first.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of cells holding a value.
    pub fn defined_cells(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}

/// Interpolate one slice's observations onto a `width` x `height` raster
/// over `bbox`.
///
/// Delaunay triangulation followed by barycentric interpolation; cells
/// outside the scatter's convex hull stay NaN, never extrapolated. Exact
/// duplicate stations keep their first value. Degenerate input (fewer than
/// three distinct points, a collinear scatter, or a zero-area bbox) yields
/// an all-NaN raster rather than an error. Values are not clamped to the
/// 0-10 scale here; only the display ramp clamps.
pub fn rasterize_slice(
    observations: &[Observation],
    bbox: BoundingBox,
    width: usize,
    height: usize,
) -> Raster {
    let mut raster = Raster::no_data(width, height, bbox);
    if width < 2 || height < 2 || bbox.is_degenerate() {
        return raster;
    }

    let mut points: Vec<Point> = Vec::with_capacity(observations.len());
    let mut values: Vec<f64> = Vec::with_capacity(observations.len());
    for o in observations {
        if points.iter().any(|q| q.x == o.lon && q.y == o.lat) {
            continue;
        }
        points.push(Point::new(o.lon, o.lat));
        values.push(o.value);
    }

    let triangles = triangulate(&points);
    if triangles.is_empty() {
        tracing::debug!(
            "no triangulation from {} station(s); overlay stays empty",
            points.len()
        );
        return raster;
    }

    for tri in &triangles {
        fill_triangle(&mut raster, &points, &values, *tri);
    }
    raster
}

/// Barycentric tolerance: sample nodes exactly on a hull edge or vertex
/// still count as inside.
const EDGE_TOL: f64 = -1e-9;

fn fill_triangle(raster: &mut Raster, points: &[Point], values: &[f64], tri: Triangle) {
    let [ia, ib, ic] = tri;
    let (a, b, c) = (points[ia], points[ib], points[ic]);
    let bbox = raster.bbox;

    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() < 1e-30 {
        return;
    }

    let dx = bbox.width() / (raster.width - 1) as f64;
    let dy = bbox.height() / (raster.height - 1) as f64;

    // Cell index range covering the triangle, clamped to the raster. Casts
    // from negative floats saturate to 0.
    let min_x = a.x.min(b.x).min(c.x);
    let max_x = a.x.max(b.x).max(c.x);
    let min_y = a.y.min(b.y).min(c.y);
    let max_y = a.y.max(b.y).max(c.y);

    let col_min = ((min_x - bbox.min_lon) / dx).floor().max(0.0) as usize;
    let col_max = (((max_x - bbox.min_lon) / dx).ceil() as usize).min(raster.width - 1);
    let row_min = ((min_y - bbox.min_lat) / dy).floor().max(0.0) as usize;
    let row_max = (((max_y - bbox.min_lat) / dy).ceil() as usize).min(raster.height - 1);

    for row in row_min..=row_max {
        let y = bbox.min_lat + row as f64 * dy;
        for col in col_min..=col_max {
            let x = bbox.min_lon + col as f64 * dx;

            let l0 = ((b.y - c.y) * (x - c.x) + (c.x - b.x) * (y - c.y)) / denom;
            let l1 = ((c.y - a.y) * (x - c.x) + (a.x - c.x) * (y - c.y)) / denom;
            let l2 = 1.0 - l0 - l1;

            if l0 >= EDGE_TOL && l1 >= EDGE_TOL && l2 >= EDGE_TOL {
                let v = l0 * values[ia] + l1 * values[ib] + l2 * values[ic];
                raster.values[row * raster.width + col] = v as f32;
            }
        }
    }
}
