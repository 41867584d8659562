//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in plain WGS84 degrees.
///
/// No projection handling: longitudes and latitudes are treated as a flat
/// cartesian plane, which is all the overlay placement needs at field scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Tight bounds over a set of `(lon, lat)` points.
    ///
    /// Returns `None` when the iterator yields no finite coordinate pair.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut bounds: Option<BoundingBox> = None;
        for (lon, lat) in points {
            if !lon.is_finite() || !lat.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                None => BoundingBox::new(lon, lat, lon, lat),
                Some(b) => BoundingBox::new(
                    b.min_lon.min(lon),
                    b.min_lat.min(lat),
                    b.max_lon.max(lon),
                    b.max_lat.max(lat),
                ),
            });
        }
        bounds
    }

    /// Width of the bounding box in degrees longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounding box in degrees latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a point is contained within this bbox.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// True when the box spans no area (a single point or a line of points).
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Corners in Leaflet order: `[[south, west], [north, east]]`.
    pub fn leaflet_bounds(&self) -> [[f64; 2]; 2] {
        [[self.min_lat, self.min_lon], [self.max_lat, self.max_lon]]
    }
}
