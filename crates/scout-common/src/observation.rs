//! Core observation table types.

use crate::bbox::BoundingBox;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single geotagged pest-pressure reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub lat: f64,
    pub lon: f64,
    pub date: NaiveDate,
    pub value: f64,
}

/// One sampling pass over the field: every observation parsed from a
/// `date{N}`/`value{N}` column pair.
///
/// Slices are ordered by their source column index, not chronologically;
/// a slice may even mix dates when stations were visited on different days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlice {
    /// The N of the source `date{N}`/`value{N}` pair.
    pub index: u8,

    /// Display label for the layer control.
    pub label: String,

    pub observations: Vec<Observation>,
}

impl TimeSlice {
    pub fn new(index: u8) -> Self {
        Self {
            index,
            label: format!("Sampling {index}"),
            observations: Vec::new(),
        }
    }

    /// Tight bounds over the slice's points, if it has any.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.observations.iter().map(|o| (o.lon, o.lat)))
    }
}

/// The full ingested table: time slices in ascending column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub slices: Vec<TimeSlice>,
}

impl Survey {
    pub fn new(slices: Vec<TimeSlice>) -> Self {
        Self { slices }
    }

    /// Total observations across all slices.
    pub fn observation_count(&self) -> usize {
        self.slices.iter().map(|s| s.observations.len()).sum()
    }

    /// Iterate every observation, pooled across slices.
    pub fn all_observations(&self) -> impl Iterator<Item = &Observation> {
        self.slices.iter().flat_map(|s| s.observations.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.observation_count() == 0
    }
}
