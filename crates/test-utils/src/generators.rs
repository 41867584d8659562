//! Test data generators for synthetic observation scatters.
//!
//! These build predictable surveys around the default Cauca valley center
//! so interpolation and aggregation tests can assert exact values.

use chrono::NaiveDate;
use scout_common::{Observation, Survey, TimeSlice};

/// Shorthand `NaiveDate` constructor; panics on invalid input (test-only).
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// A single observation on the given date.
pub fn obs(lat: f64, lon: f64, date: NaiveDate, value: f64) -> Observation {
    Observation {
        lat,
        lon,
        date,
        value,
    }
}

/// Creates a `cols` x `rows` scatter of observations with predictable values.
///
/// Points start at `(lat0, lon0)` and advance `step` degrees per column
/// (east) and per row (north). All points share the date 2025-10-01. The
/// value of each point is `value_fn(col, row)`, so tests can encode position
/// into value and check interpolation against it.
pub fn scatter_grid(
    lat0: f64,
    lon0: f64,
    cols: usize,
    rows: usize,
    step: f64,
    value_fn: impl Fn(usize, usize) -> f64,
) -> Vec<Observation> {
    let day = date(2025, 10, 1);
    let mut points = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            points.push(Observation {
                lat: lat0 + row as f64 * step,
                lon: lon0 + col as f64 * step,
                date: day,
                value: value_fn(col, row),
            });
        }
    }
    points
}

/// A slice with the given column index wrapping the observations.
pub fn slice_of(index: u8, observations: Vec<Observation>) -> TimeSlice {
    let mut slice = TimeSlice::new(index);
    slice.observations = observations;
    slice
}

/// A survey with one slice per observation list, indexed from 1.
pub fn survey_of(slices: Vec<Vec<Observation>>) -> Survey {
    Survey::new(
        slices
            .into_iter()
            .enumerate()
            .map(|(i, observations)| slice_of((i + 1) as u8, observations))
            .collect(),
    )
}
