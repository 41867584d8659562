//! CSV row parsing with drop accounting.

use crate::error::{DataError, Result};
use crate::schema::TableSchema;
use scout_common::{parse_observation_date, Observation, Survey, TimeSlice};
use std::path::Path;

/// The outcome of a successful ingestion: the typed survey plus every
/// non-fatal drop that happened along the way.
#[derive(Debug)]
pub struct IngestOutcome {
    pub survey: Survey,
    pub dropped: Vec<DataError>,
}

impl IngestOutcome {
    /// True when every cell made it into the survey.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Ingest a CSV file from disk.
pub fn ingest_file(path: impl AsRef<Path>) -> Result<IngestOutcome> {
    let data = std::fs::read(path)?;
    ingest_csv(&data)
}

/// Ingest raw CSV bytes.
///
/// Row semantics: a `lat`/`lon` cell that does not parse as a finite number
/// drops the whole row. Within a surviving row, a pair with either cell
/// empty is a station not sampled on that pass (silently absent), while
/// non-empty unparseable content drops just that pair. Every drop is logged
/// and collected into [`IngestOutcome::dropped`].
pub fn ingest_csv(data: &[u8]) -> Result<IngestOutcome> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let schema = TableSchema::discover(&headers)?;

    let mut slices: Vec<TimeSlice> = schema
        .slices
        .iter()
        .map(|sc| TimeSlice::new(sc.index))
        .collect();
    let mut dropped = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;

        let lat = match read_coordinate(&record, schema.lat_col, row, "lat", &mut dropped) {
            Some(v) => v,
            None => continue,
        };
        let lon = match read_coordinate(&record, schema.lon_col, row, "lon", &mut dropped) {
            Some(v) => v,
            None => continue,
        };

        for (slot, sc) in schema.slices.iter().enumerate() {
            let date_raw = record.get(sc.date_col).unwrap_or("");
            let value_raw = record.get(sc.value_col).unwrap_or("");
            if date_raw.is_empty() || value_raw.is_empty() {
                // Station not sampled on this pass.
                continue;
            }

            let date = match parse_observation_date(date_raw) {
                Ok(d) => d,
                Err(_) => {
                    let err = DataError::BadDate {
                        row,
                        column: format!("date{}", sc.index),
                        raw: date_raw.to_string(),
                    };
                    tracing::warn!("{err}");
                    dropped.push(err);
                    continue;
                }
            };

            let value = match value_raw.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    let err = DataError::BadValue {
                        row,
                        column: format!("value{}", sc.index),
                        raw: value_raw.to_string(),
                    };
                    tracing::warn!("{err}");
                    dropped.push(err);
                    continue;
                }
            };

            slices[slot].observations.push(Observation {
                lat,
                lon,
                date,
                value,
            });
        }
    }

    Ok(IngestOutcome {
        survey: Survey::new(slices),
        dropped,
    })
}

fn read_coordinate(
    record: &csv::StringRecord,
    col: usize,
    row: usize,
    column: &str,
    dropped: &mut Vec<DataError>,
) -> Option<f64> {
    let raw = record.get(col).unwrap_or("");
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            let err = DataError::BadCoordinate {
                row,
                column: column.to_string(),
                raw: raw.to_string(),
            };
            tracing::warn!("{err}");
            dropped.push(err);
            None
        }
    }
}
