//! Header discovery for observation tables.

use crate::error::SchemaError;

/// Highest `date{N}`/`value{N}` pair index probed during discovery.
pub const MAX_SLICE_PAIRS: u8 = 9;

/// Column positions for one time slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceColumns {
    /// The N of the `date{N}`/`value{N}` pair.
    pub index: u8,
    pub date_col: usize,
    pub value_col: usize,
}

/// Resolved column layout of an uploaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub lat_col: usize,
    pub lon_col: usize,
    /// Complete pairs in ascending N. Gaps are fine; a `date3` without a
    /// `value3` is ignored, not an error.
    pub slices: Vec<SliceColumns>,
}

impl TableSchema {
    /// Discover the schema from a header record.
    ///
    /// Column names are exact (after trimming); unrecognized columns are
    /// ignored. Fails when `lat` or `lon` is absent, or when no complete
    /// pair exists.
    pub fn discover(headers: &csv::StringRecord) -> Result<Self, SchemaError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let lat_col = find("lat").ok_or(SchemaError::MissingColumn("lat"))?;
        let lon_col = find("lon").ok_or(SchemaError::MissingColumn("lon"))?;

        let mut slices = Vec::new();
        for index in 1..=MAX_SLICE_PAIRS {
            let date_col = find(&format!("date{index}"));
            let value_col = find(&format!("value{index}"));
            if let (Some(date_col), Some(value_col)) = (date_col, value_col) {
                slices.push(SliceColumns {
                    index,
                    date_col,
                    value_col,
                });
            }
        }

        if slices.is_empty() {
            return Err(SchemaError::NoTimeSlices);
        }

        tracing::debug!(
            "discovered schema: lat={}, lon={}, {} slice pair(s)",
            lat_col,
            lon_col,
            slices.len()
        );

        Ok(Self {
            lat_col,
            lon_col,
            slices,
        })
    }
}
