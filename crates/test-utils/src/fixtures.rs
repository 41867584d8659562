//! Canned observation tables for ingestion and pipeline tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Default map center shared by fixtures (Cauca valley).
pub const CENTER_LAT: f64 = 3.45;
pub const CENTER_LON: f64 = -76.53;

/// A well-formed table with two sampling passes over three stations.
///
/// Slice 1 is all on 2025-10-01; slice 2 spans two dates, and the third
/// station skipped the second pass (empty trailing cells).
pub const TWO_SLICE_CSV: &str = "\
lat,lon,date1,value1,date2,value2
3.45,-76.53,2025-10-01,2,2025-10-08,4
3.46,-76.54,2025-10-01,3,2025-10-09,8
3.47,-76.51,2025-10-01,1,,
";

/// A table with per-cell problems: one unparseable coordinate row, one bad
/// date cell and one bad value cell. Two clean observations survive.
pub const DIRTY_CSV: &str = "\
lat,lon,date1,value1
3.45,-76.53,2025-10-01,2
not-a-lat,-76.54,2025-10-01,5
3.46,-76.52,2025-10-32,3
3.47,-76.51,2025-10-01,high
3.48,-76.50,2025-10-01,7
";

/// A table whose header is missing the `lon` column entirely.
pub const MISSING_LON_CSV: &str = "\
lat,date1,value1
3.45,2025-10-01,2
";

/// Writes a CSV fixture to a temp file and returns the handle.
///
/// The file is deleted when the handle drops, so keep it alive for the
/// duration of the test.
pub fn write_csv_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}
