//! The downloadable starter table.

use std::path::Path;

/// Starter CSV offered to users: the four required columns plus two example
/// stations sampled on the same date.
pub const TEMPLATE_CSV: &str =
    "lat,lon,date1,value1\n3.45,-76.53,2025-10-01,3\n3.46,-76.54,2025-10-01,8\n";

/// Write the template to disk.
pub fn write_template(path: impl AsRef<Path>) -> std::io::Result<()> {
    std::fs::write(path, TEMPLATE_CSV)
}
