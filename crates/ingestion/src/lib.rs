//! Observation-table ingestion.
//!
//! Turns an uploaded CSV into a typed [`Survey`](scout_common::Survey):
//! discovers the `lat`/`lon` columns and every complete `date{N}`/`value{N}`
//! pair once, up front, then parses rows with per-cell drop accounting.
//! Schema problems abort ingestion; data problems drop the affected row or
//! cell pair and are reported back to the caller, never propagated as `Err`.

pub mod error;
pub mod reader;
pub mod schema;
pub mod template;

pub use error::{DataError, IngestError, Result, SchemaError};
pub use reader::{ingest_csv, ingest_file, IngestOutcome};
pub use schema::{SliceColumns, TableSchema, MAX_SLICE_PAIRS};
pub use template::{write_template, TEMPLATE_CSV};
