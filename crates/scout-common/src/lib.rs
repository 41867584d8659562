//! Common types and utilities shared across all scoutmap crates.

pub mod bbox;
pub mod config;
pub mod observation;
pub mod severity;
pub mod time;

pub use bbox::BoundingBox;
pub use config::{ConfigError, DashboardConfig};
pub use observation::{Observation, Survey, TimeSlice};
pub use severity::{Color, Severity, ALERT_THRESHOLD};
pub use time::{parse_observation_date, DateParseError};
