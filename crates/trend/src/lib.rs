//! Temporal aggregation of survey observations.
//!
//! Pools every slice's observations by calendar date, computes per-date
//! arithmetic means, and derives the alert state against the fixed
//! threshold in `scout_common`.

pub mod aggregate;

pub use aggregate::{summarize, AlertState, DailyMean, TrendSummary};
