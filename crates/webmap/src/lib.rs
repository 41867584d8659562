//! Interactive map document assembly.
//!
//! Builds a typed model of the dashboard page (one toggleable layer per
//! time slice: colored circle markers plus an optional heat overlay) and
//! renders it into a single self-contained HTML file around Leaflet.

pub mod document;
pub mod html;

pub use document::{AlertBanner, MapDocument, Marker, OverlayImage, SliceLayer};
pub use html::ComposeError;
