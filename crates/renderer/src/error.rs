//! Error types for the renderer crate.

use thiserror::Error;

/// Errors from overlay rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),
}
