//! Error types for the renderer.
//!
//! Degenerate geometry is not an error: it is reported through the
//! rasterizer's outcome type and simply skipped. Only caller bugs and
//! I/O failures surface here.

use thiserror::Error;

/// Unified error type for the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A triangle with non-finite vertex data reached the rasterizer.
    #[error("Invalid triangle passed to rasterizer: {0}")]
    InvalidTriangle(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Presentation I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, RenderError>`.
pub type RenderResult<T> = Result<T, RenderError>;
