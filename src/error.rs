//! Error types for the painting core
//!
//! Degenerate geometry (zero-area boxes, zero-length sides, empty stop
//! lists) is never an error here: those states are reachable from
//! ordinary style combinations and the drawing routines absorb them as
//! no-ops. Errors are reserved for backend resource exhaustion, where
//! the render is aborted without partial-surface recovery.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.

use thiserror::Error;

/// Result type alias for painting operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
  /// Rendering or rasterization error
  #[error("Render error: {0}")]
  Render(#[from] RenderError),
}

/// Errors that occur while painting
///
/// These come from the rasterization backend: allocation failures for
/// pixel surfaces, masks, or pattern tiles.
///
/// # Examples
///
/// ```
/// use boxpaint::error::RenderError;
///
/// let error = RenderError::InvalidParameters {
///   message: "Canvas dimensions cannot be zero".to_string(),
/// };
/// println!("{}", error);
/// ```
#[derive(Error, Debug, Clone)]
pub enum RenderError {
  /// Parameters outside what the backend accepts
  #[error("Invalid render parameters: {message}")]
  InvalidParameters { message: String },

  /// A backend-native resource could not be allocated
  #[error("Resource allocation failed: {resource}")]
  ResourceExhausted { resource: String },
}
