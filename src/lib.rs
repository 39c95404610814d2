//! boxpaint: CSS box decoration rendering
//!
//! A rendering core for the decorated parts of the CSS box model:
//! backgrounds (solid, gradient, image), borders in every CSS border
//! style with elliptical corner radii, and text decoration lines.
//! Rasterization is done with tiny-skia; all drawing goes through a
//! [`paint::Canvas`] that layers a saved-state stack and mask-based
//! clipping over the raw pixmap.
//!
//! # Example
//!
//! ```rust,ignore
//! use boxpaint::paint::{draw_borders, BorderSide, BorderStyle, Borders, Canvas};
//! use boxpaint::{CornerRadii, Rect, Rgba};
//!
//! let mut canvas = Canvas::new(200, 100, Rgba::WHITE)?;
//! let borders = Borders::uniform(
//!   BorderSide::new(4.0, BorderStyle::Solid, Rgba::BLACK),
//!   CornerRadii::uniform(8.0),
//! );
//! draw_borders(&mut canvas, &borders, Rect::from_xywh(10.0, 10.0, 180.0, 80.0))?;
//! let pixmap = canvas.into_pixmap();
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod paint;

pub use color::Rgba;
pub use config::RenderConfig;
pub use error::{Error, RenderError, Result};
pub use geometry::{CornerRadii, CornerRadius, Point, Rect};
