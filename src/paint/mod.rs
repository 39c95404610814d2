//! Painting and rasterization
//!
//! This module turns box decorations into pixels using tiny-skia.
//!
//! # Responsibilities
//!
//! - **Canvas**: Pixel surface with a saved-state stack and mask-based
//!   clipping
//! - **Paths**: Elliptical arcs and rounded-rectangle outlines
//! - **Borders**: All CSS border styles, mitered per side
//! - **Gradients**: Linear, radial, and tessellated conic sweeps
//! - **Backgrounds**: Layer clipping and tiled fills
//! - **Decorations**: Underline, overline, and line-through variants
//!
//! # Painting Order
//!
//! Callers follow the CSS box model: background layers first (bottom
//! layer to top), then borders, then content-level decorations. Each
//! drawing routine saves and restores the canvas around its own clip
//! state, so routines compose without leaking clips into each other.
//!
//! # Example
//!
//! ```rust,ignore
//! use boxpaint::paint::{draw_borders, draw_solid_fill, Canvas};
//!
//! let mut canvas = Canvas::new(800, 600, Rgba::WHITE)?;
//! draw_solid_fill(&mut canvas, &layer, Rgba::rgb(240, 240, 240))?;
//! draw_borders(&mut canvas, &borders, border_box)?;
//! ```

pub mod background;
pub mod border;
pub mod canvas;
pub mod decoration;
pub mod gradient;
pub mod path;

pub use background::{
  draw_conic_gradient, draw_image, draw_linear_gradient, draw_radial_gradient, draw_solid_fill,
  scale_pixmap, BackgroundLayer, Repeat,
};
pub use border::{draw_borders, BorderSide, BorderStyle, Borders};
pub use canvas::{Canvas, ClipFrame, DashPattern, StrokeStyle};
pub use decoration::{
  DecorationLine, DecorationPainter, DecorationRequest, DecorationStyle, FontDecorationMetrics,
  LineMetrics,
};
pub use gradient::{
  prepare_conic_stops, ColorStop, ConicGradient, ConicPattern, LinearGradient, RadialGradient,
  SectorPatch,
};
pub use path::{rounded_rect_path, PathSink};
