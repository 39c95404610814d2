//! Render configuration supplied by the embedding layer
//!
//! These values are resolved by collaborators (style/layout, the host
//! binding) and only consumed here to convert dimensional units. The
//! painting core never interprets them beyond that.

/// Configuration for a single render
///
/// One instance is created per render and passed in explicitly; there is
/// no process-wide configuration state.
///
/// # Examples
///
/// ```
/// use boxpaint::RenderConfig;
///
/// let config = RenderConfig::new(144.0, 12.0, 800, 600);
/// assert_eq!(config.pt_to_px(72.0), 144.0);
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
  /// Output resolution in dots per inch
  pub dpi: f32,
  /// Default font size in points
  pub default_font_size_pt: f32,
  /// Viewport width in device pixels
  pub viewport_width: u32,
  /// Viewport height in device pixels
  pub viewport_height: u32,
  /// BCP 47 language tag, e.g. "en"
  pub language: String,
  /// Locale/culture tag, e.g. "US"
  pub culture: String,
}

impl RenderConfig {
  /// Creates a config with empty language/culture tags
  pub fn new(dpi: f32, default_font_size_pt: f32, width: u32, height: u32) -> Self {
    Self {
      dpi,
      default_font_size_pt,
      viewport_width: width,
      viewport_height: height,
      language: String::new(),
      culture: String::new(),
    }
  }

  /// Converts points to device pixels at the configured DPI
  pub fn pt_to_px(&self, pt: f32) -> f32 {
    pt * self.dpi / 72.0
  }

  /// The default font size converted to device pixels
  pub fn default_font_size_px(&self) -> f32 {
    self.pt_to_px(self.default_font_size_pt)
  }
}

impl Default for RenderConfig {
  fn default() -> Self {
    Self::new(96.0, 12.0, 1280, 720)
  }
}
