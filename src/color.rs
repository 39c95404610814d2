//! RGBA color type used throughout the painting core
//!
//! Channels are 0–255 integers, matching the resolved style values that
//! layout/style collaborators hand in. Conversion to tiny-skia's
//! representation happens at the backend boundary in the canvas.

/// An RGBA color with 8-bit channels
///
/// # Examples
///
/// ```
/// use boxpaint::Rgba;
///
/// let red = Rgba::rgb(255, 0, 0);
/// assert_eq!(red.a, 255);
/// assert!(Rgba::TRANSPARENT.is_transparent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
  /// Red component (0-255)
  pub r: u8,
  /// Green component (0-255)
  pub g: u8,
  /// Blue component (0-255)
  pub b: u8,
  /// Alpha component (0-255)
  pub a: u8,
}

/// Grey used for the dark half of a bevel when the border color is pure
/// black (a black/black bevel would be invisible).
pub const BEVEL_DARK_GREY: u8 = 0x4C;

/// Grey used for the light half of a bevel on pure black borders.
pub const BEVEL_LIGHT_GREY: u8 = 0xB2;

impl Rgba {
  /// Fully transparent black
  pub const TRANSPARENT: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
  };

  /// Opaque black
  pub const BLACK: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
  };

  /// Opaque white
  pub const WHITE: Self = Self {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
  };

  /// Creates an opaque color from RGB components
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  /// Creates a color from RGBA components
  pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Returns true if fully transparent
  pub fn is_transparent(self) -> bool {
    self.a == 0
  }

  /// Returns true if all color channels are zero, regardless of alpha
  pub fn is_black(self) -> bool {
    self.r == 0 && self.g == 0 && self.b == 0
  }

  /// Darkens the color by the given fraction (0.0 = unchanged, 1.0 = black)
  ///
  /// Alpha is preserved. Used for the dark edge of inset/outset and
  /// groove/ridge bevels.
  pub fn darken(self, fraction: f32) -> Self {
    let f = (1.0 - fraction).clamp(0.0, 1.0);
    Self {
      r: (self.r as f32 * f).round() as u8,
      g: (self.g as f32 * f).round() as u8,
      b: (self.b as f32 * f).round() as u8,
      a: self.a,
    }
  }

  /// The light/dark color pair for a bevelled border style
  ///
  /// Dark is the base darkened by 33%. Pure black is clamped to fixed
  /// greys so the bevel stays visible.
  pub fn bevel_pair(self) -> (Self, Self) {
    if self.is_black() {
      (
        Self::rgba(BEVEL_LIGHT_GREY, BEVEL_LIGHT_GREY, BEVEL_LIGHT_GREY, self.a),
        Self::rgba(BEVEL_DARK_GREY, BEVEL_DARK_GREY, BEVEL_DARK_GREY, self.a),
      )
    } else {
      (self, self.darken(0.33))
    }
  }

  /// Channel-wise midpoint between two colors
  ///
  /// Used to synthesize the middle stop of a two-stop conic gradient.
  pub fn midpoint(self, other: Self) -> Self {
    let mid = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
    Self {
      r: mid(self.r, other.r),
      g: mid(self.g, other.g),
      b: mid(self.b, other.b),
      a: mid(self.a, other.a),
    }
  }

  pub(crate) fn to_skia(self) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_darken() {
    let c = Rgba::rgb(100, 200, 50).darken(0.33);
    assert_eq!(c, Rgba::rgb(67, 134, 33));
  }

  #[test]
  fn test_darken_preserves_alpha() {
    let c = Rgba::rgba(100, 100, 100, 128).darken(0.5);
    assert_eq!(c.a, 128);
  }

  #[test]
  fn test_bevel_pair_regular_color() {
    let (light, dark) = Rgba::rgb(100, 100, 100).bevel_pair();
    assert_eq!(light, Rgba::rgb(100, 100, 100));
    assert_eq!(dark, Rgba::rgb(67, 67, 67));
  }

  #[test]
  fn test_bevel_pair_black_clamps_to_greys() {
    let (light, dark) = Rgba::BLACK.bevel_pair();
    assert_eq!(light, Rgba::rgb(0xB2, 0xB2, 0xB2));
    assert_eq!(dark, Rgba::rgb(0x4C, 0x4C, 0x4C));
  }

  #[test]
  fn test_midpoint_averages_channels() {
    let mid = Rgba::rgb(255, 0, 0).midpoint(Rgba::rgb(0, 0, 255));
    assert_eq!(mid, Rgba::rgb(127, 0, 127));
  }
}
