//! Core geometry types for box-decoration painting
//!
//! All units are device pixels. The coordinate system has its origin at
//! the top-left corner: positive X extends to the right, positive Y
//! extends downward, matching CSS's coordinate system.
//!
//! Rectangles are stored as their four edges because border and
//! background painting works in edge terms (a border side runs from one
//! edge to another); width and height are derived.

use std::fmt;

/// A 2D point in device-pixel space
///
/// # Examples
///
/// ```
/// use boxpaint::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(Point::ZERO, Point::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
  /// X coordinate (increases to the right)
  pub x: f32,
  /// Y coordinate (increases downward)
  pub y: f32,
}

impl Point {
  /// The origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Translates this point by an offset
  pub fn translate(self, dx: f32, dy: f32) -> Self {
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// An axis-aligned rectangle stored as its four edges
///
/// Invariant: `right >= left` and `bottom >= top`. Zero-area rectangles
/// are legal and painting routines treat them as no-ops.
///
/// # Examples
///
/// ```
/// use boxpaint::Rect;
///
/// let r = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(r.right, 110.0);
/// assert_eq!(r.height(), 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
  /// X coordinate of the left edge
  pub left: f32,
  /// Y coordinate of the top edge
  pub top: f32,
  /// X coordinate of the right edge
  pub right: f32,
  /// Y coordinate of the bottom edge
  pub bottom: f32,
}

impl Rect {
  /// A zero-sized rectangle at the origin
  pub const ZERO: Self = Self {
    left: 0.0,
    top: 0.0,
    right: 0.0,
    bottom: 0.0,
  };

  /// Creates a rectangle from its four edges
  pub const fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
    Self {
      left,
      top,
      right,
      bottom,
    }
  }

  /// Creates a rectangle from origin and size
  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      left: x,
      top: y,
      right: x + width,
      bottom: y + height,
    }
  }

  /// Returns the width
  pub fn width(self) -> f32 {
    self.right - self.left
  }

  /// Returns the height
  pub fn height(self) -> f32 {
    self.bottom - self.top
  }

  /// Returns true if the rectangle encloses no area
  pub fn is_empty(self) -> bool {
    self.width() <= 0.0 || self.height() <= 0.0
  }

  /// Returns the center point
  pub fn center(self) -> Point {
    Point::new(
      (self.left + self.right) / 2.0,
      (self.top + self.bottom) / 2.0,
    )
  }

  /// Returns true if this rectangle intersects another
  pub fn intersects(self, other: Rect) -> bool {
    self.left <= other.right
      && self.right >= other.left
      && self.top <= other.bottom
      && self.bottom >= other.top
  }

  /// Computes the intersection of two rectangles, if any
  pub fn intersection(self, other: Rect) -> Option<Rect> {
    if !self.intersects(other) {
      return None;
    }
    Some(Rect {
      left: self.left.max(other.left),
      top: self.top.max(other.top),
      right: self.right.min(other.right),
      bottom: self.bottom.min(other.bottom),
    })
  }

  /// Translates this rectangle by an offset
  pub fn translate(self, dx: f32, dy: f32) -> Rect {
    Rect {
      left: self.left + dx,
      top: self.top + dy,
      right: self.right + dx,
      bottom: self.bottom + dy,
    }
  }
}

impl fmt::Display for Rect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "[l:{}, t:{}, r:{}, b:{}]",
      self.left, self.top, self.right, self.bottom
    )
  }
}

/// Radius of one rounded corner: horizontal and vertical semi-axes
///
/// A radius with either component zero means a square corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadius {
  /// Horizontal semi-axis
  pub rx: f32,
  /// Vertical semi-axis
  pub ry: f32,
}

impl CornerRadius {
  /// A square corner
  pub const ZERO: Self = Self { rx: 0.0, ry: 0.0 };

  /// Creates an elliptical corner radius
  pub const fn new(rx: f32, ry: f32) -> Self {
    Self { rx, ry }
  }

  /// Creates a circular corner radius
  pub const fn circular(r: f32) -> Self {
    Self { rx: r, ry: r }
  }

  /// Returns true if this corner is actually rounded
  ///
  /// Either component being zero degenerates to a square corner.
  pub fn is_rounded(self) -> bool {
    self.rx > 0.0 && self.ry > 0.0
  }

  fn scale(self, factor: f32) -> Self {
    Self {
      rx: (self.rx * factor).max(0.0),
      ry: (self.ry * factor).max(0.0),
    }
  }
}

/// Per-corner radii for a rounded rectangle
///
/// Corner order follows CSS border-radius: top-left, top-right,
/// bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
  /// Top-left corner
  pub top_left: CornerRadius,
  /// Top-right corner
  pub top_right: CornerRadius,
  /// Bottom-right corner
  pub bottom_right: CornerRadius,
  /// Bottom-left corner
  pub bottom_left: CornerRadius,
}

impl CornerRadii {
  /// Square corners everywhere
  pub const ZERO: Self = Self {
    top_left: CornerRadius::ZERO,
    top_right: CornerRadius::ZERO,
    bottom_right: CornerRadius::ZERO,
    bottom_left: CornerRadius::ZERO,
  };

  /// Creates radii with individual values for each corner
  pub const fn new(
    top_left: CornerRadius,
    top_right: CornerRadius,
    bottom_right: CornerRadius,
    bottom_left: CornerRadius,
  ) -> Self {
    Self {
      top_left,
      top_right,
      bottom_right,
      bottom_left,
    }
  }

  /// Creates uniform circular radii for all corners
  pub const fn uniform(radius: f32) -> Self {
    let r = CornerRadius::circular(radius);
    Self {
      top_left: r,
      top_right: r,
      bottom_right: r,
      bottom_left: r,
    }
  }

  /// Returns true if any corner is rounded
  pub fn has_radius(&self) -> bool {
    self.top_left.is_rounded()
      || self.top_right.is_rounded()
      || self.bottom_right.is_rounded()
      || self.bottom_left.is_rounded()
  }

  /// Clamps radii so adjacent corners never overlap
  ///
  /// Per CSS, if the sum of two adjacent radii exceeds the box dimension
  /// they span, all radii are scaled down proportionally.
  pub fn clamped(self, width: f32, height: f32) -> Self {
    if width <= 0.0 || height <= 0.0 {
      return Self::ZERO;
    }

    let top_scale = width / (self.top_left.rx + self.top_right.rx).max(width);
    let right_scale = height / (self.top_right.ry + self.bottom_right.ry).max(height);
    let bottom_scale = width / (self.bottom_left.rx + self.bottom_right.rx).max(width);
    let left_scale = height / (self.top_left.ry + self.bottom_left.ry).max(height);

    let scale = top_scale.min(right_scale).min(bottom_scale).min(left_scale);
    Self {
      top_left: self.top_left.scale(scale),
      top_right: self.top_right.scale(scale),
      bottom_right: self.bottom_right.scale(scale),
      bottom_left: self.bottom_left.scale(scale),
    }
  }
}
