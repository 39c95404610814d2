//! Path construction for rounded rectangles and border arcs
//!
//! Corner arcs are quarter-ellipses. An elliptical arc with semi-axes
//! `(rx, ry)` is produced by tracing a circular arc of radius `rx` and
//! scaling its y extent by `ry/rx` about the ellipse center; because the
//! curve points are computed here rather than by the backend, the scale
//! is folded directly into the emitted coordinates. Each circular span
//! of at most a quarter turn becomes a single cubic Bezier with control
//! offset `h = 4/3 * tan(sweep/4)`, the standard tight approximation.

use crate::geometry::CornerRadii;
use crate::geometry::CornerRadius;
use crate::geometry::Rect;
use std::f32::consts::FRAC_PI_2;
use std::f32::consts::PI;
use tiny_skia::Path;
use tiny_skia::PathBuilder;

/// Incremental path builder with cairo-like current-point semantics
///
/// An arc appended to a path that already has a current point is joined
/// to it with a straight segment; an arc opening a path starts with a
/// move. Border-side construction depends on this joining behavior.
pub struct PathSink {
  builder: PathBuilder,
  has_current: bool,
}

impl PathSink {
  /// Creates an empty path
  pub fn new() -> Self {
    Self {
      builder: PathBuilder::new(),
      has_current: false,
    }
  }

  /// Starts a new subpath at the given point
  pub fn move_to(&mut self, x: f32, y: f32) {
    self.builder.move_to(x, y);
    self.has_current = true;
  }

  /// Adds a straight segment from the current point
  ///
  /// Opens the subpath with a move when there is no current point yet.
  pub fn line_to(&mut self, x: f32, y: f32) {
    if self.has_current {
      self.builder.line_to(x, y);
    } else {
      self.move_to(x, y);
    }
  }

  /// Closes the current subpath
  pub fn close(&mut self) {
    self.builder.close();
  }

  /// Appends an elliptical arc around `(cx, cy)` with semi-axes `(rx, ry)`
  ///
  /// The arc sweeps from angle `a1` to `a2` (radians, measured from the
  /// positive x axis, increasing toward positive y). With `negative` the
  /// sweep runs in decreasing-angle direction instead. A degenerate
  /// radius (either semi-axis <= 0) collapses to a move to the center
  /// point, which keeps border wedges well-formed when the border is
  /// wider than the corner radius.
  pub fn arc(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, a1: f32, a2: f32, negative: bool) {
    if rx <= 0.0 || ry <= 0.0 {
      self.move_to(cx, cy);
      return;
    }

    let mut end = a2;
    if negative {
      while end > a1 {
        end -= 2.0 * PI;
      }
    } else {
      while end < a1 {
        end += 2.0 * PI;
      }
    }

    let point_at = |t: f32| (cx + rx * t.cos(), cy + ry * t.sin());
    let (sx, sy) = point_at(a1);
    self.line_to(sx, sy);

    let total = end - a1;
    if total == 0.0 {
      return;
    }
    let segments = (total.abs() / FRAC_PI_2).ceil().max(1.0) as u32;
    let step = total / segments as f32;

    let mut t0 = a1;
    for _ in 0..segments {
      let t1 = t0 + step;
      // Control offset for a single-cubic circular arc approximation.
      let h = 4.0 / 3.0 * (step / 4.0).tan();

      let (x0, y0) = point_at(t0);
      let (x3, y3) = point_at(t1);
      // Derivative of the ellipse parameterization, scaled by h.
      let c1x = x0 - h * rx * t0.sin();
      let c1y = y0 + h * ry * t0.cos();
      let c2x = x3 + h * rx * t1.sin();
      let c2y = y3 - h * ry * t1.cos();

      self.builder.cubic_to(c1x, c1y, c2x, c2y, x3, y3);
      t0 = t1;
    }
  }

  /// Finishes the path
  ///
  /// Returns None for an empty or otherwise degenerate path.
  pub fn finish(self) -> Option<Path> {
    self.builder.finish()
  }
}

impl Default for PathSink {
  fn default() -> Self {
    Self::new()
  }
}

/// Builds a closed path tracing `rect` with each corner replaced by a
/// quarter-ellipse of the corner's radii
///
/// Corners are visited top-left, top-right, bottom-right, bottom-left;
/// a corner with a zero radius component degenerates to the square
/// corner point. With all-zero radii the result is the plain rectangle.
pub fn rounded_rect_path(rect: Rect, radii: CornerRadii) -> Option<Path> {
  // A half-zero radius pair means no rounding at all; zero both
  // components so the straight edges still reach the corner point.
  let effective = |r: CornerRadius| if r.is_rounded() { r } else { CornerRadius::ZERO };
  let mut sink = PathSink::new();

  let tl = effective(radii.top_left);
  if tl.is_rounded() {
    sink.arc(
      rect.left + tl.rx,
      rect.top + tl.ry,
      tl.rx,
      tl.ry,
      PI,
      PI * 3.0 / 2.0,
      false,
    );
  } else {
    sink.move_to(rect.left, rect.top);
  }

  let tr = effective(radii.top_right);
  sink.line_to(rect.right - tr.rx, rect.top);
  if tr.is_rounded() {
    sink.arc(
      rect.right - tr.rx,
      rect.top + tr.ry,
      tr.rx,
      tr.ry,
      PI * 3.0 / 2.0,
      2.0 * PI,
      false,
    );
  }

  let br = effective(radii.bottom_right);
  sink.line_to(rect.right, rect.bottom - br.ry);
  if br.is_rounded() {
    sink.arc(
      rect.right - br.rx,
      rect.bottom - br.ry,
      br.rx,
      br.ry,
      0.0,
      FRAC_PI_2,
      false,
    );
  }

  let bl = effective(radii.bottom_left);
  sink.line_to(rect.left + bl.rx, rect.bottom);
  if bl.is_rounded() {
    sink.arc(
      rect.left + bl.rx,
      rect.bottom - bl.ry,
      bl.rx,
      bl.ry,
      FRAC_PI_2,
      PI,
      false,
    );
  }

  sink.close();
  sink.finish()
}
