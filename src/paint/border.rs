//! CSS border rendering
//!
//! All four sides are drawn by a single left-side renderer. Each side is
//! mapped into the renderer's frame by rotating the canvas about the
//! border box origin: 180 degrees for the right side, -90 for the
//! bottom, +90 for the top, identity for the left. In that frame the
//! side is always a vertical band at `x = left` running from `top` to
//! `bottom`, with the adjacent sides' widths and corner radii remapped
//! to the frame's top and bottom corners.
//!
//! Before painting, the renderer clips to a wedge that miters the band
//! against its neighbors: straight bisector lines at square corners,
//! ring segments between the outer and inner corner ellipses at rounded
//! ones. The sweep allotted to this side at a corner is
//! `(PI/2) / (adjacent_width / width + 1)`, so wider neighbors claim a
//! proportionally larger share of the corner arc.

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::CornerRadii;
use crate::geometry::CornerRadius;
use crate::geometry::Rect;
use crate::paint::canvas::Canvas;
use crate::paint::canvas::StrokeStyle;
use crate::paint::path::PathSink;
use std::f32::consts::FRAC_PI_2;
use std::f32::consts::PI;
use tiny_skia::Path;

/// CSS `border-style` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
  #[default]
  None,
  Hidden,
  Solid,
  Dashed,
  Dotted,
  Double,
  Groove,
  Ridge,
  Inset,
  Outset,
}

/// One side of a border: width, line style, and color
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderSide {
  pub width: f32,
  pub style: BorderStyle,
  pub color: Rgba,
}

impl BorderSide {
  pub fn new(width: f32, style: BorderStyle, color: Rgba) -> Self {
    Self {
      width,
      style,
      color,
    }
  }

  /// Whether this side paints anything
  pub fn is_visible(&self) -> bool {
    self.width > 0.0
      && !matches!(self.style, BorderStyle::None | BorderStyle::Hidden)
      && !self.color.is_transparent()
  }
}

/// Full border description for one box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Borders {
  pub top: BorderSide,
  pub right: BorderSide,
  pub bottom: BorderSide,
  pub left: BorderSide,
  pub radii: CornerRadii,
}

impl Borders {
  /// Uniform border: same width, style, and color on all four sides
  pub fn uniform(side: BorderSide, radii: CornerRadii) -> Self {
    Self {
      top: side,
      right: side,
      bottom: side,
      left: side,
      radii,
    }
  }
}

/// Physical side being painted, tracked through the rotation frames
///
/// Bevel styles (inset, outset, groove, ridge) shade left/top opposite
/// to right/bottom, which the rotated frame alone cannot tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhysicalSide {
  Left,
  Top,
  Right,
  Bottom,
}

impl PhysicalSide {
  fn is_light_on_outset(self) -> bool {
    matches!(self, PhysicalSide::Left | PhysicalSide::Top)
  }
}

/// Paints all visible border sides of `draw_pos` onto the canvas
///
/// Corner radii are clamped against the box dimensions first, so
/// oversized radii shrink proportionally the way CSS requires.
pub fn draw_borders(canvas: &mut Canvas, borders: &Borders, draw_pos: Rect) -> Result<()> {
  if draw_pos.is_empty() {
    return Ok(());
  }
  let radii = borders.radii.clamped(draw_pos.width(), draw_pos.height());
  let width = draw_pos.width();
  let height = draw_pos.height();

  if borders.right.is_visible() {
    canvas.with_save(|c| {
      c.apply_clip_frames()?;
      c.rotate_at(PI, draw_pos.left, draw_pos.top);
      SideFrame {
        left: draw_pos.left - width,
        top: draw_pos.top - height,
        bottom: draw_pos.top,
        width: borders.right.width,
        top_adjacent: borders.bottom.width,
        bottom_adjacent: borders.top.width,
        radius_top: radii.bottom_right,
        radius_bottom: radii.top_right,
        color: borders.right.color,
        style: borders.right.style,
        side: PhysicalSide::Right,
      }
      .draw(c)
    })?;
  }

  if borders.bottom.is_visible() {
    canvas.with_save(|c| {
      c.apply_clip_frames()?;
      c.rotate_at(-FRAC_PI_2, draw_pos.left, draw_pos.top);
      SideFrame {
        left: draw_pos.left - height,
        top: draw_pos.top,
        bottom: draw_pos.top + width,
        width: borders.bottom.width,
        top_adjacent: borders.left.width,
        bottom_adjacent: borders.right.width,
        radius_top: radii.bottom_left,
        radius_bottom: radii.bottom_right,
        color: borders.bottom.color,
        style: borders.bottom.style,
        side: PhysicalSide::Bottom,
      }
      .draw(c)
    })?;
  }

  if borders.top.is_visible() {
    canvas.with_save(|c| {
      c.apply_clip_frames()?;
      c.rotate_at(FRAC_PI_2, draw_pos.left, draw_pos.top);
      SideFrame {
        left: draw_pos.left,
        top: draw_pos.top - width,
        bottom: draw_pos.top,
        width: borders.top.width,
        top_adjacent: borders.right.width,
        bottom_adjacent: borders.left.width,
        radius_top: radii.top_right,
        radius_bottom: radii.top_left,
        color: borders.top.color,
        style: borders.top.style,
        side: PhysicalSide::Top,
      }
      .draw(c)
    })?;
  }

  if borders.left.is_visible() {
    canvas.with_save(|c| {
      c.apply_clip_frames()?;
      SideFrame {
        left: draw_pos.left,
        top: draw_pos.top,
        bottom: draw_pos.bottom,
        width: borders.left.width,
        top_adjacent: borders.top.width,
        bottom_adjacent: borders.bottom.width,
        radius_top: radii.top_left,
        radius_bottom: radii.bottom_left,
        color: borders.left.color,
        style: borders.left.style,
        side: PhysicalSide::Left,
      }
      .draw(c)
    })?;
  }

  Ok(())
}

/// One border side in the left-side frame
struct SideFrame {
  left: f32,
  top: f32,
  bottom: f32,
  width: f32,
  top_adjacent: f32,
  bottom_adjacent: f32,
  radius_top: CornerRadius,
  radius_bottom: CornerRadius,
  color: Rgba,
  style: BorderStyle,
  side: PhysicalSide,
}

impl SideFrame {
  fn draw(&self, canvas: &mut Canvas) -> Result<()> {
    if let Some(wedge) = self.clip_wedge() {
      canvas.clip_path(&wedge)?;
    }
    match self.style {
      BorderStyle::None | BorderStyle::Hidden => {}
      BorderStyle::Solid => self.draw_solid(canvas),
      BorderStyle::Dashed => self.draw_dashed(canvas),
      BorderStyle::Dotted => self.draw_dotted(canvas),
      BorderStyle::Double => self.draw_double(canvas),
      BorderStyle::Inset => self.draw_inset_outset(canvas, true),
      BorderStyle::Outset => self.draw_inset_outset(canvas, false),
      BorderStyle::Groove => self.draw_groove_ridge(canvas, true),
      BorderStyle::Ridge => self.draw_groove_ridge(canvas, false),
    }
    Ok(())
  }

  /// Fraction of the quarter-turn this side owns at a corner
  fn corner_sweep(&self, adjacent: f32) -> f32 {
    FRAC_PI_2 / (adjacent / self.width + 1.0)
  }

  /// Builds the mitered clip region for the side band
  fn clip_wedge(&self) -> Option<Path> {
    let mut sink = PathSink::new();

    if self.radius_top.is_rounded() {
      let cx = self.left + self.radius_top.rx;
      let cy = self.top + self.radius_top.ry;
      let end_angle = PI + self.corner_sweep(self.top_adjacent);
      sink.arc(
        cx,
        cy,
        self.radius_top.rx - self.width,
        self.radius_top.ry - self.width + (self.width - self.top_adjacent),
        PI,
        end_angle,
        false,
      );
      sink.arc(
        cx,
        cy,
        self.radius_top.rx,
        self.radius_top.ry,
        end_angle,
        PI,
        true,
      );
    } else {
      sink.move_to(self.left + self.width, self.top + self.top_adjacent);
      sink.line_to(self.left, self.top);
    }

    if self.radius_bottom.is_rounded() {
      sink.line_to(self.left, self.bottom - self.radius_bottom.ry);
      let cx = self.left + self.radius_bottom.rx;
      let cy = self.bottom - self.radius_bottom.ry;
      let end_angle = PI - self.corner_sweep(self.bottom_adjacent);
      sink.arc(
        cx,
        cy,
        self.radius_bottom.rx,
        self.radius_bottom.ry,
        PI,
        end_angle,
        true,
      );
      sink.arc(
        cx,
        cy,
        self.radius_bottom.rx - self.width,
        self.radius_bottom.ry - self.width + (self.width - self.bottom_adjacent),
        end_angle,
        PI,
        false,
      );
    } else {
      sink.line_to(self.left, self.bottom);
      sink.line_to(self.left + self.width, self.bottom - self.bottom_adjacent);
    }

    sink.close();
    sink.finish()
  }

  /// Builds a centerline offset `line_offset` from the outer edge
  ///
  /// At rounded corners the line follows an ellipse concentric with the
  /// corner, shrunk by the offset; the adjacent-side offsets bend the
  /// radii so parallel lines of a double border converge correctly.
  fn line_path(&self, line_offset: f32, top_offset: f32, bottom_offset: f32) -> Option<Path> {
    let mut sink = PathSink::new();

    if self.radius_top.is_rounded() {
      // Sweep the full quarter turn, past the miter bisector. The wedge
      // clip trims the overshoot; stopping the stroke on the bisector
      // would leave an antialiased seam where the two sides meet.
      let start_angle = PI + FRAC_PI_2;
      sink.arc(
        self.left + self.radius_top.rx,
        self.top + self.radius_top.ry,
        self.radius_top.rx - line_offset,
        self.radius_top.ry - line_offset + (line_offset - top_offset),
        start_angle,
        PI,
        true,
      );
    } else {
      sink.move_to(self.left + line_offset, self.top);
    }

    if self.radius_bottom.is_rounded() {
      sink.line_to(self.left + line_offset, self.bottom - self.radius_bottom.ry);
      let end_angle = PI - FRAC_PI_2;
      sink.arc(
        self.left + self.radius_bottom.rx,
        self.bottom - self.radius_bottom.ry,
        self.radius_bottom.rx - line_offset,
        self.radius_bottom.ry - line_offset + (line_offset - bottom_offset),
        PI,
        end_angle,
        true,
      );
    } else {
      sink.line_to(self.left + line_offset, self.bottom);
    }

    sink.finish()
  }

  fn stroke_centerline(
    &self,
    canvas: &mut Canvas,
    color: Rgba,
    style: &StrokeStyle,
    line_offset: f32,
    top_offset: f32,
    bottom_offset: f32,
  ) {
    if let Some(path) = self.line_path(line_offset, top_offset, bottom_offset) {
      canvas.stroke_path(&path, color, style);
    }
  }

  fn draw_solid(&self, canvas: &mut Canvas) {
    self.stroke_centerline(
      canvas,
      self.color,
      &StrokeStyle::solid(self.width),
      self.width / 2.0,
      self.top_adjacent / 2.0,
      self.bottom_adjacent / 2.0,
    );
  }

  fn draw_dashed(&self, canvas: &mut Canvas) {
    let line_length = (self.bottom - self.top).abs();
    if line_length <= 0.0 {
      return;
    }
    let segments = dash_segment_count(line_length, self.width);
    let segment_length = line_length / segments as f32;
    self.stroke_centerline(
      canvas,
      self.color,
      &StrokeStyle::dashed(self.width, vec![segment_length, segment_length], 0.0),
      self.width / 2.0,
      self.top_adjacent / 2.0,
      self.bottom_adjacent / 2.0,
    );
  }

  fn draw_dotted(&self, canvas: &mut Canvas) {
    let line_length = (self.bottom - self.top).abs();
    if line_length <= 0.0 {
      return;
    }
    let dots = dot_count(line_length, self.width);
    let space = (line_length - self.width) / (dots - 1) as f32;
    if space <= 0.0 {
      return;
    }
    self.stroke_centerline(
      canvas,
      self.color,
      &StrokeStyle::dotted(self.width, space, -self.width / 2.0),
      self.width / 2.0,
      self.top_adjacent / 2.0,
      self.bottom_adjacent / 2.0,
    );
  }

  fn draw_double(&self, canvas: &mut Canvas) {
    // Too thin for two distinguishable lines.
    if self.width < 3.0 {
      self.draw_solid(canvas);
      return;
    }
    let line_width = self.width / 3.0;
    let style = StrokeStyle::solid(line_width);
    self.stroke_centerline(
      canvas,
      self.color,
      &style,
      self.width / 6.0,
      self.top_adjacent / 6.0,
      self.bottom_adjacent / 6.0,
    );
    self.stroke_centerline(
      canvas,
      self.color,
      &style,
      self.width - self.width / 6.0,
      self.top_adjacent - self.top_adjacent / 6.0,
      self.bottom_adjacent - self.bottom_adjacent / 6.0,
    );
  }

  fn draw_inset_outset(&self, canvas: &mut Canvas, is_inset: bool) {
    let (light, dark) = self.color.bevel_pair();
    let line_color = if self.side.is_light_on_outset() == is_inset {
      dark
    } else {
      light
    };
    self.stroke_centerline(
      canvas,
      line_color,
      &StrokeStyle::solid(self.width),
      self.width / 2.0,
      self.top_adjacent / 2.0,
      self.bottom_adjacent / 2.0,
    );
  }

  fn draw_groove_ridge(&self, canvas: &mut Canvas, is_groove: bool) {
    // A 1px groove has no room for two shades.
    if self.width == 1.0 {
      self.draw_solid(canvas);
      return;
    }
    let (light, dark) = self.color.bevel_pair();
    let (outer, inner) = if self.side.is_light_on_outset() == is_groove {
      (dark, light)
    } else {
      (light, dark)
    };
    let style = StrokeStyle::solid(self.width / 2.0);
    self.stroke_centerline(
      canvas,
      outer,
      &style,
      self.width / 4.0,
      self.top_adjacent / 4.0,
      self.bottom_adjacent / 4.0,
    );
    self.stroke_centerline(
      canvas,
      inner,
      &style,
      self.width - self.width / 4.0,
      self.top_adjacent - self.top_adjacent / 4.0,
      self.bottom_adjacent - self.bottom_adjacent / 4.0,
    );
  }
}

/// Number of dash segments along a dashed side
///
/// Always odd and at least 3, so the side starts and ends with a dash.
fn dash_segment_count(line_length: f32, width: f32) -> u32 {
  let mut segments = (line_length / (width * 3.0)) as u32;
  if segments < 2 {
    segments = 2;
  }
  if segments % 2 != 0 {
    segments += 1;
  }
  segments + 1
}

/// Number of dots along a dotted side
///
/// Always odd and at least 3, so dots land on both corners and the
/// spacing divides evenly between them.
fn dot_count(line_length: f32, width: f32) -> u32 {
  let mut dots = (line_length / (width * 2.0)).round() as u32;
  if dots < 2 {
    dots = 2;
  }
  if dots % 2 != 0 {
    dots += 1;
  }
  dots + 1
}
