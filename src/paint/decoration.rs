//! Text decoration lines
//!
//! Underline, overline, and line-through share one painter. Each line
//! kind anchors differently to the reference y passed by the caller:
//! underlines hang below it, overlines sit above it, line-through
//! centers on it. Style variants reuse the stroke machinery: dotted and
//! dashed lines are dash patterns phase-locked to the segment start so
//! adjacent text runs join seamlessly, double lines are two strokes,
//! and wavy lines stroke a wide band with a repeating zigzag brush
//! pixmap rendered once per thickness/color pair and cached.

use crate::color::Rgba;
use crate::error::RenderError;
use crate::error::Result;
use crate::paint::canvas::Canvas;
use crate::paint::canvas::StrokeStyle;
use lru::LruCache;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tiny_skia::FilterQuality;
use tiny_skia::LineCap;
use tiny_skia::Path;
use tiny_skia::PathBuilder;
use tiny_skia::Pattern;
use tiny_skia::Pixmap;
use tiny_skia::SpreadMode;
use tiny_skia::Stroke;
use tiny_skia::Transform;

/// Which decoration line to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationLine {
  Underline,
  Overline,
  LineThrough,
}

/// CSS `text-decoration-style` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecorationStyle {
  #[default]
  Solid,
  Double,
  Dotted,
  Dashed,
  Wavy,
}

/// Thickness and vertical position of one decoration line
///
/// Position is the offset from the alphabetic baseline, positive
/// downward for underlines and upward magnitudes resolved by the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
  pub thickness: f32,
  pub position: f32,
}

impl LineMetrics {
  pub fn new(thickness: f32, position: f32) -> Self {
    Self {
      thickness,
      position,
    }
  }

  /// Snaps the metrics to the pixel grid
  ///
  /// Thickness rounds to a whole pixel count of at least one; the
  /// position shifts so the line's span covers whole pixels. Thin hinted
  /// lines otherwise smear across two rows of antialiased coverage.
  pub fn quantized(&self) -> Self {
    let thickness = self.thickness.round().max(1.0);
    let position = (self.position - thickness / 2.0).round() + thickness / 2.0;
    Self {
      thickness,
      position,
    }
  }
}

/// Decoration metrics a font provides for all three line kinds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontDecorationMetrics {
  pub underline: LineMetrics,
  pub strikethrough: LineMetrics,
  pub overline: LineMetrics,
}

/// One decoration line to paint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationRequest {
  pub line: DecorationLine,
  pub style: DecorationStyle,
  pub color: Rgba,
  /// Left edge of the decorated run
  pub x: f32,
  /// Length of the decorated run
  pub width: f32,
  /// Reference y for the line kind's anchor rule
  pub y: f32,
  pub thickness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct WavyBrushKey {
  thickness_bits: u32,
  color: Rgba,
}

type BrushHasher = BuildHasherDefault<FxHasher>;

/// Paints decoration lines, caching wavy brush tiles between calls
pub struct DecorationPainter {
  wavy_brushes: LruCache<WavyBrushKey, Arc<Pixmap>, BrushHasher>,
}

impl Default for DecorationPainter {
  fn default() -> Self {
    Self::new()
  }
}

impl DecorationPainter {
  const BRUSH_CACHE_CAPACITY: usize = 16;

  pub fn new() -> Self {
    Self {
      wavy_brushes: LruCache::with_hasher(
        NonZeroUsize::new(Self::BRUSH_CACHE_CAPACITY).unwrap(),
        BrushHasher::default(),
      ),
    }
  }

  /// Draws one decoration line onto the canvas
  pub fn draw(&mut self, canvas: &mut Canvas, request: &DecorationRequest) -> Result<()> {
    if request.width <= 0.0 || request.thickness <= 0.0 || request.color.is_transparent() {
      return Ok(());
    }
    canvas.with_save(|c| {
      c.apply_clip_frames()?;
      match request.style {
        DecorationStyle::Solid => {
          self.stroke_line(c, request, anchor_y(request), StrokeStyle::solid(request.thickness));
          Ok(())
        }
        DecorationStyle::Dotted => {
          self.draw_dotted(c, request);
          Ok(())
        }
        DecorationStyle::Dashed => {
          self.draw_dashed(c, request);
          Ok(())
        }
        DecorationStyle::Double => {
          self.draw_double(c, request);
          Ok(())
        }
        DecorationStyle::Wavy => self.draw_wavy(c, request),
      }
    })
  }

  fn stroke_line(&self, canvas: &mut Canvas, request: &DecorationRequest, y: f32, style: StrokeStyle) {
    if let Some(path) = horizontal_line(request.x, request.x + request.width, y) {
      canvas.stroke_path(&path, request.color, &style);
    }
  }

  fn draw_dotted(&self, canvas: &mut Canvas, request: &DecorationRequest) {
    let t = request.thickness;
    // A 1px dot needs extra breathing room to stay distinguishable.
    let spacing = if t == 1.0 { 2.0 * t + t / 2.0 } else { 2.0 * t };
    let style = StrokeStyle {
      width: t,
      cap: LineCap::Round,
      dash: Some(crate::paint::canvas::DashPattern {
        array: vec![0.0, spacing],
        // Phase-locked to the run start so split runs line up.
        offset: request.x,
      }),
    };
    self.stroke_line(canvas, request, anchor_y(request), style);
  }

  fn draw_dashed(&self, canvas: &mut Canvas, request: &DecorationRequest) {
    let style = dashed_stroke(request.thickness, request.x);
    self.stroke_line(canvas, request, anchor_y(request), style);
  }

  fn draw_double(&self, canvas: &mut Canvas, request: &DecorationRequest) {
    let t = request.thickness;
    let style = StrokeStyle::solid(t);
    let gap = t + t / 2.0 + 0.5;
    match request.line {
      DecorationLine::Underline => {
        self.stroke_line(canvas, request, request.y + t / 2.0, style.clone());
        self.stroke_line(canvas, request, request.y + t / 2.0 + gap, style);
      }
      DecorationLine::Overline => {
        self.stroke_line(canvas, request, request.y - t / 2.0, style.clone());
        self.stroke_line(canvas, request, request.y - t / 2.0 - gap, style);
      }
      DecorationLine::LineThrough => {
        self.stroke_line(canvas, request, request.y - t + 0.5, style.clone());
        self.stroke_line(canvas, request, request.y + t + 0.5, style);
      }
    }
  }

  fn draw_wavy(&mut self, canvas: &mut Canvas, request: &DecorationRequest) -> Result<()> {
    let t = request.thickness;
    let brush = self.wavy_brush(t, request.color)?;
    let brush_height = brush.height() as f32;
    let y = anchor_y(request);

    let path = match horizontal_line(request.x, request.x + request.width, y) {
      Some(path) => path,
      None => return Ok(()),
    };
    let shader = Pattern::new(
      (*brush).as_ref(),
      SpreadMode::Repeat,
      FilterQuality::Nearest,
      1.0,
      Transform::from_translate(request.x, y - brush_height / 2.0),
    );
    let style = StrokeStyle {
      width: brush_height,
      cap: LineCap::Butt,
      dash: None,
    };
    canvas.stroke_path_shader(&path, shader, &style);
    Ok(())
  }

  /// Returns the cached zigzag brush for a thickness/color pair
  fn wavy_brush(&mut self, thickness: f32, color: Rgba) -> Result<Arc<Pixmap>> {
    let key = WavyBrushKey {
      thickness_bits: thickness.to_bits(),
      color,
    };
    if let Some(brush) = self.wavy_brushes.get(&key) {
      return Ok(Arc::clone(brush));
    }
    let brush = Arc::new(render_wavy_brush(thickness, color)?);
    self.wavy_brushes.put(key, Arc::clone(&brush));
    Ok(brush)
  }

  #[cfg(test)]
  fn cached_brush_count(&self) -> usize {
    self.wavy_brushes.len()
  }
}

/// Reference y to line center for the anchor rule of each kind
fn anchor_y(request: &DecorationRequest) -> f32 {
  let t = request.thickness;
  match request.line {
    DecorationLine::Underline => request.y + t / 2.0,
    DecorationLine::Overline => request.y - t / 2.0,
    DecorationLine::LineThrough => request.y + 0.5,
  }
}

/// Dash pattern for dashed decoration lines
///
/// Round caps swell each dash by half a thickness on both ends, so the
/// on/off pattern is picked to leave visible gaps after the swell.
fn dashed_stroke(thickness: f32, offset: f32) -> StrokeStyle {
  StrokeStyle {
    width: thickness,
    cap: LineCap::Round,
    dash: Some(crate::paint::canvas::DashPattern {
      array: vec![2.0 * thickness, 3.0 * thickness],
      // Phase-locked to the run start so split runs line up.
      offset,
    }),
  }
}

fn horizontal_line(x0: f32, x1: f32, y: f32) -> Option<Path> {
  let mut builder = PathBuilder::new();
  builder.move_to(x0, y);
  builder.line_to(x1, y);
  builder.finish()
}

/// Renders one period of the zigzag wave into a tile pixmap
///
/// The tile is sized so the wave peaks stay a padding pixel away from
/// the edges; its width is one full period, so horizontal repetition is
/// seamless.
fn render_wavy_brush(thickness: f32, color: Rgba) -> Result<Pixmap> {
  const EDGE_PADDING: f32 = 1.0;
  let brush_height = 3.0 * thickness + 2.0 * EDGE_PADDING;
  let brush_width = 2.0 * brush_height - 2.0 * thickness;

  let width = brush_width.ceil().max(1.0) as u32;
  let height = brush_height.ceil().max(1.0) as u32;
  let mut pixmap = Pixmap::new(width, height).ok_or_else(|| RenderError::ResourceExhausted {
    resource: format!("wavy brush {}x{}", width, height),
  })?;

  let low = brush_height - EDGE_PADDING - thickness / 2.0;
  let high = EDGE_PADDING + thickness / 2.0;
  let points = wavy_wave_points(brush_width, thickness, low, high);
  let mut builder = PathBuilder::new();
  builder.move_to(points[0].0, points[0].1);
  for &(x, y) in &points[1..] {
    builder.line_to(x, y);
  }
  let path = builder.finish().ok_or_else(|| RenderError::InvalidParameters {
    message: "Degenerate wavy brush path".to_string(),
  })?;

  let mut paint = tiny_skia::Paint::default();
  paint.set_color(color.to_skia());
  paint.anti_alias = true;
  let stroke = Stroke {
    width: thickness,
    line_cap: LineCap::Round,
    ..Stroke::default()
  };
  pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
  Ok(pixmap)
}

/// Vertices of one flat-topped zigzag period
///
/// The peak carries a flat of half a thickness and each trough half of
/// that at the tile edges, so adjacent tiles join into the same flat. A
/// sharp apex thinner than the stroke would render as a blob.
fn wavy_wave_points(brush_width: f32, thickness: f32, low: f32, high: f32) -> [(f32, f32); 6] {
  let half_flat = thickness / 4.0;
  [
    (0.0, low),
    (half_flat, low),
    (brush_width / 2.0 - half_flat, high),
    (brush_width / 2.0 + half_flat, high),
    (brush_width - half_flat, low),
    (brush_width, low),
  ]
}
