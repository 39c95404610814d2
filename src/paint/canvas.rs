//! Canvas wrapper for the tiny-skia rasterization backend
//!
//! The canvas owns the pixel surface, a stack of graphics states
//! (transform + accumulated clip mask), and the persistent clip-frame
//! stack that callers push around drawing scopes. Drawing operations in
//! the border/background/decoration modules open a saved scope, apply
//! the clip frames, emit their paths, and restore; `with_save` makes the
//! restore unconditional across early returns.
//!
//! Clipping is uniformly mask-based: every clip (rect, rounded rect, or
//! arbitrary wedge path) is rasterized into an alpha mask under the
//! current transform and intersected with the active mask. This keeps
//! rotated border-side frames and rounded clips on one code path.

use crate::color::Rgba;
use crate::error::RenderError;
use crate::error::Result;
use crate::geometry::CornerRadii;
use crate::geometry::Rect;
use crate::paint::path::rounded_rect_path;
use crate::paint::path::PathSink;
use std::f32::consts::PI;
use tiny_skia::FillRule;
use tiny_skia::FilterQuality;
use tiny_skia::LineCap;
use tiny_skia::Mask;
use tiny_skia::Paint;
use tiny_skia::Path;
use tiny_skia::PathBuilder;
use tiny_skia::Pixmap;
use tiny_skia::PixmapPaint;
use tiny_skia::Shader;
use tiny_skia::Stroke;
use tiny_skia::StrokeDash;
use tiny_skia::Transform;

/// An on/off dash sequence plus starting offset for stroked paths
#[derive(Debug, Clone, PartialEq)]
pub struct DashPattern {
  /// Alternating on/off lengths; zero "on" lengths produce dots when
  /// combined with round caps
  pub array: Vec<f32>,
  /// Offset into the pattern at the start of the stroke (may be negative)
  pub offset: f32,
}

/// Stroke parameters for a single stroked path
#[derive(Debug, Clone)]
pub struct StrokeStyle {
  /// Stroke width in device pixels
  pub width: f32,
  /// Line cap applied to segment ends and dash ends
  pub cap: LineCap,
  /// Optional dash pattern; None strokes a continuous line
  pub dash: Option<DashPattern>,
}

impl StrokeStyle {
  /// A continuous butt-capped stroke
  pub fn solid(width: f32) -> Self {
    Self {
      width,
      cap: LineCap::Butt,
      dash: None,
    }
  }

  /// A dashed butt-capped stroke
  pub fn dashed(width: f32, array: Vec<f32>, offset: f32) -> Self {
    Self {
      width,
      cap: LineCap::Butt,
      dash: Some(DashPattern { array, offset }),
    }
  }

  /// A dotted stroke: round caps with a zero-length "on" interval
  pub fn dotted(width: f32, gap: f32, offset: f32) -> Self {
    Self {
      width,
      cap: LineCap::Round,
      dash: Some(DashPattern {
        array: vec![0.0, gap],
        offset,
      }),
    }
  }

  fn to_stroke(&self) -> Stroke {
    Stroke {
      width: self.width,
      line_cap: self.cap,
      // An unrepresentable dash (e.g. zero total length) degrades to a
      // continuous stroke rather than failing the draw.
      dash: self.dash.as_ref().and_then(|d| {
        let period: f32 = d.array.iter().sum();
        if period <= 0.0 {
          return None;
        }
        // Negative phases wrap into the pattern period.
        let offset = d.offset.rem_euclid(period);
        StrokeDash::new(d.array.clone(), offset)
      }),
      ..Stroke::default()
    }
  }
}

#[derive(Clone)]
struct CanvasState {
  transform: Transform,
  clip_mask: Option<Mask>,
}

impl CanvasState {
  fn new() -> Self {
    Self {
      transform: Transform::identity(),
      clip_mask: None,
    }
  }
}

/// A clip frame: one nested clip region pushed by a caller
#[derive(Debug, Clone, Copy)]
pub struct ClipFrame {
  /// Clip rectangle
  pub rect: Rect,
  /// Corner radii of the clip region
  pub radii: CornerRadii,
}

/// 2D drawing surface backed by a tiny-skia pixmap
///
/// Not thread-safe; each render owns its own canvas. All resources the
/// canvas allocates (masks, the surface itself) are scoped to it.
pub struct Canvas {
  pixmap: Pixmap,
  state_stack: Vec<CanvasState>,
  current: CanvasState,
  clip_frames: Vec<ClipFrame>,
}

impl Canvas {
  /// Creates a canvas filled with a background color
  ///
  /// # Errors
  ///
  /// Returns `RenderError::InvalidParameters` when either dimension is
  /// zero or the surface cannot be allocated.
  pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self> {
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| RenderError::InvalidParameters {
      message: format!("Failed to create canvas {}x{}", width, height),
    })?;
    pixmap.fill(background.to_skia());

    Ok(Self {
      pixmap,
      state_stack: Vec::new(),
      current: CanvasState::new(),
      clip_frames: Vec::new(),
    })
  }

  /// Creates a canvas with a transparent background
  pub fn new_transparent(width: u32, height: u32) -> Result<Self> {
    Self::new(width, height, Rgba::TRANSPARENT)
  }

  /// Canvas width in pixels
  #[inline]
  pub fn width(&self) -> u32 {
    self.pixmap.width()
  }

  /// Canvas height in pixels
  #[inline]
  pub fn height(&self) -> u32 {
    self.pixmap.height()
  }

  /// Consumes the canvas and returns the pixel surface
  pub fn into_pixmap(self) -> Pixmap {
    self.pixmap
  }

  /// Borrows the pixel surface
  #[inline]
  pub fn pixmap(&self) -> &Pixmap {
    &self.pixmap
  }

  // ==========================================================================
  // State management
  // ==========================================================================

  /// Saves the current transform and clip mask
  pub fn save(&mut self) {
    self.state_stack.push(self.current.clone());
  }

  /// Restores the most recently saved state
  pub fn restore(&mut self) {
    if let Some(state) = self.state_stack.pop() {
      self.current = state;
    }
  }

  /// Runs `f` between a save/restore pair
  ///
  /// The restore happens on every exit path of `f`, so drawing routines
  /// can bail out early on degenerate geometry without unbalancing the
  /// state stack.
  pub fn with_save<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
    self.save();
    let result = f(self);
    self.restore();
    result
  }

  /// Current state stack depth
  #[inline]
  pub fn state_depth(&self) -> usize {
    self.state_stack.len()
  }

  /// Current transform
  #[inline]
  pub fn transform(&self) -> Transform {
    self.current.transform
  }

  /// Appends a translation to the current transform
  pub fn translate(&mut self, dx: f32, dy: f32) {
    self.current.transform = self.current.transform.pre_translate(dx, dy);
  }

  /// Appends a rotation (radians) about the given point
  pub fn rotate_at(&mut self, radians: f32, cx: f32, cy: f32) {
    let degrees = radians * 180.0 / PI;
    self.current.transform = self
      .current
      .transform
      .pre_concat(Transform::from_rotate_at(degrees, cx, cy));
  }

  /// Appends a scale about the given point
  pub fn scale_at(&mut self, sx: f32, sy: f32, cx: f32, cy: f32) {
    let scale = Transform::from_translate(cx, cy)
      .pre_scale(sx, sy)
      .pre_translate(-cx, -cy);
    self.current.transform = self.current.transform.pre_concat(scale);
  }

  // ==========================================================================
  // Clip frames
  // ==========================================================================

  /// Pushes a clip frame; it stays active until the matching `pop_clip`
  pub fn push_clip(&mut self, rect: Rect, radii: CornerRadii) {
    self.clip_frames.push(ClipFrame { rect, radii });
  }

  /// Pops the most recently pushed clip frame
  pub fn pop_clip(&mut self) {
    let _ = self.clip_frames.pop();
  }

  /// Number of active clip frames
  #[inline]
  pub fn clip_depth(&self) -> usize {
    self.clip_frames.len()
  }

  /// Intersects the current clip mask with every active clip frame
  ///
  /// Called by drawing operations inside their saved scope; the net
  /// effect is the intersection of all frames regardless of push order.
  pub fn apply_clip_frames(&mut self) -> Result<()> {
    for frame in self.clip_frames.clone() {
      self.clip_rounded_rect(frame.rect, frame.radii)?;
    }
    Ok(())
  }

  /// Clips to a rectangle
  pub fn clip_rect(&mut self, rect: Rect) -> Result<()> {
    self.clip_rounded_rect(rect, CornerRadii::ZERO)
  }

  /// Clips to a rounded rectangle
  pub fn clip_rounded_rect(&mut self, rect: Rect, radii: CornerRadii) -> Result<()> {
    match rounded_rect_path(rect, radii.clamped(rect.width(), rect.height())) {
      Some(path) => self.clip_path(&path),
      // Degenerate rect: nothing can draw inside it.
      None => {
        self.current.clip_mask = Some(self.empty_mask()?);
        Ok(())
      }
    }
  }

  /// Clips to an arbitrary filled path under the current transform
  pub fn clip_path(&mut self, path: &Path) -> Result<()> {
    let mut mask = self.empty_mask()?;
    mask.fill_path(path, FillRule::Winding, true, self.current.transform);

    self.current.clip_mask = match self.current.clip_mask.take() {
      Some(existing) => {
        intersect_masks(&mut mask, &existing);
        Some(mask)
      }
      None => Some(mask),
    };
    Ok(())
  }

  fn empty_mask(&self) -> Result<Mask> {
    Mask::new(self.width(), self.height()).ok_or_else(|| {
      RenderError::ResourceExhausted {
        resource: format!("clip mask {}x{}", self.width(), self.height()),
      }
      .into()
    })
  }

  // ==========================================================================
  // Drawing
  // ==========================================================================

  fn color_paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
  }

  fn shader_paint(shader: Shader<'_>) -> Paint<'_> {
    Paint {
      shader,
      anti_alias: true,
      ..Paint::default()
    }
  }

  /// Fills a path with a solid color
  pub fn fill_path(&mut self, path: &Path, color: Rgba) {
    if color.is_transparent() {
      return;
    }
    let paint = Self::color_paint(color);
    self.pixmap.fill_path(
      path,
      &paint,
      FillRule::Winding,
      self.current.transform,
      self.current.clip_mask.as_ref(),
    );
  }

  /// Fills a path with a shader (gradient or pattern)
  pub fn fill_path_shader(&mut self, path: &Path, shader: Shader<'_>) {
    let paint = Self::shader_paint(shader);
    self.pixmap.fill_path(
      path,
      &paint,
      FillRule::Winding,
      self.current.transform,
      self.current.clip_mask.as_ref(),
    );
  }

  /// Strokes a path with a solid color
  pub fn stroke_path(&mut self, path: &Path, color: Rgba, style: &StrokeStyle) {
    if color.is_transparent() || style.width <= 0.0 {
      return;
    }
    let paint = Self::color_paint(color);
    self.pixmap.stroke_path(
      path,
      &paint,
      &style.to_stroke(),
      self.current.transform,
      self.current.clip_mask.as_ref(),
    );
  }

  /// Strokes a path with a shader
  pub fn stroke_path_shader(&mut self, path: &Path, shader: Shader<'_>, style: &StrokeStyle) {
    if style.width <= 0.0 {
      return;
    }
    let paint = Self::shader_paint(shader);
    self.pixmap.stroke_path(
      path,
      &paint,
      &style.to_stroke(),
      self.current.transform,
      self.current.clip_mask.as_ref(),
    );
  }

  /// Fills a rectangle with a solid color
  pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
    if let Some(path) = rect_path(rect) {
      self.fill_path(&path, color);
    }
  }

  /// Fills a rectangle with a shader
  pub fn fill_rect_shader(&mut self, rect: Rect, shader: Shader<'_>) {
    if let Some(path) = rect_path(rect) {
      self.fill_path_shader(&path, shader);
    }
  }

  /// Blits a pixmap with its top-left corner at `(x, y)`
  ///
  /// Honors the current transform and clip mask; used for no-repeat
  /// background images and list-marker images.
  pub fn draw_pixmap(&mut self, x: f32, y: f32, source: &Pixmap) {
    let paint = PixmapPaint {
      quality: FilterQuality::Bilinear,
      ..PixmapPaint::default()
    };
    self.pixmap.draw_pixmap(
      0,
      0,
      source.as_ref(),
      &paint,
      self.current.transform.pre_translate(x, y),
      self.current.clip_mask.as_ref(),
    );
  }

  /// Strokes an ellipse inscribed in the given box (circle list markers)
  pub fn draw_ellipse(&mut self, rect: Rect, color: Rgba, line_width: f32) -> Result<()> {
    if rect.is_empty() {
      return Ok(());
    }
    self.with_save(|canvas| {
      canvas.apply_clip_frames()?;
      if let Some(path) = ellipse_path(rect) {
        canvas.stroke_path(&path, color, &StrokeStyle::solid(line_width));
      }
      Ok(())
    })
  }

  /// Fills an ellipse inscribed in the given box (disc list markers)
  pub fn fill_ellipse(&mut self, rect: Rect, color: Rgba) -> Result<()> {
    if rect.is_empty() {
      return Ok(());
    }
    self.with_save(|canvas| {
      canvas.apply_clip_frames()?;
      if let Some(path) = ellipse_path(rect) {
        canvas.fill_path(&path, color);
      }
      Ok(())
    })
  }
}

fn rect_path(rect: Rect) -> Option<Path> {
  let skia = tiny_skia::Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom)?;
  Some(PathBuilder::from_rect(skia))
}

fn ellipse_path(rect: Rect) -> Option<Path> {
  let center = rect.center();
  let mut sink = PathSink::new();
  sink.arc(
    center.x,
    center.y,
    rect.width() / 2.0,
    rect.height() / 2.0,
    0.0,
    2.0 * PI,
    false,
  );
  sink.close();
  sink.finish()
}

fn intersect_masks(into: &mut Mask, existing: &Mask) {
  if into.width() != existing.width() || into.height() != existing.height() {
    return;
  }
  for (dst, src) in into.data_mut().iter_mut().zip(existing.data().iter()) {
    let multiplied = (*dst as u16 * *src as u16 + 127) / 255;
    *dst = multiplied as u8;
  }
}

/// Reads one RGBA pixel; test helper for pixel probes
#[cfg(test)]
pub(crate) fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
  let idx = ((y * pixmap.width() + x) * 4) as usize;
  let data = pixmap.data();
  (data[idx], data[idx + 1], data[idx + 2], data[idx + 3])
}
