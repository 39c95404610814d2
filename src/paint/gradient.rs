//! Gradient paint sources
//!
//! Linear and radial gradients map onto tiny-skia shaders after the
//! stop list is normalized (clamped to [0, 1] and made monotonic).
//! Conic gradients have no shader equivalent, so they are tessellated
//! into pie-slice patches: each pair of adjacent stops becomes one or
//! more wedges whose arc is a cubic approximation of the circle
//! segment, filled with a linear gradient along the arc chord. Wedges
//! never span more than a quarter turn, which keeps both the cubic and
//! the chord-gradient approximations tight.

use crate::color::Rgba;
use crate::geometry::Point;
use crate::paint::canvas::Canvas;
use std::f32::consts::FRAC_PI_2;
use std::f32::consts::PI;
use tiny_skia::GradientStop;
use tiny_skia::Path;
use tiny_skia::PathBuilder;
use tiny_skia::Shader;
use tiny_skia::SpreadMode;
use tiny_skia::Transform;

/// One gradient color stop at a normalized offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
  /// Position along the gradient line in [0, 1]
  pub offset: f32,
  pub color: Rgba,
}

impl ColorStop {
  pub fn new(offset: f32, color: Rgba) -> Self {
    Self { offset, color }
  }
}

/// Linear gradient between two points
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
  pub start: Point,
  pub end: Point,
  pub stops: Vec<ColorStop>,
}

/// Radial gradient with independent horizontal and vertical radii
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
  pub center: Point,
  pub radius_x: f32,
  pub radius_y: f32,
  pub stops: Vec<ColorStop>,
}

/// Conic gradient sweeping around a center point
#[derive(Debug, Clone, PartialEq)]
pub struct ConicGradient {
  /// Sweep center in canvas coordinates; tiling offsets it per tile
  pub position: Point,
  /// Starting angle in degrees; 0 points up, positive turns clockwise
  pub angle: f32,
  /// Radius the tessellated patches must cover
  pub radius: f32,
  pub stops: Vec<ColorStop>,
}

/// Normalizes stops into a tiny-skia stop list
///
/// Offsets are clamped to [0, 1] and forced monotonic; returns None
/// when fewer than two stops remain, which callers degrade to a solid
/// fill or a no-op.
pub(crate) fn gradient_stops(stops: &[ColorStop]) -> Option<Vec<GradientStop>> {
  let normalized = normalize_stops(stops)?;
  Some(
    normalized
      .iter()
      .map(|stop| GradientStop::new(stop.offset, stop.color.to_skia()))
      .collect(),
  )
}

fn normalize_stops(stops: &[ColorStop]) -> Option<Vec<ColorStop>> {
  if stops.len() < 2 {
    return None;
  }
  let mut last = 0.0f32;
  let normalized = stops
    .iter()
    .map(|stop| {
      last = stop.offset.clamp(0.0, 1.0).max(last);
      ColorStop::new(last, stop.color)
    })
    .collect();
  Some(normalized)
}

/// Builds a linear gradient shader, or None for degenerate specs
pub(crate) fn linear_shader(gradient: &LinearGradient, transform: Transform) -> Option<Shader<'static>> {
  let stops = gradient_stops(&gradient.stops)?;
  tiny_skia::LinearGradient::new(
    tiny_skia::Point::from_xy(gradient.start.x, gradient.start.y),
    tiny_skia::Point::from_xy(gradient.end.x, gradient.end.y),
    stops,
    SpreadMode::Pad,
    transform,
  )
}

/// Builds a circular radial gradient shader centered on `center`
///
/// Elliptical radial gradients are drawn by scaling the canvas, not the
/// shader, so only one radius appears here.
pub(crate) fn radial_shader(
  center: Point,
  radius: f32,
  stops: &[ColorStop],
  transform: Transform,
) -> Option<Shader<'static>> {
  if radius <= 0.0 {
    return None;
  }
  let stops = gradient_stops(stops)?;
  let center = tiny_skia::Point::from_xy(center.x, center.y);
  tiny_skia::RadialGradient::new(center, center, radius, stops, SpreadMode::Pad, transform)
}

/// Expands a conic stop list so every sweep has two endpoints
///
/// Zero stops paint nothing. A single stop becomes a uniform sweep of
/// that color. Two stops get a channel-averaged midpoint inserted at
/// 0.5 so the sweep blends through it.
pub fn prepare_conic_stops(stops: &[ColorStop]) -> Option<Vec<ColorStop>> {
  match stops {
    [] => None,
    [only] => Some(vec![
      ColorStop::new(0.0, only.color),
      ColorStop::new(0.5, only.color),
      ColorStop::new(1.0, only.color),
    ]),
    [first, second] => {
      let mid = first.color.midpoint(second.color);
      Some(vec![*first, ColorStop::new(0.5, mid), *second])
    }
    _ => Some(stops.to_vec()),
  }
}

/// One tessellated wedge of a conic sweep
pub struct SectorPatch {
  /// Closed wedge outline: center, arc start, cubic arc, back to center
  pub path: Path,
  /// Arc start point on the circle
  pub start: Point,
  /// Arc end point on the circle
  pub end: Point,
  pub start_color: Rgba,
  pub end_color: Rgba,
}

impl SectorPatch {
  /// Builds the wedge for one angular span around the origin
  ///
  /// The arc from `angle_a` to `angle_b` (radians, at most a quarter
  /// turn) is a single cubic with tangent handles of length
  /// `4/3 * tan(span/4) * radius`.
  fn new(radius: f32, angle_a: f32, angle_b: f32, color_a: Rgba, color_b: Rgba) -> Option<Self> {
    let span = angle_b - angle_a;
    if span <= 0.0 {
      return None;
    }
    let h = 4.0 / 3.0 * (span / 4.0).tan();

    let (sin_a, cos_a) = angle_a.sin_cos();
    let (sin_b, cos_b) = angle_b.sin_cos();
    let start = Point::new(radius * cos_a, radius * sin_a);
    let end = Point::new(radius * cos_b, radius * sin_b);

    let mut builder = PathBuilder::new();
    builder.move_to(0.0, 0.0);
    builder.line_to(start.x, start.y);
    builder.cubic_to(
      start.x - h * radius * sin_a,
      start.y + h * radius * cos_a,
      end.x + h * radius * sin_b,
      end.y - h * radius * cos_b,
      end.x,
      end.y,
    );
    builder.close();

    Some(Self {
      path: builder.finish()?,
      start,
      end,
      start_color: color_a,
      end_color: color_b,
    })
  }
}

/// A conic sweep tessellated into wedges around the origin
///
/// Patches are built in local coordinates; the caller translates the
/// canvas to the sweep center before painting.
pub struct ConicPattern {
  pub patches: Vec<SectorPatch>,
}

impl ConicPattern {
  /// Tessellates a full sweep starting at `angle` degrees
  ///
  /// The zero angle points up, matching CSS `from` angles, so the sweep
  /// origin sits a quarter turn behind the math convention.
  pub fn new(angle: f32, radius: f32, stops: &[ColorStop]) -> Option<Self> {
    if radius <= 0.0 {
      return None;
    }
    let stops = prepare_conic_stops(stops)?;
    let offset = angle.to_radians() - FRAC_PI_2;

    let mut patches = Vec::new();
    for pair in stops.windows(2) {
      let angle_a = offset + pair[0].offset.clamp(0.0, 1.0) * 2.0 * PI;
      let angle_b = offset + pair[1].offset.clamp(0.0, 1.0) * 2.0 * PI;
      let span = angle_b - angle_a;
      if span <= 0.0 {
        continue;
      }

      // Split wide sweeps so no wedge exceeds a quarter turn.
      let segments = (span / FRAC_PI_2).ceil().max(1.0) as u32;
      for seg in 0..segments {
        let t0 = seg as f32 / segments as f32;
        let t1 = (seg + 1) as f32 / segments as f32;
        let patch = SectorPatch::new(
          radius,
          angle_a + span * t0,
          angle_a + span * t1,
          lerp_color(pair[0].color, pair[1].color, t0),
          lerp_color(pair[0].color, pair[1].color, t1),
        );
        if let Some(patch) = patch {
          patches.push(patch);
        }
      }
    }

    if patches.is_empty() {
      None
    } else {
      Some(Self { patches })
    }
  }

  /// Paints every wedge at the canvas's current origin
  pub(crate) fn paint(&self, canvas: &mut Canvas) {
    for patch in &self.patches {
      if patch.start_color == patch.end_color {
        canvas.fill_path(&patch.path, patch.start_color);
        continue;
      }
      let chord = LinearGradient {
        start: patch.start,
        end: patch.end,
        stops: vec![
          ColorStop::new(0.0, patch.start_color),
          ColorStop::new(1.0, patch.end_color),
        ],
      };
      match linear_shader(&chord, Transform::identity()) {
        Some(shader) => canvas.fill_path_shader(&patch.path, shader),
        // Chord collapsed to a point; average the endpoints.
        None => canvas.fill_path(
          &patch.path,
          patch.start_color.midpoint(patch.end_color),
        ),
      }
    }
  }
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
  (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

fn lerp_color(a: Rgba, b: Rgba, t: f32) -> Rgba {
  Rgba {
    r: lerp_channel(a.r, b.r, t),
    g: lerp_channel(a.g, b.g, t),
    b: lerp_channel(a.b, b.b, t),
    a: lerp_channel(a.a, b.a, t),
  }
}
