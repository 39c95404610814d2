//! Background layer painting
//!
//! A background layer ties together the boxes CSS computes for it: the
//! clip box (with the border's corner radii) bounds all painting, and
//! the origin box anchors the first tile. Solid fills ignore tiling;
//! gradients and images repeat from the origin box across the clip box
//! according to the layer's repeat mode.
//!
//! Gradient geometry (line endpoints, centers) arrives in absolute
//! canvas coordinates for the anchor tile; repetition shifts the same
//! paint source by whole tile strides.

use crate::color::Rgba;
use crate::error::RenderError;
use crate::error::Result;
use crate::geometry::CornerRadii;
use crate::geometry::Rect;
use crate::paint::canvas::Canvas;
use crate::paint::gradient::linear_shader;
use crate::paint::gradient::radial_shader;
use crate::paint::gradient::ConicGradient;
use crate::paint::gradient::ConicPattern;
use crate::paint::gradient::LinearGradient;
use crate::paint::gradient::RadialGradient;
use tiny_skia::FilterQuality;
use tiny_skia::Pattern;
use tiny_skia::Pixmap;
use tiny_skia::SpreadMode;
use tiny_skia::Transform;

/// CSS `background-repeat` modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
  #[default]
  Repeat,
  RepeatX,
  RepeatY,
  NoRepeat,
}

impl Repeat {
  fn tiles_x(self) -> bool {
    matches!(self, Repeat::Repeat | Repeat::RepeatX)
  }

  fn tiles_y(self) -> bool {
    matches!(self, Repeat::Repeat | Repeat::RepeatY)
  }
}

/// Geometry of one background layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundLayer {
  /// Border box of the element, rounded by the corner radii
  pub border_box: Rect,
  /// Painting is additionally clipped to this box (e.g. padding box)
  pub clip_box: Rect,
  /// Anchor box for the first tile
  pub origin_box: Rect,
  pub radii: CornerRadii,
  pub repeat: Repeat,
}

/// Clips the canvas to the rounded border box intersected with the
/// layer's clip box
fn clip_layer(canvas: &mut Canvas, layer: &BackgroundLayer) -> Result<()> {
  canvas.clip_rounded_rect(layer.border_box, layer.radii)?;
  if layer.clip_box != layer.border_box {
    canvas.clip_rect(layer.clip_box)?;
  }
  Ok(())
}

/// Tile index range along one axis
///
/// Returns `first..last` such that tiles starting at
/// `origin_start + i * size` cover `[clip_start, clip_end]`. Tiles
/// flush with the clip edge are not duplicated.
fn tile_indices(origin_start: f32, size: f32, clip_start: f32, clip_end: f32) -> (i32, i32) {
  let first = ((clip_start - origin_start) / size).floor() as i32;
  let last = ((clip_end - origin_start) / size).ceil() as i32;
  (first, last.max(first + 1))
}

/// Invokes `f` once per visible tile with the tile's offset from the
/// anchor position
fn for_each_tile<F>(
  layer: &BackgroundLayer,
  tile_width: f32,
  tile_height: f32,
  mut f: F,
) -> Result<()>
where
  F: FnMut(f32, f32) -> Result<()>,
{
  let (first_x, last_x) = if layer.repeat.tiles_x() && tile_width > 0.0 {
    tile_indices(
      layer.origin_box.left,
      tile_width,
      layer.clip_box.left,
      layer.clip_box.right,
    )
  } else {
    (0, 1)
  };
  let (first_y, last_y) = if layer.repeat.tiles_y() && tile_height > 0.0 {
    tile_indices(
      layer.origin_box.top,
      tile_height,
      layer.clip_box.top,
      layer.clip_box.bottom,
    )
  } else {
    (0, 1)
  };

  for iy in first_y..last_y {
    for ix in first_x..last_x {
      f(ix as f32 * tile_width, iy as f32 * tile_height)?;
    }
  }
  Ok(())
}

/// Fills the layer's clip box with a solid color
pub fn draw_solid_fill(canvas: &mut Canvas, layer: &BackgroundLayer, color: Rgba) -> Result<()> {
  if color.is_transparent() || layer.clip_box.is_empty() {
    return Ok(());
  }
  canvas.with_save(|c| {
    c.apply_clip_frames()?;
    clip_layer(c, layer)?;
    c.fill_rect(layer.clip_box, color);
    Ok(())
  })
}

/// Paints a linear gradient across the layer, tiled from the origin box
///
/// A single-stop gradient degrades to a solid fill of that color; an
/// empty stop list paints nothing.
pub fn draw_linear_gradient(
  canvas: &mut Canvas,
  layer: &BackgroundLayer,
  gradient: &LinearGradient,
) -> Result<()> {
  if layer.clip_box.is_empty() {
    return Ok(());
  }
  match gradient.stops.as_slice() {
    [] => Ok(()),
    [only] => draw_solid_fill(canvas, layer, only.color),
    _ => canvas.with_save(|c| {
      c.apply_clip_frames()?;
      clip_layer(c, layer)?;
      for_each_tile(
        layer,
        layer.origin_box.width(),
        layer.origin_box.height(),
        |dx, dy| {
          if let Some(shader) = linear_shader(gradient, Transform::from_translate(dx, dy)) {
            let tile = layer.origin_box.translate(dx, dy);
            c.fill_rect_shader(tile, shader);
          }
          Ok(())
        },
      )
    }),
  }
}

/// Paints a radial gradient across the layer, tiled from the origin box
///
/// Elliptical gradients are drawn as circles of the horizontal radius
/// under a vertical canvas scale about the center; tile geometry is
/// stretched by the inverse so tiles land at their true positions.
pub fn draw_radial_gradient(
  canvas: &mut Canvas,
  layer: &BackgroundLayer,
  gradient: &RadialGradient,
) -> Result<()> {
  if layer.clip_box.is_empty() || gradient.radius_x <= 0.0 || gradient.radius_y <= 0.0 {
    return Ok(());
  }
  match gradient.stops.as_slice() {
    [] => Ok(()),
    [only] => draw_solid_fill(canvas, layer, only.color),
    _ => canvas.with_save(|c| {
      c.apply_clip_frames()?;
      clip_layer(c, layer)?;

      let center = gradient.center;
      let mut tile_height = layer.origin_box.height();
      let mut tile_top = layer.origin_box.top;
      if gradient.radius_x != gradient.radius_y {
        let aspect = gradient.radius_x / gradient.radius_y;
        c.scale_at(1.0, gradient.radius_y / gradient.radius_x, center.x, center.y);
        tile_height *= aspect;
        tile_top = center.y + (tile_top - center.y) * aspect;
      }

      let tiled = BackgroundLayer {
        origin_box: Rect::from_edges(
          layer.origin_box.left,
          tile_top,
          layer.origin_box.right,
          tile_top + tile_height,
        ),
        ..*layer
      };
      for_each_tile(&tiled, tiled.origin_box.width(), tile_height, |dx, dy| {
        let shader = radial_shader(
          center,
          gradient.radius_x,
          &gradient.stops,
          Transform::from_translate(dx, dy),
        );
        if let Some(shader) = shader {
          let tile = tiled.origin_box.translate(dx, dy);
          c.fill_rect_shader(tile, shader);
        }
        Ok(())
      })
    }),
  }
}

/// Paints a conic gradient across the layer, tiled from the origin box
///
/// Each tile clips to its own rectangle before the tessellated sweep is
/// painted, so neighboring sweeps cannot bleed into each other.
pub fn draw_conic_gradient(
  canvas: &mut Canvas,
  layer: &BackgroundLayer,
  gradient: &ConicGradient,
) -> Result<()> {
  if layer.clip_box.is_empty() {
    return Ok(());
  }
  let pattern = match ConicPattern::new(gradient.angle, gradient.radius, &gradient.stops) {
    Some(pattern) => pattern,
    None => return Ok(()),
  };

  canvas.with_save(|c| {
    c.apply_clip_frames()?;
    clip_layer(c, layer)?;
    for_each_tile(
      layer,
      layer.origin_box.width(),
      layer.origin_box.height(),
      |dx, dy| {
        c.with_save(|c| {
          let tile = layer.origin_box.translate(dx, dy);
          c.clip_rect(tile)?;
          c.translate(gradient.position.x + dx, gradient.position.y + dy);
          pattern.paint(c);
          Ok(())
        })
      },
    )
  })
}

/// Paints a background image, tiled according to the layer's repeat mode
///
/// The image is drawn at its own pixel size; callers wanting
/// `background-size` scaling resample with [`scale_pixmap`] first.
pub fn draw_image(canvas: &mut Canvas, layer: &BackgroundLayer, image: &Pixmap) -> Result<()> {
  if layer.clip_box.is_empty() || image.width() == 0 || image.height() == 0 {
    return Ok(());
  }
  canvas.with_save(|c| {
    c.apply_clip_frames()?;
    clip_layer(c, layer)?;

    let origin = layer.origin_box;
    if layer.repeat == Repeat::NoRepeat {
      c.draw_pixmap(origin.left, origin.top, image);
      return Ok(());
    }

    // Repeating axes fill a strip (or the whole clip box) with a
    // repeating pattern anchored at the origin box.
    let width = image.width() as f32;
    let height = image.height() as f32;
    let fill_area = Rect::from_edges(
      if layer.repeat.tiles_x() {
        layer.clip_box.left
      } else {
        origin.left
      },
      if layer.repeat.tiles_y() {
        layer.clip_box.top
      } else {
        origin.top
      },
      if layer.repeat.tiles_x() {
        layer.clip_box.right
      } else {
        origin.left + width
      },
      if layer.repeat.tiles_y() {
        layer.clip_box.bottom
      } else {
        origin.top + height
      },
    );

    let shader = Pattern::new(
      image.as_ref(),
      SpreadMode::Repeat,
      FilterQuality::Bilinear,
      1.0,
      Transform::from_translate(origin.left, origin.top),
    );
    c.fill_rect_shader(fill_area, shader);
    Ok(())
  })
}

/// Resamples a pixmap to new dimensions with bilinear filtering
pub fn scale_pixmap(source: &Pixmap, width: u32, height: u32) -> Result<Pixmap> {
  let mut scaled = Pixmap::new(width, height).ok_or_else(|| RenderError::InvalidParameters {
    message: format!("Failed to allocate {}x{} pixmap", width, height),
  })?;

  let sx = width as f32 / source.width() as f32;
  let sy = height as f32 / source.height() as f32;
  let shader = Pattern::new(
    source.as_ref(),
    SpreadMode::Pad,
    FilterQuality::Bilinear,
    1.0,
    Transform::from_scale(sx, sy),
  );
  let mut paint = tiny_skia::Paint::default();
  paint.shader = shader;

  let bounds = tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32).ok_or_else(
    || RenderError::InvalidParameters {
      message: format!("Invalid scale target {}x{}", width, height),
    },
  )?;
  scaled.fill_rect(bounds, &paint, Transform::identity(), None);
  Ok(scaled)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::Point;
  use crate::paint::canvas::pixel;
  use crate::paint::gradient::ColorStop;

  fn simple_layer(rect: Rect, repeat: Repeat) -> BackgroundLayer {
    BackgroundLayer {
      border_box: rect,
      clip_box: rect,
      origin_box: rect,
      radii: CornerRadii::ZERO,
      repeat,
    }
  }

  #[test]
  fn test_tile_indices_origin_at_clip() {
    assert_eq!(tile_indices(0.0, 10.0, 0.0, 30.0), (0, 3));
  }

  #[test]
  fn test_tile_indices_clip_extends_left_of_origin() {
    // 25px of overhang at 10px tiles needs three extra tiles.
    assert_eq!(tile_indices(25.0, 10.0, 0.0, 30.0), (-3, 1));
    // Exact multiples do not add a tile.
    assert_eq!(tile_indices(20.0, 10.0, 0.0, 30.0), (-2, 1));
  }

  #[test]
  fn test_tile_indices_partial_last_tile() {
    assert_eq!(tile_indices(0.0, 10.0, 0.0, 35.0), (0, 4));
  }

  #[test]
  fn test_solid_fill_covers_clip_box() {
    let mut canvas = Canvas::new(30, 30, Rgba::WHITE).unwrap();
    let layer = simple_layer(Rect::from_xywh(5.0, 5.0, 20.0, 20.0), Repeat::NoRepeat);
    draw_solid_fill(&mut canvas, &layer, Rgba::rgb(0, 128, 0)).unwrap();
    let pixmap = canvas.into_pixmap();
    assert_eq!(pixel(&pixmap, 15, 15), (0, 128, 0, 255));
    assert_eq!(pixel(&pixmap, 2, 2), (255, 255, 255, 255));
  }

  #[test]
  fn test_solid_fill_respects_rounded_clip() {
    let mut canvas = Canvas::new(30, 30, Rgba::WHITE).unwrap();
    let mut layer = simple_layer(Rect::from_xywh(5.0, 5.0, 20.0, 20.0), Repeat::NoRepeat);
    layer.radii = CornerRadii::uniform(8.0);
    draw_solid_fill(&mut canvas, &layer, Rgba::rgb(0, 128, 0)).unwrap();
    let pixmap = canvas.into_pixmap();
    assert_eq!(pixel(&pixmap, 15, 15), (0, 128, 0, 255));
    // The square corner lies outside the rounded region.
    assert_eq!(pixel(&pixmap, 6, 6), (255, 255, 255, 255));
  }

  #[test]
  fn test_linear_gradient_spans_box() {
    let mut canvas = Canvas::new(40, 20, Rgba::WHITE).unwrap();
    let layer = simple_layer(Rect::from_xywh(0.0, 0.0, 40.0, 20.0), Repeat::NoRepeat);
    let gradient = LinearGradient {
      start: Point::new(0.0, 0.0),
      end: Point::new(40.0, 0.0),
      stops: vec![
        ColorStop::new(0.0, Rgba::rgb(255, 0, 0)),
        ColorStop::new(1.0, Rgba::rgb(0, 0, 255)),
      ],
    };
    draw_linear_gradient(&mut canvas, &layer, &gradient).unwrap();
    let pixmap = canvas.into_pixmap();

    let (r0, _, b0, _) = pixel(&pixmap, 1, 10);
    let (r1, _, b1, _) = pixel(&pixmap, 38, 10);
    assert!(r0 > 200 && b0 < 60);
    assert!(b1 > 200 && r1 < 60);
  }

  #[test]
  fn test_single_stop_gradient_fills_solid() {
    let mut canvas = Canvas::new(20, 20, Rgba::WHITE).unwrap();
    let layer = simple_layer(Rect::from_xywh(0.0, 0.0, 20.0, 20.0), Repeat::NoRepeat);
    let gradient = LinearGradient {
      start: Point::ZERO,
      end: Point::new(20.0, 0.0),
      stops: vec![ColorStop::new(0.5, Rgba::rgb(10, 20, 30))],
    };
    draw_linear_gradient(&mut canvas, &layer, &gradient).unwrap();
    let pixmap = canvas.into_pixmap();
    assert_eq!(pixel(&pixmap, 10, 10), (10, 20, 30, 255));
  }

  #[test]
  fn test_empty_stops_paint_nothing() {
    let mut canvas = Canvas::new(20, 20, Rgba::WHITE).unwrap();
    let layer = simple_layer(Rect::from_xywh(0.0, 0.0, 20.0, 20.0), Repeat::NoRepeat);
    let gradient = LinearGradient {
      start: Point::ZERO,
      end: Point::new(20.0, 0.0),
      stops: Vec::new(),
    };
    draw_linear_gradient(&mut canvas, &layer, &gradient).unwrap();
    let pixmap = canvas.into_pixmap();
    assert_eq!(pixel(&pixmap, 10, 10), (255, 255, 255, 255));
  }

  #[test]
  fn test_linear_gradient_repeats_across_clip() {
    let mut canvas = Canvas::new(60, 20, Rgba::WHITE).unwrap();
    let layer = BackgroundLayer {
      border_box: Rect::from_xywh(0.0, 0.0, 60.0, 20.0),
      clip_box: Rect::from_xywh(0.0, 0.0, 60.0, 20.0),
      origin_box: Rect::from_xywh(0.0, 0.0, 20.0, 20.0),
      radii: CornerRadii::ZERO,
      repeat: Repeat::RepeatX,
    };
    let gradient = LinearGradient {
      start: Point::new(0.0, 0.0),
      end: Point::new(20.0, 0.0),
      stops: vec![
        ColorStop::new(0.0, Rgba::rgb(255, 0, 0)),
        ColorStop::new(1.0, Rgba::rgb(0, 0, 255)),
      ],
    };
    draw_linear_gradient(&mut canvas, &layer, &gradient).unwrap();
    let pixmap = canvas.into_pixmap();

    // Each 20px tile restarts at red.
    let (r0, _, _, _) = pixel(&pixmap, 1, 10);
    let (r1, _, _, _) = pixel(&pixmap, 41, 10);
    assert!(r0 > 200);
    assert!(r1 > 200);
  }

  #[test]
  fn test_radial_gradient_center_and_edge() {
    let mut canvas = Canvas::new(40, 40, Rgba::WHITE).unwrap();
    let layer = simple_layer(Rect::from_xywh(0.0, 0.0, 40.0, 40.0), Repeat::NoRepeat);
    let gradient = RadialGradient {
      center: Point::new(20.0, 20.0),
      radius_x: 15.0,
      radius_y: 15.0,
      stops: vec![
        ColorStop::new(0.0, Rgba::rgb(255, 0, 0)),
        ColorStop::new(1.0, Rgba::rgb(0, 0, 255)),
      ],
    };
    draw_radial_gradient(&mut canvas, &layer, &gradient).unwrap();
    let pixmap = canvas.into_pixmap();

    let (rc, _, bc, _) = pixel(&pixmap, 20, 20);
    assert!(rc > 200 && bc < 60);
    // Beyond the radius the pad spread holds the last stop.
    let (re, _, be, _) = pixel(&pixmap, 38, 20);
    assert!(be > 200 && re < 60);
  }

  #[test]
  fn test_elliptical_radial_gradient_axes() {
    let mut canvas = Canvas::new(60, 40, Rgba::WHITE).unwrap();
    let layer = simple_layer(Rect::from_xywh(0.0, 0.0, 60.0, 40.0), Repeat::NoRepeat);
    let gradient = RadialGradient {
      center: Point::new(30.0, 20.0),
      radius_x: 24.0,
      radius_y: 12.0,
      stops: vec![
        ColorStop::new(0.0, Rgba::rgb(255, 0, 0)),
        ColorStop::new(1.0, Rgba::rgb(0, 0, 255)),
      ],
    };
    draw_radial_gradient(&mut canvas, &layer, &gradient).unwrap();
    let pixmap = canvas.into_pixmap();

    // Points at the same gradient fraction along each axis match in hue.
    let (rx, _, _, _) = pixel(&pixmap, 42, 20);
    let (ry, _, _, _) = pixel(&pixmap, 30, 26);
    assert!((rx as i32 - ry as i32).abs() < 24);
  }

  #[test]
  fn test_conic_uniform_sweep_fills_circle() {
    let mut canvas = Canvas::new(40, 40, Rgba::WHITE).unwrap();
    let layer = simple_layer(Rect::from_xywh(0.0, 0.0, 40.0, 40.0), Repeat::NoRepeat);
    let gradient = ConicGradient {
      position: Point::new(20.0, 20.0),
      angle: 0.0,
      radius: 30.0,
      stops: vec![ColorStop::new(0.0, Rgba::rgb(0, 128, 0))],
    };
    draw_conic_gradient(&mut canvas, &layer, &gradient).unwrap();
    let pixmap = canvas.into_pixmap();

    let (_, g, _, _) = pixel(&pixmap, 20, 12);
    assert!(g > 100);
    let (_, g2, _, _) = pixel(&pixmap, 28, 20);
    assert!(g2 > 100);
  }

  #[test]
  fn test_conic_empty_stops_paint_nothing() {
    let mut canvas = Canvas::new(20, 20, Rgba::WHITE).unwrap();
    let layer = simple_layer(Rect::from_xywh(0.0, 0.0, 20.0, 20.0), Repeat::NoRepeat);
    let gradient = ConicGradient {
      position: Point::new(10.0, 10.0),
      angle: 0.0,
      radius: 15.0,
      stops: Vec::new(),
    };
    draw_conic_gradient(&mut canvas, &layer, &gradient).unwrap();
    let pixmap = canvas.into_pixmap();
    assert!(pixmap.data().chunks(4).all(|p| p == [255, 255, 255, 255]));
  }

  #[test]
  fn test_image_no_repeat_draws_once() {
    let mut tile = Pixmap::new(4, 4).unwrap();
    tile.fill(Rgba::rgb(255, 0, 0).to_skia());

    let mut canvas = Canvas::new(20, 20, Rgba::WHITE).unwrap();
    let layer = BackgroundLayer {
      border_box: Rect::from_xywh(0.0, 0.0, 20.0, 20.0),
      clip_box: Rect::from_xywh(0.0, 0.0, 20.0, 20.0),
      origin_box: Rect::from_xywh(3.0, 3.0, 4.0, 4.0),
      radii: CornerRadii::ZERO,
      repeat: Repeat::NoRepeat,
    };
    draw_image(&mut canvas, &layer, &tile).unwrap();
    let pixmap = canvas.into_pixmap();

    assert_eq!(pixel(&pixmap, 5, 5), (255, 0, 0, 255));
    assert_eq!(pixel(&pixmap, 12, 5), (255, 255, 255, 255));
    assert_eq!(pixel(&pixmap, 5, 12), (255, 255, 255, 255));
  }

  #[test]
  fn test_image_repeat_x_fills_strip_only() {
    let mut tile = Pixmap::new(4, 4).unwrap();
    tile.fill(Rgba::rgb(255, 0, 0).to_skia());

    let mut canvas = Canvas::new(20, 20, Rgba::WHITE).unwrap();
    let layer = BackgroundLayer {
      border_box: Rect::from_xywh(0.0, 0.0, 20.0, 20.0),
      clip_box: Rect::from_xywh(0.0, 0.0, 20.0, 20.0),
      origin_box: Rect::from_xywh(8.0, 8.0, 4.0, 4.0),
      radii: CornerRadii::ZERO,
      repeat: Repeat::RepeatX,
    };
    draw_image(&mut canvas, &layer, &tile).unwrap();
    let pixmap = canvas.into_pixmap();

    // The strip spans the full clip width at the origin row.
    assert_eq!(pixel(&pixmap, 1, 9), (255, 0, 0, 255));
    assert_eq!(pixel(&pixmap, 18, 9), (255, 0, 0, 255));
    // Rows outside the strip stay empty.
    assert_eq!(pixel(&pixmap, 10, 2), (255, 255, 255, 255));
    assert_eq!(pixel(&pixmap, 10, 17), (255, 255, 255, 255));
  }

  #[test]
  fn test_image_full_repeat_covers_clip() {
    let mut tile = Pixmap::new(3, 3).unwrap();
    tile.fill(Rgba::rgb(0, 0, 255).to_skia());

    let mut canvas = Canvas::new(20, 20, Rgba::WHITE).unwrap();
    let layer = BackgroundLayer {
      border_box: Rect::from_xywh(0.0, 0.0, 20.0, 20.0),
      clip_box: Rect::from_xywh(0.0, 0.0, 20.0, 20.0),
      origin_box: Rect::from_xywh(7.0, 7.0, 3.0, 3.0),
      radii: CornerRadii::ZERO,
      repeat: Repeat::Repeat,
    };
    draw_image(&mut canvas, &layer, &tile).unwrap();
    let pixmap = canvas.into_pixmap();

    assert_eq!(pixel(&pixmap, 1, 1), (0, 0, 255, 255));
    assert_eq!(pixel(&pixmap, 18, 18), (0, 0, 255, 255));
  }

  #[test]
  fn test_scale_pixmap_preserves_solid_color() {
    let mut source = Pixmap::new(4, 4).unwrap();
    source.fill(Rgba::rgb(30, 60, 90).to_skia());

    let scaled = scale_pixmap(&source, 8, 8).unwrap();
    assert_eq!(scaled.width(), 8);
    assert_eq!(scaled.height(), 8);
    assert_eq!(pixel(&scaled, 4, 4), (30, 60, 90, 255));
  }

  #[test]
  fn test_scale_pixmap_rejects_zero_target() {
    let mut source = Pixmap::new(4, 4).unwrap();
    source.fill(Rgba::BLACK.to_skia());
    assert!(scale_pixmap(&source, 0, 8).is_err());
  }
}
