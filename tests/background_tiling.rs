use boxpaint::paint::{
  draw_borders, draw_conic_gradient, draw_image, draw_linear_gradient, draw_radial_gradient,
  draw_solid_fill, scale_pixmap, BackgroundLayer, BorderSide, BorderStyle, Borders, Canvas,
  ColorStop, ConicGradient, DecorationLine, DecorationPainter, DecorationRequest, DecorationStyle,
  LinearGradient, RadialGradient, Repeat,
};
use boxpaint::{CornerRadii, Point, Rect, Rgba};
use tiny_skia::Pixmap;

fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
  let idx = ((y * pixmap.width() + x) * 4) as usize;
  let data = pixmap.data();
  (data[idx], data[idx + 1], data[idx + 2], data[idx + 3])
}

fn is_white(pixmap: &Pixmap, x: u32, y: u32) -> bool {
  pixel(pixmap, x, y) == (255, 255, 255, 255)
}

fn solid_tile(width: u32, height: u32, color: Rgba) -> Pixmap {
  let mut pixmap = Pixmap::new(width, height).expect("tile");
  pixmap.fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
  pixmap
}

fn layer(clip: Rect, origin: Rect, repeat: Repeat) -> BackgroundLayer {
  BackgroundLayer {
    border_box: clip,
    clip_box: clip,
    origin_box: origin,
    radii: CornerRadii::ZERO,
    repeat,
  }
}

#[test]
fn layers_compose_background_then_border() {
  let mut canvas = Canvas::new(60, 60, Rgba::WHITE).expect("canvas");
  let border_box = Rect::from_xywh(5.0, 5.0, 50.0, 50.0);
  let bg = BackgroundLayer {
    border_box,
    clip_box: border_box,
    origin_box: border_box,
    radii: CornerRadii::uniform(10.0),
    repeat: Repeat::NoRepeat,
  };
  draw_solid_fill(&mut canvas, &bg, Rgba::rgb(220, 230, 240)).expect("fill");
  let borders = Borders::uniform(
    BorderSide::new(4.0, BorderStyle::Solid, Rgba::rgb(40, 40, 40)),
    CornerRadii::uniform(10.0),
  );
  draw_borders(&mut canvas, &borders, border_box).expect("borders");
  let pixmap = canvas.into_pixmap();

  assert_eq!(pixel(&pixmap, 30, 30), (220, 230, 240, 255));
  assert_eq!(pixel(&pixmap, 6, 30), (40, 40, 40, 255));
  // The rounded corner clips both fill and border.
  assert!(is_white(&pixmap, 6, 6));
}

#[test]
fn repeating_layer_tiles_left_of_origin() {
  let mut canvas = Canvas::new(60, 20, Rgba::WHITE).expect("canvas");
  let clip = Rect::from_xywh(0.0, 0.0, 60.0, 20.0);
  let origin = Rect::from_xywh(25.0, 0.0, 10.0, 20.0);
  let gradient = LinearGradient {
    start: Point::new(25.0, 0.0),
    end: Point::new(35.0, 0.0),
    stops: vec![
      ColorStop::new(0.0, Rgba::rgb(255, 0, 0)),
      ColorStop::new(1.0, Rgba::rgb(0, 0, 255)),
    ],
  };
  draw_linear_gradient(&mut canvas, &layer(clip, origin, Repeat::RepeatX), &gradient)
    .expect("gradient");
  let pixmap = canvas.into_pixmap();

  // Tiles bracket the clip box on both sides of the origin tile.
  let (r_left, _, _, _) = pixel(&pixmap, 6, 10);
  let (r_origin, _, _, _) = pixel(&pixmap, 26, 10);
  let (r_right, _, _, _) = pixel(&pixmap, 46, 10);
  assert!(r_left > 200, "left tile restarts at the first stop");
  assert!(r_origin > 200);
  assert!(r_right > 200, "right tile restarts at the first stop");
}

#[test]
fn no_repeat_layer_stays_inside_origin_box() {
  let mut canvas = Canvas::new(60, 20, Rgba::WHITE).expect("canvas");
  let clip = Rect::from_xywh(0.0, 0.0, 60.0, 20.0);
  let origin = Rect::from_xywh(25.0, 0.0, 10.0, 20.0);
  let gradient = LinearGradient {
    start: Point::new(25.0, 0.0),
    end: Point::new(35.0, 0.0),
    stops: vec![
      ColorStop::new(0.0, Rgba::rgb(255, 0, 0)),
      ColorStop::new(1.0, Rgba::rgb(0, 0, 255)),
    ],
  };
  draw_linear_gradient(&mut canvas, &layer(clip, origin, Repeat::NoRepeat), &gradient)
    .expect("gradient");
  let pixmap = canvas.into_pixmap();

  assert!(is_white(&pixmap, 6, 10));
  assert!(is_white(&pixmap, 46, 10));
  assert!(!is_white(&pixmap, 30, 10));
}

#[test]
fn radial_gradient_fades_from_center() {
  let mut canvas = Canvas::new(50, 50, Rgba::WHITE).expect("canvas");
  let clip = Rect::from_xywh(0.0, 0.0, 50.0, 50.0);
  let gradient = RadialGradient {
    center: Point::new(25.0, 25.0),
    radius_x: 20.0,
    radius_y: 20.0,
    stops: vec![
      ColorStop::new(0.0, Rgba::rgb(255, 255, 0)),
      ColorStop::new(1.0, Rgba::rgb(0, 0, 0)),
    ],
  };
  draw_radial_gradient(&mut canvas, &layer(clip, clip, Repeat::NoRepeat), &gradient)
    .expect("gradient");
  let pixmap = canvas.into_pixmap();

  let (rc, gc, _, _) = pixel(&pixmap, 25, 25);
  assert!(rc > 200 && gc > 200, "center holds the first stop");
  let (re, ge, _, _) = pixel(&pixmap, 47, 25);
  assert!(re < 60 && ge < 60, "past the radius the last stop pads");
}

#[test]
fn conic_gradient_sweeps_clockwise_from_top() {
  let mut canvas = Canvas::new(40, 40, Rgba::WHITE).expect("canvas");
  let clip = Rect::from_xywh(0.0, 0.0, 40.0, 40.0);
  let gradient = ConicGradient {
    position: Point::new(20.0, 20.0),
    angle: 0.0,
    radius: 30.0,
    stops: vec![
      ColorStop::new(0.0, Rgba::rgb(255, 0, 0)),
      ColorStop::new(1.0, Rgba::rgb(0, 0, 255)),
    ],
  };
  draw_conic_gradient(&mut canvas, &layer(clip, clip, Repeat::NoRepeat), &gradient)
    .expect("gradient");
  let pixmap = canvas.into_pixmap();

  // Just clockwise of the top: early sweep, red dominates. Just
  // counter-clockwise: end of sweep, blue dominates.
  let (r_early, _, b_early, _) = pixel(&pixmap, 26, 10);
  let (r_late, _, b_late, _) = pixel(&pixmap, 14, 10);
  assert!(r_early > b_early, "early sweep must lean red");
  assert!(b_late > r_late, "late sweep must lean blue");
}

#[test]
fn image_layer_tiles_and_clips() {
  let tile = solid_tile(6, 6, Rgba::rgb(0, 160, 0));
  let mut canvas = Canvas::new(40, 40, Rgba::WHITE).expect("canvas");
  let clip = Rect::from_xywh(4.0, 4.0, 32.0, 32.0);
  let origin = Rect::from_xywh(10.0, 10.0, 6.0, 6.0);
  draw_image(&mut canvas, &layer(clip, origin, Repeat::Repeat), &tile).expect("image");
  let pixmap = canvas.into_pixmap();

  assert_eq!(pixel(&pixmap, 6, 6), (0, 160, 0, 255));
  assert_eq!(pixel(&pixmap, 33, 33), (0, 160, 0, 255));
  assert!(is_white(&pixmap, 2, 20), "clip box bounds the tiling");
}

#[test]
fn scaled_image_keeps_color_and_dimensions() {
  let source = solid_tile(5, 5, Rgba::rgb(120, 40, 200));
  let scaled = scale_pixmap(&source, 15, 10).expect("scale");
  assert_eq!(scaled.width(), 15);
  assert_eq!(scaled.height(), 10);
  assert_eq!(pixel(&scaled, 7, 5), (120, 40, 200, 255));
}

#[test]
fn decorations_render_over_background() {
  let mut canvas = Canvas::new(60, 30, Rgba::WHITE).expect("canvas");
  let clip = Rect::from_xywh(0.0, 0.0, 60.0, 30.0);
  draw_solid_fill(
    &mut canvas,
    &layer(clip, clip, Repeat::NoRepeat),
    Rgba::rgb(255, 255, 200),
  )
  .expect("fill");

  let mut painter = DecorationPainter::new();
  painter
    .draw(
      &mut canvas,
      &DecorationRequest {
        line: DecorationLine::Underline,
        style: DecorationStyle::Solid,
        color: Rgba::rgb(200, 0, 0),
        x: 10.0,
        width: 40.0,
        y: 20.0,
        thickness: 2.0,
      },
    )
    .expect("decoration");
  let pixmap = canvas.into_pixmap();

  assert_eq!(pixel(&pixmap, 30, 20), (200, 0, 0, 255));
  assert_eq!(pixel(&pixmap, 30, 10), (255, 255, 200, 255));
  assert_eq!(pixel(&pixmap, 5, 20), (255, 255, 200, 255));
}
