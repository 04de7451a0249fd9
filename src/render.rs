// Base icon composition: disc, waveform and shadowed label on one square
// canvas. Every export size is resampled from this single image.

use image::RgbaImage;
use resvg::tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::debug;

use crate::config::RenderConfig;
use crate::constants::{circle, text, waveform as wave};
use crate::error::IconError;
use crate::font::{GlyphFont, GlyphRun};
use crate::waveform::{segments, waveform_points};

/// The composed base image, straight (non-premultiplied) RGBA.
pub type Canvas = RgbaImage;

/// Render the base icon, loading the preferred font from the config.
pub fn render_base_icon(config: &RenderConfig) -> Result<Canvas, IconError> {
    let font = GlyphFont::load_or_builtin(&config.font_path, config.font_size);
    render_with_font(config, &font)
}

/// Render the base icon with an already loaded font.
pub fn render_with_font(config: &RenderConfig, font: &GlyphFont) -> Result<Canvas, IconError> {
    let edge = config.canvas_size;
    let mut pixmap = Pixmap::new(edge, edge)
        .ok_or_else(|| IconError::canvas(format!("cannot allocate {}x{} canvas", edge, edge)))?;

    let center = (edge / 2) as i32;
    let radius = (edge / 3) as i32;

    draw_disc(&mut pixmap, center as f32, radius as f32)?;
    draw_waveform(&mut pixmap, center, radius);

    if font.is_builtin() {
        debug!("Drawing label '{}' with the built-in font", config.text);
    }
    let run = font.shape(&config.text);
    match run.bounds() {
        Some(bounds) => {
            let (dx, dy) = label_offset(bounds, center);
            let shadow = text::SHADOW_OFFSET;
            draw_run(&mut pixmap, &run, dx + shadow, dy + shadow, text::SHADOW_COLOR);
            draw_run(&mut pixmap, &run, dx, dy, text::COLOR);
        }
        None => debug!("Label '{}' has no ink, skipping text", config.text),
    }

    into_rgba_image(pixmap)
}

fn paint(color: [u8; 4]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
    paint.anti_alias = true;
    paint
}

fn draw_disc(pixmap: &mut Pixmap, center: f32, radius: f32) -> Result<(), IconError> {
    let disc = PathBuilder::from_circle(center, center, radius)
        .ok_or_else(|| IconError::canvas("canvas too small for the disc"))?;
    pixmap.fill_path(&disc, &paint(circle::FILL), FillRule::Winding, Transform::identity(), None);

    // Outline sits inside the disc edge
    let inset = radius - circle::OUTLINE_WIDTH / 2.0;
    if let Some(ring) = PathBuilder::from_circle(center, center, inset) {
        let stroke = Stroke {
            width: circle::OUTLINE_WIDTH,
            ..Default::default()
        };
        pixmap.stroke_path(&ring, &paint(circle::OUTLINE), &stroke, Transform::identity(), None);
    }

    Ok(())
}

fn draw_waveform(pixmap: &mut Pixmap, center: i32, radius: i32) {
    let points = waveform_points(center, radius);
    let stroke = Stroke {
        width: wave::STROKE_WIDTH,
        ..Default::default()
    };
    let color = paint(wave::COLOR);

    for ((x0, y0), (x1, y1)) in segments(&points) {
        let mut pb = PathBuilder::new();
        pb.move_to(x0 as f32, y0 as f32);
        pb.line_to(x1 as f32, y1 as f32);
        if let Some(line) = pb.finish() {
            pixmap.stroke_path(&line, &color, &stroke, Transform::identity(), None);
        }
    }
}

/// Translation that centers the run's ink on the canvas, nudged down by the
/// fixed vertical bias. Works in whole pixels.
pub fn label_offset(bounds: Rect, center: i32) -> (f32, f32) {
    let width = bounds.width().round() as i32;
    let height = bounds.height().round() as i32;

    let left = center - width / 2;
    let top = center - height / 2 + text::VERTICAL_BIAS;

    (left as f32 - bounds.left(), top as f32 - bounds.top())
}

fn draw_run(pixmap: &mut Pixmap, run: &GlyphRun, dx: f32, dy: f32, color: [u8; 4]) {
    let paint = paint(color);
    let transform = Transform::from_translate(dx, dy);
    for path in run.paths() {
        pixmap.fill_path(path, &paint, FillRule::Winding, transform, None);
    }
}

fn into_rgba_image(pixmap: Pixmap) -> Result<Canvas, IconError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| IconError::canvas("pixel buffer does not match canvas size"))
}
