//! Scan converter: integer line rasterization with error accumulation.
//!
//! Exactly one cell is plotted per unit step along the dominant axis. There is
//! no antialiasing and no partial coverage.

use crate::surface::Surface;
use crate::types::{BoundsPolicy, LINE_MARKER};

/// Draw a line between two surface-space points with [`LINE_MARKER`].
pub fn draw_line(surface: &mut Surface, x0: i32, y0: i32, x1: i32, y1: i32) {
    draw_line_with(surface, x0, y0, x1, y1, LINE_MARKER);
}

/// Draw a line between two surface-space points with `color`.
///
/// In clip mode a line whose endpoints both lie outside the surface is skipped
/// outright; otherwise each plotted cell goes through [`Surface::set_pixel`].
///
/// # Panics
///
/// With [`BoundsPolicy::Strict`], when either endpoint lies outside the surface.
pub fn draw_line_with(surface: &mut Surface, x0: i32, y0: i32, x1: i32, y1: i32, color: u8) {
    match surface.bounds() {
        BoundsPolicy::Strict => {
            // Resolving checks and panics before anything is plotted.
            surface.resolve(x0, y0);
            surface.resolve(x1, y1);
        }
        BoundsPolicy::Clip => {
            if !surface.contains(x0, y0) && !surface.contains(x1, y1) {
                return;
            }
        }
    }

    // Endpoint differences can exceed `i32` when one end is far off-surface.
    let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let steep = (x0 - x1).abs() < (y0 - y1).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    if dx == 0 {
        // Both endpoints coincide.
        plot(surface, steep, x0, y0, color);
        return;
    }

    let derror = (dy as f32 / dx as f32).abs();
    let ystep = if y1 > y0 { 1 } else { -1 };
    let mut error = 0.0f32;
    let mut x = x0;
    let mut y = y0;

    // Steps before index 0 of the walked axis plot nothing; advance the error
    // term over them in one go.
    if x < 0 {
        let skipped = (-x).min(dx);
        let total = skipped as f64 * (dy as f64 / dx as f64).abs();
        let crossings = (total - 0.5).ceil().max(0.0);
        y += ystep * crossings as i64;
        error = (total - crossings) as f32;
        x += skipped;
    }

    let extent = if steep { surface.height() } else { surface.width() };
    let last = x1.min(extent as i64 - 1);
    while x <= last {
        plot(surface, steep, x, y, color);
        error += derror;
        if error > 0.5 {
            y += ystep;
            error -= 1.0;
        }
        x += 1;
    }
}

/// Plot a walked cell, undoing the steep swap. Both coordinates stay between
/// the original `i32` endpoints.
fn plot(surface: &mut Surface, steep: bool, x: i64, y: i64, color: u8) {
    let (px, py) = if steep { (y, x) } else { (x, y) };
    surface.set_pixel(px as i32, py as i32, color);
}
