//! Text blitter: copies byte runs straight into the framebuffer.
//!
//! Text bypasses the shader pipeline. [`draw_text`] copies linearly, so a run
//! longer than the rest of its row continues on the next row;
//! [`draw_text_clipped`] stops at the right edge instead.

use crate::surface::Surface;

/// Copy `text` into the framebuffer starting at (x, y).
///
/// The copy is linear in framebuffer order and is truncated at the end of the
/// framebuffer. Returns the number of bytes written.
///
/// # Panics
///
/// With `BoundsPolicy::Strict`, when (x, y) lies outside the surface.
pub fn draw_text(surface: &mut Surface, x: i32, y: i32, text: &[u8]) -> usize {
    let Some(offset) = surface.resolve(x, y) else {
        return 0;
    };
    let n = text.len().min(surface.capacity() - offset);
    surface.framebuffer_mut()[offset..offset + n].copy_from_slice(&text[..n]);
    n
}

/// Copy `text` into row `y` starting at column `x`, stopping at the row's end.
///
/// Same start-cell bounds handling as [`draw_text`].
pub fn draw_text_clipped(surface: &mut Surface, x: i32, y: i32, text: &[u8]) -> usize {
    let Some(offset) = surface.resolve(x, y) else {
        return 0;
    };
    let room = surface.width() as usize - x as usize;
    let n = text.len().min(room);
    surface.framebuffer_mut()[offset..offset + n].copy_from_slice(&text[..n]);
    n
}
