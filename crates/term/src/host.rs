//! SurfaceHost: keeps one surface sized to the terminal.
//!
//! The driver polls the terminal size once per frame and calls
//! [`SurfaceHost::sync`]. When the size changed, the old surface is dropped and
//! a fresh one is allocated with the same options.

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::core::Surface;
use crate::types::{SurfaceOptions, FALLBACK_COLS, FALLBACK_ROWS};

/// Current terminal size as `(columns, rows)`.
///
/// Falls back to 80x24 when the size cannot be queried (e.g. output is not a tty).
pub fn terminal_size() -> (u16, u16) {
    match crossterm::terminal::size() {
        Ok(size) => size,
        Err(e) => {
            warn!(
                "terminal size unavailable ({}), using {}x{}",
                e, FALLBACK_COLS, FALLBACK_ROWS
            );
            (FALLBACK_COLS, FALLBACK_ROWS)
        }
    }
}

#[derive(Debug)]
pub struct SurfaceHost {
    options: SurfaceOptions,
    surface: Surface,
}

impl SurfaceHost {
    pub fn new(cols: u16, rows: u16, options: SurfaceOptions) -> Result<Self> {
        let surface = Surface::new(cols, rows, options)
            .with_context(|| format!("failed to create {}x{} surface", cols, rows))?;
        Ok(Self { options, surface })
    }

    /// Recreate the surface if `(cols, rows)` differs from its size.
    ///
    /// Returns `true` when a new surface was built.
    pub fn sync(&mut self, cols: u16, rows: u16) -> Result<bool> {
        if self.surface.width() == cols && self.surface.height() == rows {
            return Ok(false);
        }
        debug!(
            "terminal resized {}x{} -> {}x{}",
            self.surface.width(),
            self.surface.height(),
            cols,
            rows
        );
        let mut surface = Surface::new(cols, rows, self.options)
            .with_context(|| format!("failed to recreate {}x{} surface", cols, rows))?;
        // Keep a clear color changed at runtime.
        surface.set_clear_color(self.surface.clear_color());
        surface.clear();
        self.surface = surface;
        Ok(true)
    }

    pub fn options(&self) -> SurfaceOptions {
        self.options
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn size(&self) -> (u16, u16) {
        (self.surface.width(), self.surface.height())
    }
}
