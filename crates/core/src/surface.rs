//! Surface: the character framebuffer every draw call writes into.
//!
//! A surface owns three buffers sized at construction:
//!
//! - **framebuffer**: one color byte per cell, row-major (`y * width + x`)
//! - **depth**: one `f32` per cell, initialized to [`DEPTH_FAR`]
//! - **print buffer**: `width * height + height + 1` bytes, the serialized frame
//!
//! Surfaces are never resized in place. When the terminal changes size, build
//! a new one.

use log::{debug, trace};

use crate::error::{try_filled, Result};
use crate::types::{BoundsPolicy, SurfaceOptions, DEPTH_FAR};

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u16,
    height: u16,
    clear_color: u8,
    bounds: BoundsPolicy,
    framebuffer: Vec<u8>,
    depth: Vec<f32>,
    print: Vec<u8>,
}

impl Surface {
    /// Allocate a surface filled with `options.clear_color`.
    pub fn new(width: u16, height: u16, options: SurfaceOptions) -> Result<Self> {
        let w = width as usize;
        let h = height as usize;
        let cells = w * h;

        let framebuffer = try_filled("framebuffer", cells, options.clear_color)?;
        let depth = try_filled("depth buffer", cells, DEPTH_FAR)?;
        let print = try_filled("print buffer", cells + h + 1, 0u8)?;

        debug!(
            "surface created: {}x{} bounds={:?} clear={:?}",
            width, height, options.bounds, options.clear_color as char
        );

        Ok(Self {
            width,
            height,
            clear_color: options.clear_color,
            bounds: options.bounds,
            framebuffer,
            depth,
            print,
        })
    }

    /// Allocate a surface with default options (space clear color, clipping).
    pub fn with_size(width: u16, height: u16) -> Result<Self> {
        Self::new(width, height, SurfaceOptions::default())
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bounds(&self) -> BoundsPolicy {
        self.bounds
    }

    pub fn clear_color(&self) -> u8 {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: u8) {
        self.clear_color = color;
    }

    /// Number of cells (`width * height`).
    pub fn capacity(&self) -> usize {
        self.framebuffer.len()
    }

    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    /// Depth values. Allocated and initialized only; no draw call reads or writes them.
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    #[inline(always)]
    pub(crate) fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Resolve (x, y) to a framebuffer index under this surface's bounds policy.
    ///
    /// Returns `None` for a clipped write and panics for a strict one.
    pub(crate) fn resolve(&self, x: i32, y: i32) -> Option<usize> {
        match self.idx(x, y) {
            Some(i) => Some(i),
            None => {
                if self.bounds == BoundsPolicy::Strict {
                    panic!(
                        "draw out of bounds ({}, {}) on {}x{} surface",
                        x, y, self.width, self.height
                    );
                }
                trace!("clipped write at ({}, {})", x, y);
                None
            }
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.idx(x, y).map(|i| self.framebuffer[i])
    }

    /// Write one cell.
    ///
    /// # Panics
    ///
    /// With [`BoundsPolicy::Strict`], when (x, y) lies outside the surface.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if let Some(i) = self.resolve(x, y) {
            self.framebuffer[i] = color;
        }
    }

    /// Fill the framebuffer with the clear color. The depth buffer is left alone.
    pub fn clear(&mut self) {
        self.framebuffer.fill(self.clear_color);
    }

    /// Serialize the framebuffer row by row, one `\n` after each row.
    ///
    /// The returned slice excludes the trailing `\0` the print buffer also
    /// carries; see [`Surface::render_with_terminator`].
    pub fn render(&mut self) -> &[u8] {
        let len = self.serialize();
        &self.print[..len]
    }

    /// Like [`Surface::render`], but includes the trailing `\0`.
    pub fn render_with_terminator(&mut self) -> &[u8] {
        let len = self.serialize();
        &self.print[..=len]
    }

    fn serialize(&mut self) -> usize {
        let w = self.width as usize;
        let mut i = 0;
        if w == 0 {
            for _ in 0..self.height {
                self.print[i] = b'\n';
                i += 1;
            }
        } else {
            for row in self.framebuffer.chunks_exact(w) {
                self.print[i..i + w].copy_from_slice(row);
                i += w;
                self.print[i] = b'\n';
                i += 1;
            }
        }
        self.print[i] = 0;
        i
    }

    pub(crate) fn framebuffer_mut(&mut self) -> &mut [u8] {
        &mut self.framebuffer
    }
}
