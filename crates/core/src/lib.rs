//! Core rasterization module - pure, deterministic, and testable
//!
//! This crate turns points, lines, text and shaded mesh vertices into bytes in
//! a character framebuffer. It has **no I/O**: serialized frames are handed to
//! whatever sink the caller chooses.
//!
//! # Module Structure
//!
//! - [`surface`]: framebuffer, depth buffer and print buffer with a bounds policy
//! - [`raster`]: integer line scan conversion
//! - [`shader`]: vertex/fragment stages, attribute views and pipe data
//! - [`mesh`]: vertex/index buffers and the point mesh drawer
//! - [`text`]: direct byte-run blits
//! - [`error`]: recoverable construction errors
//!
//! # Bounds
//!
//! Every draw resolves cells through the surface's [`BoundsPolicy`]:
//!
//! - **Clip** (default): out-of-range writes are silently dropped
//! - **Strict**: out-of-range writes panic with a diagnostic
//!
//! Indexing past the end of a vertex buffer always panics. It is a caller bug,
//! not a clipping case.
//!
//! # Example
//!
//! ```
//! use tui_raster_core::{draw_line, draw_text, Surface};
//!
//! let mut surface = Surface::with_size(6, 2).unwrap();
//! draw_line(&mut surface, 0, 0, 5, 0);
//! draw_text(&mut surface, 1, 1, b"hi");
//! assert_eq!(surface.render(), b"000000\n hi   \n");
//! ```

pub mod error;
pub mod mesh;
pub mod raster;
pub mod shader;
pub mod surface;
pub mod text;

pub use tui_raster_types as types;

pub use error::{RasterError, Result};
pub use mesh::{draw_mesh, IndexBuffer, MeshMode, VertexBuffer};
pub use raster::{draw_line, draw_line_with};
pub use shader::{ClipPos, FnShader, PipeData, Shader, ShaderPipeline, VertexView};
pub use surface::Surface;
pub use text::{draw_text, draw_text_clipped};
pub use types::BoundsPolicy;
