//! Core types module - shared data structures and constants
//!
//! This module defines the plain data used throughout the rasterizer.
//! Nothing here touches a framebuffer or a terminal, so these types are
//! usable from the core pipeline, the terminal sink and the demo driver alike.
//!
//! # Vertex Attribute Layout
//!
//! A vertex is a caller-defined byte record. Its shape is described by an
//! ordered list of [`VertexAttrib`] entries; the only thing the pipeline
//! derives from it is the per-vertex stride:
//!
//! | Kind | Size (bytes) |
//! |------|--------------|
//! | `Byte` / `UByte` | 1 |
//! | `Short` / `UShort` | 2 |
//! | `Int` / `UInt` / `Float` | 4 |
//! | `Int64` / `UInt64` / `Double` | 8 |
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_CLEAR_COLOR` | `b' '` | Fill byte for fresh and cleared surfaces |
//! | `LINE_MARKER` | `b'0'` | Byte plotted by the scan converter |
//! | `DEPTH_FAR` | `1.0` | Initial value of every depth cell |
//! | `DEFAULT_FRAME_MS` | 33 | Demo driver frame interval |
//!
//! # Examples
//!
//! ```
//! use tui_raster_types::{AttribLayout, ComponentKind, VertexAttrib};
//!
//! // position (3 floats) + uv (2 floats) + a packed color (4 bytes)
//! let layout = AttribLayout::new(vec![
//!     VertexAttrib::new(3, ComponentKind::Float),
//!     VertexAttrib::new(2, ComponentKind::Float),
//!     VertexAttrib::new(4, ComponentKind::UByte),
//! ]);
//! assert_eq!(layout.stride(), 24);
//! assert_eq!(layout.offset_of(2), Some(20));
//! ```

use serde::{Deserialize, Serialize};

/// Fill byte used by new surfaces and by `clear` unless overridden.
pub const DEFAULT_CLEAR_COLOR: u8 = b' ';

/// Marker byte plotted by `draw_line`.
pub const LINE_MARKER: u8 = b'0';

/// Far-plane sentinel every depth cell starts at.
pub const DEPTH_FAR: f32 = 1.0;

/// Frame interval of the demo driver in milliseconds (~30 FPS).
pub const DEFAULT_FRAME_MS: u64 = 33;

/// Columns assumed when the terminal size cannot be queried.
pub const FALLBACK_COLS: u16 = 80;

/// Rows assumed when the terminal size cannot be queried.
pub const FALLBACK_ROWS: u16 = 24;

/// Scalar type of one vertex attribute component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Int64,
    UInt64,
    Float,
    Double,
}

impl ComponentKind {
    /// Size of one component in bytes.
    pub const fn size(self) -> usize {
        match self {
            ComponentKind::Byte | ComponentKind::UByte => 1,
            ComponentKind::Short | ComponentKind::UShort => 2,
            ComponentKind::Int | ComponentKind::UInt | ComponentKind::Float => 4,
            ComponentKind::Int64 | ComponentKind::UInt64 | ComponentKind::Double => 8,
        }
    }
}

/// One attribute of a vertex record: `count` components of `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexAttrib {
    pub count: u8,
    pub kind: ComponentKind,
}

impl VertexAttrib {
    pub const fn new(count: u8, kind: ComponentKind) -> Self {
        Self { count, kind }
    }

    /// Size of the whole attribute in bytes.
    pub const fn size(self) -> usize {
        self.count as usize * self.kind.size()
    }
}

/// Ordered description of a vertex record.
///
/// The layout is metadata only: the pipeline uses it to compute the stride
/// between consecutive vertices and hands each vertex program its raw span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttribLayout {
    attribs: Vec<VertexAttrib>,
}

impl AttribLayout {
    pub fn new(attribs: Vec<VertexAttrib>) -> Self {
        Self { attribs }
    }

    /// Append an attribute (builder style).
    pub fn with(mut self, count: u8, kind: ComponentKind) -> Self {
        self.attribs.push(VertexAttrib::new(count, kind));
        self
    }

    /// Byte stride between consecutive vertices.
    pub fn stride(&self) -> usize {
        self.attribs.iter().map(|a| a.size()).sum()
    }

    /// Byte offset of attribute `index` within a vertex record.
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        if index >= self.attribs.len() {
            return None;
        }
        Some(self.attribs[..index].iter().map(|a| a.size()).sum())
    }

    pub fn get(&self, index: usize) -> Option<VertexAttrib> {
        self.attribs.get(index).copied()
    }

    pub fn attribs(&self) -> &[VertexAttrib] {
        &self.attribs
    }

    pub fn len(&self) -> usize {
        self.attribs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attribs.is_empty()
    }
}

/// What a surface does with a write outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Drop the write silently.
    #[default]
    Clip,
    /// Treat the write as a programmer error and panic.
    Strict,
}

/// Construction-time options for a surface.
///
/// Missing fields fall back to their defaults when deserialized, so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceOptions {
    pub clear_color: u8,
    pub bounds: BoundsPolicy,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            clear_color: DEFAULT_CLEAR_COLOR,
            bounds: BoundsPolicy::Clip,
        }
    }
}

impl SurfaceOptions {
    pub fn strict() -> Self {
        Self {
            bounds: BoundsPolicy::Strict,
            ..Self::default()
        }
    }

    pub fn with_clear_color(mut self, clear_color: u8) -> Self {
        self.clear_color = clear_color;
        self
    }
}
