//! Mesh drawer: shades indexed vertices and plots each one as a single cell.
//!
//! Only point rasterization is implemented. [`MeshMode::Wireframe`] is accepted
//! so callers can state intent, but it currently draws the same isolated
//! vertex points as [`MeshMode::Points`].

use crate::error::{RasterError, Result};
use crate::shader::{Shader, ShaderPipeline};
use crate::surface::Surface;

/// How a mesh should be rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshMode {
    #[default]
    Points,
    /// Edges between vertices. Not rasterized yet: behaves like `Points`.
    Wireframe,
}

/// Borrowed raw vertex records of a fixed stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBuffer<'a> {
    data: &'a [u8],
    count: usize,
    stride: usize,
}

impl<'a> VertexBuffer<'a> {
    /// Wrap `count` vertices of `stride` bytes. Extra trailing bytes are ignored.
    pub fn new(data: &'a [u8], count: usize, stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(RasterError::ZeroStride);
        }
        let needed = count
            .checked_mul(stride)
            .ok_or(RasterError::VertexBufferTooShort {
                needed: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() < needed {
            return Err(RasterError::VertexBufferTooShort {
                needed,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            count,
            stride,
        })
    }

    /// Wrap a tightly packed buffer, inferring the vertex count.
    pub fn from_bytes(data: &'a [u8], stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(RasterError::ZeroStride);
        }
        if data.len() % stride != 0 {
            return Err(RasterError::UnalignedVertexData {
                len: data.len(),
                stride,
            });
        }
        Self::new(data, data.len() / stride, stride)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw bytes of vertex `index`.
    pub fn vertex(&self, index: usize) -> Option<&'a [u8]> {
        if index >= self.count {
            return None;
        }
        let start = index * self.stride;
        self.data.get(start..start + self.stride)
    }
}

/// Borrowed vertex indices, drawn in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBuffer<'a> {
    indices: &'a [u32],
}

impl<'a> IndexBuffer<'a> {
    pub fn new(indices: &'a [u32]) -> Self {
        Self { indices }
    }

    pub fn count(&self) -> usize {
        self.indices.len()
    }

    pub fn indices(&self) -> &'a [u32] {
        self.indices
    }
}

/// Shade every indexed vertex and plot its fragment color.
///
/// Positions are truncated toward zero to integer cells and written through
/// [`Surface::set_pixel`], so the surface's bounds policy applies. A non-finite
/// position counts as out of range. Returns the number of vertices shaded.
///
/// # Panics
///
/// - If `vertices` and `pipeline` disagree on stride.
/// - If any index is `>= vertices.count()`.
/// - With [`BoundsPolicy::Strict`](crate::types::BoundsPolicy::Strict), when a
///   shaded position is outside the surface or not finite.
pub fn draw_mesh<S: Shader>(
    surface: &mut Surface,
    pipeline: &mut ShaderPipeline<S>,
    indices: &IndexBuffer<'_>,
    vertices: &VertexBuffer<'_>,
    mode: MeshMode,
) -> usize {
    assert_eq!(
        vertices.stride(),
        pipeline.stride(),
        "vertex buffer stride does not match pipeline layout"
    );
    match mode {
        // Edges are not rasterized; both modes plot vertex points.
        MeshMode::Points | MeshMode::Wireframe => {}
    }

    for &index in indices.indices() {
        let i = index as usize;
        let Some(raw) = vertices.vertex(i) else {
            panic!(
                "vertex index {} out of bounds for vertex buffer of {} vertices",
                index,
                vertices.count()
            );
        };
        let (pos, color) = pipeline.invoke(raw);
        surface.set_pixel(to_cell(pos.x), to_cell(pos.y), color);
    }
    indices.count()
}

/// Truncate a position component to a cell coordinate.
///
/// NaN and infinities map to a coordinate no surface contains, so the bounds
/// policy rejects them instead of the cast landing them on cell 0.
fn to_cell(v: f32) -> i32 {
    if v.is_finite() {
        v as i32
    } else {
        i32::MIN
    }
}
