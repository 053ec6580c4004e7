//! Shader pipeline: a vertex stage and a fragment stage joined by a scratch buffer.
//!
//! The pipeline never interprets vertex bytes itself. The vertex stage gets a
//! [`VertexView`] over one raw vertex record and returns a surface-space
//! position; anything it wants the fragment stage to see goes into [`PipeData`].
//! The fragment stage then resolves a single color byte from that scratch data.
//!
//! A pipeline is an ordinary value. Several may coexist, and dropping one
//! releases its scratch buffer.

use log::debug;

use crate::error::{try_filled, Result};
use crate::types::{AttribLayout, ComponentKind};

/// Position produced by a vertex stage, in surface (cell) units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ClipPos {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Bounds-checked view of one vertex record.
#[derive(Debug, Clone, Copy)]
pub struct VertexView<'a> {
    bytes: &'a [u8],
    layout: &'a AttribLayout,
}

impl<'a> VertexView<'a> {
    pub fn new(bytes: &'a [u8], layout: &'a AttribLayout) -> Self {
        Self { bytes, layout }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn layout(&self) -> &'a AttribLayout {
        self.layout
    }

    /// Raw bytes of attribute `index`.
    pub fn attrib(&self, index: usize) -> Option<&'a [u8]> {
        let offset = self.layout.offset_of(index)?;
        let size = self.layout.get(index)?.size();
        self.bytes.get(offset..offset + size)
    }

    /// Native-endian `f32` at a byte offset.
    pub fn f32_at(&self, offset: usize) -> Option<f32> {
        let raw = self.bytes.get(offset..offset.checked_add(4)?)?;
        Some(f32::from_ne_bytes(raw.try_into().ok()?))
    }

    /// First `N` components of a `Float` attribute.
    pub fn attrib_f32<const N: usize>(&self, index: usize) -> Option<[f32; N]> {
        let attrib = self.layout.get(index)?;
        if attrib.kind != ComponentKind::Float || (attrib.count as usize) < N {
            return None;
        }
        let base = self.layout.offset_of(index)?;
        let mut out = [0.0; N];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.f32_at(base + i * 4)?;
        }
        Some(out)
    }
}

/// Scratch bytes carrying one value from the vertex stage to the fragment stage.
///
/// Overwritten by every vertex invocation. Nothing persists between vertices
/// unless the vertex stage chooses not to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeData {
    bytes: Vec<u8>,
}

impl PipeData {
    fn new(len: usize) -> Result<Self> {
        Ok(Self {
            bytes: try_filled("pipe data", len, 0u8)?,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Store `value` at `offset`. Returns `false` if it does not fit.
    pub fn write_f32(&mut self, offset: usize, value: f32) -> bool {
        let Some(end) = offset.checked_add(4) else {
            return false;
        };
        match self.bytes.get_mut(offset..end) {
            Some(slot) => {
                slot.copy_from_slice(&value.to_ne_bytes());
                true
            }
            None => false,
        }
    }

    pub fn read_f32(&self, offset: usize) -> Option<f32> {
        let raw = self.bytes.get(offset..offset.checked_add(4)?)?;
        Some(f32::from_ne_bytes(raw.try_into().ok()?))
    }

    /// Store a single byte at `offset`. Returns `false` if out of range.
    pub fn write_u8(&mut self, offset: usize, value: u8) -> bool {
        match self.bytes.get_mut(offset) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn read_u8(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }
}

/// The two programmable stages of a pipeline.
pub trait Shader {
    /// Transform one vertex into surface space. May write into `pipe`.
    fn vertex(&self, vertex: VertexView<'_>, pipe: &mut PipeData) -> ClipPos;

    /// Resolve the color byte for the vertex just transformed.
    fn fragment(&self, pipe: &PipeData) -> u8;
}

/// [`Shader`] built from two closures.
pub struct FnShader<V, F> {
    vertex: V,
    fragment: F,
}

impl<V, F> FnShader<V, F>
where
    V: Fn(VertexView<'_>, &mut PipeData) -> ClipPos,
    F: Fn(&PipeData) -> u8,
{
    pub fn new(vertex: V, fragment: F) -> Self {
        Self { vertex, fragment }
    }
}

impl<V, F> Shader for FnShader<V, F>
where
    V: Fn(VertexView<'_>, &mut PipeData) -> ClipPos,
    F: Fn(&PipeData) -> u8,
{
    fn vertex(&self, vertex: VertexView<'_>, pipe: &mut PipeData) -> ClipPos {
        (self.vertex)(vertex, pipe)
    }

    fn fragment(&self, pipe: &PipeData) -> u8 {
        (self.fragment)(pipe)
    }
}

impl<V, F> std::fmt::Debug for FnShader<V, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnShader").finish_non_exhaustive()
    }
}

/// An installed shader plus its attribute layout and scratch buffer.
#[derive(Debug)]
pub struct ShaderPipeline<S> {
    shader: S,
    layout: AttribLayout,
    stride: usize,
    pipe: PipeData,
}

impl<S: Shader> ShaderPipeline<S> {
    /// Build a pipeline; the stride comes from `layout` and the scratch buffer
    /// is `pipe_data_size` zeroed bytes.
    pub fn new(shader: S, layout: AttribLayout, pipe_data_size: usize) -> Result<Self> {
        let stride = layout.stride();
        let pipe = PipeData::new(pipe_data_size)?;
        debug!(
            "shader pipeline created: {} attribs, stride {} bytes, pipe data {} bytes",
            layout.len(),
            stride,
            pipe_data_size
        );
        Ok(Self {
            shader,
            layout,
            stride,
            pipe,
        })
    }

    /// Run both stages for one raw vertex record.
    pub fn invoke(&mut self, raw_vertex: &[u8]) -> (ClipPos, u8) {
        let view = VertexView::new(raw_vertex, &self.layout);
        let pos = self.shader.vertex(view, &mut self.pipe);
        let color = self.shader.fragment(&self.pipe);
        (pos, color)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn layout(&self) -> &AttribLayout {
        &self.layout
    }

    pub fn pipe_data(&self) -> &PipeData {
        &self.pipe
    }

    pub fn shader(&self) -> &S {
        &self.shader
    }

    pub fn shader_mut(&mut self) -> &mut S {
        &mut self.shader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f32_bytes(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    fn pos_layout() -> AttribLayout {
        AttribLayout::default().with(3, ComponentKind::Float)
    }

    #[test]
    fn test_stride_from_layout() {
        let layout = pos_layout().with(3, ComponentKind::Float);
        let shader = FnShader::new(
            |_v: VertexView<'_>, _p: &mut PipeData| ClipPos::default(),
            |_p: &PipeData| b'.',
        );
        let pipeline = ShaderPipeline::new(shader, layout, 4).unwrap();
        assert_eq!(pipeline.stride(), 24);
        assert_eq!(pipeline.pipe_data().len(), 4);
    }

    #[test]
    fn test_vertex_stage_feeds_fragment_stage() {
        let shader = FnShader::new(
            |v: VertexView<'_>, pipe: &mut PipeData| {
                let [x, y, z] = v.attrib_f32::<3>(0).unwrap_or_default();
                pipe.write_f32(0, z);
                ClipPos::new(x, y, z)
            },
            |pipe: &PipeData| {
                if pipe.read_f32(0).unwrap_or(0.0) > 0.5 {
                    b'#'
                } else {
                    b'.'
                }
            },
        );
        let mut pipeline = ShaderPipeline::new(shader, pos_layout(), 4).unwrap();

        let (pos, color) = pipeline.invoke(&f32_bytes(&[1.0, 2.0, 0.9]));
        assert_eq!(pos, ClipPos::new(1.0, 2.0, 0.9));
        assert_eq!(color, b'#');

        let (_, color) = pipeline.invoke(&f32_bytes(&[1.0, 2.0, 0.1]));
        assert_eq!(color, b'.');
    }

    #[test]
    fn test_independent_pipelines_keep_separate_scratch() {
        let make = || {
            FnShader::new(
                |v: VertexView<'_>, pipe: &mut PipeData| {
                    pipe.write_u8(0, v.bytes()[0]);
                    ClipPos::default()
                },
                |pipe: &PipeData| pipe.read_u8(0).unwrap_or(b'?'),
            )
        };
        let layout = AttribLayout::default().with(1, ComponentKind::UByte);
        let mut a = ShaderPipeline::new(make(), layout.clone(), 1).unwrap();
        let mut b = ShaderPipeline::new(make(), layout, 1).unwrap();

        assert_eq!(a.invoke(b"a").1, b'a');
        assert_eq!(b.invoke(b"b").1, b'b');
        assert_eq!(a.pipe_data().as_slice(), b"a");
    }

    #[test]
    fn test_vertex_view_attrib_access() {
        let layout = pos_layout().with(2, ComponentKind::UByte);
        let mut raw = f32_bytes(&[3.0, 4.0, 5.0]);
        raw.extend_from_slice(&[7, 9]);
        let view = VertexView::new(&raw, &layout);

        assert_eq!(view.attrib(1), Some(&[7u8, 9][..]));
        assert_eq!(view.attrib(2), None);
        assert_eq!(view.attrib_f32::<2>(0), Some([3.0, 4.0]));
        assert_eq!(view.attrib_f32::<4>(0), None);
        assert_eq!(view.attrib_f32::<1>(1), None);
        assert_eq!(view.f32_at(8), Some(5.0));
        assert_eq!(view.f32_at(12), None);
    }

    #[test]
    fn test_vertex_view_short_record() {
        let layout = pos_layout();
        let raw = f32_bytes(&[1.0]);
        let view = VertexView::new(&raw, &layout);
        assert_eq!(view.attrib(0), None);
        assert_eq!(view.attrib_f32::<3>(0), None);
    }

    #[test]
    fn test_pipe_data_bounds() {
        let mut pipe = PipeData::new(6).unwrap();
        assert!(pipe.write_f32(2, 1.5));
        assert!(!pipe.write_f32(3, 1.5));
        assert_eq!(pipe.read_f32(2), Some(1.5));
        assert_eq!(pipe.read_f32(4), None);
        assert!(!pipe.write_u8(6, 1));
        assert!(PipeData::new(0).unwrap().is_empty());
    }

    struct Fixed(u8);

    impl Shader for Fixed {
        fn vertex(&self, _vertex: VertexView<'_>, _pipe: &mut PipeData) -> ClipPos {
            ClipPos::new(1.0, 1.0, 0.0)
        }

        fn fragment(&self, _pipe: &PipeData) -> u8 {
            self.0
        }
    }

    #[test]
    fn test_shader_mut_swaps_program_state() {
        let mut pipeline = ShaderPipeline::new(Fixed(b'a'), AttribLayout::default(), 0).unwrap();
        assert_eq!(pipeline.invoke(&[]).1, b'a');
        pipeline.shader_mut().0 = b'b';
        assert_eq!(pipeline.invoke(&[]).1, b'b');
        assert_eq!(pipeline.shader().0, b'b');
    }
}
