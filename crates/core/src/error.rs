//! Recoverable errors raised while building surfaces, pipelines and buffers.
//!
//! Programmer errors (out-of-range indices, strict out-of-bounds draws) are
//! not represented here: they panic at the call site.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("failed to allocate {len} elements for {what}")]
    Alloc { what: &'static str, len: usize },

    #[error("vertex buffer too short: need {needed} bytes, got {actual}")]
    VertexBufferTooShort { needed: usize, actual: usize },

    #[error("vertex stride must be non-zero")]
    ZeroStride,

    #[error("vertex data length {len} is not a multiple of stride {stride}")]
    UnalignedVertexData { len: usize, stride: usize },
}

pub type Result<T> = std::result::Result<T, RasterError>;

/// Allocate a vector of `len` copies of `value`, reporting failure instead of aborting.
pub(crate) fn try_filled<T: Clone>(what: &'static str, len: usize, value: T) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| RasterError::Alloc { what, len })?;
    v.resize(len, value);
    Ok(v)
}
