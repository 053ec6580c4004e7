//! tui-raster (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `tui_raster::{types, core, term}` so callers and integration tests depend on
//! a single package.

pub use tui_raster_core as core;
pub use tui_raster_term as term;
pub use tui_raster_types as types;
