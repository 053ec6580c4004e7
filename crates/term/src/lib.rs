//! Terminal output module.
//!
//! The core crate produces serialized frames and never touches a terminal.
//! This crate supplies the collaborators around it:
//!
//! - querying the terminal size and keeping a surface matched to it
//! - writing frames to the terminal through crossterm
//! - skipping redundant writes of unchanged frames

pub mod host;
pub mod renderer;
pub mod throttle;

pub use tui_raster_core as core;
pub use tui_raster_types as types;

pub use host::{terminal_size, SurfaceHost};
pub use renderer::{encode_frame_into, TerminalRenderer};
pub use throttle::{frame_fingerprint, PresentThrottle};
