//! Platform layer
//!
//! Everything that touches the outside world lives here:
//! - Frame timing (`clock`)
//! - Raw key/mouse state to `TickInput` (`input`)
//! - Cell rasterizer and terminal frontend

pub mod clock;
pub mod input;
pub mod raster;
pub mod terminal;

pub use clock::FrameClock;
pub use input::{InputState, Key};
