//! Input handling module
//!
//! Touch records and screen metrics consumed by gesture recognizers.

mod screen;
mod touch;

pub use screen::ScreenDensity;
pub use touch::{Touch, TouchId, TouchPhase};
