//! Touch gesture recognition
//!
//! This crate provides:
//! - Touch records and screen density conversion
//! - A drag (pan) recognizer with multi-touch support
//! - RON/JSON configuration
//! - Scripted replay of touch frames for demos and tests

pub mod gesture;
pub mod input;
pub mod replay;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::gesture::{
        ConfigError, DispatchPhase, DragConfig, DragNotification, DragRecognizer,
        GestureOutcome, RecognizerState,
    };
    pub use crate::input::{ScreenDensity, Touch, TouchId, TouchPhase};
    pub use glam::Vec2;
}
