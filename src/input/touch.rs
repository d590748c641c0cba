//! Touch records delivered by the touch dispatcher

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unique identifier of a finger for the lifetime of its contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchId(pub u64);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle phase of a touch within the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TouchPhase {
    /// Finger went down this frame
    #[default]
    Began,
    /// Finger moved this frame
    Moved,
    /// Finger is down but did not move
    Stationary,
    /// Finger was lifted
    Ended,
    /// The platform stopped tracking the finger
    Cancelled,
}

impl TouchPhase {
    /// Whether the touch is gone after this frame.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

/// A single touch as seen by gesture recognizers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    /// Finger identifier
    pub id: TouchId,
    /// Screen position in pixels
    pub position: Vec2,
    /// Phase for this frame
    #[serde(default)]
    pub phase: TouchPhase,
}

impl Touch {
    /// Create a touch record.
    #[must_use]
    pub fn new(id: u64, position: Vec2, phase: TouchPhase) -> Self {
        Self {
            id: TouchId(id),
            position,
            phase,
        }
    }

    /// A touch that just went down.
    #[must_use]
    pub fn began(id: u64, position: Vec2) -> Self {
        Self::new(id, position, TouchPhase::Began)
    }

    /// A touch that moved to `position`.
    #[must_use]
    pub fn moved(id: u64, position: Vec2) -> Self {
        Self::new(id, position, TouchPhase::Moved)
    }

    /// A touch that was lifted at `position`.
    #[must_use]
    pub fn ended(id: u64, position: Vec2) -> Self {
        Self::new(id, position, TouchPhase::Ended)
    }
}
