//! Scripted touch replay
//!
//! Drives a [`DragRecognizer`] through recorded frames the way a per-frame
//! touch dispatcher would: each frame is split by phase and delivered as
//! began, moved, then ended batches. A recognizer left in `FailedOrEnded` is
//! recycled on the first frame without touches.
//!
//! Scripts are stored in RON:
//!
//! ```ron
//! (
//!     config: (min_drag_distance_cm: 0.5, screen_dpi: Some(254.0)),
//!     frames: [
//!         (touches: [(id: 1, position: (0.0, 0.0), phase: Began)]),
//!         (touches: [(id: 1, position: (60.0, 0.0), phase: Moved)]),
//!         (touches: [(id: 1, position: (60.0, 0.0), phase: Ended)]),
//!         (touches: []),
//!     ],
//! )
//! ```

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::gesture::{
    ConfigError, DispatchPhase, DragConfig, DragNotification, DragRecognizer, RecognizerState,
};
use crate::input::Touch;

/// Order in which a dispatcher delivers batches within one frame.
const PHASE_ORDER: [DispatchPhase; 3] = [
    DispatchPhase::Began,
    DispatchPhase::Moved,
    DispatchPhase::Ended,
];

/// Touches reported in one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Every touch the platform reported this frame
    #[serde(default)]
    pub touches: Vec<Touch>,
}

impl ScriptFrame {
    /// Create a frame from touches.
    #[must_use]
    pub fn new(touches: impl Into<Vec<Touch>>) -> Self {
        Self {
            touches: touches.into(),
        }
    }

    /// A frame with no touches down.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Touches belonging to one dispatch phase, in reported order.
    fn batch(&self, phase: DispatchPhase) -> SmallVec<[Touch; 5]> {
        self.touches
            .iter()
            .filter(|t| DispatchPhase::for_touch(t.phase) == phase)
            .copied()
            .collect()
    }
}

/// A recognizer configuration plus the frames to feed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchScript {
    /// Recognizer settings
    #[serde(default)]
    pub config: DragConfig,
    /// Frames in playback order
    pub frames: Vec<ScriptFrame>,
}

impl TouchScript {
    /// Single-finger drag: down at the origin, 0.4 cm, then 0.2 cm more, lift.
    ///
    /// Uses a 254 DPI screen, i.e. 100 pixels per centimeter.
    #[must_use]
    pub fn example() -> Self {
        let frames = vec![
            ScriptFrame::new([Touch::began(1, Vec2::ZERO)]),
            ScriptFrame::new([Touch::moved(1, Vec2::new(40.0, 0.0))]),
            ScriptFrame::new([Touch::moved(1, Vec2::new(60.0, 0.0))]),
            ScriptFrame::new([Touch::ended(1, Vec2::new(60.0, 0.0))]),
            ScriptFrame::idle(),
        ];

        Self {
            config: DragConfig::default().with_screen_dpi(254.0),
            frames,
        }
    }

    /// Parse a script from a RON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid script or its
    /// configuration is invalid.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let script: TouchScript =
            ron::from_str(source).map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        script.config.validate()?;
        Ok(script)
    }

    /// Load a script from a RON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Build a recognizer from the script configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn recognizer(&self) -> Result<DragRecognizer, ConfigError> {
        DragRecognizer::from_config(&self.config)
    }
}

/// A notification observed during replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayEvent {
    /// Index of the frame that produced it
    pub frame: usize,
    /// What was reported
    pub notification: DragNotification,
    /// Recognizer state after the batch
    pub state: RecognizerState,
    /// Touch location after the batch
    pub location: Vec2,
}

/// Feed `frames` to `recognizer`, dispatching notifications as they occur.
///
/// Returns every notification in the order it was dispatched.
pub fn replay(recognizer: &mut DragRecognizer, frames: &[ScriptFrame]) -> Vec<ReplayEvent> {
    let mut events = Vec::new();

    for (index, frame) in frames.iter().enumerate() {
        if frame.touches.is_empty() {
            if recognizer.state() == RecognizerState::FailedOrEnded {
                recognizer.reset();
            }
            continue;
        }

        for phase in PHASE_ORDER {
            let batch = frame.batch(phase);
            if batch.is_empty() {
                continue;
            }

            let outcome = recognizer.handle(phase, &batch);
            events.extend(outcome.notifications.iter().map(|&notification| ReplayEvent {
                frame: index,
                notification,
                state: recognizer.state(),
                location: recognizer.touch_location(),
            }));
        }
        log::trace!("Frame {index}: {recognizer}");
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TouchPhase;

    #[test]
    fn test_example_script() {
        let script = TouchScript::example();
        let mut drag = script.recognizer().unwrap();

        let events = replay(&mut drag, &script.frames);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].frame, 2);
        assert_eq!(events[0].notification, DragNotification::Recognized);
        assert_eq!(
            events[0].state,
            RecognizerState::RecognizedAndStillRecognizing
        );
        assert_eq!(events[1].frame, 3);
        assert_eq!(events[1].notification, DragNotification::Complete);
        assert_eq!(events[1].state, RecognizerState::FailedOrEnded);

        // Idle frame recycled the recognizer
        assert_eq!(drag.state(), RecognizerState::Possible);
    }

    #[test]
    fn test_phases_delivered_in_order() {
        let mut drag = DragRecognizer::from_config(
            &DragConfig::default()
                .with_touch_range(1, 2)
                .with_screen_dpi(254.0),
        )
        .unwrap();

        // Second finger lands in the same frame the first one is lifted
        let frames = vec![
            ScriptFrame::new([Touch::began(1, Vec2::ZERO)]),
            ScriptFrame::new([Touch::moved(1, Vec2::new(100.0, 0.0))]),
            ScriptFrame::new([
                Touch::ended(1, Vec2::new(100.0, 0.0)),
                Touch::began(2, Vec2::new(300.0, 0.0)),
            ]),
        ];

        let events = replay(&mut drag, &frames);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].notification, DragNotification::Recognized);
        assert_eq!(drag.state(), RecognizerState::RecognizedAndStillRecognizing);
        assert_eq!(drag.touch_location(), Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_failed_gesture_recycled_on_idle() {
        let mut drag = DragRecognizer::default();
        let frames = vec![
            ScriptFrame::new([Touch::began(1, Vec2::ZERO), Touch::began(2, Vec2::ONE)]),
            ScriptFrame::new([
                Touch::new(1, Vec2::ZERO, TouchPhase::Stationary),
                Touch::new(2, Vec2::ONE, TouchPhase::Stationary),
            ]),
        ];

        assert!(replay(&mut drag, &frames).is_empty());
        assert_eq!(drag.state(), RecognizerState::FailedOrEnded);

        replay(&mut drag, &[ScriptFrame::idle()]);
        assert_eq!(drag.state(), RecognizerState::Possible);
    }

    #[test]
    fn test_script_from_ron() {
        let source = r"(
            config: (min_drag_distance_cm: 1.0, screen_dpi: Some(254.0)),
            frames: [
                (touches: [(id: 4, position: (0.0, 0.0), phase: Began)]),
                (touches: [(id: 4, position: (0.0, 120.0), phase: Moved)]),
                (touches: [(id: 4, position: (0.0, 120.0), phase: Ended)]),
            ],
        )";

        let script = TouchScript::from_ron_str(source).unwrap();
        assert_eq!(script.frames.len(), 3);

        let mut drag = script.recognizer().unwrap();
        let events = replay(&mut drag, &script.frames);

        let kinds: Vec<_> = events.iter().map(|e| e.notification).collect();
        assert_eq!(
            kinds,
            vec![DragNotification::Recognized, DragNotification::Complete]
        );
    }

    #[test]
    fn test_two_finger_demo_script() {
        let script =
            TouchScript::from_ron_str(include_str!("../demos/two_finger_drag.ron")).unwrap();
        let mut drag = script.recognizer().unwrap();

        let events = replay(&mut drag, &script.frames);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].notification, DragNotification::Recognized);
        assert_eq!(events[0].frame, 2);
        assert_eq!(events[1].notification, DragNotification::Complete);
        assert_eq!(events[1].frame, 5);
        assert_eq!(drag.state(), RecognizerState::Possible);
    }

    #[test]
    fn test_script_with_invalid_config() {
        let source = "(config: (minimum_number_of_touches: 3), frames: [])";
        assert!(matches!(
            TouchScript::from_ron_str(source),
            Err(ConfigError::InvalidTouchRange { .. })
        ));
    }
}
