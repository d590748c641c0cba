//! Recognizer state shared by gesture recognizers

use std::fmt;

/// Lifecycle of a gesture recognizer.
///
/// A recognizer starts in `Possible`, moves through `Began` while it waits
/// for its threshold, reports `RecognizedAndStillRecognizing` while the gesture
/// is live and ends in `FailedOrEnded`, where it stays until the dispatcher
/// recycles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecognizerState {
    /// Waiting for touches
    #[default]
    Possible,
    /// Touches are tracked but the gesture is not confirmed yet
    Began,
    /// Gesture confirmed and still receiving updates
    RecognizedAndStillRecognizing,
    /// Gesture finished successfully
    Recognized,
    /// Gesture failed or ended; waiting to be reset
    FailedOrEnded,
}

impl RecognizerState {
    /// Whether the recognizer is currently tracking a gesture.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Began | Self::RecognizedAndStillRecognizing)
    }

    /// State name for logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Possible => "Possible",
            Self::Began => "Began",
            Self::RecognizedAndStillRecognizing => "RecognizedAndStillRecognizing",
            Self::Recognized => "Recognized",
            Self::FailedOrEnded => "FailedOrEnded",
        }
    }
}

impl fmt::Display for RecognizerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
