//! Gesture recognition
//!
//! Recognizers consume batches of touches from a dispatcher and turn them into
//! higher level notifications.

mod config;
mod drag;
mod notify;
mod state;
mod tracking;

pub use config::{ConfigError, DragConfig};
pub use drag::{DispatchPhase, DragRecognizer};
pub use notify::{DragNotification, GestureListeners, GestureOutcome, ListenerId, Notifications};
pub use state::RecognizerState;
pub use tracking::TrackingSet;
