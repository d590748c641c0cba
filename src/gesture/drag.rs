//! Drag (pan) gesture recognizer
//!
//! Follows one or more touches and reports a drag once they have travelled a
//! minimum physical distance. Extra fingers may join or leave a drag in
//! progress as long as the tracked count stays inside the configured range.
//!
//! # Example
//!
//! ```ignore
//! let mut drag = DragRecognizer::new(0.5);
//! drag.on_recognized(|d| log::info!("drag started at {}", d.start_point()));
//! drag.on_complete(|d| log::info!("drag ended at {}", d.end_point()));
//!
//! // Once per frame, for each phase that has touches:
//! drag.handle(DispatchPhase::Moved, &moved_touches);
//! ```

use std::fmt;

use glam::Vec2;

use super::config::{ConfigError, DragConfig, validate_touch_range};
use super::notify::{DragNotification, GestureListeners, GestureOutcome, ListenerId, Notifications};
use super::state::RecognizerState;
use super::tracking::TrackingSet;
use crate::input::{ScreenDensity, Touch, TouchPhase};

/// Which recognizer entry point a batch of touches belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchPhase {
    /// Touches that went down this frame
    Began,
    /// Touches that moved or stayed put this frame
    Moved,
    /// Touches that were lifted or cancelled this frame
    Ended,
}

impl DispatchPhase {
    /// Entry point that receives touches of the given phase.
    #[must_use]
    pub const fn for_touch(phase: TouchPhase) -> Self {
        match phase {
            TouchPhase::Began => Self::Began,
            TouchPhase::Moved | TouchPhase::Stationary => Self::Moved,
            TouchPhase::Ended | TouchPhase::Cancelled => Self::Ended,
        }
    }
}

/// Recognizes single or multi-touch drags.
pub struct DragRecognizer {
    /// Current lifecycle state
    state: RecognizerState,
    /// Touches contributing to the gesture
    tracking: TrackingSet,
    /// Fewest touches that make a drag
    minimum_number_of_touches: usize,
    /// Most touches a drag accepts
    maximum_number_of_touches: usize,
    /// Travel needed before the drag is recognized
    min_drag_distance_cm: f32,
    /// Pixel density used to convert movement to centimeters
    density: ScreenDensity,
    /// Movement since the previous update, in pixels
    delta_translation: Vec2,
    /// Length of `delta_translation` in centimeters
    delta_translation_cm: f32,
    /// Distance travelled while waiting for the threshold
    total_delta_cm: f32,
    /// Location deltas are measured from
    previous_location: Vec2,
    start_point: Vec2,
    end_point: Vec2,
    current_point: Vec2,
    /// Whether `Recognized` was already reported for this gesture
    recognized_reported: bool,
    listeners: GestureListeners<DragRecognizer>,
}

impl DragRecognizer {
    /// Create a single-touch drag recognizer with the given threshold.
    #[must_use]
    pub fn new(min_drag_distance_cm: f32) -> Self {
        Self {
            state: RecognizerState::Possible,
            tracking: TrackingSet::new(),
            minimum_number_of_touches: 1,
            maximum_number_of_touches: 1,
            min_drag_distance_cm,
            density: ScreenDensity::default(),
            delta_translation: Vec2::ZERO,
            delta_translation_cm: 0.0,
            total_delta_cm: 0.0,
            previous_location: Vec2::ZERO,
            start_point: Vec2::ZERO,
            end_point: Vec2::ZERO,
            current_point: Vec2::ZERO,
            recognized_reported: false,
            listeners: GestureListeners::new(),
        }
    }

    /// Create a recognizer from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`DragConfig::validate`].
    pub fn from_config(config: &DragConfig) -> Result<Self, ConfigError> {
        config.validate().inspect_err(|e| {
            log::warn!("Rejected drag configuration: {e}");
        })?;

        let mut recognizer = Self::new(config.min_drag_distance_cm);
        recognizer.minimum_number_of_touches = config.minimum_number_of_touches;
        recognizer.maximum_number_of_touches = config.maximum_number_of_touches;
        recognizer.density = config.screen_density();
        Ok(recognizer)
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Fewest simultaneous touches accepted.
    #[must_use]
    pub fn minimum_number_of_touches(&self) -> usize {
        self.minimum_number_of_touches
    }

    /// Most simultaneous touches accepted.
    #[must_use]
    pub fn maximum_number_of_touches(&self) -> usize {
        self.maximum_number_of_touches
    }

    /// Change the accepted touch count range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTouchRange`] if `minimum` is zero or
    /// greater than `maximum`. The current range is kept in that case.
    pub fn set_touch_range(&mut self, minimum: usize, maximum: usize) -> Result<(), ConfigError> {
        validate_touch_range(minimum, maximum)?;
        self.minimum_number_of_touches = minimum;
        self.maximum_number_of_touches = maximum;
        Ok(())
    }

    /// Travel in centimeters needed before a drag is recognized.
    #[must_use]
    pub fn min_drag_distance_cm(&self) -> f32 {
        self.min_drag_distance_cm
    }

    /// Screen density used for centimeter conversion.
    #[must_use]
    pub fn screen_density(&self) -> ScreenDensity {
        self.density
    }

    /// Set the screen density used for centimeter conversion.
    pub fn set_screen_density(&mut self, density: ScreenDensity) {
        self.density = density;
    }

    // ------------------------------------------------------------------------
    // Observations
    // ------------------------------------------------------------------------

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RecognizerState {
        self.state
    }

    /// Touch location at the last move.
    #[must_use]
    pub fn current_point(&self) -> Vec2 {
        self.current_point
    }

    /// Position of the first touch of the gesture.
    #[must_use]
    pub fn start_point(&self) -> Vec2 {
        self.start_point
    }

    /// Touch location when touches were last lifted.
    #[must_use]
    pub fn end_point(&self) -> Vec2 {
        self.end_point
    }

    /// Movement since the previous update, in pixels.
    #[must_use]
    pub fn delta_translation(&self) -> Vec2 {
        self.delta_translation
    }

    /// Length of [`Self::delta_translation`] in centimeters.
    #[must_use]
    pub fn delta_translation_cm(&self) -> f32 {
        self.delta_translation_cm
    }

    /// Distance accumulated while waiting for the drag threshold.
    #[must_use]
    pub fn total_delta_cm(&self) -> f32 {
        self.total_delta_cm
    }

    /// Touches currently contributing to the gesture.
    #[must_use]
    pub fn tracked_touches(&self) -> &TrackingSet {
        &self.tracking
    }

    /// Centroid of the tracked touches.
    #[must_use]
    pub fn touch_location(&self) -> Vec2 {
        self.tracking.location()
    }

    // ------------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------------

    /// Call `callback` each time a drag is recognized.
    pub fn on_recognized(&mut self, callback: impl FnMut(&DragRecognizer) + 'static) -> ListenerId {
        self.listeners
            .subscribe(DragNotification::Recognized, callback)
    }

    /// Call `callback` each time a recognized drag completes.
    pub fn on_complete(&mut self, callback: impl FnMut(&DragRecognizer) + 'static) -> ListenerId {
        self.listeners.subscribe(DragNotification::Complete, callback)
    }

    /// Remove a subscription made with `on_recognized` or `on_complete`.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Run the subscribers of each notification, in order.
    pub fn dispatch(&mut self, notifications: &[DragNotification]) {
        if notifications.is_empty() {
            return;
        }

        let mut listeners = std::mem::take(&mut self.listeners);
        for &notification in notifications {
            log::debug!("DragRecognizer dispatching {notification:?}");
            listeners.notify(notification, self);
        }
        self.listeners = listeners;
    }

    /// Route a batch to the matching entry point and dispatch its notifications.
    pub fn handle(&mut self, phase: DispatchPhase, touches: &[Touch]) -> GestureOutcome {
        let outcome = match phase {
            DispatchPhase::Began => self.touches_began(touches),
            DispatchPhase::Moved => self.touches_moved(touches),
            DispatchPhase::Ended => self.touches_ended(touches),
        };
        self.dispatch(&outcome.notifications);
        outcome
    }

    // ------------------------------------------------------------------------
    // Touch entry points
    // ------------------------------------------------------------------------

    /// Admit new touches into the gesture.
    ///
    /// Never claims the touches, so other recognizers may follow them too.
    pub fn touches_began(&mut self, touches: &[Touch]) -> GestureOutcome {
        let mut outcome = GestureOutcome::unclaimed();
        log::trace!(
            "DragRecognizer touches_began: {} incoming, {} tracked",
            touches.len(),
            self.tracking.len()
        );

        // Extra touches abort the gesture
        if self.tracking.len() + touches.len() > self.maximum_number_of_touches {
            self.transition_to(RecognizerState::FailedOrEnded, &mut outcome.notifications);
            return outcome;
        }

        let can_admit = match self.state {
            RecognizerState::Possible => true,
            RecognizerState::Began | RecognizerState::RecognizedAndStillRecognizing => {
                self.tracking.len() < self.maximum_number_of_touches
            }
            RecognizerState::Recognized | RecognizerState::FailedOrEnded => false,
        };
        if !can_admit {
            return outcome;
        }

        self.tracking.refresh(touches);
        for touch in touches.iter().filter(|t| t.phase == TouchPhase::Began) {
            let first = self.tracking.is_empty();
            if self.tracking.add(*touch) && first {
                self.start_point = touch.position;
            }

            if self.tracking.len() >= self.maximum_number_of_touches {
                break;
            }
        }

        if self.touch_count_in_range() {
            self.previous_location = self.tracking.location();
            if self.state != RecognizerState::RecognizedAndStillRecognizing {
                self.total_delta_cm = 0.0;
                self.recognized_reported = false;
                self.transition_to(RecognizerState::Began, &mut outcome.notifications);
            }
        }

        outcome
    }

    /// Measure movement of the tracked touches.
    pub fn touches_moved(&mut self, touches: &[Touch]) -> GestureOutcome {
        let mut outcome = GestureOutcome::unclaimed();

        if !self.touch_count_in_range() {
            return outcome;
        }

        self.tracking.refresh(touches);
        self.current_point = self.tracking.location();
        self.delta_translation = self.current_point - self.previous_location;
        self.delta_translation_cm = self.density.to_cm(self.delta_translation.length());
        self.previous_location = self.current_point;
        log::trace!(
            "DragRecognizer moved by {} ({} cm)",
            self.delta_translation,
            self.delta_translation_cm
        );

        match self.state {
            RecognizerState::Began => {
                self.total_delta_cm += self.delta_translation_cm;
                if self.total_delta_cm.abs() >= self.min_drag_distance_cm {
                    self.transition_to(
                        RecognizerState::RecognizedAndStillRecognizing,
                        &mut outcome.notifications,
                    );
                }
            }
            RecognizerState::RecognizedAndStillRecognizing => {
                self.transition_to(
                    RecognizerState::RecognizedAndStillRecognizing,
                    &mut outcome.notifications,
                );
            }
            state => {
                log::trace!("DragRecognizer ignoring movement in state {state}");
            }
        }

        outcome
    }

    /// Drop lifted touches and finish the gesture when too few remain.
    pub fn touches_ended(&mut self, touches: &[Touch]) -> GestureOutcome {
        let mut outcome = GestureOutcome::unclaimed();

        self.tracking.refresh(touches);
        self.end_point = self.tracking.location();

        for touch in touches.iter().filter(|t| t.phase.is_finished()) {
            self.tracking.remove(touch.id);
        }

        if self.tracking.len() >= self.minimum_number_of_touches {
            // Enough fingers left: keep dragging from where they are now
            if self.state.is_active() {
                self.previous_location = self.tracking.location();
                self.transition_to(
                    RecognizerState::RecognizedAndStillRecognizing,
                    &mut outcome.notifications,
                );
            }
        } else {
            if self.state == RecognizerState::RecognizedAndStillRecognizing {
                self.transition_to(RecognizerState::Recognized, &mut outcome.notifications);
                outcome.notifications.push(DragNotification::Complete);
            }
            self.transition_to(RecognizerState::FailedOrEnded, &mut outcome.notifications);
        }

        outcome
    }

    /// Return to `Possible`, forgetting all touches and measurements.
    ///
    /// Subscriptions and configuration are kept.
    pub fn reset(&mut self) {
        log::debug!("DragRecognizer reset from {}", self.state);
        self.state = RecognizerState::Possible;
        self.tracking.clear();
        self.delta_translation = Vec2::ZERO;
        self.delta_translation_cm = 0.0;
        self.total_delta_cm = 0.0;
        self.previous_location = Vec2::ZERO;
        self.start_point = Vec2::ZERO;
        self.end_point = Vec2::ZERO;
        self.current_point = Vec2::ZERO;
        self.recognized_reported = false;
    }

    fn touch_count_in_range(&self) -> bool {
        (self.minimum_number_of_touches..=self.maximum_number_of_touches)
            .contains(&self.tracking.len())
    }

    /// Single place where the state changes.
    ///
    /// Entering `RecognizedAndStillRecognizing` reports `Recognized` once per gesture.
    fn transition_to(&mut self, new_state: RecognizerState, notifications: &mut Notifications) {
        if self.state != new_state {
            log::debug!("DragRecognizer {} -> {}", self.state, new_state);
        }
        self.state = new_state;

        if new_state == RecognizerState::RecognizedAndStillRecognizing && !self.recognized_reported
        {
            self.recognized_reported = true;
            notifications.push(DragNotification::Recognized);
        }
    }
}

impl Default for DragRecognizer {
    fn default() -> Self {
        Self::new(DragConfig::DEFAULT_MIN_DRAG_DISTANCE_CM)
    }
}

impl fmt::Debug for DragRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragRecognizer")
            .field("state", &self.state)
            .field("tracking", &self.tracking)
            .field("minimum_number_of_touches", &self.minimum_number_of_touches)
            .field("maximum_number_of_touches", &self.maximum_number_of_touches)
            .field("min_drag_distance_cm", &self.min_drag_distance_cm)
            .field("delta_translation", &self.delta_translation)
            .field("total_delta_cm", &self.total_delta_cm)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for DragRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[DragRecognizer] state: {}, location: {}, deltaTranslation: {}",
            self.state,
            self.touch_location(),
            self.delta_translation
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
