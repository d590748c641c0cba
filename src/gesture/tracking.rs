//! Set of touches a recognizer is following

use glam::Vec2;
use smallvec::SmallVec;

use crate::input::{Touch, TouchId};

/// Inline capacity before the tracking set spills to the heap.
const INLINE_TOUCHES: usize = 5;

/// Ordered collection of tracked touches, unique by [`TouchId`].
///
/// Touches are stored by value. Callers keep positions current with
/// [`TrackingSet::refresh`] before reading [`TrackingSet::location`].
#[derive(Debug, Clone, Default)]
pub struct TrackingSet {
    touches: SmallVec<[Touch; INLINE_TOUCHES]>,
}

impl TrackingSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a touch. Returns `false` if a touch with the same id is already tracked.
    pub fn add(&mut self, touch: Touch) -> bool {
        if self.contains(touch.id) {
            return false;
        }
        self.touches.push(touch);
        true
    }

    /// Remove a touch by id. Returns the removed touch, if it was tracked.
    pub fn remove(&mut self, id: TouchId) -> Option<Touch> {
        let index = self.touches.iter().position(|t| t.id == id)?;
        Some(self.touches.remove(index))
    }

    /// Check if a touch is tracked.
    #[must_use]
    pub fn contains(&self, id: TouchId) -> bool {
        self.touches.iter().any(|t| t.id == id)
    }

    /// Number of tracked touches.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.touches.len()
    }

    /// Whether no touches are tracked.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    /// Copy position and phase from `touches` onto the tracked touches with matching ids.
    pub fn refresh(&mut self, touches: &[Touch]) {
        for incoming in touches {
            if let Some(tracked) = self.touches.iter_mut().find(|t| t.id == incoming.id) {
                tracked.position = incoming.position;
                tracked.phase = incoming.phase;
            }
        }
    }

    /// Centroid of the tracked touches, or `Vec2::ZERO` when empty.
    #[must_use]
    pub fn location(&self) -> Vec2 {
        if self.touches.is_empty() {
            return Vec2::ZERO;
        }

        let sum: Vec2 = self.touches.iter().map(|t| t.position).sum();
        sum / self.touches.len() as f32
    }

    /// Remove every touch.
    pub fn clear(&mut self) {
        self.touches.clear();
    }

    /// Iterate over tracked touches in admission order.
    pub fn iter(&self) -> impl Iterator<Item = &Touch> {
        self.touches.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TouchPhase;

    #[test]
    fn test_add_is_unique_by_id() {
        let mut set = TrackingSet::new();

        assert!(set.add(Touch::began(1, Vec2::ZERO)));
        assert!(!set.add(Touch::began(1, Vec2::new(5.0, 5.0))));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = TrackingSet::new();
        set.add(Touch::began(1, Vec2::ZERO));
        set.add(Touch::began(2, Vec2::ONE));

        let removed = set.remove(TouchId(1)).unwrap();
        assert_eq!(removed.id, TouchId(1));
        assert!(!set.contains(TouchId(1)));
        assert!(set.contains(TouchId(2)));
        assert!(set.remove(TouchId(9)).is_none());
    }

    #[test]
    fn test_location_is_centroid() {
        let mut set = TrackingSet::new();
        assert_eq!(set.location(), Vec2::ZERO);

        set.add(Touch::began(1, Vec2::new(0.0, 0.0)));
        set.add(Touch::began(2, Vec2::new(10.0, 20.0)));
        assert_eq!(set.location(), Vec2::new(5.0, 10.0));
    }

    #[test]
    fn test_refresh_updates_only_tracked() {
        let mut set = TrackingSet::new();
        set.add(Touch::began(1, Vec2::ZERO));

        set.refresh(&[
            Touch::moved(1, Vec2::new(3.0, 4.0)),
            Touch::moved(2, Vec2::new(100.0, 100.0)),
        ]);

        assert_eq!(set.len(), 1);
        let tracked = set.iter().next().unwrap();
        assert_eq!(tracked.position, Vec2::new(3.0, 4.0));
        assert_eq!(tracked.phase, TouchPhase::Moved);
    }
}
