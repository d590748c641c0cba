//! Gesture notifications and their subscribers
//!
//! Recognizers never call subscribers from inside a state change. Each entry
//! point returns a [`GestureOutcome`] listing what happened, and the caller
//! hands those notifications to [`GestureListeners::notify`] (usually through
//! the recognizer's `dispatch`).
//!
//! # Example
//!
//! ```ignore
//! let outcome = recognizer.touches_moved(&touches);
//! recognizer.dispatch(&outcome.notifications);
//! ```

use std::fmt;

use smallvec::SmallVec;

/// Something a drag recognizer reports to the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragNotification {
    /// The drag threshold was crossed
    Recognized,
    /// A recognized drag finished
    Complete,
}

/// Notifications produced by one recognizer call, in the order they happened.
pub type Notifications = SmallVec<[DragNotification; 2]>;

/// Result of feeding one touch batch to a recognizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureOutcome {
    /// Whether the recognizer claimed the touches exclusively
    pub claimed: bool,
    /// Notifications to dispatch
    pub notifications: Notifications,
}

impl GestureOutcome {
    /// Outcome that claims nothing and notifies nothing.
    #[must_use]
    pub fn unclaimed() -> Self {
        Self::default()
    }

    /// Whether a notification of the given kind was produced.
    #[must_use]
    pub fn contains(&self, notification: DragNotification) -> bool {
        self.notifications.contains(&notification)
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

struct Listener<T> {
    id: ListenerId,
    kind: DragNotification,
    callback: Callback<T>,
}

/// Ordered list of subscribers for gesture notifications.
///
/// `T` is the recognizer type passed to every callback.
pub struct GestureListeners<T> {
    listeners: Vec<Listener<T>>,
    next_id: u64,
}

impl<T> GestureListeners<T> {
    /// Create an empty listener list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Subscribe `callback` to notifications of kind `kind`.
    pub fn subscribe(
        &mut self,
        kind: DragNotification,
        callback: impl FnMut(&T) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a subscription. Returns `true` if it existed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Call every subscriber of `notification`, in subscription order.
    pub fn notify(&mut self, notification: DragNotification, source: &T) {
        for listener in self
            .listeners
            .iter_mut()
            .filter(|l| l.kind == notification)
        {
            (listener.callback)(source);
        }
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Drop every subscriber.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<T> Default for GestureListeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for GestureListeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureListeners")
            .field("count", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_filters_by_kind() {
        let mut listeners: GestureListeners<u32> = GestureListeners::new();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&hits);
        listeners.subscribe(DragNotification::Recognized, move |v| {
            sink.borrow_mut().push(("recognized", *v));
        });
        let sink = Rc::clone(&hits);
        listeners.subscribe(DragNotification::Complete, move |v| {
            sink.borrow_mut().push(("complete", *v));
        });

        listeners.notify(DragNotification::Complete, &7);

        assert_eq!(*hits.borrow(), vec![("complete", 7)]);
    }

    #[test]
    fn test_notify_in_subscription_order() {
        let mut listeners: GestureListeners<()> = GestureListeners::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let sink = Rc::clone(&order);
            listeners.subscribe(DragNotification::Recognized, move |_| {
                sink.borrow_mut().push(i);
            });
        }

        listeners.notify(DragNotification::Recognized, &());
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut listeners: GestureListeners<()> = GestureListeners::new();
        let count = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&count);
        let id = listeners.subscribe(DragNotification::Recognized, move |_| {
            *sink.borrow_mut() += 1;
        });

        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        assert!(listeners.is_empty());

        listeners.notify(DragNotification::Recognized, &());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_len_and_clear() {
        let mut listeners: GestureListeners<()> = GestureListeners::new();
        let count = Rc::new(RefCell::new(0));
        assert_eq!(listeners.len(), 0);

        for kind in [DragNotification::Recognized, DragNotification::Complete] {
            let sink = Rc::clone(&count);
            listeners.subscribe(kind, move |_| *sink.borrow_mut() += 1);
        }
        assert_eq!(listeners.len(), 2);

        listeners.clear();
        assert!(listeners.is_empty());

        listeners.notify(DragNotification::Recognized, &());
        listeners.notify(DragNotification::Complete, &());
        assert_eq!(*count.borrow(), 0);

        // Ids keep increasing after a clear
        let id = listeners.subscribe(DragNotification::Complete, |_| {});
        assert_eq!(id, ListenerId(2));
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_outcome_contains() {
        let mut outcome = GestureOutcome::unclaimed();
        assert!(!outcome.claimed);
        assert!(!outcome.contains(DragNotification::Recognized));

        outcome.notifications.push(DragNotification::Recognized);
        assert!(outcome.contains(DragNotification::Recognized));
        assert!(!outcome.contains(DragNotification::Complete));
    }
}
