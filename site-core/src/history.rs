//! Session history: the address bar and back/forward stack the router
//! sits on.
//!
//! [`History`] abstracts over whatever front end owns the location. The
//! router pushes entries and asks for scrolling through it, and subscribes
//! to location changes the router did not cause (back/forward).
//! [`MemoryHistory`] is the in-process implementation used by the terminal
//! front end, the headless driver and the tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// How the viewport should move when asked to scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Callback invoked with the new pathname after a history traversal.
pub type Listener = Box<dyn FnMut(&str)>;

type SharedListener = Rc<RefCell<Listener>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, SharedListener)>,
}

/// A set of location-change listeners.
///
/// History implementations embed one of these and call
/// [`notify`](Self::notify) on every traversal.
#[derive(Clone, Default)]
pub struct LocationListeners {
    registry: Rc<RefCell<Registry>>,
}

impl LocationListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`. It stays registered until the returned guard is
    /// dropped.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .entries
            .push((id, Rc::new(RefCell::new(listener))));

        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Call every registered listener with `pathname`.
    pub fn notify(&self, pathname: &str) {
        // Snapshot first so a listener may drop its own subscription.
        let snapshot: Vec<SharedListener> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();

        for listener in snapshot {
            let mut callback = listener.borrow_mut();
            (*callback)(pathname);
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for LocationListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationListeners")
            .field("len", &self.len())
            .finish()
    }
}

/// Guard for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// The location and history stack of one page.
pub trait History {
    /// The current location path.
    fn pathname(&self) -> &str;

    /// Add an entry for `path` and make it current, without notifying
    /// listeners.
    fn push_state(&mut self, path: &str);

    /// Ask the front end to bring the top of the page into view.
    fn scroll_to_top(&mut self, behavior: ScrollBehavior);

    /// Be told about traversals (back/forward) until the guard is dropped.
    fn subscribe(&self, listener: Listener) -> Subscription;

    /// Move one entry back and notify listeners. Returns `false` at the
    /// oldest entry.
    fn back(&mut self) -> bool;

    /// Move one entry forward and notify listeners. Returns `false` at the
    /// newest entry.
    fn forward(&mut self) -> bool;
}

impl<T: History + ?Sized> History for &mut T {
    fn pathname(&self) -> &str {
        (**self).pathname()
    }

    fn push_state(&mut self, path: &str) {
        (**self).push_state(path)
    }

    fn scroll_to_top(&mut self, behavior: ScrollBehavior) {
        (**self).scroll_to_top(behavior)
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        (**self).subscribe(listener)
    }

    fn back(&mut self) -> bool {
        (**self).back()
    }

    fn forward(&mut self) -> bool {
        (**self).forward()
    }
}

/// An in-process history stack.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
    listeners: LocationListeners,
    scroll_requests: VecDeque<ScrollBehavior>,
}

impl MemoryHistory {
    /// A history with a single entry for `initial_path`.
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            entries: vec![initial_path.into()],
            cursor: 0,
            listeners: LocationListeners::new(),
            scroll_requests: VecDeque::new(),
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of entries in the stack.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current entry.
    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Next pending scroll request, oldest first.
    pub fn take_scroll_request(&mut self) -> Option<ScrollBehavior> {
        self.scroll_requests.pop_front()
    }

    /// Number of scroll requests not yet taken.
    pub fn pending_scroll_requests(&self) -> usize {
        self.scroll_requests.len()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn traversed(&self) {
        let path = &self.entries[self.cursor];
        tracing::debug!(path = %path, index = self.cursor, "history traversal");
        self.listeners.notify(path);
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn pathname(&self) -> &str {
        &self.entries[self.cursor]
    }

    fn push_state(&mut self, path: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.to_string());
        self.cursor += 1;
    }

    fn scroll_to_top(&mut self, behavior: ScrollBehavior) {
        self.scroll_requests.push_back(behavior);
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.listeners.subscribe(listener)
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.traversed();
        true
    }

    fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        self.traversed();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, Listener) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, Box::new(move |path: &str| sink.borrow_mut().push(path.to_string())))
    }

    #[test]
    fn test_push_and_traverse() {
        let mut history = MemoryHistory::new("/");
        history.push_state("/Impressum");
        history.push_state("/Cookies");
        assert_eq!(history.pathname(), "/Cookies");
        assert_eq!(history.len(), 3);

        assert!(history.back());
        assert_eq!(history.pathname(), "/Impressum");
        assert!(history.back());
        assert!(!history.back());
        assert_eq!(history.pathname(), "/");

        assert!(history.forward());
        assert_eq!(history.pathname(), "/Impressum");
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = MemoryHistory::new("/");
        history.push_state("/a");
        history.push_state("/b");
        history.back();
        history.push_state("/c");

        assert_eq!(history.entries(), ["/", "/a", "/c"]);
        assert!(!history.can_go_forward());
        assert!(!history.forward());
    }

    #[test]
    fn test_listeners_fire_on_traversal_only() {
        let mut history = MemoryHistory::new("/");
        let (seen, listener) = recorder();
        let _sub = history.subscribe(listener);

        history.push_state("/Datenschutz");
        assert!(seen.borrow().is_empty());

        history.back();
        history.forward();
        assert_eq!(*seen.borrow(), ["/", "/Datenschutz"]);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let mut history = MemoryHistory::new("/");
        history.push_state("/x");
        let (seen, listener) = recorder();
        let sub = history.subscribe(listener);
        assert_eq!(history.subscriber_count(), 1);

        drop(sub);
        assert_eq!(history.subscriber_count(), 0);
        history.back();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_subscription_outliving_history() {
        let history = MemoryHistory::new("/");
        let (_seen, listener) = recorder();
        let sub = history.subscribe(listener);
        drop(history);
        sub.cancel();
    }

    #[test]
    fn test_listener_may_unsubscribe_during_notify() {
        let mut history = MemoryHistory::new("/");
        history.push_state("/x");

        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));
        let (slot_in, calls_in) = (Rc::clone(&slot), Rc::clone(&calls));
        let sub = history.subscribe(Box::new(move |_| {
            calls_in.set(calls_in.get() + 1);
            slot_in.borrow_mut().take();
        }));
        *slot.borrow_mut() = Some(sub);

        history.back();
        history.forward();
        assert_eq!(calls.get(), 1);
        assert_eq!(history.subscriber_count(), 0);
    }

    #[test]
    fn test_scroll_requests_queue() {
        let mut history = MemoryHistory::default();
        history.scroll_to_top(ScrollBehavior::Smooth);
        history.scroll_to_top(ScrollBehavior::Instant);
        assert_eq!(history.pending_scroll_requests(), 2);
        assert_eq!(history.take_scroll_request(), Some(ScrollBehavior::Smooth));
        assert_eq!(history.take_scroll_request(), Some(ScrollBehavior::Instant));
        assert_eq!(history.take_scroll_request(), None);
    }
}
