//! Multicast event with synchronous fan-out.
//!
//! [`Event<T>`] holds zero or more handlers. [`Event::raise`] calls each of
//! them in subscription order on the calling thread, so handlers observe the
//! same thread and ordering as the code that raised the event. For hook
//! events that thread is the OS hook thread and handlers must return quickly.
//!
//! The handler list is snapshotted before dispatch, which lets a handler
//! subscribe or unsubscribe without deadlocking. A change made during a raise
//! takes effect from the next raise.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, PoisonError, RwLock};

use crate::geometry::Point;
use crate::keymap::KeyCode;

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Identifies one subscription for [`Event::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A list of observers for values of type `T`.
pub struct Event<T> {
    next_id: AtomicU64,
    handlers: RwLock<Vec<(SubscriptionId, Handler<T>)>>,
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Adds `handler` and returns its id.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));
        id
    }

    /// Removes a handler. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Calls every handler with `args`, in subscription order.
    pub fn raise(&self, args: &T) {
        let snapshot: Vec<Handler<T>> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in snapshot {
            handler(args);
        }
    }
}

impl<T> Event<T>
where
    T: Clone + Send + 'static,
{
    /// Subscribes a channel and returns its receiving end.
    ///
    /// Each raise sends a clone of the arguments. Sends to a dropped receiver
    /// are ignored; the subscription stays registered until unsubscribed.
    pub fn subscribe_channel(&self) -> (SubscriptionId, mpsc::Receiver<T>) {
        let (tx, rx) = mpsc::channel::<T>();
        let id = self.subscribe(move |args: &T| {
            let _ = tx.send(args.clone());
        });
        (id, rx)
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("handlers", &self.handler_count())
            .finish()
    }
}

// ── Event arguments ───────────────────────────────────────────────────────────

/// Payload of keyboard events (key pushed, hooked key down/up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEventArgs {
    pub key_code: KeyCode,
}

impl KeyEventArgs {
    pub const fn new(key_code: KeyCode) -> Self {
        Self { key_code }
    }
}

/// Payload of mouse events: the tracked pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEventArgs {
    pub point: Point,
}

impl MouseEventArgs {
    pub const fn new(point: Point) -> Self {
        Self { point }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
