//! Shared event sources with scoped listener registration.
//!
//! An [`EventTarget`] stands in for a process-wide event source such as the
//! window's resize stream or a touch surface. Every call to
//! [`EventTarget::add_listener`] returns a [`Subscription`] that owns exactly
//! one registration and detaches it when dropped.
//!
//! Listener keys are generational, so a stale [`Subscription`] can never
//! remove a newer listener that happens to reuse the same slot. Detaching
//! after the target is gone, or detaching twice, does nothing.
//!
//! # Examples
//!
//! ```
//! use std::sync::{
//!     Arc,
//!     atomic::{AtomicUsize, Ordering},
//! };
//!
//! use carousel_ui::listener::EventTarget;
//!
//! let target = EventTarget::<u32>::new("counter");
//! let seen = Arc::new(AtomicUsize::new(0));
//!
//! {
//!     let seen = seen.clone();
//!     let _subscription = target.add_listener(move |value: &u32| {
//!         seen.fetch_add(*value as usize, Ordering::SeqCst);
//!     });
//!     target.dispatch(&3);
//!     assert_eq!(target.listener_count(), 1);
//! } // detached here
//!
//! target.dispatch(&5);
//! assert_eq!(seen.load(Ordering::SeqCst), 3);
//! assert_eq!(target.listener_count(), 0);
//! ```

use std::{
    fmt,
    sync::{Arc, Weak},
};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use tracing::trace;

new_key_type! {
    /// Generational key identifying one attached listener.
    pub struct ListenerKey;
}

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;
type ListenerTable<E> = Mutex<SlotMap<ListenerKey, Listener<E>>>;

trait Detach: Send + Sync {
    fn detach(&self, key: ListenerKey) -> bool;
}

impl<E: 'static> Detach for ListenerTable<E> {
    fn detach(&self, key: ListenerKey) -> bool {
        self.lock().remove(key).is_some()
    }
}

/// A clonable, shared source of events of type `E`.
///
/// Clones refer to the same listener table.
pub struct EventTarget<E> {
    name: &'static str,
    table: Arc<ListenerTable<E>>,
}

impl<E> Clone for EventTarget<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            table: self.table.clone(),
        }
    }
}

impl<E> fmt::Debug for EventTarget<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTarget")
            .field("name", &self.name)
            .field("listeners", &self.table.lock().len())
            .finish()
    }
}

impl<E: 'static> EventTarget<E> {
    /// Creates an event target with no listeners.
    ///
    /// `name` is only used in trace output.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            table: Arc::new(Mutex::new(SlotMap::with_key())),
        }
    }

    /// Returns the diagnostic name of this target.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Attaches `listener` and returns the subscription owning it.
    ///
    /// The listener stays attached until the returned [`Subscription`] is
    /// dropped or explicitly unsubscribed.
    #[must_use = "dropping the subscription detaches the listener immediately"]
    pub fn add_listener<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let key = self.table.lock().insert(Arc::new(listener));
        trace!(target_name = self.name, ?key, "listener attached");
        let weak = Arc::downgrade(&self.table);
        let table: Weak<dyn Detach> = weak;
        Subscription {
            target_name: self.name,
            table: Some(table),
            key,
        }
    }

    /// Delivers `event` to every attached listener, returning how many ran.
    ///
    /// Listeners are snapshotted before delivery, so a listener may attach or
    /// detach others (including itself) without deadlocking.
    pub fn dispatch(&self, event: &E) -> usize {
        let listeners: SmallVec<[Listener<E>; 4]> = self.table.lock().values().cloned().collect();
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    /// Returns the number of currently attached listeners.
    pub fn listener_count(&self) -> usize {
        self.table.lock().len()
    }
}

/// Owns a single listener registration on an [`EventTarget`].
///
/// Dropping the subscription detaches the listener. The subscription does not
/// keep the target alive.
pub struct Subscription {
    target_name: &'static str,
    table: Option<Weak<dyn Detach>>,
    key: ListenerKey,
}

impl Subscription {
    /// Detaches the listener now.
    ///
    /// Returns `true` if a listener was actually removed. Calling this on an
    /// already detached subscription, or after the target was dropped,
    /// returns `false`.
    pub fn unsubscribe(&mut self) -> bool {
        let Some(table) = self.table.take() else {
            return false;
        };
        let Some(table) = table.upgrade() else {
            trace!(target_name = self.target_name, "target already gone");
            return false;
        };
        let removed = table.detach(self.key);
        trace!(
            target_name = self.target_name,
            key = ?self.key,
            removed,
            "listener detached"
        );
        removed
    }

    /// Returns whether this subscription still refers to a live listener.
    pub fn is_attached(&self) -> bool {
        self.table
            .as_ref()
            .is_some_and(|table| table.strong_count() > 0)
    }

    /// Returns the listener key, mostly useful for diagnostics.
    pub fn key(&self) -> ListenerKey {
        self.key
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("target_name", &self.target_name)
            .field("key", &self.key)
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
