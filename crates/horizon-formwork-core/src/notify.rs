//! Listener contracts and the single-slot dispatcher.
//!
//! Megawidgets communicate outward through three narrow listener interfaces,
//! each implemented by host code and invoked synchronously on the thread that
//! drives the UI:
//!
//! - [`NotificationListener`] — a notifier megawidget was activated by the
//!   user (a button press, a menu invocation).
//! - [`StateChangeListener`] — a stateful megawidget's state changed through
//!   user interaction. Programmatic `set_state` calls are deliberately
//!   silent.
//! - [`ResizeListener`] — a megawidget's preferred size changed as a result
//!   of user interaction.
//!
//! Each megawidget holds at most one listener of each kind, fixed at creation
//! time in a [`ListenerSlot`]; fan-out to multiple observers is the
//! listener's own responsibility. Plain closures implement all three traits.
//!
//! # Blocking
//!
//! A slot can be temporarily blocked via [`ListenerSlot::block`], which
//! returns an RAII guard. While blocked, [`ListenerSlot::call`] skips the
//! listener. Megawidgets block their state-change slot while pushing
//! programmatic state into the host binding so that an echo from the toolkit
//! cannot masquerade as a user-driven change.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::value::ParamValue;

/// Receives user-activation notifications from notifier megawidgets.
///
/// The optional callback data is the specifier's `callback_data` parameter,
/// passed through unchanged with every notification.
pub trait NotificationListener: Send + Sync {
    /// The megawidget with the given identifier was activated by the user.
    fn megawidget_invoked(&self, identifier: &str, callback_data: Option<&ParamValue>);
}

impl<F> NotificationListener for F
where
    F: Fn(&str, Option<&ParamValue>) + Send + Sync,
{
    fn megawidget_invoked(&self, identifier: &str, callback_data: Option<&ParamValue>) {
        self(identifier, callback_data);
    }
}

/// Receives user-driven state changes from stateful megawidgets.
pub trait StateChangeListener: Send + Sync {
    /// The state value owned by `state_identifier` changed to `value`
    /// through user interaction on the megawidget `identifier`.
    fn megawidget_state_changed(&self, identifier: &str, state_identifier: &str, value: &ParamValue);
}

impl<F> StateChangeListener for F
where
    F: Fn(&str, &str, &ParamValue) + Send + Sync,
{
    fn megawidget_state_changed(&self, identifier: &str, state_identifier: &str, value: &ParamValue) {
        self(identifier, state_identifier, value);
    }
}

/// Receives preferred-size-change notifications.
pub trait ResizeListener: Send + Sync {
    /// The megawidget with the given identifier changed its preferred size.
    fn megawidget_resized(&self, identifier: &str);
}

impl<F> ResizeListener for F
where
    F: Fn(&str) + Send + Sync,
{
    fn megawidget_resized(&self, identifier: &str) {
        self(identifier);
    }
}

/// A single-slot listener holder with a blockable dispatch path.
///
/// The slot is fixed at construction: either empty or holding exactly one
/// shared listener. There is no registry and no ambient state.
pub struct ListenerSlot<T: ?Sized> {
    listener: Option<Arc<T>>,
    blocked: AtomicBool,
}

impl<T: ?Sized> ListenerSlot<T> {
    /// Create an empty slot.
    pub fn empty() -> Self {
        Self {
            listener: None,
            blocked: AtomicBool::new(false),
        }
    }

    /// Create a slot from an optional listener.
    pub fn new(listener: Option<Arc<T>>) -> Self {
        Self {
            listener,
            blocked: AtomicBool::new(false),
        }
    }

    /// Returns `true` if a listener is held.
    pub fn is_set(&self) -> bool {
        self.listener.is_some()
    }

    /// Returns `true` if dispatch is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Block dispatch until the returned guard is dropped.
    ///
    /// Nested blocks are safe: each guard restores the blocked flag to the
    /// value it observed.
    pub fn block(&self) -> BlockGuard<'_> {
        let previous = self.blocked.swap(true, Ordering::SeqCst);
        BlockGuard {
            blocked: &self.blocked,
            previous,
        }
    }

    /// Invoke the listener, if one is held and dispatch is not blocked.
    ///
    /// Returns `true` if the listener was invoked.
    pub fn call(&self, invoke: impl FnOnce(&T)) -> bool {
        if self.is_blocked() {
            tracing::trace!(
                target: "horizon_formwork_core::notify",
                "listener slot blocked, skipping dispatch"
            );
            return false;
        }
        match &self.listener {
            Some(listener) => {
                invoke(listener);
                true
            }
            None => false,
        }
    }
}

impl<T: ?Sized> Default for ListenerSlot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// RAII guard returned by [`ListenerSlot::block`].
///
/// Restores the slot's previous blocked state when dropped.
pub struct BlockGuard<'a> {
    blocked: &'a AtomicBool,
    previous: bool,
}

impl Drop for BlockGuard<'_> {
    fn drop(&mut self) {
        self.blocked.store(self.previous, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_empty_slot_does_not_invoke() {
        let slot: ListenerSlot<dyn ResizeListener> = ListenerSlot::empty();
        assert!(!slot.is_set());
        assert!(!slot.call(|l| l.megawidget_resized("x")));
    }

    #[test]
    fn test_closure_listener_invoked() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let listener: Arc<dyn ResizeListener> = Arc::new(move |identifier: &str| {
            seen_clone.lock().push(identifier.to_string());
        });

        let slot = ListenerSlot::new(Some(listener));
        assert!(slot.call(|l| l.megawidget_resized("list1")));
        assert_eq!(*seen.lock(), vec!["list1"]);
    }

    #[test]
    fn test_blocked_slot_skips_dispatch() {
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        let listener: Arc<dyn ResizeListener> = Arc::new(move |_: &str| {
            *count_clone.lock() += 1;
        });

        let slot = ListenerSlot::new(Some(listener));
        {
            let _guard = slot.block();
            assert!(slot.is_blocked());
            assert!(!slot.call(|l| l.megawidget_resized("x")));
        }
        assert!(!slot.is_blocked());
        assert!(slot.call(|l| l.megawidget_resized("x")));
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_nested_blocks_restore_outer() {
        let slot: ListenerSlot<dyn ResizeListener> = ListenerSlot::empty();
        let outer = slot.block();
        {
            let _inner = slot.block();
            assert!(slot.is_blocked());
        }
        // Outer guard still active.
        assert!(slot.is_blocked());
        drop(outer);
        assert!(!slot.is_blocked());
    }

    #[test]
    fn test_state_change_closure() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let listener: Arc<dyn StateChangeListener> =
            Arc::new(move |id: &str, state_id: &str, value: &ParamValue| {
                seen_clone.lock().push((id.to_string(), state_id.to_string(), value.clone()));
            });

        let slot = ListenerSlot::new(Some(listener));
        slot.call(|l| l.megawidget_state_changed("range", "start", &ParamValue::Int(5)));
        assert_eq!(
            *seen.lock(),
            vec![("range".to_string(), "start".to_string(), ParamValue::Int(5))]
        );
    }
}
