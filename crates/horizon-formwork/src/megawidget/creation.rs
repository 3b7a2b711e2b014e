//! Creation-time collaborator bundle.
//!
//! [`CreationParams`] gathers everything a specifier needs besides its own
//! validated parameters to build a live megawidget. The one required
//! collaborator, the [`ControlBinder`], is a constructor argument; the
//! listeners and the clock are typed options supplied through `with_*`
//! builders, so a missing listener is simply an empty slot rather than an
//! error.

use std::sync::Arc;

use horizon_formwork_core::{
    Clock, NotificationListener, ResizeListener, StateChangeListener, SystemClock,
};

use super::binding::ControlBinder;

/// The collaborators handed to every `create_megawidget` call.
#[derive(Clone)]
pub struct CreationParams {
    binder: Arc<dyn ControlBinder>,
    notification_listener: Option<Arc<dyn NotificationListener>>,
    state_change_listener: Option<Arc<dyn StateChangeListener>>,
    resize_listener: Option<Arc<dyn ResizeListener>>,
    clock: Arc<dyn Clock>,
}

impl CreationParams {
    /// Create a bundle around the required host binder. Listeners default
    /// to absent and the clock to the system clock.
    pub fn new(binder: Arc<dyn ControlBinder>) -> Self {
        Self {
            binder,
            notification_listener: None,
            state_change_listener: None,
            resize_listener: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Attach a notification listener (at most one per megawidget).
    pub fn with_notification_listener(mut self, listener: Arc<dyn NotificationListener>) -> Self {
        self.notification_listener = Some(listener);
        self
    }

    /// Attach a state-change listener (at most one per megawidget).
    pub fn with_state_change_listener(mut self, listener: Arc<dyn StateChangeListener>) -> Self {
        self.state_change_listener = Some(listener);
        self
    }

    /// Attach a resize listener (at most one per megawidget).
    pub fn with_resize_listener(mut self, listener: Arc<dyn ResizeListener>) -> Self {
        self.resize_listener = Some(listener);
        self
    }

    /// Substitute the time provider (deterministic clocks for tests and
    /// simulated hosts).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The host binder.
    pub fn binder(&self) -> &Arc<dyn ControlBinder> {
        &self.binder
    }

    /// The optional notification listener.
    pub fn notification_listener(&self) -> Option<&Arc<dyn NotificationListener>> {
        self.notification_listener.as_ref()
    }

    /// The optional state-change listener.
    pub fn state_change_listener(&self) -> Option<&Arc<dyn StateChangeListener>> {
        self.state_change_listener.as_ref()
    }

    /// The optional resize listener.
    pub fn resize_listener(&self) -> Option<&Arc<dyn ResizeListener>> {
        self.resize_listener.as_ref()
    }

    /// The time provider.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}
