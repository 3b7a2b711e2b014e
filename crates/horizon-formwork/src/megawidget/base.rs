//! Megawidget base implementation.
//!
//! Every concrete megawidget embeds a [`MegawidgetBase`] by value. The base
//! owns the enabled/editable state machine, the host binding, the listener
//! slots, and the push/notify plumbing that keeps the silent-programmatic /
//! notified-user-driven asymmetry honest:
//!
//! - Programmatic mutation goes through [`push_state`], which blocks the
//!   state-change slot while the binding is driven, so a toolkit echo can
//!   never fire the external listener.
//! - User-driven change goes through the `notify_*` methods, called by the
//!   concrete kinds from their `user_*` entry points.
//!
//! [`push_state`]: MegawidgetBase::push_state

use horizon_formwork_core::{
    ListenerSlot, NotificationListener, ParamValue, PropertyError, ResizeListener,
    StateChangeListener,
};

use crate::specifier::{Identifier, SpecifierBase};

use super::binding::{ControlBinding, Usability};
use super::creation::CreationParams;

/// The common runtime state of every megawidget.
pub struct MegawidgetBase {
    identifier: Identifier,
    type_tag: &'static str,
    enabled: bool,
    editable: bool,
    callback_data: Option<ParamValue>,
    binding: Box<dyn ControlBinding>,
    notification: ListenerSlot<dyn NotificationListener>,
    state_change: ListenerSlot<dyn StateChangeListener>,
    resize: ListenerSlot<dyn ResizeListener>,
}

impl MegawidgetBase {
    /// Build the base from the owning specifier's common state and the
    /// creation collaborators, and push the initial usability decision.
    ///
    /// `initial_editable` comes from the kind's options (control kinds read
    /// it from [`ControlOptions`], menus directly from the parameter map).
    ///
    /// [`ControlOptions`]: crate::options::ControlOptions
    pub fn new(
        spec: &SpecifierBase,
        initial_editable: bool,
        callback_data: Option<ParamValue>,
        mut binding: Box<dyn ControlBinding>,
        creation: &CreationParams,
    ) -> Self {
        let enabled = spec.is_enabled();
        binding.apply_usability(Usability::from_flags(enabled, initial_editable));
        tracing::debug!(
            target: "horizon_formwork::megawidget",
            identifier = %spec.identifier(),
            type_tag = spec.type_tag(),
            enabled,
            editable = initial_editable,
            "created megawidget"
        );
        Self {
            identifier: spec.identifier().clone(),
            type_tag: spec.type_tag(),
            enabled,
            editable: initial_editable,
            callback_data,
            binding,
            notification: ListenerSlot::new(creation.notification_listener().cloned()),
            state_change: ListenerSlot::new(creation.state_change_listener().cloned()),
            resize: ListenerSlot::new(creation.resize_listener().cloned()),
        }
    }

    /// The megawidget identifier.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The kind's type tag.
    pub fn type_tag(&self) -> &'static str {
        self.type_tag
    }

    // =========================================================================
    // Enabled / editable state machine
    // =========================================================================

    /// Whether the megawidget is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the megawidget is editable.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// The combined decision currently in effect.
    pub fn usability(&self) -> Usability {
        Usability::from_flags(self.enabled, self.editable)
    }

    /// Set the enabled flag, pushing the recombined usability to the
    /// binding if the effective decision changed.
    pub fn set_enabled(&mut self, enabled: bool) {
        let before = self.usability();
        self.enabled = enabled;
        self.push_usability_if_changed(before);
    }

    /// Set the editable flag, pushing the recombined usability to the
    /// binding if the effective decision changed.
    pub fn set_editable(&mut self, editable: bool) {
        let before = self.usability();
        self.editable = editable;
        self.push_usability_if_changed(before);
    }

    fn push_usability_if_changed(&mut self, before: Usability) {
        let after = self.usability();
        if after != before {
            tracing::trace!(
                target: "horizon_formwork::megawidget",
                identifier = %self.identifier,
                ?after,
                "usability changed"
            );
            self.binding.apply_usability(after);
        }
    }

    // =========================================================================
    // Binding pushes (programmatic, silent)
    // =========================================================================

    /// Push a state value into the host binding with the state-change slot
    /// blocked, so an echo from the toolkit cannot fire the listener.
    pub fn push_state(&mut self, state_identifier: &str, value: &ParamValue) {
        let _guard = self.state_change.block();
        self.binding.apply_state(state_identifier, value);
    }

    /// Push a kind-specific property value into the host binding.
    pub fn push_property(&mut self, name: &str, value: &ParamValue) {
        self.binding.apply_property(name, value);
    }

    // =========================================================================
    // Listener dispatch (user-driven)
    // =========================================================================

    /// Notify the notification listener of a user activation, passing the
    /// specifier's callback data through unchanged.
    pub fn notify_invoked(&self) {
        self.notification.call(|listener| {
            listener.megawidget_invoked(self.identifier.as_str(), self.callback_data.as_ref());
        });
    }

    /// Notify the state-change listener of a user-driven state change.
    pub fn notify_state_changed(&self, state_identifier: &str, value: &ParamValue) {
        self.state_change.call(|listener| {
            listener.megawidget_state_changed(self.identifier.as_str(), state_identifier, value);
        });
    }

    /// Notify the resize listener that the preferred size changed.
    pub fn notify_resized(&self) {
        self.resize.call(|listener| {
            listener.megawidget_resized(self.identifier.as_str());
        });
    }

    // =========================================================================
    // Errors
    // =========================================================================

    /// Build a runtime property error in this megawidget's context.
    pub fn property_error(
        &self,
        property: impl Into<String>,
        value: impl Into<ParamValue>,
        reason: impl Into<String>,
    ) -> PropertyError {
        PropertyError::new(self.identifier.as_str(), self.type_tag, property, value, reason)
    }

    /// The canonical "no such mutable property" error.
    pub fn unknown_property(&self, property: &str) -> PropertyError {
        self.property_error(property, ParamValue::Null, "no such mutable property")
    }

    /// The canonical "unknown state identifier" error.
    pub fn unknown_state_identifier(&self, state_identifier: &str) -> PropertyError {
        self.property_error(
            state_identifier,
            ParamValue::Null,
            format!(
                "no state identifier \"{state_identifier}\" on megawidget \"{}\"",
                self.identifier
            ),
        )
    }
}
