//! The host toolkit adapter seam.
//!
//! The framework is toolkit-agnostic: everything a megawidget pushes toward
//! the screen flows through the two narrow traits here, implemented by a
//! host adapter layer outside this crate. The framework never inspects the
//! host's types; it hands the opaque [`HostHandle`] through to the
//! [`ControlBinder`] and drives the returned [`ControlBinding`] with
//! already-decided values.
//!
//! In particular, the combined enabled-and-editable decision is delivered as
//! a single [`Usability`] value, so adapters never re-derive the
//! combination themselves.

use std::any::Any;

use horizon_formwork_core::ParamValue;

use crate::specifier::Specifier;

/// The combined enabled-and-editable decision pushed to bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usability {
    /// Enabled and editable: fully interactive.
    Active,
    /// Enabled but not editable: visible and legible, but read-only.
    ReadOnly,
    /// Not enabled: inert regardless of editability.
    Inert,
}

impl Usability {
    /// Combine the two independent flags into the effective decision.
    pub fn from_flags(enabled: bool, editable: bool) -> Self {
        match (enabled, editable) {
            (true, true) => Usability::Active,
            (true, false) => Usability::ReadOnly,
            (false, _) => Usability::Inert,
        }
    }

    /// Returns `true` if the end user can interact with the control.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Usability::Active)
    }
}

/// An opaque parent-container handle supplied by the host.
///
/// The framework passes it through to [`ControlBinder::bind`] untouched;
/// only the host adapter knows what it really is.
#[derive(Clone, Copy)]
pub struct HostHandle<'a> {
    raw: Option<&'a dyn Any>,
}

impl<'a> HostHandle<'a> {
    /// A handle wrapping a host container reference.
    pub fn new(raw: &'a dyn Any) -> Self {
        Self { raw: Some(raw) }
    }

    /// A handle with no host container (headless hosts and tests).
    pub fn detached() -> Self {
        Self { raw: None }
    }

    /// The raw host reference, if any. Only adapters should downcast this.
    pub fn raw(&self) -> Option<&'a dyn Any> {
        self.raw
    }
}

/// Host factory creating one [`ControlBinding`] per megawidget.
///
/// Called exactly once during `create_megawidget`, before any state or
/// usability push.
pub trait ControlBinder: Send + Sync {
    /// Realize the toolkit control(s) for `specifier` under `parent` and
    /// return the binding the megawidget will drive.
    fn bind(&self, parent: HostHandle<'_>, specifier: &dyn Specifier) -> Box<dyn ControlBinding>;
}

/// The host-side realization of one megawidget.
///
/// Receives pushes from the megawidget; never called re-entrantly. User
/// interaction travels the other way, through the megawidget's `user_*`
/// entry points.
pub trait ControlBinding: Send {
    /// Apply the combined enabled/editable decision.
    fn apply_usability(&mut self, usability: Usability);

    /// Apply a state value to the control(s) owned by `state_identifier`.
    fn apply_state(&mut self, state_identifier: &str, value: &ParamValue);

    /// Apply a kind-specific mutable property (e.g. a spinner's step size).
    fn apply_property(&mut self, name: &str, value: &ParamValue);
}

/// A binder producing no-op bindings, for headless hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedBinder;

impl ControlBinder for DetachedBinder {
    fn bind(&self, _parent: HostHandle<'_>, _specifier: &dyn Specifier) -> Box<dyn ControlBinding> {
        Box::new(DetachedBinding)
    }
}

struct DetachedBinding;

impl ControlBinding for DetachedBinding {
    fn apply_usability(&mut self, _usability: Usability) {}
    fn apply_state(&mut self, _state_identifier: &str, _value: &ParamValue) {}
    fn apply_property(&mut self, _name: &str, _value: &ParamValue) {}
}
