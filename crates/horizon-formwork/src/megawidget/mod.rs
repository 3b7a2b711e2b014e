//! The live half of the two-phase megawidget model.
//!
//! A **megawidget** is the mutable runtime object built from a validated
//! specifier. It owns the enabled/editable state machine, identifier-keyed
//! state, and child megawidgets, and drives the host toolkit through the
//! binding seam in [`binding`].
//!
//! # Protocols
//!
//! - **Mutable properties**: every megawidget exposes `enable` and
//!   `editable`; stateful kinds add `values` and kind-specific extras. Bulk
//!   updates through [`Megawidget::set_mutable_properties`] are
//!   all-or-nothing: every entry is validated (in key order) before any is
//!   applied.
//! - **Stateful protocol** ([`StatefulMegawidget`]): `state`/`set_state`
//!   keyed by the specifier's state identifier parts. Programmatic
//!   `set_state` validates, updates, and pushes into the binding but never
//!   fires the external state-change listener; only user-driven entry
//!   points notify.
//! - **Container protocol** ([`ContainerMegawidget`]): parents own ordered
//!   children; parent-level `set_enabled`/`set_editable` propagates to every
//!   child, while later explicit per-child calls win until the next
//!   parent-level call.

use std::any::Any;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, PropResult, convert};

use crate::specifier::{Specifier, params};

pub mod base;
pub mod binding;
pub mod creation;
pub mod state;

pub use base::MegawidgetBase;
pub use binding::{ControlBinder, ControlBinding, DetachedBinder, HostHandle, Usability};
pub use creation::CreationParams;
pub use state::StateBundle;

/// A live, mutable megawidget bound to one specifier and one host binding.
pub trait Megawidget: Any + Send {
    /// The common runtime state.
    fn base(&self) -> &MegawidgetBase;

    /// Mutable access to the common runtime state.
    fn base_mut(&mut self) -> &mut MegawidgetBase;

    /// The originating specifier (shared, never copied).
    fn specifier(&self) -> Arc<dyn Specifier>;

    /// The megawidget identifier.
    fn identifier(&self) -> &str {
        self.base().identifier().as_str()
    }

    /// Whether the megawidget is enabled.
    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    /// Whether the megawidget is editable.
    fn is_editable(&self) -> bool {
        self.base().is_editable()
    }

    /// The combined enabled/editable decision currently in effect.
    fn usability(&self) -> Usability {
        self.base().usability()
    }

    /// Set the enabled flag. Containers override this to propagate to
    /// their children.
    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().set_enabled(enabled);
    }

    /// Set the editable flag. Containers override this to propagate to
    /// their children.
    fn set_editable(&mut self, editable: bool) {
        self.base_mut().set_editable(editable);
    }

    /// The names of this megawidget's mutable properties.
    fn mutable_property_names(&self) -> Vec<&'static str> {
        vec![params::ENABLE, params::EDITABLE]
    }

    /// Read one mutable property.
    fn mutable_property(&self, name: &str) -> PropResult<ParamValue> {
        flag_property(self.base(), name)
    }

    /// Check one mutable property assignment without applying it.
    fn validate_mutable_property(&self, name: &str, value: &ParamValue) -> PropResult<()> {
        validate_flag_property(self.base(), name, value)
    }

    /// Apply one mutable property assignment.
    fn set_mutable_property(&mut self, name: &str, value: &ParamValue) -> PropResult<()> {
        set_flag_property(self, name, value)
    }

    /// Read several mutable properties at once.
    fn mutable_properties(&self, names: &[&str]) -> PropResult<ParameterMap> {
        let mut map = ParameterMap::new();
        for name in names {
            map.insert(*name, self.mutable_property(name)?);
        }
        Ok(map)
    }

    /// Apply a batch of mutable properties atomically.
    ///
    /// Every entry is validated in key order before any is applied; the
    /// first failure is returned and nothing changes.
    fn set_mutable_properties(&mut self, properties: &ParameterMap) -> PropResult<()> {
        for (name, value) in properties.iter() {
            self.validate_mutable_property(name, value)?;
        }
        for (name, value) in properties.iter() {
            self.set_mutable_property(name, value)?;
        }
        Ok(())
    }

    /// The stateful protocol, if this kind owns state.
    fn as_stateful(&self) -> Option<&dyn StatefulMegawidget> {
        None
    }

    /// Mutable access to the stateful protocol.
    fn as_stateful_mut(&mut self) -> Option<&mut dyn StatefulMegawidget> {
        None
    }

    /// The container protocol, if this kind owns children.
    fn as_container(&self) -> Option<&dyn ContainerMegawidget> {
        None
    }

    /// Mutable access to the container protocol.
    fn as_container_mut(&mut self) -> Option<&mut dyn ContainerMegawidget> {
        None
    }

    /// Upcast for concrete-type recovery.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for concrete-type recovery.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The identifier-keyed state protocol of stateful kinds.
pub trait StatefulMegawidget: Megawidget {
    /// The owned state identifiers, in order (one per colon-joined part of
    /// a composite identifier).
    fn state_identifiers(&self) -> Vec<&str>;

    /// Read the state value owned by one identifier.
    fn state(&self, state_identifier: &str) -> PropResult<ParamValue>;

    /// Validate, convert, and apply one state value.
    ///
    /// The value is validated through the owning specifier (for
    /// choice-based kinds, against the choice tree), the internal state is
    /// updated, and the new value is pushed into the host binding. The
    /// external state-change listener is **not** invoked; programmatic
    /// mutation is silent.
    fn set_state(&mut self, state_identifier: &str, value: &ParamValue) -> PropResult<()>;
}

/// The child-ownership protocol of parent kinds.
pub trait ContainerMegawidget: Megawidget {
    /// The number of owned children.
    fn child_count(&self) -> usize;

    /// One child by index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn child(&self, index: usize) -> &dyn Megawidget;

    /// Mutable access to one child by index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn child_mut(&mut self, index: usize) -> &mut dyn Megawidget;

    /// Find a child by identifier.
    fn child_by_identifier(&self, identifier: &str) -> Option<&dyn Megawidget> {
        (0..self.child_count())
            .map(|index| self.child(index))
            .find(|child| child.identifier() == identifier)
    }

    /// Find a child by identifier, mutably.
    fn child_by_identifier_mut(&mut self, identifier: &str) -> Option<&mut dyn Megawidget> {
        let index =
            (0..self.child_count()).find(|&index| self.child(index).identifier() == identifier)?;
        Some(self.child_mut(index))
    }
}

/// Downcast a `dyn Megawidget` to a concrete megawidget type.
pub fn megawidget_cast<T: Megawidget>(megawidget: &dyn Megawidget) -> Option<&T> {
    megawidget.as_any().downcast_ref::<T>()
}

/// Downcast a `dyn Megawidget` to a concrete megawidget type, mutably.
pub fn megawidget_cast_mut<T: Megawidget>(megawidget: &mut dyn Megawidget) -> Option<&mut T> {
    megawidget.as_any_mut().downcast_mut::<T>()
}

// =============================================================================
// Shared property plumbing
// =============================================================================

/// Read the `enable`/`editable` properties common to every kind. Kinds with
/// extra properties fall back to this after matching their own names.
pub fn flag_property(base: &MegawidgetBase, name: &str) -> PropResult<ParamValue> {
    match name {
        params::ENABLE => Ok(ParamValue::Bool(base.is_enabled())),
        params::EDITABLE => Ok(ParamValue::Bool(base.is_editable())),
        _ => Err(base.unknown_property(name)),
    }
}

/// Validate an `enable`/`editable` assignment.
pub fn validate_flag_property(
    base: &MegawidgetBase,
    name: &str,
    value: &ParamValue,
) -> PropResult<()> {
    match name {
        params::ENABLE | params::EDITABLE => {
            convert::to_bool(value)
                .map_err(|e| base.property_error(name, e.value, e.constraint))?;
            Ok(())
        }
        _ => Err(base.unknown_property(name)),
    }
}

/// Apply an `enable`/`editable` assignment through the megawidget's own
/// setters, so container overrides propagate.
pub fn set_flag_property<M: Megawidget + ?Sized>(
    megawidget: &mut M,
    name: &str,
    value: &ParamValue,
) -> PropResult<()> {
    match name {
        params::ENABLE => {
            let enabled = convert::to_bool(value)
                .map_err(|e| megawidget.base().property_error(name, e.value, e.constraint))?;
            megawidget.set_enabled(enabled);
            Ok(())
        }
        params::EDITABLE => {
            let editable = convert::to_bool(value)
                .map_err(|e| megawidget.base().property_error(name, e.value, e.constraint))?;
            megawidget.set_editable(editable);
            Ok(())
        }
        _ => Err(megawidget.base().unknown_property(name)),
    }
}
