//! Horizon Formwork: a specification-driven megawidget framework.
//!
//! Formwork separates *describing* a UI control from *being* one. A raw
//! [`ParameterMap`] (often parsed from JSON) is validated once into an
//! immutable [`Specifier`]; the specifier then builds any number of live
//! [`Megawidget`]s, each bound to a host toolkit through the narrow
//! [`ControlBinder`]/[`ControlBinding`] adapter seam. The framework owns the
//! validation, state, and notification protocols; the host owns pixels.
//!
//! - [`specifier`] — the immutable description half: identifiers,
//!   capability records, the validated parameter base
//! - [`choices`] — the shared choice-tree parsing and membership engine
//!   behind every choice-based kind
//! - [`megawidget`] — the live half: the enabled/editable state machine,
//!   the stateful and container protocols, the binding seam
//! - [`controls`] — the twelve concrete kinds, from `label` to
//!   `tabbed_panel`
//! - [`factory`] — the type-tag registry turning parameter maps into
//!   specifiers, recursively for containers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_formwork::factory::SpecifierFactory;
//! use horizon_formwork::megawidget::{CreationParams, DetachedBinder, HostHandle, Megawidget};
//! use horizon_formwork::specifier::Specifier;
//! use horizon_formwork::{ParamValue, ParameterMap};
//!
//! let factory = SpecifierFactory::with_standard_kinds();
//! let map = ParameterMap::from_json_str(
//!     r#"{
//!         "type": "combo_box",
//!         "field": "severity",
//!         "label": "Severity",
//!         "choices": ["low", "medium", "high"]
//!     }"#,
//! ).unwrap();
//! let specifier = factory.create_specifier(&map).unwrap();
//!
//! let creation = CreationParams::new(Arc::new(DetachedBinder));
//! let mut megawidget = specifier
//!     .create_megawidget(HostHandle::detached(), &creation)
//!     .unwrap();
//! assert_eq!(
//!     megawidget.mutable_property("values").unwrap(),
//!     ParamValue::String("low".into())
//! );
//!
//! let stateful = megawidget.as_stateful_mut().unwrap();
//! stateful.set_state("severity", &ParamValue::String("high".into())).unwrap();
//! ```
//!
//! [`Specifier`]: specifier::Specifier
//! [`Megawidget`]: megawidget::Megawidget
//! [`ControlBinder`]: megawidget::ControlBinder
//! [`ControlBinding`]: megawidget::ControlBinding

pub mod choices;
pub mod controls;
pub mod factory;
pub mod megawidget;
pub mod options;
pub mod prelude;
pub mod specifier;

// The value, error, listener, and clock foundations live in the core crate;
// re-export them so hosts depend on one crate.
pub use horizon_formwork_core::{
    BlockGuard, Clock, ConvertResult, FixedClock, ListenerSlot, NotificationListener, ParamValue,
    ParameterMap, PropResult, PropertyError, ResizeListener, SpecResult, SpecificationError,
    StateChangeListener, SystemClock, ValueError, convert,
};

// Specifiers are shared across threads; bindings stay on the UI thread.
static_assertions::assert_impl_all!(factory::SpecifierFactory: Send, Sync);
static_assertions::assert_impl_all!(megawidget::CreationParams: Send, Sync, Clone);
static_assertions::assert_impl_all!(specifier::Identifier: Send, Sync, Clone);
