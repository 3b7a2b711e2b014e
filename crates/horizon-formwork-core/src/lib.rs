//! Core systems for Horizon Formwork.
//!
//! This crate provides the foundational components of the Horizon Formwork
//! megawidget framework:
//!
//! - **Parameter Values**: The loosely-typed configuration union
//!   ([`ParamValue`]) and the ordered [`ParameterMap`], with JSON interop
//! - **Conversion**: Typed coercion and bounds-checking helpers over raw
//!   values, returning structured [`ValueError`]s
//! - **Errors**: The canonical [`SpecificationError`] and [`PropertyError`]
//!   shapes carried by every validation failure in the framework
//! - **Listeners**: The notification, state-change, and resize listener
//!   contracts with a blockable single-slot dispatcher ([`ListenerSlot`])
//! - **Clock**: An injectable synchronous time provider for megawidgets that
//!   need "current time"
//!
//! # Conversion Example
//!
//! ```
//! use horizon_formwork_core::{convert, ParamValue, ParameterMap};
//!
//! let map = ParameterMap::new().with("width", 3).with("enable", true);
//!
//! let width = convert::optional_i64_at_least(map.get("width"), 1, 1).unwrap();
//! assert_eq!(width, 3);
//!
//! let err = convert::to_bool(map.get("width").unwrap()).unwrap_err();
//! assert_eq!(err.constraint, "must be a boolean");
//! ```
//!
//! # Listener Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_formwork_core::{ListenerSlot, ResizeListener};
//!
//! let listener: Arc<dyn ResizeListener> = Arc::new(|identifier: &str| {
//!     println!("{identifier} grew");
//! });
//! let slot = ListenerSlot::new(Some(listener));
//! slot.call(|l| l.megawidget_resized("available_list"));
//! ```

pub mod clock;
pub mod convert;
pub mod error;
pub mod logging;
pub mod notify;
pub mod value;

pub use clock::{Clock, FixedClock, SystemClock};
pub use convert::{ConvertResult, ValueError};
pub use error::{PropResult, PropertyError, SpecResult, SpecificationError};
pub use notify::{
    BlockGuard, ListenerSlot, NotificationListener, ResizeListener, StateChangeListener,
};
pub use value::{ParamValue, ParameterMap};

// Values, errors, and listeners cross the host boundary; keep them shareable.
static_assertions::assert_impl_all!(ParamValue: Send, Sync, Clone);
static_assertions::assert_impl_all!(ParameterMap: Send, Sync, Clone);
static_assertions::assert_impl_all!(SpecificationError: Send, Sync, std::error::Error);
static_assertions::assert_impl_all!(PropertyError: Send, Sync, std::error::Error);
static_assertions::assert_impl_all!(SystemClock: Send, Sync);
static_assertions::assert_impl_all!(FixedClock: Send, Sync);
