//! The specifier half of the two-phase megawidget model.
//!
//! A **specifier** is an immutable, fully validated description of one
//! megawidget, built from a raw parameter map before any UI exists. All
//! validation happens at construction: a specifier that exists is valid, and
//! invalid input fails construction without leaving a partial object behind.
//!
//! The live half is built later by [`Specifier::create_megawidget`], which
//! binds the description to a host control through the adapter seam in
//! [`crate::megawidget::binding`]. Many megawidgets may share one specifier
//! (it is handed around as `Arc<dyn Specifier>` and never copied).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_formwork::controls::CheckboxSpecifier;
//! use horizon_formwork::megawidget::{CreationParams, DetachedBinder, HostHandle, Megawidget};
//! use horizon_formwork::specifier::Specifier;
//! use horizon_formwork::ParameterMap;
//!
//! let map = ParameterMap::new()
//!     .with("field", "announce")
//!     .with("label", "Announce")
//!     .with("values", true);
//! let spec = Arc::new(CheckboxSpecifier::from_parameters(&map).unwrap());
//!
//! let params = CreationParams::new(Arc::new(DetachedBinder));
//! let megawidget = spec.create_megawidget(HostHandle::detached(), &params).unwrap();
//! assert!(megawidget.is_enabled());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use horizon_formwork_core::SpecResult;

use crate::megawidget::{CreationParams, HostHandle, Megawidget};
use crate::options::{ControlOptions, MenuOptions};

pub mod base;
pub mod capability;
pub mod identifier;
pub mod params;

pub use base::SpecifierBase;
pub use capability::{Capabilities, LineOccupancy};
pub use identifier::{Identifier, SEPARATOR};

/// An immutable, validated megawidget description.
///
/// Implementations are plain data plus the [`create_megawidget`] builder;
/// they carry no toolkit resources and are freely shareable across threads.
///
/// [`create_megawidget`]: Specifier::create_megawidget
pub trait Specifier: Send + Sync + Any {
    /// The common validated state.
    fn base(&self) -> &SpecifierBase;

    /// Control layout options, for control kinds.
    fn control_options(&self) -> Option<&ControlOptions> {
        None
    }

    /// Menu placement options, for menu kinds.
    fn menu_options(&self) -> Option<&MenuOptions> {
        None
    }

    /// Child specifiers, for parent kinds. Ordered; each is independently
    /// validated and control-capable.
    fn children(&self) -> &[Arc<dyn Specifier>] {
        &[]
    }

    /// Build the live megawidget for this description.
    ///
    /// `parent` is an opaque host container handle passed through to the
    /// binder; the framework never inspects it. The megawidget is wired to
    /// the binder and listeners in `creation`, is fully constructed
    /// (children included) before this returns, and starts with the enabled
    /// and editable flags the specifier declares.
    fn create_megawidget(
        self: Arc<Self>,
        parent: HostHandle<'_>,
        creation: &CreationParams,
    ) -> SpecResult<Box<dyn Megawidget>>;

    /// Upcast for concrete-type recovery via [`specifier_cast`].
    fn as_any(&self) -> &dyn Any;

    /// The megawidget identifier.
    fn identifier(&self) -> &Identifier {
        self.base().identifier()
    }

    /// The specifier's type tag.
    fn type_tag(&self) -> &'static str {
        self.base().type_tag()
    }

    /// The kind's capability record.
    fn capabilities(&self) -> Capabilities {
        self.base().capabilities()
    }
}

impl fmt::Debug for dyn Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specifier")
            .field("identifier", &self.identifier().as_str())
            .field("type_tag", &self.type_tag())
            .finish_non_exhaustive()
    }
}

/// Downcast a `dyn Specifier` to a concrete specifier type.
///
/// Returns `None` if the specifier is of a different type.
pub fn specifier_cast<T: Specifier>(specifier: &dyn Specifier) -> Option<&T> {
    specifier.as_any().downcast_ref::<T>()
}
