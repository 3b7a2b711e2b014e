//! Prelude module for Horizon Formwork.
//!
//! This module re-exports the most commonly used types for convenient
//! importing:
//!
//! ```
//! use horizon_formwork::prelude::*;
//! ```
//!
//! This provides access to:
//! - Parameter values (`ParamValue`, `ParameterMap`) and conversion errors
//! - The specifier side (`Specifier`, `SpecifierFactory`, `Identifier`)
//! - The megawidget side (`Megawidget`, the stateful/container protocols)
//! - The host binding seam (`ControlBinder`, `ControlBinding`, `HostHandle`)
//! - Listener contracts and the injectable clock

// ============================================================================
// Values and Errors
// ============================================================================

pub use horizon_formwork_core::{
    ParamValue, ParameterMap, PropResult, PropertyError, SpecResult, SpecificationError,
};

// ============================================================================
// Specifier Side
// ============================================================================

pub use crate::factory::SpecifierFactory;
pub use crate::options::{ControlOptions, MenuOptions};
pub use crate::specifier::{
    Capabilities, Identifier, LineOccupancy, Specifier, SpecifierBase, specifier_cast,
};

// ============================================================================
// Choices Engine
// ============================================================================

pub use crate::choices::{ChoiceNode, ChoicePolicy, ChoiceTree};

// ============================================================================
// Megawidget Side
// ============================================================================

pub use crate::megawidget::{
    ContainerMegawidget, CreationParams, Megawidget, MegawidgetBase, StateBundle,
    StatefulMegawidget, Usability, megawidget_cast, megawidget_cast_mut,
};

// ============================================================================
// Host Binding Seam
// ============================================================================

pub use crate::megawidget::{ControlBinder, ControlBinding, DetachedBinder, HostHandle};

// ============================================================================
// Concrete Kinds
// ============================================================================

pub use crate::controls::{
    ButtonSpecifier, CheckListSpecifier, CheckTreeSpecifier, CheckboxSpecifier, ComboBoxSpecifier,
    GroupSpecifier, IntegerSpinnerSpecifier, LabelSpecifier, ListBuilderSpecifier, MenuSpecifier,
    TabbedPanelSpecifier, TimeRangeSpecifier,
};

// ============================================================================
// Listeners and Clock
// ============================================================================

pub use horizon_formwork_core::{
    Clock, FixedClock, NotificationListener, ResizeListener, StateChangeListener, SystemClock,
};
