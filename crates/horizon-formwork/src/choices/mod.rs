//! The choices validation engine.
//!
//! Every choice-based megawidget kind (combo boxes, check lists, check
//! trees, list builders, menus) is backed by the same structure: a **choice
//! tree** parsed once from the raw `choices` parameter at specifier
//! construction time, then consulted whenever candidate state is validated.
//!
//! Two orthogonal axes distinguish the kinds:
//!
//! - **Flat vs. hierarchical** ([`ChoicePolicy`]): a flat tree is a depth-1
//!   list of scalar leaves and child-less bundles; a hierarchical tree nests
//!   arbitrarily through the reserved `children` key.
//! - **Bounded vs. unbounded**: a bounded kind's state must be a member (or
//!   structural subset) of the tree; an unbounded kind treats its choices as
//!   a mere seed for an open, user-extensible list of strings.
//!
//! Parsing is a recursive-descent builder returning fully-owned immutable
//! values, so no later mutation of the caller's nested maps can reach the
//! validated tree.

use horizon_formwork_core::{ParamValue, PropertyError, SpecificationError};

use crate::specifier::SpecifierBase;

mod subset;
mod tree;

pub use subset::validate_string_list;
pub use tree::{ChoiceNode, ChoicePolicy, ChoiceTree};

/// A choices violation, carrying the offending parameter name (with list
/// indices folded in, e.g. `choices[3].identifier`), the offending value,
/// and the constraint.
///
/// The engine is used both at specifier construction and at runtime state
/// mutation, so the violation converts into either canonical error type.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoicesError {
    /// The offending parameter or property name, indices folded in.
    pub parameter: String,
    /// The offending value.
    pub value: ParamValue,
    /// Human-readable description of the violated constraint.
    pub reason: String,
}

impl ChoicesError {
    /// Create a new choices violation.
    pub fn new(
        parameter: impl Into<String>,
        value: impl Into<ParamValue>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Fold into a construction-time specification error.
    pub fn into_specification(self, base: &SpecifierBase) -> SpecificationError {
        base.error(self.parameter, self.value, self.reason)
    }

    /// Fold into a runtime property error.
    pub fn into_property(self, base: &SpecifierBase) -> PropertyError {
        base.property_error(self.parameter, self.value, self.reason)
    }
}
