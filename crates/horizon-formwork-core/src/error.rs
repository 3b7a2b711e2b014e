//! Error types for Horizon Formwork.
//!
//! Every validation failure in the framework is reported through one of two
//! types, both carrying the same canonical tuple: the owning megawidget
//! identifier, its type tag, the offending parameter or property name, the
//! offending value, and a human-readable constraint description.
//!
//! - [`SpecificationError`] is raised during specifier construction and is
//!   fatal to that specifier (and recursively to any parent being built).
//! - [`PropertyError`] is raised during runtime mutation and is local to the
//!   failed call; the megawidget's prior valid state is preserved.
//!
//! Errors propagate immediately with `?`; the framework never retries and
//! never swallows a validation failure.

use crate::convert::ValueError;
use crate::value::ParamValue;

/// Result type alias for specifier construction.
pub type SpecResult<T> = Result<T, SpecificationError>;

/// Result type alias for runtime property and state mutation.
pub type PropResult<T> = Result<T, PropertyError>;

/// A megawidget specification was invalid.
///
/// Raised while constructing a specifier from a parameter map. No partial
/// specifier is ever returned alongside this error; a parent specifier whose
/// child fails construction aborts entirely.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid specification for megawidget \"{identifier}\" of type {type_tag}: parameter \"{parameter}\" = {value}: {reason}")]
pub struct SpecificationError {
    /// Identifier of the megawidget being specified (best-effort if the
    /// identifier itself was the invalid parameter).
    pub identifier: String,
    /// The specifier's type tag.
    pub type_tag: String,
    /// The offending parameter name, with any list index folded in
    /// (e.g. `choices[3].identifier`).
    pub parameter: String,
    /// The offending value.
    pub value: ParamValue,
    /// Human-readable description of the violated constraint.
    pub reason: String,
}

impl SpecificationError {
    /// Create a new specification error.
    pub fn new(
        identifier: impl Into<String>,
        type_tag: impl Into<String>,
        parameter: impl Into<String>,
        value: impl Into<ParamValue>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            type_tag: type_tag.into(),
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Fold a bare conversion error into a specification error.
    pub fn from_value_error(
        identifier: impl Into<String>,
        type_tag: impl Into<String>,
        parameter: impl Into<String>,
        error: ValueError,
    ) -> Self {
        Self::new(identifier, type_tag, parameter, error.value, error.constraint)
    }
}

/// A runtime mutation of a megawidget property or state value failed.
///
/// Raised by `set_state`, `set_mutable_property`, and their bulk variants.
/// The failed call leaves the megawidget unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid mutation of megawidget \"{identifier}\" of type {type_tag}: property \"{property}\" = {value}: {reason}")]
pub struct PropertyError {
    /// Identifier of the megawidget being mutated.
    pub identifier: String,
    /// The megawidget's type tag.
    pub type_tag: String,
    /// The offending property name (or state identifier).
    pub property: String,
    /// The offending value.
    pub value: ParamValue,
    /// Human-readable description of the violated constraint.
    pub reason: String,
}

impl PropertyError {
    /// Create a new property error.
    pub fn new(
        identifier: impl Into<String>,
        type_tag: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<ParamValue>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            type_tag: type_tag.into(),
            property: property.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Fold a bare conversion error into a property error.
    pub fn from_value_error(
        identifier: impl Into<String>,
        type_tag: impl Into<String>,
        property: impl Into<String>,
        error: ValueError,
    ) -> Self {
        Self::new(identifier, type_tag, property, error.value, error.constraint)
    }
}
