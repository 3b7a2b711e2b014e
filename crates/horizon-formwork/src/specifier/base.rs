//! Common specifier state and scalar parameter validation.
//!
//! Every concrete specifier embeds a [`SpecifierBase`] by value. The base
//! validates the parameters shared by all kinds (identifier, label, enable
//! flag), retains the original raw map, and offers the typed parameter
//! accessors and error constructors the kind-specific validation builds on.
//!
//! Construction is pure validation plus normalization: a base (and therefore
//! a specifier) is never observable in a partially-valid state.

use horizon_formwork_core::{
    PropertyError, SpecResult, SpecificationError, ValueError, convert, ParamValue, ParameterMap,
};

use super::capability::Capabilities;
use super::identifier::Identifier;
use super::params;

/// The validated state common to every specifier.
#[derive(Debug, Clone)]
pub struct SpecifierBase {
    identifier: Identifier,
    type_tag: &'static str,
    label: String,
    enabled: bool,
    capabilities: Capabilities,
    parameters: ParameterMap,
}

impl SpecifierBase {
    /// Validate the shared parameters and build the base.
    ///
    /// Reads `field` (required, non-empty identifier), `label` (optional
    /// string, default empty), and `enable` (optional boolean, default
    /// `true`). The raw map is retained on the base.
    pub fn new(
        type_tag: &'static str,
        capabilities: Capabilities,
        parameters: &ParameterMap,
    ) -> SpecResult<Self> {
        let raw_identifier = match parameters.get(params::FIELD) {
            None => {
                return Err(SpecificationError::new(
                    "",
                    type_tag,
                    params::FIELD,
                    ParamValue::Null,
                    "a megawidget identifier is required",
                ));
            }
            Some(value) => convert::to_nonempty_string(value)
                .map_err(|e| SpecificationError::from_value_error("", type_tag, params::FIELD, e))?,
        };
        let identifier = Identifier::parse(&raw_identifier).map_err(|e| {
            SpecificationError::from_value_error(&raw_identifier, type_tag, params::FIELD, e)
        })?;

        let label = convert::optional_string(parameters.get(params::LABEL), "").map_err(|e| {
            SpecificationError::from_value_error(identifier.as_str(), type_tag, params::LABEL, e)
        })?;
        let enabled = convert::optional_bool(parameters.get(params::ENABLE), true).map_err(|e| {
            SpecificationError::from_value_error(identifier.as_str(), type_tag, params::ENABLE, e)
        })?;

        tracing::trace!(
            target: "horizon_formwork::specifier",
            identifier = %identifier,
            type_tag,
            "validated specifier base"
        );

        Ok(Self {
            identifier,
            type_tag,
            label,
            enabled,
            capabilities,
            parameters: parameters.clone(),
        })
    }

    /// The megawidget identifier.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The specifier's type tag.
    pub fn type_tag(&self) -> &'static str {
        self.type_tag
    }

    /// The display label (empty if unspecified).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the megawidget starts enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The kind's capability record.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The original raw parameter map.
    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    /// Reject a composite identifier on an inherently single-valued kind.
    pub fn require_scalar_identifier(&self) -> SpecResult<()> {
        if self.identifier.is_composite() {
            return Err(self.error(
                params::FIELD,
                self.identifier.as_str(),
                "this megawidget type holds a single state value and does not \
                 accept a composite (colon-joined) identifier",
            ));
        }
        Ok(())
    }

    /// Require a composite identifier with at least `min_parts` parts.
    pub fn require_composite_identifier(&self, min_parts: usize) -> SpecResult<()> {
        if self.identifier.parts().len() < min_parts {
            return Err(self.error(
                params::FIELD,
                self.identifier.as_str(),
                format!(
                    "this megawidget type requires a composite identifier with \
                     at least {min_parts} colon-joined parts"
                ),
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Typed parameter accessors
    // =========================================================================

    /// Raw access to one parameter.
    pub fn parameter(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.get(name)
    }

    /// An optional boolean parameter.
    pub fn optional_bool(&self, name: &str, default: bool) -> SpecResult<bool> {
        convert::optional_bool(self.parameters.get(name), default)
            .map_err(|e| self.value_error(name, e))
    }

    /// An optional integer parameter.
    pub fn optional_i64(&self, name: &str, default: i64) -> SpecResult<i64> {
        convert::optional_i64(self.parameters.get(name), default)
            .map_err(|e| self.value_error(name, e))
    }

    /// An optional lower-bounded integer parameter.
    pub fn optional_i64_at_least(&self, name: &str, default: i64, minimum: i64) -> SpecResult<i64> {
        convert::optional_i64_at_least(self.parameters.get(name), default, minimum)
            .map_err(|e| self.value_error(name, e))
    }

    /// An optional bounded integer parameter.
    pub fn optional_i64_in(
        &self,
        name: &str,
        default: i64,
        minimum: i64,
        maximum: i64,
    ) -> SpecResult<i64> {
        convert::optional_i64_in(self.parameters.get(name), default, minimum, maximum)
            .map_err(|e| self.value_error(name, e))
    }

    /// An optional string parameter.
    pub fn optional_string(&self, name: &str, default: &str) -> SpecResult<String> {
        convert::optional_string(self.parameters.get(name), default)
            .map_err(|e| self.value_error(name, e))
    }

    // =========================================================================
    // Error constructors
    // =========================================================================

    /// Build a specification error in this specifier's context.
    pub fn error(
        &self,
        parameter: impl Into<String>,
        value: impl Into<ParamValue>,
        reason: impl Into<String>,
    ) -> SpecificationError {
        SpecificationError::new(self.identifier.as_str(), self.type_tag, parameter, value, reason)
    }

    /// Fold a bare conversion error into this specifier's context.
    pub fn value_error(&self, parameter: impl Into<String>, error: ValueError) -> SpecificationError {
        SpecificationError::from_value_error(self.identifier.as_str(), self.type_tag, parameter, error)
    }

    /// Build a runtime property error in this specifier's context.
    pub fn property_error(
        &self,
        property: impl Into<String>,
        value: impl Into<ParamValue>,
        reason: impl Into<String>,
    ) -> PropertyError {
        PropertyError::new(self.identifier.as_str(), self.type_tag, property, value, reason)
    }
}
