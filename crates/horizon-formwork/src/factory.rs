//! Type-tag to specifier-builder registry.
//!
//! The factory is how raw parameter maps become specifiers without the
//! caller naming concrete types: the map's `type` parameter selects a
//! registered builder. Parent kinds receive the factory back in their
//! builder so child maps inside `fields`/`pages` recurse through the same
//! registry, custom kinds included.
//!
//! # Example
//!
//! ```
//! use horizon_formwork::factory::SpecifierFactory;
//! use horizon_formwork::ParameterMap;
//!
//! let factory = SpecifierFactory::with_standard_kinds();
//! let map = ParameterMap::new()
//!     .with("type", "checkbox")
//!     .with("field", "announce")
//!     .with("label", "Announce");
//! let specifier = factory.create_specifier(&map).unwrap();
//! assert_eq!(specifier.type_tag(), "checkbox");
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, SpecResult, SpecificationError, convert};

use crate::controls::{
    ButtonSpecifier, CheckListSpecifier, CheckTreeSpecifier, CheckboxSpecifier, ComboBoxSpecifier,
    GroupSpecifier, IntegerSpinnerSpecifier, LabelSpecifier, ListBuilderSpecifier, MenuSpecifier,
    TabbedPanelSpecifier, TimeRangeSpecifier,
};
use crate::specifier::{Specifier, params};

/// A registered builder: given the factory (for recursive child
/// construction) and a raw parameter map, produce a validated specifier.
pub type SpecifierBuilder =
    fn(&SpecifierFactory, &ParameterMap) -> SpecResult<Arc<dyn Specifier>>;

/// Maps type tags to specifier builders.
pub struct SpecifierFactory {
    builders: BTreeMap<String, SpecifierBuilder>,
}

impl SpecifierFactory {
    /// An empty factory with no registered kinds.
    pub fn new() -> Self {
        Self {
            builders: BTreeMap::new(),
        }
    }

    /// A factory with every kind in this crate registered.
    pub fn with_standard_kinds() -> Self {
        let mut factory = Self::new();
        factory.register(LabelSpecifier::TYPE_TAG, |_, map| {
            Ok(Arc::new(LabelSpecifier::from_parameters(map)?))
        });
        factory.register(ButtonSpecifier::TYPE_TAG, |_, map| {
            Ok(Arc::new(ButtonSpecifier::from_parameters(map)?))
        });
        factory.register(CheckboxSpecifier::TYPE_TAG, |_, map| {
            Ok(Arc::new(CheckboxSpecifier::from_parameters(map)?))
        });
        factory.register(IntegerSpinnerSpecifier::TYPE_TAG, |_, map| {
            Ok(Arc::new(IntegerSpinnerSpecifier::from_parameters(map)?))
        });
        factory.register(TimeRangeSpecifier::TYPE_TAG, |_, map| {
            Ok(Arc::new(TimeRangeSpecifier::from_parameters(map)?))
        });
        factory.register(ComboBoxSpecifier::TYPE_TAG, |_, map| {
            Ok(Arc::new(ComboBoxSpecifier::from_parameters(map)?))
        });
        factory.register(CheckListSpecifier::TYPE_TAG, |_, map| {
            Ok(Arc::new(CheckListSpecifier::from_parameters(map)?))
        });
        factory.register(CheckTreeSpecifier::TYPE_TAG, |_, map| {
            Ok(Arc::new(CheckTreeSpecifier::from_parameters(map)?))
        });
        factory.register(ListBuilderSpecifier::TYPE_TAG, |_, map| {
            Ok(Arc::new(ListBuilderSpecifier::from_parameters(map)?))
        });
        factory.register(MenuSpecifier::TYPE_TAG, |_, map| {
            Ok(Arc::new(MenuSpecifier::from_parameters(map)?))
        });
        factory.register(GroupSpecifier::TYPE_TAG, |factory, map| {
            Ok(Arc::new(GroupSpecifier::from_parameters(factory, map)?))
        });
        factory.register(TabbedPanelSpecifier::TYPE_TAG, |factory, map| {
            Ok(Arc::new(TabbedPanelSpecifier::from_parameters(factory, map)?))
        });
        factory
    }

    /// Register a builder for a type tag, replacing any previous one.
    pub fn register(&mut self, type_tag: impl Into<String>, builder: SpecifierBuilder) {
        let type_tag = type_tag.into();
        tracing::trace!(
            target: "horizon_formwork::factory",
            %type_tag,
            "registered specifier builder"
        );
        self.builders.insert(type_tag, builder);
    }

    /// The registered type tags, sorted.
    pub fn type_tags(&self) -> Vec<&str> {
        self.builders.keys().map(String::as_str).collect()
    }

    /// Build a specifier from a raw parameter map.
    ///
    /// The map's `type` parameter selects the builder; an absent or
    /// unregistered tag fails with a specification error.
    pub fn create_specifier(&self, parameters: &ParameterMap) -> SpecResult<Arc<dyn Specifier>> {
        let identifier = parameters
            .get(params::FIELD)
            .and_then(ParamValue::as_str)
            .unwrap_or("")
            .to_string();
        let type_tag = match parameters.get(params::TYPE) {
            None => {
                return Err(SpecificationError::new(
                    identifier,
                    "",
                    params::TYPE,
                    ParamValue::Null,
                    "a megawidget type is required",
                ));
            }
            Some(value) => convert::to_nonempty_string(value).map_err(|e| {
                SpecificationError::from_value_error(&identifier, "", params::TYPE, e)
            })?,
        };

        let builder = self.builders.get(&type_tag).ok_or_else(|| {
            SpecificationError::new(
                &identifier,
                "",
                params::TYPE,
                type_tag.as_str(),
                format!("unknown megawidget type \"{type_tag}\""),
            )
        })?;

        tracing::debug!(
            target: "horizon_formwork::factory",
            identifier = %identifier,
            type_tag = %type_tag,
            "building specifier"
        );
        builder(self, parameters)
    }

    /// Build a specifier and require the control capability.
    ///
    /// Parent kinds use this for their children: anything that cannot sit
    /// inside a form (a menu, for instance) fails the parent's
    /// construction.
    pub fn create_control_specifier(
        &self,
        parameters: &ParameterMap,
    ) -> SpecResult<Arc<dyn Specifier>> {
        let specifier = self.create_specifier(parameters)?;
        if !specifier.capabilities().control {
            return Err(SpecificationError::new(
                specifier.identifier().as_str(),
                specifier.type_tag(),
                params::TYPE,
                specifier.type_tag(),
                "this megawidget type cannot be used as an in-form child",
            ));
        }
        Ok(specifier)
    }
}

impl Default for SpecifierFactory {
    fn default() -> Self {
        Self::with_standard_kinds()
    }
}
