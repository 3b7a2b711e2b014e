//! Single-selection combo box kind.

use std::any::Any;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, PropResult, SpecResult};

use crate::choices::{ChoicePolicy, ChoiceTree};
use crate::megawidget::{
    self, CreationParams, HostHandle, Megawidget, MegawidgetBase, StateBundle, StatefulMegawidget,
};
use crate::options::ControlOptions;
use crate::specifier::{Capabilities, LineOccupancy, Specifier, SpecifierBase, params};

/// Validated description of a single-selection combo box.
///
/// Bounded over a flat choice tree: the state is always the value of exactly
/// one choice, defaulting to the first.
#[derive(Debug, Clone)]
pub struct ComboBoxSpecifier {
    base: SpecifierBase,
    options: ControlOptions,
    choices: ChoiceTree,
    initial: ParamValue,
    callback_data: Option<ParamValue>,
}

impl ComboBoxSpecifier {
    pub const TYPE_TAG: &'static str = "combo_box";

    /// Validate a raw parameter map into a combo box specifier.
    pub fn from_parameters(parameters: &ParameterMap) -> SpecResult<Self> {
        let base = SpecifierBase::new(
            Self::TYPE_TAG,
            Capabilities::control(LineOccupancy::Single)
                .with_stateful()
                .with_notifier(),
            parameters,
        )?;
        base.require_scalar_identifier()?;
        let options = ControlOptions::from_parameters(&base)?;
        let choices = required_choices(&base, ChoicePolicy::Flat)?;

        let initial = match base.parameter(params::VALUES) {
            None | Some(ParamValue::Null) => choices.nodes()[0].state_value(),
            Some(raw) => choices
                .validate_single(params::VALUES, raw)
                .map_err(|e| e.into_specification(&base))?,
        };
        let callback_data = base.parameter(params::CALLBACK_DATA).cloned();

        Ok(Self {
            base,
            options,
            choices,
            initial,
            callback_data,
        })
    }

    /// The validated choice tree.
    pub fn choices(&self) -> &ChoiceTree {
        &self.choices
    }
}

/// Parse a required, non-empty `choices` parameter.
pub(super) fn required_choices(
    base: &SpecifierBase,
    policy: ChoicePolicy,
) -> SpecResult<ChoiceTree> {
    let raw = base.parameter(params::CHOICES).ok_or_else(|| {
        base.error(
            params::CHOICES,
            ParamValue::Null,
            "a non-empty list of choices is required",
        )
    })?;
    let tree = ChoiceTree::from_parameter(params::CHOICES, raw, policy)
        .map_err(|e| e.into_specification(base))?;
    if tree.is_empty() {
        return Err(base.error(
            params::CHOICES,
            raw.clone(),
            "a non-empty list of choices is required",
        ));
    }
    Ok(tree)
}

impl Specifier for ComboBoxSpecifier {
    fn base(&self) -> &SpecifierBase {
        &self.base
    }

    fn control_options(&self) -> Option<&ControlOptions> {
        Some(&self.options)
    }

    fn create_megawidget(
        self: Arc<Self>,
        parent: HostHandle<'_>,
        creation: &CreationParams,
    ) -> SpecResult<Box<dyn Megawidget>> {
        let binding = creation.binder().bind(parent, self.as_ref());
        let base = MegawidgetBase::new(
            &self.base,
            self.options.editable,
            self.callback_data.clone(),
            binding,
            creation,
        );
        let initial = self.initial.clone();
        let state = StateBundle::new(self.base.identifier(), |_, _| initial.clone());
        let mut megawidget = ComboBoxMegawidget {
            spec: self,
            base,
            state,
        };
        let identifier = megawidget.spec.base.identifier().as_str().to_string();
        megawidget.base.push_state(&identifier, &initial);
        Ok(Box::new(megawidget))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A live combo box.
pub struct ComboBoxMegawidget {
    spec: Arc<ComboBoxSpecifier>,
    base: MegawidgetBase,
    state: StateBundle,
}

impl ComboBoxMegawidget {
    /// Host entry point: the user picked a choice.
    ///
    /// No-op while the control is not interactive.
    pub fn user_selected(&mut self, value: &ParamValue) -> PropResult<()> {
        if !self.base.usability().is_interactive() {
            return Ok(());
        }
        let identifier = self.spec.base.identifier().as_str().to_string();
        let normalized = self
            .spec
            .choices
            .validate_single(&identifier, value)
            .map_err(|e| e.into_property(&self.spec.base))?;
        self.state.set(&identifier, normalized.clone());
        self.base.notify_state_changed(&identifier, &normalized);
        self.base.notify_invoked();
        Ok(())
    }
}

impl Megawidget for ComboBoxMegawidget {
    fn base(&self) -> &MegawidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MegawidgetBase {
        &mut self.base
    }

    fn specifier(&self) -> Arc<dyn Specifier> {
        self.spec.clone()
    }

    fn mutable_property_names(&self) -> Vec<&'static str> {
        vec![params::ENABLE, params::EDITABLE, params::VALUES]
    }

    fn mutable_property(&self, name: &str) -> PropResult<ParamValue> {
        match name {
            params::VALUES => Ok(self.state.values_property()),
            _ => megawidget::flag_property(&self.base, name),
        }
    }

    fn validate_mutable_property(&self, name: &str, value: &ParamValue) -> PropResult<()> {
        match name {
            params::VALUES => {
                self.spec
                    .choices
                    .validate_single(name, value)
                    .map_err(|e| e.into_property(&self.spec.base))?;
                Ok(())
            }
            _ => megawidget::validate_flag_property(&self.base, name, value),
        }
    }

    fn set_mutable_property(&mut self, name: &str, value: &ParamValue) -> PropResult<()> {
        match name {
            params::VALUES => {
                let identifier = self.spec.base.identifier().as_str().to_string();
                self.set_state(&identifier, value)
            }
            _ => megawidget::set_flag_property(self, name, value),
        }
    }

    fn as_stateful(&self) -> Option<&dyn StatefulMegawidget> {
        Some(self)
    }

    fn as_stateful_mut(&mut self) -> Option<&mut dyn StatefulMegawidget> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl StatefulMegawidget for ComboBoxMegawidget {
    fn state_identifiers(&self) -> Vec<&str> {
        self.state.identifiers().collect()
    }

    fn state(&self, state_identifier: &str) -> PropResult<ParamValue> {
        self.state
            .get(state_identifier)
            .cloned()
            .ok_or_else(|| self.base.unknown_state_identifier(state_identifier))
    }

    fn set_state(&mut self, state_identifier: &str, value: &ParamValue) -> PropResult<()> {
        if self.state.get(state_identifier).is_none() {
            return Err(self.base.unknown_state_identifier(state_identifier));
        }
        let normalized = self
            .spec
            .choices
            .validate_single(state_identifier, value)
            .map_err(|e| e.into_property(&self.spec.base))?;
        self.state.set(state_identifier, normalized.clone());
        self.base.push_state(state_identifier, &normalized);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::megawidget::DetachedBinder;

    fn creation() -> CreationParams {
        CreationParams::new(Arc::new(DetachedBinder))
    }

    fn severity_map() -> ParameterMap {
        ParameterMap::new().with("field", "severity").with(
            "choices",
            vec![
                ParamValue::from("low"),
                ParamValue::from("medium"),
                ParamValue::from("high"),
            ],
        )
    }

    #[test]
    fn test_default_is_first_choice() {
        let spec = Arc::new(ComboBoxSpecifier::from_parameters(&severity_map()).unwrap());
        let megawidget = spec.create_megawidget(HostHandle::detached(), &creation()).unwrap();
        assert_eq!(
            megawidget.mutable_property("values").unwrap(),
            ParamValue::String("low".into())
        );
    }

    #[test]
    fn test_missing_choices_rejected() {
        let map = ParameterMap::new().with("field", "severity");
        let err = ComboBoxSpecifier::from_parameters(&map).unwrap_err();
        assert_eq!(err.parameter, "choices");
        assert!(err.reason.contains("non-empty list of choices"));
    }

    #[test]
    fn test_membership_error_lists_identifiers() {
        let map = severity_map().with("values", "extreme");
        let err = ComboBoxSpecifier::from_parameters(&map).unwrap_err();
        assert_eq!(err.reason, "must be one of [low, medium, high]");
    }

    #[test]
    fn test_set_state_normalizes_to_node_value() {
        let map = severity_map();
        let mut megawidget = Arc::new(ComboBoxSpecifier::from_parameters(&map).unwrap())
            .create_megawidget(HostHandle::detached(), &creation())
            .unwrap();
        let stateful = megawidget.as_stateful_mut().unwrap();
        stateful
            .set_state("severity", &ParamValue::String("high".into()))
            .unwrap();
        assert_eq!(
            stateful.state("severity").unwrap(),
            ParamValue::String("high".into())
        );
        assert!(stateful
            .set_state("severity", &ParamValue::String("extreme".into()))
            .is_err());
    }

    #[test]
    fn test_integer_leaves_match_canonically() {
        let map = ParameterMap::new().with("field", "count").with(
            "choices",
            vec![ParamValue::Int(1), ParamValue::Int(2), ParamValue::Int(3)],
        );
        let mut megawidget = Arc::new(ComboBoxSpecifier::from_parameters(&map).unwrap())
            .create_megawidget(HostHandle::detached(), &creation())
            .unwrap();
        let stateful = megawidget.as_stateful_mut().unwrap();
        // A string spelling of an integer leaf matches through the canonical
        // form and normalizes back to the node's own value.
        stateful
            .set_state("count", &ParamValue::String("2".into()))
            .unwrap();
        assert_eq!(stateful.state("count").unwrap(), ParamValue::Int(2));
    }
}
