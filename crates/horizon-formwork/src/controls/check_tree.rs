//! Hierarchical check tree kind.

use std::any::Any;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, PropResult, SpecResult};

use crate::choices::{ChoicePolicy, ChoiceTree};
use crate::megawidget::{
    self, CreationParams, HostHandle, Megawidget, MegawidgetBase, StateBundle, StatefulMegawidget,
};
use crate::options::ControlOptions;
use crate::specifier::{Capabilities, LineOccupancy, Specifier, SpecifierBase, params};

use super::combo_box::required_choices;

/// Validated description of a hierarchical check tree.
///
/// Bounded over a hierarchical choice tree: the state is a choices-shaped
/// subset of the tree, defaulting to the empty subset.
#[derive(Debug, Clone)]
pub struct CheckTreeSpecifier {
    base: SpecifierBase,
    options: ControlOptions,
    choices: ChoiceTree,
    initial: ParamValue,
    callback_data: Option<ParamValue>,
}

impl CheckTreeSpecifier {
    pub const TYPE_TAG: &'static str = "check_tree";

    /// Validate a raw parameter map into a check tree specifier.
    pub fn from_parameters(parameters: &ParameterMap) -> SpecResult<Self> {
        let base = SpecifierBase::new(
            Self::TYPE_TAG,
            Capabilities::control(LineOccupancy::Multi)
                .with_stateful()
                .with_notifier(),
            parameters,
        )?;
        base.require_scalar_identifier()?;
        let options = ControlOptions::from_parameters(&base)?;
        let choices = required_choices(&base, ChoicePolicy::Hierarchical)?;

        let initial = match base.parameter(params::VALUES) {
            None | Some(ParamValue::Null) => ParamValue::List(Vec::new()),
            Some(raw) => choices
                .validate_subset(params::VALUES, raw)
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

impl Specifier for CheckTreeSpecifier {
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
        let mut megawidget = CheckTreeMegawidget {
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

/// A live check tree.
pub struct CheckTreeMegawidget {
    spec: Arc<CheckTreeSpecifier>,
    base: MegawidgetBase,
    state: StateBundle,
}

impl CheckTreeMegawidget {
    /// Host entry point: the user changed the checked subset.
    ///
    /// No-op while the control is not interactive.
    pub fn user_selected(&mut self, subset: &ParamValue) -> PropResult<()> {
        if !self.base.usability().is_interactive() {
            return Ok(());
        }
        let identifier = self.spec.base.identifier().as_str().to_string();
        let normalized = self
            .spec
            .choices
            .validate_subset(&identifier, subset)
            .map_err(|e| e.into_property(&self.spec.base))?;
        self.state.set(&identifier, normalized.clone());
        self.base.notify_state_changed(&identifier, &normalized);
        self.base.notify_invoked();
        Ok(())
    }
}

impl Megawidget for CheckTreeMegawidget {
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
                    .validate_subset(name, value)
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

impl StatefulMegawidget for CheckTreeMegawidget {
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
            .validate_subset(state_identifier, value)
            .map_err(|e| e.into_property(&self.spec.base))?;
        self.state.set(state_identifier, normalized.clone());
        self.base.push_state(state_identifier, &normalized);
        Ok(())
    }
}
