//! Two-state checkbox kind.

use std::any::Any;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, PropResult, SpecResult, convert};

use crate::megawidget::{
    self, CreationParams, HostHandle, Megawidget, MegawidgetBase, StateBundle, StatefulMegawidget,
};
use crate::options::ControlOptions;
use crate::specifier::{Capabilities, LineOccupancy, Specifier, SpecifierBase, params};

/// Validated description of a two-state checkbox.
#[derive(Debug, Clone)]
pub struct CheckboxSpecifier {
    base: SpecifierBase,
    options: ControlOptions,
    initial: bool,
    callback_data: Option<ParamValue>,
}

impl CheckboxSpecifier {
    pub const TYPE_TAG: &'static str = "checkbox";

    /// Validate a raw parameter map into a checkbox specifier.
    ///
    /// `values` is the optional initial state, a boolean defaulting to
    /// `false`.
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
        let initial = base.optional_bool(params::VALUES, false)?;
        let callback_data = base.parameter(params::CALLBACK_DATA).cloned();
        Ok(Self {
            base,
            options,
            initial,
            callback_data,
        })
    }
}

impl Specifier for CheckboxSpecifier {
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
        let initial = ParamValue::Bool(self.initial);
        let state = StateBundle::new(self.base.identifier(), |_, _| initial.clone());
        let mut megawidget = CheckboxMegawidget {
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

/// A live checkbox.
pub struct CheckboxMegawidget {
    spec: Arc<CheckboxSpecifier>,
    base: MegawidgetBase,
    state: StateBundle,
}

impl CheckboxMegawidget {
    /// Whether the box is currently checked.
    pub fn is_checked(&self) -> bool {
        matches!(self.state.values_property(), ParamValue::Bool(true))
    }

    /// Host entry point: the user toggled the box.
    ///
    /// Updates the state, fires the state-change listener once, then the
    /// notification listener. No-op while the control is not interactive.
    pub fn user_toggled(&mut self, checked: bool) {
        if !self.base.usability().is_interactive() {
            return;
        }
        let identifier = self.spec.base.identifier().as_str().to_string();
        let value = ParamValue::Bool(checked);
        self.state.set(&identifier, value.clone());
        self.base.notify_state_changed(&identifier, &value);
        self.base.notify_invoked();
    }
}

impl Megawidget for CheckboxMegawidget {
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
                convert::to_bool(value)
                    .map_err(|e| self.base.property_error(name, e.value, e.constraint))?;
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

impl StatefulMegawidget for CheckboxMegawidget {
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
        let checked = convert::to_bool(value)
            .map_err(|e| self.base.property_error(state_identifier, e.value, e.constraint))?;
        let normalized = ParamValue::Bool(checked);
        self.state.set(state_identifier, normalized.clone());
        self.base.push_state(state_identifier, &normalized);
        Ok(())
    }
}
