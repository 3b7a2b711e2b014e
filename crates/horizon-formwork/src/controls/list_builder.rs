//! Open list builder kind.
//!
//! The one unbounded choice-based kind: the `choices` parameter only seeds
//! the *available* list, and any novel string assigned to the state joins
//! that list implicitly. Because growth changes the control's preferred
//! size, the resize listener fires whenever the available list gains
//! entries, whether the growth was user-driven or programmatic.

use std::any::Any;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, PropResult, SpecResult};

use crate::choices::validate_string_list;
use crate::megawidget::{
    self, CreationParams, HostHandle, Megawidget, MegawidgetBase, StateBundle, StatefulMegawidget,
};
use crate::options::ControlOptions;
use crate::specifier::{Capabilities, LineOccupancy, Specifier, SpecifierBase, params};

/// Validated description of an open list builder.
#[derive(Debug, Clone)]
pub struct ListBuilderSpecifier {
    base: SpecifierBase,
    options: ControlOptions,
    seed: Vec<String>,
    initial: Vec<String>,
    callback_data: Option<ParamValue>,
}

impl ListBuilderSpecifier {
    pub const TYPE_TAG: &'static str = "list_builder";

    /// Validate a raw parameter map into a list builder specifier.
    ///
    /// `choices` is an optional seed (a string or list of distinct strings,
    /// defaulting to empty); `values` is the optional initial selection in
    /// the same shape.
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

        let seed = match base.parameter(params::CHOICES) {
            None | Some(ParamValue::Null) => Vec::new(),
            Some(raw) => validate_string_list(params::CHOICES, raw)
                .map_err(|e| e.into_specification(&base))?,
        };
        let initial = match base.parameter(params::VALUES) {
            None | Some(ParamValue::Null) => Vec::new(),
            Some(raw) => validate_string_list(params::VALUES, raw)
                .map_err(|e| e.into_specification(&base))?,
        };
        let callback_data = base.parameter(params::CALLBACK_DATA).cloned();

        Ok(Self {
            base,
            options,
            seed,
            initial,
            callback_data,
        })
    }

    /// The seeded available entries.
    pub fn seed(&self) -> &[String] {
        &self.seed
    }
}

impl Specifier for ListBuilderSpecifier {
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
        let initial = ParamValue::List(
            self.initial.iter().map(|s| ParamValue::from(s.as_str())).collect(),
        );
        let state = StateBundle::new(self.base.identifier(), |_, _| initial.clone());

        let mut available = self.seed.clone();
        for entry in &self.initial {
            if !available.contains(entry) {
                available.push(entry.clone());
            }
        }

        let mut megawidget = ListBuilderMegawidget {
            spec: self,
            base,
            state,
            available,
        };
        let identifier = megawidget.spec.base.identifier().as_str().to_string();
        megawidget.base.push_state(&identifier, &initial);
        Ok(Box::new(megawidget))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A live list builder.
pub struct ListBuilderMegawidget {
    spec: Arc<ListBuilderSpecifier>,
    base: MegawidgetBase,
    state: StateBundle,
    available: Vec<String>,
}

impl ListBuilderMegawidget {
    /// The available entries: the seed plus everything ever selected.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Fold novel entries into the available list, firing the resize
    /// listener when the list grows.
    fn absorb(&mut self, entries: &[String]) {
        let before = self.available.len();
        for entry in entries {
            if !self.available.contains(entry) {
                self.available.push(entry.clone());
            }
        }
        if self.available.len() > before {
            tracing::trace!(
                target: "horizon_formwork::megawidget",
                identifier = self.base.identifier().as_str(),
                grown_to = self.available.len(),
                "available list grew"
            );
            self.base.notify_resized();
        }
    }

    fn apply(&mut self, state_identifier: &str, entries: Vec<String>) -> ParamValue {
        let normalized = ParamValue::List(
            entries.iter().map(|s| ParamValue::from(s.as_str())).collect(),
        );
        self.state.set(state_identifier, normalized.clone());
        self.absorb(&entries);
        normalized
    }

    /// Host entry point: the user rebuilt the selected list.
    ///
    /// No-op while the control is not interactive.
    pub fn user_selected(&mut self, selection: &ParamValue) -> PropResult<()> {
        if !self.base.usability().is_interactive() {
            return Ok(());
        }
        let identifier = self.spec.base.identifier().as_str().to_string();
        let entries = validate_string_list(&identifier, selection)
            .map_err(|e| e.into_property(&self.spec.base))?;
        let normalized = self.apply(&identifier, entries);
        self.base.notify_state_changed(&identifier, &normalized);
        self.base.notify_invoked();
        Ok(())
    }
}

impl Megawidget for ListBuilderMegawidget {
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
                validate_string_list(name, value)
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

impl StatefulMegawidget for ListBuilderMegawidget {
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
        let entries = validate_string_list(state_identifier, value)
            .map_err(|e| e.into_property(&self.spec.base))?;
        let normalized = self.apply(state_identifier, entries);
        self.base.push_state(state_identifier, &normalized);
        Ok(())
    }
}
