//! Cascading menu kind.
//!
//! Menus are the one non-control kind: they render on the host's menu bar
//! (or a parent menu) rather than inside the form, so they carry
//! [`MenuOptions`] instead of [`ControlOptions`]. Their state mirrors the
//! check tree: a subset of a hierarchical choice tree marking the checked
//! menu entries.
//!
//! [`ControlOptions`]: crate::options::ControlOptions

use std::any::Any;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, PropResult, SpecResult};

use crate::choices::{ChoicePolicy, ChoiceTree};
use crate::megawidget::{
    self, CreationParams, HostHandle, Megawidget, MegawidgetBase, StateBundle, StatefulMegawidget,
};
use crate::options::MenuOptions;
use crate::specifier::{Capabilities, Specifier, SpecifierBase, params};

use super::combo_box::required_choices;

/// Validated description of a cascading menu.
#[derive(Debug, Clone)]
pub struct MenuSpecifier {
    base: SpecifierBase,
    options: MenuOptions,
    editable: bool,
    choices: ChoiceTree,
    initial: ParamValue,
    callback_data: Option<ParamValue>,
}

impl MenuSpecifier {
    pub const TYPE_TAG: &'static str = "menu";

    /// Validate a raw parameter map into a menu specifier.
    pub fn from_parameters(parameters: &ParameterMap) -> SpecResult<Self> {
        let base = SpecifierBase::new(
            Self::TYPE_TAG,
            Capabilities::menu().with_stateful().with_notifier(),
            parameters,
        )?;
        base.require_scalar_identifier()?;
        let options = MenuOptions::from_parameters(&base)?;
        let editable = base.optional_bool(params::EDITABLE, true)?;
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
            editable,
            choices,
            initial,
            callback_data,
        })
    }

    /// The validated choice tree backing the menu entries.
    pub fn choices(&self) -> &ChoiceTree {
        &self.choices
    }
}

impl Specifier for MenuSpecifier {
    fn base(&self) -> &SpecifierBase {
        &self.base
    }

    fn menu_options(&self) -> Option<&MenuOptions> {
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
            self.editable,
            self.callback_data.clone(),
            binding,
            creation,
        );
        let initial = self.initial.clone();
        let state = StateBundle::new(self.base.identifier(), |_, _| initial.clone());
        let mut megawidget = MenuMegawidget {
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

/// A live menu.
pub struct MenuMegawidget {
    spec: Arc<MenuSpecifier>,
    base: MegawidgetBase,
    state: StateBundle,
}

impl MenuMegawidget {
    /// Host entry point: the user toggled the checked entries.
    ///
    /// No-op while the menu is not interactive.
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

    /// Host entry point: the user invoked the menu itself.
    pub fn user_activated(&self) {
        if self.base.is_enabled() {
            self.base.notify_invoked();
        }
    }
}

impl Megawidget for MenuMegawidget {
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

impl StatefulMegawidget for MenuMegawidget {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::megawidget::DetachedBinder;

    fn creation() -> CreationParams {
        CreationParams::new(Arc::new(DetachedBinder))
    }

    fn view_menu_map() -> ParameterMap {
        let mut layers = ParameterMap::new();
        layers.insert("name", "layers");
        layers.insert(
            "children",
            ParamValue::List(vec![ParamValue::from("grid"), ParamValue::from("legend")]),
        );
        ParameterMap::new()
            .with("field", "view")
            .with("on_parent_menu", true)
            .with(
                "choices",
                ParamValue::List(vec![ParamValue::Map(layers), ParamValue::from("status_bar")]),
            )
    }

    #[test]
    fn test_menu_capabilities_and_options() {
        let spec = MenuSpecifier::from_parameters(&view_menu_map()).unwrap();
        let caps = spec.base().capabilities();
        assert!(caps.menu && caps.stateful && caps.notifier);
        assert!(!caps.control);
        assert!(caps.occupancy.is_none());
        assert!(spec.menu_options().unwrap().on_parent_menu);
    }

    #[test]
    fn test_menu_state_is_subset() {
        let spec = Arc::new(MenuSpecifier::from_parameters(&view_menu_map()).unwrap());
        let mut megawidget = spec.create_megawidget(HostHandle::detached(), &creation()).unwrap();
        let stateful = megawidget.as_stateful_mut().unwrap();

        let subset = ParamValue::List(vec![ParamValue::from("status_bar")]);
        stateful.set_state("view", &subset).unwrap();
        assert_eq!(stateful.state("view").unwrap(), subset);

        let err = stateful
            .set_state("view", &ParamValue::List(vec![ParamValue::from("toolbar")]))
            .unwrap_err();
        assert_eq!(err.reason, "must be one of [layers, status_bar]");
    }
}
