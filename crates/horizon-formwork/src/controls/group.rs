//! Child-grouping container kind.

use std::any::Any;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, SpecResult, convert};

use crate::factory::SpecifierFactory;
use crate::megawidget::{
    ContainerMegawidget, CreationParams, HostHandle, Megawidget, MegawidgetBase,
};
use crate::options::ControlOptions;
use crate::specifier::{Capabilities, LineOccupancy, Specifier, SpecifierBase, params};

/// Validated description of a titled group of child megawidgets.
///
/// The `fields` parameter is a list of child parameter maps, each built
/// through the factory and required to be control-capable. Any child
/// failure aborts the whole group.
#[derive(Clone)]
pub struct GroupSpecifier {
    base: SpecifierBase,
    options: ControlOptions,
    children: Vec<Arc<dyn Specifier>>,
}

impl GroupSpecifier {
    pub const TYPE_TAG: &'static str = "group";

    /// Validate a raw parameter map into a group specifier, building every
    /// child through `factory`.
    pub fn from_parameters(
        factory: &SpecifierFactory,
        parameters: &ParameterMap,
    ) -> SpecResult<Self> {
        let base = SpecifierBase::new(
            Self::TYPE_TAG,
            Capabilities::control(LineOccupancy::Multi).with_parent(),
            parameters,
        )?;
        base.require_scalar_identifier()?;
        let options = ControlOptions::from_parameters(&base)?;
        let children = child_specifiers(factory, &base, params::FIELDS)?;
        Ok(Self {
            base,
            options,
            children,
        })
    }
}

/// Build the child specifiers named by a required child-list parameter.
pub(super) fn child_specifiers(
    factory: &SpecifierFactory,
    base: &SpecifierBase,
    parameter: &str,
) -> SpecResult<Vec<Arc<dyn Specifier>>> {
    let raw = base.parameter(parameter).ok_or_else(|| {
        base.error(
            parameter,
            ParamValue::Null,
            "a list of child field maps is required",
        )
    })?;
    let elements = convert::to_list(raw).map_err(|e| base.value_error(parameter, e))?;

    let mut children = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let map = element.as_map().ok_or_else(|| {
            base.error(
                format!("{parameter}[{index}]"),
                element.clone(),
                "must be a field parameter map",
            )
        })?;
        children.push(factory.create_control_specifier(map)?);
    }
    Ok(children)
}

impl Specifier for GroupSpecifier {
    fn base(&self) -> &SpecifierBase {
        &self.base
    }

    fn control_options(&self) -> Option<&ControlOptions> {
        Some(&self.options)
    }

    fn children(&self) -> &[Arc<dyn Specifier>] {
        &self.children
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
            None,
            binding,
            creation,
        );
        let mut children = Vec::with_capacity(self.children.len());
        for child in &self.children {
            children.push(child.clone().create_megawidget(parent, creation)?);
        }
        Ok(Box::new(GroupMegawidget {
            spec: self,
            base,
            children,
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A live group of child megawidgets.
pub struct GroupMegawidget {
    spec: Arc<GroupSpecifier>,
    base: MegawidgetBase,
    children: Vec<Box<dyn Megawidget>>,
}

impl Megawidget for GroupMegawidget {
    fn base(&self) -> &MegawidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MegawidgetBase {
        &mut self.base
    }

    fn specifier(&self) -> Arc<dyn Specifier> {
        self.spec.clone()
    }

    // Parent-level flag changes overwrite every child's flag; a later
    // explicit per-child call wins until the next parent-level call.
    fn set_enabled(&mut self, enabled: bool) {
        self.base.set_enabled(enabled);
        for child in &mut self.children {
            child.set_enabled(enabled);
        }
    }

    fn set_editable(&mut self, editable: bool) {
        self.base.set_editable(editable);
        for child in &mut self.children {
            child.set_editable(editable);
        }
    }

    fn as_container(&self) -> Option<&dyn ContainerMegawidget> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn ContainerMegawidget> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ContainerMegawidget for GroupMegawidget {
    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> &dyn Megawidget {
        self.children[index].as_ref()
    }

    fn child_mut(&mut self, index: usize) -> &mut dyn Megawidget {
        self.children[index].as_mut()
    }
}
