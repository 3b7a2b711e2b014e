//! Tabbed panel container kind.
//!
//! The `pages` parameter is a list of page maps, each carrying a `page`
//! display name and its own `fields` list. Children are stored flat, in
//! page order, with each page owning a contiguous index range, so the
//! container protocol stays a plain index walk.

use std::any::Any;
use std::ops::Range;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, SpecResult, convert};

use crate::factory::SpecifierFactory;
use crate::megawidget::{
    ContainerMegawidget, CreationParams, HostHandle, Megawidget, MegawidgetBase,
};
use crate::options::ControlOptions;
use crate::specifier::{Capabilities, LineOccupancy, Specifier, SpecifierBase, params};

/// One named page of a tabbed panel.
#[derive(Debug, Clone)]
struct Page {
    name: String,
    children: Range<usize>,
}

/// Validated description of a tabbed panel.
#[derive(Debug, Clone)]
pub struct TabbedPanelSpecifier {
    base: SpecifierBase,
    options: ControlOptions,
    pages: Vec<Page>,
    children: Vec<Arc<dyn Specifier>>,
}

impl TabbedPanelSpecifier {
    pub const TYPE_TAG: &'static str = "tabbed_panel";

    /// Validate a raw parameter map into a tabbed panel specifier, building
    /// every page's children through `factory`.
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

        let raw = base.parameter(params::PAGES).ok_or_else(|| {
            base.error(
                params::PAGES,
                ParamValue::Null,
                "a non-empty list of page maps is required",
            )
        })?;
        let elements = convert::to_list(raw).map_err(|e| base.value_error(params::PAGES, e))?;
        if elements.is_empty() {
            return Err(base.error(
                params::PAGES,
                raw.clone(),
                "a non-empty list of page maps is required",
            ));
        }

        let mut pages = Vec::with_capacity(elements.len());
        let mut children: Vec<Arc<dyn Specifier>> = Vec::new();
        for (index, element) in elements.iter().enumerate() {
            let page_parameter = format!("{}[{index}]", params::PAGES);
            let map = element.as_map().ok_or_else(|| {
                base.error(&page_parameter, element.clone(), "must be a page map")
            })?;

            let name = match map.get(params::PAGE) {
                None => {
                    return Err(base.error(
                        format!("{page_parameter}.{}", params::PAGE),
                        ParamValue::Null,
                        "a page name is required",
                    ));
                }
                Some(value) => convert::to_nonempty_string(value).map_err(|e| {
                    base.value_error(format!("{page_parameter}.{}", params::PAGE), e)
                })?,
            };
            if pages.iter().any(|page: &Page| page.name == name) {
                return Err(base.error(
                    format!("{page_parameter}.{}", params::PAGE),
                    name.as_str(),
                    format!("page \"{name}\" appears more than once"),
                ));
            }

            let fields = map.get(params::FIELDS).ok_or_else(|| {
                base.error(
                    format!("{page_parameter}.{}", params::FIELDS),
                    ParamValue::Null,
                    "a list of child field maps is required",
                )
            })?;
            let field_maps = convert::to_list(fields).map_err(|e| {
                base.value_error(format!("{page_parameter}.{}", params::FIELDS), e)
            })?;

            let start = children.len();
            for (field_index, field) in field_maps.iter().enumerate() {
                let field_map = field.as_map().ok_or_else(|| {
                    base.error(
                        format!("{page_parameter}.{}[{field_index}]", params::FIELDS),
                        field.clone(),
                        "must be a field parameter map",
                    )
                })?;
                children.push(factory.create_control_specifier(field_map)?);
            }
            pages.push(Page {
                name,
                children: start..children.len(),
            });
        }

        Ok(Self {
            base,
            options,
            pages,
            children,
        })
    }

    /// The page names, in order.
    pub fn page_names(&self) -> Vec<&str> {
        self.pages.iter().map(|page| page.name.as_str()).collect()
    }

    /// The child index range owned by the named page.
    pub fn page_children(&self, name: &str) -> Option<Range<usize>> {
        self.pages
            .iter()
            .find(|page| page.name == name)
            .map(|page| page.children.clone())
    }
}

impl Specifier for TabbedPanelSpecifier {
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
        Ok(Box::new(TabbedPanelMegawidget {
            spec: self,
            base,
            children,
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A live tabbed panel.
pub struct TabbedPanelMegawidget {
    spec: Arc<TabbedPanelSpecifier>,
    base: MegawidgetBase,
    children: Vec<Box<dyn Megawidget>>,
}

impl TabbedPanelMegawidget {
    /// The page names, in order.
    pub fn page_names(&self) -> Vec<&str> {
        self.spec.page_names()
    }

    /// The child index range owned by the named page.
    pub fn page_children(&self, name: &str) -> Option<Range<usize>> {
        self.spec.page_children(name)
    }
}

impl Megawidget for TabbedPanelMegawidget {
    fn base(&self) -> &MegawidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MegawidgetBase {
        &mut self.base
    }

    fn specifier(&self) -> Arc<dyn Specifier> {
        self.spec.clone()
    }

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

impl ContainerMegawidget for TabbedPanelMegawidget {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::megawidget::{DetachedBinder, megawidget_cast};

    fn creation() -> CreationParams {
        CreationParams::new(Arc::new(DetachedBinder))
    }

    fn panel_map() -> ParameterMap {
        let child = |field: &str| {
            ParamValue::Map(
                ParameterMap::new()
                    .with("type", "checkbox")
                    .with("field", field),
            )
        };
        let page = |name: &str, fields: Vec<ParamValue>| {
            ParamValue::Map(
                ParameterMap::new()
                    .with("page", name)
                    .with("fields", fields),
            )
        };
        ParameterMap::new()
            .with("field", "settings")
            .with(
                "pages",
                vec![
                    page("General", vec![child("a"), child("b")]),
                    page("Advanced", vec![child("c")]),
                ],
            )
    }

    #[test]
    fn test_pages_own_contiguous_ranges() {
        let factory = SpecifierFactory::with_standard_kinds();
        let spec = TabbedPanelSpecifier::from_parameters(&factory, &panel_map()).unwrap();
        assert_eq!(spec.page_names(), ["General", "Advanced"]);
        assert_eq!(spec.page_children("General"), Some(0..2));
        assert_eq!(spec.page_children("Advanced"), Some(2..3));
        assert_eq!(spec.children().len(), 3);
    }

    #[test]
    fn test_duplicate_page_name_rejected() {
        let factory = SpecifierFactory::with_standard_kinds();
        let map = panel_map();
        let mut pages = map.get("pages").unwrap().as_list().unwrap().to_vec();
        pages.push(pages[0].clone());
        let map = map.with("pages", ParamValue::List(pages));
        let err = TabbedPanelSpecifier::from_parameters(&factory, &map).unwrap_err();
        assert_eq!(err.parameter, "pages[2].page");
        assert!(err.reason.contains("more than once"));
    }

    #[test]
    fn test_panel_propagates_across_pages() {
        let factory = SpecifierFactory::with_standard_kinds();
        let spec = factory.create_specifier(&panel_map().with("type", "tabbed_panel")).unwrap();
        let mut megawidget = spec.create_megawidget(HostHandle::detached(), &creation()).unwrap();
        megawidget.set_editable(false);

        let panel = megawidget_cast::<TabbedPanelMegawidget>(megawidget.as_ref()).unwrap();
        for index in 0..panel.child_count() {
            assert!(!panel.child(index).is_editable());
        }
    }
}
