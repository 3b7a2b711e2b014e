//! Static text label kind.

use std::any::Any;
use std::sync::Arc;

use horizon_formwork_core::{ParameterMap, SpecResult};

use crate::megawidget::{CreationParams, HostHandle, Megawidget, MegawidgetBase};
use crate::options::ControlOptions;
use crate::specifier::{Capabilities, LineOccupancy, Specifier, SpecifierBase};

/// Validated description of a static text label.
///
/// A label renders its `label` parameter and nothing else: it owns no state,
/// never notifies, and exposes only the `enable`/`editable` properties every
/// megawidget has.
#[derive(Debug, Clone)]
pub struct LabelSpecifier {
    base: SpecifierBase,
    options: ControlOptions,
}

impl LabelSpecifier {
    pub const TYPE_TAG: &'static str = "label";

    /// Validate a raw parameter map into a label specifier.
    pub fn from_parameters(parameters: &ParameterMap) -> SpecResult<Self> {
        let base = SpecifierBase::new(
            Self::TYPE_TAG,
            Capabilities::control(LineOccupancy::Single),
            parameters,
        )?;
        base.require_scalar_identifier()?;
        let options = ControlOptions::from_parameters(&base)?;
        Ok(Self { base, options })
    }
}

impl Specifier for LabelSpecifier {
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
        let base = MegawidgetBase::new(&self.base, self.options.editable, None, binding, creation);
        Ok(Box::new(LabelMegawidget { spec: self, base }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A live label.
pub struct LabelMegawidget {
    spec: Arc<LabelSpecifier>,
    base: MegawidgetBase,
}

impl Megawidget for LabelMegawidget {
    fn base(&self) -> &MegawidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MegawidgetBase {
        &mut self.base
    }

    fn specifier(&self) -> Arc<dyn Specifier> {
        self.spec.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::megawidget::{DetachedBinder, Usability};
    use crate::specifier::params;
    use horizon_formwork_core::ParamValue;

    fn creation() -> CreationParams {
        CreationParams::new(Arc::new(DetachedBinder))
    }

    #[test]
    fn test_label_round_trip() {
        let map = ParameterMap::new()
            .with("field", "title")
            .with("label", "Report title")
            .with("enable", false);
        let spec = Arc::new(LabelSpecifier::from_parameters(&map).unwrap());
        assert_eq!(spec.type_tag(), "label");
        assert_eq!(spec.base().label(), "Report title");

        let megawidget = spec.create_megawidget(HostHandle::detached(), &creation()).unwrap();
        assert!(!megawidget.is_enabled());
        assert_eq!(megawidget.usability(), Usability::Inert);
    }

    #[test]
    fn test_label_has_only_flag_properties() {
        let map = ParameterMap::new().with("field", "title");
        let spec = Arc::new(LabelSpecifier::from_parameters(&map).unwrap());
        let megawidget = spec.create_megawidget(HostHandle::detached(), &creation()).unwrap();
        assert_eq!(
            megawidget.mutable_property_names(),
            vec![params::ENABLE, params::EDITABLE]
        );
        let err = megawidget.mutable_property("values").unwrap_err();
        assert_eq!(err.property, "values");
        assert_eq!(err.value, ParamValue::Null);
    }

    #[test]
    fn test_label_rejects_composite_identifier() {
        let map = ParameterMap::new().with("field", "a:b");
        let err = LabelSpecifier::from_parameters(&map).unwrap_err();
        assert_eq!(err.parameter, "field");
    }
}
