//! Push button kind.

use std::any::Any;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, SpecResult};

use crate::megawidget::{CreationParams, HostHandle, Megawidget, MegawidgetBase};
use crate::options::ControlOptions;
use crate::specifier::{Capabilities, LineOccupancy, Specifier, SpecifierBase, params};

/// Validated description of a push button.
///
/// Buttons own no state; their whole protocol is the notification fired from
/// [`ButtonMegawidget::user_activated`], carrying the optional
/// `callback_data` parameter through unchanged.
#[derive(Debug, Clone)]
pub struct ButtonSpecifier {
    base: SpecifierBase,
    options: ControlOptions,
    callback_data: Option<ParamValue>,
}

impl ButtonSpecifier {
    pub const TYPE_TAG: &'static str = "button";

    /// Validate a raw parameter map into a button specifier.
    pub fn from_parameters(parameters: &ParameterMap) -> SpecResult<Self> {
        let base = SpecifierBase::new(
            Self::TYPE_TAG,
            Capabilities::control(LineOccupancy::Single).with_notifier(),
            parameters,
        )?;
        base.require_scalar_identifier()?;
        let options = ControlOptions::from_parameters(&base)?;
        let callback_data = base.parameter(params::CALLBACK_DATA).cloned();
        Ok(Self {
            base,
            options,
            callback_data,
        })
    }
}

impl Specifier for ButtonSpecifier {
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
        Ok(Box::new(ButtonMegawidget { spec: self, base }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A live push button.
pub struct ButtonMegawidget {
    spec: Arc<ButtonSpecifier>,
    base: MegawidgetBase,
}

impl ButtonMegawidget {
    /// Host entry point: the user pressed the button.
    ///
    /// Notifies the notification listener with the specifier's callback
    /// data. No-op while the button is not interactive.
    pub fn user_activated(&self) {
        if self.base.usability().is_interactive() {
            self.base.notify_invoked();
        }
    }
}

impl Megawidget for ButtonMegawidget {
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
