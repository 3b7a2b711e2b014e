//! Bounded integer spinner kind.

use std::any::Any;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, PropResult, SpecResult, convert};

use crate::megawidget::{
    self, CreationParams, HostHandle, Megawidget, MegawidgetBase, StateBundle, StatefulMegawidget,
};
use crate::options::ControlOptions;
use crate::specifier::{Capabilities, LineOccupancy, Specifier, SpecifierBase, params};

/// Validated description of a bounded integer spinner.
///
/// The state is one integer in `[min_value, max_value]` (defaults `0..=100`).
/// `increment_delta` is both a construction parameter and a runtime mutable
/// property; it must be at least 1 and no larger than the span of the range.
#[derive(Debug, Clone)]
pub struct IntegerSpinnerSpecifier {
    base: SpecifierBase,
    options: ControlOptions,
    minimum: i64,
    maximum: i64,
    increment_delta: i64,
    initial: i64,
    callback_data: Option<ParamValue>,
}

impl IntegerSpinnerSpecifier {
    pub const TYPE_TAG: &'static str = "integer_spinner";

    const DEFAULT_MINIMUM: i64 = 0;
    const DEFAULT_MAXIMUM: i64 = 100;

    /// Validate a raw parameter map into a spinner specifier.
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

        let minimum = base.optional_i64(params::MIN_VALUE, Self::DEFAULT_MINIMUM)?;
        let maximum = base.optional_i64(params::MAX_VALUE, Self::DEFAULT_MAXIMUM)?;
        if maximum < minimum {
            return Err(base.error(
                params::MAX_VALUE,
                maximum,
                format!("must be at least the minimum value {minimum}"),
            ));
        }

        let increment_delta =
            base.optional_i64_in(params::INCREMENT_DELTA, 1, 1, span_of(minimum, maximum))?;
        let initial = base.optional_i64_in(params::VALUES, minimum, minimum, maximum)?;
        let callback_data = base.parameter(params::CALLBACK_DATA).cloned();

        Ok(Self {
            base,
            options,
            minimum,
            maximum,
            increment_delta,
            initial,
            callback_data,
        })
    }

    /// The inclusive lower bound.
    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    /// The inclusive upper bound.
    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    /// The initial step size.
    pub fn increment_delta(&self) -> i64 {
        self.increment_delta
    }
}

impl Specifier for IntegerSpinnerSpecifier {
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
        let initial = ParamValue::Int(self.initial);
        let state = StateBundle::new(self.base.identifier(), |_, _| initial.clone());
        let increment_delta = self.increment_delta;
        let mut megawidget = IntegerSpinnerMegawidget {
            spec: self,
            base,
            state,
            increment_delta,
        };
        let identifier = megawidget.spec.base.identifier().as_str().to_string();
        megawidget.base.push_state(&identifier, &initial);
        Ok(Box::new(megawidget))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The increment-delta upper bound: the range's span, saturating when the
/// full i64 range is in play, never below 1.
fn span_of(minimum: i64, maximum: i64) -> i64 {
    maximum.checked_sub(minimum).unwrap_or(i64::MAX).max(1)
}

/// A live integer spinner.
pub struct IntegerSpinnerMegawidget {
    spec: Arc<IntegerSpinnerSpecifier>,
    base: MegawidgetBase,
    state: StateBundle,
    increment_delta: i64,
}

impl IntegerSpinnerMegawidget {
    /// The current step size.
    pub fn increment_delta(&self) -> i64 {
        self.increment_delta
    }

    fn validate_in_range(&self, property: &str, value: &ParamValue) -> PropResult<i64> {
        convert::to_i64_in(value, self.spec.minimum, self.spec.maximum)
            .map_err(|e| self.base.property_error(property, e.value, e.constraint))
    }

    fn validate_increment(&self, value: &ParamValue) -> PropResult<i64> {
        let span = span_of(self.spec.minimum, self.spec.maximum);
        convert::to_i64_in(value, 1, span).map_err(|e| {
            self.base
                .property_error(params::INCREMENT_DELTA, e.value, e.constraint)
        })
    }

    /// Host entry point: the user spun the control to `value`.
    ///
    /// No-op while the control is not interactive.
    pub fn user_adjusted(&mut self, value: i64) -> PropResult<()> {
        if !self.base.usability().is_interactive() {
            return Ok(());
        }
        let identifier = self.spec.base.identifier().as_str().to_string();
        let normalized = self.validate_in_range(&identifier, &ParamValue::Int(value))?;
        let normalized = ParamValue::Int(normalized);
        self.state.set(&identifier, normalized.clone());
        self.base.notify_state_changed(&identifier, &normalized);
        self.base.notify_invoked();
        Ok(())
    }
}

impl Megawidget for IntegerSpinnerMegawidget {
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
        vec![
            params::ENABLE,
            params::EDITABLE,
            params::VALUES,
            params::INCREMENT_DELTA,
        ]
    }

    fn mutable_property(&self, name: &str) -> PropResult<ParamValue> {
        match name {
            params::VALUES => Ok(self.state.values_property()),
            params::INCREMENT_DELTA => Ok(ParamValue::Int(self.increment_delta)),
            _ => megawidget::flag_property(&self.base, name),
        }
    }

    fn validate_mutable_property(&self, name: &str, value: &ParamValue) -> PropResult<()> {
        match name {
            params::VALUES => {
                self.validate_in_range(name, value)?;
                Ok(())
            }
            params::INCREMENT_DELTA => {
                self.validate_increment(value)?;
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
            params::INCREMENT_DELTA => {
                let delta = self.validate_increment(value)?;
                self.increment_delta = delta;
                self.base
                    .push_property(params::INCREMENT_DELTA, &ParamValue::Int(delta));
                Ok(())
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

impl StatefulMegawidget for IntegerSpinnerMegawidget {
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
        let normalized = ParamValue::Int(self.validate_in_range(state_identifier, value)?);
        self.state.set(state_identifier, normalized.clone());
        self.base.push_state(state_identifier, &normalized);
        Ok(())
    }
}
