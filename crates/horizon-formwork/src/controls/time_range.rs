//! Multi-instant time range kind.
//!
//! The only kind that *requires* a composite identifier: each colon-joined
//! part owns one epoch-milliseconds instant, and the instants must stay
//! strictly ascending in part order. The injected clock supplies defaults
//! when no initial `values` are given.

use std::any::Any;
use std::sync::Arc;

use horizon_formwork_core::{ParamValue, ParameterMap, PropResult, SpecResult, convert};

use crate::megawidget::{
    self, CreationParams, HostHandle, Megawidget, MegawidgetBase, StateBundle, StatefulMegawidget,
};
use crate::options::ControlOptions;
use crate::specifier::{Capabilities, LineOccupancy, Specifier, SpecifierBase, params};

/// Spacing between defaulted instants when no initial values are given.
const DEFAULT_STEP_MILLIS: i64 = 3_600_000;

/// Validated description of a time range.
#[derive(Debug, Clone)]
pub struct TimeRangeSpecifier {
    base: SpecifierBase,
    options: ControlOptions,
    initial: Option<Vec<i64>>,
    callback_data: Option<ParamValue>,
}

impl TimeRangeSpecifier {
    pub const TYPE_TAG: &'static str = "time_range";

    /// Validate a raw parameter map into a time range specifier.
    ///
    /// The identifier must be composite with at least two parts. `values`,
    /// when present, must be a list of epoch-milliseconds integers with one
    /// entry per part, strictly ascending.
    pub fn from_parameters(parameters: &ParameterMap) -> SpecResult<Self> {
        let base = SpecifierBase::new(
            Self::TYPE_TAG,
            Capabilities::control(LineOccupancy::Multi)
                .with_stateful()
                .with_notifier(),
            parameters,
        )?;
        base.require_composite_identifier(2)?;
        let options = ControlOptions::from_parameters(&base)?;

        let part_count = base.identifier().parts().len();
        let initial = match base.parameter(params::VALUES) {
            None | Some(ParamValue::Null) => None,
            Some(raw) => {
                let elements = convert::to_list(raw)
                    .map_err(|e| base.value_error(params::VALUES, e))?;
                if elements.len() != part_count {
                    return Err(base.error(
                        params::VALUES,
                        raw.clone(),
                        format!("must supply exactly {part_count} instants, one per identifier part"),
                    ));
                }
                let mut instants = Vec::with_capacity(part_count);
                for (index, element) in elements.iter().enumerate() {
                    let millis = convert::to_i64(element).map_err(|e| {
                        base.value_error(format!("{}[{index}]", params::VALUES), e)
                    })?;
                    instants.push(millis);
                }
                check_ascending(base.identifier().parts(), &instants)
                    .map_err(|reason| base.error(params::VALUES, raw.clone(), reason))?;
                Some(instants)
            }
        };
        let callback_data = base.parameter(params::CALLBACK_DATA).cloned();

        Ok(Self {
            base,
            options,
            initial,
            callback_data,
        })
    }
}

impl Specifier for TimeRangeSpecifier {
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
        let now = creation.clock().now_millis();
        let initial = self.initial.clone();
        let state = StateBundle::new(self.base.identifier(), |index, _| {
            let millis = match &initial {
                Some(instants) => instants[index],
                None => now + index as i64 * DEFAULT_STEP_MILLIS,
            };
            ParamValue::Int(millis)
        });
        let mut megawidget = TimeRangeMegawidget {
            spec: self,
            base,
            state,
        };
        let pushes: Vec<(String, ParamValue)> = megawidget
            .state
            .iter()
            .map(|(part, value)| (part.to_string(), value.clone()))
            .collect();
        for (part, value) in &pushes {
            megawidget.base.push_state(part, value);
        }
        Ok(Box::new(megawidget))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A live time range.
pub struct TimeRangeMegawidget {
    spec: Arc<TimeRangeSpecifier>,
    base: MegawidgetBase,
    state: StateBundle,
}

impl TimeRangeMegawidget {
    /// The current instants, in identifier part order.
    pub fn instants(&self) -> Vec<i64> {
        self.state
            .iter()
            .filter_map(|(_, value)| value.as_i64())
            .collect()
    }

    /// Host entry point: the user moved the instant owned by one part.
    ///
    /// No-op while the control is not interactive.
    pub fn user_adjusted(&mut self, state_identifier: &str, millis: i64) -> PropResult<()> {
        if !self.base.usability().is_interactive() {
            return Ok(());
        }
        let normalized = self.checked_replacement(state_identifier, &ParamValue::Int(millis))?;
        self.state.set(state_identifier, normalized.clone());
        self.base.notify_state_changed(state_identifier, &normalized);
        self.base.notify_invoked();
        Ok(())
    }

    /// Validate a single-part replacement against the ascending-order rule.
    fn checked_replacement(
        &self,
        state_identifier: &str,
        value: &ParamValue,
    ) -> PropResult<ParamValue> {
        if self.state.get(state_identifier).is_none() {
            return Err(self.base.unknown_state_identifier(state_identifier));
        }
        let millis = convert::to_i64(value)
            .map_err(|e| self.base.property_error(state_identifier, e.value, e.constraint))?;

        let parts = self.spec.base.identifier().parts();
        let mut candidate = self.instants();
        let index = parts
            .iter()
            .position(|part| part == state_identifier)
            .unwrap_or(0);
        candidate[index] = millis;
        check_ascending(parts, &candidate)
            .map_err(|reason| self.base.property_error(state_identifier, value.clone(), reason))?;
        Ok(ParamValue::Int(millis))
    }

    /// Validate a whole-range assignment (the `values` property).
    ///
    /// Accepts either a list in part order or a map keyed by part; every
    /// part must be covered.
    fn checked_range(&self, value: &ParamValue) -> PropResult<Vec<i64>> {
        let parts = self.spec.base.identifier().parts();
        let instants: Vec<i64> = match value {
            ParamValue::List(elements) => {
                if elements.len() != parts.len() {
                    return Err(self.base.property_error(
                        params::VALUES,
                        value.clone(),
                        format!("must supply exactly {} instants", parts.len()),
                    ));
                }
                let mut instants = Vec::with_capacity(parts.len());
                for (index, element) in elements.iter().enumerate() {
                    let millis = convert::to_i64(element).map_err(|e| {
                        self.base.property_error(
                            format!("{}[{index}]", params::VALUES),
                            e.value,
                            e.constraint,
                        )
                    })?;
                    instants.push(millis);
                }
                instants
            }
            ParamValue::Map(map) => {
                let mut instants = Vec::with_capacity(parts.len());
                for part in parts {
                    let element = map.get(part).ok_or_else(|| {
                        self.base.property_error(
                            params::VALUES,
                            value.clone(),
                            format!("must supply an instant for part \"{part}\""),
                        )
                    })?;
                    let millis = convert::to_i64(element).map_err(|e| {
                        self.base
                            .property_error(params::VALUES, e.value, e.constraint)
                    })?;
                    instants.push(millis);
                }
                instants
            }
            other => {
                return Err(self.base.property_error(
                    params::VALUES,
                    other.clone(),
                    "must be a list or a map of instants",
                ));
            }
        };
        check_ascending(parts, &instants)
            .map_err(|reason| self.base.property_error(params::VALUES, value.clone(), reason))?;
        Ok(instants)
    }

    fn apply_range(&mut self, instants: &[i64]) {
        let parts: Vec<String> = self
            .spec
            .base
            .identifier()
            .parts()
            .to_vec();
        for (part, millis) in parts.iter().zip(instants) {
            let normalized = ParamValue::Int(*millis);
            self.state.set(part, normalized.clone());
            self.base.push_state(part, &normalized);
        }
    }
}

impl Megawidget for TimeRangeMegawidget {
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
                self.checked_range(value)?;
                Ok(())
            }
            _ => megawidget::validate_flag_property(&self.base, name, value),
        }
    }

    fn set_mutable_property(&mut self, name: &str, value: &ParamValue) -> PropResult<()> {
        match name {
            params::VALUES => {
                let instants = self.checked_range(value)?;
                self.apply_range(&instants);
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

impl StatefulMegawidget for TimeRangeMegawidget {
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
        let normalized = self.checked_replacement(state_identifier, value)?;
        self.state.set(state_identifier, normalized.clone());
        self.base.push_state(state_identifier, &normalized);
        Ok(())
    }
}

/// Strict ascending-order check over the instants, in part order.
fn check_ascending(parts: &[String], instants: &[i64]) -> Result<(), String> {
    for (window, pair) in parts.windows(2).zip(instants.windows(2)) {
        if pair[1] <= pair[0] {
            return Err(format!(
                "instant \"{}\" must be strictly after \"{}\"",
                window[1], window[0]
            ));
        }
    }
    Ok(())
}
