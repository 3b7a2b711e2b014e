//! Per-identifier state storage for stateful megawidgets.
//!
//! A [`StateBundle`] holds one value per state identifier, in identifier
//! order. A megawidget with a scalar identifier owns exactly one entry; one
//! with a colon-joined composite identifier owns one entry per part, each
//! addressable independently.

use horizon_formwork_core::ParamValue;

use crate::specifier::Identifier;

/// Ordered state values keyed by the owning identifier parts.
#[derive(Debug, Clone, PartialEq)]
pub struct StateBundle {
    entries: Vec<(String, ParamValue)>,
}

impl StateBundle {
    /// Build a bundle with one entry per identifier part, each initialized
    /// by the supplied function (given the part's index and name).
    pub fn new(identifier: &Identifier, initial: impl Fn(usize, &str) -> ParamValue) -> Self {
        Self {
            entries: identifier
                .parts()
                .iter()
                .enumerate()
                .map(|(index, part)| (part.clone(), initial(index, part)))
                .collect(),
        }
    }

    /// The owned state identifiers, in order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(part, _)| part.as_str())
    }

    /// The number of owned state values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the bundle owns no state (never the case for a
    /// bundle built from a valid identifier).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up one state value.
    pub fn get(&self, state_identifier: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(part, _)| part == state_identifier)
            .map(|(_, value)| value)
    }

    /// Replace one state value. Returns `false` if the identifier is not
    /// owned by this bundle.
    pub fn set(&mut self, state_identifier: &str, value: ParamValue) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|(part, _)| part == state_identifier)
        {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Iterate over `(identifier, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(part, value)| (part.as_str(), value))
    }

    /// The representation used by the `values` mutable property: the bare
    /// value when a single identifier is owned, a map keyed by identifier
    /// otherwise.
    pub fn values_property(&self) -> ParamValue {
        if self.entries.len() == 1 {
            self.entries[0].1.clone()
        } else {
            let mut map = horizon_formwork_core::ParameterMap::new();
            for (part, value) in &self.entries {
                map.insert(part.clone(), value.clone());
            }
            ParamValue::Map(map)
        }
    }
}
