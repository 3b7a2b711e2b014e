//! State-to-tree validation.
//!
//! Bounded kinds validate every candidate state value against their choice
//! tree before accepting it: a single membership check for flat single-choice
//! kinds, an element-wise check for flat multi-choice kinds, and a recursive
//! structural-subset check for hierarchical kinds. Unbounded kinds skip
//! membership entirely and only require well-formed string lists.
//!
//! Successful validation returns the *normalized* state: scalar state is
//! replaced by the matching node's own value (so `"42"` and `42` both
//! normalize to the choice as specified), and subset trees are rebuilt from
//! canonical names and identifiers.

use horizon_formwork_core::{ParamValue, convert};

use crate::specifier::params;

use super::tree::{membership_reason, ChoiceNode, ChoiceTree};
use super::ChoicesError;

impl ChoiceTree {
    /// Validate a single-choice state value against a bounded flat tree.
    ///
    /// The value's canonical string must equal some top-level identifier;
    /// the normalized state is that node's own value.
    pub fn validate_single(
        &self,
        parameter: &str,
        value: &ParamValue,
    ) -> Result<ParamValue, ChoicesError> {
        let key = value
            .canonical_string()
            .ok_or_else(|| ChoicesError::new(parameter, value.clone(), self.membership_reason()))?;
        match self.find(&key) {
            Some(node) => Ok(node.state_value()),
            None => Err(ChoicesError::new(
                parameter,
                value.clone(),
                self.membership_reason(),
            )),
        }
    }

    /// Validate a multi-choice state list against a bounded flat tree.
    ///
    /// Every element must pass the single-choice check and no choice may be
    /// selected twice. The normalized state is the list of matching node
    /// values, in the caller's order.
    pub fn validate_selection(
        &self,
        parameter: &str,
        value: &ParamValue,
    ) -> Result<ParamValue, ChoicesError> {
        let items = value
            .as_list()
            .ok_or_else(|| ChoicesError::new(parameter, value.clone(), "must be a list of choices"))?;

        let mut normalized = Vec::with_capacity(items.len());
        let mut seen: Vec<String> = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let item_parameter = format!("{parameter}[{index}]");
            let key = item.canonical_string().ok_or_else(|| {
                ChoicesError::new(&item_parameter, item.clone(), self.membership_reason())
            })?;
            if seen.contains(&key) {
                return Err(ChoicesError::new(
                    item_parameter,
                    item.clone(),
                    format!("choice \"{key}\" is selected more than once"),
                ));
            }
            let node = self.find(&key).ok_or_else(|| {
                ChoicesError::new(&item_parameter, item.clone(), self.membership_reason())
            })?;
            normalized.push(node.state_value());
            seen.push(key);
        }
        Ok(ParamValue::List(normalized))
    }

    /// Validate a choices-shaped subset tree against a bounded hierarchical
    /// tree.
    ///
    /// Each state node (a string or a `{name/identifier, children?}` bundle)
    /// must name an identifier present among the canonical siblings at its
    /// level; its children, if any, must recursively be a subset of that
    /// node's children. A childless state node selects just that node,
    /// regardless of the canonical node's children.
    pub fn validate_subset(
        &self,
        parameter: &str,
        value: &ParamValue,
    ) -> Result<ParamValue, ChoicesError> {
        validate_subset_siblings(parameter, value, self.nodes())
    }
}

fn validate_subset_siblings(
    parameter: &str,
    value: &ParamValue,
    canonical: &[ChoiceNode],
) -> Result<ParamValue, ChoicesError> {
    let items = value
        .as_list()
        .ok_or_else(|| ChoicesError::new(parameter, value.clone(), "must be a list of choices"))?;

    let mut normalized = Vec::with_capacity(items.len());
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let item_parameter = format!("{parameter}[{index}]");

        let (identifier, nested) = match item {
            ParamValue::String(text) => (text.clone(), None),
            ParamValue::Map(bundle) => {
                let identifier = match (bundle.get(params::IDENTIFIER), bundle.get(params::NAME)) {
                    (Some(value), _) | (None, Some(value)) => convert::to_nonempty_string(value)
                        .map_err(|e| {
                            ChoicesError::new(
                                format!("{item_parameter}.identifier"),
                                e.value,
                                e.constraint,
                            )
                        })?,
                    (None, None) => {
                        return Err(ChoicesError::new(
                            format!("{item_parameter}.identifier"),
                            ParamValue::Null,
                            "a choice bundle requires a name or identifier",
                        ));
                    }
                };
                (identifier, bundle.get(params::CHILDREN))
            }
            other => {
                return Err(ChoicesError::new(
                    item_parameter,
                    other.clone(),
                    "must be a string or a choice bundle",
                ));
            }
        };

        if seen.contains(&identifier) {
            return Err(ChoicesError::new(
                item_parameter,
                item.clone(),
                format!("choice \"{identifier}\" is selected more than once"),
            ));
        }
        let node = canonical
            .iter()
            .find(|candidate| candidate.identifier() == identifier)
            .ok_or_else(|| {
                ChoicesError::new(&item_parameter, item.clone(), membership_reason(canonical))
            })?;

        match nested {
            None | Some(ParamValue::Null) => {
                normalized.push(ParamValue::String(identifier.clone()));
            }
            Some(children) => {
                if !node.has_children() {
                    return Err(ChoicesError::new(
                        format!("{item_parameter}.{}", params::CHILDREN),
                        children.clone(),
                        format!("choice \"{identifier}\" does not accept nested choices"),
                    ));
                }
                let nested_normalized = validate_subset_siblings(
                    &format!("{item_parameter}.{}", params::CHILDREN),
                    children,
                    node.children(),
                )?;
                let mut bundle = horizon_formwork_core::ParameterMap::new();
                bundle.insert(params::NAME, node.name());
                bundle.insert(params::IDENTIFIER, identifier.clone());
                bundle.insert(params::CHILDREN, nested_normalized);
                normalized.push(ParamValue::Map(bundle));
            }
        }
        seen.push(identifier);
    }
    Ok(ParamValue::List(normalized))
}

/// Validate an unbounded (open) state value: a string or a list of distinct
/// non-empty strings. No membership check is performed.
pub fn validate_string_list(
    parameter: &str,
    value: &ParamValue,
) -> Result<Vec<String>, ChoicesError> {
    match value {
        ParamValue::String(text) => {
            if text.is_empty() {
                return Err(ChoicesError::new(
                    parameter,
                    value.clone(),
                    "must be a non-empty string",
                ));
            }
            Ok(vec![text.clone()])
        }
        ParamValue::List(items) => {
            let mut strings = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let item_parameter = format!("{parameter}[{index}]");
                let text = convert::to_nonempty_string(item).map_err(|e| {
                    ChoicesError::new(&item_parameter, e.value, e.constraint)
                })?;
                if strings.contains(&text) {
                    return Err(ChoicesError::new(
                        item_parameter,
                        item.clone(),
                        format!("\"{text}\" appears more than once"),
                    ));
                }
                strings.push(text);
            }
            Ok(strings)
        }
        other => Err(ChoicesError::new(
            parameter,
            other.clone(),
            "must be a string or a list of strings",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::ChoicePolicy;
    use horizon_formwork_core::ParameterMap;

    fn flat_tree() -> ChoiceTree {
        let raw = ParamValue::List(vec![
            ParamValue::from("low"),
            ParamValue::Int(42),
            ParamValue::from("high"),
        ]);
        ChoiceTree::from_parameter("choices", &raw, ChoicePolicy::Flat).unwrap()
    }

    fn hierarchical_tree() -> ChoiceTree {
        let mut hydro = ParameterMap::new();
        hydro.insert("name", "hydro");
        hydro.insert(
            "children",
            ParamValue::List(vec![ParamValue::from("flood"), ParamValue::from("flash")]),
        );
        let raw = ParamValue::List(vec![ParamValue::Map(hydro), ParamValue::from("wind")]);
        ChoiceTree::from_parameter("choices", &raw, ChoicePolicy::Hierarchical).unwrap()
    }

    #[test]
    fn test_single_normalizes_to_node_value() {
        let tree = flat_tree();
        // A string addressing an integer leaf normalizes to the integer.
        assert_eq!(
            tree.validate_single("values", &ParamValue::from("42")).unwrap(),
            ParamValue::Int(42)
        );
        assert_eq!(
            tree.validate_single("values", &ParamValue::from("low")).unwrap(),
            ParamValue::from("low")
        );
    }

    #[test]
    fn test_single_membership_failure_lists_legal() {
        let tree = flat_tree();
        let err = tree
            .validate_single("values", &ParamValue::from("medium"))
            .unwrap_err();
        assert_eq!(err.parameter, "values");
        assert_eq!(err.reason, "must be one of [low, 42, high]");
    }

    #[test]
    fn test_selection_rejects_duplicates() {
        let tree = flat_tree();
        let state = ParamValue::List(vec![ParamValue::from("low"), ParamValue::from("low")]);
        let err = tree.validate_selection("values", &state).unwrap_err();
        assert_eq!(err.parameter, "values[1]");
        assert!(err.reason.contains("more than once"));
    }

    #[test]
    fn test_selection_requires_list() {
        let tree = flat_tree();
        let err = tree
            .validate_selection("values", &ParamValue::from("low"))
            .unwrap_err();
        assert_eq!(err.reason, "must be a list of choices");
    }

    #[test]
    fn test_subset_accepts_partial_tree() {
        let tree = hierarchical_tree();
        let state = ParamValue::List(vec![ParamValue::from("wind")]);
        let normalized = tree.validate_subset("values", &state).unwrap();
        assert_eq!(normalized, ParamValue::List(vec![ParamValue::from("wind")]));
    }

    #[test]
    fn test_subset_recurses_into_children() {
        let tree = hierarchical_tree();
        let mut bundle = ParameterMap::new();
        bundle.insert("identifier", "hydro");
        bundle.insert("children", ParamValue::List(vec![ParamValue::from("flash")]));
        let state = ParamValue::List(vec![ParamValue::Map(bundle)]);

        let normalized = tree.validate_subset("values", &state).unwrap();
        let items = normalized.as_list().unwrap();
        let normalized_bundle = items[0].as_map().unwrap();
        assert_eq!(normalized_bundle.get("name").and_then(|v| v.as_str()), Some("hydro"));
        assert_eq!(
            normalized_bundle.get("children"),
            Some(&ParamValue::List(vec![ParamValue::from("flash")]))
        );
    }

    #[test]
    fn test_subset_unknown_child_lists_siblings() {
        let tree = hierarchical_tree();
        let mut bundle = ParameterMap::new();
        bundle.insert("identifier", "hydro");
        bundle.insert("children", ParamValue::List(vec![ParamValue::from("tsunami")]));
        let state = ParamValue::List(vec![ParamValue::Map(bundle)]);

        let err = tree.validate_subset("values", &state).unwrap_err();
        assert_eq!(err.parameter, "values[0].children[0]");
        assert_eq!(err.reason, "must be one of [flood, flash]");
    }

    #[test]
    fn test_subset_children_under_leaf_rejected() {
        let tree = hierarchical_tree();
        let mut bundle = ParameterMap::new();
        bundle.insert("identifier", "wind");
        bundle.insert("children", ParamValue::List(vec![ParamValue::from("gust")]));
        let state = ParamValue::List(vec![ParamValue::Map(bundle)]);

        let err = tree.validate_subset("values", &state).unwrap_err();
        assert!(err.reason.contains("does not accept nested choices"));
    }

    #[test]
    fn test_string_list_accepts_bare_string() {
        assert_eq!(
            validate_string_list("values", &ParamValue::from("one")).unwrap(),
            vec!["one".to_string()]
        );
    }

    #[test]
    fn test_string_list_rejects_duplicates_and_non_strings() {
        let state = ParamValue::List(vec![ParamValue::from("a"), ParamValue::from("a")]);
        assert!(validate_string_list("values", &state).is_err());

        let state = ParamValue::List(vec![ParamValue::Int(1)]);
        let err = validate_string_list("values", &state).unwrap_err();
        assert_eq!(err.parameter, "values[0]");
    }
}
