//! Choice tree parsing and normalization.
//!
//! The parser walks the raw `choices` list by recursive descent, classifying
//! each element as a scalar leaf or a bundle map, enforcing per-sibling
//! identifier uniqueness, and producing an owned, immutable [`ChoiceTree`].

use horizon_formwork_core::{ParamValue, ParameterMap, convert};

use crate::specifier::params;
use crate::specifier::SEPARATOR;

use super::ChoicesError;

/// Structural policy for a choice tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoicePolicy {
    /// Depth-1: scalar leaves and bundles without children. Leaves may be
    /// any scalar (string, integer, number, or boolean).
    Flat,
    /// Arbitrary nesting through the `children` key. Leaves must be
    /// strings; bundle identifiers must not contain the reserved `:`
    /// separator.
    Hierarchical,
}

/// One node of a normalized choice tree.
///
/// A node is either a **leaf** built from a bare scalar (its canonical
/// string rendering is the identifier, the scalar itself is the state
/// value) or a **bundle** built from a `{name, identifier?, children?}`
/// map (the identifier, defaulting to the name, is also the state value).
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceNode {
    name: String,
    identifier: String,
    leaf: Option<ParamValue>,
    children: Vec<ChoiceNode>,
}

impl ChoiceNode {
    /// The display name (equals the identifier for scalar leaves).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identifier, unique within this node's sibling scope.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Nested child nodes (empty for leaves and flat-tree bundles).
    pub fn children(&self) -> &[ChoiceNode] {
        &self.children
    }

    /// Returns `true` if this node has nested children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The value state takes when this node is chosen: the original scalar
    /// for leaves, the identifier string for bundles.
    pub fn state_value(&self) -> ParamValue {
        match &self.leaf {
            Some(value) => value.clone(),
            None => ParamValue::String(self.identifier.clone()),
        }
    }
}

/// An immutable, normalized tree of selectable choices.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceTree {
    policy: ChoicePolicy,
    nodes: Vec<ChoiceNode>,
}

impl ChoiceTree {
    /// An empty tree (the seed of an unbounded kind with no choices).
    pub fn empty(policy: ChoicePolicy) -> Self {
        Self {
            policy,
            nodes: Vec::new(),
        }
    }

    /// Parse and normalize a raw `choices` parameter value.
    ///
    /// `parameter` is the name used in violation messages; element indices
    /// and bundle field names are folded into it (`choices[2].identifier`).
    pub fn from_parameter(
        parameter: &str,
        raw: &ParamValue,
        policy: ChoicePolicy,
    ) -> Result<Self, ChoicesError> {
        let elements = raw
            .as_list()
            .ok_or_else(|| ChoicesError::new(parameter, raw.clone(), "must be a list of choices"))?;
        let nodes = parse_siblings(parameter, elements, policy)?;
        tracing::trace!(
            target: "horizon_formwork::choices",
            parameter,
            count = nodes.len(),
            ?policy,
            "normalized choice tree"
        );
        Ok(Self { policy, nodes })
    }

    /// The tree's structural policy.
    pub fn policy(&self) -> ChoicePolicy {
        self.policy
    }

    /// Top-level nodes in list order.
    pub fn nodes(&self) -> &[ChoiceNode] {
        &self.nodes
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level identifiers in list order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(ChoiceNode::identifier)
    }

    /// Find a top-level node by identifier.
    pub fn find(&self, identifier: &str) -> Option<&ChoiceNode> {
        self.nodes.iter().find(|node| node.identifier == identifier)
    }

    /// The membership constraint message listing the legal top-level
    /// identifiers, comma-joined, in tree order.
    pub fn membership_reason(&self) -> String {
        membership_reason(&self.nodes)
    }
}

/// Membership message for an arbitrary sibling scope.
pub(super) fn membership_reason(siblings: &[ChoiceNode]) -> String {
    let legal: Vec<&str> = siblings.iter().map(ChoiceNode::identifier).collect();
    format!("must be one of [{}]", legal.join(", "))
}

fn parse_siblings(
    parameter: &str,
    elements: &[ParamValue],
    policy: ChoicePolicy,
) -> Result<Vec<ChoiceNode>, ChoicesError> {
    let mut nodes: Vec<ChoiceNode> = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let element_parameter = format!("{parameter}[{index}]");
        let node = parse_node(&element_parameter, element, policy)?;
        if nodes.iter().any(|prior| prior.identifier == node.identifier) {
            return Err(ChoicesError::new(
                element_parameter,
                element.clone(),
                format!("duplicate choice identifier \"{}\"", node.identifier),
            ));
        }
        nodes.push(node);
    }
    Ok(nodes)
}

fn parse_node(
    parameter: &str,
    element: &ParamValue,
    policy: ChoicePolicy,
) -> Result<ChoiceNode, ChoicesError> {
    match element {
        ParamValue::Map(bundle) => parse_bundle(parameter, element, bundle, policy),
        ParamValue::String(text) => {
            if text.is_empty() {
                return Err(ChoicesError::new(
                    parameter,
                    element.clone(),
                    "must be a non-empty string",
                ));
            }
            Ok(ChoiceNode {
                name: text.clone(),
                identifier: text.clone(),
                leaf: Some(element.clone()),
                children: Vec::new(),
            })
        }
        ParamValue::Bool(_) | ParamValue::Int(_) | ParamValue::Float(_) => {
            if policy == ChoicePolicy::Hierarchical {
                return Err(ChoicesError::new(
                    parameter,
                    element.clone(),
                    "must be a string or a choice bundle",
                ));
            }
            // is_scalar guarantees a canonical rendering.
            let identifier = element.canonical_string().unwrap_or_default();
            Ok(ChoiceNode {
                name: identifier.clone(),
                identifier,
                leaf: Some(element.clone()),
                children: Vec::new(),
            })
        }
        other => Err(ChoicesError::new(
            parameter,
            other.clone(),
            match policy {
                ChoicePolicy::Flat => "must be a scalar value or a choice bundle",
                ChoicePolicy::Hierarchical => "must be a string or a choice bundle",
            },
        )),
    }
}

fn parse_bundle(
    parameter: &str,
    element: &ParamValue,
    bundle: &ParameterMap,
    policy: ChoicePolicy,
) -> Result<ChoiceNode, ChoicesError> {
    let name = match bundle.get(params::NAME) {
        None => {
            return Err(ChoicesError::new(
                format!("{parameter}.name"),
                ParamValue::Null,
                "a choice bundle requires a name",
            ));
        }
        Some(value) => convert::to_nonempty_string(value).map_err(|e| {
            ChoicesError::new(format!("{parameter}.name"), e.value, e.constraint)
        })?,
    };
    let identifier = match bundle.get(params::IDENTIFIER) {
        None => name.clone(),
        Some(value) => convert::to_nonempty_string(value).map_err(|e| {
            ChoicesError::new(format!("{parameter}.identifier"), e.value, e.constraint)
        })?,
    };

    let children = match policy {
        ChoicePolicy::Flat => {
            if bundle.contains_key(params::CHILDREN) {
                return Err(ChoicesError::new(
                    format!("{parameter}.{}", params::CHILDREN),
                    element.clone(),
                    "nested choices are not allowed in a flat choice list",
                ));
            }
            Vec::new()
        }
        ChoicePolicy::Hierarchical => {
            if identifier.contains(SEPARATOR) {
                return Err(ChoicesError::new(
                    format!("{parameter}.identifier"),
                    identifier.as_str(),
                    "must not contain the reserved \":\" separator",
                ));
            }
            match bundle.get(params::CHILDREN) {
                None | Some(ParamValue::Null) => Vec::new(),
                Some(raw_children) => {
                    let elements = raw_children.as_list().ok_or_else(|| {
                        ChoicesError::new(
                            format!("{parameter}.{}", params::CHILDREN),
                            raw_children.clone(),
                            "must be a list of choices",
                        )
                    })?;
                    parse_siblings(
                        &format!("{parameter}.{}", params::CHILDREN),
                        elements,
                        policy,
                    )?
                }
            }
        }
    };

    Ok(ChoiceNode {
        name,
        identifier,
        leaf: None,
        children,
    })
}
