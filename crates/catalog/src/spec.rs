//! Spec forest construction and path flattening.
//!
//! The forest is a branching tree: roots are the values of the first axis,
//! each node's `sub_specs` are all values of the next axis, and leaves hold
//! values of the last axis. Each root-to-leaf walk is one combination and is
//! materialized as a [`SpecPath`], a single-branch chain.

use serde::{Deserialize, Serialize};
use tracing::debug;

use mockgen_core::{DomainError, OfferId};

use crate::variation::VariationAxis;

/// One node of the spec forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub axis_type: String,
    pub offer_id: OfferId,
    pub sub_specs: Option<Vec<SpecNode>>,
}

impl SpecNode {
    fn leaf(axis_type: &str, value: &str) -> Self {
        Self {
            id: value.to_string(),
            label: value.to_string(),
            axis_type: axis_type.to_string(),
            offer_id: OfferId::new(),
            sub_specs: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.sub_specs.is_none()
    }

    pub fn children(&self) -> &[SpecNode] {
        self.sub_specs.as_deref().unwrap_or(&[])
    }

    /// Deep copy with a fresh offer id on every node.
    fn reissued(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            axis_type: self.axis_type.clone(),
            offer_id: OfferId::new(),
            sub_specs: self
                .sub_specs
                .as_ref()
                .map(|children| children.iter().map(Self::reissued).collect()),
        }
    }

    fn step(&self) -> SpecStep {
        SpecStep {
            id: self.id.clone(),
            label: self.label.clone(),
            axis_type: self.axis_type.clone(),
            offer_id: self.offer_id,
        }
    }
}

/// Build the spec forest for `axes`.
///
/// Levels are folded from the last axis outward; every nesting step attaches a
/// reissued copy of the inner forest, so no two nodes share an offer id and no
/// id survives a rebuild. Any axis without values empties the whole forest.
pub fn build_forest(axes: &[VariationAxis]) -> Vec<SpecNode> {
    if let Some(empty) = axes.iter().find(|axis| axis.values().is_empty()) {
        debug!(axis = empty.axis_type(), "axis has no values; forest is empty");
        return Vec::new();
    }

    let forest = axes.iter().rev().fold(Vec::<SpecNode>::new(), |inner, axis| {
        axis.values()
            .iter()
            .map(|value| {
                let mut node = SpecNode::leaf(axis.axis_type(), value);
                if !inner.is_empty() {
                    node.sub_specs = Some(inner.iter().map(SpecNode::reissued).collect());
                }
                node
            })
            .collect()
    });

    debug!(axes = axes.len(), roots = forest.len(), "built spec forest");
    forest
}

/// The value part of a node, without children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecStep {
    pub id: String,
    pub label: String,
    pub axis_type: String,
    pub offer_id: OfferId,
}

/// A single combination as a chain of steps, outermost axis first.
///
/// Serializes to the same shape as [`SpecNode`], with `subSpecs` holding the
/// one next step or `null` at the leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SpecNode", into = "SpecNode")]
pub enum SpecPath {
    Leaf(SpecStep),
    Chain { step: SpecStep, next: Box<SpecPath> },
}

impl SpecPath {
    /// Chain `steps` in order; `None` when there are no steps.
    pub fn from_steps(steps: Vec<SpecStep>) -> Option<Self> {
        let mut reversed = steps.into_iter().rev();
        let leaf = SpecPath::Leaf(reversed.next()?);
        Some(reversed.fold(leaf, |next, step| SpecPath::Chain {
            step,
            next: Box::new(next),
        }))
    }

    pub fn step(&self) -> &SpecStep {
        match self {
            SpecPath::Leaf(step) | SpecPath::Chain { step, .. } => step,
        }
    }

    pub fn next(&self) -> Option<&SpecPath> {
        match self {
            SpecPath::Leaf(_) => None,
            SpecPath::Chain { next, .. } => Some(next),
        }
    }

    pub fn steps(&self) -> impl Iterator<Item = &SpecStep> {
        core::iter::successors(Some(self), |&path| path.next()).map(SpecPath::step)
    }

    /// Last step of the chain; its offer id identifies the SKU.
    pub fn leaf(&self) -> &SpecStep {
        let mut current = self;
        while let Some(next) = current.next() {
            current = next;
        }
        current.step()
    }

    /// Labels root to leaf (the SKU's badges).
    pub fn labels(&self) -> Vec<&str> {
        self.steps().map(|step| step.label.as_str()).collect()
    }

    pub fn depth(&self) -> usize {
        self.steps().count()
    }
}

impl From<SpecPath> for SpecNode {
    fn from(path: SpecPath) -> Self {
        let (step, next) = match path {
            SpecPath::Leaf(step) => (step, None),
            SpecPath::Chain { step, next } => (step, Some(vec![SpecNode::from(*next)])),
        };
        SpecNode {
            id: step.id,
            label: step.label,
            axis_type: step.axis_type,
            offer_id: step.offer_id,
            sub_specs: next,
        }
    }
}

impl TryFrom<SpecNode> for SpecPath {
    type Error = DomainError;

    fn try_from(node: SpecNode) -> Result<Self, Self::Error> {
        let step = node.step();
        match node.sub_specs {
            None => Ok(SpecPath::Leaf(step)),
            Some(mut children) if children.len() == 1 => {
                let next = SpecPath::try_from(children.remove(0))?;
                Ok(SpecPath::Chain {
                    step,
                    next: Box::new(next),
                })
            }
            Some(children) => Err(DomainError::validation(format!(
                "spec path node `{}` must have exactly one sub spec, found {}",
                step.label,
                children.len()
            ))),
        }
    }
}

/// Every root-to-leaf path of `forest`, depth-first in forest order.
pub fn spec_paths(forest: &[SpecNode]) -> Vec<SpecPath> {
    let mut paths = Vec::new();
    let mut trail = Vec::new();
    for root in forest {
        collect_paths(root, &mut trail, &mut paths);
    }
    paths
}

fn collect_paths(node: &SpecNode, trail: &mut Vec<SpecStep>, paths: &mut Vec<SpecPath>) {
    trail.push(node.step());
    match node.sub_specs.as_deref() {
        Some(children) => {
            for child in children {
                collect_paths(child, trail, paths);
            }
        }
        None => paths.extend(SpecPath::from_steps(trail.clone())),
    }
    trail.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn color_size() -> Vec<VariationAxis> {
        vec![
            VariationAxis::new("color", ["red", "blue"]),
            VariationAxis::new("size", ["S", "M"]),
        ]
    }

    fn all_offer_ids(forest: &[SpecNode], out: &mut Vec<OfferId>) {
        for node in forest {
            out.push(node.offer_id);
            all_offer_ids(node.children(), out);
        }
    }

    /// (type, label) skeleton of a forest, ignoring identifiers.
    fn shape(forest: &[SpecNode]) -> Vec<(String, String, Vec<(String, String)>)> {
        forest
            .iter()
            .map(|node| {
                let children = node
                    .children()
                    .iter()
                    .map(|c| (c.axis_type.clone(), c.label.clone()))
                    .collect();
                (node.axis_type.clone(), node.label.clone(), children)
            })
            .collect()
    }

    #[test]
    fn no_axes_yield_empty_forest() {
        assert!(build_forest(&[]).is_empty());
        assert!(spec_paths(&[]).is_empty());
    }

    #[test]
    fn single_axis_is_a_leaf_list() {
        let forest = build_forest(&[VariationAxis::new("color", ["red", "green", "blue"])]);

        let labels: Vec<_> = forest.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["red", "green", "blue"]);
        assert!(forest.iter().all(SpecNode::is_leaf));
        assert!(forest.iter().all(|n| n.axis_type == "color" && n.id == n.label));
    }

    #[test]
    fn roots_follow_first_axis_and_leaves_the_last() {
        let forest = build_forest(&color_size());

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].label, "red");
        assert_eq!(forest[1].label, "blue");
        for root in &forest {
            assert_eq!(root.axis_type, "color");
            let sizes: Vec<_> = root.children().iter().map(|c| c.label.as_str()).collect();
            assert_eq!(sizes, ["S", "M"]);
            assert!(root.children().iter().all(|c| c.axis_type == "size" && c.is_leaf()));
        }
    }

    #[test]
    fn empty_axis_collapses_forest() {
        let axes = vec![
            VariationAxis::new("color", ["red", "blue"]),
            VariationAxis::new("material", Vec::<String>::new()),
            VariationAxis::new("size", ["S", "M"]),
        ];
        assert!(build_forest(&axes).is_empty());
    }

    #[test]
    fn every_offer_id_is_distinct() {
        let axes = vec![
            VariationAxis::new("color", ["red", "blue"]),
            VariationAxis::new("size", ["S", "M", "L"]),
            VariationAxis::new("fit", ["slim", "regular"]),
        ];
        let mut ids = Vec::new();
        all_offer_ids(&build_forest(&axes), &mut ids);

        // 2 roots + 6 size nodes + 12 fit leaves
        assert_eq!(ids.len(), 20);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 20);
    }

    #[test]
    fn rebuild_keeps_shape_but_not_ids() {
        let first = build_forest(&color_size());
        let second = build_forest(&color_size());

        assert_eq!(shape(&first), shape(&second));

        let mut first_ids = Vec::new();
        let mut second_ids = Vec::new();
        all_offer_ids(&first, &mut first_ids);
        all_offer_ids(&second, &mut second_ids);
        let first_ids: HashSet<_> = first_ids.into_iter().collect();
        assert!(second_ids.iter().all(|id| !first_ids.contains(id)));
    }

    #[test]
    fn paths_enumerate_combinations_depth_first() {
        let paths = spec_paths(&build_forest(&color_size()));

        let labels: Vec<_> = paths.iter().map(SpecPath::labels).collect();
        assert_eq!(
            labels,
            vec![
                vec!["red", "S"],
                vec!["red", "M"],
                vec!["blue", "S"],
                vec!["blue", "M"],
            ]
        );
        assert!(paths.iter().all(|p| p.depth() == 2));
    }

    #[test]
    fn path_leaf_is_the_innermost_node() {
        let forest = build_forest(&color_size());
        let paths = spec_paths(&forest);

        let red_m = &paths[1];
        assert_eq!(red_m.step().offer_id, forest[0].offer_id);
        assert_eq!(red_m.leaf().offer_id, forest[0].children()[1].offer_id);
        assert_ne!(red_m.leaf().offer_id, red_m.step().offer_id);
    }

    #[test]
    fn path_serializes_as_single_child_spec() {
        let forest = build_forest(&color_size());
        let path = spec_paths(&forest).remove(0);

        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json["label"], "red");
        assert_eq!(json["type"], "color");
        assert_eq!(json["offerId"], forest[0].offer_id.to_string());
        assert_eq!(json["subSpecs"].as_array().unwrap().len(), 1);
        assert_eq!(json["subSpecs"][0]["label"], "S");
        assert!(json["subSpecs"][0]["subSpecs"].is_null());

        let back: SpecPath = serde_json::from_value(json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn branching_node_is_not_a_path() {
        let forest = build_forest(&color_size());
        let err = SpecPath::try_from(forest[0].clone()).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("exactly one")),
            _ => panic!("Expected Validation error for branching node"),
        }
    }

    #[test]
    fn from_steps_of_nothing_is_none() {
        assert!(SpecPath::from_steps(Vec::new()).is_none());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn axes_strategy() -> impl Strategy<Value = Vec<VariationAxis>> {
            prop::collection::vec(prop::collection::vec("[a-z]{1,6}", 0..4), 0..4).prop_map(
                |levels| {
                    levels
                        .into_iter()
                        .enumerate()
                        .map(|(i, values)| VariationAxis::new(format!("axis{i}"), values))
                        .collect()
                },
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: number of paths is the product of value counts.
            #[test]
            fn path_count_is_product_of_sizes(axes in axes_strategy()) {
                let paths = spec_paths(&build_forest(&axes));
                prop_assert_eq!(paths.len(), crate::variation::combination_count(&axes));
            }

            /// Property: each path visits every axis once, in input order.
            #[test]
            fn paths_visit_axes_in_order(axes in axes_strategy()) {
                let expected: Vec<&str> = axes.iter().map(VariationAxis::axis_type).collect();
                for path in spec_paths(&build_forest(&axes)) {
                    let visited: Vec<&str> = path.steps().map(|s| s.axis_type.as_str()).collect();
                    prop_assert_eq!(&visited, &expected);
                }
            }
        }
    }
}
