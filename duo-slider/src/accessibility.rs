//! # Accessibility Support
//!
//! Semantic metadata for the two thumbs, expressed with AccessKit types so a
//! host can forward it to screen readers unchanged.
//!
//! ## Structure
//!
//! A slider contributes a small subtree: one `Group` node with two `Slider`
//! children, one per thumb. Static attributes (role, label, declared bounds,
//! step) are fixed at construction in [`ThumbSemantics`]; the current value
//! is merged in from [`SliderVisuals`] each time a node is built.
//!
//! Node ids are local to the slider subtree. Hosts embedding several sliders
//! in one tree remap them.

use accesskit::{Action, Node, NodeId, Orientation, Role, Tree, TreeId, TreeUpdate};

use crate::{
    render::{SliderVisuals, ThumbVisual},
    value::{Domain, Thumb},
};

/// Id of the group node wrapping both thumbs.
pub const SLIDER_NODE_ID: NodeId = NodeId(1);
/// Id of the min thumb node.
pub const MIN_THUMB_NODE_ID: NodeId = NodeId(2);
/// Id of the max thumb node.
pub const MAX_THUMB_NODE_ID: NodeId = NodeId(3);

/// Number of steps covered by a page jump.
pub const PAGE_STEPS: f64 = 10.0;

/// Node id of `thumb`.
pub fn thumb_node_id(thumb: Thumb) -> NodeId {
    match thumb {
        Thumb::Min => MIN_THUMB_NODE_ID,
        Thumb::Max => MAX_THUMB_NODE_ID,
    }
}

/// Thumb addressed by an accessibility node id, if any.
pub fn thumb_for_node(id: NodeId) -> Option<Thumb> {
    match id {
        MIN_THUMB_NODE_ID => Some(Thumb::Min),
        MAX_THUMB_NODE_ID => Some(Thumb::Max),
        _ => None,
    }
}

/// Static semantic information for one thumb.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbSemantics {
    /// The thumb described.
    pub thumb: Thumb,
    /// Human-readable name announced for the thumb.
    pub label: String,
    /// Longer description of the thumb's purpose.
    pub description: Option<String>,
    /// Declared lower bound.
    pub min_numeric_value: f64,
    /// Declared upper bound.
    pub max_numeric_value: f64,
    /// Value change of a single increment.
    pub numeric_value_step: f64,
    /// Value change of a page jump.
    pub numeric_value_jump: f64,
    /// Supported actions.
    pub actions: Vec<Action>,
}

impl ThumbSemantics {
    /// Creates empty semantics for `thumb`.
    pub fn new(thumb: Thumb) -> Self {
        Self {
            thumb,
            label: String::new(),
            description: None,
            min_numeric_value: 0.0,
            max_numeric_value: 0.0,
            numeric_value_step: 0.0,
            numeric_value_jump: 0.0,
            actions: Vec::new(),
        }
    }

    /// Semantics for `thumb` of a slider over `domain`.
    ///
    /// `label` names the whole slider; each thumb's label qualifies it.
    pub fn for_domain(thumb: Thumb, domain: &Domain, label: Option<&str>) -> Self {
        let (name, description) = match thumb {
            Thumb::Min => ("Minimum", "range start"),
            Thumb::Max => ("Maximum", "range end"),
        };
        let label = match label {
            Some(label) => format!("{label} ({})", name.to_lowercase()),
            None => name.to_string(),
        };
        Self::new(thumb)
            .with_label(label)
            .with_description(description)
            .with_numeric_range(domain.min(), domain.max())
            .with_step(domain.step())
            .with_actions([Action::Focus, Action::Increment, Action::Decrement])
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the declared numeric range.
    pub fn with_numeric_range(mut self, min: f64, max: f64) -> Self {
        self.min_numeric_value = min;
        self.max_numeric_value = max;
        self
    }

    /// Sets the increment step; the page jump follows as ten steps.
    pub fn with_step(mut self, step: f64) -> Self {
        self.numeric_value_step = step;
        self.numeric_value_jump = step * PAGE_STEPS;
        self
    }

    /// Adds supported actions.
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Node id of the described thumb.
    pub fn node_id(&self) -> NodeId {
        thumb_node_id(self.thumb)
    }

    /// Builds the AccessKit node for the thumb in its current state.
    pub fn to_node(&self, visual: &ThumbVisual) -> Node {
        let mut node = Node::new(Role::Slider);
        node.set_label(self.label.clone());
        if let Some(description) = self.description.as_ref() {
            node.set_description(description.clone());
        }
        node.set_orientation(Orientation::Horizontal);
        node.set_min_numeric_value(self.min_numeric_value);
        node.set_max_numeric_value(self.max_numeric_value);
        node.set_numeric_value_step(self.numeric_value_step);
        node.set_numeric_value_jump(self.numeric_value_jump);
        node.set_numeric_value(visual.value);
        node.set_value(visual.label.clone());
        for action in &self.actions {
            node.add_action(*action);
        }
        node
    }
}

/// Builds a complete tree update for the slider subtree.
///
/// Focus lands on the focused thumb, or on the group when neither thumb has
/// focus.
pub fn build_tree_update(
    semantics: &[ThumbSemantics; 2],
    visuals: &SliderVisuals,
    focus: Option<Thumb>,
    label: Option<&str>,
) -> TreeUpdate {
    let mut group = Node::new(Role::Group);
    if let Some(label) = label {
        group.set_label(label.to_string());
    }
    group.set_children(vec![MIN_THUMB_NODE_ID, MAX_THUMB_NODE_ID]);

    let mut nodes = vec![(SLIDER_NODE_ID, group)];
    for semantics in semantics {
        let visual = visuals.thumb(semantics.thumb);
        nodes.push((semantics.node_id(), semantics.to_node(visual)));
    }

    TreeUpdate {
        nodes,
        tree: Some(Tree::new(SLIDER_NODE_ID)),
        tree_id: TreeId::ROOT,
        focus: focus.map(thumb_node_id).unwrap_or(SLIDER_NODE_ID),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render::LabelFormat, value::RangeSnapshot};

    fn fixtures() -> ([ThumbSemantics; 2], SliderVisuals) {
        let domain = Domain::new(0.0, 100.0, 1.0, None).unwrap();
        let semantics = Thumb::ALL.map(|thumb| ThumbSemantics::for_domain(thumb, &domain, None));
        let visuals = SliderVisuals::compute(
            &domain,
            RangeSnapshot { min: 25.0, max: 75.0 },
            &LabelFormat::new("", "%"),
        );
        (semantics, visuals)
    }

    #[test]
    fn thumb_nodes_carry_value_and_bounds() {
        let (semantics, visuals) = fixtures();
        let node = semantics[1].to_node(visuals.thumb(Thumb::Max));

        assert_eq!(node.role(), Role::Slider);
        assert_eq!(node.numeric_value(), Some(75.0));
        assert_eq!(node.min_numeric_value(), Some(0.0));
        assert_eq!(node.max_numeric_value(), Some(100.0));
        assert_eq!(node.numeric_value_step(), Some(1.0));
        assert_eq!(node.numeric_value_jump(), Some(10.0));
        assert!(node.supports_action(Action::Increment));
        assert!(node.supports_action(Action::Decrement));
    }

    #[test]
    fn labels_are_qualified_per_thumb() {
        let domain = Domain::new(0.0, 10.0, 1.0, None).unwrap();
        let min = ThumbSemantics::for_domain(Thumb::Min, &domain, Some("Price"));
        assert_eq!(min.label, "Price (minimum)");
        assert_eq!(min.description.as_deref(), Some("range start"));
        let max = ThumbSemantics::for_domain(Thumb::Max, &domain, None);
        assert_eq!(max.label, "Maximum");
    }

    #[test]
    fn tree_update_focuses_the_focused_thumb() {
        let (semantics, visuals) = fixtures();

        let update = build_tree_update(&semantics, &visuals, Some(Thumb::Min), Some("Range"));
        assert_eq!(update.nodes.len(), 3);
        assert_eq!(update.focus, MIN_THUMB_NODE_ID);
        let (id, group) = &update.nodes[0];
        assert_eq!(*id, SLIDER_NODE_ID);
        assert_eq!(group.children(), &[MIN_THUMB_NODE_ID, MAX_THUMB_NODE_ID]);

        let update = build_tree_update(&semantics, &visuals, None, None);
        assert_eq!(update.focus, SLIDER_NODE_ID);
    }

    #[test]
    fn node_ids_map_back_to_thumbs() {
        for thumb in Thumb::ALL {
            assert_eq!(thumb_for_node(thumb_node_id(thumb)), Some(thumb));
        }
        assert_eq!(thumb_for_node(SLIDER_NODE_ID), None);
    }
}
