//! Node tree: ownership of canvas nodes and their parent/child links

use super::node::{NodeId, TreeNode};
use crate::layout::TextMeasure;
use crate::model::BehaviorModel;
use crate::preferences::Preferences;
use egui::Pos2;
use log::{debug, warn};
use std::collections::BTreeMap;

/// All nodes of an editing session, keyed by id.
///
/// The parent's child list is the authoritative membership; each child's
/// `parent` field mirrors it. Every mutation here keeps the two consistent.
#[derive(Debug)]
pub struct NodeTree {
    nodes: BTreeMap<NodeId, TreeNode>,
    next_node_id: NodeId,
}

impl NodeTree {
    /// Creates a new empty tree
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_node_id: 0,
        }
    }

    /// Adds an orphan node bound to `model` and returns its id
    pub fn add_node<M: BehaviorModel + 'static>(
        &mut self,
        model: M,
        has_output: bool,
        position: Pos2,
    ) -> NodeId {
        let id = self.next_node_id;
        self.next_node_id += 1;
        self.nodes
            .insert(id, TreeNode::new(id, Box::new(model), has_output, position));
        debug!("Added node {} (has_output: {})", id, has_output);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All live nodes in id order
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values()
    }

    /// Nodes without a parent, in id order
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.is_orphan())
            .map(TreeNode::id)
            .collect()
    }

    /// Move `child` under `parent`, or make it a root when `parent` is `None`.
    ///
    /// The child always leaves its previous parent first, so it is never
    /// listed twice; re-attaching to the same parent moves it to the end of
    /// the list. It is appended only when the new parent has an output;
    /// under a leaf it ends up detached and this returns `false`.
    ///
    /// Unknown ids, attaching a node under itself, or under one of its own
    /// descendants change nothing and return `false`.
    pub fn attach(&mut self, child: NodeId, parent: Option<NodeId>) -> bool {
        if !self.nodes.contains_key(&child) {
            warn!("Cannot attach unknown node {}", child);
            return false;
        }
        if let Some(parent_id) = parent {
            if !self.nodes.contains_key(&parent_id) {
                warn!("Cannot attach node {} to unknown parent {}", child, parent_id);
                return false;
            }
            if parent_id == child || self.is_ancestor(child, parent_id) {
                warn!(
                    "Cannot attach node {} below its own descendant {}",
                    child, parent_id
                );
                return false;
            }
        }

        if let Some(previous) = self.nodes.get(&child).and_then(TreeNode::parent) {
            if let Some(children) = self.nodes.get_mut(&previous).and_then(TreeNode::children_mut) {
                children.retain(|&id| id != child);
            }
        }

        let attached = match parent {
            None => true,
            Some(parent_id) => match self.nodes.get_mut(&parent_id).and_then(TreeNode::children_mut) {
                Some(children) => {
                    children.push(child);
                    true
                }
                None => false,
            },
        };

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = if attached { parent } else { None };
        }

        match parent {
            Some(parent_id) if attached => debug!("Attached node {} to {}", child, parent_id),
            Some(parent_id) => warn!("Node {} has no output, {} left detached", parent_id, child),
            None => debug!("Detached node {}", child),
        }
        attached
    }

    /// Make `child` a root
    pub fn detach(&mut self, child: NodeId) -> bool {
        self.attach(child, None)
    }

    /// Remove a node from the tree.
    ///
    /// The node is detached from its parent and its direct children become
    /// orphans; grandchildren stay attached to those children. Returns the
    /// released model so its owner can dispose of it, or `None` for an
    /// unknown id.
    pub fn destroy(&mut self, id: NodeId) -> Option<Box<dyn BehaviorModel>> {
        if !self.nodes.contains_key(&id) {
            return None;
        }
        self.detach(id);

        let mut node = self.nodes.remove(&id)?;
        let orphans = node.children_mut().map(std::mem::take).unwrap_or_default();
        for orphan in &orphans {
            if let Some(child) = self.nodes.get_mut(orphan) {
                child.parent = None;
            }
        }

        debug!("Destroyed node {}, orphaned {} children", id, orphans.len());
        node.release_model()
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|node| node.child_at(index))
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.nodes.get(&id).map_or(0, TreeNode::child_count)
    }

    pub fn contains(&self, parent: NodeId, child: NodeId) -> bool {
        self.nodes.get(&parent).is_some_and(|node| node.contains(child))
    }

    /// `false` for unknown ids
    pub fn is_orphan(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(TreeNode::is_orphan)
    }

    /// True when `ancestor` appears on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.nodes.get(&id).and_then(TreeNode::parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes.get(&parent).and_then(TreeNode::parent);
        }
        false
    }

    /// Stable sort of a node's children by horizontal centre, left to right
    pub fn sort_children(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let mut keyed: Vec<(NodeId, f32)> = node
            .children()
            .iter()
            .map(|&child| {
                let center = self.nodes.get(&child).map_or(f32::MAX, TreeNode::center_x);
                (child, center)
            })
            .collect();
        keyed.sort_by(|a, b| a.1.total_cmp(&b.1));

        if let Some(children) = self.nodes.get_mut(&id).and_then(TreeNode::children_mut) {
            *children = keyed.into_iter().map(|(child, _)| child).collect();
        }
    }

    /// Y of the child whose position is vertically closest to this node's.
    ///
    /// Ties go to the first child in the current list order, which is
    /// insertion order unless [`Self::sort_children`] ran. `None` when there
    /// are no children.
    pub fn nearest_input_y(&self, id: NodeId) -> Option<f32> {
        let node = self.nodes.get(&id)?;
        let y = node.position().y;

        let mut nearest: Option<(f32, f32)> = None;
        for child in node.children().iter().filter_map(|child| self.nodes.get(child)) {
            let child_y = child.position().y;
            let distance = (child_y - y).abs();
            if nearest.map_or(true, |(best, _)| distance < best) {
                nearest = Some((distance, child_y));
            }
        }
        nearest.map(|(_, child_y)| child_y)
    }

    /// Horizontal span of this node's centre and its children's centres
    pub fn bounds_x(&self, id: NodeId) -> Option<(f32, f32)> {
        let node = self.nodes.get(&id)?;
        let center = node.center_x();
        let bounds = node
            .children()
            .iter()
            .filter_map(|child| self.nodes.get(child))
            .map(TreeNode::center_x)
            .fold((center, center), |(min, max), x| (min.min(x), max.max(x)));
        Some(bounds)
    }

    /// Move a node so its top-left corner is at `position`
    pub fn set_position(&mut self, id: NodeId, position: Pos2) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Refresh text and resize one node
    ///
    /// # Panics
    /// If the node's model has been released.
    pub fn update_layout(
        &mut self,
        id: NodeId,
        prefs: &Preferences,
        measurer: &dyn TextMeasure,
    ) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.update_layout(prefs, measurer);
                true
            }
            None => false,
        }
    }

    /// Refresh text and resize every node
    pub fn layout_all(&mut self, prefs: &Preferences, measurer: &dyn TextMeasure) {
        for node in self.nodes.values_mut() {
            node.update_layout(prefs, measurer);
        }
        debug!("Laid out {} nodes", self.nodes.len());
    }

    /// Depth-first, parent-before-children walk starting at `root`
    pub fn iter_preorder(&self, root: NodeId) -> PreorderIter<'_> {
        PreorderIter::new(self, root)
    }

    /// Number of levels in the subtree rooted at `id`, 0 for unknown ids
    pub fn depth(&self, id: NodeId) -> usize {
        match self.nodes.get(&id) {
            Some(node) => {
                1 + node
                    .children()
                    .iter()
                    .map(|&child| self.depth(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

pub struct PreorderIter<'a> {
    tree: &'a NodeTree,
    stack: Vec<NodeId>,
}

impl<'a> PreorderIter<'a> {
    fn new(tree: &'a NodeTree, root: NodeId) -> Self {
        Self {
            tree,
            stack: vec![root],
        }
    }
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children().iter().rev());
                return Some(node);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedMeasure, TestBehavior};
    use egui::Vec2;

    fn branch(tree: &mut NodeTree, x: f32, y: f32) -> NodeId {
        tree.add_node(TestBehavior::default(), true, Pos2::new(x, y))
    }

    fn leaf(tree: &mut NodeTree, x: f32, y: f32) -> NodeId {
        tree.add_node(TestBehavior::default(), false, Pos2::new(x, y))
    }

    fn assert_consistent(tree: &NodeTree) {
        for node in tree.iter() {
            for &child in node.children() {
                assert_eq!(tree.node(child).and_then(TreeNode::parent), Some(node.id()));
            }
            if let Some(parent) = node.parent() {
                let listed = tree
                    .node(parent)
                    .map_or(0, |p| p.children().iter().filter(|&&c| c == node.id()).count());
                assert_eq!(listed, 1);
            }
            assert_eq!(node.is_orphan(), node.parent().is_none());
        }
    }

    fn membership(tree: &NodeTree) -> usize {
        tree.iter().map(TreeNode::child_count).sum()
    }

    #[test]
    fn test_attach_and_detach() {
        let mut tree = NodeTree::new();
        let root = branch(&mut tree, 0.0, 0.0);
        let child = leaf(&mut tree, 0.0, 100.0);

        assert!(tree.is_orphan(child));
        assert!(tree.attach(child, Some(root)));
        assert!(!tree.is_orphan(child));
        assert!(tree.contains(root, child));
        assert_eq!(tree.child_at(root, 0), Some(child));
        assert_eq!(tree.child_at(root, 1), None);
        assert_consistent(&tree);

        assert!(tree.detach(child));
        assert!(tree.is_orphan(child));
        assert_eq!(tree.child_count(root), 0);
        assert_consistent(&tree);
    }

    #[test]
    fn test_attach_twice_does_not_duplicate() {
        let mut tree = NodeTree::new();
        let root = branch(&mut tree, 0.0, 0.0);
        let a = leaf(&mut tree, 0.0, 0.0);
        let b = leaf(&mut tree, 0.0, 0.0);

        tree.attach(a, Some(root));
        tree.attach(b, Some(root));
        tree.attach(a, Some(root));

        assert_eq!(tree.child_count(root), 2);
        assert_eq!(tree.node(root).map(|n| n.children().to_vec()), Some(vec![b, a]));
        assert_consistent(&tree);
    }

    #[test]
    fn test_reparent_conserves_membership() {
        let mut tree = NodeTree::new();
        let first = branch(&mut tree, 0.0, 0.0);
        let second = branch(&mut tree, 0.0, 0.0);
        let child = leaf(&mut tree, 0.0, 0.0);

        tree.attach(child, Some(first));
        let before = membership(&tree);
        assert!(tree.attach(child, Some(second)));

        assert_eq!(membership(&tree), before);
        assert!(!tree.contains(first, child));
        assert!(tree.contains(second, child));
        assert_eq!(tree.node(child).and_then(TreeNode::parent), Some(second));
        assert_consistent(&tree);
    }

    #[test]
    fn test_attach_under_leaf_leaves_detached() {
        let mut tree = NodeTree::new();
        let root = branch(&mut tree, 0.0, 0.0);
        let target = leaf(&mut tree, 0.0, 0.0);
        let child = leaf(&mut tree, 0.0, 0.0);

        tree.attach(child, Some(root));
        assert!(!tree.attach(child, Some(target)));
        assert!(tree.is_orphan(child));
        assert_eq!(tree.child_count(root), 0);
        assert_eq!(tree.child_count(target), 0);
        assert!(!tree.contains(target, child));
        assert_consistent(&tree);
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let mut tree = NodeTree::new();
        let root = branch(&mut tree, 0.0, 0.0);
        let middle = branch(&mut tree, 0.0, 0.0);
        let bottom = branch(&mut tree, 0.0, 0.0);
        tree.attach(middle, Some(root));
        tree.attach(bottom, Some(middle));

        assert!(!tree.attach(root, Some(bottom)));
        assert!(!tree.attach(root, Some(root)));
        assert!(tree.is_orphan(root));
        assert!(tree.contains(middle, bottom));
        assert_eq!(tree.depth(root), 3);
        assert_consistent(&tree);
    }

    #[test]
    fn test_unknown_ids_degrade() {
        let mut tree = NodeTree::new();
        let root = branch(&mut tree, 0.0, 0.0);
        assert!(!tree.attach(42, Some(root)));
        assert!(!tree.attach(root, Some(42)));
        assert_eq!(tree.child_count(42), 0);
        assert_eq!(tree.child_at(42, 0), None);
        assert!(!tree.contains(42, root));
        assert!(!tree.is_orphan(42));
        assert_eq!(tree.nearest_input_y(42), None);
        assert_eq!(tree.bounds_x(42), None);
        assert!(tree.destroy(42).is_none());
    }

    #[test]
    fn test_destroy_orphans_children_only() {
        let mut tree = NodeTree::new();
        let top = branch(&mut tree, 0.0, 0.0);
        let node = branch(&mut tree, 0.0, 0.0);
        let left = branch(&mut tree, 0.0, 0.0);
        let right = leaf(&mut tree, 0.0, 0.0);
        let grandchild = leaf(&mut tree, 0.0, 0.0);
        tree.attach(node, Some(top));
        tree.attach(left, Some(node));
        tree.attach(right, Some(node));
        tree.attach(grandchild, Some(left));

        let released = tree.destroy(node);
        assert!(released.is_some());
        assert!(tree.node(node).is_none());
        assert_eq!(tree.child_count(top), 0);
        assert!(tree.is_orphan(left));
        assert!(tree.is_orphan(right));
        assert!(tree.contains(left, grandchild));
        assert_eq!(tree.roots(), vec![top, left, right]);
        assert_consistent(&tree);
    }

    #[test]
    fn test_sort_children_by_center() {
        let mut tree = NodeTree::new();
        let root = branch(&mut tree, 0.0, 0.0);
        let c = leaf(&mut tree, 300.0, 100.0);
        let a = leaf(&mut tree, -50.0, 100.0);
        let b = leaf(&mut tree, 120.0, 100.0);
        let tie = leaf(&mut tree, 120.0, 50.0);
        for child in [c, a, b, tie] {
            tree.attach(child, Some(root));
        }

        tree.sort_children(root);
        let order = tree.node(root).map(|n| n.children().to_vec());
        assert_eq!(order, Some(vec![a, b, tie, c]));

        tree.sort_children(root);
        assert_eq!(tree.node(root).map(|n| n.children().to_vec()), order);
    }

    #[test]
    fn test_sort_children_with_nan_positions() {
        let mut tree = NodeTree::new();
        let root = branch(&mut tree, 0.0, 0.0);
        let mut finite = Vec::new();
        for i in 0..22 {
            let x = if i % 4 == 0 { f32::NAN } else { (22 - i) as f32 * 10.0 };
            let child = leaf(&mut tree, x, 100.0);
            tree.attach(child, Some(root));
            if !x.is_nan() {
                finite.push(child);
            }
        }

        tree.sort_children(root);
        assert_eq!(tree.child_count(root), 22);

        let sorted_finite: Vec<NodeId> = tree
            .node(root)
            .map(|n| n.children().to_vec())
            .unwrap_or_default()
            .into_iter()
            .filter(|id| finite.contains(id))
            .collect();
        finite.reverse();
        assert_eq!(sorted_finite, finite);
        assert_consistent(&tree);
    }

    #[test]
    fn test_sort_children_on_leaf_is_noop() {
        let mut tree = NodeTree::new();
        let node = leaf(&mut tree, 0.0, 0.0);
        tree.sort_children(node);
        assert_eq!(tree.child_count(node), 0);
    }

    #[test]
    fn test_nearest_input_y() {
        let mut tree = NodeTree::new();
        let root = branch(&mut tree, 0.0, 0.0);
        assert_eq!(tree.nearest_input_y(root), None);

        for y in [5.0, -2.0, 1.0] {
            let child = leaf(&mut tree, 0.0, y);
            tree.attach(child, Some(root));
        }
        assert_eq!(tree.nearest_input_y(root), Some(1.0));
    }

    #[test]
    fn test_nearest_input_y_tie_keeps_list_order() {
        let mut tree = NodeTree::new();
        let root = branch(&mut tree, 0.0, 0.0);
        let below = leaf(&mut tree, 0.0, 3.0);
        let above = leaf(&mut tree, 0.0, -3.0);
        tree.attach(below, Some(root));
        tree.attach(above, Some(root));
        assert_eq!(tree.nearest_input_y(root), Some(3.0));
    }

    #[test]
    fn test_bounds_x() {
        let mut tree = NodeTree::new();
        let root = branch(&mut tree, 10.0, 0.0);
        assert_eq!(tree.bounds_x(root), Some((10.0, 10.0)));

        let child = leaf(&mut tree, 50.0, 100.0);
        tree.attach(child, Some(root));
        assert_eq!(tree.bounds_x(root), Some((10.0, 50.0)));
    }

    #[test]
    fn test_preorder_and_layout_all() {
        let mut tree = NodeTree::new();
        let root = branch(&mut tree, 0.0, 0.0);
        let left = branch(&mut tree, 0.0, 0.0);
        let right = leaf(&mut tree, 0.0, 0.0);
        let deep = leaf(&mut tree, 0.0, 0.0);
        tree.attach(left, Some(root));
        tree.attach(right, Some(root));
        tree.attach(deep, Some(left));

        let order: Vec<NodeId> = tree.iter_preorder(root).map(TreeNode::id).collect();
        assert_eq!(order, vec![root, left, deep, right]);

        let prefs = Preferences::default();
        tree.layout_all(&prefs, &FixedMeasure::new(Vec2::new(40.0, 10.0), Vec2::new(60.0, 30.0)));
        for node in tree.iter() {
            assert_eq!(node.rect().size(), Vec2::new(84.0, 78.0));
        }
        assert!(tree.set_position(right, Pos2::new(200.0, 150.0)));
        assert_eq!(tree.node(right).map(TreeNode::center_x), Some(242.0));
    }
}
