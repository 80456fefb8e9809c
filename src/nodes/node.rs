//! Canvas node: tree links, presentation content and geometry

use super::port::{port_rect, PortType};
use crate::layout::{compute_layout, NodeContent, NodeLayout, TextMeasure};
use crate::model::{display_name, BehaviorModel};
use crate::preferences::Preferences;
use egui::{Pos2, Rect, Vec2};
use std::fmt;

/// Unique identifier for a node
pub type NodeId = usize;

/// Whether a node can parent other nodes, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// No output port, never has children
    Leaf,
    /// Has an output port and an ordered child list (left to right)
    Branch { children: Vec<NodeId> },
}

/// A node on the tree canvas bound to one behaviour model
pub struct TreeNode {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
    layout: NodeLayout,
    content: NodeContent,
    model: Option<Box<dyn BehaviorModel>>,
}

impl TreeNode {
    /// Creates an orphan node at `position` with an empty layout
    pub fn new(
        id: NodeId,
        model: Box<dyn BehaviorModel>,
        has_output: bool,
        position: Pos2,
    ) -> Self {
        let kind = if has_output {
            NodeKind::Branch {
                children: Vec::new(),
            }
        } else {
            NodeKind::Leaf
        };
        Self {
            id,
            parent: None,
            kind,
            layout: NodeLayout::at(position),
            content: NodeContent::default(),
            model: Some(model),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn has_output(&self) -> bool {
        matches!(self.kind, NodeKind::Branch { .. })
    }

    /// Children in visual order; always empty for leaves
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Branch { children } => children,
            NodeKind::Leaf => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Branch { children } => Some(children),
            NodeKind::Leaf => None,
        }
    }

    pub fn child_at(&self, index: usize) -> Option<NodeId> {
        self.children().get(index).copied()
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    pub fn contains(&self, child: NodeId) -> bool {
        self.children().contains(&child)
    }

    pub fn is_orphan(&self) -> bool {
        self.parent.is_none()
    }

    /// The bound model, `None` once it has been released
    pub fn model(&self) -> Option<&dyn BehaviorModel> {
        self.model.as_deref()
    }

    pub(crate) fn release_model(&mut self) -> Option<Box<dyn BehaviorModel>> {
        self.model.take()
    }

    /// Header, body and icon from the last text refresh
    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    pub fn layout(&self) -> &NodeLayout {
        &self.layout
    }

    /// Bounding rectangle from the last layout pass
    pub fn rect(&self) -> Rect {
        self.layout.rect
    }

    pub fn content_rect(&self) -> Rect {
        self.layout.content_rect
    }

    /// Top-left corner of the bounding rectangle
    pub fn position(&self) -> Pos2 {
        self.layout.rect.min
    }

    pub fn center_x(&self) -> f32 {
        self.layout.rect.center().x
    }

    /// Move the node so its top-left corner is at `position`, keeping its size.
    /// The position is rounded to whole canvas units.
    pub fn set_position(&mut self, position: Pos2) {
        let delta = position - self.layout.rect.min;
        self.translate(delta);
    }

    /// Move the node by `delta`, landing on whole canvas units
    pub fn translate(&mut self, delta: Vec2) {
        let target = (self.layout.rect.min + delta).round();
        self.layout = self.layout.translate(target - self.layout.rect.min);
    }

    pub fn input_port(&self, prefs: &Preferences) -> Rect {
        port_rect(self.layout.rect, prefs, PortType::Input)
    }

    pub fn output_port(&self, prefs: &Preferences) -> Rect {
        port_rect(self.layout.rect, prefs, PortType::Output)
    }

    /// Rebuild header, body and icon from the bound model.
    ///
    /// # Panics
    /// If the model has been released.
    pub fn refresh_text(&mut self) {
        let model = self.bound_model();
        let fallback = display_name(model.type_name());

        let header = if model.title().is_empty() {
            fallback.clone()
        } else {
            model.title().to_string()
        };

        let mut body = String::new();
        model.write_description(&mut body);
        if body.is_empty() {
            body = fallback;
        }
        let comment = model.comment();
        if !comment.is_empty() {
            body.push_str("\n\n");
            body.push_str(comment);
        }

        let icon = model.icon();
        self.content = NodeContent { header, body, icon };
    }

    /// Re-measure the current content and resize around the current position
    pub fn resize(&mut self, prefs: &Preferences, measurer: &dyn TextMeasure) {
        self.layout = compute_layout(self.position(), &self.content, prefs, measurer).snapped(prefs);
    }

    /// Refresh the text from the model, then resize.
    ///
    /// # Panics
    /// If the model has been released.
    pub fn update_layout(&mut self, prefs: &Preferences, measurer: &dyn TextMeasure) {
        self.refresh_text();
        self.resize(prefs, measurer);
        log::trace!("Node {} laid out at {:?}", self.id, self.layout.rect);
    }

    fn bound_model(&self) -> &dyn BehaviorModel {
        match self.model.as_deref() {
            Some(model) => model,
            None => panic!("node {} has no bound model to lay out", self.id),
        }
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("kind", &self.kind)
            .field("rect", &self.layout.rect)
            .field("header", &self.content.header)
            .field("model", &self.model.as_deref().map(|model| model.type_name()))
            .finish()
    }
}
