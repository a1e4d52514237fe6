//! In-memory [`HostTree`] implementation.
//!
//! Backs the test suite and serves as the reference for what a toolkit
//! binding must provide. Nodes carry explicit world rects; there is no
//! layout engine, callers set bounds directly.

use std::collections::HashMap;

use crate::geometry::{Point, Rect};
use crate::host::{HostTree, Layer, NodeId};
use crate::position::PositionResult;
use crate::tray::TrayPosition;

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    bounds: Rect,
    visible: bool,
    layout: Option<PositionResult>,
    slide: Option<(TrayPosition, f32)>,
}

/// A host tree held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryTree {
    nodes: HashMap<NodeId, Node>,
    // creation order, used as stable root iteration order for picking
    order: Vec<NodeId>,
    layers: HashMap<Layer, NodeId>,
    focused: Option<NodeId>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached node with the given world bounds.
    pub fn create_node(&mut self, bounds: Rect) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(
            id,
            Node {
                parent: None,
                children: Vec::new(),
                bounds,
                visible: true,
                layout: None,
                slide: None,
            },
        );
        self.order.push(id);
        id
    }

    /// Register a node as the container for an overlay layer.
    pub fn set_layer(&mut self, layer: Layer, node: NodeId) {
        self.layers.insert(layer, node);
    }

    /// Update a node's world bounds (e.g. to simulate the anchor moving).
    pub fn set_bounds(&mut self, node: NodeId, bounds: Rect) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.bounds = bounds;
        }
    }

    /// Destroy a node entirely, detaching it first.
    pub fn remove_node(&mut self, node: NodeId) {
        self.detach(node);
        if let Some(n) = self.nodes.remove(&node) {
            for child in n.children {
                if let Some(c) = self.nodes.get_mut(&child) {
                    c.parent = None;
                }
            }
        }
        self.order.retain(|id| *id != node);
        if self.focused == Some(node) {
            self.focused = None;
        }
    }

    pub fn is_visible(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.visible)
    }

    /// The last layout applied through [`HostTree::set_layout`].
    pub fn layout_of(&self, node: NodeId) -> Option<&PositionResult> {
        self.nodes.get(&node).and_then(|n| n.layout.as_ref())
    }

    /// The last slide offset applied through [`HostTree::set_slide_offset`].
    pub fn slide_of(&self, node: NodeId) -> Option<(TrayPosition, f32)> {
        self.nodes.get(&node).and_then(|n| n.slide)
    }

    pub fn children_of(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    fn pick_in(&self, node: NodeId, point: Point, best: &mut Option<NodeId>) {
        let Some(n) = self.nodes.get(&node) else {
            return;
        };
        if !n.visible {
            return;
        }
        if n.bounds.contains(point) {
            *best = Some(node);
        }
        for child in &n.children {
            self.pick_in(*child, point, best);
        }
    }
}

impl HostTree for MemoryTree {
    fn world_bounds(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(&node).map(|n| n.bounds)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        } else {
            return;
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(&node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != node);
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = None;
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn is_topmost(&self, node: NodeId) -> bool {
        let Some(parent) = self.parent(node) else {
            return false;
        };
        self.nodes
            .get(&parent)
            .is_some_and(|p| p.children.last() == Some(&node))
    }

    fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn pick(&self, point: Point) -> Option<NodeId> {
        let mut best = None;
        for id in &self.order {
            if self.parent(*id).is_none() {
                self.pick_in(*id, point, &mut best);
            }
        }
        best
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.visible = visible;
        }
    }

    fn set_layout(&mut self, node: NodeId, layout: &PositionResult) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.layout = Some(*layout);
            // Mirror the layout into the world rect so repeated queries see
            // the element where it was just placed.
            n.bounds.x = layout.left + layout.margin_left;
            n.bounds.y = layout.top + layout.margin_top;
        }
    }

    fn set_slide_offset(&mut self, node: NodeId, position: TrayPosition, offset: f32) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.slide = Some((position, offset));
        }
    }

    fn find_layer(&self, _reference: NodeId, layer: Layer) -> Option<NodeId> {
        self.layers.get(&layer).copied()
    }

    fn focus(&mut self, node: NodeId) {
        if self.nodes.contains_key(&node) {
            self.focused = Some(node);
        }
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_detach_reparent() {
        let mut tree = MemoryTree::new();
        let a = tree.create_node(Rect::new(0.0, 0.0, 100.0, 100.0));
        let b = tree.create_node(Rect::new(0.0, 0.0, 10.0, 10.0));
        let c = tree.create_node(Rect::new(0.0, 0.0, 10.0, 10.0));

        tree.attach(a, b);
        tree.attach(a, c);
        assert_eq!(tree.parent(b), Some(a));
        assert!(tree.is_topmost(c));
        assert!(!tree.is_topmost(b));

        tree.attach(a, b); // re-attach moves to the top
        assert!(tree.is_topmost(b));

        tree.detach(b);
        assert_eq!(tree.parent(b), None);
        assert_eq!(tree.children_of(a), &[c]);
    }

    #[test]
    fn descendant_walk() {
        let mut tree = MemoryTree::new();
        let root = tree.create_node(Rect::ZERO);
        let mid = tree.create_node(Rect::ZERO);
        let leaf = tree.create_node(Rect::ZERO);
        tree.attach(root, mid);
        tree.attach(mid, leaf);

        assert!(tree.is_descendant_of(leaf, root));
        assert!(tree.is_descendant_of(leaf, leaf));
        assert!(!tree.is_descendant_of(root, leaf));
    }

    #[test]
    fn pick_prefers_topmost() {
        let mut tree = MemoryTree::new();
        let root = tree.create_node(Rect::new(0.0, 0.0, 200.0, 200.0));
        let below = tree.create_node(Rect::new(10.0, 10.0, 50.0, 50.0));
        let above = tree.create_node(Rect::new(10.0, 10.0, 50.0, 50.0));
        tree.attach(root, below);
        tree.attach(root, above);

        assert_eq!(tree.pick(Point::new(20.0, 20.0)), Some(above));
        tree.set_visible(above, false);
        assert_eq!(tree.pick(Point::new(20.0, 20.0)), Some(below));
        assert_eq!(tree.pick(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn removed_node_disappears() {
        let mut tree = MemoryTree::new();
        let n = tree.create_node(Rect::new(0.0, 0.0, 10.0, 10.0));
        tree.focus(n);
        assert_eq!(tree.focused(), Some(n));
        tree.remove_node(n);
        assert_eq!(tree.world_bounds(n), None);
        assert_eq!(tree.focused(), None);
    }
}
