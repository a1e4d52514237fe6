//! Host tree abstraction.
//!
//! The engine never owns the widget tree. It talks to the hosting toolkit
//! through [`HostTree`]: rect queries, attach/detach, visibility, hit
//! testing, and focus. The in-memory implementation used by the tests lives
//! in [`crate::memory_tree`].

use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::{Point, Rect};
use crate::position::PositionResult;
use crate::tray::TrayPosition;

/// Counter for generating unique node IDs.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a node in the host tree.
///
/// Hosts map these to their own widget handles. IDs are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new unique node ID.
    pub fn new() -> Self {
        Self(NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Create a node ID from an existing value.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric value.
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// The stacking layer an overlay view is attached to.
///
/// Hosts keep one node per layer above the regular content; tooltips stack
/// above popups, notifications above tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Popup,
    Tooltip,
    Notification,
}

/// The toolkit-side tree the overlay engine drives.
///
/// All coordinates are world coordinates. `world_bounds` returns `None` for
/// destroyed nodes and may return rects with NaN sizes for nodes that have
/// not been laid out yet; callers must tolerate both.
pub trait HostTree {
    /// World rect of a node, `None` if the node is unknown (destroyed).
    fn world_bounds(&self, node: NodeId) -> Option<Rect>;

    /// Append `child` as the last child of `parent` (topmost sibling).
    fn attach(&mut self, parent: NodeId, child: NodeId);

    /// Remove `node` from its parent, if any.
    fn detach(&mut self, node: NodeId);

    /// The parent of `node`, if attached.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` currently has a parent.
    fn is_attached(&self, node: NodeId) -> bool {
        self.parent(node).is_some()
    }

    /// Whether `node` is the last child of its parent.
    fn is_topmost(&self, node: NodeId) -> bool;

    /// Whether `node` is `ancestor` or transitively parented under it.
    fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool;

    /// Topmost visible node containing `point`, if any.
    fn pick(&self, point: Point) -> Option<NodeId>;

    /// Toggle node visibility without detaching it.
    fn set_visible(&mut self, node: NodeId, visible: bool);

    /// Apply a computed anchored position to a node.
    fn set_layout(&mut self, node: NodeId, layout: &PositionResult);

    /// Set a tray's slide offset from its resting edge (0 = fully shown,
    /// negative = pushed off-screen).
    fn set_slide_offset(&mut self, node: NodeId, position: TrayPosition, offset: f32);

    /// Resolve the overlay container layer for the panel that hosts
    /// `reference`. `None` when the reference is not inside a panel that
    /// carries overlay layers.
    fn find_layer(&self, reference: NodeId, layer: Layer) -> Option<NodeId>;

    /// Give keyboard focus to a node.
    fn focus(&mut self, node: NodeId);

    /// The currently focused node, if any.
    fn focused(&self) -> Option<NodeId>;
}
