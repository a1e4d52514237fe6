//! Scrim: Overlay Lifecycle and Anchored Positioning Engine
//!
//! Scrim drives transient UI surfaces (tooltips, popovers, modals, trays,
//! toasts) on top of any retained widget tree:
//! - A queued show/dismiss state machine with per-kind dismissal policies
//! - Anchored placement math with flipping, containment snapping, and tip
//!   (arrow) positioning
//! - Anchor tracking, focus handover and restore, and outside-click routing
//!
//! # Architecture
//!
//! The engine never owns widgets. The host implements [`HostTree`] (rect
//! queries, attach/detach, visibility, hit testing, focus) and calls
//! [`Overlays::tick`] once per frame with a monotonic clock; every state
//! change lands there and is reported as an [`OverlayEvent`]. An in-memory
//! host, [`MemoryTree`], backs the tests and documents the contract.
//!
//! # Usage
//!
//! ```ignore
//! use scrim::{MemoryTree, Overlays, Placement, Popover};
//!
//! let mut tree = MemoryTree::new();
//! // ... create panel, layer, anchor, and popover nodes ...
//!
//! let mut overlays = Overlays::new();
//! let id = overlays.open(
//!     Popover::builder(reference, view, content)
//!         .anchor(anchor)
//!         .placement(Placement::TopStart)
//!         .build(),
//! );
//! overlays.show(id)?;
//! for event in overlays.tick(&mut tree, now)? {
//!     // react to Shown / Dismissed / DraggedOff
//! }
//! ```

// Geometry and placement math
pub mod geometry;
pub mod placement;
pub mod position;

// Host tree abstraction
pub mod host;
pub mod memory_tree;

// Lifecycle engine
pub mod anchored;
mod dispatch;
pub mod manager;
pub mod notifications;
pub mod overlay;

// Per-kind builders
pub mod modal;
pub mod popover;
pub mod toast;
pub mod tooltip;
pub mod tray;

// Re-export core types
pub use anchored::{AnchorConfig, OutsideClickStrategy};
pub use geometry::{Point, Rect, Size};
pub use host::{HostTree, Layer, NodeId};
pub use manager::Overlays;
pub use memory_tree::MemoryTree;
pub use modal::{Modal, ModalConfig, ModalFullScreenMode};
pub use notifications::NotificationDuration;
pub use overlay::{
    DismissType, Key, LifecycleState, OverlayError, OverlayEvent, OverlayId, OverlayKind,
    OverlaySpec,
};
pub use placement::Placement;
pub use popover::{POPUP_TRANSITION_MS, Popover, PopoverConfig};
pub use position::{PositionOptions, PositionResult, compute_position};
pub use toast::{AnimationMode, Toast, ToastConfig, ToastPlacement};
pub use tooltip::{TOOLTIP_FADE_IN_MS, Tooltip};
pub use tray::{TRAY_SLIDE_IN_MS, Tray, TrayConfig, TrayPosition};
