//! Popover overlays.
//!
//! Anchored, animated both ways, dismissable via Escape and (by default)
//! outside clicks. The movable node is the inner popover element; the root
//! view can act as a modal backdrop that blocks outside interaction.

use crate::anchored::{AnchorConfig, OutsideClickStrategy};
use crate::host::NodeId;
use crate::overlay::{OverlayKind, OverlaySpec};
use crate::placement::Placement;

/// Enter transition duration shared by popovers and modals.
pub const POPUP_TRANSITION_MS: u64 = 150;

/// Popover-specific behavior flags.
#[derive(Debug, Clone)]
pub struct PopoverConfig {
    /// Block all interaction outside the popover instead of letting clicks
    /// through.
    pub modal_backdrop: bool,
    /// Dismiss with `OutOfBounds` when a click lands outside.
    pub outside_click_dismiss: bool,
    /// How outside clicks are detected.
    pub outside_click_strategy: OutsideClickStrategy,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            modal_backdrop: false,
            outside_click_dismiss: true,
            outside_click_strategy: OutsideClickStrategy::BOUNDS,
        }
    }
}

/// Builder entry point for popover overlays.
pub struct Popover;

impl Popover {
    /// Start building a popover. `view` is the root node, `content` the
    /// caller's content inside it.
    pub fn builder(reference: NodeId, view: NodeId, content: NodeId) -> PopoverBuilder {
        PopoverBuilder {
            reference,
            view,
            content,
            movable: None,
            focusable: None,
            container: None,
            keyboard_dismiss: true,
            anchor: AnchorConfig::default(),
            config: PopoverConfig::default(),
        }
    }
}

/// Fluent configuration for a popover.
pub struct PopoverBuilder {
    reference: NodeId,
    view: NodeId,
    content: NodeId,
    movable: Option<NodeId>,
    focusable: Option<NodeId>,
    container: Option<NodeId>,
    keyboard_dismiss: bool,
    anchor: AnchorConfig,
    config: PopoverConfig,
}

impl PopoverBuilder {
    /// Anchor the popover to a node.
    pub fn anchor(mut self, node: NodeId) -> Self {
        self.anchor.anchor = Some(node);
        self
    }

    /// Preferred placement relative to the anchor.
    pub fn placement(mut self, placement: Placement) -> Self {
        self.anchor.placement = placement;
        self
    }

    /// Offset along the primary placement direction, in pixels.
    pub fn offset(mut self, offset: f32) -> Self {
        self.anchor.offset = offset;
        self
    }

    /// Offset along the secondary placement direction, in pixels.
    pub fn cross_offset(mut self, cross_offset: f32) -> Self {
        self.anchor.cross_offset = cross_offset;
        self
    }

    /// Allow flipping to the opposite side when out of room.
    pub fn should_flip(mut self, flip: bool) -> Self {
        self.anchor.should_flip = flip;
        self
    }

    /// Show or hide the tip/arrow next to the anchor.
    pub fn arrow_visible(mut self, visible: bool) -> Self {
        self.anchor.arrow_visible = visible;
        self
    }

    /// Inner padding in pixels the host applies around the content.
    pub fn container_padding(mut self, padding: f32) -> Self {
        self.anchor.container_padding = padding;
        self
    }

    /// The node moved by the positioning math. Typically the inner popover
    /// element, while the root view spans the container.
    pub fn movable(mut self, node: NodeId) -> Self {
        self.movable = Some(node);
        self
    }

    /// Node focused once shown. Defaults to the movable node.
    pub fn focusable(mut self, node: NodeId) -> Self {
        self.focusable = Some(node);
        self
    }

    /// Attach to an explicit container instead of the popup layer.
    pub fn container(mut self, node: NodeId) -> Self {
        self.container = Some(node);
        self
    }

    /// Allow or forbid Escape-key dismissal.
    pub fn keyboard_dismiss(mut self, enabled: bool) -> Self {
        self.keyboard_dismiss = enabled;
        self
    }

    /// Block all interaction outside the popover.
    pub fn modal_backdrop(mut self, enabled: bool) -> Self {
        self.config.modal_backdrop = enabled;
        self
    }

    /// Allow or forbid dismissal from outside clicks.
    pub fn outside_click_dismiss(mut self, enabled: bool) -> Self {
        self.config.outside_click_dismiss = enabled;
        self
    }

    /// How outside clicks are detected.
    pub fn outside_click_strategy(mut self, strategy: OutsideClickStrategy) -> Self {
        self.config.outside_click_strategy = strategy;
        self
    }

    pub fn build(self) -> OverlaySpec {
        let focusable = self.focusable.or(self.movable).or(Some(self.view));
        OverlaySpec {
            reference: self.reference,
            view: self.view,
            content: Some(self.content),
            movable: self.movable,
            focusable,
            keyboard_dismiss: self.keyboard_dismiss,
            container: self.container,
            anchor: Some(self.anchor),
            kind: OverlayKind::Popover(self.config),
        }
    }
}
