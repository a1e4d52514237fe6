//! Tooltip overlays.
//!
//! Anchored, fades in, disappears instantly, never reacts to the keyboard
//! or to outside clicks. Attaches to the tooltip layer so it stacks above
//! regular popups.

use crate::anchored::AnchorConfig;
use crate::host::NodeId;
use crate::overlay::{OverlayKind, OverlaySpec};
use crate::placement::Placement;

/// Fade-in duration.
pub const TOOLTIP_FADE_IN_MS: u64 = 250;

/// Builder entry point for tooltip overlays.
pub struct Tooltip;

impl Tooltip {
    /// Start building a tooltip. `reference` is any node inside the target
    /// panel; `view` is the tooltip's root node, supplied by the caller.
    pub fn builder(reference: NodeId, view: NodeId) -> TooltipBuilder {
        TooltipBuilder {
            reference,
            view,
            content: None,
            container: None,
            anchor: AnchorConfig::default(),
        }
    }
}

/// Fluent configuration for a tooltip.
pub struct TooltipBuilder {
    reference: NodeId,
    view: NodeId,
    content: Option<NodeId>,
    container: Option<NodeId>,
    anchor: AnchorConfig,
}

impl TooltipBuilder {
    /// Anchor the tooltip to a node. Usually the hovered element.
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

    /// Inner padding in pixels the host applies around the content.
    pub fn container_padding(mut self, padding: f32) -> Self {
        self.anchor.container_padding = padding;
        self
    }

    /// Content node, watched for resize.
    pub fn content(mut self, node: NodeId) -> Self {
        self.content = Some(node);
        self
    }

    /// Attach to an explicit container instead of the tooltip layer.
    pub fn container(mut self, node: NodeId) -> Self {
        self.container = Some(node);
        self
    }

    pub fn build(self) -> OverlaySpec {
        OverlaySpec {
            reference: self.reference,
            view: self.view,
            content: self.content,
            movable: None,
            focusable: None,
            keyboard_dismiss: false,
            container: self.container,
            anchor: Some(self.anchor),
            kind: OverlayKind::Tooltip,
        }
    }
}
