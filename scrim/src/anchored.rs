//! Configuration shared by anchored overlay kinds.

use std::ops::BitOr;

use crate::host::NodeId;
use crate::placement::Placement;
use crate::position::PositionOptions;

/// How outside clicks are detected for dismissal.
///
/// Strategies compose: when both are set, a click counts as outside only if
/// every enabled strategy agrees (any "inside" verdict suppresses
/// dismissal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutsideClickStrategy {
    /// Outside if the pointer position is outside the overlay's bounds.
    pub bounds: bool,
    /// Outside if the picked node under the pointer is not a descendant of
    /// the overlay.
    pub pick: bool,
}

impl OutsideClickStrategy {
    pub const NONE: Self = Self {
        bounds: false,
        pick: false,
    };

    pub const BOUNDS: Self = Self {
        bounds: true,
        pick: false,
    };

    pub const PICK: Self = Self {
        bounds: false,
        pick: true,
    };

    /// Check if no strategy is enabled.
    pub fn is_empty(&self) -> bool {
        !self.bounds && !self.pick
    }
}

impl BitOr for OutsideClickStrategy {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self {
            bounds: self.bounds || rhs.bounds,
            pick: self.pick || rhs.pick,
        }
    }
}

/// Anchored positioning configuration carried by tooltips and popovers.
#[derive(Debug, Clone, Copy)]
pub struct AnchorConfig {
    /// The node the overlay is anchored to. `None` disables positioning
    /// (and the bounds poll) until an anchor is set.
    pub anchor: Option<NodeId>,
    /// Preferred placement relative to the anchor.
    pub placement: Placement,
    /// Offset in pixels along the primary placement direction.
    pub offset: f32,
    /// Offset in pixels along the secondary placement direction.
    pub cross_offset: f32,
    /// Allow flipping to the opposite side when out of room.
    pub should_flip: bool,
    /// Snap the cross axis back inside the container.
    pub cross_snap: bool,
    /// Whether the tip/arrow should be shown next to the anchor.
    pub arrow_visible: bool,
    /// Inner padding in pixels the host applies around the content. Not
    /// part of the positioning math.
    pub container_padding: f32,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            anchor: None,
            placement: Placement::Bottom,
            offset: 0.0,
            cross_offset: 0.0,
            should_flip: true,
            cross_snap: true,
            arrow_visible: true,
            container_padding: 0.0,
        }
    }
}

impl AnchorConfig {
    pub(crate) fn options(&self) -> PositionOptions {
        PositionOptions {
            placement: self.placement,
            offset: self.offset,
            cross_offset: self.cross_offset,
            should_flip: self.should_flip,
            cross_snap: self.cross_snap,
        }
    }
}
