//! Toast overlays.
//!
//! Toasts route their show/dismiss through the notification queue so only
//! one is visible at a time. They sit in one of the fixed screen slots,
//! auto-dismiss after their duration, and ignore the keyboard.

use crate::host::NodeId;
use crate::notifications::NotificationDuration;
use crate::overlay::{OverlayKind, OverlaySpec};

/// Enter/exit transition duration.
pub const TOAST_TRANSITION_MS: u64 = 150;

/// How a toast animates in and out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
    Slide,
    #[default]
    Fade,
}

/// The screen slot a toast is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastPlacement {
    Top,
    #[default]
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopStart,
    TopEnd,
    BottomStart,
    BottomEnd,
}

/// Toast-specific behavior flags.
#[derive(Debug, Clone, Default)]
pub struct ToastConfig {
    pub placement: ToastPlacement,
    pub animation: AnimationMode,
    pub duration: NotificationDuration,
}

/// Builder entry point for toast overlays.
pub struct Toast;

impl Toast {
    /// Start building a toast. `view` is the toast's root node.
    pub fn builder(reference: NodeId, view: NodeId) -> ToastBuilder {
        ToastBuilder {
            reference,
            view,
            content: None,
            container: None,
            config: ToastConfig::default(),
        }
    }
}

/// Fluent configuration for a toast.
pub struct ToastBuilder {
    reference: NodeId,
    view: NodeId,
    content: Option<NodeId>,
    container: Option<NodeId>,
    config: ToastConfig,
}

impl ToastBuilder {
    /// The screen slot the toast is pinned to.
    pub fn placement(mut self, placement: ToastPlacement) -> Self {
        self.config.placement = placement;
        self
    }

    /// How the toast animates in and out.
    pub fn animation_mode(mut self, mode: AnimationMode) -> Self {
        self.config.animation = mode;
        self
    }

    /// How long the toast stays on screen.
    pub fn duration(mut self, duration: NotificationDuration) -> Self {
        self.config.duration = duration;
        self
    }

    /// Content node, watched for resize.
    pub fn content(mut self, node: NodeId) -> Self {
        self.content = Some(node);
        self
    }

    /// Attach to an explicit container instead of the notification layer.
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
            anchor: None,
            kind: OverlayKind::Toast(self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_defaults() {
        let spec = Toast::builder(NodeId::new(), NodeId::new()).build();
        assert!(!spec.keyboard_dismiss);
        let OverlayKind::Toast(cfg) = &spec.kind else {
            panic!("expected toast kind");
        };
        assert_eq!(cfg.placement, ToastPlacement::Bottom);
        assert_eq!(cfg.animation, AnimationMode::Fade);
        assert_eq!(cfg.duration, NotificationDuration::Short);
    }
}
