//! Modal overlays.
//!
//! Viewport-centered (the host styles the scrim and centering, not the
//! positioning math), animated, Escape-dismissable, with opt-in dismissal
//! from clicks on the scrim.

use crate::anchored::OutsideClickStrategy;
use crate::host::NodeId;
use crate::overlay::{OverlayKind, OverlaySpec};

/// How much of the viewport a modal takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalFullScreenMode {
    /// Normal size, centered.
    #[default]
    None,
    /// Fullscreen with a small margin left around the content.
    FullScreen,
    /// Fullscreen without any margin.
    FullScreenTakeOver,
}

/// Modal-specific behavior flags.
#[derive(Debug, Clone, Default)]
pub struct ModalConfig {
    pub fullscreen_mode: ModalFullScreenMode,
    /// Dismiss with `OutOfBounds` when a click lands on the scrim. Off by
    /// default.
    pub outside_click_dismiss: bool,
    /// How outside clicks are detected.
    pub outside_click_strategy: OutsideClickStrategy,
}

/// Builder entry point for modal overlays.
pub struct Modal;

impl Modal {
    /// Start building a modal. `view` is the fullscreen scrim node,
    /// `content` the dialog inside it.
    pub fn builder(reference: NodeId, view: NodeId, content: NodeId) -> ModalBuilder {
        ModalBuilder {
            reference,
            view,
            content,
            container: None,
            keyboard_dismiss: true,
            config: ModalConfig {
                outside_click_strategy: OutsideClickStrategy::BOUNDS,
                ..Default::default()
            },
        }
    }
}

/// Fluent configuration for a modal.
pub struct ModalBuilder {
    reference: NodeId,
    view: NodeId,
    content: NodeId,
    container: Option<NodeId>,
    keyboard_dismiss: bool,
    config: ModalConfig,
}

impl ModalBuilder {
    pub fn fullscreen_mode(mut self, mode: ModalFullScreenMode) -> Self {
        self.config.fullscreen_mode = mode;
        self
    }

    /// Allow dismissal from clicks on the scrim.
    pub fn outside_click_dismiss(mut self, enabled: bool) -> Self {
        self.config.outside_click_dismiss = enabled;
        self
    }

    /// How outside clicks are detected.
    pub fn outside_click_strategy(mut self, strategy: OutsideClickStrategy) -> Self {
        self.config.outside_click_strategy = strategy;
        self
    }

    /// Allow or forbid Escape-key dismissal.
    pub fn keyboard_dismiss(mut self, enabled: bool) -> Self {
        self.keyboard_dismiss = enabled;
        self
    }

    /// Attach to an explicit container instead of the popup layer.
    pub fn container(mut self, node: NodeId) -> Self {
        self.container = Some(node);
        self
    }

    pub fn build(self) -> OverlaySpec {
        OverlaySpec {
            reference: self.reference,
            view: self.view,
            content: Some(self.content),
            movable: None,
            focusable: Some(self.content),
            keyboard_dismiss: self.keyboard_dismiss,
            container: self.container,
            anchor: None,
            kind: OverlayKind::Modal(self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_defaults() {
        let content = NodeId::new();
        let spec = Modal::builder(NodeId::new(), NodeId::new(), content).build();
        assert!(spec.keyboard_dismiss);
        assert_eq!(spec.focusable, Some(content));
        let OverlayKind::Modal(cfg) = &spec.kind else {
            panic!("expected modal kind");
        };
        assert!(!cfg.outside_click_dismiss);
        assert_eq!(cfg.fullscreen_mode, ModalFullScreenMode::None);
    }
}
