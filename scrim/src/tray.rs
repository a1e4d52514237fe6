//! Tray overlays.
//!
//! Slide in from a viewport edge, accept every dismissal reason, and can be
//! dragged off-screen by their handle: releasing past a quarter of the
//! travel settles the tray off-screen and dismisses it.

use crate::host::NodeId;
use crate::overlay::{OverlayKind, OverlaySpec};

/// Slide-in duration.
pub const TRAY_SLIDE_IN_MS: u64 = 125;

/// Fraction of the tray size past which a released drag collapses it.
pub(crate) const TRAY_COLLAPSE_THRESHOLD: f32 = 0.25;

/// The viewport edge a tray rests against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrayPosition {
    Left,
    Right,
    #[default]
    Bottom,
}

/// Tray-specific behavior flags.
#[derive(Debug, Clone)]
pub struct TrayConfig {
    pub position: TrayPosition,
    /// Whether the drag handle is shown (and drags accepted).
    pub handle_visible: bool,
    /// Duration of the settle animation after a released drag.
    pub transition_ms: u64,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            position: TrayPosition::Bottom,
            handle_visible: true,
            transition_ms: 150,
        }
    }
}

/// Builder entry point for tray overlays.
pub struct Tray;

impl Tray {
    /// Start building a tray. `view` is the fullscreen backdrop node,
    /// `tray_element` the sliding panel inside it.
    pub fn builder(reference: NodeId, view: NodeId, tray_element: NodeId) -> TrayBuilder {
        TrayBuilder {
            reference,
            view,
            tray_element,
            content: None,
            container: None,
            config: TrayConfig::default(),
        }
    }
}

/// Fluent configuration for a tray.
pub struct TrayBuilder {
    reference: NodeId,
    view: NodeId,
    tray_element: NodeId,
    content: Option<NodeId>,
    container: Option<NodeId>,
    config: TrayConfig,
}

impl TrayBuilder {
    /// The viewport edge the tray rests against.
    pub fn position(mut self, position: TrayPosition) -> Self {
        self.config.position = position;
        self
    }

    /// Show or hide the drag handle.
    pub fn handle_visible(mut self, visible: bool) -> Self {
        self.config.handle_visible = visible;
        self
    }

    /// Duration of the settle animation after a released drag.
    pub fn transition_duration_ms(mut self, ms: u64) -> Self {
        self.config.transition_ms = ms;
        self
    }

    /// Content node, watched for resize.
    pub fn content(mut self, node: NodeId) -> Self {
        self.content = Some(node);
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
            content: self.content,
            movable: Some(self.tray_element),
            focusable: Some(self.tray_element),
            keyboard_dismiss: true,
            container: self.container,
            anchor: None,
            kind: OverlayKind::Tray(self.config),
        }
    }
}
