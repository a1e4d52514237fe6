//! Shared overlay types: lifecycle states, dismissal reasons, events,
//! errors, and the per-kind policy table.

use std::time::Duration;

use thiserror::Error;

use crate::anchored::AnchorConfig;
use crate::host::{Layer, NodeId};
use crate::modal::ModalConfig;
use crate::popover::PopoverConfig;
use crate::toast::ToastConfig;
use crate::tray::TrayConfig;

/// Identifier of an overlay registered with [`crate::manager::Overlays`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub(crate) u64);

impl OverlayId {
    /// Get the raw numeric value.
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Why an overlay was (or is being) dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissType {
    /// Explicit dismissal from code or a default action.
    Manual,
    /// The user cancelled, e.g. with the Escape key.
    Cancel,
    /// A pointer event landed outside the overlay.
    OutOfBounds,
    /// The hosting panel tore the view down.
    PanelDestroyed,
}

/// Lifecycle of a single overlay.
///
/// ```text
/// Closed -> Showing -> AnimatingIn -> Shown -> AnimatingOut -> Closed
/// ```
///
/// Non-animated transitions skip the animating states. Once back in
/// `Closed` after having been shown, the overlay is retired and cannot be
/// shown again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Closed,
    Showing,
    AnimatingIn,
    Shown,
    AnimatingOut,
}

impl LifecycleState {
    /// States in which the view is attached and participating in input.
    pub fn is_open(self) -> bool {
        !matches!(self, LifecycleState::Closed)
    }
}

/// Events emitted by the manager. Exactly one `Shown` and at most one
/// `Dismissed` per overlay lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Shown(OverlayId),
    Dismissed(OverlayId, DismissType),
    /// A tray was dragged past its dismissal threshold and released.
    DraggedOff(OverlayId),
}

/// Configuration errors. Transient geometry conditions are not errors.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("no overlay container layer found for the reference node")]
    ContainerNotFound,
    #[error("unknown overlay {0:?}")]
    UnknownOverlay(OverlayId),
    #[error("overlay {0:?} was already dismissed and cannot be shown again")]
    ReusedAfterDismiss(OverlayId),
}

/// A key press routed to [`crate::manager::Overlays::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Char(char),
}

/// The overlay kind, carrying the kind-specific configuration.
#[derive(Debug, Clone)]
pub enum OverlayKind {
    Tooltip,
    Popover(PopoverConfig),
    Modal(ModalConfig),
    Tray(TrayConfig),
    Toast(ToastConfig),
}

impl OverlayKind {
    /// The stacking layer this kind attaches to.
    pub(crate) fn layer(&self) -> Layer {
        match self {
            OverlayKind::Tooltip => Layer::Tooltip,
            OverlayKind::Popover(_) | OverlayKind::Modal(_) | OverlayKind::Tray(_) => Layer::Popup,
            OverlayKind::Toast(_) => Layer::Notification,
        }
    }

    /// Whether show/dismiss walk the animation steps.
    pub(crate) fn should_animate(&self) -> bool {
        true
    }

    /// Dismissal policy. `PanelDestroyed` bypasses this check entirely.
    pub(crate) fn should_dismiss(&self, reason: DismissType) -> bool {
        match self {
            // Trays accept every reason, including outside clicks.
            OverlayKind::Tray(_) => true,
            OverlayKind::Popover(cfg) => {
                cfg.outside_click_dismiss || reason != DismissType::OutOfBounds
            }
            OverlayKind::Modal(cfg) => {
                cfg.outside_click_dismiss || reason != DismissType::OutOfBounds
            }
            // Out-of-bounds clicks never dismiss by default.
            _ => reason != DismissType::OutOfBounds,
        }
    }

    /// Duration of the enter animation.
    pub(crate) fn enter_duration(&self) -> Duration {
        match self {
            OverlayKind::Tooltip => Duration::from_millis(crate::tooltip::TOOLTIP_FADE_IN_MS),
            OverlayKind::Popover(_) | OverlayKind::Modal(_) => {
                Duration::from_millis(crate::popover::POPUP_TRANSITION_MS)
            }
            OverlayKind::Tray(_) => Duration::from_millis(crate::tray::TRAY_SLIDE_IN_MS),
            OverlayKind::Toast(_) => Duration::from_millis(crate::toast::TOAST_TRANSITION_MS),
        }
    }

    /// Duration of the exit animation, `None` for kinds that disappear
    /// immediately. Trays are handled separately: their exit duration is
    /// proportional to the remaining travel.
    pub(crate) fn exit_duration(&self) -> Option<Duration> {
        match self {
            OverlayKind::Toast(_) => {
                Some(Duration::from_millis(crate::toast::TOAST_TRANSITION_MS))
            }
            _ => None,
        }
    }

    /// Kinds positioned by the anchor math.
    pub(crate) fn is_anchored(&self) -> bool {
        matches!(self, OverlayKind::Tooltip | OverlayKind::Popover(_))
    }

    pub(crate) fn is_toast(&self) -> bool {
        matches!(self, OverlayKind::Toast(_))
    }
}

/// A fully configured overlay, ready to be registered with the manager.
///
/// Built by the per-kind builders ([`crate::tooltip::Tooltip`],
/// [`crate::popover::Popover`], ...). The engine never creates nodes; the
/// caller supplies the view and its notable descendants.
#[derive(Debug, Clone)]
pub struct OverlaySpec {
    /// Arbitrary node inside the target panel, used to resolve the
    /// container layer.
    pub(crate) reference: NodeId,
    /// Root node of the overlay.
    pub(crate) view: NodeId,
    /// Content node, watched for resize.
    pub(crate) content: Option<NodeId>,
    /// Node moved by the positioning math; defaults to `view`.
    pub(crate) movable: Option<NodeId>,
    /// Node focused once shown.
    pub(crate) focusable: Option<NodeId>,
    /// Whether Escape dismisses with `Cancel`.
    pub(crate) keyboard_dismiss: bool,
    /// Explicit container override; bypasses layer resolution.
    pub(crate) container: Option<NodeId>,
    /// Anchored positioning configuration, for anchored kinds.
    pub(crate) anchor: Option<AnchorConfig>,
    pub(crate) kind: OverlayKind,
}

impl OverlaySpec {
    pub(crate) fn movable(&self) -> NodeId {
        self.movable.unwrap_or(self.view)
    }
}
