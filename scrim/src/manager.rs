//! The overlay manager.
//!
//! [`Overlays`] owns every registered overlay, the FIFO message queue, and
//! the per-overlay scheduled step. `show` and `dismiss` only post messages;
//! all host mutation and every emitted [`OverlayEvent`] happens inside
//! [`Overlays::tick`], which the embedding application calls once per frame
//! with a monotonic clock.

use std::collections::HashMap;
use std::time::Duration;

use crate::dispatch::{FRAME, MessageQueue, PopupMessage, Scheduled, Step};
use crate::geometry::{Point, Rect};
use crate::host::{HostTree, NodeId};
use crate::notifications::NotificationQueue;
use crate::overlay::{
    DismissType, Key, LifecycleState, OverlayError, OverlayEvent, OverlayId, OverlayKind,
    OverlaySpec,
};
use crate::placement::Placement;
use crate::position::compute_position;
use crate::tray::{TRAY_COLLAPSE_THRESHOLD, TrayPosition};

/// One registered overlay.
#[derive(Debug)]
struct Entry {
    spec: OverlaySpec,
    state: LifecycleState,
    /// Set once the overlay has completed a dismissal; retired overlays can
    /// never be shown again.
    retired: bool,
    /// Toast waiting in the notification queue.
    queued: bool,
    /// The single pending lifecycle step. Scheduling replaces it.
    pending: Option<Scheduled>,
    /// Resolved container node, cached after the first show.
    container: Option<NodeId>,
    current_placement: Option<Placement>,
    /// Anchor rect observed by the last poll.
    anchor_bounds: Option<Rect>,
    /// When the next anchor poll is due. `None` = not polling.
    next_poll: Option<Duration>,
    /// Node focused before the overlay was shown.
    prev_focus: Option<NodeId>,
    /// When a toast entered the visible slot, for auto-dismissal.
    shown_at: Option<Duration>,
    /// Tray offset from its resting edge, in [-size, 0].
    slide_offset: f32,
}

impl Entry {
    fn new(spec: OverlaySpec) -> Self {
        let container = spec.container;
        Self {
            spec,
            state: LifecycleState::Closed,
            retired: false,
            queued: false,
            pending: None,
            container,
            current_placement: None,
            anchor_bounds: None,
            next_poll: None,
            prev_focus: None,
            shown_at: None,
            slide_offset: 0.0,
        }
    }
}

/// What a pointer-down resolved to, decided before any state is touched.
enum PointerAction {
    Swallow,
    Dismiss(OverlayId),
}

/// The overlay manager.
#[derive(Debug, Default)]
pub struct Overlays {
    entries: HashMap<OverlayId, Entry>,
    /// Registration order; doubles as stacking order for input routing.
    order: Vec<OverlayId>,
    queue: MessageQueue,
    notifications: NotificationQueue,
    next_id: u64,
}

impl Overlays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an overlay. The overlay stays `Closed` until shown.
    pub fn open(&mut self, spec: OverlaySpec) -> OverlayId {
        self.next_id += 1;
        let id = OverlayId(self.next_id);
        self.entries.insert(id, Entry::new(spec));
        self.order.push(id);
        id
    }

    /// Request that an overlay be shown. Takes effect on the next tick.
    ///
    /// Toasts are handed to the notification queue instead and show once
    /// they reach the visible slot.
    pub fn show(&mut self, id: OverlayId) -> Result<(), OverlayError> {
        let entry = self
            .entries
            .get(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;
        if entry.retired {
            return Err(OverlayError::ReusedAfterDismiss(id));
        }
        if entry.spec.kind.is_toast() {
            self.notifications.enqueue(id);
            if let Some(e) = self.entries.get_mut(&id) {
                e.queued = true;
            }
        } else {
            self.queue.post(id, PopupMessage::Show);
        }
        Ok(())
    }

    /// Request a dismissal. Takes effect on the next tick.
    ///
    /// The per-kind policy may reject the reason (out-of-bounds clicks are
    /// rejected by default); rejected requests are silent no-ops.
    /// `PanelDestroyed` bypasses the policy.
    pub fn dismiss(&mut self, id: OverlayId, reason: DismissType) -> Result<(), OverlayError> {
        let entry = self
            .entries
            .get(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;
        if reason != DismissType::PanelDestroyed && !entry.spec.kind.should_dismiss(reason) {
            tracing::debug!(overlay = id.raw(), ?reason, "dismissal rejected by policy");
            return Ok(());
        }
        if entry.spec.kind.is_toast() && !self.notifications.is_current(id) {
            // Still waiting in the notification queue: pull it out and let
            // the dismiss message retire it without it ever showing.
            if self.notifications.remove_queued(id) {
                self.queue.post(id, PopupMessage::Dismiss(reason));
            }
            return Ok(());
        }
        self.queue.post(id, PopupMessage::Dismiss(reason));
        Ok(())
    }

    /// Drive the engine: drain posted messages, run due lifecycle steps,
    /// poll anchors, and advance the notification queue.
    ///
    /// `now` is any monotonic clock. Returns the events produced this tick,
    /// in the order they happened.
    pub fn tick(
        &mut self,
        host: &mut dyn HostTree,
        now: Duration,
    ) -> Result<Vec<OverlayEvent>, OverlayError> {
        let mut events = Vec::new();

        for (id, message) in self.queue.take() {
            match message {
                PopupMessage::Show => self.dispatch_show(host, id, now, &mut events)?,
                PopupMessage::Dismiss(reason) => {
                    self.dispatch_dismiss(host, id, reason, now, &mut events);
                }
            }
        }

        let due: Vec<OverlayId> = self
            .order
            .iter()
            .copied()
            .filter(|id| {
                self.entries
                    .get(id)
                    .and_then(|e| e.pending)
                    .is_some_and(|s| s.due <= now)
            })
            .collect();
        for id in due {
            let Some(scheduled) = self.entries.get_mut(&id).and_then(|e| e.pending.take()) else {
                continue;
            };
            self.run_step(host, id, scheduled.step, now, &mut events);
        }

        let polls: Vec<OverlayId> = self
            .order
            .iter()
            .copied()
            .filter(|id| {
                self.entries.get(id).is_some_and(|e| {
                    e.state.is_open() && e.next_poll.is_some_and(|due| due <= now)
                })
            })
            .collect();
        for id in polls {
            self.poll_anchor(host, id, now);
        }

        self.advance_notifications(host, now, &mut events)?;

        Ok(events)
    }

    /// The host destroyed a subtree containing an overlay view. Completes
    /// an immediate, non-animated `PanelDestroyed` dismissal.
    pub fn notify_detached(&mut self, host: &mut dyn HostTree, node: NodeId) -> Vec<OverlayEvent> {
        let mut events = Vec::new();
        let ids: Vec<OverlayId> = self
            .order
            .iter()
            .copied()
            .filter(|id| {
                self.entries
                    .get(id)
                    .is_some_and(|e| e.spec.view == node && e.state.is_open())
            })
            .collect();
        for id in ids {
            self.finish_dismiss(host, id, DismissType::PanelDestroyed, &mut events);
        }
        events
    }

    /// The host observed a content resize for `node`.
    pub fn notify_content_resized(&mut self, host: &mut dyn HostTree, node: NodeId) {
        let ids: Vec<OverlayId> = self
            .order
            .iter()
            .copied()
            .filter(|id| {
                self.entries.get(id).is_some_and(|e| {
                    e.state.is_open()
                        && (e.spec.content == Some(node) || e.spec.movable() == node)
                })
            })
            .collect();
        for id in ids {
            self.refresh_position(host, id);
        }
    }

    /// Route a key press. Escape dismisses the topmost overlay that allows
    /// keyboard dismissal and owns a focusable node. Returns whether the
    /// key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if key != Key::Escape {
            return false;
        }
        let target = self.order.iter().rev().copied().find(|id| {
            self.entries.get(id).is_some_and(|e| {
                e.state.is_open() && e.spec.keyboard_dismiss && e.spec.focusable.is_some()
            })
        });
        match target {
            Some(id) => self.dismiss(id, DismissType::Cancel).is_ok(),
            None => false,
        }
    }

    /// Route a pointer-down in world coordinates. Returns whether the event
    /// was consumed (dismissal triggered or swallowed by a backdrop).
    pub fn handle_pointer_down(&mut self, host: &dyn HostTree, point: Point) -> bool {
        let mut action = None;
        for id in self.order.iter().rev().copied() {
            let Some(entry) = self.entries.get(&id) else {
                continue;
            };
            if entry.state != LifecycleState::Shown {
                continue;
            }
            match &entry.spec.kind {
                OverlayKind::Popover(cfg) => {
                    let inside = host
                        .world_bounds(entry.spec.movable())
                        .is_some_and(|r| r.contains(point));
                    if cfg.modal_backdrop && !inside && !cfg.outside_click_dismiss {
                        action = Some(PointerAction::Swallow);
                        break;
                    }
                    if !cfg.outside_click_dismiss
                        || cfg.outside_click_strategy.is_empty()
                        || !host.is_topmost(entry.spec.view)
                    {
                        continue;
                    }
                    let mut outside = true;
                    if cfg.outside_click_strategy.bounds {
                        outside = !inside;
                    }
                    if outside && cfg.outside_click_strategy.pick {
                        if let Some(picked) = host.pick(point) {
                            if host.is_descendant_of(picked, entry.spec.view) {
                                outside = false;
                            }
                        }
                    }
                    if outside {
                        action = Some(PointerAction::Dismiss(id));
                        break;
                    }
                }
                OverlayKind::Modal(cfg) => {
                    let content = entry.spec.content.unwrap_or(entry.spec.view);
                    let inside_content = host
                        .world_bounds(content)
                        .is_some_and(|r| r.contains(point));
                    if cfg.outside_click_dismiss
                        && !cfg.outside_click_strategy.is_empty()
                        && host.is_topmost(entry.spec.view)
                    {
                        let mut outside = true;
                        if cfg.outside_click_strategy.bounds {
                            outside = !inside_content;
                        }
                        if outside && cfg.outside_click_strategy.pick {
                            if let Some(picked) = host.pick(point) {
                                if host.is_descendant_of(picked, entry.spec.view) {
                                    outside = false;
                                }
                            }
                        }
                        if outside {
                            action = Some(PointerAction::Dismiss(id));
                            break;
                        }
                    }
                    // The scrim blocks everything that did not hit the
                    // dialog itself.
                    let on_scrim = host
                        .world_bounds(entry.spec.view)
                        .is_some_and(|r| r.contains(point));
                    if on_scrim && !inside_content {
                        action = Some(PointerAction::Swallow);
                        break;
                    }
                }
                OverlayKind::Tray(_) => {
                    let inside_tray = host
                        .world_bounds(entry.spec.movable())
                        .is_some_and(|r| r.contains(point));
                    if !inside_tray {
                        action = Some(PointerAction::Dismiss(id));
                        break;
                    }
                }
                OverlayKind::Tooltip | OverlayKind::Toast(_) => {}
            }
        }
        match action {
            Some(PointerAction::Dismiss(id)) => {
                let _ = self.dismiss(id, DismissType::OutOfBounds);
                true
            }
            Some(PointerAction::Swallow) => true,
            None => false,
        }
    }

    /// Recompute and apply the anchored position of an overlay. No-op for
    /// non-anchored kinds, overlays without an anchor, or closed overlays.
    pub fn refresh_position(&mut self, host: &mut dyn HostTree, id: OverlayId) {
        let Some(entry) = self.entries.get(&id) else {
            return;
        };
        if !entry.state.is_open() || !entry.spec.kind.is_anchored() {
            return;
        }
        let Some(cfg) = entry.spec.anchor else {
            return;
        };
        let Some(anchor) = cfg.anchor else {
            return;
        };
        let movable = entry.spec.movable();
        let container = entry.container;

        let Some(element) = host.world_bounds(movable) else {
            return;
        };
        let Some(anchor_rect) = host.world_bounds(anchor) else {
            return;
        };
        let Some(container_rect) = container.and_then(|c| host.world_bounds(c)) else {
            return;
        };

        let result = compute_position(element, anchor_rect, container_rect, &cfg.options());
        host.set_layout(movable, &result);
        if let Some(e) = self.entries.get_mut(&id) {
            e.current_placement = Some(result.final_placement);
        }
    }

    // ------------------------------------------------------------------
    // Configuration after registration
    // ------------------------------------------------------------------

    /// Change the preferred placement and reposition.
    pub fn set_placement(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        placement: Placement,
    ) -> Result<(), OverlayError> {
        self.with_anchor_config(id, |cfg| cfg.placement = placement)?;
        self.refresh_position(host, id);
        Ok(())
    }

    /// Change the primary-axis offset and reposition.
    pub fn set_offset(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        offset: f32,
    ) -> Result<(), OverlayError> {
        self.with_anchor_config(id, |cfg| cfg.offset = offset)?;
        self.refresh_position(host, id);
        Ok(())
    }

    /// Change the cross-axis offset and reposition.
    pub fn set_cross_offset(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        cross_offset: f32,
    ) -> Result<(), OverlayError> {
        self.with_anchor_config(id, |cfg| cfg.cross_offset = cross_offset)?;
        self.refresh_position(host, id);
        Ok(())
    }

    /// Toggle placement flipping and reposition.
    pub fn set_should_flip(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        should_flip: bool,
    ) -> Result<(), OverlayError> {
        self.with_anchor_config(id, |cfg| cfg.should_flip = should_flip)?;
        self.refresh_position(host, id);
        Ok(())
    }

    /// Replace the anchor. `Some` restarts the bounds poll, `None` stops it.
    pub fn set_anchor(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        anchor: Option<NodeId>,
        now: Duration,
    ) -> Result<(), OverlayError> {
        self.with_anchor_config(id, |cfg| cfg.anchor = anchor)?;
        if let Some(entry) = self.entries.get_mut(&id) {
            match anchor {
                Some(node) => {
                    entry.anchor_bounds = host.world_bounds(node);
                    if entry.state.is_open() {
                        entry.next_poll = Some(now + FRAME);
                    }
                }
                None => {
                    entry.anchor_bounds = None;
                    entry.next_poll = None;
                }
            }
        }
        self.refresh_position(host, id);
        Ok(())
    }

    /// Allow or forbid Escape-key dismissal.
    pub fn set_keyboard_dismiss(
        &mut self,
        id: OverlayId,
        enabled: bool,
    ) -> Result<(), OverlayError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;
        entry.spec.keyboard_dismiss = enabled;
        Ok(())
    }

    /// Change a modal's fullscreen mode.
    pub fn set_fullscreen_mode(
        &mut self,
        id: OverlayId,
        mode: crate::modal::ModalFullScreenMode,
    ) -> Result<(), OverlayError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;
        if let OverlayKind::Modal(cfg) = &mut entry.spec.kind {
            cfg.fullscreen_mode = mode;
        }
        Ok(())
    }

    fn with_anchor_config(
        &mut self,
        id: OverlayId,
        update: impl FnOnce(&mut crate::anchored::AnchorConfig),
    ) -> Result<(), OverlayError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;
        if let Some(cfg) = entry.spec.anchor.as_mut() {
            update(cfg);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn state(&self, id: OverlayId) -> Option<LifecycleState> {
        self.entries.get(&id).map(|e| e.state)
    }

    /// The placement actually used by the last positioning pass.
    pub fn current_placement(&self, id: OverlayId) -> Option<Placement> {
        self.entries.get(&id).and_then(|e| e.current_placement)
    }

    /// Whether the overlay is on screen. For toasts this means holding the
    /// notification queue's visible slot.
    pub fn is_shown(&self, id: OverlayId) -> bool {
        let Some(entry) = self.entries.get(&id) else {
            return false;
        };
        if entry.spec.kind.is_toast() {
            self.notifications.is_current(id)
        } else {
            entry.state == LifecycleState::Shown
        }
    }

    /// Whether a toast is visible or next in line. Falls back to
    /// [`Self::is_shown`] for other kinds.
    pub fn is_shown_or_queued(&self, id: OverlayId) -> bool {
        let Some(entry) = self.entries.get(&id) else {
            return false;
        };
        if entry.spec.kind.is_toast() {
            self.notifications.is_current_or_next(id)
        } else {
            self.is_shown(id)
        }
    }

    // ------------------------------------------------------------------
    // Tray dragging
    // ------------------------------------------------------------------

    /// Move a shown tray along its slide axis. `delta` adjusts the offset
    /// from the resting edge; the offset clamps to `[-size, 0]`.
    pub fn tray_drag_by(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        delta: f32,
    ) -> Result<(), OverlayError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;
        let OverlayKind::Tray(cfg) = &entry.spec.kind else {
            return Ok(());
        };
        if !cfg.handle_visible || entry.state != LifecycleState::Shown {
            return Ok(());
        }
        let position = cfg.position;
        let movable = entry.spec.movable();
        let Some(size) = tray_size(host, movable, position) else {
            return Ok(());
        };
        entry.slide_offset = (entry.slide_offset + delta).clamp(-size, 0.0);
        let offset = entry.slide_offset;
        host.set_slide_offset(movable, position, offset);
        Ok(())
    }

    /// End a tray drag. Past a quarter of the travel the tray settles
    /// off-screen, emits `DraggedOff`, and dismisses with `Manual`;
    /// otherwise it eases back to rest.
    pub fn tray_drag_release(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        now: Duration,
    ) -> Result<(), OverlayError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;
        let OverlayKind::Tray(cfg) = &entry.spec.kind else {
            return Ok(());
        };
        if !cfg.handle_visible || entry.state != LifecycleState::Shown {
            return Ok(());
        }
        let movable = entry.spec.movable();
        let Some(size) = tray_size(host, movable, cfg.position) else {
            return Ok(());
        };
        let collapse = entry.slide_offset < -size * TRAY_COLLAPSE_THRESHOLD;
        entry.pending = Some(Scheduled {
            due: now + Duration::from_millis(cfg.transition_ms),
            step: Step::TraySettle { collapse },
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internal dispatch
    // ------------------------------------------------------------------

    fn dispatch_show(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        now: Duration,
        events: &mut Vec<OverlayEvent>,
    ) -> Result<(), OverlayError> {
        let animate;
        {
            let Some(entry) = self.entries.get_mut(&id) else {
                return Ok(());
            };
            if entry.retired || entry.state != LifecycleState::Closed {
                tracing::warn!(overlay = id.raw(), state = ?entry.state, "show ignored");
                return Ok(());
            }
            let container = match entry.container {
                Some(container) => container,
                None => host
                    .find_layer(entry.spec.reference, entry.spec.kind.layer())
                    .ok_or(OverlayError::ContainerNotFound)?,
            };
            entry.container = Some(container);
            if !host.is_attached(entry.spec.view) {
                host.set_visible(entry.spec.view, false);
                host.attach(container, entry.spec.view);
            }
            entry.prev_focus = host.focused();
            entry.state = LifecycleState::Showing;
            tracing::debug!(overlay = id.raw(), "showing overlay");
            if let Some(anchor) = entry.spec.anchor.and_then(|a| a.anchor) {
                entry.anchor_bounds = host.world_bounds(anchor);
                entry.next_poll = Some(now + FRAME);
            }
            animate = entry.spec.kind.should_animate();
            if animate {
                // let the host lay the hidden view out first
                entry.pending = Some(Scheduled {
                    due: now + FRAME,
                    step: Step::LayoutReady,
                });
            } else {
                host.set_visible(entry.spec.view, true);
            }
        }
        if !animate {
            self.refresh_position(host, id);
            self.finish_show(host, id, now, events);
        }
        Ok(())
    }

    fn run_step(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        step: Step,
        now: Duration,
        events: &mut Vec<OverlayEvent>,
    ) {
        match step {
            Step::LayoutReady => {
                let Some(entry) = self.entries.get_mut(&id) else {
                    return;
                };
                let view = entry.spec.view;
                host.set_visible(view, true);
                // trays start pushed fully off-screen
                if let OverlayKind::Tray(cfg) = &entry.spec.kind {
                    let position = cfg.position;
                    let movable = entry.spec.movable();
                    if let Some(size) = tray_size(host, movable, position) {
                        entry.slide_offset = -size;
                        host.set_slide_offset(movable, position, -size);
                    }
                }
                entry.pending = Some(Scheduled {
                    due: now + FRAME,
                    step: Step::AnimateIn,
                });
                self.refresh_position(host, id);
            }
            Step::AnimateIn => {
                let Some(entry) = self.entries.get_mut(&id) else {
                    return;
                };
                entry.state = LifecycleState::AnimatingIn;
                entry.pending = Some(Scheduled {
                    due: now + entry.spec.kind.enter_duration(),
                    step: Step::FinishIn,
                });
            }
            Step::FinishIn => self.finish_show(host, id, now, events),
            Step::FocusContent => {
                if let Some(focusable) = self
                    .entries
                    .get(&id)
                    .filter(|e| e.state == LifecycleState::Shown)
                    .and_then(|e| e.spec.focusable)
                {
                    host.focus(focusable);
                }
            }
            Step::FinishOut(reason) => self.finish_dismiss(host, id, reason, events),
            Step::TraySettle { collapse } => {
                let Some(entry) = self.entries.get_mut(&id) else {
                    return;
                };
                let OverlayKind::Tray(cfg) = &entry.spec.kind else {
                    return;
                };
                let position = cfg.position;
                let movable = entry.spec.movable();
                if collapse {
                    if let Some(size) = tray_size(host, movable, position) {
                        entry.slide_offset = -size;
                        host.set_slide_offset(movable, position, -size);
                    }
                    events.push(OverlayEvent::DraggedOff(id));
                    let _ = self.dismiss(id, DismissType::Manual);
                } else {
                    entry.slide_offset = 0.0;
                    host.set_slide_offset(movable, position, 0.0);
                }
            }
        }
    }

    fn finish_show(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        now: Duration,
        events: &mut Vec<OverlayEvent>,
    ) {
        let Some(entry) = self.entries.get_mut(&id) else {
            return;
        };
        entry.state = LifecycleState::Shown;
        if let OverlayKind::Tray(cfg) = &entry.spec.kind {
            let position = cfg.position;
            let movable = entry.spec.movable();
            entry.slide_offset = 0.0;
            host.set_slide_offset(movable, position, 0.0);
        }
        if entry.spec.kind.is_toast() {
            entry.shown_at = Some(now);
        }
        if entry.spec.focusable.is_some() {
            entry.pending = Some(Scheduled {
                due: now + FRAME,
                step: Step::FocusContent,
            });
        }
        tracing::debug!(overlay = id.raw(), "overlay shown");
        events.push(OverlayEvent::Shown(id));
    }

    fn dispatch_dismiss(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        reason: DismissType,
        now: Duration,
        events: &mut Vec<OverlayEvent>,
    ) {
        let exit;
        {
            let Some(entry) = self.entries.get_mut(&id) else {
                return;
            };
            match entry.state {
                LifecycleState::Closed => {
                    // a toast pulled from the queue before it ever showed
                    if entry.queued && !entry.retired {
                        entry.queued = false;
                        entry.retired = true;
                        events.push(OverlayEvent::Dismissed(id, reason));
                    }
                    return;
                }
                LifecycleState::AnimatingOut => return,
                _ => {}
            }
            entry.pending = None;
            exit = if reason == DismissType::PanelDestroyed {
                None
            } else {
                match &entry.spec.kind {
                    OverlayKind::Tray(cfg) => {
                        // remaining travel scales the slide-out time
                        let movable = entry.spec.movable();
                        tray_size(host, movable, cfg.position).map(|size| {
                            let travel = (size + entry.slide_offset).max(0.0);
                            let ratio = if size > 0.0 { travel / size } else { 0.0 };
                            Duration::from_millis(
                                (crate::tray::TRAY_SLIDE_IN_MS as f32 * ratio).floor() as u64,
                            )
                        })
                    }
                    kind => kind.exit_duration(),
                }
            };
            if let Some(duration) = exit {
                entry.state = LifecycleState::AnimatingOut;
                entry.pending = Some(Scheduled {
                    due: now + duration,
                    step: Step::FinishOut(reason),
                });
            }
        }
        if exit.is_none() {
            self.finish_dismiss(host, id, reason, events);
        }
    }

    fn finish_dismiss(
        &mut self,
        host: &mut dyn HostTree,
        id: OverlayId,
        reason: DismissType,
        events: &mut Vec<OverlayEvent>,
    ) {
        let prev_focus;
        let is_toast;
        {
            let Some(entry) = self.entries.get_mut(&id) else {
                return;
            };
            entry.state = LifecycleState::Closed;
            entry.retired = true;
            entry.queued = false;
            entry.pending = None;
            entry.next_poll = None;
            entry.anchor_bounds = None;
            prev_focus = entry.prev_focus.take();
            is_toast = entry.spec.kind.is_toast();
            host.set_visible(entry.spec.view, false);
            host.detach(entry.spec.view);
        }
        if is_toast {
            self.notifications.on_dismissed(id);
        }
        tracing::debug!(overlay = id.raw(), ?reason, "overlay dismissed");
        events.push(OverlayEvent::Dismissed(id, reason));
        if reason != DismissType::OutOfBounds {
            if let Some(node) = prev_focus {
                host.focus(node);
            }
        }
    }

    fn poll_anchor(&mut self, host: &mut dyn HostTree, id: OverlayId, now: Duration) {
        let changed;
        {
            let Some(entry) = self.entries.get_mut(&id) else {
                return;
            };
            let Some(anchor) = entry.spec.anchor.and_then(|a| a.anchor) else {
                entry.next_poll = None;
                return;
            };
            match host.world_bounds(anchor) {
                None => {
                    tracing::debug!(overlay = id.raw(), "anchor gone, bounds poll stopped");
                    entry.next_poll = None;
                    return;
                }
                Some(bounds) => {
                    entry.next_poll = Some(now + FRAME);
                    changed = entry.anchor_bounds.is_none_or(|b| !b.approx_eq(&bounds));
                    if changed {
                        entry.anchor_bounds = Some(bounds);
                    }
                }
            }
        }
        if changed {
            self.refresh_position(host, id);
        }
    }

    fn advance_notifications(
        &mut self,
        host: &mut dyn HostTree,
        now: Duration,
        events: &mut Vec<OverlayEvent>,
    ) -> Result<(), OverlayError> {
        if let Some(current) = self.notifications.current() {
            let timed_out = self.entries.get(&current).is_some_and(|entry| {
                if entry.state != LifecycleState::Shown {
                    return false;
                }
                let OverlayKind::Toast(cfg) = &entry.spec.kind else {
                    return false;
                };
                match (entry.shown_at, cfg.duration.timeout()) {
                    (Some(shown_at), Some(timeout)) => now >= shown_at + timeout,
                    _ => false,
                }
            });
            if timed_out {
                self.dispatch_dismiss(host, current, DismissType::Manual, now, events);
            }
        }
        if self.notifications.current().is_none() {
            if let Some(next) = self.notifications.promote() {
                if let Some(entry) = self.entries.get_mut(&next) {
                    entry.queued = false;
                }
                self.dispatch_show(host, next, now, events)?;
            }
        }
        Ok(())
    }
}

/// The tray's extent along its slide axis, `None` when unknown or
/// degenerate.
fn tray_size(host: &dyn HostTree, movable: NodeId, position: TrayPosition) -> Option<f32> {
    let bounds = host.world_bounds(movable)?;
    let size = match position {
        TrayPosition::Left | TrayPosition::Right => bounds.width,
        TrayPosition::Bottom => bounds.height,
    };
    (size.is_finite() && size > 0.0).then_some(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Layer;
    use crate::memory_tree::MemoryTree;
    use crate::modal::Modal;
    use crate::notifications::NotificationDuration;
    use crate::popover::Popover;
    use crate::toast::Toast;
    use crate::tooltip::Tooltip;
    use crate::tray::Tray;

    struct Fixture {
        tree: MemoryTree,
        reference: NodeId,
        anchor: NodeId,
    }

    fn fixture() -> Fixture {
        let mut tree = MemoryTree::new();
        let panel = tree.create_node(Rect::new(0.0, 0.0, 400.0, 400.0));
        for layer in [Layer::Popup, Layer::Tooltip, Layer::Notification] {
            let node = tree.create_node(Rect::new(0.0, 0.0, 400.0, 400.0));
            tree.attach(panel, node);
            tree.set_layer(layer, node);
        }
        let reference = tree.create_node(Rect::new(10.0, 10.0, 20.0, 20.0));
        tree.attach(panel, reference);
        let anchor = tree.create_node(Rect::new(100.0, 100.0, 50.0, 50.0));
        tree.attach(panel, anchor);
        Fixture {
            tree,
            reference,
            anchor,
        }
    }

    fn ms(t: u64) -> Duration {
        Duration::from_millis(t)
    }

    /// Tick at a 16ms cadence from `from_ms` through `to_ms`, collecting
    /// every event.
    fn pump(
        overlays: &mut Overlays,
        tree: &mut MemoryTree,
        from_ms: u64,
        to_ms: u64,
    ) -> Vec<OverlayEvent> {
        let mut events = Vec::new();
        let mut t = from_ms;
        while t <= to_ms {
            events.extend(overlays.tick(tree, ms(t)).unwrap());
            t += 16;
        }
        events
    }

    fn index_of(events: &[OverlayEvent], needle: OverlayEvent) -> usize {
        events
            .iter()
            .position(|e| *e == needle)
            .unwrap_or_else(|| panic!("{needle:?} not in {events:?}"))
    }

    fn popover_nodes(tree: &mut MemoryTree) -> (NodeId, NodeId, NodeId) {
        let view = tree.create_node(Rect::new(0.0, 0.0, 400.0, 400.0));
        let movable = tree.create_node(Rect::new(0.0, 0.0, 80.0, 30.0));
        let content = tree.create_node(Rect::new(0.0, 0.0, 80.0, 30.0));
        tree.attach(view, movable);
        tree.attach(movable, content);
        (view, movable, content)
    }

    fn shown_popover(f: &mut Fixture, overlays: &mut Overlays) -> (OverlayId, NodeId, NodeId) {
        let (view, movable, content) = popover_nodes(&mut f.tree);
        let id = overlays.open(
            Popover::builder(f.reference, view, content)
                .movable(movable)
                .anchor(f.anchor)
                .build(),
        );
        overlays.show(id).unwrap();
        let events = pump(overlays, &mut f.tree, 0, 250);
        assert!(events.contains(&OverlayEvent::Shown(id)));
        (id, view, movable)
    }

    #[test]
    fn popover_shows_positions_and_focuses() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (id, _view, movable) = shown_popover(&mut f, &mut overlays);

        assert_eq!(overlays.state(id), Some(LifecycleState::Shown));
        assert!(overlays.is_shown(id));
        let layout = f.tree.layout_of(movable).unwrap();
        assert_eq!(layout.left, 85.0);
        assert_eq!(layout.top, 150.0);
        assert_eq!(overlays.current_placement(id), Some(Placement::Bottom));
        assert_eq!(f.tree.focused(), Some(movable));
        assert!(f.tree.is_visible(movable));
    }

    #[test]
    fn escape_dismisses_with_cancel_and_retires() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (id, view, _) = shown_popover(&mut f, &mut overlays);

        assert!(overlays.handle_key(Key::Escape));
        let events = pump(&mut overlays, &mut f.tree, 260, 300);
        assert!(events.contains(&OverlayEvent::Dismissed(id, DismissType::Cancel)));
        assert_eq!(overlays.state(id), Some(LifecycleState::Closed));
        assert!(!f.tree.is_attached(view));

        assert!(matches!(
            overlays.show(id),
            Err(OverlayError::ReusedAfterDismiss(_))
        ));
    }

    #[test]
    fn escape_skips_overlays_without_focusable() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let view = f.tree.create_node(Rect::new(0.0, 0.0, 80.0, 30.0));
        let id = overlays.open(Tooltip::builder(f.reference, view).anchor(f.anchor).build());
        overlays.show(id).unwrap();
        let events = pump(&mut overlays, &mut f.tree, 0, 300);
        assert!(events.contains(&OverlayEvent::Shown(id)));

        assert!(!overlays.handle_key(Key::Escape));
        assert_eq!(overlays.state(id), Some(LifecycleState::Shown));
        assert_eq!(f.tree.focused(), None);
    }

    #[test]
    fn outside_click_dismisses_popover() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (id, _, movable) = shown_popover(&mut f, &mut overlays);

        // inside the popover element: not consumed
        assert!(!overlays.handle_pointer_down(&f.tree, Point::new(90.0, 160.0)));
        assert_eq!(overlays.state(id), Some(LifecycleState::Shown));

        assert!(overlays.handle_pointer_down(&f.tree, Point::new(5.0, 350.0)));
        let events = pump(&mut overlays, &mut f.tree, 260, 300);
        assert!(events.contains(&OverlayEvent::Dismissed(id, DismissType::OutOfBounds)));
        let _ = movable;
    }

    #[test]
    fn outside_click_disabled_keeps_popover_shown() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (view, movable, content) = popover_nodes(&mut f.tree);
        let id = overlays.open(
            Popover::builder(f.reference, view, content)
                .movable(movable)
                .anchor(f.anchor)
                .outside_click_dismiss(false)
                .build(),
        );
        overlays.show(id).unwrap();
        pump(&mut overlays, &mut f.tree, 0, 250);

        assert!(!overlays.handle_pointer_down(&f.tree, Point::new(5.0, 350.0)));
        // the policy also rejects a direct out-of-bounds dismissal
        overlays.dismiss(id, DismissType::OutOfBounds).unwrap();
        let events = pump(&mut overlays, &mut f.tree, 260, 300);
        assert!(events.is_empty());
        assert_eq!(overlays.state(id), Some(LifecycleState::Shown));
    }

    #[test]
    fn modal_backdrop_swallows_outside_clicks() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (view, movable, content) = popover_nodes(&mut f.tree);
        let id = overlays.open(
            Popover::builder(f.reference, view, content)
                .movable(movable)
                .anchor(f.anchor)
                .outside_click_dismiss(false)
                .modal_backdrop(true)
                .build(),
        );
        overlays.show(id).unwrap();
        pump(&mut overlays, &mut f.tree, 0, 250);

        assert!(overlays.handle_pointer_down(&f.tree, Point::new(5.0, 350.0)));
        let events = pump(&mut overlays, &mut f.tree, 260, 300);
        assert!(events.is_empty());
        assert_eq!(overlays.state(id), Some(LifecycleState::Shown));
    }

    #[test]
    fn panel_destroyed_bypasses_policy() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (view, movable, content) = popover_nodes(&mut f.tree);
        let id = overlays.open(
            Popover::builder(f.reference, view, content)
                .movable(movable)
                .anchor(f.anchor)
                .outside_click_dismiss(false)
                .build(),
        );
        overlays.show(id).unwrap();
        pump(&mut overlays, &mut f.tree, 0, 250);

        overlays.dismiss(id, DismissType::PanelDestroyed).unwrap();
        let events = pump(&mut overlays, &mut f.tree, 260, 300);
        assert!(events.contains(&OverlayEvent::Dismissed(id, DismissType::PanelDestroyed)));
    }

    #[test]
    fn detached_view_closes_immediately() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (id, view, _) = shown_popover(&mut f, &mut overlays);

        let events = overlays.notify_detached(&mut f.tree, view);
        assert_eq!(
            events,
            vec![OverlayEvent::Dismissed(id, DismissType::PanelDestroyed)]
        );
        assert_eq!(overlays.state(id), Some(LifecycleState::Closed));
    }

    #[test]
    fn double_dismiss_emits_one_event() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (id, _, _) = shown_popover(&mut f, &mut overlays);

        overlays.dismiss(id, DismissType::Manual).unwrap();
        overlays.dismiss(id, DismissType::Cancel).unwrap();
        let events = pump(&mut overlays, &mut f.tree, 260, 300);
        let dismissed: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, OverlayEvent::Dismissed(..)))
            .collect();
        assert_eq!(
            dismissed,
            vec![&OverlayEvent::Dismissed(id, DismissType::Manual)]
        );
    }

    #[test]
    fn dismiss_queued_in_same_batch_never_shows() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (view, movable, content) = popover_nodes(&mut f.tree);
        let id = overlays.open(
            Popover::builder(f.reference, view, content)
                .movable(movable)
                .anchor(f.anchor)
                .build(),
        );
        overlays.show(id).unwrap();
        overlays.dismiss(id, DismissType::Manual).unwrap();
        let events = pump(&mut overlays, &mut f.tree, 0, 300);
        assert_eq!(
            events,
            vec![OverlayEvent::Dismissed(id, DismissType::Manual)]
        );
    }

    #[test]
    fn focus_restored_on_dismiss_but_not_out_of_bounds() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        f.tree.focus(f.reference);
        let (id, _, movable) = shown_popover(&mut f, &mut overlays);
        assert_eq!(f.tree.focused(), Some(movable));

        overlays.dismiss(id, DismissType::Manual).unwrap();
        pump(&mut overlays, &mut f.tree, 260, 300);
        assert_eq!(f.tree.focused(), Some(f.reference));

        // a second popover dismissed by an outside click keeps focus where
        // the click put it
        f.tree.focus(f.reference);
        let (id2, _, movable2) = shown_popover(&mut f, &mut overlays);
        assert_eq!(f.tree.focused(), Some(movable2));
        overlays.dismiss(id2, DismissType::OutOfBounds).unwrap();
        pump(&mut overlays, &mut f.tree, 320, 360);
        assert_eq!(overlays.state(id2), Some(LifecycleState::Closed));
        assert_eq!(f.tree.focused(), Some(movable2));
    }

    #[test]
    fn anchor_move_repositions_on_poll() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (_, _, movable) = shown_popover(&mut f, &mut overlays);
        assert_eq!(f.tree.layout_of(movable).unwrap().left, 85.0);

        f.tree
            .set_bounds(f.anchor, Rect::new(200.0, 100.0, 50.0, 50.0));
        pump(&mut overlays, &mut f.tree, 260, 300);
        assert_eq!(f.tree.layout_of(movable).unwrap().left, 185.0);
    }

    #[test]
    fn anchor_removal_stops_polling() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (id, _, movable) = shown_popover(&mut f, &mut overlays);
        let before = *f.tree.layout_of(movable).unwrap();

        f.tree.remove_node(f.anchor);
        pump(&mut overlays, &mut f.tree, 260, 400);
        assert_eq!(overlays.state(id), Some(LifecycleState::Shown));
        assert_eq!(f.tree.layout_of(movable), Some(&before));
    }

    #[test]
    fn content_resize_triggers_reposition() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (_, _, movable) = shown_popover(&mut f, &mut overlays);

        f.tree
            .set_bounds(movable, Rect::new(85.0, 150.0, 100.0, 30.0));
        overlays.notify_content_resized(&mut f.tree, movable);
        assert_eq!(f.tree.layout_of(movable).unwrap().left, 75.0);
    }

    #[test]
    fn set_placement_repositions() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (id, _, movable) = shown_popover(&mut f, &mut overlays);

        overlays
            .set_placement(&mut f.tree, id, Placement::Top)
            .unwrap();
        let layout = f.tree.layout_of(movable).unwrap();
        assert_eq!(layout.top, 70.0);
        assert_eq!(overlays.current_placement(id), Some(Placement::Top));
    }

    #[test]
    fn modal_escape_and_scrim() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let view = f.tree.create_node(Rect::new(0.0, 0.0, 400.0, 400.0));
        let content = f.tree.create_node(Rect::new(150.0, 150.0, 100.0, 80.0));
        f.tree.attach(view, content);
        let id = overlays.open(Modal::builder(f.reference, view, content).build());
        overlays.show(id).unwrap();
        let events = pump(&mut overlays, &mut f.tree, 0, 250);
        assert!(events.contains(&OverlayEvent::Shown(id)));
        assert_eq!(f.tree.focused(), Some(content));

        // scrim clicks are swallowed, dialog clicks pass through
        assert!(overlays.handle_pointer_down(&f.tree, Point::new(10.0, 10.0)));
        assert!(!overlays.handle_pointer_down(&f.tree, Point::new(160.0, 160.0)));
        assert_eq!(overlays.state(id), Some(LifecycleState::Shown));

        assert!(overlays.handle_key(Key::Escape));
        let events = pump(&mut overlays, &mut f.tree, 260, 300);
        assert!(events.contains(&OverlayEvent::Dismissed(id, DismissType::Cancel)));
    }

    #[test]
    fn modal_outside_click_opt_in() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let view = f.tree.create_node(Rect::new(0.0, 0.0, 400.0, 400.0));
        let content = f.tree.create_node(Rect::new(150.0, 150.0, 100.0, 80.0));
        f.tree.attach(view, content);
        let id = overlays.open(
            Modal::builder(f.reference, view, content)
                .outside_click_dismiss(true)
                .build(),
        );
        overlays.show(id).unwrap();
        pump(&mut overlays, &mut f.tree, 0, 250);

        assert!(overlays.handle_pointer_down(&f.tree, Point::new(10.0, 10.0)));
        let events = pump(&mut overlays, &mut f.tree, 260, 300);
        assert!(events.contains(&OverlayEvent::Dismissed(id, DismissType::OutOfBounds)));
    }

    fn shown_tray(f: &mut Fixture, overlays: &mut Overlays) -> (OverlayId, NodeId) {
        let view = f.tree.create_node(Rect::new(0.0, 0.0, 400.0, 400.0));
        let tray_element = f.tree.create_node(Rect::new(0.0, 300.0, 400.0, 100.0));
        f.tree.attach(view, tray_element);
        let id = overlays.open(Tray::builder(f.reference, view, tray_element).build());
        overlays.show(id).unwrap();
        let events = pump(overlays, &mut f.tree, 0, 250);
        assert!(events.contains(&OverlayEvent::Shown(id)));
        assert_eq!(
            f.tree.slide_of(tray_element),
            Some((TrayPosition::Bottom, 0.0))
        );
        (id, tray_element)
    }

    #[test]
    fn tray_drag_past_threshold_dismisses() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (id, tray_element) = shown_tray(&mut f, &mut overlays);

        // 30% of the tray height, past the 25% threshold
        overlays.tray_drag_by(&mut f.tree, id, -30.0).unwrap();
        assert_eq!(
            f.tree.slide_of(tray_element),
            Some((TrayPosition::Bottom, -30.0))
        );
        overlays.tray_drag_release(&mut f.tree, id, ms(260)).unwrap();

        let events = pump(&mut overlays, &mut f.tree, 260, 480);
        let dragged = index_of(&events, OverlayEvent::DraggedOff(id));
        let dismissed = index_of(&events, OverlayEvent::Dismissed(id, DismissType::Manual));
        assert!(dragged < dismissed);
        assert_eq!(overlays.state(id), Some(LifecycleState::Closed));
    }

    #[test]
    fn tray_small_drag_settles_back() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (id, tray_element) = shown_tray(&mut f, &mut overlays);

        overlays.tray_drag_by(&mut f.tree, id, -10.0).unwrap();
        overlays.tray_drag_release(&mut f.tree, id, ms(260)).unwrap();
        let events = pump(&mut overlays, &mut f.tree, 260, 480);
        assert!(events.is_empty());
        assert_eq!(overlays.state(id), Some(LifecycleState::Shown));
        assert_eq!(
            f.tree.slide_of(tray_element),
            Some((TrayPosition::Bottom, 0.0))
        );
    }

    #[test]
    fn tray_outside_click_dismisses() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let (id, _) = shown_tray(&mut f, &mut overlays);

        assert!(overlays.handle_pointer_down(&f.tree, Point::new(200.0, 100.0)));
        let events = pump(&mut overlays, &mut f.tree, 260, 480);
        assert!(events.contains(&OverlayEvent::Dismissed(id, DismissType::OutOfBounds)));
    }

    #[test]
    fn toast_queue_serializes() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let a_view = f.tree.create_node(Rect::new(100.0, 350.0, 200.0, 50.0));
        let b_view = f.tree.create_node(Rect::new(100.0, 350.0, 200.0, 50.0));
        let a = overlays.open(
            Toast::builder(f.reference, a_view)
                .duration(NotificationDuration::Indefinite)
                .build(),
        );
        let b = overlays.open(
            Toast::builder(f.reference, b_view)
                .duration(NotificationDuration::Indefinite)
                .build(),
        );
        overlays.show(a).unwrap();
        overlays.show(b).unwrap();

        let events = pump(&mut overlays, &mut f.tree, 0, 250);
        assert!(events.contains(&OverlayEvent::Shown(a)));
        assert!(!events.contains(&OverlayEvent::Shown(b)));
        assert!(overlays.is_shown(a));
        assert!(!overlays.is_shown(b));
        assert!(overlays.is_shown_or_queued(b));

        overlays.dismiss(a, DismissType::Manual).unwrap();
        let events = pump(&mut overlays, &mut f.tree, 260, 700);
        let dismissed = index_of(&events, OverlayEvent::Dismissed(a, DismissType::Manual));
        let shown = index_of(&events, OverlayEvent::Shown(b));
        assert!(dismissed < shown);
        assert!(overlays.is_shown(b));
    }

    #[test]
    fn toast_auto_dismisses_after_duration() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let view = f.tree.create_node(Rect::new(100.0, 350.0, 200.0, 50.0));
        let id = overlays.open(Toast::builder(f.reference, view).build());
        overlays.show(id).unwrap();

        let events = pump(&mut overlays, &mut f.tree, 0, 4600);
        let shown = index_of(&events, OverlayEvent::Shown(id));
        let dismissed = index_of(&events, OverlayEvent::Dismissed(id, DismissType::Manual));
        assert!(shown < dismissed);
    }

    #[test]
    fn queued_toast_dismissed_before_showing() {
        let mut f = fixture();
        let mut overlays = Overlays::new();
        let a_view = f.tree.create_node(Rect::new(100.0, 350.0, 200.0, 50.0));
        let b_view = f.tree.create_node(Rect::new(100.0, 350.0, 200.0, 50.0));
        let a = overlays.open(
            Toast::builder(f.reference, a_view)
                .duration(NotificationDuration::Indefinite)
                .build(),
        );
        let b = overlays.open(
            Toast::builder(f.reference, b_view)
                .duration(NotificationDuration::Indefinite)
                .build(),
        );
        overlays.show(a).unwrap();
        overlays.show(b).unwrap();
        pump(&mut overlays, &mut f.tree, 0, 250);

        overlays.dismiss(b, DismissType::Cancel).unwrap();
        let events = pump(&mut overlays, &mut f.tree, 260, 300);
        assert!(events.contains(&OverlayEvent::Dismissed(b, DismissType::Cancel)));
        assert!(!events.contains(&OverlayEvent::Shown(b)));
        assert!(matches!(
            overlays.show(b),
            Err(OverlayError::ReusedAfterDismiss(_))
        ));
        assert!(overlays.is_shown(a));
    }

    #[test]
    fn missing_container_layer_errors() {
        let mut tree = MemoryTree::new();
        let reference = tree.create_node(Rect::new(0.0, 0.0, 20.0, 20.0));
        let (view, movable, content) = popover_nodes(&mut tree);
        let mut overlays = Overlays::new();
        let id = overlays.open(
            Popover::builder(reference, view, content)
                .movable(movable)
                .build(),
        );
        overlays.show(id).unwrap();
        assert!(matches!(
            overlays.tick(&mut tree, ms(0)),
            Err(OverlayError::ContainerNotFound)
        ));
    }

    #[test]
    fn unknown_overlay_errors() {
        let mut overlays = Overlays::new();
        let bogus = OverlayId(9999);
        assert!(matches!(
            overlays.show(bogus),
            Err(OverlayError::UnknownOverlay(_))
        ));
        assert!(matches!(
            overlays.dismiss(bogus, DismissType::Manual),
            Err(OverlayError::UnknownOverlay(_))
        ));
    }
}
