//! Notification queue.
//!
//! Toasts never show themselves: the queue serializes them so at most one is
//! visible at a time. The manager drains it from `tick`, promoting the next
//! queued toast whenever the current slot frees up.

use std::collections::VecDeque;
use std::time::Duration;

use crate::overlay::OverlayId;

/// How long a toast stays on screen before auto-dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationDuration {
    #[default]
    Short,
    Long,
    /// Stays until dismissed explicitly.
    Indefinite,
}

impl NotificationDuration {
    /// The on-screen time, `None` for indefinite toasts.
    pub fn timeout(self) -> Option<Duration> {
        match self {
            NotificationDuration::Short => Some(Duration::from_millis(4000)),
            NotificationDuration::Long => Some(Duration::from_millis(7000)),
            NotificationDuration::Indefinite => None,
        }
    }
}

/// FIFO queue guaranteeing at most one visible toast.
#[derive(Debug, Default)]
pub(crate) struct NotificationQueue {
    current: Option<OverlayId>,
    waiting: VecDeque<OverlayId>,
}

impl NotificationQueue {
    /// Add a toast to the back of the queue.
    pub(crate) fn enqueue(&mut self, id: OverlayId) {
        if self.current == Some(id) || self.waiting.contains(&id) {
            return;
        }
        self.waiting.push_back(id);
    }

    /// The toast currently holding the visible slot.
    pub(crate) fn current(&self) -> Option<OverlayId> {
        self.current
    }

    /// Promote the next queued toast into the visible slot, if it is free.
    pub(crate) fn promote(&mut self) -> Option<OverlayId> {
        if self.current.is_some() {
            return None;
        }
        self.current = self.waiting.pop_front();
        self.current
    }

    /// Remove a toast that never reached the visible slot. Returns whether
    /// it was queued.
    pub(crate) fn remove_queued(&mut self, id: OverlayId) -> bool {
        let len = self.waiting.len();
        self.waiting.retain(|queued| *queued != id);
        self.waiting.len() != len
    }

    /// Free the visible slot after the toast finished dismissing.
    pub(crate) fn on_dismissed(&mut self, id: OverlayId) {
        if self.current == Some(id) {
            self.current = None;
        }
    }

    pub(crate) fn is_current(&self, id: OverlayId) -> bool {
        self.current == Some(id)
    }

    pub(crate) fn is_current_or_next(&self, id: OverlayId) -> bool {
        self.is_current(id) || self.waiting.front() == Some(&id)
    }
}
