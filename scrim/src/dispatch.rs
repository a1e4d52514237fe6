//! Same-thread message dispatch.
//!
//! `show` and `dismiss` never mutate the host directly; they post messages
//! that the manager drains, in FIFO order across all overlays, on the next
//! [`crate::manager::Overlays::tick`]. Multi-frame sequences (layout settle,
//! enter/exit animations, focus handover) are modeled as one scheduled step
//! per overlay; scheduling a step replaces whatever was pending.

use std::collections::VecDeque;
use std::time::Duration;

use crate::overlay::{DismissType, OverlayId};

/// One simulated frame. Used for "next frame" deferrals and as the anchor
/// poll cadence.
pub(crate) const FRAME: Duration = Duration::from_millis(16);

/// A message posted to the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PopupMessage {
    Show,
    Dismiss(DismissType),
}

/// FIFO queue of overlay messages.
#[derive(Debug, Default)]
pub(crate) struct MessageQueue {
    messages: VecDeque<(OverlayId, PopupMessage)>,
}

impl MessageQueue {
    pub(crate) fn post(&mut self, id: OverlayId, message: PopupMessage) {
        self.messages.push_back((id, message));
    }

    /// Take every message posted so far. Messages posted while processing
    /// the returned batch land in the next batch.
    pub(crate) fn take(&mut self) -> VecDeque<(OverlayId, PopupMessage)> {
        std::mem::take(&mut self.messages)
    }
}

/// A deferred lifecycle step for one overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Layout has settled: make the view visible and position it.
    LayoutReady,
    /// Start the enter animation.
    AnimateIn,
    /// Enter animation finished: the overlay is shown.
    FinishIn,
    /// Hand focus to the designated focusable node.
    FocusContent,
    /// Exit animation finished: complete the dismissal.
    FinishOut(DismissType),
    /// A released tray drag finished settling.
    TraySettle { collapse: bool },
}

/// A step plus the instant it becomes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scheduled {
    pub due: Duration,
    pub step: Step,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_preserves_fifo_order_across_overlays() {
        let mut queue = MessageQueue::default();
        let a = OverlayId(1);
        let b = OverlayId(2);
        queue.post(a, PopupMessage::Show);
        queue.post(b, PopupMessage::Show);
        queue.post(a, PopupMessage::Dismiss(DismissType::Manual));

        let drained: Vec<_> = queue.take().into_iter().collect();
        assert_eq!(
            drained,
            vec![
                (a, PopupMessage::Show),
                (b, PopupMessage::Show),
                (a, PopupMessage::Dismiss(DismissType::Manual)),
            ]
        );
        assert!(queue.take().is_empty());
    }

    #[test]
    fn take_leaves_room_for_the_next_batch() {
        let mut queue = MessageQueue::default();
        let a = OverlayId(1);
        queue.post(a, PopupMessage::Show);
        let first = queue.take();
        assert_eq!(first.len(), 1);

        queue.post(a, PopupMessage::Dismiss(DismissType::Cancel));
        let second = queue.take();
        assert_eq!(
            second.front(),
            Some(&(a, PopupMessage::Dismiss(DismissType::Cancel)))
        );
    }
}
