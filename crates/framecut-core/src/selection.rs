//! Pointer-driven rectangle selection.
//!
//! [`SelectionTracker`] turns a press / drag / release sequence into a
//! [`SelectionRect`] in display space. It is a two-state machine:
//!
//! ```text
//!   Idle --press--> Dragging { start, current }
//!   Dragging --drag--> Dragging { start, current' }     (render only)
//!   Dragging --release--> Idle, emits SelectionRect
//!   Dragging --cancel--> Idle
//! ```
//!
//! Nothing here touches image data; the emitted rectangle is handed to
//! [`crate::Session::apply_selection`].

use serde::{Deserialize, Serialize};

use crate::transform::DisplayPoint;

/// Two display-space corners collected from pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub start: DisplayPoint,
    pub end: DisplayPoint,
}

impl SelectionRect {
    pub fn new(start: DisplayPoint, end: DisplayPoint) -> Self {
        Self { start, end }
    }

    /// Absolute extent `(|dx|, |dy|)` in display pixels.
    pub fn extent(&self) -> (u32, u32) {
        (
            self.end.x.abs_diff(self.start.x),
            self.end.y.abs_diff(self.start.y),
        )
    }

    /// Top-left and bottom-right corners, for drawing an overlay.
    pub fn bounds(&self) -> (DisplayPoint, DisplayPoint) {
        (
            DisplayPoint::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            DisplayPoint::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }
}

/// State of an interactive drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        start: DisplayPoint,
        current: DisplayPoint,
    },
}

/// Tracks one drag at a time.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    state: DragState,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start a new drag. A press while already dragging restarts from `point`.
    pub fn press(&mut self, point: DisplayPoint) {
        self.state = DragState::Dragging {
            start: point,
            current: point,
        };
    }

    /// Move the free corner. Returns the rectangle to draw, or `None` when idle.
    pub fn drag(&mut self, point: DisplayPoint) -> Option<SelectionRect> {
        match &mut self.state {
            DragState::Dragging { start, current } => {
                *current = point;
                Some(SelectionRect::new(*start, point))
            }
            DragState::Idle => None,
        }
    }

    /// Finish the drag and emit the selection. A release without a press is ignored.
    pub fn release(&mut self, point: DisplayPoint) -> Option<SelectionRect> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { start, .. } => Some(SelectionRect::new(start, point)),
            DragState::Idle => None,
        }
    }

    /// Abandon any drag in progress.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// The rectangle being dragged, if any.
    pub fn preview(&self) -> Option<SelectionRect> {
        match self.state {
            DragState::Dragging { start, current } => Some(SelectionRect::new(start, current)),
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> DisplayPoint {
        DisplayPoint::new(x, y)
    }

    #[test]
    fn test_full_drag_sequence() {
        let mut tracker = SelectionTracker::new();
        assert_eq!(tracker.state(), DragState::Idle);

        tracker.press(p(10, 20));
        assert!(tracker.is_dragging());
        assert_eq!(tracker.drag(p(30, 25)), Some(SelectionRect::new(p(10, 20), p(30, 25))));
        assert_eq!(tracker.drag(p(50, 60)), Some(SelectionRect::new(p(10, 20), p(50, 60))));
        assert_eq!(tracker.preview(), Some(SelectionRect::new(p(10, 20), p(50, 60))));

        let rect = tracker.release(p(55, 65));
        assert_eq!(rect, Some(SelectionRect::new(p(10, 20), p(55, 65))));
        assert_eq!(tracker.state(), DragState::Idle);
        assert_eq!(tracker.preview(), None);
    }

    #[test]
    fn test_events_without_press_are_ignored() {
        let mut tracker = SelectionTracker::new();
        assert_eq!(tracker.drag(p(5, 5)), None);
        assert_eq!(tracker.release(p(5, 5)), None);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_release_emits_once() {
        let mut tracker = SelectionTracker::new();
        tracker.press(p(0, 0));
        assert!(tracker.release(p(40, 40)).is_some());
        assert!(tracker.release(p(40, 40)).is_none());
    }

    #[test]
    fn test_press_while_dragging_restarts() {
        let mut tracker = SelectionTracker::new();
        tracker.press(p(0, 0));
        tracker.drag(p(100, 100));
        tracker.press(p(7, 8));
        assert_eq!(tracker.release(p(9, 9)), Some(SelectionRect::new(p(7, 8), p(9, 9))));
    }

    #[test]
    fn test_cancel() {
        let mut tracker = SelectionTracker::new();
        tracker.press(p(1, 1));
        tracker.cancel();
        assert_eq!(tracker.release(p(90, 90)), None);
    }

    #[test]
    fn test_extent_and_bounds_for_reversed_drag() {
        let rect = SelectionRect::new(p(300, 250), p(100, 50));
        assert_eq!(rect.extent(), (200, 200));
        assert_eq!(rect.bounds(), (p(100, 50), p(300, 250)));
    }
}
