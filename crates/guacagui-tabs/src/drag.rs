//! Drag-to-reorder state machine
//!
//! ```text
//! Idle
//!   ↓ pointer down over a tab
//! Dragging ──pointer move──┐ (feedback only)
//!   │  ↑──────────────────┘
//!   ├─ pointer up inside the strip → Dropped → Idle (one reorder call)
//!   └─ leave strip / release outside / cancel → Cancelled → Idle
//! ```

use crate::manager::TabManager;
use crate::session::SessionId;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Horizontal extent of one tab in the strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabSlot {
    pub id: SessionId,
    pub left: f64,
    pub width: f64,
}

impl TabSlot {
    pub fn midpoint(&self) -> f64 {
        self.left + self.width / 2.0
    }

    fn contains_x(&self, x: f64) -> bool {
        x >= self.left && x < self.left + self.width
    }
}

/// Tab strip geometry at the time of a pointer event
#[derive(Debug, Clone, PartialEq)]
pub struct TabStrip {
    /// Region in which the gesture is recognized
    pub bounds: Rect,
    /// Slots in tab order
    pub slots: Vec<TabSlot>,
}

impl TabStrip {
    /// Equal-width tabs laid out from the left edge of `bounds`
    pub fn uniform(bounds: Rect, ids: impl IntoIterator<Item = SessionId>, tab_width: f64) -> Self {
        let slots = ids
            .into_iter()
            .enumerate()
            .map(|(index, id)| TabSlot {
                id,
                left: bounds.x + index as f64 * tab_width,
                width: tab_width,
            })
            .collect();

        Self { bounds, slots }
    }

    /// Index of the tab under `point`, if any
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        if !self.bounds.contains(point) {
            return None;
        }
        self.slots.iter().position(|slot| slot.contains_x(point.x))
    }

    pub fn index_of(&self, id: SessionId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    /// Slot claimed by a tab dragged from `source` with the pointer at `x`
    ///
    /// A neighbor's slot is claimed once the pointer passes its midpoint.
    pub fn candidate_index(&self, source: usize, x: f64) -> usize {
        let right = self.slots[source + 1..]
            .iter()
            .take_while(|slot| x > slot.midpoint())
            .count();
        if right > 0 {
            return source + right;
        }

        let left = self.slots[..source]
            .iter()
            .rev()
            .take_while(|slot| x < slot.midpoint())
            .count();
        source - left
    }
}

/// Whatever owns the tab order; the controller only asks it to move a tab
pub trait ReorderTarget {
    fn reorder(&mut self, id: SessionId, new_index: usize) -> Result<bool>;
}

impl ReorderTarget for TabManager {
    fn reorder(&mut self, id: SessionId, new_index: usize) -> Result<bool> {
        TabManager::reorder(self, id, new_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub source: SessionId,
    /// Pointer offset from the left edge of the grabbed tab
    pub grab_offset: f64,
    /// Slot the tab would land in if released now
    pub candidate: usize,
    pub pointer: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Transient visual feedback while dragging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFeedback {
    pub source: SessionId,
    pub candidate: usize,
    /// Where to draw the dragged tab's left edge
    pub ghost_left: f64,
}

impl From<&ActiveDrag> for DragFeedback {
    fn from(drag: &ActiveDrag) -> Self {
        Self {
            source: drag.source,
            candidate: drag.candidate,
            ghost_left: drag.pointer.x - drag.grab_offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Started(DragFeedback),
    Moved(DragFeedback),
    /// One reorder was requested
    Dropped { source: SessionId, index: usize },
    Cancelled,
    /// The pointer event did not concern a drag
    Ignored,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn pointer_down(&mut self, strip: &TabStrip, point: Point) -> DragEvent {
        if self.is_dragging() {
            return DragEvent::Ignored;
        }
        let Some(index) = strip.hit_test(point) else {
            return DragEvent::Ignored;
        };

        let slot = strip.slots[index];
        let drag = ActiveDrag {
            source: slot.id,
            grab_offset: point.x - slot.left,
            candidate: index,
            pointer: point,
        };
        self.state = DragState::Dragging(drag);

        tracing::debug!(session_id = %slot.id, index, "Tab drag started");

        DragEvent::Started(DragFeedback::from(&drag))
    }

    /// Update feedback; leaving the strip cancels the gesture
    pub fn pointer_move(&mut self, strip: &TabStrip, point: Point) -> DragEvent {
        let DragState::Dragging(mut drag) = self.state else {
            return DragEvent::Ignored;
        };

        if !strip.bounds.contains(point) {
            return self.cancel();
        }
        let Some(source) = strip.index_of(drag.source) else {
            return self.cancel();
        };

        drag.candidate = strip.candidate_index(source, point.x);
        drag.pointer = point;
        self.state = DragState::Dragging(drag);

        DragEvent::Moved(DragFeedback::from(&drag))
    }

    /// Finish the gesture, issuing at most one reorder
    pub fn pointer_up(
        &mut self,
        strip: &TabStrip,
        point: Point,
        target: &mut dyn ReorderTarget,
    ) -> DragEvent {
        let DragState::Dragging(drag) = self.state else {
            return DragEvent::Ignored;
        };

        if !strip.bounds.contains(point) {
            return self.cancel();
        }
        let Some(source) = strip.index_of(drag.source) else {
            return self.cancel();
        };

        self.state = DragState::Idle;
        let index = strip.candidate_index(source, point.x);

        tracing::debug!(session_id = %drag.source, from = source, to = index, "Tab dropped");

        if let Err(e) = target.reorder(drag.source, index) {
            tracing::warn!(session_id = %drag.source, error = %e, "Drop could not be applied");
        }

        DragEvent::Dropped {
            source: drag.source,
            index,
        }
    }

    /// Abandon the gesture without touching the tab order
    pub fn cancel(&mut self) -> DragEvent {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(drag) => {
                tracing::debug!(session_id = %drag.source, "Tab drag cancelled");
                DragEvent::Cancelled
            }
            DragState::Idle => DragEvent::Ignored,
        }
    }
}
