//! Drag lifecycle state machine.
//!
//! Per-view finite-state machine for a long-press drag gesture. The only
//! store write in the whole lifecycle happens on the `Dragging -> Ending`
//! edge; every canceling path is guaranteed write-free. Gestures for one
//! view arrive in order, so the drivers take `&mut self` and need no
//! internal locking.

use crate::coord::LatLng;
use crate::store::{AnnotationStore, Geometry};
use crate::view::{AnnotationView, ScreenPoint};
use tracing::{debug, trace};

/// Minimum pointer travel in pixels before `Starting` commits to
/// `Dragging`.
pub const DRAG_MOVE_THRESHOLD: f64 = 1.0;

/// Lifecycle state of a drag gesture, scoped to a single view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// View is sitting on the map
    #[default]
    None,
    /// Gesture recognized, drag animation may start
    Starting,
    /// View follows the pointer
    Dragging,
    /// Gesture cancelled; view returns to its pre-drag position
    Canceling,
    /// Pointer released over a valid location; coordinate committed
    Ending,
}

/// Host-supplied conversion from screen space to geographic coordinates.
///
/// Returns `None` for positions outside the renderable map area, which
/// forces the canceling path instead of committing bad data.
pub trait ScreenProjection {
    fn unproject(&self, point: ScreenPoint) -> Option<LatLng>;
}

impl<F> ScreenProjection for F
where
    F: Fn(ScreenPoint) -> Option<LatLng>,
{
    fn unproject(&self, point: ScreenPoint) -> Option<LatLng> {
        self(point)
    }
}

impl AnnotationView {
    /// `None -> Starting`: a qualifying long-press was recognized.
    ///
    /// Returns whether the drag actually started. A non-draggable view, or
    /// a view anywhere else in the lifecycle, ignores the recognition
    /// until it has settled back to `None`.
    pub fn recognize_drag(&mut self) -> bool {
        if !self.draggable || self.drag_state() != DragState::None {
            trace!(view = %self, state = ?self.drag_state(), "drag recognition ignored");
            return false;
        }
        self.remember_pre_drag_position();
        debug!(view = %self, "will start drag");
        self.set_drag_state(DragState::Starting, true);
        true
    }

    /// Pointer moved to `point`.
    ///
    /// `Starting -> Dragging` once travel exceeds [`DRAG_MOVE_THRESHOLD`];
    /// while `Dragging`, the view tracks the pointer continuously. No
    /// store write happens here.
    pub fn drag_to(&mut self, point: ScreenPoint) {
        match self.drag_state() {
            DragState::Starting => {
                if self.pre_drag_position().distance_to(&point) > DRAG_MOVE_THRESHOLD {
                    self.set_drag_state(DragState::Dragging, false);
                    *self.position_mut() = point;
                }
            }
            DragState::Dragging => {
                *self.position_mut() = point;
            }
            _ => {
                trace!(view = %self, state = ?self.drag_state(), "drag movement ignored");
            }
        }
    }

    /// Pointer released at `point`.
    ///
    /// From `Dragging`, a final position that unprojects to a valid
    /// coordinate takes the `Ending` edge and performs the single store
    /// write of the gesture. An invalid position takes `Canceling`. A
    /// release while still `Starting` (threshold never exceeded) cancels.
    ///
    /// An annotation deleted mid-drag abandons the write silently; the
    /// gesture still ends normally.
    pub fn end_drag(
        &mut self,
        store: &AnnotationStore,
        projection: &dyn ScreenProjection,
        point: ScreenPoint,
    ) -> DragState {
        match self.drag_state() {
            DragState::Dragging => {
                let target = projection.unproject(point).filter(LatLng::is_valid);
                match target {
                    Some(coordinate) => {
                        *self.position_mut() = point;
                        self.set_drag_state(DragState::Ending, true);
                        if let Some(id) = self.annotation() {
                            match store.update(id, Geometry::Point(coordinate)) {
                                Some(version) => {
                                    debug!(view = %self, %coordinate, version, "drag committed")
                                }
                                None => {
                                    debug!(view = %self, "annotation gone, drag write abandoned")
                                }
                            }
                        }
                    }
                    None => {
                        debug!(view = %self, "drop location invalid, canceling drag");
                        self.cancel_drag();
                    }
                }
            }
            DragState::Starting => self.cancel_drag(),
            _ => {
                trace!(view = %self, state = ?self.drag_state(), "drag release ignored");
            }
        }
        self.drag_state()
    }

    /// `Starting | Dragging -> Canceling`: gesture cancelled externally or
    /// released over an invalid location.
    ///
    /// The view animates back to its pre-drag position. Guaranteed
    /// no-write.
    pub fn cancel_drag(&mut self) {
        match self.drag_state() {
            DragState::Starting | DragState::Dragging => {
                *self.position_mut() = self.pre_drag_position();
                self.set_drag_state(DragState::Canceling, true);
            }
            _ => {
                trace!(view = %self, state = ?self.drag_state(), "drag cancel ignored");
            }
        }
    }

    /// `Ending | Canceling -> None`: the transition animation finished.
    pub fn settle(&mut self) {
        match self.drag_state() {
            DragState::Ending | DragState::Canceling => {
                self.set_drag_state(DragState::None, false);
            }
            _ => {
                trace!(view = %self, state = ?self.drag_state(), "settle ignored");
            }
        }
    }
}
