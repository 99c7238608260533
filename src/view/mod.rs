//! Interactive annotation views.
//!
//! An [`AnnotationView`] is the recyclable on-screen object bound to at
//! most one annotation at a time. The host presentation layer owns its
//! pixels; this module owns the recycling contract
//! ([`prepare_for_reuse`](AnnotationView::prepare_for_reuse)) and the drag
//! lifecycle ([`DragState`] and the drivers on [`AnnotationView`]).

mod drag;

pub use drag::{DragState, ScreenProjection, DRAG_MOVE_THRESHOLD};

use crate::store::AnnotationId;
use std::fmt;
use tracing::trace;

/// A position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &ScreenPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Pixel offset of the view from its annotation's screen anchor.
///
/// Positive values move the view towards the bottom right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewOffset {
    pub dx: f64,
    pub dy: f64,
}

/// Recyclable interactive view for one annotation.
///
/// The renderer reads `center_offset`, `flat`, and
/// `scales_with_viewing_distance` each frame to place and scale the view;
/// those are plain state with no validation. Drag behavior is driven
/// through [`recognize_drag`](AnnotationView::recognize_drag),
/// [`drag_to`](AnnotationView::drag_to), and
/// [`end_drag`](AnnotationView::end_drag).
#[derive(Debug)]
pub struct AnnotationView {
    reuse_identifier: String,
    annotation: Option<AnnotationId>,
    position: ScreenPoint,
    pre_drag_position: ScreenPoint,
    drag_state: DragState,
    /// Pixel offset from the annotation's screen anchor
    pub center_offset: ViewOffset,
    /// Tilt the view with the map instead of billboarding it
    pub flat: bool,
    /// Shrink towards the horizon on a tilted map (platform default: on)
    pub scales_with_viewing_distance: bool,
    /// Whether a long-press drag gesture may move this view
    pub draggable: bool,
    /// Selection highlight, cleared on reuse
    pub highlighted: bool,
}

impl AnnotationView {
    /// Create a view for the given reuse identifier.
    pub fn new(reuse_identifier: impl Into<String>) -> Self {
        Self {
            reuse_identifier: reuse_identifier.into(),
            annotation: None,
            position: ScreenPoint::default(),
            pre_drag_position: ScreenPoint::default(),
            drag_state: DragState::None,
            center_offset: ViewOffset::default(),
            flat: false,
            scales_with_viewing_distance: true,
            draggable: false,
            highlighted: false,
        }
    }

    /// The key grouping interchangeable views for recycling.
    pub fn reuse_identifier(&self) -> &str {
        &self.reuse_identifier
    }

    /// The annotation this view currently represents, if any.
    pub fn annotation(&self) -> Option<AnnotationId> {
        self.annotation
    }

    /// Current screen position of the view's anchor.
    pub fn position(&self) -> ScreenPoint {
        self.position
    }

    /// Current drag lifecycle state.
    pub fn drag_state(&self) -> DragState {
        self.drag_state
    }

    /// Bind the view to an annotation at a screen position.
    pub fn bind(&mut self, annotation: AnnotationId, position: ScreenPoint) {
        self.annotation = Some(annotation);
        self.position = position;
        self.pre_drag_position = position;
    }

    /// Reset per-annotation state before the view returns to the pool.
    ///
    /// A view must have settled its drag before release; an unsettled
    /// state is discarded along with the binding.
    pub fn prepare_for_reuse(&mut self) {
        trace!(
            reuse_identifier = %self.reuse_identifier,
            "preparing view for reuse"
        );
        self.annotation = None;
        self.highlighted = false;
        self.drag_state = DragState::None;
        self.position = ScreenPoint::default();
        self.pre_drag_position = ScreenPoint::default();
    }

    /// Low-level drag transition hook.
    ///
    /// The drag drivers funnel every state change through here so a host
    /// presentation layer can observe transitions (and animate them when
    /// `animated` is set) at a single point.
    pub fn set_drag_state(&mut self, state: DragState, animated: bool) {
        trace!(
            reuse_identifier = %self.reuse_identifier,
            from = ?self.drag_state,
            to = ?state,
            animated,
            "drag state transition"
        );
        self.drag_state = state;
    }

    pub(crate) fn position_mut(&mut self) -> &mut ScreenPoint {
        &mut self.position
    }

    pub(crate) fn pre_drag_position(&self) -> ScreenPoint {
        self.pre_drag_position
    }

    pub(crate) fn remember_pre_drag_position(&mut self) {
        self.pre_drag_position = self.position;
    }
}

impl fmt::Display for AnnotationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.annotation {
            Some(id) => write!(f, "view[{}] bound to {}", self.reuse_identifier, id),
            None => write!(f, "view[{}] unbound", self.reuse_identifier),
        }
    }
}
