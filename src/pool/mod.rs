//! Annotation view recycling.
//!
//! Views that scroll offscreen are released into the pool and handed back
//! out for the next annotation with the same reuse identifier, instead of
//! being constructed fresh. Dequeued views are moved out of the pool, so a
//! view bound to a visible annotation can never be handed to a second
//! caller.

use crate::view::AnnotationView;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::trace;

/// Pool of idle annotation views keyed by reuse identifier.
///
/// Unbounded by design: each idle set grows to the high-water mark of
/// concurrently visible annotations for its identifier and persists for
/// the session. Eviction is an explicit non-goal.
#[derive(Debug, Default)]
pub struct AnnotationViewPool {
    idle: Mutex<HashMap<String, Vec<AnnotationView>>>,
}

impl AnnotationViewPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out an idle view released under this identifier.
    ///
    /// Returns `None` for an unknown identifier or an exhausted idle set;
    /// the caller constructs a new view in that case.
    pub fn dequeue(&self, reuse_identifier: &str) -> Option<AnnotationView> {
        let mut idle = self.idle.lock().unwrap_or_else(|e| e.into_inner());
        let view = idle.get_mut(reuse_identifier)?.pop();
        if view.is_some() {
            trace!(reuse_identifier, "dequeued idle view");
        }
        view
    }

    /// Return a view to the idle set under its own reuse identifier.
    ///
    /// The view's reuse reset runs here, so it carries no per-annotation
    /// state into its next use.
    pub fn release(&self, mut view: AnnotationView) {
        view.prepare_for_reuse();
        let mut idle = self.idle.lock().unwrap_or_else(|e| e.into_inner());
        trace!(reuse_identifier = view.reuse_identifier(), "released view");
        idle.entry(view.reuse_identifier().to_owned())
            .or_default()
            .push(view);
    }

    /// Number of idle views held for one identifier.
    pub fn idle_count(&self, reuse_identifier: &str) -> usize {
        let idle = self.idle.lock().unwrap_or_else(|e| e.into_inner());
        idle.get(reuse_identifier).map_or(0, Vec::len)
    }

    /// Total number of idle views across all identifiers.
    pub fn total_idle(&self) -> usize {
        let idle = self.idle.lock().unwrap_or_else(|e| e.into_inner());
        idle.values().map(Vec::len).sum()
    }
}
