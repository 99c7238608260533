//! Tile source abstraction.
//!
//! All source kinds (raster, vector, annotation, ...) expose the same
//! capability set so the renderer treats them uniformly: one-time load,
//! a fixed tile size, a native zoom range, and on-demand tile creation.
//! This crate ships the annotation variant; the others live with the
//! rendering engine.

mod annotation;
mod overscale;

pub use annotation::{AnnotationSource, AnnotationSourceOptions, TILE_SIZE};
pub use overscale::{resolve, AncestorCache, OverscaleDecision};

use crate::tile::{OverscaledTileId, Tile, ZoomRange};
use thiserror::Error;

/// Handle to the engine's shared resource loader.
///
/// Network- and file-backed sources fetch through it; the annotation
/// source synthesizes content and ignores it. Opaque here.
#[derive(Debug, Default)]
pub struct FileSource;

impl FileSource {
    pub fn new() -> Self {
        Self
    }
}

/// Render-pass context forwarded into tile creation.
///
/// Owned by the rendering layer; sources may read it but do not define
/// its meaning.
#[derive(Debug, Clone, Default)]
pub struct UpdateParameters {
    /// Current map zoom, fractional during transitions
    pub zoom: f64,
    /// Whether the render pass is part of an animated transition
    pub animating: bool,
}

/// Errors from tile source operations.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Caller passed an address violating the pyramid invariants
    #[error("Invalid tile address {overscaled_z}=>{z}/{x}/{y}: {reason}")]
    InvalidTileId {
        overscaled_z: u8,
        z: u8,
        x: u32,
        y: u32,
        reason: &'static str,
    },
    /// Source not initialized or misconfigured
    #[error("Source error: {0}")]
    Internal(String),
}

impl SourceError {
    pub(crate) fn invalid(id: &OverscaledTileId, reason: &'static str) -> Self {
        SourceError::InvalidTileId {
            overscaled_z: id.overscaled_z,
            z: id.canonical.z,
            x: id.canonical.x,
            y: id.canonical.y,
            reason,
        }
    }
}

/// Capability set shared by every tile source kind.
pub trait Source: Send + Sync {
    /// One-time, idempotent initialization.
    ///
    /// Fetch-backed sources resolve their metadata here; synthesized
    /// sources may make this a no-op.
    fn load(&self, file_source: &FileSource) -> Result<(), SourceError>;

    /// Logical pixel size each tile is rendered at. Constant per source.
    fn tile_size(&self) -> u16;

    /// Zoom levels at which this source produces native content.
    fn zoom_range(&self) -> ZoomRange;

    /// Create (or reuse) tile content for an address.
    ///
    /// `Ok(None)` is the well-defined empty result: no content at this
    /// address, nothing to render. `Err` is reserved for contract
    /// violations such as an invalid address.
    fn create_tile(
        &self,
        id: &OverscaledTileId,
        parameters: &UpdateParameters,
    ) -> Result<Option<Tile>, SourceError>;
}
