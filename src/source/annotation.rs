//! Annotation tile source.
//!
//! Synthesizes tile content from the [`AnnotationStore`] instead of
//! fetching it, and satisfies the shared [`Source`] interface so the
//! renderer drives it like any fetch-backed source.

use crate::source::overscale::{resolve, AncestorCache, OverscaleDecision};
use crate::source::{FileSource, Source, SourceError, UpdateParameters};
use crate::store::{AnnotationStore, Geometry};
use crate::tile::{
    project_to_tile, CanonicalTileId, OverscaledTileId, Tile, TileData, TileFeature, TileGeometry,
    ZoomRange,
};
use std::sync::Arc;
use tracing::debug;

/// Logical pixel size annotation tiles are rendered at.
pub const TILE_SIZE: u16 = 512;

/// Configuration for an annotation source.
///
/// The zoom range is computed once from these options at construction and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct AnnotationSourceOptions {
    /// Minimum zoom at which annotations are shown
    pub min_zoom: u8,
    /// Maximum zoom at which native content is built; finer requests are
    /// served overscaled from this zoom
    pub max_zoom: u8,
}

impl Default for AnnotationSourceOptions {
    fn default() -> Self {
        Self {
            min_zoom: 0,
            max_zoom: 18,
        }
    }
}

/// Tile source that builds content from user-placed annotations.
///
/// Content for one canonical address is built at most once per store
/// version and shared across every overscaled descendant request.
pub struct AnnotationSource {
    store: Arc<AnnotationStore>,
    zoom_range: ZoomRange,
    cache: AncestorCache,
}

impl AnnotationSource {
    /// Create a source over the given store.
    pub fn new(store: Arc<AnnotationStore>, options: AnnotationSourceOptions) -> Self {
        Self {
            store,
            zoom_range: ZoomRange::new(options.min_zoom, options.max_zoom),
            cache: AncestorCache::new(),
        }
    }

    /// The backing annotation store.
    pub fn store(&self) -> &Arc<AnnotationStore> {
        &self.store
    }

    /// Number of content builds performed so far.
    pub fn builds(&self) -> u64 {
        self.cache.builds()
    }

    /// Drop all cached content; the next request per address rebuilds.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Content for a canonical address at the store's current version.
    ///
    /// Staleness is an equality check against the aggregate version; a
    /// matching cached build is reused verbatim, anything else is rebuilt
    /// exactly once no matter how many requests race.
    fn content_at(&self, canonical: CanonicalTileId) -> Option<Arc<TileData>> {
        let version = self.store.version_at(&canonical);
        let store = &self.store;
        self.cache.get_or_build(canonical, version, || {
            let query = store.query_tile(&canonical);
            if query.annotations.is_empty() {
                return None;
            }

            let bounds = canonical.bounds();
            let features = query
                .annotations
                .iter()
                .map(|annotation| TileFeature {
                    id: annotation.id,
                    geometry: match &annotation.geometry {
                        Geometry::Point(p) => TileGeometry::Point(project_to_tile(p, &bounds)),
                        Geometry::Shape(points) => TileGeometry::Shape(
                            points.iter().map(|p| project_to_tile(p, &bounds)).collect(),
                        ),
                    },
                })
                .collect();

            Some(Arc::new(TileData::new(canonical, query.version, features)))
        })
    }
}

impl Source for AnnotationSource {
    fn load(&self, _file_source: &FileSource) -> Result<(), SourceError> {
        // Content is synthesized from the store, never fetched. Present to
        // satisfy the interface shared with fetch-backed source kinds.
        Ok(())
    }

    fn tile_size(&self) -> u16 {
        TILE_SIZE
    }

    fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    fn create_tile(
        &self,
        id: &OverscaledTileId,
        _parameters: &UpdateParameters,
    ) -> Result<Option<Tile>, SourceError> {
        if id.overscaled_z < id.canonical.z {
            return Err(SourceError::invalid(
                id,
                "overscaled zoom below canonical zoom",
            ));
        }
        if !id.canonical.is_valid() {
            return Err(SourceError::invalid(
                id,
                "column or row out of range for zoom",
            ));
        }

        match resolve(id, self.zoom_range) {
            OverscaleDecision::BelowMinimum => Ok(None),
            OverscaleDecision::Native => {
                Ok(self.content_at(id.canonical).map(|data| Tile::new(*id, data)))
            }
            OverscaleDecision::Overscaled { ancestor, delta } => {
                debug!(requested = %id, %ancestor, delta, "serving overscaled ancestor");
                let served = id.scaled_to(ancestor.z);
                Ok(self.content_at(ancestor).map(|data| Tile::new(served, data)))
            }
        }
    }
}
