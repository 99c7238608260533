//! Authoritative annotation storage.
//!
//! The [`AnnotationStore`] is the single writer path for annotation
//! geometry: programmatic edits and drag write-backs both land here. Every
//! mutation bumps the annotation's version, which feeds the per-tile
//! aggregate version used to detect stale tile content.

mod types;

pub use types::{Annotation, AnnotationId, Geometry};

use crate::tile::CanonicalTileId;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::RwLock;
use tracing::debug;

/// Consistent snapshot of the annotations intersecting one tile.
///
/// Taken under a single read lock so the feature list and the aggregate
/// version always agree.
#[derive(Debug, Clone)]
pub struct TileQuery {
    /// Annotations whose geometry intersects the tile bounds
    pub annotations: Vec<Annotation>,
    /// Aggregate version of that set (0 when empty)
    pub version: u64,
}

/// Mapping from annotation identifier to current geometry and version.
///
/// Reads parallelize; writes serialize in arrival order, each producing a
/// strictly greater version for the touched annotation.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    annotations: RwLock<HashMap<AnnotationId, Annotation>>,
}

impl AnnotationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an annotation by identifier.
    pub fn get(&self, id: AnnotationId) -> Option<Annotation> {
        let annotations = self.annotations.read().unwrap_or_else(|e| e.into_inner());
        annotations.get(&id).cloned()
    }

    /// Insert a new annotation or replace the geometry of an existing one.
    ///
    /// Returns the annotation's new version: 1 on first insertion,
    /// previous version plus one on every later mutation.
    pub fn upsert(&self, id: AnnotationId, geometry: Geometry) -> u64 {
        let mut annotations = self.annotations.write().unwrap_or_else(|e| e.into_inner());
        let version = match annotations.get(&id) {
            Some(existing) => existing.version + 1,
            None => 1,
        };
        annotations.insert(
            id,
            Annotation {
                id,
                geometry,
                version,
            },
        );
        debug!(%id, version, "annotation upserted");
        version
    }

    /// Replace the geometry of an existing annotation only.
    ///
    /// Returns `None` when the identifier is unknown, leaving the store
    /// untouched. The drag write-back uses this so a drag racing a
    /// deletion abandons its write instead of resurrecting the annotation.
    pub fn update(&self, id: AnnotationId, geometry: Geometry) -> Option<u64> {
        let mut annotations = self.annotations.write().unwrap_or_else(|e| e.into_inner());
        let entry = annotations.get_mut(&id)?;
        entry.geometry = geometry;
        entry.version += 1;
        debug!(%id, version = entry.version, "annotation updated");
        Some(entry.version)
    }

    /// Remove an annotation. Returns `false` for an unknown identifier.
    pub fn remove(&self, id: AnnotationId) -> bool {
        let mut annotations = self.annotations.write().unwrap_or_else(|e| e.into_inner());
        let removed = annotations.remove(&id).is_some();
        if removed {
            debug!(%id, "annotation removed");
        }
        removed
    }

    /// Number of annotations currently stored.
    pub fn len(&self) -> usize {
        let annotations = self.annotations.read().unwrap_or_else(|e| e.into_inner());
        annotations.len()
    }

    /// Whether the store holds no annotations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Aggregate version of the annotations intersecting a tile.
    ///
    /// Changes whenever any intersecting annotation is inserted, mutated,
    /// or removed; returns 0 when nothing intersects. The value is opaque:
    /// it tags tile content so staleness is an equality check.
    pub fn version_at(&self, tile: &CanonicalTileId) -> u64 {
        let annotations = self.annotations.read().unwrap_or_else(|e| e.into_inner());
        Self::aggregate_version(&annotations, tile)
    }

    /// Snapshot the annotations intersecting a tile together with their
    /// aggregate version.
    pub fn query_tile(&self, tile: &CanonicalTileId) -> TileQuery {
        let annotations = self.annotations.read().unwrap_or_else(|e| e.into_inner());
        let version = Self::aggregate_version(&annotations, tile);

        let mut matched: Vec<Annotation> = annotations
            .values()
            .filter(|a| a.geometry.intersects(&tile.bounds()))
            .cloned()
            .collect();
        // Deterministic feature order regardless of map iteration order
        matched.sort_by_key(|a| a.id);

        TileQuery {
            annotations: matched,
            version,
        }
    }

    fn aggregate_version(
        annotations: &HashMap<AnnotationId, Annotation>,
        tile: &CanonicalTileId,
    ) -> u64 {
        let bounds = tile.bounds();
        let mut pairs: Vec<(AnnotationId, u64)> = annotations
            .values()
            .filter(|a| a.geometry.intersects(&bounds))
            .map(|a| (a.id, a.version))
            .collect();

        if pairs.is_empty() {
            return 0;
        }

        pairs.sort_unstable();
        let mut hasher = DefaultHasher::new();
        pairs.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::LatLng;

    fn point(lat: f64, lon: f64) -> Geometry {
        Geometry::Point(LatLng { lat, lon })
    }

    fn tile_containing(lat: f64, lon: f64, zoom: u8) -> CanonicalTileId {
        let (x, y) = crate::coord::to_tile_indices(&LatLng { lat, lon }, zoom).unwrap();
        CanonicalTileId::new(zoom, x, y)
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let store = AnnotationStore::new();
        assert!(store.get(AnnotationId(1)).is_none());
    }

    #[test]
    fn test_upsert_insert_then_mutate() {
        let store = AnnotationStore::new();
        let id = AnnotationId(1);

        assert_eq!(store.upsert(id, point(10.0, 20.0)), 1);
        assert_eq!(store.upsert(id, point(10.5, 20.5)), 2);

        let annotation = store.get(id).unwrap();
        assert_eq!(annotation.version, 2);
        assert_eq!(annotation.geometry, point(10.5, 20.5));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_versions_strictly_increase() {
        let store = AnnotationStore::new();
        let id = AnnotationId(7);

        let mut previous = 0;
        for i in 0..50 {
            let version = store.upsert(id, point(i as f64 * 0.1, 0.0));
            assert!(version > previous, "version must strictly increase");
            previous = version;
        }
    }

    #[test]
    fn test_update_existing() {
        let store = AnnotationStore::new();
        let id = AnnotationId(3);
        store.upsert(id, point(1.0, 1.0));

        assert_eq!(store.update(id, point(2.0, 2.0)), Some(2));
        assert_eq!(store.get(id).unwrap().geometry, point(2.0, 2.0));
    }

    #[test]
    fn test_update_unknown_is_silent_noop() {
        let store = AnnotationStore::new();
        assert_eq!(store.update(AnnotationId(9), point(1.0, 1.0)), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove() {
        let store = AnnotationStore::new();
        let id = AnnotationId(5);
        store.upsert(id, point(0.0, 0.0));

        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_version_at_empty_tile_is_zero() {
        let store = AnnotationStore::new();
        let tile = CanonicalTileId::new(10, 100, 100);
        assert_eq!(store.version_at(&tile), 0);
    }

    #[test]
    fn test_version_at_changes_on_mutation() {
        let store = AnnotationStore::new();
        let id = AnnotationId(1);
        let tile = tile_containing(10.0, 20.0, 13);

        store.upsert(id, point(10.0, 20.0));
        let v1 = store.version_at(&tile);
        assert_ne!(v1, 0);

        // Nudge the annotation within the same tile: aggregate must change
        store.upsert(id, point(10.0001, 20.0001));
        let v2 = store.version_at(&tile);
        assert_ne!(v1, v2);

        // Removing it empties the tile again
        store.remove(id);
        assert_eq!(store.version_at(&tile), 0);
    }

    #[test]
    fn test_version_at_ignores_non_intersecting() {
        let store = AnnotationStore::new();
        let tile = tile_containing(10.0, 20.0, 13);

        store.upsert(AnnotationId(1), point(10.0, 20.0));
        let before = store.version_at(&tile);

        // Annotation on the other side of the world
        store.upsert(AnnotationId(2), point(-40.0, -120.0));
        assert_eq!(store.version_at(&tile), before);
    }

    #[test]
    fn test_query_tile_snapshot_consistent() {
        let store = AnnotationStore::new();
        let tile = tile_containing(10.0, 20.0, 13);

        store.upsert(AnnotationId(2), point(10.0, 20.0));
        store.upsert(AnnotationId(1), point(10.0001, 20.0001));
        store.upsert(AnnotationId(3), point(-40.0, -120.0));

        let query = store.query_tile(&tile);
        assert_eq!(query.annotations.len(), 2);
        // Sorted by id for deterministic tile content
        assert_eq!(query.annotations[0].id, AnnotationId(1));
        assert_eq!(query.annotations[1].id, AnnotationId(2));
        assert_eq!(query.version, store.version_at(&tile));
    }

    #[test]
    fn test_concurrent_writes_all_apply() {
        use std::sync::Arc;

        let store = Arc::new(AnnotationStore::new());
        let mut handles = Vec::new();

        for t in 0..4u64 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..25 {
                    store.upsert(AnnotationId(t), point(i as f64 * 0.01, t as f64));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // Each identifier saw 25 serialized mutations
        for t in 0..4u64 {
            assert_eq!(store.get(AnnotationId(t)).unwrap().version, 25);
        }
    }
}
