//! Overscale resolution and the shared ancestor-tile cache.
//!
//! A request above the source's maximum zoom is served by the containing
//! ancestor at that maximum, scaled up at render time. One ancestor build
//! serves every overscaled descendant, so concurrent descendant requests
//! must collapse into a single build per (ancestor, store version).

use crate::tile::{CanonicalTileId, OverscaledTileId, TileData, ZoomRange};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// Outcome of resolving a requested address against a zoom range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverscaleDecision {
    /// Build content at the requested canonical zoom
    Native,
    /// Serve the containing ancestor at the source's maximum zoom
    Overscaled {
        ancestor: CanonicalTileId,
        /// Zoom levels between the request and the ancestor
        delta: u8,
    },
    /// The request is below the source's minimum zoom: no content
    BelowMinimum,
}

/// Decides how a tile request maps onto native or ancestor content.
///
/// Pure address arithmetic; the decision never consults the store.
pub fn resolve(id: &OverscaledTileId, range: ZoomRange) -> OverscaleDecision {
    let z = id.canonical.z;
    if z < range.min {
        return OverscaleDecision::BelowMinimum;
    }
    if z <= range.max {
        return OverscaleDecision::Native;
    }
    let ancestor = id.canonical.ancestor_at(range.max);
    OverscaleDecision::Overscaled {
        ancestor,
        delta: z - range.max,
    }
}

/// One cache slot: content for a canonical address at a fixed version.
///
/// The `OnceLock` carries the single-flight guarantee: the first caller
/// runs the build closure, every concurrent caller blocks until the value
/// is set, and nobody builds twice.
#[derive(Debug)]
struct CacheSlot {
    version: u64,
    cell: OnceLock<Option<Arc<TileData>>>,
}

impl CacheSlot {
    fn new(version: u64) -> Self {
        Self {
            version,
            cell: OnceLock::new(),
        }
    }
}

/// Shared cache of built tile content keyed by canonical address.
///
/// An entry is valid only for the store version it was built at; a request
/// carrying a newer version replaces the slot under the shard lock, so at
/// most one slot per (address, version) ever exists.
#[derive(Debug, Default)]
pub struct AncestorCache {
    slots: DashMap<CanonicalTileId, Arc<CacheSlot>>,
    builds: AtomicU64,
}

impl AncestorCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cached content for `(id, version)`, building it at most once.
    ///
    /// `build` returns `None` for the empty-tile result; emptiness is
    /// cached like any other content so repeated requests for a vacant
    /// address stay cheap.
    pub fn get_or_build<F>(
        &self,
        id: CanonicalTileId,
        version: u64,
        build: F,
    ) -> Option<Arc<TileData>>
    where
        F: FnOnce() -> Option<Arc<TileData>>,
    {
        let slot = match self.slots.entry(id) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().version != version {
                    debug!(tile = %id, version, stale = occupied.get().version,
                        "ancestor content stale, rebuilding");
                    occupied.insert(Arc::new(CacheSlot::new(version)));
                }
                occupied.get().clone()
            }
            Entry::Vacant(vacant) => vacant.insert(Arc::new(CacheSlot::new(version))).clone(),
        };

        // Build outside the shard lock; OnceLock serializes initializers.
        slot.cell
            .get_or_init(|| {
                self.builds.fetch_add(1, Ordering::Relaxed);
                trace!(tile = %id, version, "building tile content");
                build()
            })
            .clone()
    }

    /// Number of builds performed since creation.
    ///
    /// The overscale-correctness invariant: sibling descendant requests of
    /// one ancestor at one version add exactly one to this count.
    pub fn builds(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }

    /// Number of cached canonical addresses.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the cache holds no content.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop all cached content.
    pub fn clear(&self) {
        self.slots.clear();
    }
}
