//! Tile content built from the annotation store.
//!
//! Content is immutable once built and shared by reference: every
//! overscaled descendant of an ancestor tile holds the same `TileData`
//! allocation, so rebuilding happens per canonical address, not per
//! request.

use crate::coord::{GeoBounds, LatLng};
use crate::store::AnnotationId;
use crate::tile::{CanonicalTileId, OverscaledTileId};
use std::sync::Arc;

/// Tile-local coordinate extent.
///
/// Feature positions are expressed in integer units of a
/// `TILE_EXTENT x TILE_EXTENT` grid over the tile. Shape vertices may fall
/// outside `0..TILE_EXTENT` when the shape extends past the tile edge.
pub const TILE_EXTENT: i32 = 8192;

/// A point in tile-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

/// Annotation geometry projected into tile-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum TileGeometry {
    Point(TilePoint),
    Shape(Vec<TilePoint>),
}

/// One annotation's contribution to a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileFeature {
    /// Identifier of the source annotation
    pub id: AnnotationId,
    /// Geometry in tile-local coordinates
    pub geometry: TileGeometry,
}

/// Immutable content for one canonical tile address.
///
/// Tagged with the address it was built at and the aggregate store version
/// it was built from; a later store version for the same address makes
/// this content stale.
#[derive(Debug)]
pub struct TileData {
    canonical: CanonicalTileId,
    version: u64,
    features: Vec<TileFeature>,
}

impl TileData {
    /// Build content for a canonical address from projected features.
    pub fn new(canonical: CanonicalTileId, version: u64, features: Vec<TileFeature>) -> Self {
        Self {
            canonical,
            version,
            features,
        }
    }

    /// The canonical address the content was built at.
    pub fn canonical(&self) -> CanonicalTileId {
        self.canonical
    }

    /// The aggregate store version the content was built from.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Features contained in the tile.
    pub fn features(&self) -> &[TileFeature] {
        &self.features
    }

    /// Whether the tile carries no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// The product handed to the rendering pipeline.
///
/// Pairs the address the renderer asked for with shared content; when the
/// request was overscaled, `id.canonical` names the coarser ancestor the
/// content actually belongs to.
#[derive(Debug, Clone)]
pub struct Tile {
    id: OverscaledTileId,
    data: Arc<TileData>,
}

impl Tile {
    /// Wrap content under the address it will be rendered at.
    pub fn new(id: OverscaledTileId, data: Arc<TileData>) -> Self {
        Self { id, data }
    }

    /// The address the tile is rendered at.
    pub fn id(&self) -> OverscaledTileId {
        self.id
    }

    /// The shared content.
    pub fn data(&self) -> &Arc<TileData> {
        &self.data
    }

    /// The store version the content was built from.
    pub fn version(&self) -> u64 {
        self.data.version()
    }

    /// Whether two tiles share the same content allocation.
    pub fn shares_data(&self, other: &Tile) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

/// Projects a geographic coordinate into tile-local coordinates.
///
/// The tile's northwest corner maps to `(0, 0)` and its southeast corner
/// to `(TILE_EXTENT, TILE_EXTENT)`. Coordinates outside the tile project
/// outside that range.
pub fn project_to_tile(point: &LatLng, bounds: &GeoBounds) -> TilePoint {
    let width = bounds.east - bounds.west;
    let height = bounds.north - bounds.south;

    let fx = (point.lon - bounds.west) / width;
    let fy = (bounds.north - point.lat) / height;

    TilePoint {
        x: (fx * TILE_EXTENT as f64).round() as i32,
        y: (fy * TILE_EXTENT as f64).round() as i32,
    }
}
