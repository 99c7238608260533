//! Tile pyramid addressing and tile content.
//!
//! A tile address is a node in a quad-tree pyramid: each parent covers
//! exactly four children at the next zoom. An [`OverscaledTileId`] adds a
//! display zoom on top of the canonical address so one tile's content can
//! serve requests at finer zooms ("overscaling"). [`Tile`] is the opaque
//! product consumed by the rendering pipeline.

mod content;
mod id;

pub use content::{
    project_to_tile, Tile, TileData, TileFeature, TileGeometry, TilePoint, TILE_EXTENT,
};
pub use id::{CanonicalTileId, OverscaledTileId, ZoomRange};
