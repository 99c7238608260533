//! Tile pyramid addressing.
//!
//! Tiles are addressed by a canonical `(z, x, y)` triple in a quad-tree
//! pyramid, plus an overscaled zoom for tiles displayed at a finer zoom
//! than the one their content was built at.

use crate::coord::{tile_origin, GeoBounds};
use std::fmt;

/// A node in the quad-tree tile pyramid.
///
/// `z` is the zoom the tile's content is natively built at; `x` and `y`
/// are the column and row, valid when both are below `2^z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalTileId {
    /// Canonical zoom level
    pub z: u8,
    /// Column (east-west), 0 at the west edge
    pub x: u32,
    /// Row (north-south), 0 at the north edge
    pub y: u32,
}

impl CanonicalTileId {
    /// Create a new canonical tile address.
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Whether the column and row are valid for this zoom level.
    pub fn is_valid(&self) -> bool {
        self.z <= crate::coord::MAX_ZOOM && {
            let dim = 1u64 << self.z;
            (self.x as u64) < dim && (self.y as u64) < dim
        }
    }

    /// The ancestor tile at a coarser zoom that geographically contains
    /// this tile.
    ///
    /// Ancestor indices are the integer division of this tile's indices by
    /// `2^(z - ancestor_z)`. Returns `self` when `ancestor_z >= z`.
    pub fn ancestor_at(&self, ancestor_z: u8) -> CanonicalTileId {
        if ancestor_z >= self.z {
            return *self;
        }
        let dz = self.z - ancestor_z;
        CanonicalTileId {
            z: ancestor_z,
            x: self.x >> dz,
            y: self.y >> dz,
        }
    }

    /// Geographic bounds of this tile.
    pub fn bounds(&self) -> GeoBounds {
        let nw = tile_origin(self.z, self.x, self.y);
        let se = tile_origin(self.z, self.x + 1, self.y + 1);
        GeoBounds {
            north: nw.lat,
            south: se.lat,
            west: nw.lon,
            east: se.lon,
        }
    }
}

impl fmt::Display for CanonicalTileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// A tile address at a display zoom that may exceed the canonical zoom.
///
/// When `overscaled_z > canonical.z` the tile's content is rendered scaled
/// up by `2^(overscaled_z - canonical.z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverscaledTileId {
    /// Zoom the tile is requested/displayed at
    pub overscaled_z: u8,
    /// Address the content is natively built at
    pub canonical: CanonicalTileId,
}

impl OverscaledTileId {
    /// Create an overscaled address.
    pub fn new(overscaled_z: u8, canonical: CanonicalTileId) -> Self {
        Self {
            overscaled_z,
            canonical,
        }
    }

    /// A non-overscaled address (display zoom equals canonical zoom).
    pub fn native(canonical: CanonicalTileId) -> Self {
        Self {
            overscaled_z: canonical.z,
            canonical,
        }
    }

    /// Whether the address satisfies the pyramid invariants.
    ///
    /// Requires `overscaled_z >= canonical.z` and in-range column/row.
    pub fn is_valid(&self) -> bool {
        self.overscaled_z >= self.canonical.z && self.canonical.is_valid()
    }

    /// Zoom levels between the display zoom and the canonical zoom.
    pub fn overscale_delta(&self) -> u8 {
        self.overscaled_z - self.canonical.z
    }

    /// Linear scale-up factor applied when rendering (`2^delta`).
    pub fn scale_factor(&self) -> u32 {
        1u32 << self.overscale_delta()
    }

    /// Whether the content is rendered at a finer zoom than it was built.
    pub fn is_overscaled(&self) -> bool {
        self.overscaled_z > self.canonical.z
    }

    /// Re-address this tile so its content comes from the given canonical
    /// zoom, keeping the display zoom.
    ///
    /// Used when a request above a source's maximum zoom is served by the
    /// containing ancestor tile.
    pub fn scaled_to(&self, canonical_z: u8) -> OverscaledTileId {
        OverscaledTileId {
            overscaled_z: self.overscaled_z,
            canonical: self.canonical.ancestor_at(canonical_z),
        }
    }
}

impl fmt::Display for OverscaledTileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_overscaled() {
            write!(f, "{}=>{}", self.overscaled_z, self.canonical)
        } else {
            write!(f, "{}", self.canonical)
        }
    }
}

/// Inclusive zoom range at which a source produces native content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    pub min: u8,
    pub max: u8,
}

impl ZoomRange {
    /// Create a range; `min` must not exceed `max`.
    pub fn new(min: u8, max: u8) -> Self {
        debug_assert!(min <= max, "zoom range min must not exceed max");
        Self { min, max }
    }

    /// Whether the zoom lies inside the range.
    pub fn contains(&self, zoom: u8) -> bool {
        zoom >= self.min && zoom <= self.max
    }
}
