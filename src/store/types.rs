//! Annotation data types.

use crate::coord::{GeoBounds, LatLng};
use std::fmt;

/// Stable identifier for an annotation.
///
/// Unique for the annotation's lifetime within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(pub u64);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "annotation#{}", self.0)
    }
}

/// Annotation geometry in geographic coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single point marker
    Point(LatLng),
    /// A polyline/polygon outline
    Shape(Vec<LatLng>),
}

impl Geometry {
    /// Bounding box of the geometry.
    ///
    /// A point yields a degenerate box; an empty shape yields `None`.
    pub fn bounds(&self) -> Option<GeoBounds> {
        match self {
            Geometry::Point(p) => Some(GeoBounds {
                north: p.lat,
                south: p.lat,
                west: p.lon,
                east: p.lon,
            }),
            Geometry::Shape(points) => GeoBounds::enclosing(points),
        }
    }

    /// Whether the geometry intersects a tile's geographic bounds.
    ///
    /// Points test for containment; shapes test bounding-box overlap,
    /// which may keep a shape whose hull only grazes the tile. That is the
    /// conservative side: extra features render as empty space, missing
    /// ones would clip visibly.
    pub fn intersects(&self, tile_bounds: &GeoBounds) -> bool {
        match self {
            Geometry::Point(p) => tile_bounds.contains(p),
            Geometry::Shape(points) => match GeoBounds::enclosing(points) {
                Some(hull) => hull.intersects(tile_bounds),
                None => false,
            },
        }
    }
}

/// A user- or application-placed feature overlaid on the map.
///
/// Owned by the [`AnnotationStore`](crate::store::AnnotationStore); the
/// version counter is bumped on every mutation and never decreases within
/// a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: AnnotationId,
    pub geometry: Geometry,
    pub version: u64,
}
