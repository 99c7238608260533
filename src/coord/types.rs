//! Geographic coordinate type definitions

use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Maximum zoom level addressable in the tile pyramid
pub const MAX_ZOOM: u8 = 22;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Latitude in degrees, positive north
    pub lat: f64,
    /// Longitude in degrees, positive east
    pub lon: f64,
}

impl LatLng {
    /// Create a new coordinate, validating against the Web Mercator range.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(CoordError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Whether this coordinate lies inside the renderable map area.
    pub fn is_valid(&self) -> bool {
        (MIN_LAT..=MAX_LAT).contains(&self.lat) && (MIN_LON..=MAX_LON).contains(&self.lon)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Geographic bounding box.
///
/// `north >= south`; the box does not wrap the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

impl GeoBounds {
    /// Whether a coordinate lies inside the box.
    ///
    /// The north and west edges are inclusive, the south and east edges
    /// exclusive, so adjacent tile bounds tile the plane without overlap.
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat <= self.north
            && point.lat > self.south
            && point.lon >= self.west
            && point.lon < self.east
    }

    /// Whether two boxes overlap.
    pub fn intersects(&self, other: &GeoBounds) -> bool {
        self.south < other.north
            && other.south < self.north
            && self.west < other.east
            && other.west < self.east
    }

    /// Smallest box containing every coordinate in `points`.
    ///
    /// Returns `None` for an empty slice.
    pub fn enclosing(points: &[LatLng]) -> Option<GeoBounds> {
        let first = points.first()?;
        let mut bounds = GeoBounds {
            north: first.lat,
            south: first.lat,
            west: first.lon,
            east: first.lon,
        };
        for p in &points[1..] {
            bounds.north = bounds.north.max(p.lat);
            bounds.south = bounds.south.min(p.lat);
            bounds.west = bounds.west.min(p.lon);
            bounds.east = bounds.east.max(p.lon);
        }
        Some(bounds)
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is outside the Web Mercator range
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180.0 to 180.0)
    InvalidLongitude(f64),
    /// Zoom level is outside valid range (0 to 22)
    InvalidZoom(u8),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be at most {})",
                    zoom, MAX_ZOOM
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_new_valid() {
        let p = LatLng::new(40.7128, -74.0060).unwrap();
        assert_eq!(p.lat, 40.7128);
        assert_eq!(p.lon, -74.0060);
        assert!(p.is_valid());
    }

    #[test]
    fn test_lat_lng_new_invalid_latitude() {
        let result = LatLng::new(90.0, 0.0);
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
    }

    #[test]
    fn test_lat_lng_new_invalid_longitude() {
        let result = LatLng::new(0.0, 181.0);
        assert!(matches!(result, Err(CoordError::InvalidLongitude(_))));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = GeoBounds {
            north: 10.0,
            south: 0.0,
            west: 20.0,
            east: 30.0,
        };
        assert!(bounds.contains(&LatLng { lat: 5.0, lon: 25.0 }));
        // North and west edges inclusive
        assert!(bounds.contains(&LatLng {
            lat: 10.0,
            lon: 20.0
        }));
        // South and east edges exclusive
        assert!(!bounds.contains(&LatLng { lat: 0.0, lon: 25.0 }));
        assert!(!bounds.contains(&LatLng { lat: 5.0, lon: 30.0 }));
    }

    #[test]
    fn test_bounds_intersects() {
        let a = GeoBounds {
            north: 10.0,
            south: 0.0,
            west: 0.0,
            east: 10.0,
        };
        let b = GeoBounds {
            north: 15.0,
            south: 5.0,
            west: 5.0,
            east: 15.0,
        };
        let c = GeoBounds {
            north: 30.0,
            south: 20.0,
            west: 20.0,
            east: 30.0,
        };
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_bounds_enclosing() {
        let points = [
            LatLng { lat: 1.0, lon: 2.0 },
            LatLng { lat: -3.0, lon: 7.0 },
            LatLng { lat: 4.0, lon: -1.0 },
        ];
        let bounds = GeoBounds::enclosing(&points).unwrap();
        assert_eq!(bounds.north, 4.0);
        assert_eq!(bounds.south, -3.0);
        assert_eq!(bounds.west, -1.0);
        assert_eq!(bounds.east, 7.0);
    }

    #[test]
    fn test_bounds_enclosing_empty() {
        assert!(GeoBounds::enclosing(&[]).is_none());
    }

    #[test]
    fn test_coord_error_display() {
        let err = CoordError::InvalidLatitude(91.0);
        assert!(err.to_string().contains("91"));
        let err = CoordError::InvalidZoom(42);
        assert!(err.to_string().contains("42"));
    }
}
