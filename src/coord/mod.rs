//! Geographic coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator / Slippy Map tile indices, used when intersecting
//! annotation geometry with tile bounds.

mod types;

pub use types::{CoordError, GeoBounds, LatLng, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON};

use std::f64::consts::PI;

/// Converts a geographic coordinate to tile indices at the given zoom.
///
/// # Arguments
///
/// * `point` - Geographic coordinate (validated against Web Mercator range)
/// * `zoom` - Zoom level (0 to 22)
///
/// # Returns
///
/// The `(x, y)` column/row pair of the containing tile, or an error if the
/// coordinate or zoom is out of range.
#[inline]
pub fn to_tile_indices(point: &LatLng, zoom: u8) -> Result<(u32, u32), CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&point.lat) {
        return Err(CoordError::InvalidLatitude(point.lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&point.lon) {
        return Err(CoordError::InvalidLongitude(point.lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = 2.0_f64.powi(zoom as i32);
    let max_index = (1u32 << zoom) - 1;

    let x = (((point.lon + 180.0) / 360.0 * n) as u32).min(max_index);

    let lat_rad = point.lat * PI / 180.0;
    let y = ((((1.0 - lat_rad.tan().asinh() / PI) / 2.0) * n) as u32).min(max_index);

    Ok((x, y))
}

/// Converts tile indices back to the tile's northwest-corner coordinate.
///
/// Passing `x = 2^zoom` or `y = 2^zoom` yields the far edge of the map,
/// which is how a tile's south/east bounds are computed.
#[inline]
pub fn tile_origin(zoom: u8, x: u32, y: u32) -> LatLng {
    let n = 2.0_f64.powi(zoom as i32);

    let lon = x as f64 / n * 360.0 - 180.0;

    let frac = y as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * frac)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    LatLng { lat, lon }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_york_city_at_zoom_16() {
        // New York City: 40.7128 N, 74.0060 W
        let point = LatLng {
            lat: 40.7128,
            lon: -74.0060,
        };
        let (x, y) = to_tile_indices(&point, 16).unwrap();
        assert_eq!(x, 19295);
        assert_eq!(y, 24640);
    }

    #[test]
    fn test_zoom_zero_is_single_tile() {
        let point = LatLng {
            lat: 51.5074,
            lon: -0.1278,
        };
        let (x, y) = to_tile_indices(&point, 0).unwrap();
        assert_eq!((x, y), (0, 0));
    }

    #[test]
    fn test_invalid_latitude_rejected() {
        let point = LatLng { lat: 90.0, lon: 0.0 };
        assert!(matches!(
            to_tile_indices(&point, 10),
            Err(CoordError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_invalid_zoom_rejected() {
        let point = LatLng { lat: 0.0, lon: 0.0 };
        assert!(matches!(
            to_tile_indices(&point, 23),
            Err(CoordError::InvalidZoom(23))
        ));
    }

    #[test]
    fn test_east_edge_clamps_to_last_tile() {
        // lon = 180.0 is valid input but falls on the far edge; it must map
        // into the last column rather than one past it.
        let point = LatLng {
            lat: 0.0,
            lon: 180.0,
        };
        let (x, _) = to_tile_indices(&point, 4).unwrap();
        assert_eq!(x, 15);
    }

    #[test]
    fn test_tile_origin_northwest_corner() {
        let origin = tile_origin(16, 19295, 24640);
        assert!((origin.lat - 40.713).abs() < 0.01);
        assert!((origin.lon - (-74.007)).abs() < 0.01);
    }

    #[test]
    fn test_tile_origin_world_corners() {
        let nw = tile_origin(0, 0, 0);
        assert!((nw.lon - (-180.0)).abs() < 1e-9);
        assert!((nw.lat - MAX_LAT).abs() < 1e-6);

        let se = tile_origin(0, 1, 1);
        assert!((se.lon - 180.0).abs() < 1e-9);
        assert!((se.lat - MIN_LAT).abs() < 1e-6);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let point = LatLng {
            lat: 40.7128,
            lon: -74.0060,
        };
        let zoom = 16;

        let (x, y) = to_tile_indices(&point, zoom).unwrap();
        let origin = tile_origin(zoom, x, y);

        // Northwest corner of the containing tile is within one tile of the
        // original coordinate.
        let tile_degrees = 360.0 / 2.0_f64.powi(zoom as i32);
        assert!((origin.lat - point.lat).abs() < tile_degrees);
        assert!((origin.lon - point.lon).abs() < tile_degrees);
    }

    #[test]
    fn test_roundtrip_at_different_zooms() {
        let point = LatLng {
            lat: 51.5074,
            lon: -0.1278,
        };

        for zoom in [0, 5, 10, 15, 18, 22] {
            let (x, y) = to_tile_indices(&point, zoom).unwrap();
            let origin = tile_origin(zoom, x, y);
            let tile_degrees = 360.0 / 2.0_f64.powi(zoom as i32);

            assert!(
                (origin.lat - point.lat).abs() < tile_degrees,
                "zoom {}: lat diff {} exceeds tile size {}",
                zoom,
                (origin.lat - point.lat).abs(),
                tile_degrees
            );
            assert!(
                (origin.lon - point.lon).abs() < tile_degrees,
                "zoom {}: lon diff {} exceeds tile size {}",
                zoom,
                (origin.lon - point.lon).abs(),
                tile_degrees
            );
        }
    }
}
