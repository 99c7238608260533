//! Tilemark - annotation tile synthesis for map renderers
//!
//! This library provides the annotation subsystem of a map rendering
//! engine: on-demand tile content built from user-placed annotations,
//! overscale resolution so deep-zoom requests reuse a coarser ancestor's
//! geometry, and the recycling and drag-lifecycle contract for the
//! interactive views that represent annotations on screen.
//!
//! # Overview
//!
//! ```
//! use std::sync::Arc;
//! use tilemark::source::{AnnotationSource, AnnotationSourceOptions, Source, UpdateParameters};
//! use tilemark::store::{AnnotationId, AnnotationStore, Geometry};
//! use tilemark::coord::LatLng;
//! use tilemark::tile::{CanonicalTileId, OverscaledTileId};
//!
//! let store = Arc::new(AnnotationStore::new());
//! store.upsert(AnnotationId(1), Geometry::Point(LatLng { lat: 10.0, lon: 20.0 }));
//!
//! let source = AnnotationSource::new(store, AnnotationSourceOptions::default());
//! let id = OverscaledTileId::native(CanonicalTileId::new(0, 0, 0));
//! let tile = source.create_tile(&id, &UpdateParameters::default()).unwrap();
//! assert!(tile.is_some());
//! ```
//!
//! The rendering pipeline, vector-tile encoding, and platform view
//! plumbing are external collaborators; [`tile::Tile`] is the opaque
//! handoff point.

pub mod coord;
pub mod logging;
pub mod pool;
pub mod source;
pub mod store;
pub mod tile;
pub mod view;

/// Version of the tilemark library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
