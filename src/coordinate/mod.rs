//! Coordinate handling for geotagged imagery
//!
//! This module turns GPS tags into GeoJSON-ready WGS84 points.

mod point;
mod resolver;

// Re-export key types
pub use self::point::GeoPoint;
pub use self::resolver::{dms_to_decimal, CoordinateResolver, SOUTH, WEST};
