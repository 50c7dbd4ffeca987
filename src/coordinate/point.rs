//! Point structure for representing WGS84 positions

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude, east positive
    pub longitude: f64,
    /// Latitude, north positive
    pub latitude: f64,
}

impl GeoPoint {
    /// Create a new point
    pub fn new(longitude: f64, latitude: f64) -> Self {
        GeoPoint { longitude, latitude }
    }

    /// GeoJSON coordinate order: `[lon, lat]`
    pub fn coordinates(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Serializes as a GeoJSON `Point` geometry
impl Serialize for GeoPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Point", 2)?;
        state.serialize_field("type", "Point")?;
        state.serialize_field("coordinates", &self.coordinates())?;
        state.end()
    }
}
