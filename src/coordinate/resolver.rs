//! GPS tag to position conversion
//!
//! EXIF positions arrive as signed decimal degrees and are passed through.
//! TIFF positions come from the GPS IFD as hemisphere refs plus
//! degree/minute/second triples. A point is produced only when both axes
//! resolve; a malformed axis is simply missing, never an error.

use log::debug;

use crate::coordinate::point::GeoPoint;
use crate::tiff::constants::gps_tags;
use crate::tiff::ifd::IFD;
use crate::tiff::types::TagValue;

/// Hemisphere ref that negates a latitude
pub const SOUTH: &str = "S";
/// Hemisphere ref that negates a longitude
pub const WEST: &str = "W";

/// Builds positions from EXIF or TIFF GPS tags
pub struct CoordinateResolver;

impl CoordinateResolver {
    /// Pairs already-decimal EXIF latitude and longitude
    pub fn from_exif(latitude: Option<f64>, longitude: Option<f64>) -> Option<GeoPoint> {
        Some(GeoPoint::new(longitude?, latitude?))
    }

    /// Resolves the position stored in a TIFF GPS IFD (tags 1-4)
    pub fn from_gps_ifd(gps_ifd: &IFD) -> Option<GeoPoint> {
        let latitude = Self::resolve_axis(
            gps_ifd.get_values(gps_tags::LATITUDE_REF),
            gps_ifd.get_values(gps_tags::LATITUDE),
            SOUTH,
        );
        let longitude = Self::resolve_axis(
            gps_ifd.get_values(gps_tags::LONGITUDE_REF),
            gps_ifd.get_values(gps_tags::LONGITUDE),
            WEST,
        );

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(longitude, latitude)),
            _ => {
                debug!("GPS IFD has no complete position (lat={:?}, lon={:?})", latitude, longitude);
                None
            }
        }
    }

    /// Resolves one axis from its ref (exactly one value) and DMS (exactly three values)
    pub fn resolve_axis(
        reference: Option<&[TagValue]>,
        dms: Option<&[TagValue]>,
        negative_ref: &str,
    ) -> Option<f64> {
        let reference = match reference? {
            [single] => single.as_str()?,
            _ => return None,
        };
        let (degrees, minutes, seconds) = match dms? {
            [d, m, s] => (d.as_f64()?, m.as_f64()?, s.as_f64()?),
            _ => return None,
        };

        Some(dms_to_decimal(degrees, minutes, seconds, reference == negative_ref))
    }
}

/// Converts degrees/minutes/seconds to decimal degrees
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, negative: bool) -> f64 {
    let sign = if negative { -1.0 } else { 1.0 };
    sign * (degrees + minutes / 60.0 + seconds / 3600.0)
}
