//! JPEG metadata extraction
//!
//! Reads the EXIF block for focal length and GPS position and the embedded
//! XMP packet for the gimbal pitch. A JPEG without either block is fine;
//! the corresponding values are just missing.

use std::io::Cursor;

use exif::{Exif, In, Tag, Value};
use log::{debug, warn};

use crate::coordinate::{dms_to_decimal, CoordinateResolver, SOUTH, WEST};
use crate::errors::MetadataResult;
use crate::extract::strategy::MetadataExtractor;
use crate::record::{FileCategory, ParsedRecord};
use crate::utils::string_utils::trim_trailing_nulls;
use crate::xmp::parse_xmp;

/// Focal length (mm) of the 45mm survey lens
pub const FOCAL_LENGTH_45MM: f64 = 45.0;
/// Gimbal pitch of a straight-down shot
pub const NADIR_PITCH: f64 = -90.0;
/// Largest deviation from nadir still counted as a nadir shot
pub const OBLIQUE_TOLERANCE: f64 = 15.0;
/// Flattened XMP key of the DJI gimbal pitch
pub const GIMBAL_PITCH_KEY: &str = "gimbalPitchDegree";

/// Values read from a JPEG that drive its record
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JpegTags {
    pub focal_length: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub gimbal_pitch: Option<f64>,
}

/// Extractor for `image/jpeg` buffers
#[derive(Debug, Default)]
pub struct JpegMetadataExtractor;

impl JpegMetadataExtractor {
    pub fn new() -> Self {
        JpegMetadataExtractor
    }

    /// Reads the EXIF and XMP values used for classification
    pub fn read_tags(&self, data: &[u8]) -> MetadataResult<JpegTags> {
        let mut tags = JpegTags::default();

        if let Some(exif) = read_exif(data)? {
            tags.focal_length = first_rational(&exif, Tag::FocalLength);
            tags.latitude = gps_axis(&exif, Tag::GPSLatitudeRef, Tag::GPSLatitude, SOUTH);
            tags.longitude = gps_axis(&exif, Tag::GPSLongitudeRef, Tag::GPSLongitude, WEST);
        }

        let xmp = parse_xmp(data)?;
        tags.gimbal_pitch = xmp.get_f64(GIMBAL_PITCH_KEY);

        debug!("JPEG tags: {:?}", tags);
        Ok(tags)
    }
}

impl MetadataExtractor for JpegMetadataExtractor {
    fn extract(&self, data: &[u8], record: &mut ParsedRecord) -> MetadataResult<()> {
        let tags = self.read_tags(data)?;

        record.category = Some(classify(tags.focal_length, tags.gimbal_pitch));
        record.coordinates = CoordinateResolver::from_exif(tags.latitude, tags.longitude);
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "JPEG"
    }
}

/// Classifies a photo by lens and camera angle, first match wins
///
/// A missing pitch never counts as oblique.
pub fn classify(focal_length: Option<f64>, gimbal_pitch: Option<f64>) -> FileCategory {
    if focal_length == Some(FOCAL_LENGTH_45MM) {
        FileCategory::Rgb45mmImage
    } else if matches!(gimbal_pitch, Some(pitch) if (pitch - NADIR_PITCH).abs() > OBLIQUE_TOLERANCE) {
        FileCategory::RgbObliqueImage
    } else {
        FileCategory::RgbImage
    }
}

/// Reads the EXIF block, treating a missing block as no tags
///
/// Fields that fail to decode are dropped as long as the container itself
/// parses.
fn read_exif(data: &[u8]) -> MetadataResult<Option<Exif>> {
    let mut cursor = Cursor::new(data);
    match exif::Reader::new().continue_on_error(true).read_from_container(&mut cursor) {
        Ok(exif) => Ok(Some(exif)),
        Err(exif::Error::NotFound(container)) => {
            debug!("No EXIF block in {} container", container);
            Ok(None)
        }
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            for error in &errors {
                warn!("Skipped malformed EXIF field: {}", error);
            }
            Ok(Some(exif))
        }
        Err(e) => Err(e.into()),
    }
}

fn first_rational(exif: &Exif, tag: Tag) -> Option<f64> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Rational(values) => values.first().map(|v| v.to_f64()),
        _ => None,
    }
}

/// One GPS axis in signed decimal degrees; a missing ref counts as positive
fn gps_axis(exif: &Exif, ref_tag: Tag, dms_tag: Tag, negative_ref: &str) -> Option<f64> {
    let (degrees, minutes, seconds) = match &exif.get_field(dms_tag, In::PRIMARY)?.value {
        Value::Rational(values) if values.len() == 3 => {
            (values[0].to_f64(), values[1].to_f64(), values[2].to_f64())
        }
        _ => return None,
    };

    let reference = exif.get_field(ref_tag, In::PRIMARY).and_then(|field| match &field.value {
        Value::Ascii(strings) => strings.first().map(|s| {
            let mut bytes = s.clone();
            trim_trailing_nulls(&mut bytes);
            String::from_utf8_lossy(&bytes).into_owned()
        }),
        _ => None,
    });

    let negative = reference.as_deref() == Some(negative_ref);
    Some(dms_to_decimal(degrees, minutes, seconds, negative))
}
