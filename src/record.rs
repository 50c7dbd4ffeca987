//! Per-file result record

use std::fmt;

use serde::{Serialize, Serializer};

use crate::coordinate::GeoPoint;
use crate::errors::MetadataError;

/// Classification of a file by its metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    RgbImage,
    #[serde(rename = "rgb_45mm_image")]
    Rgb45mmImage,
    RgbObliqueImage,
    ThermalImage,
    Layer,
}

impl FileCategory {
    /// Serialized name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::RgbImage => "rgb_image",
            FileCategory::Rgb45mmImage => "rgb_45mm_image",
            FileCategory::RgbObliqueImage => "rgb_oblique_image",
            FileCategory::ThermalImage => "thermal_image",
            FileCategory::Layer => "layer",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata extracted from one file
///
/// A record always exists for every input, even when decoding failed; the
/// failure then lives in `error` and `category` is absent.
#[derive(Debug, Default, Serialize)]
pub struct ParsedRecord {
    pub name: String,
    pub category: Option<FileCategory>,
    #[serde(rename = "isGeoTIFF")]
    pub is_geotiff: bool,
    pub coordinates: Option<GeoPoint>,
    #[serde(serialize_with = "serialize_error", skip_serializing_if = "Option::is_none")]
    pub error: Option<MetadataError>,
}

impl ParsedRecord {
    /// Creates an empty record for `name`
    pub fn new(name: impl Into<String>) -> Self {
        ParsedRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Records a decode failure, discarding any partial classification
    pub fn fail(&mut self, error: MetadataError) {
        self.category = None;
        self.error = Some(error);
    }

    /// Whether decoding this file failed
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

fn serialize_error<S: Serializer>(error: &Option<MetadataError>, serializer: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_str(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn categories_serialize_to_snake_case_names() {
        for category in [
            FileCategory::RgbImage,
            FileCategory::Rgb45mmImage,
            FileCategory::RgbObliqueImage,
            FileCategory::ThermalImage,
            FileCategory::Layer,
        ] {
            assert_eq!(serde_json::to_value(category).unwrap(), json!(category.as_str()));
        }
    }

    #[test]
    fn record_uses_external_field_names() {
        let mut record = ParsedRecord::new("ortho.tif");
        record.category = Some(FileCategory::Layer);
        record.is_geotiff = true;
        record.coordinates = Some(GeoPoint::new(5.5, 52.25));

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "name": "ortho.tif",
                "category": "layer",
                "isGeoTIFF": true,
                "coordinates": {"type": "Point", "coordinates": [5.5, 52.25]}
            })
        );
    }

    #[test]
    fn failure_resets_category_and_serializes_message() {
        let mut record = ParsedRecord::new("broken.tif");
        record.category = Some(FileCategory::RgbImage);
        record.fail(MetadataError::InvalidHeader);

        assert!(record.is_failed());
        assert_eq!(record.category, None);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["error"], json!("Invalid TIFF header"));
        assert_eq!(value["category"], json!(null));
    }
}
