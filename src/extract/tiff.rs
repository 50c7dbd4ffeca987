//! TIFF and BigTIFF metadata extraction

use log::{debug, info};

use crate::coordinate::CoordinateResolver;
use crate::errors::MetadataResult;
use crate::extract::strategy::MetadataExtractor;
use crate::record::{FileCategory, ParsedRecord};
use crate::tiff::constants::{tags, FLIR_MAKE};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;

/// Extractor for `image/tiff` buffers, classic or BigTIFF
#[derive(Debug, Default)]
pub struct TiffMetadataExtractor;

impl TiffMetadataExtractor {
    pub fn new() -> Self {
        TiffMetadataExtractor
    }

    /// Applies the first IFD's classification tags to `record`
    ///
    /// GeoTIFF is checked last, so a georeferenced thermal image ends up
    /// as a layer.
    fn classify(&self, ifd: &IFD, record: &mut ParsedRecord) {
        record.category = Some(FileCategory::RgbImage);

        if ifd.first_str(tags::MAKE) == Some(FLIR_MAKE) {
            debug!("Make is {}, classifying as thermal", FLIR_MAKE);
            record.category = Some(FileCategory::ThermalImage);
        }

        if ifd.has_tag(tags::GEO_ASCII_PARAMS_TAG) {
            debug!("GeoAsciiParams present, classifying as layer");
            record.is_geotiff = true;
            record.category = Some(FileCategory::Layer);
        }
    }
}

impl MetadataExtractor for TiffMetadataExtractor {
    fn extract(&self, data: &[u8], record: &mut ParsedRecord) -> MetadataResult<()> {
        let reader = TiffReader::open(data)?;
        let tiff = reader.read()?;
        debug!("{}: {}", record.name, tiff);

        let ifd = match tiff.main_ifd() {
            Some(ifd) if !ifd.is_empty() => ifd,
            _ => {
                info!("{} has no tags in its first IFD", record.name);
                return Ok(());
            }
        };

        self.classify(ifd, record);

        if let Some(gps_offset) = ifd.first_offset(tags::GPS_IFD) {
            debug!("Reading GPS IFD at offset {}", gps_offset);
            if let Some(gps_ifd) = reader.read_ifd_at(gps_offset)? {
                record.coordinates = CoordinateResolver::from_gps_ifd(&gps_ifd);
            }
        }

        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "TIFF"
    }
}
