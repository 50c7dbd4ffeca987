//! Metadata extractor strategy definitions
//!
//! Each supported mimetype has one extractor. The factory picks it; a
//! mimetype without an extractor is not an error, the record just stays
//! at its defaults.

use log::debug;

use crate::errors::MetadataResult;
use crate::extract::jpeg::JpegMetadataExtractor;
use crate::extract::tiff::TiffMetadataExtractor;
use crate::formats::{MIME_JPEG, MIME_TIFF};
use crate::record::ParsedRecord;

/// Strategy for filling a record from one file format's metadata
pub trait MetadataExtractor: Send + Sync {
    /// Decodes `data` and writes what it finds into `record`
    ///
    /// On error the record may be partially written; the caller is
    /// responsible for resetting it.
    fn extract(&self, data: &[u8], record: &mut ParsedRecord) -> MetadataResult<()>;

    /// Human readable format name used in logs
    fn format_name(&self) -> &'static str;
}

/// Factory for extractor strategies keyed by mimetype
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Creates the extractor for `mimetype`, if the format carries metadata we read
    pub fn for_mimetype(mimetype: &str) -> Option<Box<dyn MetadataExtractor>> {
        match mimetype {
            MIME_JPEG => Some(Box::new(JpegMetadataExtractor::new())),
            MIME_TIFF => Some(Box::new(TiffMetadataExtractor::new())),
            other => {
                debug!("No metadata extractor for mimetype {}", other);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::MIME_PNG;

    #[test]
    fn known_mimetypes_have_extractors() {
        assert_eq!(ExtractorFactory::for_mimetype(MIME_JPEG).map(|e| e.format_name()), Some("JPEG"));
        assert_eq!(ExtractorFactory::for_mimetype(MIME_TIFF).map(|e| e.format_name()), Some("TIFF"));
    }

    #[test]
    fn png_and_unknown_mimetypes_have_none() {
        assert!(ExtractorFactory::for_mimetype(MIME_PNG).is_none());
        assert!(ExtractorFactory::for_mimetype("application/pdf").is_none());
    }
}
