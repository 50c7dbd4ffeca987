//! Custom error types for metadata extraction

use std::fmt;
use std::io;

/// Errors raised while decoding a single file's metadata
///
/// Every variant is a per-file failure: the dispatcher attaches it to the
/// record of the file that produced it and carries on with the batch.
#[derive(Debug)]
pub enum MetadataError {
    /// I/O error, including reads that run past the end of the buffer
    IoError(io::Error),
    /// Buffer too short to hold a TIFF header
    InvalidHeader,
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Invalid BigTIFF header
    InvalidBigTIFFHeader,
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// A read of `length` bytes at `offset` does not fit in the buffer
    OffsetOutOfBounds { offset: u64, length: u64, buffer_len: u64 },
    /// An IFD declares more entries than the buffer can hold
    InvalidEntryCount { offset: u64, count: u64 },
    /// Malformed embedded XMP packet
    XmpError(quick_xml::Error),
    /// Malformed EXIF block
    ExifError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::IoError(e) => write!(f, "I/O error: {}", e),
            MetadataError::InvalidHeader => write!(f, "Invalid TIFF header"),
            MetadataError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            MetadataError::InvalidBigTIFFHeader => write!(f, "Invalid BigTIFF header"),
            MetadataError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            MetadataError::OffsetOutOfBounds { offset, length, buffer_len } => write!(
                f,
                "Read of {} bytes at offset {} exceeds buffer length {}",
                length, offset, buffer_len
            ),
            MetadataError::InvalidEntryCount { offset, count } => {
                write!(f, "IFD at offset {} declares an impossible entry count: {}", offset, count)
            }
            MetadataError::XmpError(e) => write!(f, "XMP error: {}", e),
            MetadataError::ExifError(msg) => write!(f, "EXIF error: {}", msg),
            MetadataError::GenericError(msg) => write!(f, "Metadata error: {}", msg),
        }
    }
}

impl std::error::Error for MetadataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetadataError::IoError(e) => Some(e),
            MetadataError::XmpError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MetadataError {
    fn from(error: io::Error) -> Self {
        MetadataError::IoError(error)
    }
}

impl From<quick_xml::Error> for MetadataError {
    fn from(error: quick_xml::Error) -> Self {
        MetadataError::XmpError(error)
    }
}

impl From<quick_xml::events::attributes::AttrError> for MetadataError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        MetadataError::XmpError(quick_xml::Error::InvalidAttr(error))
    }
}

impl From<exif::Error> for MetadataError {
    fn from(error: exif::Error) -> Self {
        MetadataError::ExifError(error.to_string())
    }
}

impl From<serde_json::Error> for MetadataError {
    fn from(error: serde_json::Error) -> Self {
        MetadataError::GenericError(format!("JSON output failed: {}", error))
    }
}

impl From<String> for MetadataError {
    fn from(msg: String) -> Self {
        MetadataError::GenericError(msg)
    }
}

/// Result type for metadata operations
pub type MetadataResult<T> = Result<T, MetadataError>;
