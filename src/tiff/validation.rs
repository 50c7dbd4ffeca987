//! TIFF validation utilities
//!
//! Bounds checks applied before any read whose position comes from the
//! file itself.

use log::{debug, error};

use crate::errors::{MetadataError, MetadataResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;

/// Ensures `length` bytes starting at `offset` lie inside a buffer of `buffer_len` bytes
pub fn ensure_in_bounds(offset: u64, length: u64, buffer_len: usize) -> MetadataResult<()> {
    let buffer_len = buffer_len as u64;
    match offset.checked_add(length) {
        Some(end) if end <= buffer_len => Ok(()),
        _ => Err(MetadataError::OffsetOutOfBounds {
            offset,
            length,
            buffer_len,
        }),
    }
}

/// Validates the BigTIFF header
///
/// After the version number (43) a BigTIFF header carries the offset
/// size (always 8) and a reserved zero.
pub fn validate_bigtiff_header(
    reader: &mut dyn SeekableReader,
    byte_order_handler: &dyn ByteOrderHandler,
) -> MetadataResult<()> {
    let offset_size = byte_order_handler.read_u16(reader)?;
    let zeros = byte_order_handler.read_u16(reader)?;

    debug!("BigTIFF offset size: {}, reserved: {}", offset_size, zeros);

    if offset_size != header::BIGTIFF_OFFSET_SIZE || zeros != 0 {
        error!("Invalid BigTIFF header: offset_size={}, zeros={}", offset_size, zeros);
        return Err(MetadataError::InvalidBigTIFFHeader);
    }

    Ok(())
}
