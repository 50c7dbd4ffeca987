//! TIFF/BigTIFF buffer reader
//!
//! Detects byte order and version from the header and hands the buffer to
//! the matching IFD walker.

use log::{debug, info};

use crate::errors::{MetadataError, MetadataResult};
use crate::io::byte_order::ByteOrder;
use crate::io::seekable::cursor_at;
use crate::tiff::bigtiff::BigTiffIfdWalker;
use crate::tiff::classic::ClassicTiffIfdWalker;
use crate::tiff::constants::header;
use crate::tiff::ifd::IFD;
use crate::tiff::types::TIFF;
use crate::tiff::walker::IfdWalker;

/// TIFF flavour announced by the header version field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffFormat {
    /// Version 42, 32-bit offsets
    Classic,
    /// Version 43, 64-bit offsets
    BigTiff,
}

impl TiffFormat {
    /// Maps a header version to a format
    pub fn from_version(version: u16) -> MetadataResult<Self> {
        match version {
            header::TIFF_VERSION => Ok(TiffFormat::Classic),
            header::BIG_TIFF_VERSION => Ok(TiffFormat::BigTiff),
            other => Err(MetadataError::UnsupportedVersion(other)),
        }
    }
}

/// Detects the byte order and format of a TIFF header
///
/// # Returns
/// A tuple with (byte_order, format)
pub fn detect_tiff_format(data: &[u8]) -> MetadataResult<(ByteOrder, TiffFormat)> {
    if data.len() < 8 {
        return Err(MetadataError::InvalidHeader);
    }

    let mut reader = cursor_at(data, 0);
    let byte_order = ByteOrder::detect(&mut reader)?;
    debug!("Detected byte order: {}", byte_order.name());

    let version = byte_order.create_handler().read_u16(&mut reader)?;
    debug!("TIFF version: {}", version);

    Ok((byte_order, TiffFormat::from_version(version)?))
}

/// Reader for TIFF and BigTIFF buffers
pub struct TiffReader<'a> {
    /// Walker matching the header's format
    walker: Box<dyn IfdWalker + 'a>,
    /// Byte order of the buffer
    byte_order: ByteOrder,
}

impl<'a> TiffReader<'a> {
    /// Opens a buffer, reading its header
    ///
    /// Version 42 selects the classic walker, version 43 the BigTIFF walker.
    pub fn open(data: &'a [u8]) -> MetadataResult<Self> {
        let (byte_order, format) = detect_tiff_format(data)?;

        let walker: Box<dyn IfdWalker + 'a> = match format {
            TiffFormat::Classic => {
                debug!("Detected standard TIFF format");
                Box::new(ClassicTiffIfdWalker::new(data, byte_order))
            }
            TiffFormat::BigTiff => {
                debug!("Detected BigTIFF format");
                Box::new(BigTiffIfdWalker::new(data, byte_order)?)
            }
        };

        Ok(TiffReader { walker, byte_order })
    }

    /// Reads every IFD reachable from the header
    pub fn read(&self) -> MetadataResult<TIFF> {
        let mut tiff = TIFF::new(self.is_big_tiff(), self.byte_order);
        tiff.ifds = self.walker.walk()?;

        info!("Read {} IFDs from {} buffer", tiff.ifd_count(), if tiff.is_big_tiff { "BigTIFF" } else { "TIFF" });
        Ok(tiff)
    }

    /// Reads the single pointer IFD at `offset` (e.g. the GPS IFD)
    pub fn read_ifd_at(&self, offset: u64) -> MetadataResult<Option<IFD>> {
        Ok(self.walker.walk_single(offset)?.into_iter().next())
    }

    /// Returns whether the buffer is a BigTIFF
    pub fn is_big_tiff(&self) -> bool {
        self.walker.is_big_tiff()
    }

    /// Returns the byte order of the buffer
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }
}
