//! BigTIFF IFD walker
//!
//! BigTIFF widens every count and offset to 64 bits: an IFD starts with an
//! 8-byte entry count, each 20-byte entry is
//! `{tag: u16, type: u16, count: u64, value_or_offset: u64}`, values of up
//! to 8 bytes live inline in the slot, and the chain pointer after the
//! entries is 8 bytes wide.

use std::io::Cursor;

use crate::errors::MetadataResult;
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::cursor_at;
use crate::tiff::constants::header;
use crate::tiff::ifd::IFDEntry;
use crate::tiff::validation;
use crate::tiff::walker::IfdWalker;

/// Walker for 64-bit-offset IFD chains
pub struct BigTiffIfdWalker<'a> {
    data: &'a [u8],
    handler: Box<dyn ByteOrderHandler>,
}

impl<'a> BigTiffIfdWalker<'a> {
    /// Creates a walker over a BigTIFF buffer
    ///
    /// # Errors
    /// Fails if the header is truncated or its offset-size/reserved fields
    /// are wrong.
    ///
    /// # Panics
    /// Panics if the header version is not 43. Callers dispatch on the
    /// version first; reaching this walker with another version is a bug
    /// in the caller, not bad input.
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> MetadataResult<Self> {
        let handler = byte_order.create_handler();
        let mut reader = cursor_at(data, 2);
        let version = handler.read_u16(&mut reader)?;
        assert_eq!(
            version,
            header::BIG_TIFF_VERSION,
            "BigTiffIfdWalker used on a buffer with TIFF version {}",
            version
        );
        validation::validate_bigtiff_header(&mut reader, handler.as_ref())?;

        Ok(BigTiffIfdWalker { data, handler })
    }
}

impl IfdWalker for BigTiffIfdWalker<'_> {
    fn data(&self) -> &[u8] {
        self.data
    }

    fn handler(&self) -> &dyn ByteOrderHandler {
        self.handler.as_ref()
    }

    fn is_big_tiff(&self) -> bool {
        true
    }

    fn slot_size(&self) -> u64 {
        8
    }

    fn entry_size(&self) -> u64 {
        20
    }

    fn first_ifd_offset(&self) -> MetadataResult<u64> {
        let mut reader = cursor_at(self.data, header::BIGTIFF_FIRST_IFD_POSITION);
        Ok(self.handler.read_u64(&mut reader)?)
    }

    fn read_entry_count(&self, reader: &mut Cursor<&[u8]>) -> MetadataResult<u64> {
        Ok(self.handler.read_u64(reader)?)
    }

    fn read_entry(&self, reader: &mut Cursor<&[u8]>) -> MetadataResult<IFDEntry> {
        let tag = self.handler.read_u16(reader)?;
        let field_type = self.handler.read_u16(reader)?;
        let count = self.handler.read_u64(reader)?;
        let slot_position = reader.position();
        let value_offset = self.handler.read_u64(reader)?;

        Ok(IFDEntry::new(tag, field_type, count, value_offset, slot_position))
    }

    fn read_next_offset(&self, reader: &mut Cursor<&[u8]>) -> MetadataResult<u64> {
        Ok(self.handler.read_u64(reader)?)
    }
}
