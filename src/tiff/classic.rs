//! Classic TIFF IFD walker
//!
//! Standard TIFF uses 32-bit offsets: a 2-byte entry count, 12-byte entries
//! of `{tag: u16, type: u16, count: u32, value_or_offset: u32}`, a 4-byte
//! inline value slot and a 4-byte next-IFD pointer. EXIF blocks embedded in
//! JPEG files use the same layout.
//!
//! Pointer fields typed IFD (13) are read as LONG offsets, so GPS and
//! SubIFD pointers written that way are still followed.

use std::io::Cursor;

use crate::errors::MetadataResult;
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::cursor_at;
use crate::tiff::constants::{field_types, header};
use crate::tiff::field_decoder;
use crate::tiff::ifd::IFDEntry;
use crate::tiff::types::TagValue;
use crate::tiff::walker::IfdWalker;

/// Walker for 32-bit-offset IFD chains
pub struct ClassicTiffIfdWalker<'a> {
    data: &'a [u8],
    handler: Box<dyn ByteOrderHandler>,
}

impl<'a> ClassicTiffIfdWalker<'a> {
    /// Creates a walker over a classic TIFF buffer
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        ClassicTiffIfdWalker {
            data,
            handler: byte_order.create_handler(),
        }
    }
}

impl IfdWalker for ClassicTiffIfdWalker<'_> {
    fn data(&self) -> &[u8] {
        self.data
    }

    fn handler(&self) -> &dyn ByteOrderHandler {
        self.handler.as_ref()
    }

    fn is_big_tiff(&self) -> bool {
        false
    }

    fn slot_size(&self) -> u64 {
        4
    }

    fn entry_size(&self) -> u64 {
        12
    }

    fn first_ifd_offset(&self) -> MetadataResult<u64> {
        let mut reader = cursor_at(self.data, header::TIFF_FIRST_IFD_POSITION);
        Ok(self.handler.read_u32(&mut reader)? as u64)
    }

    fn read_entry_count(&self, reader: &mut Cursor<&[u8]>) -> MetadataResult<u64> {
        Ok(self.handler.read_u16(reader)? as u64)
    }

    fn read_entry(&self, reader: &mut Cursor<&[u8]>) -> MetadataResult<IFDEntry> {
        let tag = self.handler.read_u16(reader)?;
        let field_type = self.handler.read_u16(reader)?;
        let count = self.handler.read_u32(reader)? as u64;
        let slot_position = reader.position();
        let value_offset = self.handler.read_u32(reader)? as u64;

        Ok(IFDEntry::new(tag, field_type, count, value_offset, slot_position))
    }

    fn read_next_offset(&self, reader: &mut Cursor<&[u8]>) -> MetadataResult<u64> {
        Ok(self.handler.read_u32(reader)? as u64)
    }

    fn decode_entry(&self, entry: &IFDEntry) -> MetadataResult<Vec<TagValue>> {
        if entry.field_type == field_types::IFD {
            let as_long = IFDEntry {
                field_type: field_types::LONG,
                ..entry.clone()
            };
            return field_decoder::decode_values(self.data, self.handler(), &as_long, self.slot_size());
        }
        field_decoder::decode_values(self.data, self.handler(), entry, self.slot_size())
    }
}
