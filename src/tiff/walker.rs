//! IFD chain and tree walking
//!
//! Classic TIFF and BigTIFF differ only in field widths: entry counts,
//! entry layout, value slot size and next-IFD pointers. The walkers supply
//! those primitives; the chain following, SubIFD recursion and cycle
//! protection are shared here.

use std::collections::HashSet;
use std::io::Cursor;

use log::{debug, info, warn};

use crate::errors::{MetadataError, MetadataResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::cursor_at;
use crate::tiff::constants::{limits, tags};
use crate::tiff::field_decoder;
use crate::tiff::ifd::{IFDEntry, IFD};
use crate::tiff::types::TagValue;
use crate::tiff::validation;

/// Accumulated state of one walk
#[derive(Debug, Default)]
pub struct WalkState {
    /// IFDs in discovery order
    pub ifds: Vec<IFD>,
    /// Offsets of every IFD already decoded
    visited: HashSet<u64>,
}

impl WalkState {
    /// Records `offset` as visited; false if it was seen before
    fn visit(&mut self, offset: u64) -> bool {
        self.visited.insert(offset)
    }
}

/// Format-specific IFD decoding primitives plus the shared walking logic
pub trait IfdWalker {
    /// The buffer being decoded
    fn data(&self) -> &[u8];

    /// Byte order handler for the buffer
    fn handler(&self) -> &dyn ByteOrderHandler;

    /// Whether this walker decodes BigTIFF layouts
    fn is_big_tiff(&self) -> bool;

    /// Size of an entry's value slot in bytes
    fn slot_size(&self) -> u64;

    /// Size of one IFD entry in bytes
    fn entry_size(&self) -> u64;

    /// Reads the offset of the first IFD from the header
    fn first_ifd_offset(&self) -> MetadataResult<u64>;

    /// Reads an IFD's entry count
    fn read_entry_count(&self, reader: &mut Cursor<&[u8]>) -> MetadataResult<u64>;

    /// Reads one IFD entry (without decoding its values)
    fn read_entry(&self, reader: &mut Cursor<&[u8]>) -> MetadataResult<IFDEntry>;

    /// Reads the pointer to the next IFD in the chain
    fn read_next_offset(&self, reader: &mut Cursor<&[u8]>) -> MetadataResult<u64>;

    /// Decodes the values of one entry
    fn decode_entry(&self, entry: &IFDEntry) -> MetadataResult<Vec<TagValue>> {
        field_decoder::decode_values(self.data(), self.handler(), entry, self.slot_size())
    }

    /// Walks the whole IFD chain starting at the header's first offset
    fn walk(&self) -> MetadataResult<Vec<IFD>> {
        let first = self.first_ifd_offset()?;
        debug!("First IFD offset: {}", first);
        self.walk_chain(first)
    }

    /// Walks an IFD chain starting at `first_offset`
    ///
    /// Stops at a zero next-offset, at an offset already visited, or once
    /// [`limits::MAX_IFDS`] IFDs have been collected.
    fn walk_chain(&self, first_offset: u64) -> MetadataResult<Vec<IFD>> {
        let mut state = WalkState::default();
        let mut offset = first_offset;

        while offset != 0 {
            if state.ifds.len() >= limits::MAX_IFDS {
                warn!("IFD limit of {} reached, stopping IFD chain", limits::MAX_IFDS);
                break;
            }
            if !state.visit(offset) {
                warn!("IFD chain loops back to offset {}, stopping", offset);
                break;
            }
            offset = self.read_ifd(offset, 0, &mut state)?;
        }

        info!("Read {} IFDs", state.ifds.len());
        Ok(state.ifds)
    }

    /// Decodes the single IFD at `offset`, plus any SubIFDs it points to
    ///
    /// Used for pointer IFDs such as the GPS IFD, whose next-offset is
    /// not followed.
    fn walk_single(&self, offset: u64) -> MetadataResult<Vec<IFD>> {
        let mut state = WalkState::default();
        state.visit(offset);
        self.read_ifd(offset, 0, &mut state)?;
        Ok(state.ifds)
    }

    /// Decodes the IFD at `offset` into `state`
    ///
    /// The IFD is appended before any of its SubIFDs (tag 330), which are
    /// decoded recursively up to [`limits::MAX_SUB_IFD_DEPTH`] levels.
    ///
    /// # Returns
    /// The next-IFD offset stored after the entries
    fn read_ifd(&self, offset: u64, depth: usize, state: &mut WalkState) -> MetadataResult<u64> {
        let data = self.data();
        let mut reader = cursor_at(data, offset);

        let entry_count = self.read_entry_count(&mut reader)?;
        debug!("IFD at offset {} declares {} entries", offset, entry_count);

        // The entry table itself must fit in the buffer.
        let table_len = entry_count
            .checked_mul(self.entry_size())
            .ok_or(MetadataError::InvalidEntryCount { offset, count: entry_count })?;
        if validation::ensure_in_bounds(reader.position(), table_len, data.len()).is_err() {
            return Err(MetadataError::InvalidEntryCount { offset, count: entry_count });
        }

        let mut ifd = IFD::new(state.ifds.len(), offset);
        let mut sub_ifd_offsets = Vec::new();

        for _ in 0..entry_count {
            let entry = self.read_entry(&mut reader)?;
            let values = self.decode_entry(&entry)?;

            if entry.tag == tags::SUB_IFDS {
                sub_ifd_offsets.extend(values.iter().filter_map(|v| v.as_u64()));
            }

            ifd.add_entry(entry, values);
        }

        let next_offset = self.read_next_offset(&mut reader)?;
        debug!("IFD #{} read with {} entries, next IFD offset: {}", ifd.number, ifd.entry_count(), next_offset);
        state.ifds.push(ifd);

        for sub_offset in sub_ifd_offsets {
            if depth + 1 > limits::MAX_SUB_IFD_DEPTH {
                warn!("SubIFD nesting deeper than {} levels, skipping offset {}", limits::MAX_SUB_IFD_DEPTH, sub_offset);
                continue;
            }
            if state.ifds.len() >= limits::MAX_IFDS {
                warn!("IFD limit of {} reached, skipping SubIFD at {}", limits::MAX_IFDS, sub_offset);
                break;
            }
            if !state.visit(sub_offset) {
                warn!("SubIFD offset {} already decoded, skipping", sub_offset);
                continue;
            }
            self.read_ifd(sub_offset, depth + 1, state)?;
        }

        Ok(next_offset)
    }
}
