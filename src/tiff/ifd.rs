//! Image File Directory (IFD) structures and methods
//!
//! An IFD is a list of tag entries. Each entry names a field type and count
//! and either holds its value inline or points at out-of-line storage. Once
//! walked, every entry's values are decoded and kept next to the entry.

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};

use crate::formats::get_tag_name;
use crate::tiff::field_decoder::{field_type_width, get_field_type_name};
use crate::tiff::types::TagValue;

/// Represents an Image File Directory (IFD) in a TIFF file
#[derive(Debug, Clone)]
pub struct IFD {
    /// Entries in this IFD
    pub entries: Vec<IFDEntry>,
    /// IFD number (0-based, discovery order)
    pub number: usize,
    /// Offset to this IFD in the buffer
    pub offset: u64,
    /// Decoded values by tag
    values: HashMap<u16, Vec<TagValue>>,
}

/// Represents an entry in an Image File Directory (IFD)
#[derive(Debug, Clone)]
pub struct IFDEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u64,
    /// Value slot contents, read as an offset
    pub value_offset: u64,
    /// Buffer position of the value slot itself
    pub slot_position: u64,
}

impl IFDEntry {
    /// Creates a new IFD entry
    pub fn new(tag: u16, field_type: u16, count: u64, value_offset: u64, slot_position: u64) -> Self {
        trace!(
            "IFD entry: tag={} ({}), type={} ({}), count={}, offset/value={}",
            tag,
            get_tag_name(tag),
            field_type,
            get_field_type_name(field_type),
            count,
            value_offset
        );

        Self {
            tag,
            field_type,
            count,
            value_offset,
            slot_position,
        }
    }

    /// Total encoded size of the values, if the field type is known
    ///
    /// Returns `None` for unknown field types and for counts whose size
    /// overflows.
    pub fn byte_len(&self) -> Option<u64> {
        field_type_width(self.field_type)?.checked_mul(self.count)
    }

    /// Determines if the value is stored inline in a slot of `slot_size` bytes
    pub fn is_value_inline(&self, slot_size: u64) -> bool {
        matches!(self.byte_len(), Some(len) if len <= slot_size)
    }

    /// Position of the first value byte, inline or out-of-line
    pub fn data_position(&self, slot_size: u64) -> u64 {
        if self.is_value_inline(slot_size) {
            self.slot_position
        } else {
            self.value_offset
        }
    }
}

impl IFD {
    /// Creates a new, empty IFD
    pub fn new(number: usize, offset: u64) -> Self {
        debug!("Creating new IFD #{} at offset {}", number, offset);

        Self {
            entries: Vec::new(),
            number,
            offset,
            values: HashMap::new(),
        }
    }

    /// Adds an entry and its decoded values
    pub fn add_entry(&mut self, entry: IFDEntry, values: Vec<TagValue>) {
        self.values.insert(entry.tag, values);
        self.entries.push(entry);
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.values.contains_key(&tag)
    }

    /// Gets an IFD entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    /// Gets the decoded values of a tag
    pub fn get_values(&self, tag: u16) -> Option<&[TagValue]> {
        self.values.get(&tag).map(Vec::as_slice)
    }

    /// Gets the first value of a tag
    pub fn first_value(&self, tag: u16) -> Option<&TagValue> {
        self.get_values(tag)?.first()
    }

    /// Gets the first value of an ASCII tag
    pub fn first_str(&self, tag: u16) -> Option<&str> {
        self.first_value(tag)?.as_str()
    }

    /// Gets the first value of a tag as an offset
    pub fn first_offset(&self, tag: u16) -> Option<u64> {
        self.first_value(tag)?.as_u64()
    }

    /// Gets the number of entries in this IFD
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the IFD holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD #{} (offset: {})", self.number, self.offset)?;
        writeln!(f, "  Number of entries: {}", self.entries.len())?;
        writeln!(f, "  Tags:")?;
        for entry in &self.entries {
            let values = self
                .get_values(entry.tag)
                .map(|values| {
                    values
                        .iter()
                        .take(8)
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();

            writeln!(
                f,
                "    {} ({}): [{}] {}",
                entry.tag,
                get_tag_name(entry.tag),
                get_field_type_name(entry.field_type),
                values
            )?;
        }

        Ok(())
    }
}
