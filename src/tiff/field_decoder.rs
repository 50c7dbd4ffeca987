//! Typed field decoding
//!
//! Turns an IFD entry into its value sequence. The value bytes are read from
//! the entry's inline slot when they fit, otherwise from the offset held in
//! the slot.

use byteorder::ReadBytesExt;
use log::debug;
use std::io::Read;

use crate::errors::{MetadataError, MetadataResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::{cursor_at, SeekableReader};
use crate::tiff::constants::field_types;
use crate::tiff::ifd::IFDEntry;
use crate::tiff::types::TagValue;
use crate::tiff::validation;
use crate::utils::string_utils;

/// Size in bytes of one value of `field_type`, or `None` for unsupported types
pub const fn field_type_width(field_type: u16) -> Option<u64> {
    match field_type {
        field_types::BYTE | field_types::ASCII | field_types::UNDEFINED => Some(1),
        field_types::SHORT | field_types::SSHORT => Some(2),
        field_types::LONG | field_types::SLONG | field_types::FLOAT => Some(4),
        field_types::RATIONAL | field_types::SRATIONAL | field_types::DOUBLE | field_types::LONG8 => Some(8),
        _ => None,
    }
}

/// Get the name of a TIFF field type
pub fn get_field_type_name(field_type: u16) -> &'static str {
    match field_type {
        field_types::BYTE => "BYTE",
        field_types::ASCII => "ASCII",
        field_types::SHORT => "SHORT",
        field_types::LONG => "LONG",
        field_types::RATIONAL => "RATIONAL",
        field_types::UNDEFINED => "UNDEFINED",
        field_types::SSHORT => "SSHORT",
        field_types::SLONG => "SLONG",
        field_types::SRATIONAL => "SRATIONAL",
        field_types::FLOAT => "FLOAT",
        field_types::DOUBLE => "DOUBLE",
        field_types::IFD => "IFD",
        field_types::LONG8 => "LONG8",
        _ => "Unknown",
    }
}

/// Decodes all values of an entry
///
/// # Arguments
/// * `data` - The whole buffer
/// * `handler` - The byte order handler of the file
/// * `entry` - The IFD entry to decode
/// * `slot_size` - Inline capacity of a value slot (4 for TIFF, 8 for BigTIFF)
///
/// # Returns
/// The decoded values. Unknown field types decode to an empty sequence;
/// storage that falls outside the buffer is an error.
pub fn decode_values(
    data: &[u8],
    handler: &dyn ByteOrderHandler,
    entry: &IFDEntry,
    slot_size: u64,
) -> MetadataResult<Vec<TagValue>> {
    if field_type_width(entry.field_type).is_none() {
        debug!(
            "Skipping tag {} with unsupported field type {} (count {})",
            entry.tag, entry.field_type, entry.count
        );
        return Ok(Vec::new());
    }

    if entry.count == 0 {
        return Ok(Vec::new());
    }

    // Only overflows for counts no buffer could hold.
    let byte_len = entry.byte_len().ok_or(MetadataError::OffsetOutOfBounds {
        offset: entry.value_offset,
        length: u64::MAX,
        buffer_len: data.len() as u64,
    })?;

    let position = entry.data_position(slot_size);
    validation::ensure_in_bounds(position, byte_len, data.len())?;

    let mut reader = cursor_at(data, position);
    // Bounded by the buffer length after the check above.
    let count = entry.count as usize;

    if entry.field_type == field_types::ASCII {
        let mut buffer = vec![0u8; count];
        reader.read_exact(&mut buffer)?;
        string_utils::trim_trailing_nulls(&mut buffer);
        return Ok(vec![TagValue::Ascii(String::from_utf8_lossy(&buffer).into_owned())]);
    }

    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(read_value(&mut reader, handler, entry.field_type)?);
    }

    Ok(values)
}

/// Reads one value of a known, non-ASCII field type
fn read_value(
    reader: &mut dyn SeekableReader,
    handler: &dyn ByteOrderHandler,
    field_type: u16,
) -> MetadataResult<TagValue> {
    let value = match field_type {
        field_types::BYTE => TagValue::Byte(reader.read_u8()?),
        field_types::UNDEFINED => TagValue::Undefined(reader.read_u8()?),
        field_types::SHORT => TagValue::Short(handler.read_u16(reader)?),
        field_types::SSHORT => TagValue::SShort(handler.read_i16(reader)?),
        field_types::LONG => TagValue::Long(handler.read_u32(reader)?),
        field_types::SLONG => TagValue::SLong(handler.read_i32(reader)?),
        field_types::RATIONAL => {
            let (num, den) = handler.read_rational(reader)?;
            TagValue::Rational(num as f64 / den as f64)
        }
        field_types::SRATIONAL => {
            let (num, den) = handler.read_srational(reader)?;
            TagValue::SRational(num as f64 / den as f64)
        }
        field_types::FLOAT => TagValue::Float(handler.read_f32(reader)?),
        field_types::DOUBLE => TagValue::Double(handler.read_f64(reader)?),
        field_types::LONG8 => TagValue::Long8(handler.read_u64(reader)?),
        other => {
            return Err(format!("Field type {} has no decoder", other).into());
        }
    };

    Ok(value)
}
