//! Core TIFF data structures

use std::fmt;

use crate::io::byte_order::ByteOrder;
use crate::tiff::ifd::IFD;

/// A single decoded field value
///
/// Rationals are stored already divided, the way they are consumed.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Byte(u8),
    Ascii(String),
    Short(u16),
    Long(u32),
    Rational(f64),
    Undefined(u8),
    SShort(i16),
    SLong(i32),
    SRational(f64),
    Float(f32),
    Double(f64),
    Long8(u64),
}

impl TagValue {
    /// Returns the value as an unsigned integer (used for offsets)
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            TagValue::Byte(v) | TagValue::Undefined(v) => Some(v as u64),
            TagValue::Short(v) => Some(v as u64),
            TagValue::Long(v) => Some(v as u64),
            TagValue::Long8(v) => Some(v),
            TagValue::SShort(v) if v >= 0 => Some(v as u64),
            TagValue::SLong(v) if v >= 0 => Some(v as u64),
            _ => None,
        }
    }

    /// Returns the value as a float, for any numeric type
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            TagValue::Byte(v) | TagValue::Undefined(v) => Some(v as f64),
            TagValue::Short(v) => Some(v as f64),
            TagValue::Long(v) => Some(v as f64),
            TagValue::Long8(v) => Some(v as f64),
            TagValue::SShort(v) => Some(v as f64),
            TagValue::SLong(v) => Some(v as f64),
            TagValue::Rational(v) | TagValue::SRational(v) | TagValue::Double(v) => Some(v),
            TagValue::Float(v) => Some(v as f64),
            TagValue::Ascii(_) => None,
        }
    }

    /// Returns the string of an ASCII value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Ascii(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Ascii(s) => write!(f, "{:?}", s),
            other => match other.as_f64() {
                Some(v) => write!(f, "{}", v),
                None => write!(f, "?"),
            },
        }
    }
}

/// A decoded TIFF file: every IFD reached from the header
#[derive(Debug)]
pub struct TIFF {
    /// IFDs in discovery order (chain order, SubIFDs after their parent)
    pub ifds: Vec<IFD>,
    /// Whether this is a BigTIFF format
    pub is_big_tiff: bool,
    /// Byte order of the file
    pub byte_order: ByteOrder,
}

impl TIFF {
    /// Creates a new empty TIFF structure
    pub fn new(is_big_tiff: bool, byte_order: ByteOrder) -> Self {
        TIFF {
            ifds: Vec::new(),
            is_big_tiff,
            byte_order,
        }
    }

    /// Returns the main (first) IFD if available
    pub fn main_ifd(&self) -> Option<&IFD> {
        self.ifds.first()
    }

    /// Returns the number of IFDs in the TIFF file
    pub fn ifd_count(&self) -> usize {
        self.ifds.len()
    }
}

impl fmt::Display for TIFF {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TIFF File:")?;
        writeln!(f, "  Format: {}", if self.is_big_tiff { "BigTIFF" } else { "TIFF" })?;
        writeln!(f, "  Byte order: {}", self.byte_order.name())?;
        writeln!(f, "  Number of IFDs: {}", self.ifds.len())?;

        if let Some(ifd) = self.main_ifd() {
            write!(f, "{}", ifd)?;
        }

        Ok(())
    }
}
