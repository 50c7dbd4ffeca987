//! TIFF format parsing module
//!
//! This module provides structures and functions for decoding the IFDs of
//! TIFF and BigTIFF buffers.

pub mod ifd;
pub mod types;
pub mod reader;
pub mod walker;
pub mod bigtiff;
pub mod classic;
pub mod field_decoder;
pub mod constants;
pub(crate) mod validation;
#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use bigtiff::BigTiffIfdWalker;
pub use classic::ClassicTiffIfdWalker;
pub use ifd::{IFD, IFDEntry};
pub use reader::{detect_tiff_format, TiffFormat, TiffReader};
pub use types::{TagValue, TIFF};
pub use walker::IfdWalker;
