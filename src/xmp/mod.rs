//! Embedded XMP extraction
//!
//! Locates the XMP packet inside a raw image buffer and flattens it into
//! key maps.

pub mod document;
pub mod locator;
pub mod parser;

pub use document::{XmpDocument, XmpEntry, XmpValue};
pub use parser::{parse_packet, parse_xmp};
