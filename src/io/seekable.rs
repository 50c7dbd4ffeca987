//! Seekable reader trait and buffer cursors
//!
//! Every decoder works against an in-memory buffer. Reads go through a
//! `Cursor`, so running off the end of the buffer surfaces as an
//! `UnexpectedEof` error instead of undefined behaviour.

use std::io::{Cursor, Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}

/// Creates a cursor over `data` positioned at `offset`
pub fn cursor_at(data: &[u8], offset: u64) -> Cursor<&[u8]> {
    let mut cursor = Cursor::new(data);
    cursor.set_position(offset);
    cursor
}
