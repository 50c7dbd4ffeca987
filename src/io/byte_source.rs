//! Bounded file reads
//!
//! Metadata is decoded from a prefix of each file only. Anything stored past
//! the first [`MAX_FILE_READ_SIZE`] bytes is out of reach by design.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::debug;

/// Number of leading bytes read from each file
pub const MAX_FILE_READ_SIZE: u64 = 1_000_000;

/// Reads at most `limit` bytes from the start of the file at `path`
pub fn read_prefix(path: &Path, limit: u64) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut buffer = Vec::with_capacity(limit.min(64 * 1024) as usize);
    file.take(limit).read_to_end(&mut buffer)?;

    debug!("Read {} bytes from {}", buffer.len(), path.display());
    Ok(buffer)
}
