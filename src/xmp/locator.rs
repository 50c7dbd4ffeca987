//! XMP packet location
//!
//! Finds the `<x:xmpmeta ... </x:xmpmeta>` byte range inside an arbitrary
//! binary buffer. Both scans are capped so a buffer full of near-misses
//! cannot cause unbounded work.

use log::debug;

/// Opening marker of an XMP packet
pub const MARKER_BEGIN: &[u8] = b"<x:xmpmeta";
/// Closing marker of an XMP packet
pub const MARKER_END: &[u8] = b"</x:xmpmeta>";
/// Maximum number of `<` candidates tried while looking for the opening marker
pub const MAX_MARKER_PASSES: usize = 1000;
/// Size of each window searched for the closing marker
pub const WINDOW_SIZE: usize = 1000;
/// Maximum number of windows searched for the closing marker
pub const MAX_WINDOWS: usize = 100;

/// Returns the bytes of the first complete XMP packet, if any
pub fn locate_packet(data: &[u8]) -> Option<&[u8]> {
    let start = match find_packet_start(data) {
        Some(start) => start,
        None => {
            debug!("No XMP packet marker found");
            return None;
        }
    };

    match find_packet_end(data, start + MARKER_BEGIN.len()) {
        Some(end) => {
            debug!("XMP packet found at {}..{}", start, end);
            Some(&data[start..end])
        }
        None => {
            debug!("XMP packet at {} has no closing marker within the scan limit", start);
            None
        }
    }
}

/// Finds the opening marker, trying at most [`MAX_MARKER_PASSES`] `<` bytes
fn find_packet_start(data: &[u8]) -> Option<usize> {
    let first_byte = MARKER_BEGIN[0];
    let mut cursor = 0;

    for _ in 0..MAX_MARKER_PASSES {
        let candidate = cursor + data.get(cursor..)?.iter().position(|&b| b == first_byte)?;
        if data[candidate..].starts_with(MARKER_BEGIN) {
            return Some(candidate);
        }
        cursor = candidate + 1;
    }

    None
}

/// Finds the end of the closing marker, scanning fixed windows from `body_start`
///
/// Each window search starts a marker length early so a closing marker
/// split across two windows is still found.
fn find_packet_end(data: &[u8], body_start: usize) -> Option<usize> {
    let mut window_start = body_start;

    for _ in 0..MAX_WINDOWS {
        if window_start >= data.len() {
            return None;
        }
        let window_end = (window_start + WINDOW_SIZE).min(data.len());
        let search_from = window_start.saturating_sub(MARKER_END.len() - 1).max(body_start);

        if let Some(pos) = find_subslice(&data[search_from..window_end], MARKER_END) {
            return Some(search_from + pos + MARKER_END.len());
        }
        window_start = window_end;
    }

    None
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
