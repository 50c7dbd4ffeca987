//! String utility functions
//!
//! Utilities for working with strings and text data.

/// Trims trailing null characters from a byte buffer
pub fn trim_trailing_nulls(buffer: &mut Vec<u8>) {
    while buffer.last() == Some(&0) {
        buffer.pop();
    }
}

/// Returns the part of a qualified name after the namespace prefix
///
/// `"dc:title"` becomes `"title"`; names without a prefix are returned as is.
pub fn local_name(name: &str) -> &str {
    match name.split(':').nth(1) {
        Some(local) => local,
        None => name,
    }
}

/// Lower-cases the first character
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-cases the first character
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_only_trailing_nulls() {
        let mut buffer = b"FL\0IR\0\0".to_vec();
        trim_trailing_nulls(&mut buffer);
        assert_eq!(buffer, b"FL\0IR");
    }

    #[test]
    fn strips_namespace_prefix() {
        assert_eq!(local_name("drone-dji:GimbalPitchDegree"), "GimbalPitchDegree");
        assert_eq!(local_name("about"), "about");
    }

    #[test]
    fn changes_case_of_first_character() {
        assert_eq!(lowercase_first("GimbalPitchDegree"), "gimbalPitchDegree");
        assert_eq!(capitalize_first("title"), "Title");
        assert_eq!(capitalize_first(""), "");
    }
}
