//! Built-in lookup tables
//!
//! The extension to mimetype map and the tag name table are read from the
//! embedded `formats.toml` the first time they are needed and are immutable
//! from then on, so parallel parses can share them freely.

use std::collections::HashMap;
use std::path::Path;

use lazy_static::lazy_static;
use log::warn;

use crate::errors::{MetadataError, MetadataResult};

/// Mimetype for JPEG files
pub const MIME_JPEG: &str = "image/jpeg";
/// Mimetype for TIFF and BigTIFF files
pub const MIME_TIFF: &str = "image/tiff";
/// Mimetype for PNG files (no metadata support)
pub const MIME_PNG: &str = "image/png";

lazy_static! {
    static ref FORMAT_DEFINITIONS: FormatDefinitions = {
        let content = include_str!("../formats.toml");
        FormatDefinitions::from_str(content).unwrap_or_else(|e| {
            warn!("Failed to parse built-in format definitions: {}", e);
            FormatDefinitions::default()
        })
    };
}

/// Container for the extension and tag name tables
#[derive(Debug, Default)]
pub struct FormatDefinitions {
    // Maps lower-case extensions to mimetypes
    pub extensions: HashMap<String, String>,
    // Maps tag IDs to tag names
    pub tag_names: HashMap<u16, String>,
}

impl FormatDefinitions {
    /// Parse definitions from a TOML string
    pub fn from_str(content: &str) -> MetadataResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| MetadataError::GenericError(format!("Failed to parse TOML: {}", e)))?;

        let mut defs = FormatDefinitions::default();

        if let Some(table) = toml_value.get("extensions").and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let Some(mimetype) = v.as_str() {
                    defs.extensions.insert(k.to_ascii_lowercase(), mimetype.to_string());
                }
            }
        }

        if let Some(table) = toml_value.get("tag_names").and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let (Ok(id), Some(name)) = (k.parse::<u16>(), v.as_str()) {
                    defs.tag_names.insert(id, name.to_string());
                }
            }
        }

        Ok(defs)
    }
}

/// Looks up the mimetype for a file name by its extension
pub fn mimetype_for(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    FORMAT_DEFINITIONS.extensions.get(&extension).map(String::as_str)
}

/// Get the name of a tag, or "Unknown"
pub fn get_tag_name(tag: u16) -> &'static str {
    FORMAT_DEFINITIONS
        .tag_names
        .get(&tag)
        .map(String::as_str)
        .unwrap_or("Unknown")
}
