//! Format-specific metadata extraction
//!
//! This module provides one extractor per supported mimetype behind a
//! common strategy trait.

pub mod jpeg;
pub mod strategy;
pub mod tiff;

pub use jpeg::{classify, JpegMetadataExtractor, JpegTags};
pub use strategy::{ExtractorFactory, MetadataExtractor};
pub use tiff::TiffMetadataExtractor;
