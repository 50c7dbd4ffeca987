//! Routing of buffers and files to their metadata extractor
//!
//! The dispatcher is the failure boundary: whatever goes wrong while
//! decoding one file ends up on that file's record, so a batch of N files
//! always yields N records in input order.

use std::path::Path;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::extract::ExtractorFactory;
use crate::formats::mimetype_for;
use crate::io::byte_source::{read_prefix, MAX_FILE_READ_SIZE};
use crate::record::ParsedRecord;
use crate::utils::progress::ProgressTracker;

/// Parses files and buffers into records
#[derive(Debug, Clone)]
pub struct FormatDispatcher {
    /// Number of leading bytes read from each file
    read_limit: u64,
}

impl Default for FormatDispatcher {
    fn default() -> Self {
        FormatDispatcher {
            read_limit: MAX_FILE_READ_SIZE,
        }
    }
}

impl FormatDispatcher {
    /// Creates a dispatcher reading the first megabyte of each file
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher with a custom per-file read limit
    pub fn with_read_limit(read_limit: u64) -> Self {
        FormatDispatcher { read_limit }
    }

    /// Parses an in-memory buffer
    ///
    /// # Arguments
    /// * `buffer` - Leading bytes of the file
    /// * `mimetype` - Mimetype of the file, if known
    /// * `name` - Name reported on the record
    ///
    /// # Returns
    /// The record; unsupported mimetypes give a default record and decode
    /// failures are attached to it with the category reset.
    pub fn parse_buffer(&self, buffer: &[u8], mimetype: Option<&str>, name: &str) -> ParsedRecord {
        let mut record = ParsedRecord::new(name);

        let extractor = match mimetype.and_then(ExtractorFactory::for_mimetype) {
            Some(extractor) => extractor,
            None => {
                debug!("{}: no metadata support for mimetype {:?}", name, mimetype);
                return record;
            }
        };

        debug!("{}: extracting {} metadata from {} bytes", name, extractor.format_name(), buffer.len());
        if let Err(e) = extractor.extract(buffer, &mut record) {
            warn!("{}: failed to parse {} metadata: {}", name, extractor.format_name(), e);
            record.fail(e);
        }

        record
    }

    /// Reads and parses one file
    ///
    /// The mimetype comes from the file extension. A read failure is
    /// attached to the record like any decode failure.
    pub fn parse_file(&self, path: &Path) -> ParsedRecord {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match read_prefix(path, self.read_limit) {
            Ok(buffer) => self.parse_buffer(&buffer, mimetype_for(&name), &name),
            Err(e) => {
                warn!("{}: failed to read file: {}", path.display(), e);
                let mut record = ParsedRecord::new(name);
                record.fail(e.into());
                record
            }
        }
    }

    /// Parses files in parallel, returning records in input order
    pub fn parse_batch<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<ParsedRecord> {
        self.parse_batch_with_progress(paths, &ProgressTracker::hidden(), true)
    }

    /// Parses files one after the other
    pub fn parse_batch_sequential<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<ParsedRecord> {
        self.parse_batch_with_progress(paths, &ProgressTracker::hidden(), false)
    }

    /// Parses files, advancing `progress` once per file
    pub fn parse_batch_with_progress<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
        progress: &ProgressTracker,
        parallel: bool,
    ) -> Vec<ParsedRecord> {
        info!("Parsing {} files ({})", paths.len(), if parallel { "parallel" } else { "sequential" });

        let parse = |path: &P| {
            let record = self.parse_file(path.as_ref());
            progress.increment(1);
            record
        };

        let records: Vec<ParsedRecord> = if parallel {
            paths.par_iter().map(parse).collect()
        } else {
            paths.iter().map(parse).collect()
        };
        progress.finish();

        let failed = records.iter().filter(|r| r.is_failed()).count();
        info!("Parsed {} files, {} failed", records.len(), failed);
        records
    }
}
