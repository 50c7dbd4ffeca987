use std::collections::BTreeMap;
use std::path::Path;

use log::info;

use crate::dispatcher::FormatDispatcher;
use crate::errors::MetadataResult;
use crate::record::ParsedRecord;
use crate::utils::progress::ProgressTracker;

/// Main interface to the aerotag library
pub struct AeroTag {
    dispatcher: FormatDispatcher,
    parallel: bool,
    show_progress: bool,
}

impl Default for AeroTag {
    fn default() -> Self {
        AeroTag {
            dispatcher: FormatDispatcher::new(),
            parallel: true,
            show_progress: false,
        }
    }
}

impl AeroTag {
    /// Create a new instance parsing batches in parallel without a progress bar
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse batches in parallel (the default) or one file at a time
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Draw a progress bar on stderr while parsing
    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Parse every file, one record per input path
    pub fn parse_files<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<ParsedRecord> {
        let progress = if self.show_progress {
            ProgressTracker::new(paths.len() as u64, "Reading metadata")
        } else {
            ProgressTracker::hidden()
        };

        self.dispatcher.parse_batch_with_progress(paths, &progress, self.parallel)
    }

    /// Parse one in-memory buffer
    pub fn parse_buffer(&self, buffer: &[u8], mimetype: Option<&str>, name: &str) -> ParsedRecord {
        self.dispatcher.parse_buffer(buffer, mimetype, name)
    }

    /// Render records as a JSON array
    pub fn to_json(records: &[ParsedRecord], pretty: bool) -> MetadataResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(records)?
        } else {
            serde_json::to_string(records)?
        };
        Ok(json)
    }

    /// Count records per category
    ///
    /// Failed records are counted under `"error"` and records without a
    /// category under `"none"`.
    pub fn summarize(records: &[ParsedRecord]) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for record in records {
            let key = match (&record.error, record.category) {
                (Some(_), _) => "error",
                (None, Some(category)) => category.as_str(),
                (None, None) => "none",
            };
            *counts.entry(key).or_insert(0) += 1;
        }

        info!("Summarized {} records into {} categories", records.len(), counts.len());
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MetadataError;
    use crate::record::FileCategory;

    fn record(category: Option<FileCategory>, failed: bool) -> ParsedRecord {
        let mut record = ParsedRecord::new("f");
        record.category = category;
        if failed {
            record.fail(MetadataError::InvalidHeader);
        }
        record
    }

    #[test]
    fn summary_counts_categories_failures_and_unclassified() {
        let records = vec![
            record(Some(FileCategory::Layer), false),
            record(Some(FileCategory::Layer), false),
            record(Some(FileCategory::ThermalImage), false),
            record(None, false),
            record(Some(FileCategory::RgbImage), true),
        ];

        let counts = AeroTag::summarize(&records);
        assert_eq!(counts.get("layer"), Some(&2));
        assert_eq!(counts.get("thermal_image"), Some(&1));
        assert_eq!(counts.get("none"), Some(&1));
        assert_eq!(counts.get("error"), Some(&1));
        assert_eq!(counts.get("rgb_image"), None);
    }

    #[test]
    fn json_output_is_an_array() {
        let json = AeroTag::to_json(&[record(None, false)], false).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"isGeoTIFF\":false"));
    }
}
