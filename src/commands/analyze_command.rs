//! Metadata analysis command
//!
//! This module implements the default command: parse every input file and
//! print the records as a JSON array on stdout.

use std::io::{self, Write};

use clap::ArgMatches;
use log::{debug, info};

use crate::api::AeroTag;
use crate::commands::command_traits::Command;
use crate::commands::input_files;
use crate::errors::MetadataResult;

/// Command for dumping the records of a batch as JSON
pub struct AnalyzeCommand {
    /// Paths of the input files
    input_files: Vec<String>,
    /// Whether to pretty-print the JSON
    pretty: bool,
    /// Whether to parse files one at a time
    sequential: bool,
    /// Whether to draw a progress bar
    progress: bool,
}

impl AnalyzeCommand {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches) -> MetadataResult<Self> {
        Ok(AnalyzeCommand {
            input_files: input_files(args)?,
            pretty: args.get_flag("pretty"),
            sequential: args.get_flag("sequential"),
            progress: args.get_flag("progress"),
        })
    }
}

impl Command for AnalyzeCommand {
    fn execute(&self) -> MetadataResult<()> {
        info!("Analyzing {} files", self.input_files.len());

        let aerotag = AeroTag::new()
            .parallel(!self.sequential)
            .show_progress(self.progress);
        let records = aerotag.parse_files(self.input_files.as_slice());

        let json = AeroTag::to_json(&records, self.pretty)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json)?;

        debug!("Analysis completed successfully");
        Ok(())
    }
}
