//! Category summary command

use clap::ArgMatches;
use log::info;

use crate::api::AeroTag;
use crate::commands::command_traits::Command;
use crate::commands::input_files;
use crate::errors::MetadataResult;

/// Command printing how many files fall into each category
pub struct SummaryCommand {
    input_files: Vec<String>,
    sequential: bool,
    progress: bool,
}

impl SummaryCommand {
    pub fn new(args: &ArgMatches) -> MetadataResult<Self> {
        Ok(SummaryCommand {
            input_files: input_files(args)?,
            sequential: args.get_flag("sequential"),
            progress: args.get_flag("progress"),
        })
    }
}

impl Command for SummaryCommand {
    fn execute(&self) -> MetadataResult<()> {
        let records = AeroTag::new()
            .parallel(!self.sequential)
            .show_progress(self.progress)
            .parse_files(self.input_files.as_slice());

        let counts = AeroTag::summarize(&records);
        info!("Summary of {} files:", records.len());
        for (category, count) in &counts {
            println!("{:<20} {}", category, count);
        }

        let geotiffs = records.iter().filter(|r| r.is_geotiff).count();
        let located = records.iter().filter(|r| r.coordinates.is_some()).count();
        println!("{:<20} {}", "geotiff", geotiffs);
        println!("{:<20} {}", "with_coordinates", located);

        Ok(())
    }
}
