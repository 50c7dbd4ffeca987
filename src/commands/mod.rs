//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod analyze_command;
pub mod summary_command;

pub use command_traits::{Command, CommandFactory};
pub use analyze_command::AnalyzeCommand;
pub use summary_command::SummaryCommand;

use clap::ArgMatches;

use crate::errors::{MetadataError, MetadataResult};

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
#[derive(Default)]
pub struct AerotagCommandFactory;

impl AerotagCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        AerotagCommandFactory
    }
}

impl CommandFactory for AerotagCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> MetadataResult<Box<dyn Command>> {
        if args.get_flag("summary") {
            Ok(Box::new(SummaryCommand::new(args)?))
        } else {
            // Default to the JSON record dump
            Ok(Box::new(AnalyzeCommand::new(args)?))
        }
    }
}

/// Collects the input paths shared by every command
pub(crate) fn input_files(args: &ArgMatches) -> MetadataResult<Vec<String>> {
    let files: Vec<String> = args
        .get_many::<String>("input")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    if files.is_empty() {
        return Err(MetadataError::GenericError("Missing input file".to_string()));
    }
    Ok(files)
}
