#[macro_use]
extern crate log;

pub mod cli;
pub mod commands;
pub mod prompt;

use anyhow::Context;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::cli::{CliArgs, Command};
use crate::prompt::Prompter;

/// Resolved working directories for one command invocation.
///
/// Built once from the global command line options and passed down
/// explicitly; no command reaches for global state.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory that is scanned for archive files. Must already exist.
    pub mrt_input_path: PathBuf,
    /// Directory that holds the scenario record and its copied archive
    /// files.
    pub scenario_output_path: PathBuf,
}

impl AppPaths {
    /// Validate the input directory and create the output directory.
    ///
    /// A missing input directory fails here, before any command runs.
    pub fn prepare(
        mrt_input_path: PathBuf,
        scenario_output_path: PathBuf,
    ) -> anyhow::Result<Self> {
        if !mrt_input_path.is_dir() {
            anyhow::bail!(
                "MRT input path {} does not exist or is not a directory",
                mrt_input_path.display()
            );
        }

        if !scenario_output_path.exists() {
            std::fs::create_dir_all(&scenario_output_path).with_context(|| {
                format!(
                    "Failed to create scenario output path {}",
                    scenario_output_path.display()
                )
            })?;
            info!(
                "Created scenario output path {path}",
                path = scenario_output_path.display()
            );
        }

        Ok(Self {
            mrt_input_path,
            scenario_output_path,
        })
    }
}

/// Dispatch the parsed command line to its command.
pub fn run<R, W>(args: CliArgs, prompter: &mut Prompter<R, W>) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let paths = AppPaths::prepare(args.mrt_input_path, args.scenario_output_path)?;
    debug!("Using MRT input path {}", paths.mrt_input_path.display());
    debug!(
        "Using scenario output path {}",
        paths.scenario_output_path.display()
    );

    match args.command {
        Command::Init => commands::init(&paths, prompter),
        Command::Query { filter } => commands::query(&paths, &filter.to_request(), prompter),
        Command::Append { filter } => commands::append(&paths, &filter.to_request(), prompter),
    }
}
