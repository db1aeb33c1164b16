#[macro_use]
extern crate log;

use clap::Parser as _;
use env_logger::Env;

use mrt_scenario_cli::cli::CliArgs;
use mrt_scenario_cli::prompt::Prompter;

const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    // Skipped archive files are reported as warnings, keep them visible
    // when RUST_LOG is unset.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    info!("{CRATE_NAME} v{CRATE_VERSION}");

    let mut prompter = Prompter::stdio();
    mrt_scenario_cli::run(args, &mut prompter)
}
