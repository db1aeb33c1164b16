use anyhow::Context;
use std::io::{BufRead, Write};

use mrt_scenario_model::{scenario_exists, scenario_file_path, store_scenario, MrtScenario};

use crate::prompt::Prompter;
use crate::AppPaths;

/// Create a new scenario record through interactive prompts.
///
/// When a record already exists the operator is asked before it is replaced;
/// declining aborts without touching the existing record.
pub fn init<R, W>(paths: &AppPaths, prompter: &mut Prompter<R, W>) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    if scenario_exists(&paths.scenario_output_path) {
        warn!(
            "A scenario record already exists at {path}",
            path = scenario_file_path(&paths.scenario_output_path).display()
        );
        if !prompter.confirm("Overwrite the existing scenario record?", false)? {
            anyhow::bail!("Refusing to overwrite the existing scenario record");
        }
    }

    let default_name = format!("Scenario {}", nanoid::nanoid!());
    let name = prompter.prompt_string("Name", &default_name)?;
    let description = prompter.prompt_string("Description", "")?;

    let no_rabbitmq_direct = !prompter.confirm("RabbitMQ direct", true)?;
    let rabbitmq_grouped = if prompter.confirm("RabbitMQ grouped", false)? {
        Some(prompter.prompt_u64("RabbitMQ grouped interval in seconds", 5)?)
    } else {
        None
    };

    let no_mongodb_log = !prompter.confirm("MongoDB log", false)?;
    let no_mongodb_state = !prompter.confirm("MongoDB state", false)?;
    let no_mongodb_statistics = !prompter.confirm("MongoDB statistics", false)?;
    let clear_mongodb = prompter.confirm("Clear MongoDB", true)?;

    let playback_speed = if prompter.confirm("Playback speed", false)? {
        Some(prompter.prompt_u64("Playback speed value", 1)?)
    } else {
        None
    };

    let scenario = MrtScenario {
        name,
        description,
        no_rabbitmq_direct,
        rabbitmq_grouped,
        no_mongodb_log,
        no_mongodb_state,
        no_mongodb_statistics,
        clear_mongodb,
        playback_speed,
        mrt_files: Vec::new(),
    };

    store_scenario(&paths.scenario_output_path, &scenario)
        .context("Failed to write the scenario record")?;
    info!(
        "Created scenario record at {path}",
        path = scenario_file_path(&paths.scenario_output_path).display()
    );

    Ok(())
}
