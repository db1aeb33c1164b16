use anyhow::Context;
use std::io::{BufRead, Write};

use mrt_archive::QueryRequest;
use mrt_scenario_model::{load_scenario, store_scenario};

use crate::prompt::Prompter;
use crate::AppPaths;

/// Attach matching update files to an existing scenario.
///
/// The scenario record must already exist; it is loaded before the archive
/// is scanned so a missing record aborts before any file is touched. After
/// the operator confirms, every matched update file is copied into the
/// scenario directory and its name is recorded. Matches that already live
/// in the scenario directory are recorded without copying. A matched rib
/// file is reported but never copied.
pub fn append<R, W>(
    paths: &AppPaths,
    request: &QueryRequest,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut scenario = load_scenario(&paths.scenario_output_path)
        .context("Cannot append to this scenario")?;

    let response = super::query::run_query(paths, request)?;
    super::query::report(&response, prompter)?;

    if response.mrt_files.is_empty() {
        info!("No update file matched, the scenario record is unchanged");
        return Ok(());
    }

    let question = format!(
        "Copy {count} update files into {path}?",
        count = response.mrt_files.len(),
        path = paths.scenario_output_path.display()
    );
    if !prompter.confirm(&question, true)? {
        info!("The scenario record is unchanged");
        return Ok(());
    }

    let scenario_dir = std::fs::canonicalize(&paths.scenario_output_path)
        .context("Failed to resolve the scenario output path")?;

    let mut appended = Vec::with_capacity(response.mrt_files.len());
    for mrt_file in &response.mrt_files {
        let file_name = mrt_file
            .file_name()
            .with_context(|| format!("Archive path {} has no file name", mrt_file.display()))?;
        let source = std::fs::canonicalize(mrt_file)
            .with_context(|| format!("Failed to resolve {}", mrt_file.display()))?;
        let destination = scenario_dir.join(file_name);
        if source == destination {
            // A match inside the scenario directory is a previous copy.
            // Copying a file onto itself truncates it, so leave it in place.
            debug!("{path} is already in place", path = destination.display());
        } else {
            std::fs::copy(&source, &destination).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    source.display(),
                    destination.display()
                )
            })?;
            debug!(
                "Copied {source} to {destination}",
                source = source.display(),
                destination = destination.display()
            );
        }
        appended.push(file_name.to_string_lossy().to_string());
    }

    scenario.append_mrt_files(appended);
    store_scenario(&paths.scenario_output_path, &scenario)
        .context("Failed to update the scenario record")?;
    info!(
        "Attached {count} update files, the scenario now references {total} files",
        count = response.mrt_files.len(),
        total = scenario.mrt_files.len()
    );

    Ok(())
}
