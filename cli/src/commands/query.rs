use anyhow::Context;
use std::io::{BufRead, Write};

use mrt_archive::{QueryRequest, QueryResponse};

use crate::prompt::Prompter;
use crate::AppPaths;

/// Search the archive for files matching `request` and report them.
pub fn query<R, W>(
    paths: &AppPaths,
    request: &QueryRequest,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let response = run_query(paths, request)?;
    report(&response, prompter)?;

    Ok(())
}

/// Run the archive query for `request`, logging the filter first.
pub(crate) fn run_query(
    paths: &AppPaths,
    request: &QueryRequest,
) -> anyhow::Result<QueryResponse> {
    info!(
        "Querying MRT archive at {path}",
        path = paths.mrt_input_path.display()
    );
    info!(
        "Time window [{start}, {end}), vendors {vendors:?}, peers {peers:?}, types {types:?}",
        start = request.start_datetime,
        end = request.end_datetime,
        vendors = request.vendor,
        peers = request.peer_name,
        types = request.bgp_type,
    );
    if request.start_datetime >= request.end_datetime {
        warn!("The time window is empty, no file can match");
    }

    mrt_archive::query(&paths.mrt_input_path, request).context("Archive query failed")
}

/// Print match counts, then the matched paths when the operator asks.
pub(crate) fn report<R, W>(
    response: &QueryResponse,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    match &response.rib_file {
        Some(_) => println!(
            "Matched 1 rib file and {} update files",
            response.mrt_files.len()
        ),
        None => println!(
            "Matched no rib file and {} update files",
            response.mrt_files.len()
        ),
    }

    if let Some(rib_file) = &response.rib_file {
        if prompter.confirm("Print the rib file?", false)? {
            println!("{}", rib_file.display());
        }
    }

    if !response.mrt_files.is_empty() && prompter.confirm("Print the update files?", false)? {
        for mrt_file in &response.mrt_files {
            println!("{}", mrt_file.display());
        }
    }

    Ok(())
}
