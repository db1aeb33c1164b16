use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::filename::{ArchiveFileName, BgpType};

/// Extension of candidate archive files.
const ARCHIVE_EXTENSION: &str = "bz2";

/// Selection criteria for an archive query.
///
/// The time window is half-open: a file is kept when
/// `start_datetime <= timestamp < end_datetime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Start of the time window, inclusive.
    pub start_datetime: NaiveDateTime,
    /// End of the time window, exclusive.
    pub end_datetime: NaiveDateTime,
    /// Acceptable vendor codes.
    pub vendor: Vec<String>,
    /// Acceptable peer codes.
    pub peer_name: Vec<String>,
    /// Acceptable record types.
    pub bgp_type: Vec<BgpType>,
}

impl QueryRequest {
    /// Whether a decoded archive file name satisfies every criterion.
    fn matches(&self, name: &ArchiveFileName) -> bool {
        self.start_datetime <= name.timestamp
            && name.timestamp < self.end_datetime
            && self.vendor.iter().any(|vendor| vendor == &name.vendor)
            && self.peer_name.iter().any(|peer| peer == &name.peer_name)
            && self.bgp_type.contains(&name.bgp_type)
    }
}

/// Result of an archive query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResponse {
    /// The matched full table snapshot, if any.
    pub rib_file: Option<PathBuf>,
    /// All matched update files, ascending by full path string.
    pub mrt_files: Vec<PathBuf>,
}

/// Query the archive below `mrt_input_path` for files matching `request`.
///
/// Candidate files are `*.bz2` at any depth. Files whose names do not follow
/// the archive convention are skipped with a warning and never abort the
/// scan. More than one matching rib file is an error because a replay starts
/// from a single table snapshot; narrow the time window to resolve it.
pub fn query(mrt_input_path: &Path, request: &QueryRequest) -> Result<QueryResponse, QueryError> {
    if !mrt_input_path.is_dir() {
        return Err(QueryError::InputDir {
            path: mrt_input_path.to_path_buf(),
        });
    }

    let mut rib_files = Vec::new();
    let mut mrt_files = Vec::new();
    for entry in WalkDir::new(mrt_input_path) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Cannot read archive entry: {e}");
                continue;
            }
        };

        let is_archive_file = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .map_or(false, |ext| ext == ARCHIVE_EXTENSION);
        if !is_archive_file {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let file_name = match ArchiveFileName::parse(&name) {
            Ok(file_name) => file_name,
            Err(e) => {
                log::warn!("Cannot parse MRT file {path}: {e}", path = entry.path().display());
                continue;
            }
        };
        if !request.matches(&file_name) {
            continue;
        }

        match file_name.bgp_type {
            BgpType::Rib => rib_files.push(entry.into_path()),
            BgpType::Update => mrt_files.push(entry.into_path()),
        }
    }

    if rib_files.len() > 1 {
        rib_files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        return Err(QueryError::AmbiguousRibFile {
            candidates: rib_files,
        });
    }

    mrt_files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    Ok(QueryResponse {
        rib_file: rib_files.pop(),
        mrt_files,
    })
}

/// An error type for [`query`].
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("MRT input path {} does not exist or is not a directory", .path.display())]
    InputDir { path: PathBuf },
    #[error("Found {} rib files where at most one was expected: {}", .candidates.len(), format_candidates(.candidates))]
    AmbiguousRibFile { candidates: Vec<PathBuf> },
}

fn format_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|candidate| candidate.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
