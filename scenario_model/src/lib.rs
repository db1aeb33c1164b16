use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the scenario record inside its scenario directory.
pub const SCENARIO_FILE_NAME: &str = "scenario.json";

/// A persisted replay scenario.
///
/// The record is created once by the init wizard and then loaded, extended
/// and written back whenever archive files are attached. It only lives in
/// memory for the duration of a single command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MrtScenario {
    /// Human-readable scenario name.
    pub name: String,
    /// Free-text notes about what this scenario captures.
    pub description: String,
    /// Disable direct RabbitMQ delivery during replay.
    pub no_rabbitmq_direct: bool,
    /// Grouping interval in seconds for grouped RabbitMQ delivery, `None`
    /// disables grouped delivery.
    pub rabbitmq_grouped: Option<u64>,
    /// Disable the MongoDB log sink.
    pub no_mongodb_log: bool,
    /// Disable the MongoDB state sink.
    pub no_mongodb_state: bool,
    /// Disable the MongoDB statistics sink.
    pub no_mongodb_statistics: bool,
    /// Reset the MongoDB sinks before the replay starts.
    pub clear_mongodb: bool,
    /// Playback speed multiplier, `None` replays in realtime.
    pub playback_speed: Option<u64>,
    /// Names of the archive files attached to this scenario, kept sorted
    /// and free of duplicates.
    pub mrt_files: Vec<String>,
}

impl MrtScenario {
    /// Attach archive file names to this scenario.
    ///
    /// The merged list is sorted and deduplicated, so attaching a name that
    /// is already present is a no-op.
    pub fn append_mrt_files<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mrt_files = std::mem::take(&mut self.mrt_files)
            .into_iter()
            .chain(names.into_iter().map(Into::into))
            .sorted()
            .dedup()
            .collect();
    }
}

/// Path of the scenario record inside `scenario_output_path`.
pub fn scenario_file_path(scenario_output_path: &Path) -> PathBuf {
    scenario_output_path.join(SCENARIO_FILE_NAME)
}

/// Whether a scenario record exists in `scenario_output_path`.
pub fn scenario_exists(scenario_output_path: &Path) -> bool {
    scenario_file_path(scenario_output_path).exists()
}

/// Load the scenario record from `scenario_output_path`.
pub fn load_scenario(scenario_output_path: &Path) -> Result<MrtScenario, ScenarioStoreError> {
    let path = scenario_file_path(scenario_output_path);
    if !path.exists() {
        return Err(ScenarioStoreError::NotFound { path });
    }

    let file = std::fs::File::open(path)?;
    let scenario = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(scenario)
}

/// Store the scenario record in `scenario_output_path`, creating the
/// directory first if it does not exist yet.
pub fn store_scenario(
    scenario_output_path: &Path,
    scenario: &MrtScenario,
) -> Result<(), ScenarioStoreError> {
    if !scenario_output_path.exists() {
        std::fs::create_dir_all(scenario_output_path)?;
    }

    let file = std::fs::File::create(scenario_file_path(scenario_output_path))?;
    serde_json::to_writer_pretty(file, scenario)?;
    Ok(())
}

/// An error type for the scenario store.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioStoreError {
    #[error("No scenario record found at {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serde JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_scenario() -> MrtScenario {
        MrtScenario {
            name: "Scenario 77".to_string(),
            description: "DECIX afternoon replay".to_string(),
            no_rabbitmq_direct: false,
            rabbitmq_grouped: Some(5),
            no_mongodb_log: true,
            no_mongodb_state: true,
            no_mongodb_statistics: true,
            clear_mongodb: true,
            playback_speed: None,
            mrt_files: vec![],
        }
    }

    #[test]
    fn test_should_round_trip_scenario_record() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        store_scenario(dir.path(), &sample_scenario()).expect("Failed to store scenario");
        let loaded = load_scenario(dir.path()).expect("Failed to load scenario");

        assert_eq!(sample_scenario(), loaded);
    }

    #[test]
    fn test_should_serialize_stably() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        store_scenario(dir.path(), &sample_scenario()).expect("Failed to store scenario");
        let first = std::fs::read_to_string(scenario_file_path(dir.path()))
            .expect("Failed to read scenario file");

        let loaded = load_scenario(dir.path()).expect("Failed to load scenario");
        store_scenario(dir.path(), &loaded).expect("Failed to store scenario again");
        let second = std::fs::read_to_string(scenario_file_path(dir.path()))
            .expect("Failed to read scenario file");

        assert_eq!(first, second);
    }

    #[test]
    fn test_should_create_missing_scenario_directory() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let nested = dir.path().join("scenarios").join("decix");

        store_scenario(&nested, &sample_scenario()).expect("Failed to store scenario");

        assert!(scenario_exists(&nested));
    }

    #[test]
    fn test_should_report_missing_scenario_record() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let err = load_scenario(dir.path()).expect_err("Load should have failed");

        assert!(matches!(err, ScenarioStoreError::NotFound { .. }));
    }

    #[test]
    fn test_should_append_mrt_files_sorted_and_deduplicated() {
        let mut scenario = sample_scenario();
        scenario.mrt_files = vec!["b.bz2".to_string(), "d.bz2".to_string()];

        scenario.append_mrt_files(["c.bz2", "a.bz2", "b.bz2"]);

        assert_eq!(
            vec![
                "a.bz2".to_string(),
                "b.bz2".to_string(),
                "c.bz2".to_string(),
                "d.bz2".to_string(),
            ],
            scenario.mrt_files
        );
    }

    #[test]
    fn test_should_keep_mrt_files_unchanged_on_reappend() {
        let mut scenario = sample_scenario();
        scenario.append_mrt_files(["a.bz2", "b.bz2"]);
        let before = scenario.mrt_files.clone();

        scenario.append_mrt_files(["a.bz2", "b.bz2"]);

        assert_eq!(before, scenario.mrt_files);
    }
}
