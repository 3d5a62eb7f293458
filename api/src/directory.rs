use std::path::{Path, PathBuf};

use analysis::{Error, ExperimentSetup, RawResultsPayload, Result};

use crate::{check_experiment_name, ResultsSource};

pub const RESULTS_FILE: &str = "results.json";
pub const SETUP_FILE: &str = "setup.json";

/// Reads `<root>/<experiment>/results.json` and, when present,
/// `<root>/<experiment>/setup.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn experiment_dir(&self, experiment: &str) -> Result<PathBuf> {
        check_experiment_name(experiment)?;
        let dir = self.root.join(experiment);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(Error::NotFound(format!("experiment {experiment}")))
        }
    }
}

impl ResultsSource for DirectorySource {
    fn fetch_experiment_results(&self, experiment: &str) -> Result<RawResultsPayload> {
        let path = self.experiment_dir(experiment)?.join(RESULTS_FILE);
        if !path.is_file() {
            return Err(Error::NotFound(format!("results for experiment {experiment}")));
        }

        let text = std::fs::read_to_string(&path)?;
        let payload = RawResultsPayload::from_json_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            records = payload.len(),
            "Loaded experiment results"
        );
        Ok(payload)
    }

    fn fetch_experiment_setup(&self, experiment: &str) -> Result<Option<ExperimentSetup>> {
        let path = self.experiment_dir(experiment)?.join(SETUP_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        ExperimentSetup::load(&path).map(Some)
    }
}
