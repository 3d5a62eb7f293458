//! Results-fetch boundary.
//!
//! The aggregation engine never talks to a server itself; it is handed an
//! already-fetched [`RawResultsPayload`]. A [`ResultsSource`] is whatever
//! produces those payloads. This crate ships a directory-backed source for
//! exported results and an in-memory one for tests and embedding.

mod directory;
mod memory;

pub use directory::DirectorySource;
pub use memory::InMemorySource;

use analysis::{Error, ExperimentSetup, RawResultsPayload, Result};

pub trait ResultsSource {
    fn fetch_experiment_results(&self, experiment: &str) -> Result<RawResultsPayload>;

    /// The experiment's configured tests, when the source knows them.
    fn fetch_experiment_setup(&self, _experiment: &str) -> Result<Option<ExperimentSetup>> {
        Ok(None)
    }
}

/// Experiment names end up in file paths, so only plain names are accepted.
pub(crate) fn check_experiment_name(experiment: &str) -> Result<()> {
    let valid = !experiment.is_empty()
        && experiment != "."
        && experiment != ".."
        && !experiment.contains(['/', '\\'])
        && !experiment.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "invalid experiment name `{experiment}`"
        )))
    }
}
