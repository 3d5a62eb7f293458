use std::collections::HashMap;

use analysis::{Error, ExperimentSetup, RawResultsPayload, Result};

use crate::{check_experiment_name, ResultsSource};

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    results: HashMap<String, RawResultsPayload>,
    setups: HashMap<String, ExperimentSetup>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_results(&mut self, experiment: impl Into<String>, payload: RawResultsPayload) {
        self.results.insert(experiment.into(), payload);
    }

    pub fn insert_setup(&mut self, experiment: impl Into<String>, setup: ExperimentSetup) {
        self.setups.insert(experiment.into(), setup);
    }
}

impl ResultsSource for InMemorySource {
    fn fetch_experiment_results(&self, experiment: &str) -> Result<RawResultsPayload> {
        check_experiment_name(experiment)?;
        self.results
            .get(experiment)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("experiment {experiment}")))
    }

    fn fetch_experiment_setup(&self, experiment: &str) -> Result<Option<ExperimentSetup>> {
        check_experiment_name(experiment)?;
        Ok(self.setups.get(experiment).cloned())
    }
}
