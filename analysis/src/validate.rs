//! Checks submitted records against the experiment's configured tests.
//!
//! The experiment configuration lists every test with its number and design;
//! a record naming a test that does not exist, or declaring a different
//! design than configured, cannot be aggregated meaningfully.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::diagnostics::Diagnostic;
use crate::core::record::{RawTrialRecord, TestDesign};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestDefinition {
    #[serde(alias = "testNumber")]
    pub test_number: i64,
    #[serde(rename = "type")]
    pub design: TestDesign,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentSetup {
    #[serde(default)]
    pub tests: Vec<TestDefinition>,
}

impl ExperimentSetup {
    pub fn new(tests: Vec<TestDefinition>) -> Self {
        Self { tests }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let setup: Self = serde_json::from_str(text)?;
        let mut seen = HashSet::new();
        if let Some(dup) = setup.tests.iter().find(|t| !seen.insert(t.test_number)) {
            return Err(Error::InvalidInput(format!(
                "test {} is defined more than once",
                dup.test_number
            )));
        }
        Ok(setup)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn design_of(&self, test_number: i64) -> Option<TestDesign> {
        self.tests
            .iter()
            .find(|t| t.test_number == test_number)
            .map(|t| t.design)
    }
}

/// One diagnostic per offending test number, in record order.
pub fn validate<'a, I>(setup: &ExperimentSetup, records: I) -> Vec<Diagnostic>
where
    I: IntoIterator<Item = &'a RawTrialRecord>,
{
    let designs: HashMap<i64, TestDesign> = setup
        .tests
        .iter()
        .map(|t| (t.test_number, t.design))
        .collect();
    let mut reported = HashSet::new();
    let mut diagnostics = Vec::new();

    for record in records {
        let diagnostic = match designs.get(&record.test_number) {
            None => Diagnostic::UnknownTest {
                test_number: record.test_number,
            },
            Some(&configured) if configured != record.design() => Diagnostic::DesignMismatch {
                test_number: record.test_number,
                configured,
                found: record.design(),
            },
            Some(_) => continue,
        };
        if reported.insert(record.test_number) {
            diagnostics.push(diagnostic);
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{AbTrial, MushraTrial, Trial};

    fn setup() -> ExperimentSetup {
        ExperimentSetup::from_json_str(
            r#"{
                "name": "Codec shootout",
                "tests": [
                    { "test_number": 1, "type": "AB", "samples": [] },
                    { "testNumber": 2, "type": "MUSHRA" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn parses_both_test_number_spellings() {
        let setup = setup();
        assert_eq!(setup.design_of(1), Some(TestDesign::Ab));
        assert_eq!(setup.design_of(2), Some(TestDesign::Mushra));
        assert_eq!(setup.design_of(3), None);
    }

    #[test]
    fn duplicate_test_numbers_are_rejected() {
        let err = ExperimentSetup::from_json_str(
            r#"{ "tests": [{ "test_number": 1, "type": "AB" }, { "test_number": 1, "type": "APE" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn reports_unknown_tests_and_design_mismatches_once() {
        let records = vec![
            RawTrialRecord::new(1, Trial::Ab(AbTrial::default())),
            RawTrialRecord::new(2, Trial::Ab(AbTrial::default())),
            RawTrialRecord::new(2, Trial::Ab(AbTrial::default())),
            RawTrialRecord::new(9, Trial::Mushra(MushraTrial::default())),
        ];
        assert_eq!(
            validate(&setup(), &records),
            vec![
                Diagnostic::DesignMismatch {
                    test_number: 2,
                    configured: TestDesign::Mushra,
                    found: TestDesign::Ab,
                },
                Diagnostic::UnknownTest { test_number: 9 },
            ]
        );
    }
}
