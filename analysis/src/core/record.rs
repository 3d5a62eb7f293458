//! Raw per-trial records as submitted by participants, one typed variant per
//! test design.
//!
//! The results API hands these over as a loosely typed JSON list. Decoding
//! happens one record at a time so a single bad entry cannot take the rest of
//! the payload down with it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestDesign {
    #[serde(rename = "AB")]
    Ab,
    #[serde(rename = "ABX")]
    Abx,
    #[serde(rename = "MUSHRA")]
    Mushra,
    #[serde(rename = "APE")]
    Ape,
}

impl TestDesign {
    pub const ALL: [TestDesign; 4] = [
        TestDesign::Ab,
        TestDesign::Abx,
        TestDesign::Mushra,
        TestDesign::Ape,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TestDesign::Ab => "AB",
            TestDesign::Abx => "ABX",
            TestDesign::Mushra => "MUSHRA",
            TestDesign::Ape => "APE",
        }
    }
}

impl fmt::Display for TestDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestDesign {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        TestDesign::ALL
            .into_iter()
            .find(|design| design.as_str() == value)
            .ok_or_else(|| Error::InvalidInput(format!("unknown test design `{value}`")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub question_id: String,
    pub sample_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub sample_id: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRating {
    pub sample_id: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisResult {
    pub axis_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sample_ratings: Vec<SampleRating>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbTrial {
    #[serde(default, deserialize_with = "null_as_default")]
    pub selections: Vec<Selection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbxTrial {
    #[serde(default, deserialize_with = "null_as_default")]
    pub selections: Vec<Selection>,
    /// Id of the hidden sample actually played as X.
    pub x_sample_id: String,
    /// Id the participant picked as X.
    pub x_selected: String,
}

impl AbxTrial {
    pub fn is_correct(&self) -> bool {
        self.x_sample_id == self.x_selected
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MushraTrial {
    #[serde(default, deserialize_with = "null_as_default")]
    pub anchors_scores: Vec<Score>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub samples_scores: Vec<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_score: Option<f64>,
}

impl MushraTrial {
    /// Reference score, `0` when the participant record omits it.
    pub fn reference_score(&self) -> f64 {
        self.reference_score.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApeTrial {
    #[serde(default, deserialize_with = "null_as_default")]
    pub axis_results: Vec<AxisResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Trial {
    #[serde(rename = "AB")]
    Ab(AbTrial),
    #[serde(rename = "ABX")]
    Abx(AbxTrial),
    #[serde(rename = "MUSHRA")]
    Mushra(MushraTrial),
    #[serde(rename = "APE")]
    Ape(ApeTrial),
}

impl Trial {
    pub fn design(&self) -> TestDesign {
        match self {
            Trial::Ab(_) => TestDesign::Ab,
            Trial::Abx(_) => TestDesign::Abx,
            Trial::Mushra(_) => TestDesign::Mushra,
            Trial::Ape(_) => TestDesign::Ape,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrialRecord {
    pub test_number: i64,
    /// Submission id minted by the results API for one participant run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiment_use: Option<String>,
    #[serde(flatten)]
    pub trial: Trial,
}

impl RawTrialRecord {
    pub fn new(test_number: i64, trial: Trial) -> Self {
        Self {
            test_number,
            experiment_use: None,
            trial,
        }
    }

    pub fn design(&self) -> TestDesign {
        self.trial.design()
    }

    pub fn belongs_to(&self, submission: &str) -> bool {
        self.experiment_use.as_deref() == Some(submission)
    }
}

/// A payload entry that could not be decoded into a [`RawTrialRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedRecord {
    /// Position in the payload's `results` list.
    pub index: usize,
    pub test_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment_use: Option<String>,
    pub reason: String,
}

/// Input contract of the results-fetch boundary: `{ "results": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResultsPayload {
    pub results: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedRecords {
    pub records: Vec<RawTrialRecord>,
    pub malformed: Vec<MalformedRecord>,
}

impl RawResultsPayload {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_records(records: &[RawTrialRecord]) -> Result<Self> {
        let results = records
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { results })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn decode(&self) -> DecodedRecords {
        let mut decoded = DecodedRecords::default();

        for (index, value) in self.results.iter().enumerate() {
            match RawTrialRecord::deserialize(value) {
                Ok(record) => decoded.records.push(record),
                Err(err) => decoded.malformed.push(MalformedRecord {
                    index,
                    test_number: value.get("testNumber").and_then(Value::as_i64),
                    experiment_use: value
                        .get("experimentUse")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    reason: err.to_string(),
                }),
            }
        }

        decoded
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
