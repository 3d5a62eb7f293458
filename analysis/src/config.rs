//! Aggregation settings, loaded from TOML.
//!
//! Every field has a default so an empty file (or no file at all) yields a
//! usable configuration:
//!
//! ```toml
//! reference_label = "Reference"
//! score_series_title = "Scores"
//! submission = "5b0c3a6e-9d1f-4a57-8f0e-2c1d7e3b9a44"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_REFERENCE_LABEL: &str = "Reference";
pub const DEFAULT_SCORE_SERIES_TITLE: &str = "Scores";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Label appended after the sample ids on MUSHRA charts.
    pub reference_label: String,
    /// Title of the single series on MUSHRA charts.
    pub score_series_title: String,
    /// Restrict aggregation to one participant submission (`experimentUse`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<String>,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            reference_label: DEFAULT_REFERENCE_LABEL.to_string(),
            score_series_title: DEFAULT_SCORE_SERIES_TITLE.to_string(),
            submission: None,
        }
    }
}

impl AggregationConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(format!("config file {}", path.display()))
            } else {
                Error::Io(err)
            }
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded aggregation config");
        Ok(config)
    }

    pub fn with_submission(mut self, submission: impl Into<String>) -> Self {
        self.submission = Some(submission.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.reference_label.trim().is_empty() {
            return Err(Error::Config("reference_label must not be blank".to_string()));
        }
        if matches!(&self.submission, Some(id) if id.trim().is_empty()) {
            return Err(Error::Config("submission must not be blank".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = AggregationConfig::from_toml_str("").unwrap();
        assert_eq!(config, AggregationConfig::default());
        assert_eq!(config.reference_label, "Reference");
        assert_eq!(config.score_series_title, "Scores");
        assert!(config.submission.is_none());
    }

    #[test]
    fn partial_toml_overrides_only_given_fields() {
        let config = AggregationConfig::from_toml_str(
            r#"
            reference_label = "Hidden reference"
            submission = "run-7"
            "#,
        )
        .unwrap();
        assert_eq!(config.reference_label, "Hidden reference");
        assert_eq!(config.score_series_title, "Scores");
        assert_eq!(config.submission.as_deref(), Some("run-7"));
    }

    #[test]
    fn blank_reference_label_is_rejected() {
        let err = AggregationConfig::from_toml_str(r#"reference_label = "  ""#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn malformed_toml_is_a_toml_error() {
        let err = AggregationConfig::from_toml_str("reference_label = ").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pqkit.toml");
        std::fs::write(&path, "score_series_title = \"Mean score\"\n").unwrap();

        let config = AggregationConfig::load(&path).unwrap();
        assert_eq!(config.score_series_title, "Mean score");

        let missing = AggregationConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, Error::NotFound(_)));
    }
}
