//! Command-line arguments and config resolution for `pqkit-report`.

use std::path::PathBuf;

use analysis::AggregationConfig;
use clap::{Parser, ValueEnum};

pub const CONFIG_ENV: &str = "PQKIT_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report: aggregates, charts and diagnostics
    Json,
    /// One row per charted value
    Csv,
    /// One-line overview plus diagnostics
    Summary,
}

#[derive(Debug, Parser)]
#[command(
    name = "pqkit-report",
    version,
    about = "Aggregate listening-test results into chart series"
)]
pub struct Args {
    /// Experiment to aggregate
    pub experiment: String,

    /// Directory holding one sub-directory per experiment
    #[arg(long, env = "PQKIT_RESULTS_DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Aggregation config file (TOML)
    #[arg(long, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Only aggregate records from this submission (experimentUse)
    #[arg(long)]
    pub submission: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Skip checking records against the experiment's setup.json
    #[arg(long)]
    pub no_setup: bool,
}

impl Args {
    /// Config file (argument or environment) if given, else defaults; then
    /// command-line overrides.
    pub fn resolve_config(&self) -> analysis::Result<AggregationConfig> {
        let mut config = match &self.config {
            Some(path) => AggregationConfig::load(path)?,
            None => AggregationConfig::default(),
        };
        if let Some(submission) = &self.submission {
            config.submission = Some(submission.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_json_in_current_directory() {
        let args = Args::try_parse_from(["pqkit-report", "demo"]).unwrap();
        assert_eq!(args.experiment, "demo");
        assert_eq!(args.format, OutputFormat::Json);
        assert!(!args.no_setup);
        assert_eq!(args.resolve_config().unwrap(), AggregationConfig::default());
    }

    #[test]
    fn submission_flag_overrides_config() {
        let args = Args::try_parse_from([
            "pqkit-report",
            "demo",
            "--submission",
            "run-3",
            "--format",
            "csv",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(
            args.resolve_config().unwrap().submission.as_deref(),
            Some("run-3")
        );
    }

    #[test]
    fn experiment_is_required() {
        assert!(Args::try_parse_from(["pqkit-report"]).is_err());
    }
}
