//! Result aggregation engine for perceptual listening experiments.
//!
//! Participants' raw AB, ABX, MUSHRA and APE trial records go in; per-test
//! aggregates and chart-ready label/value series come out, together with
//! diagnostics for anything that had to be left out. The pipeline is pure and
//! synchronous. Fetching payloads and drawing charts belong to the caller.
//!
//! ```
//! use analysis::{Aggregator, RawResultsPayload};
//!
//! let payload = RawResultsPayload::from_json_str(
//!     r#"{ "results": [{ "testNumber": 1, "type": "MUSHRA",
//!          "samplesScores": [{ "sampleId": "s1", "score": 60 }],
//!          "referenceScore": 100 }] }"#,
//! )?;
//! let report = Aggregator::default().aggregate_payload(&payload);
//! let (test_number, chart) = report.entries().next().unwrap();
//! assert_eq!(test_number, 1);
//! assert_eq!(chart.data.labels, ["s1", "Reference"]);
//! # Ok::<(), analysis::Error>(())
//! ```

pub mod classify;
pub mod config;
pub mod core;
pub mod designs;
pub mod error;
pub mod ranking;
pub mod results;
pub mod validate;

pub use crate::config::AggregationConfig;
pub use crate::core::diagnostics::{Diagnostic, Severity};
pub use crate::core::record::{RawResultsPayload, RawTrialRecord, TestDesign, Trial};
pub use crate::error::{Error, Result};
pub use crate::results::{
    Aggregate, Aggregator, Chart, ChartSeries, ExperimentReport, Series, TestReport,
};
pub use crate::validate::ExperimentSetup;
