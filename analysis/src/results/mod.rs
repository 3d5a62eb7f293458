//! Aggregation pipeline: raw payload → classified groups → per-design
//! aggregates → chart series.
//!
//! Each run is synchronous and allocates its own output; an [`Aggregator`] can
//! be shared across threads and reused for any number of experiments.

mod charts;
pub mod export;
mod utils;

pub use charts::{axis_series, build_charts, categorical_series, mushra_series};
pub use charts::{Chart, ChartSeries, Series};
pub use utils::{design_label, submissions, summary_line};

use serde::Serialize;

use crate::classify::{classify, Classification, GroupRecords, TestGroup};
use crate::config::AggregationConfig;
use crate::core::diagnostics::Diagnostic;
use crate::core::record::{MalformedRecord, RawResultsPayload, RawTrialRecord, TestDesign};
use crate::designs::{
    ab, ape, mushra, AbxAggregate, AxisAggregate, CategoricalCount, CorrectnessVerdict,
    MushraAggregate,
};
use crate::validate::{validate, ExperimentSetup};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Aggregate {
    Ab(CategoricalCount),
    Abx(AbxAggregate),
    Mushra(MushraAggregate),
    Ape(Vec<AxisAggregate>),
}

impl Aggregate {
    pub fn reduce(group: &TestGroup<'_>) -> Self {
        match &group.records {
            GroupRecords::Ab(trials) => Aggregate::Ab(ab::reduce_ab(trials)),
            GroupRecords::Abx(trials) => {
                Aggregate::Abx(ab::reduce_abx(group.test_number, trials))
            }
            GroupRecords::Mushra(trials) => Aggregate::Mushra(mushra::reduce(trials)),
            GroupRecords::Ape(trials) => Aggregate::Ape(ape::reduce(trials)),
        }
    }

    pub fn design(&self) -> TestDesign {
        match self {
            Aggregate::Ab(_) => TestDesign::Ab,
            Aggregate::Abx(_) => TestDesign::Abx,
            Aggregate::Mushra(_) => TestDesign::Mushra,
            Aggregate::Ape(_) => TestDesign::Ape,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    pub test_number: i64,
    pub design: TestDesign,
    pub aggregate: Aggregate,
    pub charts: Vec<Chart>,
}

impl TestReport {
    pub fn verdict(&self) -> Option<CorrectnessVerdict> {
        match &self.aggregate {
            Aggregate::Abx(abx) => Some(abx.verdict),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperimentReport {
    /// Aggregated tests in the order their test numbers first appeared.
    pub tests: Vec<TestReport>,
    /// Test numbers left out because at least one of their records was unusable.
    pub skipped: Vec<i64>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ExperimentReport {
    pub fn test(&self, test_number: i64) -> Option<&TestReport> {
        self.tests.iter().find(|t| t.test_number == test_number)
    }

    /// Every chart paired with its test number, APE axes expanded in place.
    pub fn entries(&self) -> impl Iterator<Item = (i64, &Chart)> + '_ {
        self.tests
            .iter()
            .flat_map(|test| test.charts.iter().map(move |chart| (test.test_number, chart)))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            tests: self.tests.len(),
            charts: self.entries().count(),
            skipped: self.skipped.len(),
            warnings: self.warnings().count(),
            ..ReportSummary::default()
        };
        for test in &self.tests {
            match test.design {
                TestDesign::Ab => summary.ab += 1,
                TestDesign::Abx => summary.abx += 1,
                TestDesign::Mushra => summary.mushra += 1,
                TestDesign::Ape => summary.ape += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub tests: usize,
    pub ab: usize,
    pub abx: usize,
    pub mushra: usize,
    pub ape: usize,
    pub charts: usize,
    pub skipped: usize,
    pub warnings: usize,
}

impl ReportSummary {
    pub fn tests_by_design(&self) -> [(TestDesign, usize); 4] {
        [
            (TestDesign::Ab, self.ab),
            (TestDesign::Abx, self.abx),
            (TestDesign::Mushra, self.mushra),
            (TestDesign::Ape, self.ape),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregationConfig,
    setup: Option<ExperimentSetup>,
}

impl Aggregator {
    pub fn new(config: AggregationConfig) -> Self {
        Self {
            config,
            setup: None,
        }
    }

    /// Check records against the experiment's configured tests before
    /// aggregating them.
    pub fn with_setup(mut self, setup: ExperimentSetup) -> Self {
        self.setup = Some(setup);
        self
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    pub fn aggregate_payload(&self, payload: &RawResultsPayload) -> ExperimentReport {
        let decoded = payload.decode();
        self.run(&decoded.records, decoded.malformed)
    }

    pub fn aggregate_records(&self, records: &[RawTrialRecord]) -> ExperimentReport {
        self.run(records, Vec::new())
    }

    fn in_scope(&self, experiment_use: Option<&str>) -> bool {
        match self.config.submission.as_deref() {
            Some(submission) => experiment_use == Some(submission),
            None => true,
        }
    }

    fn run(&self, records: &[RawTrialRecord], malformed: Vec<MalformedRecord>) -> ExperimentReport {
        let mut diagnostics = Vec::new();
        let mut skip: Vec<i64> = Vec::new();

        for record in malformed {
            if !self.in_scope(record.experiment_use.as_deref()) {
                continue;
            }
            if let Some(test_number) = record.test_number {
                push_distinct(&mut skip, test_number);
            }
            diagnostics.push(Diagnostic::from(record));
        }

        let mut scoped: Vec<&RawTrialRecord> = records
            .iter()
            .filter(|r| self.in_scope(r.experiment_use.as_deref()))
            .collect();

        if let Some(setup) = &self.setup {
            for diagnostic in validate(setup, scoped.iter().copied()) {
                if let Diagnostic::DesignMismatch { test_number, .. } = diagnostic {
                    push_distinct(&mut skip, test_number);
                }
                diagnostics.push(diagnostic);
            }
            scoped.retain(|r| setup.design_of(r.test_number).is_some());
        }

        let Classification {
            groups,
            diagnostics: classify_diagnostics,
        } = classify(scoped.iter().copied());
        diagnostics.extend(classify_diagnostics);

        let mut tests = Vec::with_capacity(groups.len());
        let mut skipped = Vec::new();

        for group in &groups {
            if skip.contains(&group.test_number) {
                tracing::debug!(
                    test_number = group.test_number,
                    "Skipping test with unusable records"
                );
                skipped.push(group.test_number);
                continue;
            }

            let aggregate = Aggregate::reduce(group);
            let charts = build_charts(group.test_number, &aggregate, &self.config);
            if charts.is_empty() {
                diagnostics.push(Diagnostic::EmptyGroup {
                    test_number: group.test_number,
                    design: group.design,
                });
            }

            tracing::debug!(
                test_number = group.test_number,
                design = %group.design,
                records = group.records.len(),
                charts = charts.len(),
                "Aggregated test group"
            );

            tests.push(TestReport {
                test_number: group.test_number,
                design: group.design,
                aggregate,
                charts,
            });
        }

        for test_number in skip {
            push_distinct(&mut skipped, test_number);
        }

        for diagnostic in diagnostics.iter().filter(|d| d.is_warning()) {
            tracing::warn!("{diagnostic}");
        }

        let report = ExperimentReport {
            tests,
            skipped,
            diagnostics,
        };
        tracing::info!("{}", summary_line(&report.summary()));
        report
    }
}

fn push_distinct(values: &mut Vec<i64>, value: i64) {
    if !values.contains(&value) {
        values.push(value);
    }
}
