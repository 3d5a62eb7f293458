//! Series builder: reshapes design aggregates into label/value series.
//!
//! Nothing here aggregates or picks colours. A chart is only labels, ordered
//! value series and the titles the results view prints around them.

use serde::Serialize;

use super::utils::{axis_titles, chart_title};
use super::Aggregate;
use crate::config::AggregationConfig;
use crate::core::record::TestDesign;
use crate::designs::{AxisAggregate, CategoricalCount, MushraAggregate};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub title: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    /// Perceptual axis the chart belongs to (APE only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_id: Option<String>,
    pub data: ChartSeries,
}

impl Chart {
    fn new(test_number: i64, design: TestDesign, axis_id: Option<&str>, data: ChartSeries) -> Self {
        let (x_axis, y_axis) = axis_titles(design);
        Self {
            title: chart_title(design, test_number, axis_id),
            x_axis: x_axis.to_string(),
            y_axis: y_axis.to_string(),
            axis_id: axis_id.map(str::to_string),
            data,
        }
    }
}

/// Charts for one test, in display order. APE tests yield one chart per axis;
/// AB/ABX tests without any answered question yield none.
pub fn build_charts(
    test_number: i64,
    aggregate: &Aggregate,
    config: &AggregationConfig,
) -> Vec<Chart> {
    match aggregate {
        Aggregate::Ab(counts) => categorical_series(test_number, counts)
            .map(|data| Chart::new(test_number, TestDesign::Ab, None, data))
            .into_iter()
            .collect(),
        Aggregate::Abx(abx) => categorical_series(test_number, &abx.counts)
            .map(|data| Chart::new(test_number, TestDesign::Abx, None, data))
            .into_iter()
            .collect(),
        Aggregate::Mushra(mushra) => vec![Chart::new(
            test_number,
            TestDesign::Mushra,
            None,
            mushra_series(mushra, config),
        )],
        Aggregate::Ape(axes) => axes
            .iter()
            .map(|axis| {
                Chart::new(
                    test_number,
                    TestDesign::Ape,
                    Some(axis.axis_id.as_str()),
                    axis_series(axis),
                )
            })
            .collect(),
    }
}

/// Question ids as labels, one series per sample. `None` when no question was
/// answered, or when the counts do not line up with the questions.
pub fn categorical_series(test_number: i64, counts: &CategoricalCount) -> Option<ChartSeries> {
    if counts.is_empty() {
        return None;
    }

    let expected = counts.question_ids.len();
    if let Some(sample) = counts.samples.iter().find(|s| s.counts.len() != expected) {
        tracing::error!(
            test_number,
            sample_id = %sample.sample_id,
            expected,
            found = sample.counts.len(),
            "Selection counts do not line up with questions; chart dropped"
        );
        return None;
    }

    Some(ChartSeries {
        labels: counts.question_ids.clone(),
        series: counts
            .samples
            .iter()
            .map(|sample| Series {
                title: sample.sample_id.clone(),
                values: sample.counts.iter().map(|&count| f64::from(count)).collect(),
            })
            .collect(),
    })
}

/// Sample ids followed by the reference label; a single score series.
pub fn mushra_series(aggregate: &MushraAggregate, config: &AggregationConfig) -> ChartSeries {
    let mut labels: Vec<String> = aggregate
        .averages
        .iter()
        .map(|score| score.sample_id.clone())
        .collect();
    labels.push(config.reference_label.clone());

    let mut values: Vec<f64> = aggregate.averages.iter().map(|score| score.average).collect();
    values.push(aggregate.reference_score);

    ChartSeries {
        labels,
        series: vec![Series {
            title: config.score_series_title.clone(),
            values,
        }],
    }
}

pub fn axis_series(axis: &AxisAggregate) -> ChartSeries {
    ChartSeries {
        labels: axis.averages.iter().map(|a| a.sample_id.clone()).collect(),
        series: vec![Series {
            title: axis.axis_id.clone(),
            values: axis.averages.iter().map(|a| a.average).collect(),
        }],
    }
}
