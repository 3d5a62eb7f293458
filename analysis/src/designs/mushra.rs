//! Per-sample mean scores for MUSHRA tests.

use serde::Serialize;

use crate::core::record::MushraTrial;
use crate::core::stats::{AverageScore, OrderedMeans};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MushraAggregate {
    /// Anchors first, then samples, each in first-appearance order.
    pub averages: Vec<AverageScore>,
    pub reference_score: f64,
}

impl MushraAggregate {
    pub fn average(&self, sample_id: &str) -> Option<f64> {
        self.averages
            .iter()
            .find(|score| score.sample_id == sample_id)
            .map(|score| score.average)
    }
}

/// Anchor and sample scores from every trial are pooled before averaging.
/// The reference score is taken from the first trial only and treated as a
/// per-test constant.
pub fn reduce(trials: &[&MushraTrial]) -> MushraAggregate {
    let mut means = OrderedMeans::default();

    let anchors = trials.iter().flat_map(|t| t.anchors_scores.iter());
    let samples = trials.iter().flat_map(|t| t.samples_scores.iter());
    for score in anchors.chain(samples) {
        means.push(&score.sample_id, score.score);
    }

    MushraAggregate {
        averages: means.into_averages(),
        reference_score: trials.first().map_or(0.0, |t| t.reference_score()),
    }
}
