//! Per-axis, per-sample mean ratings for APE tests.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::record::ApeTrial;
use crate::core::stats::{AverageScore, OrderedMeans};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisAggregate {
    pub axis_id: String,
    pub averages: Vec<AverageScore>,
}

/// One aggregate per axis, in first-appearance order. Samples never rated on
/// an axis do not appear under it.
pub fn reduce(trials: &[&ApeTrial]) -> Vec<AxisAggregate> {
    let mut axes: Vec<(String, OrderedMeans)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for axis in trials.iter().flat_map(|t| t.axis_results.iter()) {
        let slot = *slots.entry(axis.axis_id.as_str()).or_insert_with(|| {
            axes.push((axis.axis_id.clone(), OrderedMeans::default()));
            axes.len() - 1
        });
        let means = &mut axes[slot].1;
        for rating in &axis.sample_ratings {
            means.push(&rating.sample_id, rating.rating);
        }
    }

    axes.into_iter()
        .map(|(axis_id, means)| AxisAggregate {
            axis_id,
            averages: means.into_averages(),
        })
        .collect()
}
