//! Order-preserving accumulators shared by the reducers.
//!
//! Both helpers remember ids in first-appearance order and sum values in input
//! order, so identical payloads always produce identical labels and
//! bit-identical means.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageScore {
    pub sample_id: String,
    pub average: f64,
    /// Number of scores that went into `average`.
    pub count: usize,
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Distinct ids in the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct DistinctIds {
    order: Vec<String>,
    positions: HashMap<String, usize>,
}

impl DistinctIds {
    /// Returns the position of `id`, appending it when it is new.
    pub fn insert(&mut self, id: &str) -> usize {
        if let Some(&position) = self.positions.get(id) {
            return position;
        }
        let position = self.order.len();
        self.positions.insert(id.to_string(), position);
        self.order.push(id.to_string());
        position
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// Running arithmetic means keyed by sample id.
#[derive(Debug, Clone, Default)]
pub struct OrderedMeans {
    ids: DistinctIds,
    totals: Vec<(f64, usize)>,
}

impl OrderedMeans {
    pub fn push(&mut self, id: &str, value: f64) {
        let position = self.ids.insert(id);
        if position == self.totals.len() {
            self.totals.push((0.0, 0));
        }
        let total = &mut self.totals[position];
        total.0 += value;
        total.1 += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn into_averages(self) -> Vec<AverageScore> {
        self.ids
            .into_vec()
            .into_iter()
            .zip(self.totals)
            .map(|(sample_id, (sum, count))| AverageScore {
                average: sum / count as f64,
                count,
                sample_id,
            })
            .collect()
    }
}
