//! Sample ranking: mean listener rating per catalogued sample, with the
//! three-state sort toggle the ranking page cycles through.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::stats::mean;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleEntry {
    pub sample_id: String,
    pub name: String,
    #[serde(default)]
    pub asset_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleVote {
    pub sample_id: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSample {
    pub sample_id: String,
    pub name: String,
    pub asset_path: String,
    /// Mean of all votes; `0` for a sample nobody rated yet.
    pub rating: f64,
    pub votes: usize,
    /// Position in the catalogue, used to undo sorting.
    #[serde(skip)]
    catalogue_index: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Original,
    Ascending,
    Descending,
}

impl SortOrder {
    /// Original → Ascending → Descending → Original.
    pub fn next(self) -> Self {
        match self {
            SortOrder::Original => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Original,
        }
    }
}

pub fn rank_samples(samples: &[SampleEntry], votes: &[SampleVote]) -> Vec<RankedSample> {
    let mut by_sample: HashMap<&str, Vec<f64>> = samples
        .iter()
        .map(|s| (s.sample_id.as_str(), Vec::new()))
        .collect();

    for vote in votes {
        match by_sample.get_mut(vote.sample_id.as_str()) {
            Some(ratings) => ratings.push(vote.rating),
            None => tracing::warn!(sample_id = %vote.sample_id, "Ignoring vote for unknown sample"),
        }
    }

    samples
        .iter()
        .enumerate()
        .map(|(catalogue_index, sample)| {
            let ratings = by_sample
                .get(sample.sample_id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            RankedSample {
                sample_id: sample.sample_id.clone(),
                name: sample.name.clone(),
                asset_path: sample.asset_path.clone(),
                rating: mean(ratings).unwrap_or(0.0),
                votes: ratings.len(),
                catalogue_index,
            }
        })
        .collect()
}

/// Stable sort; ties keep catalogue order.
pub fn sort(samples: &mut [RankedSample], order: SortOrder) {
    match order {
        SortOrder::Original => samples.sort_by_key(|s| s.catalogue_index),
        SortOrder::Ascending => samples.sort_by(|a, b| {
            a.rating
                .total_cmp(&b.rating)
                .then(a.catalogue_index.cmp(&b.catalogue_index))
        }),
        SortOrder::Descending => samples.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then(a.catalogue_index.cmp(&b.catalogue_index))
        }),
    }
}
