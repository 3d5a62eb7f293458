//! Selection counts for AB and ABX tests, plus the ABX correctness verdict.

use serde::Serialize;

use crate::core::record::{AbTrial, AbxTrial, Selection};
use crate::core::stats::DistinctIds;

/// How often each sample was picked for each question.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoricalCount {
    /// Question ids in first-appearance order; the chart labels.
    pub question_ids: Vec<String>,
    pub samples: Vec<SampleCounts>,
}

impl CategoricalCount {
    pub fn is_empty(&self) -> bool {
        self.question_ids.is_empty()
    }

    pub fn sample(&self, sample_id: &str) -> Option<&SampleCounts> {
        self.samples.iter().find(|s| s.sample_id == sample_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleCounts {
    pub sample_id: String,
    /// Aligned with [`CategoricalCount::question_ids`].
    pub counts: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorrectnessVerdict {
    pub test_number: i64,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbxAggregate {
    pub counts: CategoricalCount,
    pub verdict: CorrectnessVerdict,
}

pub fn reduce_ab(trials: &[&AbTrial]) -> CategoricalCount {
    count_selections(
        trials.iter().flat_map(|t| t.selections.iter()),
        std::iter::empty(),
    )
}

/// ABX counts also list the hidden and the guessed sample of every trial,
/// even when no explicit selection names them.
///
/// The verdict is all-or-nothing: a single trial whose guess misses the hidden
/// sample makes the whole test incorrect.
pub fn reduce_abx(test_number: i64, trials: &[&AbxTrial]) -> AbxAggregate {
    let extra = trials
        .iter()
        .flat_map(|t| [t.x_sample_id.as_str(), t.x_selected.as_str()]);
    let counts = count_selections(trials.iter().flat_map(|t| t.selections.iter()), extra);

    AbxAggregate {
        counts,
        verdict: CorrectnessVerdict {
            test_number,
            correct: trials.iter().all(|t| t.is_correct()),
        },
    }
}

fn count_selections<'a, S, E>(selections: S, extra_samples: E) -> CategoricalCount
where
    S: IntoIterator<Item = &'a Selection>,
    E: IntoIterator<Item = &'a str>,
{
    let mut questions = DistinctIds::default();
    let mut samples = DistinctIds::default();
    let mut picks: Vec<(usize, usize)> = Vec::new();

    for selection in selections {
        let question = questions.insert(&selection.question_id);
        let sample = samples.insert(&selection.sample_id);
        picks.push((sample, question));
    }
    for sample_id in extra_samples {
        samples.insert(sample_id);
    }

    let mut grid = vec![vec![0u32; questions.len()]; samples.len()];
    for (sample, question) in picks {
        grid[sample][question] += 1;
    }

    CategoricalCount {
        question_ids: questions.into_vec(),
        samples: samples
            .into_vec()
            .into_iter()
            .zip(grid)
            .map(|(sample_id, counts)| SampleCounts { sample_id, counts })
            .collect(),
    }
}
