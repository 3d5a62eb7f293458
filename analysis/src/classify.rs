//! Record classifier: groups raw records by test number and resolves each
//! group's design once, so reducers receive already-typed trials.

use std::collections::HashMap;

use crate::core::diagnostics::Diagnostic;
use crate::core::record::{
    AbTrial, AbxTrial, ApeTrial, MushraTrial, RawTrialRecord, TestDesign, Trial,
};

/// Trials of one test group, narrowed to the group's design.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupRecords<'a> {
    Ab(Vec<&'a AbTrial>),
    Abx(Vec<&'a AbxTrial>),
    Mushra(Vec<&'a MushraTrial>),
    Ape(Vec<&'a ApeTrial>),
}

impl<'a> GroupRecords<'a> {
    fn empty(design: TestDesign) -> Self {
        match design {
            TestDesign::Ab => GroupRecords::Ab(Vec::new()),
            TestDesign::Abx => GroupRecords::Abx(Vec::new()),
            TestDesign::Mushra => GroupRecords::Mushra(Vec::new()),
            TestDesign::Ape => GroupRecords::Ape(Vec::new()),
        }
    }

    /// Adds the trial when it matches the group's design.
    fn push(&mut self, trial: &'a Trial) -> bool {
        match (self, trial) {
            (GroupRecords::Ab(trials), Trial::Ab(trial)) => trials.push(trial),
            (GroupRecords::Abx(trials), Trial::Abx(trial)) => trials.push(trial),
            (GroupRecords::Mushra(trials), Trial::Mushra(trial)) => trials.push(trial),
            (GroupRecords::Ape(trials), Trial::Ape(trial)) => trials.push(trial),
            _ => return false,
        }
        true
    }

    pub fn design(&self) -> TestDesign {
        match self {
            GroupRecords::Ab(_) => TestDesign::Ab,
            GroupRecords::Abx(_) => TestDesign::Abx,
            GroupRecords::Mushra(_) => TestDesign::Mushra,
            GroupRecords::Ape(_) => TestDesign::Ape,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GroupRecords::Ab(trials) => trials.len(),
            GroupRecords::Abx(trials) => trials.len(),
            GroupRecords::Mushra(trials) => trials.len(),
            GroupRecords::Ape(trials) => trials.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestGroup<'a> {
    pub test_number: i64,
    pub design: TestDesign,
    pub records: GroupRecords<'a>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification<'a> {
    /// Groups in the order their test numbers first appeared.
    pub groups: Vec<TestGroup<'a>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Classification<'_> {
    pub fn group(&self, test_number: i64) -> Option<&TestGroup<'_>> {
        self.groups.iter().find(|group| group.test_number == test_number)
    }
}

pub fn classify<'a, I>(records: I) -> Classification<'a>
where
    I: IntoIterator<Item = &'a RawTrialRecord>,
{
    let mut classification = Classification::default();
    let mut slots: HashMap<i64, usize> = HashMap::new();

    for record in records {
        let groups = &mut classification.groups;
        let slot = *slots.entry(record.test_number).or_insert_with(|| {
            let design = record.design();
            groups.push(TestGroup {
                test_number: record.test_number,
                design,
                records: GroupRecords::empty(design),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        if !group.records.push(&record.trial) {
            classification.diagnostics.push(Diagnostic::InconsistentType {
                test_number: record.test_number,
                expected: group.design,
                found: record.design(),
            });
        }
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{MushraTrial, Selection};

    fn ab(test_number: i64, question: &str, sample: &str) -> RawTrialRecord {
        RawTrialRecord::new(
            test_number,
            Trial::Ab(AbTrial {
                selections: vec![Selection {
                    question_id: question.into(),
                    sample_id: sample.into(),
                }],
            }),
        )
    }

    fn mushra(test_number: i64) -> RawTrialRecord {
        RawTrialRecord::new(test_number, Trial::Mushra(MushraTrial::default()))
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let records: Vec<RawTrialRecord> = Vec::new();
        let classification = classify(&records);
        assert!(classification.groups.is_empty());
        assert!(classification.diagnostics.is_empty());
    }

    #[test]
    fn groups_follow_first_appearance_of_test_numbers() {
        let records = vec![ab(7, "q", "a"), mushra(2), ab(7, "q", "b"), mushra(5), mushra(2)];
        let classification = classify(&records);

        let order: Vec<_> = classification
            .groups
            .iter()
            .map(|group| (group.test_number, group.design, group.records.len()))
            .collect();
        assert_eq!(
            order,
            vec![
                (7, TestDesign::Ab, 2),
                (2, TestDesign::Mushra, 2),
                (5, TestDesign::Mushra, 1)
            ]
        );
    }

    #[test]
    fn mismatched_records_are_excluded_and_reported() {
        let records = vec![ab(1, "q", "a"), mushra(1), ab(1, "q", "b")];
        let classification = classify(&records);

        let group = classification.group(1).unwrap();
        assert_eq!(group.design, TestDesign::Ab);
        assert_eq!(group.records.len(), 2);
        assert_eq!(
            classification.diagnostics,
            vec![Diagnostic::InconsistentType {
                test_number: 1,
                expected: TestDesign::Ab,
                found: TestDesign::Mushra,
            }]
        );
    }
}
