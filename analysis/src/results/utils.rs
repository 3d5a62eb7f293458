use crate::core::record::{RawTrialRecord, TestDesign};
use crate::core::stats::DistinctIds;

use super::ReportSummary;

pub(crate) fn chart_title(design: TestDesign, test_number: i64, axis_id: Option<&str>) -> String {
    match (design, axis_id) {
        (TestDesign::Ab | TestDesign::Abx, _) => {
            format!("Selections per Question (Test {test_number})")
        }
        (TestDesign::Mushra, _) => format!("Scores with Reference (Test {test_number})"),
        (TestDesign::Ape, Some(axis)) => format!("Ratings for {axis} (Test {test_number})"),
        (TestDesign::Ape, None) => format!("Ratings (Test {test_number})"),
    }
}

/// `(x, y)` axis titles.
pub(crate) fn axis_titles(design: TestDesign) -> (&'static str, &'static str) {
    match design {
        TestDesign::Ab | TestDesign::Abx => ("Questions", "Number of Selections"),
        TestDesign::Mushra => ("Samples", "Scores"),
        TestDesign::Ape => ("Samples", "Ratings"),
    }
}

pub fn design_label(design: TestDesign) -> &'static str {
    match design {
        TestDesign::Ab => "Pairwise preference (AB)",
        TestDesign::Abx => "Hidden sample identification (ABX)",
        TestDesign::Mushra => "Multi-stimulus with hidden reference (MUSHRA)",
        TestDesign::Ape => "Multi-axis perceptual evaluation (APE)",
    }
}

/// Distinct submission ids (`experimentUse`) in first-appearance order.
/// Records without one are not listed.
pub fn submissions(records: &[RawTrialRecord]) -> Vec<String> {
    let mut ids = DistinctIds::default();
    for id in records.iter().filter_map(|r| r.experiment_use.as_deref()) {
        ids.insert(id);
    }
    ids.into_vec()
}

pub fn summary_line(summary: &ReportSummary) -> String {
    let mut parts = Vec::new();

    for (design, count) in summary.tests_by_design() {
        if count > 0 {
            parts.push(format!("{count} {design}"));
        }
    }

    let mut line = if parts.is_empty() {
        "No tests aggregated".to_string()
    } else {
        format!(
            "{} test(s): {} · {} chart(s)",
            summary.tests,
            parts.join(", "),
            summary.charts
        )
    };

    if summary.skipped > 0 {
        line.push_str(&format!(" · {} skipped", summary.skipped));
    }
    if summary.warnings > 0 {
        line.push_str(&format!(" · {} warning(s)", summary.warnings));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{AbTrial, Trial};

    #[test]
    fn titles_follow_design() {
        assert_eq!(
            chart_title(TestDesign::Abx, 2, None),
            "Selections per Question (Test 2)"
        );
        assert_eq!(
            chart_title(TestDesign::Mushra, 3, None),
            "Scores with Reference (Test 3)"
        );
        assert_eq!(
            chart_title(TestDesign::Ape, 4, Some("warmth")),
            "Ratings for warmth (Test 4)"
        );
        assert_eq!(axis_titles(TestDesign::Ape), ("Samples", "Ratings"));
    }

    #[test]
    fn submissions_are_distinct_and_ordered() {
        let record = |id: Option<&str>| RawTrialRecord {
            experiment_use: id.map(str::to_string),
            ..RawTrialRecord::new(1, Trial::Ab(AbTrial::default()))
        };
        let records = vec![
            record(Some("b")),
            record(None),
            record(Some("a")),
            record(Some("b")),
        ];
        assert_eq!(submissions(&records), vec!["b", "a"]);
    }

    #[test]
    fn summary_line_mentions_only_present_designs() {
        let summary = ReportSummary {
            tests: 3,
            ab: 0,
            abx: 2,
            mushra: 1,
            ape: 0,
            charts: 2,
            skipped: 1,
            warnings: 1,
        };
        assert_eq!(
            summary_line(&summary),
            "3 test(s): 2 ABX, 1 MUSHRA · 2 chart(s) · 1 skipped · 1 warning(s)"
        );
        assert_eq!(summary_line(&ReportSummary::default()), "No tests aggregated");
    }
}
