//! JSON and CSV renderings of an [`ExperimentReport`] for offline analysis.

use super::ExperimentReport;
use crate::Result;

const CSV_HEADER: [&str; 6] = ["test_number", "design", "chart", "label", "series", "value"];

pub fn to_json(report: &ExperimentReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// One row per charted value, in chart order.
pub fn to_csv(report: &ExperimentReport) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();
    rows.push(CSV_HEADER.into_iter().map(String::from).collect());

    for test in &report.tests {
        for chart in &test.charts {
            for series in &chart.data.series {
                for (label, value) in chart.data.labels.iter().zip(&series.values) {
                    rows.push(vec![
                        test.test_number.to_string(),
                        test.design.to_string(),
                        chart.title.clone(),
                        label.clone(),
                        series.title.clone(),
                        value.to_string(),
                    ]);
                }
            }
        }
    }

    let mut csv = String::new();
    for row in rows {
        let line = row
            .into_iter()
            .map(|field| escape_csv(&field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

fn escape_csv(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::RawResultsPayload;
    use crate::results::Aggregator;
    use serde_json::json;

    fn report() -> ExperimentReport {
        let payload: RawResultsPayload = serde_json::from_value(json!({
            "results": [
                { "testNumber": 3, "type": "MUSHRA",
                  "anchorsScores": [{ "sampleId": "anchor, low", "score": 40 }],
                  "samplesScores": [{ "sampleId": "s1", "score": 60 }, { "sampleId": "s1", "score": 80 }],
                  "referenceScore": 100 }
            ]
        }))
        .unwrap();
        Aggregator::default().aggregate_payload(&payload)
    }

    #[test]
    fn csv_has_one_row_per_value_and_quotes_commas() {
        let csv = to_csv(&report());
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "test_number,design,chart,label,series,value");
        assert_eq!(
            lines[1],
            "3,MUSHRA,Scores with Reference (Test 3),\"anchor, low\",Scores,40"
        );
        assert_eq!(lines[2], "3,MUSHRA,Scores with Reference (Test 3),s1,Scores,70");
        assert_eq!(
            lines[3],
            "3,MUSHRA,Scores with Reference (Test 3),Reference,Scores,100"
        );
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn escape_doubles_embedded_quotes() {
        assert_eq!(escape_csv(r#"say "hi""#), r#""say ""hi""""#);
        assert_eq!(escape_csv(""), "");
        assert_eq!(escape_csv("plain"), "plain");
    }

    #[test]
    fn json_export_carries_charts_and_diagnostics() {
        let json = to_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tests"][0]["design"], "MUSHRA");
        assert_eq!(
            value["tests"][0]["charts"][0]["data"]["labels"],
            json!(["anchor, low", "s1", "Reference"])
        );
        assert_eq!(value["diagnostics"], json!([]));
    }
}
