//! Per-record and per-group problems surfaced to the caller alongside the
//! aggregation output.

use serde::Serialize;
use thiserror::Error;

use super::record::{MalformedRecord, TestDesign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Record could not be decoded; its whole test group is left out.
    #[error("malformed record at index {index} (test {}): {reason}", describe_test(.test_number))]
    MalformedRecord {
        index: usize,
        test_number: Option<i64>,
        reason: String,
    },

    /// Group decoded fine but carried nothing to chart.
    #[error("test {test_number} ({design}) has no chartable data")]
    EmptyGroup { test_number: i64, design: TestDesign },

    /// Record type disagrees with the first record of its group.
    #[error("test {test_number} is {expected} but a record declares {found}; record ignored")]
    InconsistentType {
        test_number: i64,
        expected: TestDesign,
        found: TestDesign,
    },

    /// Record names a test the experiment does not define.
    #[error("no test {test_number} is configured for this experiment; record ignored")]
    UnknownTest { test_number: i64 },

    /// Record type disagrees with the experiment configuration.
    #[error("test {test_number} is configured as {configured} but a record declares {found}")]
    DesignMismatch {
        test_number: i64,
        configured: TestDesign,
        found: TestDesign,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::EmptyGroup { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }

    pub fn test_number(&self) -> Option<i64> {
        match self {
            Diagnostic::MalformedRecord { test_number, .. } => *test_number,
            Diagnostic::EmptyGroup { test_number, .. }
            | Diagnostic::InconsistentType { test_number, .. }
            | Diagnostic::UnknownTest { test_number }
            | Diagnostic::DesignMismatch { test_number, .. } => Some(*test_number),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl From<MalformedRecord> for Diagnostic {
    fn from(record: MalformedRecord) -> Self {
        Diagnostic::MalformedRecord {
            index: record.index,
            test_number: record.test_number,
            reason: record.reason,
        }
    }
}

fn describe_test(test_number: &Option<i64>) -> String {
    test_number.map_or_else(|| "unknown".to_string(), |n| n.to_string())
}
