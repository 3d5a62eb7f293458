//! One reducer per test design. Each turns the typed trials of a single test
//! group into that design's aggregate; none of them builds chart series.

pub mod ab;
pub mod ape;
pub mod mushra;

pub use ab::{AbxAggregate, CategoricalCount, CorrectnessVerdict, SampleCounts};
pub use ape::AxisAggregate;
pub use mushra::MushraAggregate;
