//! Record model, statistics helpers and diagnostics shared by every stage.

pub mod diagnostics;
pub mod record;
pub mod stats;
