//! Per-cycle diagnostics: candidate scores, selection and stage timings.

pub mod cycle;
pub mod timing;

pub use cycle::{CandidateReport, CycleReport};
pub use timing::{StageTiming, TimingBreakdown};
