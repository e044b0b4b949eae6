//! Report structures and renderers consuming the pipeline's handoff.

mod export;
mod summary;
pub mod views;

pub use export::{write_candidates_csv, CsvFileRenderer};
pub use summary::ScreeningReport;
pub use views::{BatchTotals, CandidateView};

use crate::workflows::screening::pipeline::ScreeningOutcome;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Final handoff boundary: a pure consumer of pipeline output.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, outcome: &ScreeningOutcome) -> Result<(), ReportError>;
}
