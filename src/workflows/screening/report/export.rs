use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use super::{ReportError, ReportRenderer};
use crate::workflows::screening::pipeline::ScreeningOutcome;

/// Writes one row per candidate, ranked order, to any `Write` sink.
pub fn write_candidates_csv<W: Write>(
    outcome: &ScreeningOutcome,
    writer: W,
) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "id",
        "name",
        "email",
        "phone",
        "match_score",
        "status",
        "experience_years",
        "skills",
        "notes",
    ])?;

    for candidate in &outcome.candidates {
        let score = candidate.match_score.to_string();
        let years = candidate.experience_years.to_string();
        let skills = candidate.skills.join("; ");
        let notes = candidate.notes.join("; ");
        csv_writer.write_record([
            candidate.id.0.as_str(),
            candidate.name.as_str(),
            candidate.email.as_str(),
            candidate.phone.as_deref().unwrap_or(""),
            score.as_str(),
            candidate.status.label(),
            years.as_str(),
            skills.as_str(),
            notes.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Report collaborator persisting the candidate table as a CSV file.
#[derive(Debug, Clone)]
pub struct CsvFileRenderer {
    path: PathBuf,
}

impl CsvFileRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportRenderer for CsvFileRenderer {
    fn render(&self, outcome: &ScreeningOutcome) -> Result<(), ReportError> {
        let file = File::create(&self.path)?;
        write_candidates_csv(outcome, file)?;
        tracing::info!(path = %self.path.display(), "candidate report exported");
        Ok(())
    }
}
