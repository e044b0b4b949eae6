use serde::Serialize;

use super::views::{BatchTotals, CandidateView};
use crate::workflows::screening::pipeline::ScreeningOutcome;

/// Digest of one screening batch, built from the pipeline's structured
/// handoff.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub job_title: String,
    pub job_location: String,
    pub totals: BatchTotals,
    pub top_candidates: Vec<CandidateView>,
    pub errors: Vec<String>,
}

impl ScreeningReport {
    pub fn from_outcome(outcome: &ScreeningOutcome, top_n: usize) -> Self {
        let candidates = &outcome.candidates;
        let average_match_score = if candidates.is_empty() {
            0.0
        } else {
            let sum: i32 = candidates
                .iter()
                .map(|candidate| i32::from(candidate.match_score))
                .sum();
            sum as f32 / candidates.len() as f32
        };

        let top_candidates = candidates
            .iter()
            .take(top_n)
            .map(CandidateView::from_candidate)
            .collect();

        Self {
            job_title: outcome.job_profile.title.clone(),
            job_location: outcome.job_profile.location.clone(),
            totals: BatchTotals {
                candidates: candidates.len(),
                selected: outcome.selected.len(),
                rejected: outcome.rejected.len(),
                average_match_score,
                notifications_sent: outcome.state.notifications_sent,
                interviews_scheduled: outcome.state.interviews_scheduled,
            },
            top_candidates,
            errors: outcome.state.errors.clone(),
        }
    }
}
