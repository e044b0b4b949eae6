use serde::Serialize;

use crate::workflows::screening::domain::{Candidate, CandidateId, CandidateStatus};

/// Serializable candidate snapshot for API responses and reports.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub match_score: i16,
    pub status: CandidateStatus,
    pub status_label: &'static str,
    pub experience_years: u32,
    pub notes: Vec<String>,
}

impl CandidateView {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            match_score: candidate.match_score,
            status: candidate.status,
            status_label: candidate.status.label(),
            experience_years: candidate.experience_years,
            notes: candidate.notes.clone(),
        }
    }
}

/// Aggregate counters for one screening batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchTotals {
    pub candidates: usize,
    pub selected: usize,
    pub rejected: usize,
    pub average_match_score: f32,
    pub notifications_sent: usize,
    pub interviews_scheduled: usize,
}
