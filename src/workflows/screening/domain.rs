use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::extraction::ExtractedProfile;

/// Identifier wrapper for candidates; unique within a batch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Description of the open position every pipeline stage reads; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    pub title: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub languages: Vec<String>,
    pub location: String,
    pub description: String,
}

/// Lifecycle of a candidate inside one screening batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Pending,
    Selected,
    Rejected,
    Notified,
    Scheduled,
}

impl CandidateStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateStatus::Pending => "pending",
            CandidateStatus::Selected => "selected",
            CandidateStatus::Rejected => "rejected",
            CandidateStatus::Notified => "notified",
            CandidateStatus::Scheduled => "scheduled",
        }
    }

    /// Selected candidates keep moving forward; `Notified` and `Scheduled`
    /// are refinements of `Selected`, never of `Rejected`.
    pub const fn is_selected(self) -> bool {
        matches!(
            self,
            CandidateStatus::Selected | CandidateStatus::Notified | CandidateStatus::Scheduled
        )
    }
}

/// A screened candidate with extracted fields and evaluation trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cv_text: String,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub education: Vec<String>,
    pub experience_years: u32,
    pub match_score: i16,
    pub status: CandidateStatus,
    pub notes: Vec<String>,
}

impl Candidate {
    pub fn from_extracted(id: CandidateId, fields: ExtractedProfile, cv_text: String) -> Self {
        let phone = if fields.phone.is_empty() {
            None
        } else {
            Some(fields.phone)
        };

        Self {
            id,
            name: fields.name,
            email: fields.email,
            phone,
            cv_text,
            skills: fields.skills,
            languages: fields.languages,
            education: fields.education,
            experience_years: fields.experience_years,
            match_score: 0,
            status: CandidateStatus::Pending,
            notes: Vec::new(),
        }
    }
}

/// Batch-scoped counters and error log, exclusively owned by the orchestrator.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ProcessingState {
    pub candidates_processed: usize,
    pub notifications_sent: usize,
    pub interviews_scheduled: usize,
    pub errors: Vec<String>,
}

impl ProcessingState {
    pub(crate) fn record_error(&mut self, context: &str, error: impl std::fmt::Display) {
        self.errors.push(format!("{context}: {error}"));
    }
}

/// Injected candidate ID source so tests can assert deterministic IDs.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, name: &str) -> CandidateId;
}

/// Default generator producing `cand-000001`-style batch-ordered IDs.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    sequence: AtomicU64,
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self {
            sequence: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, _name: &str) -> CandidateId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        CandidateId(format!("cand-{id:06}"))
    }
}

/// Content-derived generator: candidate name slug plus a random suffix.
#[derive(Debug, Default)]
pub struct SluggedIdGenerator;

impl IdGenerator for SluggedIdGenerator {
    fn next_id(&self, name: &str) -> CandidateId {
        let slug: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let slug = if slug.is_empty() {
            "candidate".to_string()
        } else {
            slug
        };
        let suffix = Uuid::new_v4().simple().to_string();
        CandidateId(format!("{slug}-{}", &suffix[..8]))
    }
}
