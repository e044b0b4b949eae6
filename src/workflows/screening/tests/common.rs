use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::workflows::screening::domain::{Candidate, CandidateId, CandidateStatus, JobProfile};
use crate::workflows::screening::notification::{
    MessageTransport, NotificationDispatcher, RenderedMessage, RetryPolicy, TransportError,
};
use crate::workflows::screening::pipeline::{ScreeningConfig, ScreeningOutcome, ScreeningPipeline};
use crate::workflows::screening::report::{ReportError, ReportRenderer};
use crate::workflows::screening::scoring::{CandidateScorer, ScoreAnalysis, ScorerError};

pub(super) const REFERENCE_YEAR: i32 = 2025;

pub(super) fn job_profile() -> JobProfile {
    JobProfile {
        title: "Backend Engineer".to_string(),
        requirements: vec![
            "Ship reliable services".to_string(),
            "Own production incidents".to_string(),
        ],
        skills: vec!["Python".to_string(), "Docker".to_string()],
        experience_years: 5,
        languages: vec!["Spanish".to_string()],
        location: "Remote".to_string(),
        description: "Server-side role on the platform team".to_string(),
    }
}

/// Scores 10+10+5+15 = 40 against [`job_profile`]: both skills, Spanish,
/// and six years (2018-2024) of experience.
pub(super) const STRONG_CV: &str = "\
Maria Lopez
maria.lopez@example.com
+54 11 4444 5678

PROFESSIONAL EXPERIENCE
Backend developer at Initech, 2018-2024
Built Python services packaged with Docker

SKILLS
- Python
- Docker
- PostgreSQL

EDUCATION
- BSc in Computer Science (University of Buenos Aires)

LANGUAGES
Spanish (Native), English (Advanced)
";

/// Scores 10+10+5 = 25 against [`job_profile`]: both skills and Spanish,
/// but only three stated years of experience.
pub(super) const WEAK_CV: &str = "\
Carlos Ruiz
carlos.ruiz@example.com

SUMMARY
Junior developer with 3 years of experience using Python and Docker.

LANGUAGES
Spanish and English
";

/// Scores 10 against [`job_profile`]: Python only, no languages, no
/// recognizable experience.
pub(super) const SPARSE_CV: &str = "\
Ana Torres
ana.torres@example.com

SUMMARY
Wrote a few Python scripts during an internship.
";

pub(super) fn screening_config() -> ScreeningConfig {
    ScreeningConfig {
        selection_threshold: 30,
        company_name: "Acme Talent".to_string(),
        notify_rejected: false,
        reference_year: REFERENCE_YEAR,
    }
}

pub(super) fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(1),
    }
}

pub(super) fn dispatcher(transport: Arc<dyn MessageTransport>) -> NotificationDispatcher {
    NotificationDispatcher::new(transport).with_retry_policy(fast_retry())
}

pub(super) fn build_pipeline(transport: Arc<dyn MessageTransport>) -> ScreeningPipeline {
    ScreeningPipeline::new(dispatcher(transport), screening_config())
}

pub(super) fn candidate(id: &str, name: &str, email: &str, score: i16) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        cv_text: String::new(),
        skills: Vec::new(),
        languages: Vec::new(),
        education: Vec::new(),
        experience_years: 0,
        match_score: score,
        status: CandidateStatus::Selected,
        notes: Vec::new(),
    }
}

/// Transport recording every delivery and always succeeding.
#[derive(Default, Clone)]
pub(super) struct MemoryTransport {
    pub(super) sent: Arc<Mutex<Vec<(String, RenderedMessage)>>>,
}

impl MemoryTransport {
    pub(super) fn deliveries(&self) -> Vec<(String, RenderedMessage)> {
        self.sent.lock().expect("transport mutex poisoned").clone()
    }
}

#[async_trait]
impl MessageTransport for MemoryTransport {
    async fn send(&self, to: &str, message: &RenderedMessage) -> Result<(), TransportError> {
        self.sent
            .lock()
            .expect("transport mutex poisoned")
            .push((to.to_string(), message.clone()));
        Ok(())
    }
}

/// Transport that never delivers.
pub(super) struct FailingTransport;

#[async_trait]
impl MessageTransport for FailingTransport {
    async fn send(&self, _to: &str, _message: &RenderedMessage) -> Result<(), TransportError> {
        Err(TransportError::Unavailable("smtp offline".to_string()))
    }
}

/// Transport failing the first `failures` attempts per recipient, then
/// delivering.
pub(super) struct FlakyTransport {
    failures: u32,
    attempts: Mutex<HashMap<String, u32>>,
    pub(super) sent: Mutex<Vec<String>>,
}

impl FlakyTransport {
    pub(super) fn failing_first(failures: u32) -> Self {
        Self {
            failures,
            attempts: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MessageTransport for FlakyTransport {
    async fn send(&self, to: &str, _message: &RenderedMessage) -> Result<(), TransportError> {
        let mut attempts = self.attempts.lock().expect("attempt mutex poisoned");
        let seen = attempts.entry(to.to_string()).or_insert(0);
        *seen += 1;
        if *seen <= self.failures {
            return Err(TransportError::Unavailable(format!(
                "transient failure {seen}"
            )));
        }
        self.sent
            .lock()
            .expect("sent mutex poisoned")
            .push(to.to_string());
        Ok(())
    }
}

/// Scorer backend that always errors, for degraded-candidate coverage.
pub(super) struct FailingScorer;

#[async_trait]
impl CandidateScorer for FailingScorer {
    async fn analyze(
        &self,
        _cv_text: &str,
        _job: &JobProfile,
    ) -> Result<ScoreAnalysis, ScorerError> {
        Err(ScorerError::Backend("model endpoint offline".to_string()))
    }
}

/// Renderer capturing each handoff it receives.
#[derive(Default, Clone)]
pub(super) struct MemoryRenderer {
    pub(super) rendered: Arc<Mutex<Vec<usize>>>,
}

impl ReportRenderer for MemoryRenderer {
    fn render(&self, outcome: &ScreeningOutcome) -> Result<(), ReportError> {
        self.rendered
            .lock()
            .expect("renderer mutex poisoned")
            .push(outcome.candidates.len());
        Ok(())
    }
}
