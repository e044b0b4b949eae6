//! Batch orchestration: extraction, scoring, ranking, threshold selection,
//! notification, optional scheduling, and the report handoff.
//!
//! Per-item failures are isolated and recorded in the batch
//! [`ProcessingState`]; only an empty batch, an invalid job profile, or a
//! batch-level cancellation is fatal.

use std::sync::Arc;

use chrono::{Datelike, Local};
use serde::Serialize;

use super::cancel::{cancellation, CancelToken};
use super::domain::{
    Candidate, CandidateStatus, IdGenerator, JobProfile, ProcessingState, SequentialIdGenerator,
};
use super::extraction::SectionExtractor;
use super::notification::{InterviewTemplate, NotificationDispatcher, TemplateKind};
use super::report::ReportRenderer;
use super::scheduling::InterviewScheduler;
use super::scoring::{CandidateScorer, RuleBasedScorer};

const SCHEDULING_WINDOW_DAYS: u32 = 7;

/// Stages a screening batch moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Extracting,
    Scoring,
    Ranking,
    Selecting,
    Notifying,
    Scheduling,
    Reporting,
    Completed,
    Failed,
}

impl PipelineStage {
    pub const fn label(self) -> &'static str {
        match self {
            PipelineStage::Extracting => "extracting",
            PipelineStage::Scoring => "scoring",
            PipelineStage::Ranking => "ranking",
            PipelineStage::Selecting => "selecting",
            PipelineStage::Notifying => "notifying",
            PipelineStage::Scheduling => "scheduling",
            PipelineStage::Reporting => "reporting",
            PipelineStage::Completed => "completed",
            PipelineStage::Failed => "failed",
        }
    }
}

/// Batch-fatal errors. Everything else degrades to per-item notes and the
/// error log.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no resume texts supplied for screening")]
    EmptyBatch,
    #[error("invalid job profile: {0}")]
    InvalidProfile(String),
    #[error("screening batch cancelled before the {stage} stage")]
    Cancelled { stage: &'static str },
}

/// Per-batch configuration; the threshold is an input, never hard-coded.
#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    pub selection_threshold: i16,
    pub company_name: String,
    pub notify_rejected: bool,
    /// Anchor for the "earliest year seen" experience fallback.
    pub reference_year: i32,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            selection_threshold: 30,
            company_name: "Our Company".to_string(),
            notify_rejected: false,
            reference_year: Local::now().year(),
        }
    }
}

/// Everything downstream consumers need: the full ranked candidate list,
/// both partitions, and the batch counters.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningOutcome {
    pub job_profile: JobProfile,
    pub candidates: Vec<Candidate>,
    pub selected: Vec<Candidate>,
    pub rejected: Vec<Candidate>,
    pub state: ProcessingState,
}

/// Sequences one batch end to end. Collaborators are injected; the mutable
/// [`ProcessingState`] accumulator is created per run and owned here.
pub struct ScreeningPipeline {
    extractor: SectionExtractor,
    scorer: Arc<dyn CandidateScorer>,
    dispatcher: NotificationDispatcher,
    scheduler: Option<Arc<dyn InterviewScheduler>>,
    renderer: Option<Arc<dyn ReportRenderer>>,
    ids: Arc<dyn IdGenerator>,
    config: ScreeningConfig,
}

impl ScreeningPipeline {
    /// Builds a pipeline with the deterministic rule-based scorer and
    /// sequential candidate IDs.
    pub fn new(dispatcher: NotificationDispatcher, config: ScreeningConfig) -> Self {
        Self {
            extractor: SectionExtractor::new(config.reference_year),
            scorer: Arc::new(RuleBasedScorer::new(config.reference_year)),
            dispatcher,
            scheduler: None,
            renderer: None,
            ids: Arc::new(SequentialIdGenerator::default()),
            config,
        }
    }

    /// Swaps the scorer backend (e.g. a model-based analyzer).
    pub fn with_scorer(mut self, scorer: Arc<dyn CandidateScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_scheduler(mut self, scheduler: Arc<dyn InterviewScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn ReportRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    /// Runs a batch without external cancellation.
    pub async fn run(
        &self,
        job: &JobProfile,
        cv_texts: &[String],
    ) -> Result<ScreeningOutcome, PipelineError> {
        let (_handle, token) = cancellation();
        self.run_with_cancel(job, cv_texts, &token).await
    }

    /// Runs a batch, honoring `cancel` between stages and between sends.
    pub async fn run_with_cancel(
        &self,
        job: &JobProfile,
        cv_texts: &[String],
        cancel: &CancelToken,
    ) -> Result<ScreeningOutcome, PipelineError> {
        if let Err(error) = validate_profile(job) {
            tracing::warn!(stage = PipelineStage::Failed.label(), error = %error, "batch rejected");
            return Err(error);
        }
        if cv_texts.is_empty() {
            let error = PipelineError::EmptyBatch;
            tracing::warn!(stage = PipelineStage::Failed.label(), error = %error, "batch rejected");
            return Err(error);
        }

        let mut state = ProcessingState::default();

        self.enter(PipelineStage::Extracting, cancel)?;
        let mut candidates = Vec::with_capacity(cv_texts.len());
        for text in cv_texts {
            let fields = self.extractor.extract(text);
            let id = self.ids.next_id(&fields.name);
            candidates.push(Candidate::from_extracted(id, fields, text.clone()));
            state.candidates_processed += 1;
        }

        self.enter(PipelineStage::Scoring, cancel)?;
        for candidate in &mut candidates {
            match self.scorer.analyze(&candidate.cv_text, job).await {
                Ok(analysis) => {
                    candidate.match_score = analysis.score;
                    if !analysis.rationale.is_empty() {
                        candidate.notes.push(analysis.rationale);
                    }
                }
                Err(error) => {
                    candidate.match_score = 0;
                    candidate.notes.push(format!("analysis failed: {error}"));
                    state.record_error(&format!("scoring {}", candidate.id.0), &error);
                }
            }
        }

        self.enter(PipelineStage::Ranking, cancel)?;
        // Stable sort: equal scores keep their input order.
        candidates.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        self.enter(PipelineStage::Selecting, cancel)?;
        for candidate in &mut candidates {
            candidate.status = if candidate.match_score >= self.config.selection_threshold {
                CandidateStatus::Selected
            } else {
                CandidateStatus::Rejected
            };
        }

        self.enter(PipelineStage::Notifying, cancel)?;
        self.notify(&mut candidates, job, &mut state, cancel).await;

        if let Some(scheduler) = self.scheduler.clone() {
            self.enter(PipelineStage::Scheduling, cancel)?;
            self.schedule(scheduler.as_ref(), &mut candidates, job, &mut state, cancel)
                .await;
        }

        self.enter(PipelineStage::Reporting, cancel)?;
        let selected = candidates
            .iter()
            .filter(|candidate| candidate.status.is_selected())
            .cloned()
            .collect();
        let rejected = candidates
            .iter()
            .filter(|candidate| candidate.status == CandidateStatus::Rejected)
            .cloned()
            .collect();

        let mut outcome = ScreeningOutcome {
            job_profile: job.clone(),
            candidates,
            selected,
            rejected,
            state,
        };

        if let Some(renderer) = &self.renderer {
            if let Err(error) = renderer.render(&outcome) {
                tracing::warn!(error = %error, "report handoff failed");
                outcome.state.record_error("report handoff", &error);
            }
        }

        tracing::info!(
            candidates = outcome.candidates.len(),
            selected = outcome.selected.len(),
            rejected = outcome.rejected.len(),
            notifications = outcome.state.notifications_sent,
            interviews = outcome.state.interviews_scheduled,
            stage = PipelineStage::Completed.label(),
            "screening batch finished"
        );

        Ok(outcome)
    }

    fn enter(&self, stage: PipelineStage, cancel: &CancelToken) -> Result<(), PipelineError> {
        if cancel.is_cancelled() {
            tracing::warn!(stage = stage.label(), "screening batch cancelled");
            return Err(PipelineError::Cancelled {
                stage: stage.label(),
            });
        }
        tracing::debug!(stage = stage.label(), "entering stage");
        Ok(())
    }

    async fn notify(
        &self,
        candidates: &mut [Candidate],
        job: &JobProfile,
        state: &mut ProcessingState,
        cancel: &CancelToken,
    ) {
        let selected: Vec<Candidate> = candidates
            .iter()
            .filter(|candidate| candidate.status == CandidateStatus::Selected)
            .cloned()
            .collect();
        let outcomes = self
            .dispatcher
            .send_bulk(
                &selected,
                TemplateKind::Selected,
                &job.title,
                &self.config.company_name,
                cancel,
            )
            .await;

        for (id, outcome) in &outcomes {
            let Some(candidate) = candidates.iter_mut().find(|c| &c.id == id) else {
                continue;
            };
            if outcome.delivered {
                candidate.status = CandidateStatus::Notified;
                candidate.notes.push(format!(
                    "selection notice delivered after {} attempt(s)",
                    outcome.attempts
                ));
                state.notifications_sent += 1;
            } else {
                let reason = outcome
                    .failure
                    .clone()
                    .unwrap_or_else(|| "unknown delivery failure".to_string());
                candidate
                    .notes
                    .push(format!("selection notice failed: {reason}"));
                state.record_error(&format!("notifying {}", id.0), reason);
            }
        }

        if !self.config.notify_rejected {
            return;
        }

        let rejected: Vec<Candidate> = candidates
            .iter()
            .filter(|candidate| candidate.status == CandidateStatus::Rejected)
            .cloned()
            .collect();
        let outcomes = self
            .dispatcher
            .send_bulk(
                &rejected,
                TemplateKind::Rejected,
                &job.title,
                &self.config.company_name,
                cancel,
            )
            .await;

        for (id, outcome) in &outcomes {
            let Some(candidate) = candidates.iter_mut().find(|c| &c.id == id) else {
                continue;
            };
            if outcome.delivered {
                candidate.notes.push("rejection notice delivered".to_string());
                state.notifications_sent += 1;
            } else {
                let reason = outcome
                    .failure
                    .clone()
                    .unwrap_or_else(|| "unknown delivery failure".to_string());
                candidate
                    .notes
                    .push(format!("rejection notice failed: {reason}"));
                state.record_error(&format!("notifying {}", id.0), reason);
            }
        }
    }

    async fn schedule(
        &self,
        scheduler: &dyn InterviewScheduler,
        candidates: &mut [Candidate],
        job: &JobProfile,
        state: &mut ProcessingState,
        cancel: &CancelToken,
    ) {
        let start = Local::now().date_naive();
        let slots = scheduler.available_slots(start, SCHEDULING_WINDOW_DAYS);
        if slots.is_empty() {
            tracing::warn!(
                days_ahead = SCHEDULING_WINDOW_DAYS,
                "no interview slots available"
            );
            return;
        }

        let mut next_slot = 0usize;
        for candidate in candidates
            .iter_mut()
            .filter(|candidate| candidate.status.is_selected())
        {
            let Some(slot) = slots.get(next_slot) else {
                candidate
                    .notes
                    .push("no interview slot left in the scheduling window".to_string());
                continue;
            };
            next_slot += 1;

            let booking = match scheduler.book(candidate, slot) {
                Ok(booking) => booking,
                Err(error) => {
                    state.record_error(&format!("scheduling {}", candidate.id.0), &error);
                    continue;
                }
            };

            candidate.status = CandidateStatus::Scheduled;
            candidate.notes.push(format!(
                "interview booked for {} {}",
                booking.slot.date,
                booking.slot.time.format("%H:%M")
            ));
            state.interviews_scheduled += 1;

            match InterviewTemplate::new(booking) {
                Ok(template) => {
                    let outcome = self
                        .dispatcher
                        .send_templated(
                            candidate,
                            &super::notification::MessageTemplate::InterviewInvitation(template),
                            &job.title,
                            &self.config.company_name,
                            cancel,
                        )
                        .await;
                    if outcome.delivered {
                        state.notifications_sent += 1;
                    } else {
                        let reason = outcome
                            .failure
                            .unwrap_or_else(|| "unknown delivery failure".to_string());
                        state.record_error(&format!("inviting {}", candidate.id.0), reason);
                    }
                }
                Err(error) => {
                    state.record_error(&format!("inviting {}", candidate.id.0), &error);
                }
            }
        }
    }
}

fn validate_profile(job: &JobProfile) -> Result<(), PipelineError> {
    if job.title.trim().is_empty() {
        return Err(PipelineError::InvalidProfile(
            "job title is required".to_string(),
        ));
    }
    Ok(())
}
