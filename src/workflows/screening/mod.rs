//! Candidate screening: resume extraction, match scoring, batch
//! orchestration, notification, and report handoff.

pub mod cancel;
pub mod domain;
pub mod extraction;
pub mod notification;
mod pipeline;
pub mod report;
mod router;
pub mod scheduling;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use cancel::{cancellation, CancelHandle, CancelToken};
pub use domain::{
    Candidate, CandidateId, CandidateStatus, IdGenerator, JobProfile, ProcessingState,
    SequentialIdGenerator, SluggedIdGenerator,
};
pub use extraction::{ExtractedProfile, SectionExtractor};
pub use notification::{
    DeliveryOutcome, LoggingTransport, MessageTemplate, MessageTransport, NotificationDispatcher,
    RenderedMessage, RetryPolicy, TemplateKind, TransportError,
};
pub use pipeline::{
    PipelineError, PipelineStage, ScreeningConfig, ScreeningOutcome, ScreeningPipeline,
};
pub use report::{CsvFileRenderer, ReportError, ReportRenderer, ScreeningReport};
pub use router::{screening_router, ScreeningRunRequest, ScreeningRunResponse};
pub use scheduling::{
    BusinessHoursCalendar, InterviewBooking, InterviewScheduler, InterviewSlot, ScheduleError,
};
pub use scoring::{
    CandidateScorer, PartialAnalysis, RuleBasedScorer, ScoreAnalysis, ScoreComponent, ScoreFactor,
    ScoreOutcome, ScorerError, ScoringEngine,
};
