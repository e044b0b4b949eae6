use std::sync::Arc;

use super::common::*;
use crate::workflows::screening::cancel::cancellation;
use crate::workflows::screening::domain::CandidateStatus;
use crate::workflows::screening::pipeline::{PipelineError, ScreeningPipeline};
use crate::workflows::screening::scheduling::BusinessHoursCalendar;

#[tokio::test]
async fn every_input_text_becomes_exactly_one_classified_candidate() {
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()));
    let texts = vec![
        STRONG_CV.to_string(),
        WEAK_CV.to_string(),
        SPARSE_CV.to_string(),
    ];

    let outcome = pipeline
        .run(&job_profile(), &texts)
        .await
        .expect("batch completes");

    assert_eq!(outcome.candidates.len(), texts.len());
    assert_eq!(
        outcome.selected.len() + outcome.rejected.len(),
        outcome.candidates.len()
    );
    assert_eq!(outcome.state.candidates_processed, texts.len());

    for candidate in &outcome.selected {
        assert!(candidate.status.is_selected());
    }
    for candidate in &outcome.rejected {
        assert_eq!(candidate.status, CandidateStatus::Rejected);
    }
}

#[tokio::test]
async fn candidate_ids_follow_input_order() {
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()));
    let texts = vec![STRONG_CV.to_string(), WEAK_CV.to_string()];

    let outcome = pipeline
        .run(&job_profile(), &texts)
        .await
        .expect("batch completes");

    let mut ids: Vec<&str> = outcome
        .candidates
        .iter()
        .map(|candidate| candidate.id.0.as_str())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["cand-000001", "cand-000002"]);
}

#[tokio::test]
async fn equal_scores_keep_input_order_in_the_ranking() {
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()));
    // Input order: a low scorer followed by two identical high scorers.
    let texts = vec![
        SPARSE_CV.to_string(),
        STRONG_CV.to_string(),
        STRONG_CV.replace("Maria Lopez", "Lucia Perez"),
    ];

    let outcome = pipeline
        .run(&job_profile(), &texts)
        .await
        .expect("batch completes");

    let ranked: Vec<&str> = outcome
        .candidates
        .iter()
        .map(|candidate| candidate.id.0.as_str())
        .collect();
    // Scores are [10, 40, 40]; the two 40s keep their input order.
    assert_eq!(ranked, vec!["cand-000002", "cand-000003", "cand-000001"]);
}

#[tokio::test]
async fn empty_batch_is_fatal() {
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()));
    let error = pipeline
        .run(&job_profile(), &[])
        .await
        .expect_err("empty batch must fail");
    assert!(matches!(error, PipelineError::EmptyBatch));
}

#[tokio::test]
async fn blank_job_title_is_fatal() {
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()));
    let mut job = job_profile();
    job.title = "  ".to_string();

    let error = pipeline
        .run(&job, &[STRONG_CV.to_string()])
        .await
        .expect_err("invalid profile must fail");
    assert!(matches!(error, PipelineError::InvalidProfile(_)));
}

#[tokio::test]
async fn scorer_failure_degrades_candidates_without_aborting() {
    let transport = Arc::new(MemoryTransport::default());
    let pipeline = build_pipeline(transport).with_scorer(Arc::new(FailingScorer));

    let outcome = pipeline
        .run(&job_profile(), &[STRONG_CV.to_string(), WEAK_CV.to_string()])
        .await
        .expect("scorer failures are not batch-fatal");

    assert_eq!(outcome.candidates.len(), 2);
    for candidate in &outcome.candidates {
        assert_eq!(candidate.match_score, 0);
        assert_eq!(candidate.status, CandidateStatus::Rejected);
        assert!(candidate
            .notes
            .iter()
            .any(|note| note.contains("analysis failed")));
    }
    assert_eq!(outcome.state.errors.len(), 2);
}

#[tokio::test]
async fn selected_candidates_are_notified() {
    let transport = Arc::new(MemoryTransport::default());
    let pipeline = build_pipeline(transport.clone());

    let outcome = pipeline
        .run(&job_profile(), &[STRONG_CV.to_string(), WEAK_CV.to_string()])
        .await
        .expect("batch completes");

    assert_eq!(outcome.selected.len(), 1);
    assert_eq!(outcome.state.notifications_sent, 1);
    let notified = &outcome.selected[0];
    assert_eq!(notified.status, CandidateStatus::Notified);

    let deliveries = transport.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].0, "maria.lopez@example.com");
    assert!(deliveries[0].1.subject.contains("Congratulations"));
}

#[tokio::test]
async fn rejected_candidates_can_receive_courtesy_notices() {
    let transport = Arc::new(MemoryTransport::default());
    let mut config = screening_config();
    config.notify_rejected = true;
    let pipeline = ScreeningPipeline::new(dispatcher(transport.clone()), config);

    let outcome = pipeline
        .run(&job_profile(), &[STRONG_CV.to_string(), WEAK_CV.to_string()])
        .await
        .expect("batch completes");

    assert_eq!(outcome.state.notifications_sent, 2);
    let rejected = &outcome.rejected[0];
    assert_eq!(rejected.status, CandidateStatus::Rejected);
    assert!(rejected
        .notes
        .iter()
        .any(|note| note.contains("rejection notice delivered")));

    let subjects: Vec<String> = transport
        .deliveries()
        .iter()
        .map(|(_, message)| message.subject.clone())
        .collect();
    assert!(subjects.iter().any(|s| s.contains("Update on your application")));
}

#[tokio::test]
async fn notification_failures_are_logged_not_fatal() {
    let pipeline = build_pipeline(Arc::new(FailingTransport));

    let outcome = pipeline
        .run(&job_profile(), &[STRONG_CV.to_string(), WEAK_CV.to_string()])
        .await
        .expect("delivery failures are not batch-fatal");

    assert_eq!(outcome.state.notifications_sent, 0);
    assert!(outcome
        .state
        .errors
        .iter()
        .any(|error| error.contains("notifying")));
    // Delivery never succeeded, so the candidate stays Selected.
    assert_eq!(outcome.selected[0].status, CandidateStatus::Selected);
}

#[tokio::test]
async fn scheduler_books_interviews_for_selected_candidates() {
    let transport = Arc::new(MemoryTransport::default());
    let calendar = Arc::new(BusinessHoursCalendar::default());
    let pipeline =
        build_pipeline(transport.clone()).with_scheduler(calendar.clone());

    let outcome = pipeline
        .run(&job_profile(), &[STRONG_CV.to_string(), WEAK_CV.to_string()])
        .await
        .expect("batch completes");

    assert_eq!(outcome.state.interviews_scheduled, 1);
    assert_eq!(outcome.selected[0].status, CandidateStatus::Scheduled);
    assert_eq!(calendar.bookings().len(), 1);

    let subjects: Vec<String> = transport
        .deliveries()
        .iter()
        .map(|(_, message)| message.subject.clone())
        .collect();
    assert!(subjects.iter().any(|s| s.contains("Interview invitation")));
    // Selection notice plus invitation.
    assert_eq!(outcome.state.notifications_sent, 2);
}

#[tokio::test]
async fn cancellation_between_stages_is_fatal() {
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()));
    let (handle, token) = cancellation();
    handle.cancel();

    let error = pipeline
        .run_with_cancel(&job_profile(), &[STRONG_CV.to_string()], &token)
        .await
        .expect_err("cancelled batch must fail");
    assert!(matches!(error, PipelineError::Cancelled { .. }));
}

#[tokio::test]
async fn report_renderer_receives_the_handoff() {
    let renderer = MemoryRenderer::default();
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()))
        .with_renderer(Arc::new(renderer.clone()));

    pipeline
        .run(&job_profile(), &[STRONG_CV.to_string(), WEAK_CV.to_string()])
        .await
        .expect("batch completes");

    let rendered = renderer.rendered.lock().expect("renderer mutex poisoned");
    assert_eq!(rendered.as_slice(), &[2]);
}

#[tokio::test]
async fn slugged_ids_derive_from_the_candidate_name() {
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()))
        .with_id_generator(Arc::new(crate::workflows::screening::domain::SluggedIdGenerator));

    let outcome = pipeline
        .run(&job_profile(), &[STRONG_CV.to_string()])
        .await
        .expect("batch completes");

    assert!(outcome.candidates[0].id.0.starts_with("marialopez-"));
}

#[tokio::test]
async fn degraded_extraction_still_produces_a_candidate() {
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()));
    let outcome = pipeline
        .run(&job_profile(), &["\n\n".to_string()])
        .await
        .expect("garbled input is not batch-fatal");

    assert_eq!(outcome.candidates.len(), 1);
    let degraded = &outcome.candidates[0];
    assert_eq!(degraded.name, "Unknown");
    assert_eq!(degraded.match_score, 0);
    assert_eq!(degraded.status, CandidateStatus::Rejected);
}
