use std::sync::Arc;

use super::common::*;
use crate::workflows::screening::report::{write_candidates_csv, ScreeningReport};

#[tokio::test]
async fn report_summarizes_the_batch() {
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()));
    let outcome = pipeline
        .run(&job_profile(), &[STRONG_CV.to_string(), WEAK_CV.to_string()])
        .await
        .expect("batch completes");

    let report = ScreeningReport::from_outcome(&outcome, 1);
    assert_eq!(report.job_title, "Backend Engineer");
    assert_eq!(report.totals.candidates, 2);
    assert_eq!(report.totals.selected, 1);
    assert_eq!(report.totals.rejected, 1);
    assert!((report.totals.average_match_score - 32.5).abs() < f32::EPSILON);
    assert_eq!(report.top_candidates.len(), 1);
    assert_eq!(report.top_candidates[0].name, "Maria Lopez");
}

#[tokio::test]
async fn csv_export_writes_one_row_per_candidate() {
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()));
    let outcome = pipeline
        .run(&job_profile(), &[STRONG_CV.to_string(), WEAK_CV.to_string()])
        .await
        .expect("batch completes");

    let mut buffer = Vec::new();
    write_candidates_csv(&outcome, &mut buffer).expect("csv export succeeds");
    let rendered = String::from_utf8(buffer).expect("csv is utf-8");

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 3); // header plus one row per candidate
    assert!(lines[0].starts_with("id,name,email"));
    assert!(rendered.contains("Maria Lopez"));
    assert!(rendered.contains("notified"));
    assert!(rendered.contains("Carlos Ruiz"));
    assert!(rendered.contains("rejected"));
}

#[tokio::test]
async fn empty_scores_average_to_zero() {
    let pipeline = build_pipeline(Arc::new(MemoryTransport::default()))
        .with_scorer(Arc::new(FailingScorer));
    let outcome = pipeline
        .run(&job_profile(), &[SPARSE_CV.to_string()])
        .await
        .expect("batch completes");

    let report = ScreeningReport::from_outcome(&outcome, 5);
    assert_eq!(report.totals.average_match_score, 0.0);
    assert!(!report.errors.is_empty());
}
