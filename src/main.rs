use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use talent_ai::config::AppConfig;
use talent_ai::error::AppError;
use talent_ai::telemetry;
use talent_ai::workflows::screening::{
    screening_router, BusinessHoursCalendar, CsvFileRenderer, JobProfile, LoggingTransport,
    NotificationDispatcher, ScreeningConfig, ScreeningOutcome, ScreeningPipeline, ScreeningReport,
};
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Agentic Talent Orchestrator",
    about = "Demonstrate and run the Agentic Talent Orchestrator from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Screen a batch of resume text files against a job profile
    Screen(ScreenArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ScreenArgs {
    /// Job profile as a JSON document
    #[arg(long)]
    job_profile: PathBuf,
    /// Resume text files to screen, in input order
    #[arg(required = true)]
    cv: Vec<PathBuf>,
    /// Override the configured selection threshold
    #[arg(long)]
    threshold: Option<i16>,
    /// Also send courtesy rejection notices
    #[arg(long)]
    notify_rejected: bool,
    /// Book interview slots for selected candidates
    #[arg(long)]
    schedule: bool,
    /// Export the ranked candidate table as CSV
    #[arg(long)]
    csv_out: Option<PathBuf>,
    /// Number of top candidates to list in the summary
    #[arg(long, default_value_t = 10)]
    top: usize,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Screen(args) => run_screening(args).await,
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let pipeline = Arc::new(build_pipeline(&config, None, false));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(screening_router(pipeline))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "agentic workflow orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_screening(args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        job_profile,
        cv,
        threshold,
        notify_rejected,
        schedule,
        csv_out,
        top,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(threshold) = threshold {
        config.screening.selection_threshold = threshold;
    }
    if notify_rejected {
        config.screening.notify_rejected = true;
    }

    let profile: JobProfile = serde_json::from_str(&std::fs::read_to_string(&job_profile)?)?;

    let mut cv_texts = Vec::with_capacity(cv.len());
    for path in &cv {
        cv_texts.push(std::fs::read_to_string(path)?);
    }

    let renderer = csv_out.map(CsvFileRenderer::new);
    let pipeline = build_pipeline(&config, renderer, schedule);

    let outcome = pipeline.run(&profile, &cv_texts).await?;
    let report = ScreeningReport::from_outcome(&outcome, top);
    render_screening_report(&report, &outcome);

    Ok(())
}

fn build_pipeline(
    config: &AppConfig,
    renderer: Option<CsvFileRenderer>,
    schedule: bool,
) -> ScreeningPipeline {
    let dispatcher = NotificationDispatcher::new(Arc::new(LoggingTransport));
    let screening_config = ScreeningConfig {
        selection_threshold: config.screening.selection_threshold,
        company_name: config.screening.company_name.clone(),
        notify_rejected: config.screening.notify_rejected,
        ..ScreeningConfig::default()
    };

    let mut pipeline = ScreeningPipeline::new(dispatcher, screening_config);
    if schedule {
        pipeline = pipeline.with_scheduler(Arc::new(BusinessHoursCalendar::default()));
    }
    if let Some(renderer) = renderer {
        pipeline = pipeline.with_renderer(Arc::new(renderer));
    }
    pipeline
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_screening_report(report: &ScreeningReport, outcome: &ScreeningOutcome) {
    println!("Screening report: {}", report.job_title);
    println!("Location: {}", report.job_location);
    println!(
        "Candidates: {} ({} selected, {} rejected)",
        report.totals.candidates, report.totals.selected, report.totals.rejected
    );
    println!("Average match score: {:.1}", report.totals.average_match_score);
    println!(
        "Notifications sent: {} | Interviews scheduled: {}",
        report.totals.notifications_sent, report.totals.interviews_scheduled
    );

    println!("\nTop candidates");
    for candidate in &report.top_candidates {
        println!(
            "- {} | {} | score {} | {}",
            candidate.id.0, candidate.name, candidate.match_score, candidate.status_label
        );
    }

    if report.errors.is_empty() {
        println!("\nErrors: none");
    } else {
        println!("\nErrors");
        for error in &report.errors {
            println!("- {error}");
        }
    }

    let unreachable: Vec<&str> = outcome
        .candidates
        .iter()
        .filter(|candidate| candidate.email.is_empty())
        .map(|candidate| candidate.name.as_str())
        .collect();
    if !unreachable.is_empty() {
        println!("\nCandidates without a contact email: {}", unreachable.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_profile_document_parses() {
        let raw = r#"{
            "title": "Backend Engineer",
            "requirements": ["Ship reliable services"],
            "skills": ["Python", "Docker"],
            "experience_years": 5,
            "languages": ["Spanish"],
            "location": "Remote",
            "description": "Server-side role"
        }"#;

        let profile: JobProfile = serde_json::from_str(raw).expect("profile parses");
        assert_eq!(profile.title, "Backend Engineer");
        assert_eq!(profile.skills.len(), 2);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body.get("status").and_then(|s| s.as_str()), Some("ok"));
    }
}
