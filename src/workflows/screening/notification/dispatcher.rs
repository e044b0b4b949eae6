use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::time::sleep;

use super::templates::{MessageTemplate, RenderedMessage, TemplateKind};
use crate::workflows::screening::cancel::CancelToken;
use crate::workflows::screening::domain::{Candidate, CandidateId};

/// Outbound delivery seam (SMTP, chat, webhook). Implementations own their
/// own timeout discipline.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send(&self, to: &str, message: &RenderedMessage) -> Result<(), TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("recipient address rejected: {0}")]
    InvalidRecipient(String),
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Transport that only records deliveries through tracing. Used by the CLI
/// demo path and anywhere a real transport is not wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTransport;

#[async_trait]
impl MessageTransport for LoggingTransport {
    async fn send(&self, to: &str, message: &RenderedMessage) -> Result<(), TransportError> {
        if to.trim().is_empty() {
            return Err(TransportError::InvalidRecipient(
                "empty recipient address".to_string(),
            ));
        }
        tracing::info!(%to, subject = %message.subject, "delivering message");
        Ok(())
    }
}

/// Bounded retry with exponential backoff between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay before the attempt following `completed_attempts`; the base
    /// delay doubles with each retry.
    pub fn delay_for(&self, completed_attempts: u32) -> Duration {
        let exponent = completed_attempts.saturating_sub(1).min(16);
        self.base_delay * 2u32.pow(exponent)
    }
}

/// Per-recipient delivery result. The bulk map carries one entry per input
/// candidate; callers never infer success from absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryOutcome {
    pub delivered: bool,
    pub attempts: u32,
    pub failure: Option<String>,
}

impl DeliveryOutcome {
    fn delivered(attempts: u32) -> Self {
        Self {
            delivered: true,
            attempts,
            failure: None,
        }
    }

    fn failed(reason: impl Into<String>, attempts: u32) -> Self {
        Self {
            delivered: false,
            attempts,
            failure: Some(reason.into()),
        }
    }
}

/// Sends templated messages to a list of candidates, isolating and retrying
/// per-recipient failures.
pub struct NotificationDispatcher {
    transport: Arc<dyn MessageTransport>,
    retry: RetryPolicy,
    inter_send_delay: Option<Duration>,
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn MessageTransport>) -> Self {
        Self {
            transport,
            retry: RetryPolicy::default(),
            inter_send_delay: None,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Rate-limit pause between consecutive recipients; never applied after
    /// the final item.
    pub fn with_inter_send_delay(mut self, delay: Duration) -> Self {
        self.inter_send_delay = Some(delay);
        self
    }

    /// Delivers `kind` to every candidate. The returned map covers every
    /// input candidate, whether delivered or failed.
    pub async fn send_bulk(
        &self,
        candidates: &[Candidate],
        kind: TemplateKind,
        job_title: &str,
        company_name: &str,
        cancel: &CancelToken,
    ) -> BTreeMap<CandidateId, DeliveryOutcome> {
        let mut outcomes = BTreeMap::new();
        let total = candidates.len();

        for (index, candidate) in candidates.iter().enumerate() {
            if cancel.is_cancelled() {
                outcomes.insert(
                    candidate.id.clone(),
                    DeliveryOutcome::failed("batch cancelled before delivery", 0),
                );
                continue;
            }

            let template = kind.for_candidate(candidate);
            let outcome = self
                .send_templated(candidate, &template, job_title, company_name, cancel)
                .await;
            outcomes.insert(candidate.id.clone(), outcome);

            if index + 1 < total && !cancel.is_cancelled() {
                if let Some(delay) = self.inter_send_delay {
                    let mut watcher = cancel.clone();
                    tokio::select! {
                        _ = sleep(delay) => {}
                        _ = watcher.cancelled() => {}
                    }
                }
            }
        }

        outcomes
    }

    /// Delivers one already-built template to one candidate with the same
    /// retry discipline as the bulk path.
    pub async fn send_templated(
        &self,
        candidate: &Candidate,
        template: &MessageTemplate,
        job_title: &str,
        company_name: &str,
        cancel: &CancelToken,
    ) -> DeliveryOutcome {
        let message = template.render(candidate, job_title, company_name);
        self.deliver(&candidate.email, &message, cancel).await
    }

    async fn deliver(
        &self,
        to: &str,
        message: &RenderedMessage,
        cancel: &CancelToken,
    ) -> DeliveryOutcome {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.transport.send(to, message).await {
                Ok(()) => return DeliveryOutcome::delivered(attempts),
                Err(error) if attempts >= self.retry.max_attempts => {
                    return DeliveryOutcome::failed(error.to_string(), attempts);
                }
                Err(error) => {
                    tracing::warn!(%to, attempts, error = %error, "delivery failed, backing off");
                    let delay = self.retry.delay_for(attempts);
                    let mut watcher = cancel.clone();
                    tokio::select! {
                        _ = sleep(delay) => {}
                        _ = watcher.cancelled() => {
                            return DeliveryOutcome::failed(
                                format!("cancelled during retry: {error}"),
                                attempts,
                            );
                        }
                    }
                }
            }
        }
    }
}
