//! Per-condition verdicts from a hosted language model.
//!
//! The judge never fails a batch: request errors, timeouts, and unparseable
//! replies become [`Judgment::Failed`] for that condition only.

mod provider;
mod parse;
mod prompts;

pub use provider::LlmCompletionClient;
pub use parse::{parse_verdict, Verdict};
pub use prompts::build_judgment_prompt;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;

use super::domain::{ChecklistItem, Condition, Judgment};

/// Text-completion seam so the judge can run against fakes in tests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, JudgeError>;
}

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for Arc<T> {
    async fn complete(&self, prompt: &str) -> Result<String, JudgeError> {
        (**self).complete(prompt).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("completion request failed: {0}")]
    Request(String),
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),
    #[error("completion returned no text")]
    EmptyResponse,
    #[error("malformed verdict: {0}")]
    MalformedVerdict(String),
    #[error("unsupported LLM provider: {0}")]
    UnsupportedProvider(String),
}

/// Parallelism, retry, and timeout limits for judgment calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgePolicy {
    pub max_concurrency: usize,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub request_timeout: Duration,
}

impl Default for JudgePolicy {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            max_retries: 2,
            initial_backoff: Duration::from_millis(500),
            request_timeout: Duration::from_secs(60),
        }
    }
}

pub struct ConditionJudge<C> {
    client: C,
    policy: JudgePolicy,
}

impl<C> ConditionJudge<C>
where
    C: CompletionClient,
{
    pub fn new(client: C, policy: JudgePolicy) -> Self {
        Self { client, policy }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Judges every condition with bounded parallelism. Output order follows
    /// `conditions`, regardless of which call finishes first.
    pub async fn judge_all(&self, conditions: &[Condition], draft: &str) -> Vec<ChecklistItem> {
        let pending: Vec<BoxFuture<'_, ChecklistItem>> = conditions
            .iter()
            .map(|condition| self.judge_item(condition, draft).boxed())
            .collect();

        stream::iter(pending)
            .buffered(self.policy.max_concurrency.max(1))
            .collect()
            .await
    }

    async fn judge_item(&self, condition: &Condition, draft: &str) -> ChecklistItem {
        let judgment = self.judge(condition, draft).await;
        ChecklistItem::from_judgment(condition, judgment)
    }

    pub async fn judge(&self, condition: &Condition, draft: &str) -> Judgment {
        let prompt = build_judgment_prompt(condition, draft);

        match self.request_with_retry(condition, &prompt).await {
            Ok(verdict) => Judgment::Verdict {
                fulfilled: verdict.fulfilled,
                remarks: verdict.remarks,
            },
            Err(err) => {
                tracing::warn!(
                    condition = %condition.number,
                    error = %err,
                    "condition judgment failed"
                );
                Judgment::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    async fn request_with_retry(
        &self,
        condition: &Condition,
        prompt: &str,
    ) -> Result<Verdict, JudgeError> {
        let max_retries = self.policy.max_retries;
        let mut attempt = 0;

        loop {
            match self.request_once(prompt).await {
                Ok(verdict) => {
                    if attempt > 0 {
                        tracing::info!(
                            condition = %condition.number,
                            attempt,
                            "condition judgment succeeded after retry"
                        );
                    }
                    return Ok(verdict);
                }
                Err(err) if attempt < max_retries => {
                    let delay = self.policy.initial_backoff * 2u32.saturating_pow(attempt);
                    attempt += 1;
                    tracing::warn!(
                        condition = %condition.number,
                        attempt,
                        max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "condition judgment failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn request_once(&self, prompt: &str) -> Result<Verdict, JudgeError> {
        let timeout = self.policy.request_timeout;
        let raw = tokio::time::timeout(timeout, self.client.complete(prompt))
            .await
            .map_err(|_| JudgeError::Timeout(timeout))??;
        parse_verdict(&raw)
    }
}
