use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::assessment::judge::{CompletionClient, JudgeError, JudgePolicy};
use crate::workflows::assessment::AssessmentService;
use crate::workflows::delivery::{
    DeliveryError, OutboundReport, ReportDeliveryService, ReportMailer, UnconfiguredMailer,
};

pub(super) const LENGTH_CONDITION: &str = "조건 1. 글자 수 800자 이상 1200자 이하";
pub(super) const STRUCTURE_CONDITION: &str = "조건 2. 서론-본론-결론 구조로 작성할것";

pub(super) fn conditions_text() -> String {
    format!("{LENGTH_CONDITION}\n{STRUCTURE_CONDITION}")
}

/// 900 non-whitespace characters containing all three structural tokens.
pub(super) fn structured_draft() -> String {
    format!(
        "서론 {}\n본론 {}\n결론 {}",
        "가".repeat(300),
        "나".repeat(294),
        "다".repeat(300)
    )
}

pub(super) fn fast_policy() -> JudgePolicy {
    JudgePolicy {
        max_concurrency: 4,
        max_retries: 2,
        initial_backoff: Duration::ZERO,
        request_timeout: Duration::from_secs(5),
    }
}

pub(super) fn verdict_json(fulfilled: bool, remarks: &str) -> String {
    serde_json::json!({ "fulfilled": fulfilled, "remarks": remarks }).to_string()
}

/// Answers with the reply whose key appears in the prompt, else the fallback.
pub(super) struct ScriptedClient {
    replies: Vec<(String, String)>,
    fallback: String,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub(super) fn always(reply: impl Into<String>) -> Self {
        Self {
            replies: Vec::new(),
            fallback: reply.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn fulfilled() -> Self {
        Self::always(verdict_json(true, "조건을 충족합니다."))
    }

    pub(super) fn with_reply(mut self, key: &str, reply: impl Into<String>) -> Self {
        self.replies.push((key.to_string(), reply.into()));
        self
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &str) -> Result<String, JudgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone());
        Ok(reply)
    }
}

/// Fails every request.
#[derive(Default)]
pub(super) struct FailingClient {
    calls: AtomicUsize,
}

impl FailingClient {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for FailingClient {
    async fn complete(&self, _prompt: &str) -> Result<String, JudgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(JudgeError::Request("connection refused".to_string()))
    }
}

/// Fails the first `failures` requests, then answers with a fulfilled verdict.
pub(super) struct FlakyClient {
    failures: usize,
    calls: AtomicUsize,
}

impl FlakyClient {
    pub(super) fn new(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for FlakyClient {
    async fn complete(&self, _prompt: &str) -> Result<String, JudgeError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(JudgeError::Request("503 service unavailable".to_string()))
        } else {
            Ok(verdict_json(true, "재시도 후 충족"))
        }
    }
}

/// Sleeps per prompt key before answering and records peak parallelism.
pub(super) struct DelayedClient {
    delays: Vec<(String, Duration)>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl DelayedClient {
    pub(super) fn new(delays: Vec<(&str, Duration)>) -> Self {
        Self {
            delays: delays
                .into_iter()
                .map(|(key, delay)| (key.to_string(), delay))
                .collect(),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub(super) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for DelayedClient {
    async fn complete(&self, prompt: &str) -> Result<String, JudgeError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let (key, delay) = self
            .delays
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
            .cloned()
            .unwrap_or_else(|| ("unknown".to_string(), Duration::ZERO));
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(verdict_json(true, &key))
    }
}

#[derive(Default)]
pub(super) struct RecordingMailer {
    delivered: Mutex<Vec<OutboundReport>>,
}

impl RecordingMailer {
    pub(super) fn delivered(&self) -> Vec<OutboundReport> {
        self.delivered.lock().expect("mailer lock").clone()
    }
}

#[async_trait]
impl ReportMailer for RecordingMailer {
    async fn deliver(&self, report: OutboundReport) -> Result<(), DeliveryError> {
        self.delivered.lock().expect("mailer lock").push(report);
        Ok(())
    }
}

pub(super) struct RejectingMailer;

#[async_trait]
impl ReportMailer for RejectingMailer {
    async fn deliver(&self, _report: OutboundReport) -> Result<(), DeliveryError> {
        Err(DeliveryError::Rejected {
            status: 550,
            detail: "mailbox unavailable".to_string(),
        })
    }
}

pub(super) fn delivery(mailer: Arc<dyn ReportMailer>) -> ReportDeliveryService {
    ReportDeliveryService::new(mailer, "checkmate.app@gmail.com")
}

pub(super) fn build_service(
    client: ScriptedClient,
    mailer: Arc<dyn ReportMailer>,
) -> Arc<AssessmentService<ScriptedClient>> {
    Arc::new(AssessmentService::new(client, fast_policy(), delivery(mailer)))
}

pub(super) fn unconfigured_service() -> Arc<AssessmentService<ScriptedClient>> {
    build_service(ScriptedClient::fulfilled(), Arc::new(UnconfiguredMailer))
}

pub(super) async fn response_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, body)
}
