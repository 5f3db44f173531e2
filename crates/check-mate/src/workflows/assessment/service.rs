use chrono::Local;
use serde::{Deserialize, Serialize};

use super::analyzer::PerformanceAnalyzer;
use super::domain::AnalysisResult;
use super::judge::{CompletionClient, JudgePolicy};
use super::report::{self, RenderedReport};
use crate::workflows::delivery::{DeliveryError, DeliveryReceipt, ReportDeliveryService};

/// Shown when either the requirements or the draft is blank.
pub const MISSING_INPUT_MESSAGE: &str = "수행평가 요구조건과 초안을 모두 입력해주세요.";

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub conditions_text: String,
    pub draft_text: String,
}

/// Analysis result plus both renderings, as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    #[serde(flatten)]
    pub report: RenderedReport,
}

/// Front door for the analyze, render, and share operations.
pub struct AssessmentService<C> {
    analyzer: PerformanceAnalyzer<C>,
    delivery: ReportDeliveryService,
}

impl<C> AssessmentService<C>
where
    C: CompletionClient + 'static,
{
    pub fn new(client: C, policy: JudgePolicy, delivery: ReportDeliveryService) -> Self {
        Self {
            analyzer: PerformanceAnalyzer::new(client, policy),
            delivery,
        }
    }

    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, AssessmentServiceError> {
        if request.conditions_text.trim().is_empty() || request.draft_text.trim().is_empty() {
            return Err(AssessmentServiceError::MissingInput);
        }

        let result = self
            .analyzer
            .analyze(&request.conditions_text, &request.draft_text)
            .await;
        let report = report::render(&result, Local::now());

        Ok(AnalysisOutcome { result, report })
    }

    pub fn render(&self, result: &AnalysisResult) -> RenderedReport {
        report::render_now(result)
    }

    pub async fn share(
        &self,
        result: &AnalysisResult,
        recipient: &str,
    ) -> Result<DeliveryReceipt, AssessmentServiceError> {
        Ok(self.delivery.share(result, recipient).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("{}", MISSING_INPUT_MESSAGE)]
    MissingInput,
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
