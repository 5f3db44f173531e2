use check_mate::config::AppConfig;
use check_mate::error::AppError;
use check_mate::workflows::assessment::{AssessmentService, LlmCompletionClient};
use check_mate::workflows::delivery::ReportDeliveryService;
use check_mate::workflows::intake::TextExtractor;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wires the configured LLM client and report mailer into the assessment service.
pub(crate) fn build_assessment_service(
    config: &AppConfig,
) -> Result<Arc<AssessmentService<LlmCompletionClient>>, AppError> {
    let client = LlmCompletionClient::from_config(&config.llm)?;
    let delivery = ReportDeliveryService::from_config(&config.mail)?;

    Ok(Arc::new(AssessmentService::new(
        client,
        config.llm.judge_policy(),
        delivery,
    )))
}

pub(crate) fn build_extractor(config: &AppConfig) -> Arc<TextExtractor> {
    Arc::new(TextExtractor::from_config(&config.ocr))
}
