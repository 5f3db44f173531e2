use chrono::{DateTime, Local};
use regex::Regex;
use serde::Serialize;
use std::sync::{Arc, OnceLock};

use super::mailer::{DeliveryError, OutboundReport, ReportMailer, UnconfiguredMailer};
use super::relay::HttpMailRelay;
use super::smtp::SmtpMailer;
use crate::config::{MailConfig, MailTransport};
use crate::workflows::assessment::report;
use crate::workflows::assessment::{
    AnalysisResult, ChecklistItem, Condition, ScoreCategory, ScoreCategoryKind, Scoring,
};

/// Acknowledgement returned once the mailer accepted a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub recipient: String,
    pub subject: String,
}

/// Renders analysis results into shareable documents and hands them to a mailer.
#[derive(Clone)]
pub struct ReportDeliveryService {
    mailer: Arc<dyn ReportMailer>,
    sender: String,
}

impl ReportDeliveryService {
    pub fn new(mailer: Arc<dyn ReportMailer>, sender: impl Into<String>) -> Self {
        Self {
            mailer,
            sender: sender.into(),
        }
    }

    /// Picks the mailer named by [`MailConfig::transport`]. Without SMTP
    /// credentials or a relay every share answers [`DeliveryError::Unavailable`].
    pub fn from_config(config: &MailConfig) -> Result<Self, DeliveryError> {
        let mailer: Arc<dyn ReportMailer> = match config.transport() {
            MailTransport::Smtp {
                host,
                port,
                password,
            } => {
                tracing::info!(host, port, "sharing reports over smtp");
                Arc::new(SmtpMailer::new(host, port, &config.sender, password)?)
            }
            MailTransport::Relay { url, token } => {
                tracing::info!(url, "sharing reports through the mail relay");
                Arc::new(HttpMailRelay::new(url, token.map(str::to_string))?)
            }
            MailTransport::Disabled => {
                tracing::info!("SENDER_PASSWORD and MAIL_RELAY_URL not set; report sharing disabled");
                Arc::new(UnconfiguredMailer)
            }
        };
        Ok(Self::new(mailer, config.sender.clone()))
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub async fn share(
        &self,
        result: &AnalysisResult,
        recipient: &str,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        self.share_at(result, recipient, Local::now()).await
    }

    pub async fn share_at(
        &self,
        result: &AnalysisResult,
        recipient: &str,
        analyzed_at: DateTime<Local>,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let recipient = validate_recipient(recipient)?;
        let document = report::shareable_document(result, analyzed_at);

        let outbound = OutboundReport {
            from: self.sender.clone(),
            to: recipient.clone(),
            subject: document.subject.clone(),
            html: document.html,
        };

        self.mailer.deliver(outbound).await.map_err(|err| {
            tracing::warn!(recipient = %recipient, error = %err, "report delivery failed");
            err
        })?;

        tracing::info!(
            recipient = %recipient,
            total_score = result.total_score,
            "analysis report delivered"
        );

        Ok(DeliveryReceipt {
            recipient,
            subject: document.subject,
        })
    }

    /// Sends a fixed sample report so operators can verify the relay.
    pub async fn send_test(&self, recipient: &str) -> Result<DeliveryReceipt, DeliveryError> {
        self.share(&sample_result(), recipient).await
    }
}

fn recipient_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@.][^\s@]*\.[^\s@]+$").expect("recipient regex compiles")
    })
}

/// Returns the trimmed address when it has the `local@domain.tld` shape.
pub fn validate_recipient(raw: &str) -> Result<String, DeliveryError> {
    let candidate = raw.trim();
    if candidate.ends_with('.') || !recipient_pattern().is_match(candidate) {
        return Err(DeliveryError::InvalidRecipient(candidate.to_string()));
    }
    Ok(candidate.to_string())
}

/// Fixed 85/100 result used by [`ReportDeliveryService::send_test`].
pub fn sample_result() -> AnalysisResult {
    let condition = Condition::new("1", "글자 수 800자 이상");
    let checklist = vec![ChecklistItem {
        condition_number: condition.label(),
        content: condition.content.clone(),
        fulfilled: true,
        remarks: "충족됨".to_string(),
    }];

    let scoring = Scoring {
        content_fidelity: ScoreCategory::new(ScoreCategoryKind::ContentFidelity, 20, ""),
        condition_fulfillment: ScoreCategory::new(ScoreCategoryKind::ConditionFulfillment, 25, ""),
        logical_composition: ScoreCategory::new(ScoreCategoryKind::LogicalComposition, 20, ""),
        grammar_expression: ScoreCategory::new(ScoreCategoryKind::GrammarExpression, 20, ""),
    };

    AnalysisResult {
        conditions: vec![condition],
        checklist,
        scoring,
        total_score: 85,
        max_total_score: 100,
        improvement_suggestions: vec!["테스트 이메일입니다.".to_string()],
    }
}
