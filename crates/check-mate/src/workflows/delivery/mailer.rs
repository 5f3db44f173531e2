use async_trait::async_trait;
use serde::Serialize;

/// One rendered report addressed to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundReport {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Outbound transport for shareable reports.
#[async_trait]
pub trait ReportMailer: Send + Sync {
    async fn deliver(&self, report: OutboundReport) -> Result<(), DeliveryError>;
}

/// Stand-in used when no transport is configured. Every delivery is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredMailer;

#[async_trait]
impl ReportMailer for UnconfiguredMailer {
    async fn deliver(&self, _report: OutboundReport) -> Result<(), DeliveryError> {
        Err(DeliveryError::Unavailable)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),
    #[error("report delivery is not configured")]
    Unavailable,
    #[error("mail relay rejected the report with status {status}: {detail}")]
    Rejected { status: u16, detail: String },
    #[error("mail transport error: {0}")]
    Transport(String),
}
