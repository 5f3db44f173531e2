use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

use super::mailer::{DeliveryError, OutboundReport, ReportMailer};

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends reports as HTML mail over SMTP with STARTTLS, logging in as the sender.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpMailer {
    pub fn new(host: &str, port: u16, username: &str, password: &str) -> Result<Self, DeliveryError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|err| DeliveryError::Transport(format!("smtp relay {host}: {err}")))?
            .port(port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self {
            transport,
            host: host.to_string(),
        })
    }
}

pub(crate) fn build_message(report: &OutboundReport) -> Result<Message, DeliveryError> {
    let from: Mailbox = report
        .from
        .parse()
        .map_err(|err| DeliveryError::Transport(format!("sender address {}: {err}", report.from)))?;
    let to: Mailbox = report
        .to
        .parse()
        .map_err(|_| DeliveryError::InvalidRecipient(report.to.clone()))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(report.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(report.html.clone())
        .map_err(|err| DeliveryError::Transport(format!("build message: {err}")))
}

#[async_trait]
impl ReportMailer for SmtpMailer {
    async fn deliver(&self, report: OutboundReport) -> Result<(), DeliveryError> {
        let message = build_message(&report)?;

        tracing::debug!(host = %self.host, to = %report.to, "sending report over smtp");
        self.transport.send(message).await.map_err(|err| {
            tracing::warn!(host = %self.host, error = %err, "smtp server refused report");
            DeliveryError::Transport(err.to_string())
        })?;
        Ok(())
    }
}
