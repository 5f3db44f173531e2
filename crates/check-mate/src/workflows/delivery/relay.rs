use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::mailer::{DeliveryError, OutboundReport, ReportMailer};

const RELAY_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts reports as JSON (`{from, to, subject, html}`) to an HTTP mail relay.
pub struct HttpMailRelay {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpMailRelay {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .user_agent(concat!("check-mate/", env!("CARGO_PKG_VERSION")))
            .timeout(RELAY_TIMEOUT)
            .build()
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
        })
    }
}

#[async_trait]
impl ReportMailer for HttpMailRelay {
    async fn deliver(&self, report: OutboundReport) -> Result<(), DeliveryError> {
        let mut request = self.client.post(&self.endpoint).json(&report);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(endpoint = %self.endpoint, to = %report.to, "posting report to mail relay");
        let response = request
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        tracing::warn!(
            endpoint = %self.endpoint,
            status = %status,
            "mail relay rejected report"
        );
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}
