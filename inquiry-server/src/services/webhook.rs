use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{Ack, ForwardError, Forwarder};
use crate::config::Channel;
use crate::models::SubmissionRecord;

/// Posts submissions to an unauthenticated relay that owns persistence
pub struct WebhookForwarder {
    http_client: Client,
    url: String,
}

impl WebhookForwarder {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ForwardError> {
        reqwest::Url::parse(url)
            .map_err(|e| ForwardError::Configuration(format!("Invalid webhook URL: {}", e)))?;

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ForwardError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: url.to_string(),
        })
    }
}

/// The relay must answer 2xx with JSON; an object carrying `result` must say `success`
fn check_contract(body: &Value) -> Result<(), ForwardError> {
    match body.get("result") {
        None => Ok(()),
        Some(Value::String(result)) if result == "success" => Ok(()),
        Some(other) => {
            let detail = body
                .get("message")
                .or_else(|| body.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string());
            Err(ForwardError::Upstream(format!("relay reported failure: {}", detail)))
        }
    }
}

#[async_trait]
impl Forwarder for WebhookForwarder {
    fn channel(&self) -> Channel {
        Channel::Webhook
    }

    async fn submit(&self, record: &SubmissionRecord) -> Result<Ack, ForwardError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(&record.webhook_payload())
            .send()
            .await
            .map_err(|e| ForwardError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Upstream(format!("relay answered {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ForwardError::Upstream(format!("relay answered non-JSON: {}", e)))?;

        tracing::debug!(upstream = %body, "Webhook relay response");
        check_contract(&body)?;

        Ok(Ack {
            channel: Channel::Webhook,
            location: None,
        })
    }
}
