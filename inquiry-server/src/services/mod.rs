pub mod sheets;
pub mod webhook;

pub use sheets::SheetsForwarder;
pub use webhook::WebhookForwarder;

use async_trait::async_trait;
use inquiry_auth::{AuthError, CredentialManager};
use std::sync::Arc;
use thiserror::Error;

use crate::config::{Channel, Configuration};
use crate::models::SubmissionRecord;

/// Upstream acknowledgement of a forwarded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub channel: Channel,
    /// Where the upstream says the row landed, if it says
    pub location: Option<String>,
}

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Credential unavailable: {0}")]
    Auth(#[from] AuthError),

    #[error("Upstream rejected submission: {0}")]
    Upstream(String),

    #[error("Upstream unreachable: {0}")]
    Network(String),

    #[error("Forwarding misconfigured: {0}")]
    Configuration(String),
}

impl ForwardError {
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::Auth(_) => "auth",
            ForwardError::Upstream(_) => "upstream",
            ForwardError::Network(_) => "network",
            ForwardError::Configuration(_) => "configuration",
        }
    }
}

/// One upstream store for submissions. Each call forwards exactly once.
#[async_trait]
pub trait Forwarder: Send + Sync {
    fn channel(&self) -> Channel;

    async fn submit(&self, record: &SubmissionRecord) -> Result<Ack, ForwardError>;
}

/// Pick the forwarding strategy for this deployment
pub fn build_forwarder(
    configuration: &Configuration,
    credentials: Arc<CredentialManager>,
) -> Result<Arc<dyn Forwarder>, ForwardError> {
    let timeout = configuration.server.upstream_timeout();
    let forwarding = &configuration.forwarding;

    match forwarding.channel {
        Channel::Webhook => {
            let url = forwarding
                .webhook_url
                .as_deref()
                .filter(|url| !url.trim().is_empty())
                .ok_or_else(|| {
                    ForwardError::Configuration("forwarding.webhook_url is required".to_string())
                })?;
            Ok(Arc::new(WebhookForwarder::new(url, timeout)?))
        }
        Channel::Sheets => Ok(Arc::new(
            SheetsForwarder::new(credentials, forwarding.spreadsheet_id.clone())
                .range(forwarding.range.clone())
                .base_url(forwarding.sheets_base_url.clone())
                .timeout(timeout),
        )),
    }
}
