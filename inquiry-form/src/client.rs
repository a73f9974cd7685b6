use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::events::{Inquiry, SubmissionEvent};

#[derive(Debug, Error)]
pub enum SubmitClientError {
    #[error("HTTP client error: {0}")]
    Build(reqwest::Error),

    #[error("Request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Unreadable response: {0}")]
    Decode(reqwest::Error),
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    name: &'a str,
    phone: &'a str,
}

/// Body of every `/api/submit` answer, success or not
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SubmitReply {
    pub result: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitReply {
    pub fn is_success(&self) -> bool {
        self.result == "success"
    }
}

/// Posts inquiries to the submission endpoint
#[derive(Clone)]
pub struct SubmitClient {
    http_client: Client,
    endpoint: String,
}

impl SubmitClient {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, SubmitClientError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SubmitClientError::Build)?;

        Ok(Self {
            http_client,
            endpoint: format!("{}/api/submit", server_url.trim_end_matches('/')),
        })
    }

    /// One POST, no retries. Any JSON reply is returned whatever its status code.
    pub async fn submit(&self, inquiry: &Inquiry) -> Result<SubmitReply, SubmitClientError> {
        let req = SubmitRequest {
            name: &inquiry.name,
            phone: &inquiry.phone,
        };

        self.http_client
            .post(&self.endpoint)
            .json(&req)
            .send()
            .await
            .map_err(SubmitClientError::Transport)?
            .json::<SubmitReply>()
            .await
            .map_err(SubmitClientError::Decode)
    }
}

/// Classify a submit attempt for the reducer
pub fn submission_event(outcome: Result<SubmitReply, SubmitClientError>) -> SubmissionEvent {
    match outcome {
        Ok(reply) if reply.is_success() => SubmissionEvent::Accepted,
        Ok(reply) => SubmissionEvent::Rejected {
            detail: reply.message.unwrap_or(reply.result),
        },
        Err(e) => SubmissionEvent::NetworkFailed {
            detail: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_success_result_is_accepted() {
        let accepted = submission_event(Ok(SubmitReply {
            result: "success".to_string(),
            message: None,
        }));
        assert_eq!(accepted, SubmissionEvent::Accepted);

        let rejected = submission_event(Ok(SubmitReply {
            result: "error".to_string(),
            message: Some("Name and Phone are required".to_string()),
        }));
        assert_eq!(
            rejected,
            SubmissionEvent::Rejected {
                detail: "Name and Phone are required".to_string()
            }
        );
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = SubmitClient::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint, "http://localhost:3000/api/submit");
    }
}
