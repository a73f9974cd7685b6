use serde::{Deserialize, Serialize};

// POST /api/submit
#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitResult {
    Success,
    Error,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub result: SubmitResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitResponse {
    pub fn success() -> Self {
        Self {
            result: SubmitResult::Success,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: SubmitResult::Error,
            message: Some(message.into()),
        }
    }
}

// GET /oauth2callback
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

// Health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub channel: String,
    pub authenticated: bool,
}
