use serde::{Deserialize, Serialize};
use tower_api_client::{Error as ApiError, StatusCode};

#[derive(Debug)]
pub enum SheetsApiError {
    Sheets(StatusCode, ErrorDetail),
    Internal(ApiError),
}

impl SheetsApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SheetsApiError::Sheets(status, _) => Some(*status),
            SheetsApiError::Internal(_) => None,
        }
    }
}

impl From<ApiError> for SheetsApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                // Proxies in front of the API answer with HTML, keep the raw body then
                let detail = serde_json::from_str::<ErrorResponse>(&detail)
                    .map(|response| response.error)
                    .unwrap_or_else(|_| ErrorDetail {
                        code: status.as_u16(),
                        message: detail,
                        status: None,
                    });
                SheetsApiError::Sheets(status, detail)
            }
            e => SheetsApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for SheetsApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsApiError::Internal(e) => write!(f, "Internal error: {}", e),
            SheetsApiError::Sheets(status, detail) => match &detail.status {
                Some(reason) => write!(f, "({}) {}: {}", status, reason, detail.message),
                None => write!(f, "({}) {}", status, detail.message),
            },
        }
    }
}

impl std::error::Error for SheetsApiError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
    pub status: Option<String>,
}
