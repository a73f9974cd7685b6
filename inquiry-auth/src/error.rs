use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("OAuth client is not configured")]
    NotConfigured,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Authorization in progress, complete the consent flow first")]
    AuthorizationPending,

    #[error("Missing authorization code")]
    MissingCode,

    #[error("Authorization state does not match the pending request")]
    StateMismatch,

    #[error("Provider rejected the authorization: {0}")]
    Denied(String),

    #[error("Token exchange failed: {0}")]
    Exchange(String),

    #[error("Token refresh failed: {0}")]
    Refresh(String),

    #[error("Token storage error: {0}")]
    TokenStorage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthError {
    /// Errors caused by the caller's callback parameters rather than the provider
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCode | AuthError::StateMismatch | AuthError::Denied(_)
        )
    }
}

impl
    From<
        oauth2::RequestTokenError<
            reqwest::Error,
            oauth2::StandardErrorResponse<oauth2::basic::BasicErrorResponseType>,
        >,
    > for AuthError
{
    fn from(
        err: oauth2::RequestTokenError<
            reqwest::Error,
            oauth2::StandardErrorResponse<oauth2::basic::BasicErrorResponseType>,
        >,
    ) -> Self {
        AuthError::Exchange(format!("Token request failed: {}", err))
    }
}
