use secrecy::SecretString;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[derive(Debug, Deserialize)]
pub struct OAuthConfiguration {
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_uri: String,

    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default = "default_scope")]
    pub scope: String,

    /// Bound on each token endpoint request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl OAuthConfiguration {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[derive(Debug, Deserialize)]
pub struct CredentialsConfiguration {
    /// Serialized credential, takes precedence over the token file
    #[serde(default)]
    pub token: Option<SecretString>,

    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
}

impl Default for CredentialsConfiguration {
    fn default() -> Self {
        Self {
            token: None,
            token_path: default_token_path(),
        }
    }
}

fn default_auth_url() -> String {
    GOOGLE_AUTH_URL.to_string()
}

fn default_token_url() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

fn default_scope() -> String {
    SPREADSHEETS_SCOPE.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_token_path() -> PathBuf {
    PathBuf::from("token.json")
}
