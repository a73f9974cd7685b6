use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "inquiry-form.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Link the visitor was heading to when the form was opened
    #[serde(default)]
    pub destination: Option<String>,

    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,

    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_redirect_delay_ms() -> u64 {
    1500
}

fn default_request_timeout_seconds() -> u64 {
    15
}

impl Settings {
    /// `inquiry-form.toml` in the working directory, or the file named by
    /// `INQUIRY_FORM_CONFIG`, overlaid with `INQUIRY_FORM__*` variables
    pub fn new() -> Result<Self, ConfigError> {
        let config_path = std::env::var("INQUIRY_FORM_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load(&config_path)
    }

    /// A missing file is not an error, every setting has a default
    pub fn load(config_path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("INQUIRY_FORM").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server_url.is_empty() {
            return Err("server_url is required".to_string());
        }
        if !self.server_url.starts_with("http") {
            return Err("server_url must be a valid HTTP(S) URL".to_string());
        }
        if let Some(destination) = &self.destination {
            if !destination.starts_with("http") {
                return Err("destination must be a valid HTTP(S) URL".to_string());
            }
        }
        Ok(())
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(1))
    }
}
