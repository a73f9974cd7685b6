use inquiry_auth::{CredentialsConfiguration, OAuthConfiguration};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub server: ServerConfiguration,

    #[serde(default)]
    pub oauth: Option<OAuthConfiguration>,

    #[serde(default)]
    pub credentials: CredentialsConfiguration,

    #[serde(default)]
    pub forwarding: ForwardingConfiguration,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfiguration {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout_seconds: u64,

    /// Directory served for any path not matched by the API
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per line, for log collectors
    Json,
}

/// Upstream channel used for every submission, fixed per deployment
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Webhook,
    Sheets,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Webhook => f.write_str("webhook"),
            Channel::Sheets => f.write_str("sheets"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ForwardingConfiguration {
    #[serde(default)]
    pub channel: Channel,

    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Checked per request so a missing id fails submissions, not startup
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    #[serde(default = "default_range")]
    pub range: String,

    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,
}

impl Default for ServerConfiguration {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upstream_timeout_seconds: default_upstream_timeout(),
            static_dir: None,
            log_format: LogFormat::default(),
        }
    }
}

impl Default for ForwardingConfiguration {
    fn default() -> Self {
        Self {
            channel: Channel::default(),
            webhook_url: None,
            spreadsheet_id: None,
            range: default_range(),
            sheets_base_url: default_sheets_base_url(),
        }
    }
}

impl ServerConfiguration {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds.max(1))
    }

    /// Configured static directory, or `public` when it exists
    pub fn static_root(&self) -> Option<PathBuf> {
        match &self.static_dir {
            Some(dir) => Some(dir.clone()),
            None => {
                let public = PathBuf::from("public");
                public.is_dir().then_some(public)
            }
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_upstream_timeout() -> u64 {
    10
}

fn default_range() -> String {
    "Sheet1!A:C".to_string()
}

fn default_sheets_base_url() -> String {
    sheets_api::BASE_URL.to_string()
}

impl Configuration {
    pub fn new() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(config::File::with_name("config"));
        }

        builder = builder.add_source(config::Environment::with_prefix("INQUIRY").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        let configuration: Configuration = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(configuration.server.port, 3000);
        assert_eq!(configuration.server.log_format, LogFormat::Text);
        assert_eq!(configuration.forwarding.channel, Channel::Webhook);
        assert_eq!(configuration.forwarding.range, "Sheet1!A:C");
        assert!(configuration.oauth.is_none());
        assert_eq!(
            configuration.credentials.token_path,
            PathBuf::from("token.json")
        );
    }

    #[test]
    fn toml_source_selects_sheets_channel() {
        let configuration: Configuration = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 8081
                upstream_timeout_seconds = 3
                log_format = "json"

                [forwarding]
                channel = "sheets"
                spreadsheet_id = "abc123"

                [oauth]
                client_id = "id"
                client_secret = "secret"
                redirect_uri = "http://localhost:8081/oauth2callback"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(configuration.server.port, 8081);
        assert_eq!(configuration.server.log_format, LogFormat::Json);
        assert_eq!(configuration.server.upstream_timeout(), Duration::from_secs(3));
        assert_eq!(configuration.forwarding.channel, Channel::Sheets);
        assert_eq!(
            configuration.forwarding.spreadsheet_id.as_deref(),
            Some("abc123")
        );
        let oauth = configuration.oauth.unwrap();
        assert_eq!(oauth.client_id, "id");
        assert!(oauth.token_url.starts_with("https://oauth2.googleapis.com"));
    }
}
