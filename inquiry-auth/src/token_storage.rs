use crate::common::Credential;
use crate::error::AuthError;
use chrono::Duration;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const EXPIRY_BUFFER: Duration = Duration::minutes(5);

pub struct TokenStore {
    token_path: PathBuf,
}

impl TokenStore {
    pub fn new(token_path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let token_path = token_path.into();

        // Create parent directory if it doesn't exist
        if let Some(parent) = token_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to create token directory: {}", e))
                })?;
            }
        }

        Ok(Self { token_path })
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }

    /// Write the credential to a sibling file and rename it over the token file,
    /// so readers only ever see the old or the new token
    pub fn save_token(&self, token: &Credential) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(token)?;
        let temp_path = self.temp_path();

        let written = self.write_temp(&temp_path, json.as_bytes());
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.token_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            AuthError::TokenStorage(format!("Failed to replace token file: {}", e))
        })?;

        tracing::debug!(path = %self.token_path.display(), "Token persisted");
        Ok(())
    }

    pub fn load_token(&self) -> Result<Option<Credential>, AuthError> {
        if !self.token_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.token_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to read token: {}", e)))?;

        let token: Credential = serde_json::from_str(&json)?;
        Ok(Some(token))
    }

    pub fn delete_token(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.token_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::TokenStorage(format!("Failed to delete token: {}", e))),
        }
    }

    pub fn is_token_expired(&self, token: &Credential) -> bool {
        // Treat tokens as expired 5 minutes early
        token.expires_within(EXPIRY_BUFFER)
    }

    fn write_temp(&self, temp_path: &Path, contents: &[u8]) -> Result<(), AuthError> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(temp_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to create token file: {}", e)))?;
        file.write_all(contents)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;
        file.sync_all()
            .map_err(|e| AuthError::TokenStorage(format!("Failed to flush token: {}", e)))?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .token_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "token.json".to_string());
        self.token_path.with_file_name(format!(".{}.tmp", file_name))
    }
}
