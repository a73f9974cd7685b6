use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::ServerError;

const REQUIRED_FIELDS: &str = "Name and Phone are required";

/// A validated inquiry, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    name: String,
    phone: String,
    timestamp: DateTime<Utc>,
}

/// JSON body posted to the webhook relay
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub time: String,
}

impl SubmissionRecord {
    /// Build a record from raw fields, stamping it with the current time.
    ///
    /// Only presence is checked here; format rules live in the client.
    pub fn from_fields(name: Option<&str>, phone: Option<&str>) -> Result<Self, ServerError> {
        Self::at(name, phone, Utc::now())
    }

    pub fn at(
        name: Option<&str>,
        phone: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ServerError> {
        let name = name.map(str::trim).unwrap_or_default();
        let phone = phone.map(str::trim).unwrap_or_default();

        if name.is_empty() || phone.is_empty() {
            return Err(ServerError::Validation(REQUIRED_FIELDS.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
            timestamp,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Spreadsheet row: `[name, phone, timestamp]`
    pub fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.phone.clone(),
            self.formatted_timestamp(),
        ]
    }

    pub fn webhook_payload(&self) -> WebhookPayload<'_> {
        WebhookPayload {
            name: &self.name,
            phone: &self.phone,
            time: self.formatted_timestamp(),
        }
    }
}
