use async_trait::async_trait;
use inquiry_auth::CredentialManager;
use sheets_api::{
    endpoints::{values::AppendValuesResponse, InsertDataOption, ValueInputOption},
    Client, Request, SheetsApiError,
};
use std::sync::Arc;
use std::time::Duration;

use super::{Ack, ForwardError, Forwarder};
use crate::config::Channel;
use crate::models::SubmissionRecord;

/// Appends one row per submission through the spreadsheet API
pub struct SheetsForwarder {
    credentials: Arc<CredentialManager>,
    spreadsheet_id: Option<String>,
    range: String,
    base_url: String,
    timeout: Duration,
}

impl SheetsForwarder {
    pub fn new(credentials: Arc<CredentialManager>, spreadsheet_id: Option<String>) -> Self {
        Self {
            credentials,
            spreadsheet_id,
            range: "Sheet1!A:C".to_string(),
            base_url: sheets_api::BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn append(
        &self,
        spreadsheet_id: &str,
        record: &SubmissionRecord,
    ) -> Result<AppendValuesResponse, ForwardError> {
        let access_token = self.credentials.access_token().await?;
        let client = Client::with_base_url(&self.base_url, &access_token);

        let req = Request::values()
            .with_spreadsheet(spreadsheet_id)
            .append(self.range.as_str(), vec![record.row()])
            .value_input_option(ValueInputOption::Raw)
            .insert_data_option(InsertDataOption::InsertRows);

        Ok(client.send(req).await?)
    }
}

impl From<SheetsApiError> for ForwardError {
    fn from(err: SheetsApiError) -> Self {
        match err {
            SheetsApiError::Sheets(..) => ForwardError::Upstream(err.to_string()),
            SheetsApiError::Internal(_) => ForwardError::Network(err.to_string()),
        }
    }
}

#[async_trait]
impl Forwarder for SheetsForwarder {
    fn channel(&self) -> Channel {
        Channel::Sheets
    }

    async fn submit(&self, record: &SubmissionRecord) -> Result<Ack, ForwardError> {
        let spreadsheet_id = self
            .spreadsheet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ForwardError::Configuration("spreadsheet id is not set".to_string())
            })?;

        // One bound for the whole call, token refresh included
        let response = tokio::time::timeout(self.timeout, self.append(spreadsheet_id, record))
            .await
            .map_err(|_| {
                ForwardError::Network(format!("no answer within {:?}", self.timeout))
            })??;

        let location = response.updates.and_then(|updates| updates.updated_range);
        tracing::debug!(updated_range = ?location, "Row appended");

        Ok(Ack {
            channel: Channel::Sheets,
            location,
        })
    }
}
