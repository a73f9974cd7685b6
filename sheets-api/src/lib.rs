pub mod endpoints;
mod error;
pub mod repositories;

pub use crate::error::SheetsApiError;
use repositories::*;
use secrecy::{ExposeSecret, SecretString};
use tower_api_client::{Client as ApiClient, Request as ApiRequest};

pub const BASE_URL: &str = "https://sheets.googleapis.com/v4";

pub struct Client {
    inner: ApiClient,
}

impl Client {
    pub fn new(access_token: &SecretString) -> Self {
        Self::with_base_url(BASE_URL, access_token)
    }

    /// Point the client at a different API root (emulators, test stubs)
    pub fn with_base_url(base_url: &str, access_token: &SecretString) -> Self {
        Self {
            inner: ApiClient::new(base_url).bearer_auth(access_token.expose_secret()),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, SheetsApiError>
    where
        R: ApiRequest,
    {
        self.inner.send(request).await.map_err(From::from)
    }
}

pub struct Request;

impl Request {
    pub fn values() -> ValuesRepository {
        ValuesRepository::new()
    }
}
