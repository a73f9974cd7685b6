use async_trait::async_trait;
use chrono::{Duration, Utc};
use inquiry_auth::{AuthError, Credential, CredentialManager, TokenProvider, TokenStore};
use inquiry_server::config::Channel;
use inquiry_server::models::SubmissionRecord;
use inquiry_server::services::{Ack, ForwardError, Forwarder};
use inquiry_server::{create_router, AppState};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// How the stub forwarder answers
#[allow(dead_code)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum StubMode {
    Accept,
    Unreachable,
    Reject,
}

/// Forwarder double that records every record it is handed
#[allow(dead_code)]
pub struct StubForwarder {
    pub mode: StubMode,
    pub calls: AtomicUsize,
    pub received: Mutex<Vec<SubmissionRecord>>,
}

impl StubForwarder {
    #[allow(dead_code)]
    pub fn new(mode: StubMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Forwarder for StubForwarder {
    fn channel(&self) -> Channel {
        Channel::Webhook
    }

    async fn submit(&self, record: &SubmissionRecord) -> Result<Ack, ForwardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(record.clone());

        match self.mode {
            StubMode::Accept => Ok(Ack {
                channel: Channel::Webhook,
                location: None,
            }),
            StubMode::Unreachable => Err(ForwardError::Network("connection refused".to_string())),
            StubMode::Reject => Err(ForwardError::Upstream("relay answered 503".to_string())),
        }
    }
}

/// Token provider that accepts any code
#[derive(Default)]
pub struct FakeProvider {
    pub exchanges: AtomicUsize,
}

#[async_trait]
impl TokenProvider for FakeProvider {
    fn authorization_url(&self, csrf_state: &str) -> String {
        format!("https://accounts.example.test/auth?state={}", csrf_state)
    }

    async fn exchange_code(&self, code: &str) -> Result<Credential, AuthError> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        Ok(credential(&format!("exchanged-{}", code)))
    }

    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthError> {
        Ok(credential.clone())
    }
}

/// Token provider whose endpoint never answers
#[allow(dead_code)]
pub struct StalledProvider;

#[async_trait]
impl TokenProvider for StalledProvider {
    fn authorization_url(&self, csrf_state: &str) -> String {
        format!("https://accounts.example.test/auth?state={}", csrf_state)
    }

    async fn exchange_code(&self, _code: &str) -> Result<Credential, AuthError> {
        std::future::pending().await
    }

    async fn refresh(&self, _credential: &Credential) -> Result<Credential, AuthError> {
        std::future::pending().await
    }
}

#[allow(dead_code)]
pub fn credential(access_token: &str) -> Credential {
    Credential {
        access_token: access_token.to_string(),
        refresh_token: Some("refresh-token".to_string()),
        expiry: Utc::now() + Duration::hours(1),
        scope: None,
    }
}

/// Fresh token path in a private temp directory
#[allow(dead_code)]
pub fn token_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("inquiry-server-{}", uuid::Uuid::new_v4()))
        .join("token.json")
}

/// Credential manager backed by a throwaway token file and the fake provider
#[allow(dead_code)]
pub fn test_credentials(path: PathBuf) -> Arc<CredentialManager> {
    let store = TokenStore::new(path).unwrap();
    Arc::new(
        CredentialManager::new(store)
            .with_provider(Arc::new(FakeProvider::default()))
            .open_browser(false),
    )
}

/// Create a test app around the given forwarder, with no static files
#[allow(dead_code)]
pub fn create_test_app(forwarder: Arc<StubForwarder>) -> (axum::Router, AppState) {
    let state = AppState {
        forwarder,
        credentials: test_credentials(token_path()),
    };

    (create_router(state.clone(), None), state)
}

/// Serve `router` on an ephemeral local port, returning its base URL
#[allow(dead_code)]
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
