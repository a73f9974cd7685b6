use secrecy::{ExposeSecret, SecretString};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::common::{AuthStatus, Credential, CredentialSource};
use crate::error::AuthError;
use crate::oauth_client::{OAuthClient, TokenProvider};
use crate::token_storage::TokenStore;

enum AuthState {
    Unauthenticated,
    Authorizing {
        csrf_state: String,
        authorization_url: String,
    },
    Authenticated {
        credential: Credential,
        source: CredentialSource,
    },
}

impl AuthState {
    fn status(&self) -> AuthStatus {
        match self {
            AuthState::Unauthenticated => AuthStatus::Unauthenticated,
            AuthState::Authorizing {
                authorization_url, ..
            } => AuthStatus::Authorizing {
                authorization_url: authorization_url.clone(),
            },
            AuthState::Authenticated { credential, source } => AuthStatus::Authenticated {
                source: *source,
                expiry: credential.expiry,
            },
        }
    }
}

/// Owns the spreadsheet API credential for the whole process.
///
/// State machine: `Unauthenticated -> Authorizing -> Authenticated`. Every
/// transition (authorize, callback, refresh) happens under one async mutex, so
/// concurrent requests observe the same state and never race to re-authorize.
/// Provider calls made under the lock are bounded by `provider_timeout`.
pub struct CredentialManager {
    store: TokenStore,
    env_token: Option<SecretString>,
    provider: Option<Arc<dyn TokenProvider>>,
    provider_timeout: Duration,
    open_browser: bool,
    state: Mutex<AuthState>,
}

const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

impl CredentialManager {
    pub fn new(store: TokenStore) -> Self {
        Self {
            store,
            env_token: None,
            provider: None,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            open_browser: true,
            state: Mutex::new(AuthState::Unauthenticated),
        }
    }

    pub fn with_env_token(mut self, token: Option<SecretString>) -> Self {
        self.env_token = token;
        self
    }

    pub fn with_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Whether `authorize` tries to launch the system browser
    pub fn open_browser(mut self, open_browser: bool) -> Self {
        self.open_browser = open_browser;
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn status(&self) -> AuthStatus {
        self.state.lock().await.status()
    }

    /// Acquire a credential from the environment, the token file, or an
    /// interactive consent flow, in that order.
    ///
    /// Unusable sources are logged and skipped. Without any usable credential
    /// and no OAuth client the manager stays unauthenticated.
    pub async fn authorize(&self) -> AuthStatus {
        let mut state = self.state.lock().await;

        if !matches!(*state, AuthState::Unauthenticated) {
            return state.status();
        }

        if let Some(credential) = self.from_environment() {
            tracing::info!("Using credential supplied by the environment");
            *state = AuthState::Authenticated {
                credential,
                source: CredentialSource::Environment,
            };
            return state.status();
        }

        if let Some(credential) = self.from_token_file() {
            tracing::info!(path = %self.store.path().display(), "Using persisted credential");
            *state = AuthState::Authenticated {
                credential,
                source: CredentialSource::TokenFile,
            };
            return state.status();
        }

        let Some(provider) = &self.provider else {
            tracing::warn!("No usable credential and no OAuth client configured");
            return state.status();
        };

        let csrf_state = OAuthClient::generate_state_token();
        let authorization_url = provider.authorization_url(&csrf_state);

        tracing::info!(
            authorization_url = %authorization_url,
            "Authorize spreadsheet access by visiting this URL"
        );
        if self.open_browser {
            if let Err(e) = open::that(&authorization_url) {
                tracing::warn!(error = %e, "Failed to open browser automatically");
            }
        }

        *state = AuthState::Authorizing {
            csrf_state,
            authorization_url,
        };
        state.status()
    }

    /// Complete the consent flow with the code returned to the redirect URI
    pub async fn handle_callback(
        &self,
        code: Option<&str>,
        returned_state: Option<&str>,
    ) -> Result<AuthStatus, AuthError> {
        let code = code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .ok_or(AuthError::MissingCode)?;
        let provider = self.provider.as_ref().ok_or(AuthError::NotConfigured)?;

        let mut state = self.state.lock().await;

        match &*state {
            AuthState::Authorizing { csrf_state, .. } => {
                if returned_state != Some(csrf_state.as_str()) {
                    tracing::warn!("OAuth callback state mismatch");
                    return Err(AuthError::StateMismatch);
                }
            }
            // Nothing was requested, a stray callback must not replace a working credential
            AuthState::Authenticated { .. } => {
                tracing::warn!("OAuth callback received while already authenticated");
                return Err(AuthError::StateMismatch);
            }
            AuthState::Unauthenticated => {
                tracing::info!("OAuth callback received without a pending authorization")
            }
        }

        let credential = self
            .bounded(provider.exchange_code(code))
            .await
            .map_err(AuthError::Exchange)??;

        if let Err(e) = self.store.save_token(&credential) {
            // The credential is still good for this process
            tracing::error!(error = %e, "Failed to persist credential");
        }

        *state = AuthState::Authenticated {
            credential,
            source: CredentialSource::Exchange,
        };

        tracing::info!("OAuth authorization completed");
        Ok(state.status())
    }

    /// Bearer token for the spreadsheet API, refreshed first when close to expiry
    pub async fn access_token(&self) -> Result<SecretString, AuthError> {
        let mut state = self.state.lock().await;

        match &mut *state {
            AuthState::Unauthenticated => Err(AuthError::Unauthenticated),
            AuthState::Authorizing { .. } => Err(AuthError::AuthorizationPending),
            AuthState::Authenticated { credential, source } => {
                if self.store.is_token_expired(credential) {
                    let provider = self.provider.as_ref().ok_or_else(|| {
                        AuthError::Refresh(
                            "Credential expired and no OAuth client is configured".to_string(),
                        )
                    })?;
                    if !credential.can_refresh() {
                        return Err(AuthError::Refresh(
                            "Credential expired and has no refresh token".to_string(),
                        ));
                    }

                    tracing::info!("Refreshing expiring credential");
                    let refreshed = self
                        .bounded(provider.refresh(credential))
                        .await
                        .map_err(AuthError::Refresh)?
                        .map_err(|e| match e {
                            AuthError::Refresh(msg) => AuthError::Refresh(msg),
                            other => AuthError::Refresh(other.to_string()),
                        })?;

                    if let Err(e) = self.store.save_token(&refreshed) {
                        tracing::error!(error = %e, "Failed to persist refreshed credential");
                    }

                    *credential = refreshed;
                    *source = CredentialSource::Refresh;
                }

                Ok(SecretString::from(credential.access_token.clone()))
            }
        }
    }

    // Err carries the message for a provider that never answered
    async fn bounded<T>(&self, call: impl Future<Output = T>) -> Result<T, String> {
        let timeout = self.provider_timeout;
        tokio::time::timeout(timeout, call).await.map_err(|_| {
            tracing::warn!(?timeout, "Token endpoint did not answer");
            format!("no answer from token endpoint within {:?}", timeout)
        })
    }

    fn from_environment(&self) -> Option<Credential> {
        let blob = self.env_token.as_ref()?;
        if blob.expose_secret().trim().is_empty() {
            return None;
        }

        match serde_json::from_str::<Credential>(blob.expose_secret()) {
            Ok(credential) => self.usable(credential, "environment"),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed credential from environment");
                None
            }
        }
    }

    fn from_token_file(&self) -> Option<Credential> {
        match self.store.load_token() {
            Ok(Some(credential)) => {
                // Expired with nothing to refresh it: the file can never be used again
                if self.store.is_token_expired(&credential) && !credential.can_refresh() {
                    tracing::warn!(
                        path = %self.store.path().display(),
                        "Removing expired token file without refresh token"
                    );
                    if let Err(e) = self.store.delete_token() {
                        tracing::warn!(error = %e, "Could not remove stale token file");
                    }
                    return None;
                }
                self.usable(credential, "token file")
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(
                    path = %self.store.path().display(),
                    error = %e,
                    "Ignoring unreadable token file"
                );
                None
            }
        }
    }

    // An expired credential only counts if it can be refreshed
    fn usable(&self, credential: Credential, origin: &str) -> Option<Credential> {
        if credential.access_token.is_empty() {
            tracing::warn!(origin, "Ignoring credential without access token");
            return None;
        }
        if self.store.is_token_expired(&credential)
            && !(credential.can_refresh() && self.provider.is_some())
        {
            tracing::warn!(origin, "Ignoring expired credential that cannot be refreshed");
            return None;
        }
        Some(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeProvider {
        exchanges: AtomicUsize,
        refreshes: AtomicUsize,
        reject: bool,
    }

    #[async_trait]
    impl TokenProvider for FakeProvider {
        fn authorization_url(&self, csrf_state: &str) -> String {
            format!("https://accounts.example.test/auth?state={}", csrf_state)
        }

        async fn exchange_code(&self, code: &str) -> Result<Credential, AuthError> {
            self.exchanges.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                return Err(AuthError::Exchange("invalid_grant".to_string()));
            }
            Ok(credential(&format!("exchanged-{}", code), Duration::hours(1)))
        }

        async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthError> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                return Err(AuthError::Refresh("invalid_grant".to_string()));
            }
            Ok(Credential {
                access_token: "refreshed".to_string(),
                refresh_token: credential.refresh_token.clone(),
                expiry: Utc::now() + Duration::hours(1),
                scope: credential.scope.clone(),
            })
        }
    }

    // Token endpoint that accepts the connection and never answers
    struct StalledProvider;

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

    fn credential(access_token: &str, lifetime: Duration) -> Credential {
        Credential {
            access_token: access_token.to_string(),
            refresh_token: Some("refresh-token".to_string()),
            expiry: Utc::now() + lifetime,
            scope: None,
        }
    }

    fn token_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("inquiry-auth-{}", uuid::Uuid::new_v4()))
            .join("token.json")
    }

    fn env_blob(credential: &Credential) -> Option<SecretString> {
        Some(SecretString::from(serde_json::to_string(credential).unwrap()))
    }

    fn pending_state(status: &AuthStatus) -> String {
        match status {
            AuthStatus::Authorizing { authorization_url } => authorization_url
                .split("state=")
                .nth(1)
                .unwrap()
                .to_string(),
            other => panic!("expected authorizing, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn environment_token_takes_precedence_over_file() {
        let path = token_path();
        let store = TokenStore::new(&path).unwrap();
        store
            .save_token(&credential("from-file", Duration::hours(1)))
            .unwrap();

        let manager = CredentialManager::new(store)
            .with_env_token(env_blob(&credential("from-env", Duration::hours(1))));

        let status = manager.authorize().await;

        assert!(matches!(
            status,
            AuthStatus::Authenticated {
                source: CredentialSource::Environment,
                ..
            }
        ));
        assert_eq!(
            manager.access_token().await.unwrap().expose_secret(),
            "from-env"
        );
    }

    #[tokio::test]
    async fn malformed_environment_token_falls_back_to_file() {
        let path = token_path();
        let store = TokenStore::new(&path).unwrap();
        store
            .save_token(&credential("from-file", Duration::hours(1)))
            .unwrap();

        let manager = CredentialManager::new(store)
            .with_env_token(Some(SecretString::from("{not json".to_string())));

        let status = manager.authorize().await;

        assert!(matches!(
            status,
            AuthStatus::Authenticated {
                source: CredentialSource::TokenFile,
                ..
            }
        ));
        assert_eq!(
            manager.access_token().await.unwrap().expose_secret(),
            "from-file"
        );
    }

    #[tokio::test]
    async fn expired_token_file_without_refresh_token_is_removed() {
        let path = token_path();
        let store = TokenStore::new(&path).unwrap();
        store
            .save_token(&Credential {
                refresh_token: None,
                ..credential("stale", -Duration::hours(1))
            })
            .unwrap();

        let manager = CredentialManager::new(store);

        assert_eq!(manager.authorize().await, AuthStatus::Unauthenticated);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn no_sources_and_no_client_stays_unauthenticated() {
        let manager = CredentialManager::new(TokenStore::new(token_path()).unwrap());

        assert_eq!(manager.authorize().await, AuthStatus::Unauthenticated);
        assert!(matches!(
            manager.access_token().await,
            Err(AuthError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn interactive_flow_is_pending_until_callback() {
        let provider = Arc::new(FakeProvider::default());
        let path = token_path();
        let manager = CredentialManager::new(TokenStore::new(&path).unwrap())
            .with_provider(provider.clone())
            .open_browser(false);

        let status = manager.authorize().await;
        let csrf_state = pending_state(&status);

        assert!(matches!(
            manager.access_token().await,
            Err(AuthError::AuthorizationPending)
        ));

        let status = manager
            .handle_callback(Some("abc"), Some(&csrf_state))
            .await
            .unwrap();

        assert!(status.is_authenticated());
        assert_eq!(
            manager.access_token().await.unwrap().expose_secret(),
            "exchanged-abc"
        );
        assert_eq!(provider.exchanges.load(Ordering::SeqCst), 1);

        // Persisted for the next process
        let stored = TokenStore::new(&path).unwrap().load_token().unwrap().unwrap();
        assert_eq!(stored.access_token, "exchanged-abc");
    }

    #[tokio::test]
    async fn concurrent_authorize_calls_share_one_flow() {
        let manager = Arc::new(
            CredentialManager::new(TokenStore::new(token_path()).unwrap())
                .with_provider(Arc::new(FakeProvider::default()))
                .open_browser(false),
        );

        let (first, second) = tokio::join!(manager.authorize(), manager.authorize());

        assert_eq!(pending_state(&first), pending_state(&second));
    }

    #[tokio::test]
    async fn callback_without_code_is_rejected() {
        let provider = Arc::new(FakeProvider::default());
        let manager = CredentialManager::new(TokenStore::new(token_path()).unwrap())
            .with_provider(provider.clone())
            .open_browser(false);
        manager.authorize().await;

        assert!(matches!(
            manager.handle_callback(None, None).await,
            Err(AuthError::MissingCode)
        ));
        assert!(matches!(
            manager.handle_callback(Some(""), None).await,
            Err(AuthError::MissingCode)
        ));
        assert_eq!(provider.exchanges.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn callback_with_wrong_state_is_rejected() {
        let provider = Arc::new(FakeProvider::default());
        let manager = CredentialManager::new(TokenStore::new(token_path()).unwrap())
            .with_provider(provider.clone())
            .open_browser(false);
        manager.authorize().await;

        assert!(matches!(
            manager.handle_callback(Some("abc"), Some("forged")).await,
            Err(AuthError::StateMismatch)
        ));
        assert_eq!(provider.exchanges.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejected_exchange_leaves_flow_pending() {
        let provider = Arc::new(FakeProvider {
            reject: true,
            ..Default::default()
        });
        let manager = CredentialManager::new(TokenStore::new(token_path()).unwrap())
            .with_provider(provider)
            .open_browser(false);
        let csrf_state = pending_state(&manager.authorize().await);

        let result = manager.handle_callback(Some("abc"), Some(&csrf_state)).await;

        assert!(matches!(result, Err(AuthError::Exchange(_))));
        assert!(matches!(
            manager.status().await,
            AuthStatus::Authorizing { .. }
        ));
    }

    #[tokio::test]
    async fn expiring_credential_is_refreshed_and_persisted() {
        let provider = Arc::new(FakeProvider::default());
        let path = token_path();
        let store = TokenStore::new(&path).unwrap();
        store
            .save_token(&credential("stale", Duration::minutes(1)))
            .unwrap();

        let manager = CredentialManager::new(store).with_provider(provider.clone());
        manager.authorize().await;

        let token = manager.access_token().await.unwrap();

        assert_eq!(token.expose_secret(), "refreshed");
        assert_eq!(provider.refreshes.load(Ordering::SeqCst), 1);
        assert!(matches!(
            manager.status().await,
            AuthStatus::Authenticated {
                source: CredentialSource::Refresh,
                ..
            }
        ));
        let stored = TokenStore::new(&path).unwrap().load_token().unwrap().unwrap();
        assert_eq!(stored.access_token, "refreshed");
        assert_eq!(stored.refresh_token.as_deref(), Some("refresh-token"));
    }

    #[tokio::test]
    async fn refresh_failure_is_an_auth_error() {
        let provider = Arc::new(FakeProvider {
            reject: true,
            ..Default::default()
        });
        let manager = CredentialManager::new(TokenStore::new(token_path()).unwrap())
            .with_env_token(env_blob(&credential("stale", Duration::minutes(1))))
            .with_provider(provider);
        manager.authorize().await;

        assert!(matches!(
            manager.access_token().await,
            Err(AuthError::Refresh(_))
        ));
    }

    #[tokio::test]
    async fn expired_credential_without_client_is_skipped() {
        let manager = CredentialManager::new(TokenStore::new(token_path()).unwrap())
            .with_env_token(env_blob(&credential("expired", -Duration::hours(1))));

        assert_eq!(manager.authorize().await, AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn stalled_refresh_gives_up_and_releases_the_lock() {
        let manager = CredentialManager::new(TokenStore::new(token_path()).unwrap())
            .with_env_token(env_blob(&credential("stale", Duration::minutes(1))))
            .with_provider(Arc::new(StalledProvider))
            .provider_timeout(std::time::Duration::from_millis(50));
        manager.authorize().await;

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            manager.access_token(),
        )
        .await
        .expect("refresh was not bounded");

        match result {
            Err(AuthError::Refresh(msg)) => assert!(msg.contains("no answer")),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
        // The old credential is kept for the next attempt
        assert!(manager.status().await.is_authenticated());
    }

    #[tokio::test]
    async fn stalled_exchange_gives_up_and_keeps_flow_pending() {
        let manager = CredentialManager::new(TokenStore::new(token_path()).unwrap())
            .with_provider(Arc::new(StalledProvider))
            .provider_timeout(std::time::Duration::from_millis(50))
            .open_browser(false);
        let csrf_state = pending_state(&manager.authorize().await);

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            manager.handle_callback(Some("abc"), Some(&csrf_state)),
        )
        .await
        .expect("exchange was not bounded");

        assert!(matches!(result, Err(AuthError::Exchange(_))));
        assert!(matches!(
            manager.status().await,
            AuthStatus::Authorizing { .. }
        ));
    }

    #[tokio::test]
    async fn callback_while_authenticated_keeps_current_credential() {
        let provider = Arc::new(FakeProvider::default());
        let manager = CredentialManager::new(TokenStore::new(token_path()).unwrap())
            .with_env_token(env_blob(&credential("working", Duration::hours(1))))
            .with_provider(provider.clone());
        manager.authorize().await;

        assert!(matches!(
            manager.handle_callback(Some("stray"), None).await,
            Err(AuthError::StateMismatch)
        ));
        assert_eq!(provider.exchanges.load(Ordering::SeqCst), 0);
        assert_eq!(
            manager.access_token().await.unwrap().expose_secret(),
            "working"
        );
    }

    #[tokio::test]
    async fn callback_after_restart_is_still_exchanged() {
        let provider = Arc::new(FakeProvider::default());
        let manager = CredentialManager::new(TokenStore::new(token_path()).unwrap())
            .with_provider(provider.clone());

        let status = manager.handle_callback(Some("late"), None).await.unwrap();

        assert!(status.is_authenticated());
        assert_eq!(provider.exchanges.load(Ordering::SeqCst), 1);
    }
}
