use async_trait::async_trait;
use chrono::Utc;
use oauth2::{
    basic::{BasicClient, BasicTokenResponse},
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, HttpRequest,
    HttpResponse, RedirectUrl, RefreshToken, Scope, TokenResponse, TokenUrl,
};
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};

use crate::common::Credential;
use crate::config::OAuthConfiguration;
use crate::error::AuthError;

// Adapter from the oauth2 request type onto a shared reqwest client
async fn send_token_request(
    client: reqwest::Client,
    request: HttpRequest,
) -> Result<HttpResponse, reqwest::Error> {
    let mut builder = client
        .request(request.method().clone(), request.uri().to_string())
        .body(request.body().clone());

    for (name, value) in request.headers() {
        builder = builder.header(name.as_str(), value.as_bytes());
    }

    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?.to_vec();

    let mut http_response = HttpResponse::new(body);
    *http_response.status_mut() = status;

    Ok(http_response)
}

/// Source of OAuth2 tokens for the credential manager
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Consent page URL carrying the given CSRF state
    fn authorization_url(&self, csrf_state: &str) -> String;

    /// Exchange an authorization code for a credential
    async fn exchange_code(&self, code: &str) -> Result<Credential, AuthError>;

    /// Obtain a fresh access token for an expiring credential
    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthError>;
}

pub struct OAuthClient {
    client_id: String,
    client_secret: SecretString,
    auth_url: AuthUrl,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
    scope: String,
    http: reqwest::Client,
}

impl OAuthClient {
    pub fn new(config: &OAuthConfiguration) -> Result<Self, AuthError> {
        if config.client_id.trim().is_empty() {
            return Err(AuthError::Configuration("OAuth client id is empty".to_string()));
        }

        let auth_url = AuthUrl::new(config.auth_url.clone())
            .map_err(|e| AuthError::Configuration(format!("Invalid auth URL: {}", e)))?;

        let token_url = TokenUrl::new(config.token_url.clone())
            .map_err(|e| AuthError::Configuration(format!("Invalid token URL: {}", e)))?;

        let redirect_url = RedirectUrl::new(config.redirect_uri.clone())
            .map_err(|e| AuthError::Configuration(format!("Invalid redirect URI: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            // Token endpoints must not redirect
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client_id: config.client_id.clone(),
            client_secret: SecretString::from(config.client_secret.expose_secret().to_string()),
            auth_url,
            token_url,
            redirect_url,
            scope: config.scope.clone(),
            http,
        })
    }

    /// Generate a random CSRF state token
    pub fn generate_state_token() -> String {
        use base64::Engine;
        let mut rng = rand::rng();
        let random_bytes: Vec<u8> = (0..32).map(|_| rng.random()).collect();
        base64::prelude::BASE64_URL_SAFE_NO_PAD.encode(&random_bytes)
    }

    fn credential_from(
        &self,
        token_result: &BasicTokenResponse,
        previous_refresh: Option<&str>,
    ) -> Result<Credential, AuthError> {
        let access_token = token_result.access_token().secret().to_string();

        // Refresh grants usually omit the refresh token, keep the one we have
        let refresh_token = token_result
            .refresh_token()
            .map(|token| token.secret().to_string())
            .or_else(|| previous_refresh.map(str::to_string));

        let expires_in = token_result
            .expires_in()
            .ok_or_else(|| AuthError::Exchange("No expiration time in response".to_string()))?;

        let scope = token_result
            .scopes()
            .map(|scopes| {
                scopes
                    .iter()
                    .map(|scope| scope.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .or_else(|| Some(self.scope.clone()));

        let expiry = Utc::now()
            + chrono::Duration::from_std(expires_in)
                .map_err(|e| AuthError::Exchange(format!("Invalid expiration: {}", e)))?;

        Ok(Credential {
            access_token,
            refresh_token,
            expiry,
            scope,
        })
    }
}

#[async_trait]
impl TokenProvider for OAuthClient {
    fn authorization_url(&self, csrf_state: &str) -> String {
        let csrf_token = CsrfToken::new(csrf_state.to_string());
        let (auth_url, _) = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(
                self.client_secret.expose_secret().to_string(),
            ))
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .authorize_url(|| csrf_token)
            .add_scope(Scope::new(self.scope.clone()))
            // Offline access plus forced consent so a refresh token is issued
            .add_extra_param("access_type", "offline")
            .add_extra_param("prompt", "consent")
            .url();
        auth_url.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<Credential, AuthError> {
        let token_result = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(
                self.client_secret.expose_secret().to_string(),
            ))
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&|request| send_token_request(self.http.clone(), request))
            .await?;

        let credential = self.credential_from(&token_result, None)?;

        tracing::debug!(
            "Successfully exchanged code for tokens, expires_at: {}",
            credential.expiry
        );

        Ok(credential)
    }

    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthError> {
        let refresh_token = credential
            .refresh_token
            .as_deref()
            .ok_or_else(|| AuthError::Refresh("No refresh token available".to_string()))?;

        let token_result = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(
                self.client_secret.expose_secret().to_string(),
            ))
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(&|request| send_token_request(self.http.clone(), request))
            .await
            .map_err(|e| AuthError::Refresh(format!("Token request failed: {}", e)))?;

        let refreshed = self.credential_from(&token_result, Some(refresh_token))?;

        tracing::debug!("Successfully refreshed tokens, expires_at: {}", refreshed.expiry);

        Ok(refreshed)
    }
}
