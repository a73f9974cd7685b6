// Credential model shared with the server
pub mod common;

mod config;
mod error;
mod manager;
mod oauth_client;
mod token_storage;

pub use common::{AuthStatus, Credential, CredentialSource};
pub use config::{CredentialsConfiguration, OAuthConfiguration};
pub use error::AuthError;
pub use manager::CredentialManager;
pub use oauth_client::{OAuthClient, TokenProvider};
pub use token_storage::TokenStore;
