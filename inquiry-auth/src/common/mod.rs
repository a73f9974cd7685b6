mod models;

pub use models::{AuthStatus, Credential, CredentialSource};
