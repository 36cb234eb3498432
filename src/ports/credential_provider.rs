use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Failed to read client secret file")]
    ReadClientSecret,
    #[error("Failed to set up the OAuth2 authenticator")]
    BuildAuthenticator,
    #[error("No authorized token is available")]
    AuthorizationRequired,
    #[error("Failed to obtain an access token")]
    Token,
}

/// Source of bearer tokens for the spreadsheet API.
///
/// Implementations load a cached token, refresh it when it has expired, and
/// fall back to authorizing from scratch, persisting whatever they obtain.
#[async_trait::async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn access_token(&self) -> error_stack::Result<String, CredentialError>;
}
