use std::path::PathBuf;

use error_stack::{report, ResultExt};
use google_sheets4::oauth2::{
    self, authenticator::Authenticator, authenticator_delegate::InstalledFlowDelegate,
    read_application_secret, ApplicationSecret, InstalledFlowAuthenticator,
    InstalledFlowReturnMethod,
};
use tracing::instrument;

use super::{delegate::WithRedirect, token::TokenFile};
use crate::{
    adapters::{
        config::oauth_config::OAuthConfig,
        sheets::http_client::{HttpsClient, HttpsConnector},
    },
    ports::credential_provider::{CredentialError, CredentialProvider},
};

/// Redirect used when the client secret lists none.
const FALLBACK_REDIRECT_URI: &str = "http://localhost";

/// Installed-application OAuth2 flow backed by the token file.
///
/// Each call builds an authenticator over `token.json`: a valid token is
/// used as is, an expired one is refreshed, and otherwise `delegate` is asked
/// for an authorization code. Whatever the authenticator obtains is written
/// back to the token file.
pub struct InstalledFlowCredentialProvider<D> {
    client_secret_path: PathBuf,
    token_path: PathBuf,
    scopes: Vec<String>,
    client: HttpsClient,
    delegate: D,
}

impl<D> std::fmt::Debug for InstalledFlowCredentialProvider<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstalledFlowCredentialProvider")
            .field("client_secret_path", &self.client_secret_path)
            .field("token_path", &self.token_path)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl<D: InstalledFlowDelegate + Clone + 'static> InstalledFlowCredentialProvider<D> {
    pub fn new(config: &OAuthConfig, client: HttpsClient, delegate: D) -> Self {
        Self {
            client_secret_path: config.client_secret_path.clone(),
            token_path: config.token_path.clone(),
            scopes: config.scopes.clone(),
            client,
            delegate,
        }
    }

    async fn application_secret(&self) -> error_stack::Result<ApplicationSecret, CredentialError> {
        read_application_secret(&self.client_secret_path)
            .await
            .change_context(CredentialError::ReadClientSecret)
            .attach_printable_lazy(|| {
                format!(
                    "Unable to read client secret file '{}'",
                    self.client_secret_path.display()
                )
            })
    }

    pub async fn authenticator(
        &self,
    ) -> error_stack::Result<Authenticator<HttpsConnector>, CredentialError> {
        let secret = self.application_secret().await?;
        let redirect_uri = secret
            .redirect_uris
            .first()
            .cloned()
            .unwrap_or_else(|| FALLBACK_REDIRECT_URI.to_string());

        InstalledFlowAuthenticator::with_client(
            secret,
            InstalledFlowReturnMethod::Interactive,
            self.client.clone(),
        )
        .with_storage(Box::new(TokenFile::new(self.token_path.clone())))
        .flow_delegate(Box::new(WithRedirect {
            inner: self.delegate.clone(),
            redirect_uri,
        }))
        .build()
        .await
        .change_context(CredentialError::BuildAuthenticator)
    }
}

#[async_trait::async_trait]
impl<D: InstalledFlowDelegate + Clone + 'static> CredentialProvider
    for InstalledFlowCredentialProvider<D>
{
    #[instrument(skip(self))]
    async fn access_token(&self) -> error_stack::Result<String, CredentialError> {
        let authenticator = self.authenticator().await?;

        let token = match authenticator.token(self.scopes.as_slice()).await {
            Ok(token) => token,
            Err(oauth2::Error::UserError(message)) => {
                return Err(report!(CredentialError::AuthorizationRequired).attach_printable(message))
            }
            Err(e) => return Err(report!(e).change_context(CredentialError::Token)),
        };

        token.token().map(str::to_owned).ok_or_else(|| {
            report!(CredentialError::Token).attach_printable("Token response held no access token")
        })
    }
}
