use std::path::PathBuf;

pub const SPREADSHEETS_READONLY_SCOPE: &str =
    "https://www.googleapis.com/auth/spreadsheets.readonly";

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OAuthConfig {
    /// Installed-application client secret downloaded from the Google Cloud console.
    pub client_secret_path: PathBuf,
    /// Created on first authorization. Delete it after changing `scopes`.
    pub token_path: PathBuf,
    pub scopes: Vec<String>,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_secret_path: PathBuf::from("credentials.json"),
            token_path: PathBuf::from("token.json"),
            scopes: vec![SPREADSHEETS_READONLY_SCOPE.to_string()],
        }
    }
}
