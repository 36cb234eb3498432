use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, TimeZone, Utc};
use google_sheets4::oauth2::storage::{TokenInfo, TokenStorage};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

/// Contents of the token file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn to_offset_date_time(expiry: DateTime<Utc>) -> Option<OffsetDateTime> {
    let nanos = i128::from(expiry.timestamp()) * 1_000_000_000
        + i128::from(expiry.timestamp_subsec_nanos());
    OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
}

fn to_date_time(expires_at: OffsetDateTime) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(expires_at.unix_timestamp(), expires_at.nanosecond())
        .single()
}

/// A missing expiry, or the zero timestamp `0001-01-01T00:00:00Z`, means the
/// token never expires.
impl From<OAuthToken> for TokenInfo {
    fn from(token: OAuthToken) -> Self {
        TokenInfo {
            access_token: Some(token.access_token).filter(|t| !t.is_empty()),
            refresh_token: token.refresh_token.filter(|t| !t.is_empty()),
            expires_at: token
                .expiry
                .filter(|expiry| expiry.year() > 1)
                .and_then(to_offset_date_time),
            id_token: None,
        }
    }
}

impl From<TokenInfo> for OAuthToken {
    fn from(token: TokenInfo) -> Self {
        OAuthToken {
            access_token: token.access_token.unwrap_or_default(),
            token_type: Some("Bearer".to_string()),
            refresh_token: token.refresh_token,
            expiry: token.expires_at.and_then(to_date_time),
        }
    }
}

/// The token file, also serving as the authenticator's token storage. One
/// token is kept regardless of the scopes it was requested for.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached token, or `None` when the file is missing or not a
    /// well-formed token.
    #[instrument]
    pub async fn load(&self) -> Option<OAuthToken> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) => {
                info!("No cached token at {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice::<OAuthToken>(&contents) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Ignoring malformed token file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    #[instrument(skip(token))]
    pub async fn save(&self, token: &OAuthToken) -> std::io::Result<()> {
        info!("Saving credential file to: {}", self.path.display());
        let json = serde_json::to_vec(token)?;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&self.path).await?;
        file.write_all(&json).await?;
        file.flush().await
    }
}

#[async_trait::async_trait]
impl TokenStorage for TokenFile {
    async fn set(&self, _scopes: &[&str], token: TokenInfo) -> anyhow::Result<()> {
        self.save(&OAuthToken::from(token)).await?;
        Ok(())
    }

    async fn get(&self, _scopes: &[&str]) -> Option<TokenInfo> {
        self.load().await.map(TokenInfo::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expiry: Option<DateTime<Utc>>) -> OAuthToken {
        OAuthToken {
            access_token: "ya29.access".to_string(),
            token_type: Some("Bearer".to_string()),
            refresh_token: Some("1//refresh".to_string()),
            expiry,
        }
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let info = TokenInfo::from(token(Some(Utc::now() - Duration::seconds(1))));
        assert!(info.is_expired());

        let info = TokenInfo::from(token(Some(Utc::now() + Duration::seconds(30))));
        assert!(info.is_expired());

        let info = TokenInfo::from(token(Some(Utc::now() + Duration::hours(1))));
        assert!(!info.is_expired());
    }

    #[test]
    fn test_missing_or_zero_expiry_never_expires() {
        assert!(!TokenInfo::from(token(None)).is_expired());

        let zero: OAuthToken = serde_json::from_str(
            r#"{"access_token":"a","token_type":"Bearer","expiry":"0001-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let info = TokenInfo::from(zero);
        assert_eq!(info.expires_at, None);
        assert_eq!(info.refresh_token, None);
        assert!(!info.is_expired());
    }

    #[test]
    fn test_reads_token_file_layout() {
        let parsed: OAuthToken = serde_json::from_str(
            r#"{"access_token":"ya29.a","token_type":"Bearer","refresh_token":"1//r","expiry":"2024-05-01T13:00:00.5+07:00"}"#,
        )
        .unwrap();
        assert_eq!(parsed.refresh_token.as_deref(), Some("1//r"));
        assert_eq!(
            parsed.expiry,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap() + Duration::milliseconds(500))
        );
    }

    #[test]
    fn test_empty_refresh_token_is_absent() {
        let mut t = token(None);
        t.refresh_token = Some(String::new());
        assert_eq!(TokenInfo::from(t).refresh_token, None);
    }

    #[test]
    fn test_expiry_survives_conversion() {
        let expiry = Utc.with_ymd_and_hms(2030, 1, 1, 8, 30, 0).unwrap() + Duration::milliseconds(250);
        let back = OAuthToken::from(TokenInfo::from(token(Some(expiry))));
        assert_eq!(back, token(Some(expiry)));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = TokenFile::new(dir.path().join("token.json"));
        let original = token(Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()));

        file.save(&original).await.unwrap();
        assert_eq!(file.load().await, Some(original));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(file.path()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[tokio::test]
    async fn test_storage_writes_token_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let file = TokenFile::new(dir.path().join("token.json"));
        let info = TokenInfo::from(token(Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())));

        file.set(&["scope"], info.clone()).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(file.path()).unwrap()).unwrap();
        assert_eq!(written["access_token"], "ya29.access");
        assert_eq!(written["token_type"], "Bearer");
        assert_eq!(written["refresh_token"], "1//refresh");
        assert_eq!(written["expiry"], "2030-01-01T00:00:00Z");
        assert_eq!(file.get(&["other scope"]).await, Some(info));
    }

    #[tokio::test]
    async fn test_load_missing_or_malformed_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = TokenFile::new(dir.path().join("token.json"));
        assert_eq!(file.load().await, None);

        std::fs::write(file.path(), b"{not json").unwrap();
        assert_eq!(file.load().await, None);

        std::fs::write(file.path(), br#"{"token_type":"Bearer"}"#).unwrap();
        assert_eq!(file.load().await, None);
    }
}
