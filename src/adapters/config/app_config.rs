use config::Config;
use error_stack::{report, ResultExt};
use serde::{de::IntoDeserializer, Deserialize};
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "Config";

#[derive(serde::Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub sheets: super::sheets_config::SpreadsheetConfig,
    pub oauth: super::oauth_config::OAuthConfig,
    pub server: super::server_config::ServerConfig,
    pub logging: super::logging_config::LoggingConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error reading config file '{0}'")]
    Read(String),
    #[error("Failed to deserialize config field '{0}'")]
    InvalidField(String),
}

impl AppConfig {
    /// Loads the config file named by `CONFIG_PATH` (default `Config`, any
    /// extension the `config` crate understands). A missing file means defaults.
    pub fn load() -> error_stack::Result<AppConfig, ConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> error_stack::Result<AppConfig, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .build()
            .change_context_lazy(|| ConfigError::Read(config_path.to_string()))?;

        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context_lazy(|| ConfigError::Read(config_path.to_string()))?;

        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|e| {
            let path_str = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            report!(ConfigError::InvalidField(
                path_str.trim_start_matches('.').to_string()
            ))
            .attach_printable(format!("{} (in config file '{}')", e, config_path))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load_from("/nonexistent/manuscript-tracker/Config").unwrap();
        assert_eq!(config.sheets.range.to_string(), "rekap!A2:L");
        assert_eq!(config.oauth.token_path.to_str(), Some("token.json"));
        assert_eq!(config.server.bind_address.port(), 8080);
        assert_eq!(config.server.static_dir.to_str(), Some("static"));
    }

    #[test]
    fn test_file_overrides_selected_fields() {
        let file = write_config(
            r#"
            [sheets]
            spreadsheet_id = "abc123"
            range = "'Rekap 2024'!B3:L"

            [server]
            bind_address = "127.0.0.1:3000"
            "#,
        );
        let config = AppConfig::load_from(file.path().to_str().unwrap()).unwrap();

        assert_eq!(&*config.sheets.spreadsheet_id, "abc123");
        assert_eq!(config.sheets.range.first_row().number(), 3);
        assert_eq!(config.server.bind_address.to_string(), "127.0.0.1:3000");
        assert_eq!(config.server.template_path.to_str(), Some("index.html"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_range_reports_field_path() {
        let file = write_config(
            r#"
            [sheets]
            range = "rekap!"
            "#,
        );
        let err = AppConfig::load_from(file.path().to_str().unwrap()).unwrap_err();
        match err.current_context() {
            ConfigError::InvalidField(path) => assert_eq!(path, "sheets.range"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
