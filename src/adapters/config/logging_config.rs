use std::path::PathBuf;

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error.
    pub level: String,
    pub log_file: Option<PathBuf>,
    /// gRPC endpoint of an OpenTelemetry collector, e.g. `http://localhost:4317`.
    pub otlp_endpoint: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_file: Some(PathBuf::from("manuscript_tracker.log")),
            otlp_endpoint: None,
        }
    }
}
