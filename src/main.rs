use std::{env, process::ExitCode, str::FromStr};

use manuscript_tracker::{
    adapters::config::{app_config::AppConfig, logging_config::LoggingConfig},
    prettyprint::prettyprint::PrettyFormatter,
};
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{trace as sdktrace, Resource};
use tracing::{error, info};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

mod cli_adapter;
mod service_factory;

use cli_adapter::CliAdapter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            eprintln!("[CONFIG ERROR] {:?}", report);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = setup_tracing(&config.logging) {
        eprintln!("Failed to set up logging: {}", e);
        return ExitCode::FAILURE;
    }
    setup_panic_hook();

    let args: Vec<String> = env::args().collect();

    info!("Starting manuscript-tracker");

    let cli_adapter = CliAdapter::new(config);
    let exit_code = match cli_adapter.run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("manuscript-tracker failed: {}", e);
            ExitCode::FAILURE
        }
    };

    opentelemetry::global::shutdown_tracer_provider();
    exit_code
}

fn setup_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let level = tracing::Level::from_str(&config.level)
        .map_err(|e| format!("invalid logging.level '{}': {}", config.level, e))?;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(PrettyFormatter::new(false))
                    .with_writer(file)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    let otel_layer = match &config.otlp_endpoint {
        Some(endpoint) => {
            let exporter = opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint.clone());

            let tracer = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(exporter)
                .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                    KeyValue::new("service.name", "manuscript_tracker"),
                ])))
                .install_batch(opentelemetry_sdk::runtime::Tokio)?;

            Some(OpenTelemetryLayer::new(tracer))
        }
        None => None,
    };

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("manuscript_tracker", level)
                .with_target("tower_http", level),
        )
        .with(otel_layer)
        .with(log_file_layer)
        .with(stdout_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
        opentelemetry::global::shutdown_tracer_provider();
    }));
}
