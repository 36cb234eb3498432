use manuscript_tracker::{
    adapters::{
        config::app_config::AppConfig,
        sheets::http_client::{http_client, HttpsClient},
        web::router,
    },
    ports::command_handler::{Command, CommandError, CommandHandler},
    StatusBucket,
};
use strum::IntoEnumIterator;
use tracing::{error, info, instrument};

use crate::service_factory::ServiceFactory;

pub struct CliAdapter {
    config: AppConfig,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("spreadsheet_id", &self.config.sheets.spreadsheet_id)
            .field("range", &self.config.sheets.range.to_string())
            .finish()
    }
}

impl CliAdapter {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(args))]
    pub async fn run(&self, args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
        let command = Command::parse(&args)?;

        match self.handle(command).await {
            Ok(result) => {
                info!("{}", result);
                Ok(())
            }
            Err(report) => {
                error!("Command failed: {:?}", report);
                Err(format!("Command failed: {}", report.current_context()).into())
            }
        }
    }

    fn client(&self) -> error_stack::Result<HttpsClient, CommandError> {
        http_client().map_err(|e| {
            CommandError::ExecutionFailed {
                details: format!("Unable to set up the HTTPS client: {}", e),
            }
            .into()
        })
    }

    async fn serve(&self) -> error_stack::Result<String, CommandError> {
        let state = ServiceFactory::app_state(&self.config, self.client()?);
        let app = router::router(state, &self.config.server.static_dir);

        let listener = tokio::net::TcpListener::bind(self.config.server.bind_address)
            .await
            .map_err(|e| CommandError::ExecutionFailed {
                details: format!("Unable to bind {}: {}", self.config.server.bind_address, e),
            })?;

        router::serve(listener, app)
            .await
            .map_err(|e| CommandError::ExecutionFailed {
                details: format!("Server error: {}", e),
            })?;

        Ok("Server stopped".to_string())
    }

    async fn authorize(&self) -> error_stack::Result<String, CommandError> {
        let credentials = ServiceFactory::interactive_credentials(&self.config, self.client()?);
        credentials
            .access_token()
            .await
            .map_err(|e| CommandError::ExecutionFailed {
                details: format!("Authorization failed: {:?}", e),
            })?;

        Ok(format!(
            "Token available at {}",
            self.config.oauth.token_path.display()
        ))
    }

    async fn summary(&self) -> error_stack::Result<String, CommandError> {
        let client = self.client()?;
        let credentials = ServiceFactory::interactive_credentials(&self.config, client.clone());
        let service = ServiceFactory::dashboard_service(&self.config, client, credentials);
        let report = service
            .report()
            .await
            .map_err(|e| CommandError::ExecutionFailed {
                details: format!("Failed to build report: {:?}", e),
            })?;

        let mut output = format!(
            "\nManuscripts in {}: {}\n",
            self.config.sheets.range, report.counts.total
        );
        for bucket in StatusBucket::iter() {
            output.push_str(&format!("  {}: {}\n", bucket, report.counts.get(bucket)));
        }
        if !report.rejected.is_empty() {
            output.push_str(&format!("Rejected rows: {}\n", report.rejected.len()));
            for rejected in &report.rejected {
                output.push_str(&format!("  {}\n", rejected));
            }
        }

        Ok(output)
    }
}

#[async_trait::async_trait]
impl CommandHandler for CliAdapter {
    #[instrument]
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError> {
        match command {
            Command::Serve => self.serve().await,
            Command::Authorize => self.authorize().await,
            Command::Summary => self.summary().await,
        }
    }
}
