use std::sync::Arc;

use manuscript_tracker::{
    adapters::{
        config::app_config::AppConfig,
        oauth::{
            delegate::{ConsolePrompt, RequirePriorAuthorization},
            installed_flow::InstalledFlowCredentialProvider,
        },
        sheets::{http_client::HttpsClient, spreadsheet_manager::SpreadsheetManager},
        web::{page_renderer::PageRenderer, router::AppState},
    },
    application::dashboard_service::DashboardService,
    ports::credential_provider::CredentialProvider,
};

pub struct ServiceFactory;

impl ServiceFactory {
    /// Credentials for one-shot commands, which may ask for a code on the console.
    pub fn interactive_credentials(
        config: &AppConfig,
        client: HttpsClient,
    ) -> Arc<dyn CredentialProvider> {
        Arc::new(InstalledFlowCredentialProvider::new(
            &config.oauth,
            client,
            ConsolePrompt,
        ))
    }

    /// Credentials for the server. These never prompt.
    pub fn serving_credentials(
        config: &AppConfig,
        client: HttpsClient,
    ) -> Arc<dyn CredentialProvider> {
        Arc::new(InstalledFlowCredentialProvider::new(
            &config.oauth,
            client,
            RequirePriorAuthorization::new(config.oauth.token_path.clone()),
        ))
    }

    pub fn dashboard_service(
        config: &AppConfig,
        client: HttpsClient,
        credentials: Arc<dyn CredentialProvider>,
    ) -> DashboardService {
        let spreadsheet_manager = SpreadsheetManager::new(config.sheets.clone(), client, credentials);
        DashboardService::new(Arc::new(spreadsheet_manager))
    }

    pub fn app_state(config: &AppConfig, client: HttpsClient) -> AppState {
        let credentials = Self::serving_credentials(config, client.clone());
        AppState {
            service: Self::dashboard_service(config, client, credentials),
            renderer: Arc::new(PageRenderer::new(config.server.template_path.clone())),
        }
    }
}
