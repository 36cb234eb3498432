use std::{fmt::Debug, sync::Arc};

use error_stack::{report, ResultExt};
use google_sheets4::Sheets;
use serde_json::Value;
use tracing::{info, instrument};

use super::http_client::{HttpsClient, HttpsConnector};
use crate::{
    adapters::config::sheets_config::SpreadsheetConfig,
    domain::sheets::a1_notation::A1Range,
    ports::{
        credential_provider::CredentialProvider,
        sheet_row_source::{SheetRowSource, SheetSourceError},
    },
};

type Hub = Sheets<HttpsConnector>;

/// Reads the configured range through the Sheets v4 API.
///
/// A hub is built per read with the token the credential provider hands out,
/// so an expired token is refreshed before the next fetch.
pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    client: HttpsClient,
    credentials: Arc<dyn CredentialProvider>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

impl SpreadsheetManager {
    pub fn new(
        config: SpreadsheetConfig,
        client: HttpsClient,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        SpreadsheetManager {
            config,
            client,
            credentials,
        }
    }

    async fn hub(&self) -> error_stack::Result<Hub, SheetSourceError> {
        let token = self
            .credentials
            .access_token()
            .await
            .change_context(SheetSourceError::Unauthorized)?;
        Ok(Sheets::new(self.client.clone(), token))
    }

    #[instrument]
    pub async fn read_range(
        &self,
        range: &str,
    ) -> error_stack::Result<Vec<Vec<Value>>, SheetSourceError> {
        let hub = self.hub().await?;
        let (_, value_range) = hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range)
            .doit()
            .await
            .change_context(SheetSourceError::FailedToFetchRange)
            .attach_printable_lazy(|| {
                format!(
                    "Unable to retrieve data from sheet {} range {}",
                    self.config.spreadsheet_id, range
                )
            })?;

        // The API leaves out `values` entirely when the range is empty.
        let rows = value_range.values.unwrap_or_default();
        info!("Fetched {} rows from {}", rows.len(), range);
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl SheetRowSource for SpreadsheetManager {
    fn range(&self) -> &A1Range {
        &self.config.range
    }

    async fn fetch_rows(&self) -> error_stack::Result<Vec<Vec<Value>>, SheetSourceError> {
        let range = self.config.range.to_string();
        if self.config.spreadsheet_id.is_empty() {
            return Err(report!(SheetSourceError::FailedToFetchRange)
                .attach_printable("No spreadsheet id configured"));
        }
        self.read_range(&range).await
    }
}
