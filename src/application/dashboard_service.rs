use std::sync::Arc;

use error_stack::ResultExt;
use thiserror::Error;
use tracing::instrument;

use crate::{
    application::classifier::classify, domain::report::ManuscriptReport,
    ports::sheet_row_source::SheetRowSource,
};

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to fetch manuscript rows")]
    FetchRows,
    #[error("Failed to render dashboard page")]
    Render,
}

/// Runs one fetch → classify cycle per call. Nothing is cached between calls.
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn SheetRowSource>,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService")
            .field("range", &self.source.range().to_string())
            .finish()
    }
}

impl DashboardService {
    pub fn new(source: Arc<dyn SheetRowSource>) -> Self {
        Self { source }
    }

    #[instrument(skip(self))]
    pub async fn report(&self) -> error_stack::Result<ManuscriptReport, DashboardError> {
        let rows = self
            .source
            .fetch_rows()
            .await
            .change_context(DashboardError::FetchRows)
            .attach_printable_lazy(|| format!("range {}", self.source.range()))?;

        Ok(classify(&rows, self.source.range()))
    }
}
