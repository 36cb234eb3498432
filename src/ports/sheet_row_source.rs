use serde_json::Value;
use thiserror::Error;

use crate::domain::sheets::a1_notation::A1Range;

#[derive(Error, Debug)]
pub enum SheetSourceError {
    #[error("Failed to authorize spreadsheet access")]
    Unauthorized,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
}

#[async_trait::async_trait]
pub trait SheetRowSource: Send + Sync {
    /// Range the rows are read from. Its top-left cell is the first cell of the
    /// first returned row.
    fn range(&self) -> &A1Range;

    /// Fetches the rows of [`SheetRowSource::range`] as untyped cell values.
    async fn fetch_rows(&self) -> error_stack::Result<Vec<Vec<Value>>, SheetSourceError>;
}
