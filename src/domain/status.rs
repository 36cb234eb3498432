use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

pub const UPLOADED: &str = "unggah";
pub const POST_PROCESSING: &str = "post processing";
pub const PHOTOGRAPHY: &str = "pemotretan";
pub const TRACING: &str = "penelusuran";

/// Catalog link value of a manuscript that is not yet published.
pub const UNPUBLISHED_LINK: &str = "-";

/// Mutually exclusive progress categories used for the dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBucket {
    #[strum(serialize = "unggah")]
    Uploaded,
    #[strum(serialize = "post processing")]
    PostProcessing,
    #[strum(serialize = "pemotretan")]
    Photography,
    #[strum(serialize = "penelusuran")]
    Tracing,
}

impl StatusBucket {
    /// Bucket of a final status value. Anything unrecognised is still being traced.
    pub fn of(status: &str) -> Self {
        match status {
            UPLOADED => StatusBucket::Uploaded,
            POST_PROCESSING => StatusBucket::PostProcessing,
            PHOTOGRAPHY => StatusBucket::Photography,
            _ => StatusBucket::Tracing,
        }
    }
}

/// Final status of a manuscript given the raw sheet status and its catalog link.
///
/// Any status mentioning "unggah" collapses to exactly "unggah". An uploaded
/// manuscript that has no catalog link yet is still in post processing.
pub fn resolve_status(raw_status: &str, catalog_link: &str) -> String {
    if raw_status.contains(UPLOADED) {
        if catalog_link == UNPUBLISHED_LINK {
            return POST_PROCESSING.to_owned();
        }
        return UPLOADED.to_owned();
    }
    raw_status.to_owned()
}
