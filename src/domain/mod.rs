pub mod manuscript;
pub mod report;
pub mod sheets;
pub mod status;

// Re-export commonly used types
pub use manuscript::Manuscript;
pub use report::{ManuscriptReport, RejectedRow, StatusCounts};
pub use status::StatusBucket;
