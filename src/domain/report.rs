use serde::Serialize;

use super::{
    manuscript::Manuscript,
    sheets::{row::Row, row_decoder::RowDecodeError},
    status::StatusBucket,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub uploaded: usize,
    pub post_processing: usize,
    pub photography: usize,
    pub tracing: usize,
}

impl StatusCounts {
    pub fn record(&mut self, bucket: StatusBucket) {
        self.total += 1;
        match bucket {
            StatusBucket::Uploaded => self.uploaded += 1,
            StatusBucket::PostProcessing => self.post_processing += 1,
            StatusBucket::Photography => self.photography += 1,
            StatusBucket::Tracing => self.tracing += 1,
        }
    }

    pub fn get(&self, bucket: StatusBucket) -> usize {
        match bucket {
            StatusBucket::Uploaded => self.uploaded,
            StatusBucket::PostProcessing => self.post_processing,
            StatusBucket::Photography => self.photography,
            StatusBucket::Tracing => self.tracing,
        }
    }
}

/// A data row that could not be decoded into a manuscript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub row: Row,
    pub error: RowDecodeError,
}

impl std::fmt::Display for RejectedRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row, self.error)
    }
}

/// Manuscripts in sheet order with their aggregate counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManuscriptReport {
    pub manuscripts: Vec<Manuscript>,
    pub counts: StatusCounts,
    pub rejected: Vec<RejectedRow>,
}

impl ManuscriptReport {
    pub fn is_empty(&self) -> bool {
        self.manuscripts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_record_increments_total_and_bucket() {
        let mut counts = StatusCounts::default();
        counts.record(StatusBucket::Uploaded);
        counts.record(StatusBucket::Tracing);
        counts.record(StatusBucket::Tracing);

        assert_eq!(counts.total, 3);
        assert_eq!(counts.get(StatusBucket::Uploaded), 1);
        assert_eq!(counts.get(StatusBucket::Tracing), 2);
        assert_eq!(counts.get(StatusBucket::Photography), 0);
    }

    #[test]
    fn test_buckets_sum_to_total() {
        let mut counts = StatusCounts::default();
        for bucket in StatusBucket::iter().chain(StatusBucket::iter()) {
            counts.record(bucket);
        }
        let sum: usize = StatusBucket::iter().map(|b| counts.get(b)).sum();
        assert_eq!(sum, counts.total);
        assert_eq!(counts.total, 8);
    }
}
