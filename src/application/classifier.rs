use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{
    manuscript::Manuscript,
    report::{ManuscriptReport, RejectedRow, StatusCounts},
    sheets::{
        a1_notation::A1Range,
        row_decoder::{DecodedRow, RowDecoder},
    },
};

/// Turns fetched rows into manuscripts and status counts.
///
/// Placeholder rows are dropped silently, undecodable rows are kept aside as
/// [`RejectedRow`]s, everything else is recorded in sheet order.
pub fn classify(rows: &[Vec<Value>], range: &A1Range) -> ManuscriptReport {
    if rows.is_empty() {
        info!("No data found in {}", range);
        return ManuscriptReport::default();
    }

    let decoder = RowDecoder::new(range.start_column);
    let first_row = range.first_row();

    let mut manuscripts = Vec::with_capacity(rows.len());
    let mut counts = StatusCounts::default();
    let mut rejected = Vec::new();

    for (offset, cells) in rows.iter().enumerate() {
        match decoder.decode(cells) {
            Ok(DecodedRow::Placeholder) => continue,
            Ok(DecodedRow::Manuscript(raw)) => {
                let manuscript = Manuscript::from(raw);
                counts.record(manuscript.bucket);
                manuscripts.push(manuscript);
            }
            Err(error) => {
                let rejected_row = RejectedRow {
                    row: first_row.below(offset),
                    error,
                };
                warn!("Skipping malformed {}", rejected_row);
                rejected.push(rejected_row);
            }
        }
    }

    info!(
        total = counts.total,
        uploaded = counts.uploaded,
        post_processing = counts.post_processing,
        photography = counts.photography,
        tracing = counts.tracing,
        rejected = rejected.len(),
        "Classified {} rows",
        rows.len()
    );

    ManuscriptReport {
        manuscripts,
        counts,
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sheets::column::Column, sheets::row_decoder::RowDecodeError, StatusBucket};
    use serde_json::json;
    use strum::IntoEnumIterator;

    fn range() -> A1Range {
        "rekap!A2:L".parse().unwrap()
    }

    fn row(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::String(v.to_string())).collect()
    }

    fn manuscript_row(call_number: &str, status: &str, catalog_link: &str) -> Vec<Value> {
        row(&[
            call_number,
            "Title",
            "B1",
            "id",
            "jawi",
            "manuscript",
            "10",
            "20x30",
            status,
            "x",
            catalog_link,
        ])
    }

    #[test]
    fn test_unlinked_upload_counts_as_post_processing() {
        let rows = vec![row(&[
            "A1", "Title A", "B1", "id", "jawi", "manuscript", "10", "20x30", "unggah", "x", "-",
        ])];
        let report = classify(&rows, &range());

        assert_eq!(report.manuscripts.len(), 1);
        assert_eq!(report.manuscripts[0].status, "post processing");
        assert_eq!(
            report.counts,
            StatusCounts {
                total: 1,
                uploaded: 0,
                post_processing: 1,
                photography: 0,
                tracing: 0,
            }
        );
    }

    #[test]
    fn test_placeholder_rows_are_skipped() {
        let rows = vec![
            row(&["-", "Title B"]),
            manuscript_row("#REF!", "unggah", "https://opac/1"),
        ];
        let report = classify(&rows, &range());

        assert!(report.is_empty());
        assert_eq!(report.counts, StatusCounts::default());
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_empty_input_yields_zero_counts() {
        let report = classify(&[], &range());
        assert_eq!(report, ManuscriptReport::default());
    }

    #[test]
    fn test_each_bucket_is_counted() {
        let rows = vec![
            manuscript_row("A1", "sudah unggah", "https://opac/1"),
            manuscript_row("A2", "unggah", "-"),
            manuscript_row("A3", "pemotretan", "-"),
            manuscript_row("A4", "penelusuran", "-"),
            manuscript_row("A5", "restorasi", "-"),
        ];
        let report = classify(&rows, &range());

        assert_eq!(report.counts.total, 5);
        assert_eq!(report.counts.uploaded, 1);
        assert_eq!(report.counts.post_processing, 1);
        assert_eq!(report.counts.photography, 1);
        assert_eq!(report.counts.tracing, 2);
        assert_eq!(report.manuscripts[4].status, "restorasi");
        assert_eq!(report.manuscripts[4].bucket, StatusBucket::Tracing);
    }

    #[test]
    fn test_order_and_duplicates_are_preserved() {
        let rows = vec![
            manuscript_row("C3", "pemotretan", "-"),
            manuscript_row("A1", "pemotretan", "-"),
            manuscript_row("C3", "pemotretan", "-"),
        ];
        let report = classify(&rows, &range());
        let call_numbers: Vec<&str> = report
            .manuscripts
            .iter()
            .map(|m| m.call_number.as_str())
            .collect();
        assert_eq!(call_numbers, vec!["C3", "A1", "C3"]);
    }

    #[test]
    fn test_malformed_rows_are_rejected_with_sheet_row_numbers() {
        let mut numeric_pages = manuscript_row("A2", "pemotretan", "-");
        numeric_pages[6] = json!(10);
        let rows = vec![
            manuscript_row("A1", "pemotretan", "-"),
            numeric_pages,
            row(&["A3", "Short row"]),
        ];
        let report = classify(&rows, &range());

        assert_eq!(report.counts.total, 1);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].row.number(), 3);
        assert_eq!(
            report.rejected[0].error,
            RowDecodeError::NotText {
                column: Column(7),
                found: "a number"
            }
        );
        assert_eq!(report.rejected[1].row.number(), 4);
        assert_eq!(
            report.rejected[1].to_string(),
            "row 4: column C is missing (row has 2 cells, 11 required)"
        );
    }

    #[test]
    fn test_bucket_counts_sum_to_total() {
        let statuses = ["unggah", "pemotretan", "x", "post processing", "penelusuran"];
        let links = ["-", "https://opac/1"];
        let rows: Vec<Vec<Value>> = statuses
            .iter()
            .flat_map(|status| links.iter().map(move |link| manuscript_row("A", status, link)))
            .collect();
        let report = classify(&rows, &range());

        let sum: usize = StatusBucket::iter().map(|b| report.counts.get(b)).sum();
        assert_eq!(sum, report.counts.total);
        assert_eq!(report.counts.total, rows.len());
    }

    #[test]
    fn test_classification_is_idempotent() {
        let rows = vec![
            manuscript_row("A1", "unggah", "-"),
            row(&["-"]),
            manuscript_row("A2", "pemotretan", "https://opac/2"),
        ];
        assert_eq!(classify(&rows, &range()), classify(&rows, &range()));
    }
}
