use serde::Serialize;

use super::{
    sheets::row_decoder::RawManuscript,
    status::{resolve_status, StatusBucket},
};

/// One tracked manuscript, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manuscript {
    pub call_number: String,
    pub title: String,
    pub bib_id: String,
    pub language: String,
    pub script: String,
    pub media: String,
    pub pages: String,
    pub dimensions: String,
    pub status: String,
    pub catalog_link: String,
    pub bucket: StatusBucket,
}

impl From<RawManuscript> for Manuscript {
    fn from(raw: RawManuscript) -> Self {
        let status = resolve_status(&raw.status, &raw.catalog_link);
        let bucket = StatusBucket::of(&status);
        Manuscript {
            call_number: raw.call_number,
            title: raw.title,
            bib_id: raw.bib_id,
            language: raw.language,
            script: raw.script,
            media: raw.media,
            pages: raw.pages,
            dimensions: raw.dimensions,
            status,
            catalog_link: raw.catalog_link,
            bucket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: &str, catalog_link: &str) -> RawManuscript {
        RawManuscript {
            call_number: "A1".to_string(),
            title: "Title A".to_string(),
            bib_id: "B1".to_string(),
            language: "id".to_string(),
            script: "jawi".to_string(),
            media: "manuscript".to_string(),
            pages: "10".to_string(),
            dimensions: "20x30".to_string(),
            status: status.to_string(),
            catalog_link: catalog_link.to_string(),
        }
    }

    #[test]
    fn test_fields_are_carried_over() {
        let manuscript = Manuscript::from(raw("pemotretan", "-"));
        assert_eq!(manuscript.call_number, "A1");
        assert_eq!(manuscript.script, "jawi");
        assert_eq!(manuscript.catalog_link, "-");
        assert_eq!(manuscript.status, "pemotretan");
        assert_eq!(manuscript.bucket, StatusBucket::Photography);
    }

    #[test]
    fn test_unlinked_upload_becomes_post_processing() {
        let manuscript = Manuscript::from(raw("unggah", "-"));
        assert_eq!(manuscript.status, "post processing");
        assert_eq!(manuscript.bucket, StatusBucket::PostProcessing);
    }

    #[test]
    fn test_linked_upload_stays_uploaded() {
        let manuscript = Manuscript::from(raw("selesai unggah", "https://opac.example/1"));
        assert_eq!(manuscript.status, "unggah");
        assert_eq!(manuscript.bucket, StatusBucket::Uploaded);
    }
}
