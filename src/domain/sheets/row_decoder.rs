use serde_json::Value;
use thiserror::Error;

use super::column::Column;

/// Cell offsets within a data row, relative to the first column of the range.
pub mod columns {
    pub const CALL_NUMBER: usize = 0;
    pub const TITLE: usize = 1;
    pub const BIB_ID: usize = 2;
    pub const LANGUAGE: usize = 3;
    pub const SCRIPT: usize = 4;
    pub const MEDIA: usize = 5;
    pub const PAGES: usize = 6;
    pub const DIMENSIONS: usize = 7;
    pub const STATUS: usize = 8;
    // Offset 9 is not part of the record.
    pub const CATALOG_LINK: usize = 10;

    pub const REQUIRED: usize = CATALOG_LINK + 1;
}

/// Call numbers that mark a row as a placeholder rather than a manuscript.
pub const PLACEHOLDER_CALL_NUMBERS: [&str; 2] = ["-", "#REF!"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowDecodeError {
    #[error("column {column} is missing (row has {len} cells, {required} required)")]
    MissingColumn {
        column: Column,
        len: usize,
        required: usize,
    },
    #[error("column {column} holds {found} instead of text")]
    NotText { column: Column, found: &'static str },
}

/// Text fields of a data row, exactly as they appear in the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawManuscript {
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
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedRow {
    /// The call number is a placeholder; the row carries no manuscript.
    Placeholder,
    Manuscript(RawManuscript),
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty value",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RowDecoder {
    start_column: Column,
}

impl RowDecoder {
    pub fn new(start_column: Column) -> Self {
        Self { start_column }
    }

    fn text(&self, cells: &[Value], offset: usize) -> Result<String, RowDecodeError> {
        let column = self.start_column.offset(offset);
        match cells.get(offset) {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(other) => Err(RowDecodeError::NotText {
                column,
                found: kind_of(other),
            }),
            None => Err(RowDecodeError::MissingColumn {
                column,
                len: cells.len(),
                required: columns::REQUIRED,
            }),
        }
    }

    /// Decodes one row. The placeholder check runs before any other column is
    /// validated, so a placeholder row is accepted even when it is short.
    pub fn decode(&self, cells: &[Value]) -> Result<DecodedRow, RowDecodeError> {
        let call_number = self.text(cells, columns::CALL_NUMBER)?;
        if PLACEHOLDER_CALL_NUMBERS.contains(&call_number.as_str()) {
            return Ok(DecodedRow::Placeholder);
        }

        Ok(DecodedRow::Manuscript(RawManuscript {
            call_number,
            title: self.text(cells, columns::TITLE)?,
            bib_id: self.text(cells, columns::BIB_ID)?,
            language: self.text(cells, columns::LANGUAGE)?,
            script: self.text(cells, columns::SCRIPT)?,
            media: self.text(cells, columns::MEDIA)?,
            pages: self.text(cells, columns::PAGES)?,
            dimensions: self.text(cells, columns::DIMENSIONS)?,
            status: self.text(cells, columns::STATUS)?,
            catalog_link: self.text(cells, columns::CATALOG_LINK)?,
        }))
    }
}
