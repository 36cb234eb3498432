use std::{fmt::Formatter, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use super::{
    column::{parse_col, Column, ColumnParseError},
    row::Row,
};

static A1_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<sheet>'(?:[^']|'')+'|[^!']+)!)?(?P<start_col>[A-Za-z]+)(?P<start_row>[0-9]+)?(?:(?P<sep>:)(?P<end_col>[A-Za-z]+)?(?P<end_row>[0-9]+)?)?$",
    )
    .expect("A1 range pattern is valid")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum A1NotationParseError {
    #[error("'{0}' is not a valid A1 range")]
    Malformed(String),
    #[error("Error parsing column: {0}")]
    Column(ColumnParseError),
    #[error("Row numbers start at 1")]
    ZeroRow,
}

/// A range in A1 notation such as `rekap!A2:L` or `'Sheet 1'!B3:F20`.
///
/// The end of the range may omit its row (open-ended) or its column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct A1Range {
    pub sheet_name: Option<String>,
    pub start_column: Column,
    pub start_row: Option<Row>,
    pub end_column: Option<Column>,
    pub end_row: Option<Row>,
}

impl A1Range {
    /// Sheet row that holds the first value returned for this range.
    pub fn first_row(&self) -> Row {
        self.start_row.unwrap_or(Row::from_index(0))
    }
}

fn parse_row(digits: &str, input: &str) -> Result<Row, A1NotationParseError> {
    let number = digits
        .parse::<u32>()
        .map_err(|_| A1NotationParseError::Malformed(input.to_owned()))?;
    if number == 0 {
        return Err(A1NotationParseError::ZeroRow);
    }
    Ok(Row::from_row(number))
}

impl FromStr for A1Range {
    type Err = A1NotationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = A1_RANGE
            .captures(s.trim())
            .ok_or_else(|| A1NotationParseError::Malformed(s.to_owned()))?;

        let has_separator = captures.name("sep").is_some();
        let end_column = captures.name("end_col");
        let end_row = captures.name("end_row");
        if has_separator && end_column.is_none() && end_row.is_none() {
            return Err(A1NotationParseError::Malformed(s.to_owned()));
        }

        let sheet_name = captures.name("sheet").map(|m| {
            let name = m.as_str();
            match name.strip_prefix('\'').and_then(|n| n.strip_suffix('\'')) {
                Some(quoted) => quoted.replace("''", "'"),
                None => name.to_owned(),
            }
        });

        let start_column = parse_col(&captures["start_col"]).map_err(A1NotationParseError::Column)?;
        let start_row = captures
            .name("start_row")
            .map(|m| parse_row(m.as_str(), s))
            .transpose()?;
        let end_column = end_column
            .map(|m| parse_col(m.as_str()).map_err(A1NotationParseError::Column))
            .transpose()?;
        let end_row = end_row.map(|m| parse_row(m.as_str(), s)).transpose()?;

        Ok(A1Range {
            sheet_name,
            start_column,
            start_row,
            end_column,
            end_row,
        })
    }
}

impl TryFrom<String> for A1Range {
    type Error = A1NotationParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for A1Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(sheet_name) = &self.sheet_name {
            if sheet_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                write!(f, "{}!", sheet_name)?;
            } else {
                write!(f, "'{}'!", sheet_name.replace('\'', "''"))?;
            }
        }
        write!(f, "{}", self.start_column)?;
        if let Some(row) = self.start_row {
            write!(f, "{}", row)?;
        }
        if self.end_column.is_some() || self.end_row.is_some() {
            write!(f, ":")?;
            if let Some(column) = self.end_column {
                write!(f, "{}", column)?;
            }
            if let Some(row) = self.end_row {
                write!(f, "{}", row)?;
            }
        }
        Ok(())
    }
}
