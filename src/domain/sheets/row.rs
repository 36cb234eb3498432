use std::fmt::Formatter;

/// A sheet row, stored zero-based and displayed one-based.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    index: u32,
}

impl Row {
    pub fn from_index(index: u32) -> Self {
        Row { index }
    }

    pub fn from_row(row: u32) -> Self {
        Row {
            index: row.saturating_sub(1),
        }
    }

    /// The row `offset` rows below this one.
    ///
    /// # Examples
    /// ```
    /// use manuscript_tracker::domain::sheets::row::Row;
    /// let first_data_row = Row::from_row(2);
    /// assert_eq!(first_data_row.below(0).number(), 2);
    /// assert_eq!(first_data_row.below(5).number(), 7);
    /// ```
    pub fn below(self, offset: usize) -> Self {
        let offset = u32::try_from(offset).unwrap_or(u32::MAX);
        Row::from_index(self.index.saturating_add(offset))
    }

    /// One-based row number, as shown in the spreadsheet UI.
    pub fn number(&self) -> u32 {
        self.index.saturating_add(1)
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.number())
    }
}
