//! Decoded spreadsheet payload, before any interpretation.
//!
//! ## Observed shape of the published sheet export
//!
//! - Headers are typed by hand and intermittently carry trailing spaces
//!   (`"Statut "`), so every lookup trims them first.
//! - Rows can be shorter than the header row when trailing cells are empty;
//!   missing cells read as absent, never as an error.
//! - Cells are raw text: `CA` holds values like `"1 234,56 €"`, coordinates
//!   may use a comma decimal separator, `Services` is comma-delimited.

/// A decoded table: header names as read plus rows of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One row of cells, read by column index.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    cells: &'a [String],
}

impl RawTable {
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = RawRecord<'_>> {
        self.rows.iter().map(|cells| RawRecord { cells })
    }
}

impl<'a> RawRecord<'a> {
    /// Cell at `index`, or `None` past the end of a short row.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&'a str> {
        self.cells.get(index).map(String::as_str)
    }
}
