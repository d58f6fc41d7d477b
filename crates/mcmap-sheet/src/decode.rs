//! Delimited-text decoding into a [`RawTable`].

use csv::ReaderBuilder;

use crate::error::SheetError;
use crate::types::RawTable;

/// Field delimiter guessed from the header line: tab when present, else comma.
#[must_use]
pub fn sniff_delimiter(body: &str) -> u8 {
    let header = body.lines().next().unwrap_or_default();
    if header.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

/// Decode a published sheet export.
///
/// Tab-separated exports carry no quoting, so quotes in a TSV cell are kept
/// literally. Comma-separated exports use standard CSV quoting. Rows may be
/// shorter or longer than the header row.
///
/// # Errors
///
/// Returns [`SheetError::Parse`] when the payload cannot be read as
/// delimited text.
pub fn parse_table(body: &str) -> Result<RawTable, SheetError> {
    let body = body.trim_start_matches('\u{FEFF}');
    if body.trim().is_empty() {
        return Ok(RawTable::default());
    }

    let delimiter = sniff_delimiter(body);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .quoting(delimiter != b'\t')
        .flexible(true)
        .has_headers(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| SheetError::Parse {
            context: "header row".to_owned(),
            source,
        })?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| SheetError::Parse {
            context: format!("data row {index}"),
            source,
        })?;
        rows.push(record.iter().map(str::to_owned).collect());
    }

    tracing::debug!(
        columns = headers.len(),
        rows = rows.len(),
        delimiter = %char::from(delimiter).escape_default(),
        "decoded sheet export"
    );

    Ok(RawTable::new(headers, rows))
}
