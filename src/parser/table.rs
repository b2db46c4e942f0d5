//! Parser for comma-separated tabular resources with a header row.

use indexmap::IndexMap;

/// One table row: header cell to trimmed value, in column order.
pub type TableRow = IndexMap<String, String>;

/// Parsed table: rows in source line order.
pub type ParsedTable = Vec<TableRow>;

/// Parses comma-separated text into rows keyed by the header line.
///
/// Empty lines are dropped. The first remaining line is the header; each
/// later line is split on `,` and zipped positionally against it. Values
/// are trimmed. A short row simply lacks its trailing columns; fields
/// beyond the header length are ignored.
#[must_use]
pub fn parse_table(raw: &str) -> ParsedTable {
    let mut lines = raw.lines().filter(|line| !line.is_empty());
    let Some(header_line) = lines.next() else {
        return ParsedTable::new();
    };
    let headers: Vec<&str> = header_line.split(',').collect();

    lines
        .map(|line| {
            line.split(',')
                .zip(&headers)
                .map(|(value, header)| ((*header).to_string(), value.trim().to_string()))
                .collect()
        })
        .collect()
}
