//! Tabular decoder: comma-separated text → ordered records.
//!
//! Positional and forgiving. The first line names the columns; every other
//! line is split on commas and mapped onto those names. Short rows are padded
//! with `""`, long rows lose their extra values, and nothing here ever fails.
//! Lines end at `\n` or `\r\n`. A blank line after the header is still a
//! row, with every field empty.
//!
//! There is no quoting support. A `"` is an ordinary character and a comma
//! always separates fields, so values cannot contain commas or line breaks.

use csv::{QuoteStyle, ReaderBuilder, Terminator, Trim, WriterBuilder};

use crate::model::Record;

/// Decode delimited text into records keyed by the (trimmed) header names.
pub fn decode_table(text: &str) -> Vec<Record> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    // One reader per line: the csv reader would otherwise skip empty lines
    // and end a record at a lone `\r`.
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .trim(Trim::All);

    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    let headers = match lines.next() {
        Some(header) => split_line(&builder, header, 1),
        None => return Vec::new(),
    };

    let mut records = Vec::new();
    for (line_no, line) in lines.enumerate() {
        let values = split_line(&builder, line, line_no + 2);

        if values.len() > headers.len() {
            log::trace!(
                "row {} has {} values for {} columns, dropping extras",
                line_no + 2,
                values.len(),
                headers.len()
            );
        }

        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.as_str(), values.get(i).map_or("", String::as_str)))
            .collect();
        records.push(record);
    }

    records
}

/// Comma-split and trim one line. An empty line has no values.
fn split_line(builder: &ReaderBuilder, line: &str, line_no: usize) -> Vec<String> {
    let mut reader = builder.from_reader(line.as_bytes());
    match reader.records().next() {
        Some(Ok(values)) => values.iter().map(str::to_string).collect(),
        Some(Err(e)) => {
            log::warn!("unreadable values on line {line_no}: {e}");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Encode records back to delimited text: header = the first record's keys,
/// one comma-joined row per record, no quoting.
///
/// Inverse of [`decode_table`] for values without commas or line breaks.
pub fn encode_table(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let header: Vec<&str> = first.keys().collect();
    let rows = records
        .iter()
        .map(|record| header.iter().map(|field| record.get(field)).collect::<Vec<_>>());

    write_delimited(&header, rows, QuoteStyle::Never).unwrap_or_else(|e| {
        log::error!("failed to encode table: {e}");
        String::new()
    })
}

/// Write an unquoted header line followed by rows under `values` quoting.
///
/// Lines are joined with `\n`; there is no trailing line break.
pub(crate) fn write_delimited<'a>(
    header: &[&str],
    rows: impl Iterator<Item = Vec<&'a str>>,
    values: QuoteStyle,
) -> Result<String, String> {
    let mut head = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());
    head.write_record(header).map_err(|e| e.to_string())?;
    let buf = head.into_inner().map_err(|e| e.to_string())?;

    let mut body = WriterBuilder::new()
        .quote_style(values)
        .flexible(true)
        .from_writer(buf);
    for row in rows {
        // The writer emits `""` for a record with no bytes, whatever the
        // quote style, and that reads back as a literal `""`. Unquoted, an
        // empty single-field row is an empty line.
        let lone_empty = row.len() <= 1 && row.iter().all(|v| v.is_empty());
        if lone_empty && matches!(values, QuoteStyle::Never) {
            let mut inner = body.into_inner().map_err(|e| e.to_string())?;
            inner.push(b'\n');
            body = WriterBuilder::new()
                .quote_style(values)
                .flexible(true)
                .from_writer(inner);
            continue;
        }
        body.write_record(&row).map_err(|e| e.to_string())?;
    }
    let buf = body.into_inner().map_err(|e| e.to_string())?;

    let mut text = String::from_utf8(buf).map_err(|e| e.to_string())?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
