//! Typed readers for the CSV files the batch commands consume.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{WxcError, WxcResult};

/// A row type with the header columns it requires.
pub trait CsvRow: DeserializeOwned {
    const COLUMNS: &'static [&'static str];
}

/// Row of a caller-ID update file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallerIdRow {
    #[serde(rename = "Extension")]
    pub extension: String,
    #[serde(rename = "CallerID-Number")]
    pub caller_id_number: String,
}

impl CsvRow for CallerIdRow {
    const COLUMNS: &'static [&'static str] = &["Extension", "CallerID-Number"];
}

/// Row of a workspace provisioning file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkspaceRow {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Extension")]
    pub extension: String,
    #[serde(rename = "Direct Dial")]
    pub direct_dial: String,
}

impl CsvRow for WorkspaceRow {
    const COLUMNS: &'static [&'static str] = &["Location", "Name", "Extension", "Direct Dial"];
}

/// Read every row of `input`, paired with the 1-based line it starts on.
///
/// Header problems fail the whole read. A malformed data row is returned as
/// an error in its slot so the caller can decide whether to keep going.
pub fn read_rows<T: CsvRow, R: Read>(mut input: R) -> WxcResult<Vec<(usize, WxcResult<T>)>> {
    let mut text = Vec::new();
    input
        .read_to_end(&mut text)
        .map_err(|err| WxcError::Csv {
            row: 1,
            source: csv::Error::from(err),
        })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_slice());

    let headers = rdr
        .headers()
        .map_err(|source| WxcError::Csv { row: 1, source })?
        .clone();
    for &column in T::COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(WxcError::MissingColumn { column });
        }
    }

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut lines = LineCounter::new(&text, rdr.position().byte() as usize);
    loop {
        let read = rdr.read_record(&mut record);
        let row = lines.advance(rdr.position().byte() as usize);
        match read {
            Ok(true) => {
                let parsed: WxcResult<T> = record
                    .deserialize(Some(&headers))
                    .map_err(|source| WxcError::Csv { row, source });
                rows.push((row, parsed));
            }
            Ok(false) => break,
            Err(source) => {
                rows.push((row, Err(WxcError::Csv { row, source })));
                if lines.is_stalled() {
                    break;
                }
            }
        }
    }
    Ok(rows)
}

/// Maps the reader's byte offsets back to physical lines.
///
/// The reader skips empty lines without reporting them, and quoted fields may
/// span several lines, so record positions alone undercount.
struct LineCounter<'a> {
    text: &'a [u8],
    offset: usize,
    line: usize,
    stalled: bool,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a [u8], offset: usize) -> Self {
        let offset = offset.min(text.len());
        let line = 1 + count_newlines(&text[..offset]);
        Self {
            text,
            offset,
            line,
            stalled: false,
        }
    }

    /// Consume bytes up to `end` and return the line the record in them starts on.
    fn advance(&mut self, end: usize) -> usize {
        let end = end.clamp(self.offset, self.text.len());
        let span = &self.text[self.offset..end];
        let blank = span
            .iter()
            .take_while(|&&b| b == b'\n' || b == b'\r')
            .count();
        let start = self.line + count_newlines(&span[..blank]);

        self.line += count_newlines(span);
        self.stalled = end == self.offset;
        self.offset = end;
        start
    }

    fn is_stalled(&self) -> bool {
        self.stalled
    }
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_caller_id_rows() {
        let input = "Extension,CallerID-Number\n1001, 15551230000\n1002,15551230001\n";
        let rows = read_rows::<CallerIdRow, _>(input.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        let (line, first) = &rows[0];
        assert_eq!(*line, 2);
        assert_eq!(
            first.as_ref().unwrap(),
            &CallerIdRow {
                extension: "1001".to_string(),
                caller_id_number: "15551230000".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_column_fails_whole_file() {
        let input = "Location,Name,Extension\nHQ,Lobby,1001\n";
        let err = read_rows::<WorkspaceRow, _>(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            WxcError::MissingColumn {
                column: "Direct Dial"
            }
        ));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let input = "Name,Location,Notes,Extension,Direct Dial\nLobby,HQ,front,1001,5551234567\n";
        let rows = read_rows::<WorkspaceRow, _>(input.as_bytes()).unwrap();
        let row = rows[0].1.as_ref().unwrap();
        assert_eq!(row.location, "HQ");
        assert_eq!(row.direct_dial, "5551234567");
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let input = "Extension,CallerID-Number\n\n\n1001,15551230000\n\n1002,15551230001\n";
        let rows = read_rows::<CallerIdRow, _>(input.as_bytes()).unwrap();

        let lines: Vec<usize> = rows.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![4, 6]);
    }

    #[test]
    fn test_line_numbers_follow_quoted_line_breaks() {
        let input = "Location,Name,Extension,Direct Dial\nHQ,\"Lobby\nPhone\",1001,\nHQ,Annex,1002,\n";
        let rows = read_rows::<WorkspaceRow, _>(input.as_bytes()).unwrap();

        assert_eq!(rows[0].0, 2);
        assert_eq!(rows[0].1.as_ref().unwrap().name, "Lobby\nPhone");
        assert_eq!(rows[1].0, 4);
    }

    #[test]
    fn test_short_row_is_reported_with_line_number() {
        let input = "Extension,CallerID-Number\n1001,15551230000\n1002\n";
        let rows = read_rows::<CallerIdRow, _>(input.as_bytes()).unwrap();

        assert!(rows[0].1.is_ok());
        let (line, result) = &rows[1];
        assert_eq!(*line, 3);
        assert!(matches!(result, Err(WxcError::Csv { row: 3, .. })));
    }
}
