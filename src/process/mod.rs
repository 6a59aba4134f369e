// src/process/mod.rs
//! Delimited record reader for the legacy `.txt` databases.

pub mod split;
pub mod utils;

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::trace;

use crate::error::{LineError, RecordError, RecordResult};
use split::ScriptSplit;

/// Column layout of one legacy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub delimiter: char,
    pub min_columns: usize,
    pub max_columns: usize,
    /// Trailing brace-quoted columns. When non-zero the layout is fixed at
    /// `min_columns` fields, the last `script_columns` of them being scripts.
    pub script_columns: usize,
}

impl RecordLayout {
    /// Plain comma separated table with a column count range.
    pub const fn columns(min_columns: usize, max_columns: usize) -> Self {
        Self {
            delimiter: ',',
            min_columns,
            max_columns,
            script_columns: 0,
        }
    }

    /// Comma separated table ending in `scripts` brace-quoted columns.
    pub const fn with_scripts(plain_columns: usize, scripts: usize) -> Self {
        Self {
            delimiter: ',',
            min_columns: plain_columns + scripts,
            max_columns: plain_columns + scripts,
            script_columns: scripts,
        }
    }
}

/// One parsed source line. Fields borrow from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// 1-based line number in the source file
    pub line: usize,
    fields: Vec<&'a str>,
}

impl<'a> RawRecord<'a> {
    pub fn new(line: usize, fields: Vec<&'a str>) -> Self {
        Self { line, fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    /// Leading id column, as written in the source.
    pub fn id(&self) -> &'a str {
        self.fields.first().map(|s| s.trim()).unwrap_or("")
    }

    pub fn field(&self, idx: usize) -> RecordResult<&'a str> {
        self.fields.get(idx).copied().ok_or_else(|| {
            RecordError::Rejected(format!(
                "line {} (record {}) has no column {}",
                self.line,
                self.id(),
                idx
            ))
        })
    }

    /// Column `idx` read as an integer (lenient, see [`utils::atoi`]).
    pub fn int(&self, idx: usize) -> RecordResult<i64> {
        self.field(idx).map(utils::atoi)
    }

    /// Column `idx` read as an identifier; `0` means "none".
    pub fn id_at(&self, idx: usize) -> RecordResult<u32> {
        self.field(idx).map(utils::parse_id)
    }
}

/// Turn one raw source line into a record.
///
/// `Ok(None)` means the line holds no record (comment, blank) and is skipped
/// silently; `Err` carries the diagnostic for a malformed line.
pub fn split_record<'a>(
    raw: &'a str,
    line: usize,
    layout: &RecordLayout,
) -> Result<Option<RawRecord<'a>>, LineError> {
    let Some(text) = split::strip_line(raw) else {
        return Ok(None);
    };

    let id_of = |fields: &[&str]| fields.first().map(|s| s.trim().to_string()).unwrap_or_default();

    if layout.script_columns == 0 {
        let fields = split::split_plain(text, layout.delimiter);
        if fields.len() < layout.min_columns {
            return Err(LineError::InsufficientColumns {
                line,
                id: id_of(&fields),
                found: fields.len(),
                need: layout.min_columns,
            });
        }
        if fields.len() > layout.max_columns {
            return Err(LineError::TooManyColumns {
                line,
                id: id_of(&fields),
                found: fields.len(),
                max: layout.max_columns,
            });
        }
        return Ok(Some(RawRecord::new(line, fields)));
    }

    let prefix = layout.min_columns.saturating_sub(layout.script_columns);
    match split::split_scripts(text, layout.delimiter, prefix, layout.script_columns) {
        ScriptSplit::Fields(fields) => Ok(Some(RawRecord::new(line, fields))),
        ScriptSplit::Insufficient(fields) => Err(LineError::InsufficientColumns {
            line,
            id: id_of(&fields),
            found: fields.len(),
            need: layout.min_columns,
        }),
        ScriptSplit::InvalidScript(fields, column) => Err(LineError::InvalidScript {
            line,
            id: id_of(&fields),
            column,
        }),
        ScriptSplit::Unbalanced(fields) => Err(LineError::MismatchedBraces {
            line,
            id: id_of(&fields),
        }),
    }
}

/// Iterate the records of a whole source text in line order.
///
/// Comment and blank lines are elided; every other line yields its 1-based
/// line number and either the record or the reason it was rejected.
pub fn read_records<'a>(
    text: &'a str,
    layout: RecordLayout,
) -> impl Iterator<Item = (usize, Result<RawRecord<'a>, LineError>)> + 'a {
    text.split_inclusive('\n')
        .enumerate()
        .filter_map(move |(idx, raw)| {
            let line = idx + 1;
            match split_record(raw, line, &layout) {
                Ok(Some(record)) => Some((line, Ok(record))),
                Ok(None) => {
                    trace!(line, "skipping comment or blank line");
                    None
                }
                Err(e) => Some((line, Err(e))),
            }
        })
}

/// Read a source file into memory. Invalid UTF-8 is replaced, not rejected.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM_LAYOUT: RecordLayout = RecordLayout::with_scripts(19, 3);

    #[test]
    fn plain_layout_checks_bounds() {
        let layout = RecordLayout::columns(3, 4);
        let rec = split_record("1,2,3\n", 7, &layout).unwrap().unwrap();
        assert_eq!(rec.line, 7);
        assert_eq!(rec.fields(), &["1", "2", "3"]);

        assert_eq!(
            split_record("9,2\n", 3, &layout),
            Err(LineError::InsufficientColumns {
                line: 3,
                id: "9".into(),
                found: 2,
                need: 3
            })
        );
        assert!(matches!(
            split_record("9,2,3,4,5", 4, &layout),
            Err(LineError::TooManyColumns { found: 5, max: 4, .. })
        ));
    }

    #[test]
    fn script_layout_keeps_item_scripts() {
        let line = "501,Red_Potion,Red Potion,0,10,,70,,,,,0xFFFFFFFF,63,2,,,,,,{ itemheal rand(45,65),0; },{},{}\n";
        let rec = split_record(line, 1, &ITEM_LAYOUT).unwrap().unwrap();
        assert_eq!(rec.len(), 22);
        assert_eq!(rec.id(), "501");
        assert_eq!(rec.field(1).unwrap(), "Red_Potion");
        assert_eq!(rec.field(19).unwrap(), " itemheal rand(45,65),0; ");
        assert_eq!(rec.field(20).unwrap(), "");
        assert_eq!(rec.field(21).unwrap(), "");
    }

    #[test]
    fn script_layout_rejects_with_line_and_id() {
        let line = "502,Orange_Potion,Orange Potion,0,50,,100,,,,,0xFFFFFFFF,63,2,,,,,,{ a; },{},{ b;\n";
        assert_eq!(
            split_record(line, 12, &ITEM_LAYOUT),
            Err(LineError::MismatchedBraces {
                line: 12,
                id: "502".into()
            })
        );

        let short = "503,Yellow_Potion,Yellow Potion\n";
        assert!(matches!(
            split_record(short, 13, &ITEM_LAYOUT),
            Err(LineError::InsufficientColumns { line: 13, .. })
        ));
    }

    #[test]
    fn field_access_is_bounds_checked() {
        let rec = RawRecord::new(5, vec!["10", "x"]);
        assert_eq!(rec.int(0).unwrap(), 10);
        assert_eq!(rec.id_at(1).unwrap(), 0);
        assert!(matches!(rec.field(2), Err(RecordError::Rejected(_))));
    }

    #[test]
    fn read_records_preserves_line_numbers() {
        let text = "// comment\n1,a\n\n   \n2,b\n3\n";
        let out: Vec<_> = read_records(text, RecordLayout::columns(2, 2)).collect();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].0, 2);
        assert_eq!(out[0].1.as_ref().unwrap().fields(), &["1", "a"]);
        assert_eq!(out[1].0, 5);
        assert_eq!(out[2].0, 6);
        assert!(out[2].1.is_err());
    }
}
