//! In-memory representation of a raw tabular dataset.

use anyhow::{bail, Context, Result};
use csv::StringRecord;
use std::path::Path;

use crate::sources::RawSource;

/// A raw table: header plus string-typed rows, indexed by column name.
pub struct Frame {
    /// Dataset name used in diagnostics
    pub name: &'static str,
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl Frame {
    /// Read `source` from the raw directory, verifying its column contract.
    pub fn read(raw_dir: &Path, source: &RawSource) -> Result<Self> {
        let path = raw_dir.join(source.file_name);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .with_context(|| format!("failed to open {} dataset at {:?}", source.name, path))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("failed to read header of {} dataset", source.name))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .with_context(|| format!("failed to read a row of the {} dataset", source.name))?;
            rows.push(record);
        }

        let frame = Frame {
            name: source.name,
            headers,
            rows,
        };

        for col in source.required_columns {
            frame.column(col)?;
        }

        Ok(frame)
    }

    /// Index of a column, naming the dataset and column when absent.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .with_context(|| {
                format!(
                    "expected column '{}' not found in {} dataset",
                    name, self.name
                )
            })
    }

    /// Field value at a column index, trimmed; out-of-range reads as empty.
    pub fn field<'a>(&self, row: &'a StringRecord, idx: usize) -> &'a str {
        row.get(idx).unwrap_or("").trim()
    }
}

/// One observation produced by [`melt`].
pub struct MeltRow<'a> {
    /// Identifying values, in `id_vars` order
    pub ids: Vec<&'a str>,
    /// Header of the value column this observation came from
    pub variable: &'a str,
    pub value: &'a str,
}

/// Unpivot wide value columns into long form: one row per (id tuple, value
/// column) pair. Columns matching neither `id_vars` nor `is_value_column`
/// are dropped. Observations with an empty value cell are dropped as well,
/// since they would surface as nulls in key or measure columns downstream.
pub fn melt<'a>(
    frame: &'a Frame,
    id_vars: &[&str],
    is_value_column: impl Fn(&str) -> bool,
) -> Result<Vec<MeltRow<'a>>> {
    let id_idx: Vec<usize> = id_vars
        .iter()
        .map(|col| frame.column(col))
        .collect::<Result<_>>()?;

    let value_idx: Vec<usize> = frame
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| is_value_column(h))
        .map(|(i, _)| i)
        .collect();

    if value_idx.is_empty() {
        bail!("no value columns to unpivot in {} dataset", frame.name);
    }

    let mut out = Vec::with_capacity(frame.rows.len() * value_idx.len());
    for row in &frame.rows {
        for &vi in &value_idx {
            let value = frame.field(row, vi);
            if value.is_empty() {
                continue;
            }
            out.push(MeltRow {
                ids: id_idx.iter().map(|&i| frame.field(row, i)).collect(),
                variable: &frame.headers[vi],
                value,
            });
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> Frame {
        Frame {
            name: "sample",
            headers: vec![
                "Code".to_string(),
                "2014".to_string(),
                "2015".to_string(),
                "Notes".to_string(),
            ],
            rows: vec![
                StringRecord::from(vec!["USA", "1.5", "2.5", "x"]),
                StringRecord::from(vec!["NLD", "3.0", "4.0", "y"]),
            ],
        }
    }

    #[test]
    fn test_melt_row_count() {
        let frame = sample_frame();
        let melted = melt(&frame, &["Code"], |h| {
            h.bytes().all(|b| b.is_ascii_digit())
        })
        .unwrap();

        // 2 value columns x 2 rows
        assert_eq!(melted.len(), 4);
        assert_eq!(melted[0].ids, vec!["USA"]);
        assert_eq!(melted[0].variable, "2014");
        assert_eq!(melted[0].value, "1.5");
    }

    #[test]
    fn test_melt_drops_empty_values() {
        let mut frame = sample_frame();
        frame.rows[1] = StringRecord::from(vec!["NLD", "", "4.0", "y"]);

        let melted = melt(&frame, &["Code"], |h| {
            h.bytes().all(|b| b.is_ascii_digit())
        })
        .unwrap();

        assert_eq!(melted.len(), 3);
    }

    #[test]
    fn test_missing_column_is_diagnosed() {
        let frame = sample_frame();
        let err = frame.column("Country").unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("'Country'"), "got: {}", msg);
        assert!(msg.contains("sample"), "got: {}", msg);
    }

    #[test]
    fn test_melt_requires_value_columns() {
        let frame = sample_frame();
        assert!(melt(&frame, &["Code"], |_| false).is_err());
    }
}
