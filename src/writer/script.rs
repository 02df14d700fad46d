//! SQL script emission: DDL preamble plus one INSERT per curated row.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::schema_gen::generate_ddl;
use crate::schema::tables::ALL_TABLES;
use crate::schema::TableSchema;

/// A single SQL literal, typed for rendering
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    /// Exact source text of an integer or decimal, emitted bare
    Number(String),
    /// Anything else, emitted single-quoted
    Text(String),
}

impl SqlValue {
    /// Classify a CSV field. Numeric fields keep their exact source text;
    /// everything else becomes a quoted string.
    pub fn from_field(field: &str) -> SqlValue {
        if field.is_empty() {
            SqlValue::Null
        } else if is_numeric(field) {
            SqlValue::Number(field.to_string())
        } else {
            SqlValue::Text(field.to_string())
        }
    }

    /// Render as a SQL literal. Embedded single quotes are doubled so the
    /// generated statement stays valid.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Number(n) => n.clone(),
            SqlValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

/// A plain integer or decimal. Rejects the exotic float spellings
/// (`NaN`, `inf`, hex) that `f64::from_str` would otherwise accept.
fn is_numeric(field: &str) -> bool {
    field
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        && field.parse::<f64>().map_or(false, |v| v.is_finite())
}

/// Emit the SQL script for every curated table present in `data_dir`.
/// Returns the number of INSERT statements written.
pub fn emit_script(data_dir: &Path, output: &Path) -> Result<u64> {
    let file_name = output
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("script.sql");
    let tmp = output.with_file_name(format!("{}.tmp", file_name));

    let file = File::create(&tmp).with_context(|| format!("failed to create {:?}", tmp))?;
    let mut out = BufWriter::new(file);

    out.write_all(generate_ddl().as_bytes())
        .with_context(|| format!("failed to write DDL to {:?}", tmp))?;

    let mut total: u64 = 0;
    for schema in ALL_TABLES {
        let path = data_dir.join(schema.source_file);
        if !path.exists() {
            println!("{}: skipped (no {} in {:?})", schema.name, schema.source_file, data_dir);
            continue;
        }

        let count = write_inserts(&mut out, schema, &path)?;
        total += count;
        // Blank separator between table blocks
        out.write_all(b"\n")?;
        println!("Done with {}.", schema.name);
    }

    out.flush()
        .with_context(|| format!("failed to flush {:?}", tmp))?;
    drop(out);

    fs::rename(&tmp, output)
        .with_context(|| format!("failed to move SQL script into place at {:?}", output))?;

    Ok(total)
}

/// Write one INSERT per row of a curated table. The column list comes from
/// the file header, lower-cased to match the DDL identifiers.
fn write_inserts(out: &mut impl Write, schema: &TableSchema, path: &Path) -> Result<u64> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("failed to open {:?}", path))?;
    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read header of {:?}", path))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let prefix = format!("INSERT INTO {} ({}) VALUES (", schema.name, columns.join(", "));

    let mut count: u64 = 0;
    for record in reader.records() {
        let record = record.with_context(|| format!("failed to read a row of {:?}", path))?;
        let values: Vec<String> = record
            .iter()
            .map(|field| SqlValue::from_field(field.trim()).to_literal())
            .collect();
        writeln!(out, "{}{});", prefix, values.join(", "))?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_pass_through_verbatim() {
        assert_eq!(SqlValue::from_field("2015").to_literal(), "2015");
        assert_eq!(SqlValue::from_field("-3.50").to_literal(), "-3.50");
        assert_eq!(SqlValue::from_field("1.0e10").to_literal(), "1.0e10");
    }

    #[test]
    fn test_strings_are_quoted_and_escaped() {
        assert_eq!(SqlValue::from_field("USA").to_literal(), "'USA'");
        assert_eq!(
            SqlValue::from_field("Côte d'Ivoire").to_literal(),
            "'Côte d''Ivoire'"
        );
        assert_eq!(SqlValue::from_field("O''x").to_literal(), "'O''''x'");
    }

    #[test]
    fn test_exotic_floats_are_strings() {
        assert_eq!(SqlValue::from_field("NaN").to_literal(), "'NaN'");
        assert_eq!(SqlValue::from_field("inf").to_literal(), "'inf'");
        assert_eq!(SqlValue::from_field("0x10").to_literal(), "'0x10'");
    }

    #[test]
    fn test_empty_is_null() {
        assert_eq!(SqlValue::from_field("").to_literal(), "NULL");
    }
}
