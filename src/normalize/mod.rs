//! Dataset normalizer: reads the raw source tables and produces one curated
//! CSV per target-schema table, with keys enforced before anything is
//! written.

pub mod consumption;
pub mod crops;
pub mod emissions;
pub mod frame;
pub mod meat;

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::hash::Hash;
use std::path::Path;

use crate::schema::tables::{
    COUNTRY, CROP_PRODUCTION, EMISSIONS, FOOD_CONSUMPTION, MEAT_PRODUCTION, SECTOR,
};
use crate::sources;
use frame::Frame;

/// Row counts per curated table, reported back to `main`
#[derive(Debug)]
pub struct NormalizeSummary {
    pub tables: Vec<(&'static str, usize)>,
}

impl NormalizeSummary {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|(_, count)| count).sum()
    }
}

/// Run the full normalization: raw CSVs in, six curated CSVs out.
pub fn run(raw_dir: &Path, out_dir: &Path, cutoff_year: i32) -> Result<NormalizeSummary> {
    let emissions_raw = Frame::read(raw_dir, &sources::EMISSIONS_RAW)?;
    let slaughter_raw = Frame::read(raw_dir, &sources::SLAUGHTER_RAW)?;
    let meat_raw = Frame::read(raw_dir, &sources::MEAT_RAW)?;
    let crop_production_raw = Frame::read(raw_dir, &sources::CROP_PRODUCTION_RAW)?;
    let crop_consumption_raw = Frame::read(raw_dir, &sources::CROP_CONSUMPTION_RAW)?;
    let meat_consumption_raw = Frame::read(raw_dir, &sources::MEAT_CONSUMPTION_RAW)?;

    println!("Normalizing emissions...");
    let emissions::EmissionsTables {
        mut emissions,
        sectors,
        mut countries,
    } = emissions::build(&emissions_raw)?;

    println!("Normalizing meat production...");
    let slain = meat::SlaughterIndex::build(&slaughter_raw)?;
    let mut meat_production = meat::build(&meat_raw, &slain)?;

    println!("Normalizing crop production...");
    let mut crop_production = crops::build(&crop_production_raw)?;

    println!("Normalizing food consumption...");
    let mut food_consumption =
        consumption::build(&meat_consumption_raw, &crop_consumption_raw, cutoff_year)?;

    // Enforce schema keys before anything is written: fact rows must point
    // at a known country, and composite primary keys must be unique
    // (first occurrence wins).
    dedup_by_key(&mut countries, |c| c.id.clone());
    let country_ids: HashSet<String> = countries.iter().map(|c| c.id.clone()).collect();

    emissions.retain(|r| country_ids.contains(&r.country_id));
    dedup_by_key(&mut emissions, |r| {
        (
            r.country_id.clone(),
            r.sector_id,
            r.substance.clone(),
            r.year,
        )
    });

    meat_production.retain(|r| country_ids.contains(&r.country_id));
    dedup_by_key(&mut meat_production, |r| {
        (r.country_id.clone(), r.food_id.clone(), r.year)
    });

    crop_production.retain(|r| country_ids.contains(&r.country_id));
    dedup_by_key(&mut crop_production, |r| {
        (r.food_id.clone(), r.country_id.clone(), r.year)
    });

    food_consumption.retain(|r| country_ids.contains(&r.country_id));
    dedup_by_key(&mut food_consumption, |r| {
        (r.country_id.clone(), r.food_id.clone(), r.year)
    });

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {:?}", out_dir))?;

    // Stage every table as a temp file before any is renamed into place, so
    // a run either produces all six curated tables or none of them.
    let staged = (|| -> Result<Vec<(&'static str, &'static str, usize)>> {
        Ok(vec![
            (
                COUNTRY.name,
                COUNTRY.source_file,
                stage_table(out_dir, COUNTRY.source_file, &countries)?,
            ),
            (
                SECTOR.name,
                SECTOR.source_file,
                stage_table(out_dir, SECTOR.source_file, &sectors)?,
            ),
            (
                EMISSIONS.name,
                EMISSIONS.source_file,
                stage_table(out_dir, EMISSIONS.source_file, &emissions)?,
            ),
            (
                MEAT_PRODUCTION.name,
                MEAT_PRODUCTION.source_file,
                stage_table(out_dir, MEAT_PRODUCTION.source_file, &meat_production)?,
            ),
            (
                CROP_PRODUCTION.name,
                CROP_PRODUCTION.source_file,
                stage_table(out_dir, CROP_PRODUCTION.source_file, &crop_production)?,
            ),
            (
                FOOD_CONSUMPTION.name,
                FOOD_CONSUMPTION.source_file,
                stage_table(out_dir, FOOD_CONSUMPTION.source_file, &food_consumption)?,
            ),
        ])
    })();

    let staged = match staged {
        Ok(staged) => staged,
        Err(err) => {
            discard_staged(out_dir);
            return Err(err);
        }
    };

    let mut tables = Vec::with_capacity(staged.len());
    for (name, file, count) in staged {
        let path = out_dir.join(file);
        if let Err(err) = fs::rename(out_dir.join(format!("{}.tmp", file)), &path)
            .with_context(|| format!("failed to move curated table into place at {:?}", path))
        {
            discard_staged(out_dir);
            return Err(err);
        }
        println!("Done with {}.", file);
        tables.push((name, count));
    }

    Ok(NormalizeSummary { tables })
}

/// Keep the first row for each key; later duplicates are dropped.
fn dedup_by_key<T, K: Eq + Hash>(rows: &mut Vec<T>, key: impl Fn(&T) -> K) {
    let mut seen = HashSet::new();
    rows.retain(|row| seen.insert(key(row)));
}

/// Serialize rows to `<dir>/<file>.tmp`. The caller renames staged files
/// into place only once every table has been written.
fn stage_table<T: Serialize>(dir: &Path, file: &str, rows: &[T]) -> Result<usize> {
    let tmp = dir.join(format!("{}.tmp", file));

    let mut writer =
        csv::Writer::from_path(&tmp).with_context(|| format!("failed to create {:?}", tmp))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("failed to write a row of {:?}", tmp))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {:?}", tmp))?;

    Ok(rows.len())
}

/// Best-effort removal of staged temp files after a failed run.
fn discard_staged(dir: &Path) {
    for table in crate::schema::tables::ALL_TABLES {
        let _ = fs::remove_file(dir.join(format!("{}.tmp", table.source_file)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_by_key_keeps_first() {
        let mut rows = vec![("USA", 1), ("USA", 2), ("NLD", 3)];
        dedup_by_key(&mut rows, |r| r.0);
        assert_eq!(rows, vec![("USA", 1), ("NLD", 3)]);
    }
}
