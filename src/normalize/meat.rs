//! Meat production normalization: melts the per-category tonnage columns and
//! joins in slaughter counts via a grouped (country code, year) index.

use anyhow::{Context, Result};
use csv::StringRecord;
use serde::Serialize;
use std::collections::HashMap;

use super::frame::{melt, Frame};

/// Suffix marking the meat-quantity columns in the raw production table
const TONNES_SUFFIX: &str = "(tonnes)";

#[derive(Debug, Serialize)]
pub struct MeatProductionRow {
    pub food_id: String,
    pub country_id: String,
    pub year: i32,
    /// Exact source text of the measurement, carried through unreformatted
    pub amount_produced_in_tonnes: String,
    pub num_animals_slain: i64,
}

#[derive(Debug, Default, Clone, Copy)]
struct SlaughterCounts {
    goats: i64,
    sheep: i64,
    cattle: i64,
    pigs: i64,
    chickens: i64,
    turkeys: i64,
}

/// Slaughter counts aggregated by (country code, year).
///
/// Built once up front so the per-production-row lookup is a hash probe
/// rather than a scan over the auxiliary table.
pub struct SlaughterIndex {
    by_key: HashMap<(String, i32), SlaughterCounts>,
}

impl SlaughterIndex {
    pub fn build(frame: &Frame) -> Result<Self> {
        let code_idx = frame.column("Code")?;
        let year_idx = frame.column("Year")?;
        let goats_idx = frame.column("Goats (goats slaughtered)")?;
        let sheep_idx = frame.column("Sheep (sheeps slaughtered)")?;
        let cattle_idx = frame.column("Cattle (cattle slaughtered)")?;
        let pigs_idx = frame.column("Pigs (pigs slaughtered)")?;
        let chicken_idx = frame.column("Chicken (chicken slaughtered)")?;
        let turkey_idx = frame.column("Turkey (turkeys slaughtered)")?;

        let mut by_key: HashMap<(String, i32), SlaughterCounts> = HashMap::new();
        for row in &frame.rows {
            let code = frame.field(row, code_idx);
            if code.is_empty() {
                continue;
            }
            let year: i32 = frame
                .field(row, year_idx)
                .parse()
                .with_context(|| format!("bad Year in slaughter counts for '{}'", code))?;

            let counts = by_key.entry((code.to_string(), year)).or_default();
            counts.goats += count_field(frame, row, goats_idx)?;
            counts.sheep += count_field(frame, row, sheep_idx)?;
            counts.cattle += count_field(frame, row, cattle_idx)?;
            counts.pigs += count_field(frame, row, pigs_idx)?;
            counts.chickens += count_field(frame, row, chicken_idx)?;
            counts.turkeys += count_field(frame, row, turkey_idx)?;
        }

        Ok(Self { by_key })
    }

    /// Animals slain for a production category. Categories outside the rule
    /// set and (code, year) keys with no slaughter data both resolve to 0.
    pub fn animals_slain(&self, category: &str, code: &str, year: i32) -> i64 {
        let Some(c) = self.by_key.get(&(code.to_string(), year)) else {
            return 0;
        };
        match category {
            "Sheep and Goat" => c.goats + c.sheep,
            "Beef and Buffalo" => c.cattle,
            "Pigmeat" => c.pigs,
            "Poultry" => c.chickens + c.turkeys,
            _ => 0,
        }
    }
}

/// Parse a slaughter count cell; empty cells count as 0.
fn count_field(frame: &Frame, row: &StringRecord, idx: usize) -> Result<i64> {
    let raw = frame.field(row, idx);
    if raw.is_empty() {
        return Ok(0);
    }
    let n: f64 = raw.parse().with_context(|| {
        format!(
            "non-numeric slaughter count '{}' in {} dataset",
            raw, frame.name
        )
    })?;
    Ok(n as i64)
}

/// Drop the trailing unit annotation from a category column header,
/// e.g. "Beef and Buffalo (tonnes)" -> "Beef and Buffalo".
fn strip_category(header: &str) -> String {
    header
        .trim_end()
        .trim_end_matches(TONNES_SUFFIX)
        .trim_end()
        .to_string()
}

pub fn build(frame: &Frame, slain: &SlaughterIndex) -> Result<Vec<MeatProductionRow>> {
    let melted = melt(frame, &["Entity", "Code", "Year"], |h| {
        h.ends_with(TONNES_SUFFIX)
    })?;

    let mut rows = Vec::with_capacity(melted.len());
    for obs in melted {
        let code = obs.ids[1];
        // Regional aggregates ("World", continents) carry no country code.
        if code.is_empty() {
            continue;
        }
        let year: i32 = obs.ids[2].parse().with_context(|| {
            format!("bad Year '{}' in meat production for '{}'", obs.ids[2], code)
        })?;
        obs.value.parse::<f64>().with_context(|| {
            format!(
                "non-numeric tonnage '{}' in meat production for {} / {}",
                obs.value, code, year
            )
        })?;

        let food_id = strip_category(obs.variable);
        let num_animals_slain = slain.animals_slain(&food_id, code, year);

        rows.push(MeatProductionRow {
            food_id,
            country_id: code.to_string(),
            year,
            amount_produced_in_tonnes: obs.value.to_string(),
            num_animals_slain,
        });
    }

    Ok(rows)
}
