//! Emissions normalization: melts the year-columned EDGAR table and derives
//! the Sector and Country dimension tables from it.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::frame::{melt, Frame};

#[derive(Debug, Serialize)]
pub struct CountryRow {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct SectorRow {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct EmissionRow {
    pub country_id: String,
    pub sector_id: u32,
    pub substance: String,
    pub year: i32,
    /// Exact source text of the measurement, carried through unreformatted
    pub emission_amount: String,
}

/// Surrogate sector ids, assigned in first-seen order.
///
/// The id of a sector is its position in the order distinct sector names
/// first appear in the raw emissions table, starting at 0. This is the
/// load contract for Sector: stable for a fixed input file, pinned by test.
pub struct SectorIds {
    by_name: HashMap<String, u32>,
    ordered: Vec<String>,
}

impl SectorIds {
    pub fn assign<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut by_name = HashMap::new();
        let mut ordered = Vec::new();
        for name in names {
            if name.is_empty() || by_name.contains_key(name) {
                continue;
            }
            by_name.insert(name.to_string(), ordered.len() as u32);
            ordered.push(name.to_string());
        }
        Self { by_name, ordered }
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    pub fn rows(&self) -> Vec<SectorRow> {
        self.ordered
            .iter()
            .enumerate()
            .map(|(id, name)| SectorRow {
                id: id as u32,
                name: name.clone(),
            })
            .collect()
    }
}

/// The three tables derived from the raw emissions dataset
#[derive(Debug)]
pub struct EmissionsTables {
    pub emissions: Vec<EmissionRow>,
    pub sectors: Vec<SectorRow>,
    pub countries: Vec<CountryRow>,
}

pub fn build(frame: &Frame) -> Result<EmissionsTables> {
    let sector_idx = frame.column("Sector")?;
    let sectors = SectorIds::assign(frame.rows.iter().map(|row| frame.field(row, sector_idx)));

    // Year columns are the all-digit headers; everything else identifies the row.
    let melted = melt(frame, &["Sector", "Substance", "EDGAR Country Code"], |h| {
        !h.is_empty() && h.bytes().all(|b| b.is_ascii_digit())
    })?;

    let mut emissions = Vec::with_capacity(melted.len());
    for obs in melted {
        let (sector, substance, code) = (obs.ids[0], obs.ids[1], obs.ids[2]);

        // Rows without a sector label cannot be keyed; drop them.
        let Some(sector_id) = sectors.get(sector) else {
            continue;
        };

        let year: i32 = obs
            .variable
            .parse()
            .with_context(|| format!("bad year column '{}' in emissions dataset", obs.variable))?;
        obs.value.parse::<f64>().with_context(|| {
            format!(
                "non-numeric emission_amount '{}' for {} / {} / {}",
                obs.value, code, sector, year
            )
        })?;

        emissions.push(EmissionRow {
            country_id: code.to_string(),
            sector_id,
            substance: substance.to_string(),
            year,
            emission_amount: obs.value.to_string(),
        });
    }

    // Country: distinct non-empty (code, name) pairs, first-seen order.
    let code_idx = frame.column("EDGAR Country Code")?;
    let name_idx = frame.column("Country")?;
    let mut seen = HashSet::new();
    let mut countries = Vec::new();
    for row in &frame.rows {
        let code = frame.field(row, code_idx);
        let name = frame.field(row, name_idx);
        if code.is_empty() || name.is_empty() {
            continue;
        }
        if seen.insert((code.to_string(), name.to_string())) {
            countries.push(CountryRow {
                id: code.to_string(),
                name: name.to_string(),
            });
        }
    }

    Ok(EmissionsTables {
        emissions,
        sectors: sectors.rows(),
        countries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;

    fn raw_emissions() -> Frame {
        Frame {
            name: "emissions",
            headers: vec![
                "Sector".to_string(),
                "Substance".to_string(),
                "EDGAR Country Code".to_string(),
                "Country".to_string(),
                "2014".to_string(),
                "2015".to_string(),
            ],
            rows: vec![
                StringRecord::from(vec![
                    "Power Industry",
                    "CO2",
                    "USA",
                    "United States",
                    "100.5",
                    "110.25",
                ]),
                StringRecord::from(vec![
                    "Agriculture",
                    "CH4",
                    "USA",
                    "United States",
                    "7.1",
                    "7.2",
                ]),
                StringRecord::from(vec![
                    "Power Industry",
                    "CO2",
                    "NLD",
                    "Netherlands",
                    "20.0",
                    "21.0",
                ]),
            ],
        }
    }

    #[test]
    fn test_sector_ids_first_seen_order() {
        let ids = SectorIds::assign(vec!["Power Industry", "Agriculture", "Power Industry"]);
        assert_eq!(ids.get("Power Industry"), Some(0));
        assert_eq!(ids.get("Agriculture"), Some(1));
        assert_eq!(ids.get("Transport"), None);

        let rows = ids.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Power Industry");
        assert_eq!(rows[1].id, 1);
    }

    #[test]
    fn test_build_melts_year_columns() {
        let tables = build(&raw_emissions()).unwrap();

        // 3 rows x 2 year columns
        assert_eq!(tables.emissions.len(), 6);

        let first = &tables.emissions[0];
        assert_eq!(first.country_id, "USA");
        assert_eq!(first.sector_id, 0);
        assert_eq!(first.substance, "CO2");
        assert_eq!(first.year, 2014);
        assert_eq!(first.emission_amount, "100.5");
    }

    #[test]
    fn test_build_derives_dimensions() {
        let tables = build(&raw_emissions()).unwrap();

        assert_eq!(tables.sectors.len(), 2);
        assert_eq!(tables.sectors[0].name, "Power Industry");

        let ids: Vec<&str> = tables.countries.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["USA", "NLD"]);
    }

    #[test]
    fn test_build_rejects_non_numeric_amount() {
        let mut frame = raw_emissions();
        frame.rows[0] = StringRecord::from(vec![
            "Power Industry",
            "CO2",
            "USA",
            "United States",
            "oops",
            "110.25",
        ]);
        let err = build(&frame).unwrap_err();
        assert!(format!("{}", err).contains("oops"));
    }
}
