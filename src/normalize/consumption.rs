//! Food consumption: union of the meat- and crop-consumption datasets into a
//! single table, with SUBJECT codes mapped to canonical food categories and
//! projected years cut off.

use anyhow::{Context, Result};
use serde::Serialize;

use super::crops::title_case;
use super::frame::Frame;

#[derive(Debug, Serialize)]
pub struct FoodConsumptionRow {
    pub food_id: String,
    pub country_id: String,
    pub year: i32,
    /// Exact source text of the measurement, carried through unreformatted
    pub amount_consumed_in_tonnes: String,
}

/// Canonical food-category label for a meat-consumption SUBJECT code.
/// Codes outside the mapping have no category; their rows are excluded
/// rather than carried with a null food_id.
fn subject_category(subject: &str) -> Option<&'static str> {
    match subject {
        "BEEF" => Some("Beef and Buffalo"),
        "PIG" => Some("Pigmeat"),
        "POULTRY" => Some("Poultry"),
        "SHEEP" => Some("Sheep and Goat"),
        _ => None,
    }
}

/// Build FoodConsumption: meat consumption first, then crop consumption,
/// keeping only rows strictly before `cutoff_year`.
pub fn build(meat: &Frame, crop: &Frame, cutoff_year: i32) -> Result<Vec<FoodConsumptionRow>> {
    let mut rows = Vec::new();
    build_meat(meat, cutoff_year, &mut rows)?;
    build_crop(crop, cutoff_year, &mut rows)?;
    Ok(rows)
}

fn build_meat(frame: &Frame, cutoff_year: i32, rows: &mut Vec<FoodConsumptionRow>) -> Result<()> {
    let location_idx = frame.column("LOCATION")?;
    let subject_idx = frame.column("SUBJECT")?;
    let time_idx = frame.column("TIME")?;
    let value_idx = frame.column("Value")?;

    for row in &frame.rows {
        let code = frame.field(row, location_idx);
        let value = frame.field(row, value_idx);
        if code.is_empty() || value.is_empty() {
            continue;
        }
        let Some(category) = subject_category(frame.field(row, subject_idx)) else {
            continue;
        };

        let year: i32 = frame.field(row, time_idx).parse().with_context(|| {
            format!(
                "bad TIME '{}' in meat consumption for '{}'",
                frame.field(row, time_idx),
                code
            )
        })?;
        if year >= cutoff_year {
            continue;
        }
        value.parse::<f64>().with_context(|| {
            format!(
                "non-numeric Value '{}' in meat consumption for {} / {}",
                value, code, year
            )
        })?;

        rows.push(FoodConsumptionRow {
            food_id: category.to_string(),
            country_id: code.to_string(),
            year,
            amount_consumed_in_tonnes: value.to_string(),
        });
    }

    Ok(())
}

fn build_crop(frame: &Frame, cutoff_year: i32, rows: &mut Vec<FoodConsumptionRow>) -> Result<()> {
    let location_idx = frame.column("LOCATION")?;
    let time_idx = frame.column("TIME")?;
    let value_idx = frame.column("Value")?;
    let commodity_idx = frame.column("Commodity")?;

    for row in &frame.rows {
        let code = frame.field(row, location_idx);
        let value = frame.field(row, value_idx);
        let commodity = frame.field(row, commodity_idx);
        if code.is_empty() || value.is_empty() || commodity.is_empty() {
            continue;
        }

        let year: i32 = frame.field(row, time_idx).parse().with_context(|| {
            format!(
                "bad TIME '{}' in crop consumption for '{}'",
                frame.field(row, time_idx),
                code
            )
        })?;
        if year >= cutoff_year {
            continue;
        }
        value.parse::<f64>().with_context(|| {
            format!(
                "non-numeric Value '{}' in crop consumption for {} / {}",
                value, code, year
            )
        })?;

        rows.push(FoodConsumptionRow {
            food_id: title_case(commodity),
            country_id: code.to_string(),
            year,
            amount_consumed_in_tonnes: value.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;

    fn meat_frame() -> Frame {
        Frame {
            name: "meat consumption",
            headers: vec![
                "LOCATION".to_string(),
                "SUBJECT".to_string(),
                "MEASURE".to_string(),
                "TIME".to_string(),
                "Value".to_string(),
            ],
            rows: vec![
                StringRecord::from(vec!["USA", "BEEF", "THND_TONNE", "2015", "12.5"]),
                StringRecord::from(vec!["USA", "FISH", "THND_TONNE", "2015", "9.9"]),
                StringRecord::from(vec!["NLD", "POULTRY", "THND_TONNE", "2030", "3.5"]),
            ],
        }
    }

    fn crop_frame() -> Frame {
        Frame {
            name: "crop consumption",
            headers: vec![
                "LOCATION".to_string(),
                "TIME".to_string(),
                "Value".to_string(),
                "Commodity".to_string(),
            ],
            rows: vec![
                StringRecord::from(vec!["USA", "2015", "100.5", "RICE"]),
                StringRecord::from(vec!["USA", "2024", "999", "RICE"]),
            ],
        }
    }

    #[test]
    fn test_subject_category_mapping() {
        assert_eq!(subject_category("BEEF"), Some("Beef and Buffalo"));
        assert_eq!(subject_category("PIG"), Some("Pigmeat"));
        assert_eq!(subject_category("POULTRY"), Some("Poultry"));
        assert_eq!(subject_category("SHEEP"), Some("Sheep and Goat"));
        assert_eq!(subject_category("FISH"), None);
    }

    #[test]
    fn test_build_unions_and_filters() {
        let rows = build(&meat_frame(), &crop_frame(), 2024).unwrap();

        // FISH has no category, the 2030 and 2024 rows are projections.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].food_id, "Beef and Buffalo");
        assert_eq!(rows[0].amount_consumed_in_tonnes, "12.5");
        assert_eq!(rows[1].food_id, "Rice");
        assert_eq!(rows[1].country_id, "USA");
    }

    #[test]
    fn test_cutoff_is_configurable() {
        let rows = build(&meat_frame(), &crop_frame(), 2031).unwrap();
        assert_eq!(rows.len(), 4);
    }
}
