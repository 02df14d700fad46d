//! Crop production normalization: column renames plus commodity-label
//! title-casing so crop names line up with the other food tables.

use anyhow::{Context, Result};
use serde::Serialize;

use super::frame::Frame;

#[derive(Debug, Serialize)]
pub struct CropProductionRow {
    pub food_id: String,
    pub country_id: String,
    pub year: i32,
    /// Exact source text of the measurement, carried through unreformatted
    pub amount_produced_in_tonnes_per_hectare: String,
}

/// Title-case a commodity label (e.g. "RICE" -> "Rice", "soybean oil" ->
/// "Soybean Oil"). Word boundaries fall on non-alphabetic characters.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut start_of_word = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if start_of_word {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(c);
            start_of_word = true;
        }
    }
    out
}

pub fn build(frame: &Frame) -> Result<Vec<CropProductionRow>> {
    let location_idx = frame.column("LOCATION")?;
    let time_idx = frame.column("TIME")?;
    let value_idx = frame.column("Value")?;
    let commodity_idx = frame.column("Commodity")?;

    let mut rows = Vec::with_capacity(frame.rows.len());
    for row in &frame.rows {
        let code = frame.field(row, location_idx);
        let value = frame.field(row, value_idx);
        let commodity = frame.field(row, commodity_idx);
        if code.is_empty() || value.is_empty() || commodity.is_empty() {
            continue;
        }

        let year: i32 = frame.field(row, time_idx).parse().with_context(|| {
            format!(
                "bad TIME '{}' in crop production for '{}'",
                frame.field(row, time_idx),
                code
            )
        })?;
        value.parse::<f64>().with_context(|| {
            format!(
                "non-numeric Value '{}' in crop production for {} / {}",
                value, code, year
            )
        })?;

        rows.push(CropProductionRow {
            food_id: title_case(commodity),
            country_id: code.to_string(),
            year,
            amount_produced_in_tonnes_per_hectare: value.to_string(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("RICE"), "Rice");
        assert_eq!(title_case("soybean oil"), "Soybean Oil");
        assert_eq!(title_case("WHEAT, DURUM"), "Wheat, Durum");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_build_renames_and_title_cases() {
        let frame = Frame {
            name: "crop production",
            headers: vec![
                "LOCATION".to_string(),
                "TIME".to_string(),
                "Value".to_string(),
                "Commodity".to_string(),
            ],
            rows: vec![
                StringRecord::from(vec!["USA", "2015", "6.5", "RICE"]),
                StringRecord::from(vec!["NLD", "2014", "3.2", "WHEAT"]),
            ],
        };

        let rows = build(&frame).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].food_id, "Rice");
        assert_eq!(rows[0].country_id, "USA");
        assert_eq!(rows[0].year, 2015);
        assert_eq!(rows[0].amount_produced_in_tonnes_per_hectare, "6.5");
    }
}
