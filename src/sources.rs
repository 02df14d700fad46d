//! Raw upstream dataset contracts.
//!
//! Each raw dataset has a fixed file name under the raw directory and a set
//! of columns the upstream provider guarantees. The column names are a
//! contract: the normalizer fails fast when one is absent instead of
//! guessing at the table shape.

/// A raw source dataset expected in the raw input directory
#[derive(Debug, Clone)]
pub struct RawSource {
    /// Human-readable dataset name used in diagnostics
    pub name: &'static str,
    /// Fixed file name under the raw directory
    pub file_name: &'static str,
    /// Columns that must be present
    pub required_columns: &'static [&'static str],
}

/// EDGAR greenhouse-gas emissions, one column per year
pub static EMISSIONS_RAW: RawSource = RawSource {
    name: "emissions",
    file_name: "emissions.csv",
    required_columns: &["Sector", "Substance", "EDGAR Country Code", "Country"],
};

/// Livestock slaughter counts per country and year
pub static SLAUGHTER_RAW: RawSource = RawSource {
    name: "slaughter counts",
    file_name: "slaughter_counts.csv",
    required_columns: &[
        "Code",
        "Year",
        "Goats (goats slaughtered)",
        "Sheep (sheeps slaughtered)",
        "Cattle (cattle slaughtered)",
        "Pigs (pigs slaughtered)",
        "Chicken (chicken slaughtered)",
        "Turkey (turkeys slaughtered)",
    ],
};

/// Meat production, one column per meat category (suffixed "(tonnes)")
pub static MEAT_RAW: RawSource = RawSource {
    name: "meat production",
    file_name: "meat_production.csv",
    required_columns: &["Entity", "Code", "Year"],
};

pub static CROP_PRODUCTION_RAW: RawSource = RawSource {
    name: "crop production",
    file_name: "crop_production.csv",
    required_columns: &["LOCATION", "TIME", "Value", "Commodity"],
};

pub static CROP_CONSUMPTION_RAW: RawSource = RawSource {
    name: "crop consumption",
    file_name: "crop_consumption.csv",
    required_columns: &["LOCATION", "TIME", "Value", "Commodity"],
};

pub static MEAT_CONSUMPTION_RAW: RawSource = RawSource {
    name: "meat consumption",
    file_name: "meat_consumption.csv",
    required_columns: &["LOCATION", "SUBJECT", "MEASURE", "TIME", "Value"],
};
