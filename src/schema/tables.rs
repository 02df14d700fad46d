//! Target relational schema for the curated agri-food tables

use super::types::*;

// =============================================================================
// Dimension Tables
// =============================================================================

pub static COUNTRY: TableSchema = TableSchema {
    name: "Country",
    source_file: "country.csv",
    columns: &[
        Column::new("id", ColumnType::VarChar(3)),
        Column::new("name", ColumnType::VarChar(255)),
    ],
    primary_key: &["id"],
    foreign_keys: &[],
};

pub static SECTOR: TableSchema = TableSchema {
    name: "Sector",
    source_file: "sector.csv",
    columns: &[
        Column::new("id", ColumnType::Int),
        Column::new("name", ColumnType::VarChar(255)),
    ],
    primary_key: &["id"],
    foreign_keys: &[],
};

// =============================================================================
// Fact Tables
// =============================================================================

pub static EMISSIONS: TableSchema = TableSchema {
    name: "Emissions",
    source_file: "emissions.csv",
    columns: &[
        Column::new("country_id", ColumnType::VarChar(3)),
        Column::new("sector_id", ColumnType::Int),
        Column::new("substance", ColumnType::VarChar(255)),
        Column::new("year", ColumnType::Year),
        Column::new("emission_amount", ColumnType::Decimal(18, 10)),
    ],
    primary_key: &["country_id", "sector_id", "substance", "year"],
    foreign_keys: &[
        ForeignKey::new("country_id", "Country"),
        ForeignKey::new("sector_id", "Sector"),
    ],
};

pub static MEAT_PRODUCTION: TableSchema = TableSchema {
    name: "MeatProduction",
    source_file: "meat_production.csv",
    columns: &[
        Column::new("food_id", ColumnType::VarChar(255)),
        Column::new("country_id", ColumnType::VarChar(3)),
        Column::new("year", ColumnType::Year),
        Column::new("amount_produced_in_tonnes", ColumnType::Decimal(10, 2)),
        Column::new("num_animals_slain", ColumnType::Int),
    ],
    primary_key: &["country_id", "food_id", "year"],
    foreign_keys: &[ForeignKey::new("country_id", "Country")],
};

pub static CROP_PRODUCTION: TableSchema = TableSchema {
    name: "CropProduction",
    source_file: "crop_production.csv",
    columns: &[
        Column::new("food_id", ColumnType::VarChar(255)),
        Column::new("country_id", ColumnType::VarChar(3)),
        Column::new("year", ColumnType::Year),
        Column::new(
            "amount_produced_in_tonnes_per_hectare",
            ColumnType::Decimal(10, 2),
        ),
    ],
    primary_key: &["food_id", "country_id", "year"],
    foreign_keys: &[ForeignKey::new("country_id", "Country")],
};

pub static FOOD_CONSUMPTION: TableSchema = TableSchema {
    name: "FoodConsumption",
    source_file: "food_consumption.csv",
    columns: &[
        Column::new("food_id", ColumnType::VarChar(255)),
        Column::new("country_id", ColumnType::VarChar(3)),
        Column::new("year", ColumnType::Year),
        Column::new("amount_consumed_in_tonnes", ColumnType::Decimal(18, 8)),
    ],
    primary_key: &["country_id", "food_id", "year"],
    foreign_keys: &[ForeignKey::new("country_id", "Country")],
};

/// All target tables, dimensions first so FK targets exist before the facts load.
pub static ALL_TABLES: &[&TableSchema] = &[
    &COUNTRY,
    &SECTOR,
    &EMISSIONS,
    &MEAT_PRODUCTION,
    &CROP_PRODUCTION,
    &FOOD_CONSUMPTION,
];

/// Look up a table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().copied().find(|t| t.name == name)
}

/// Get all table names in load order
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
