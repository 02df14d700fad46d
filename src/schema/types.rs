/// Column data type, rendered verbatim into the DDL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnType {
    /// VARCHAR(n)
    VarChar(u16),
    Int,
    Year,
    /// DECIMAL(precision, scale)
    Decimal(u8, u8),
}

impl ColumnType {
    pub fn sql(&self) -> String {
        match self {
            ColumnType::VarChar(len) => format!("VARCHAR({})", len),
            ColumnType::Int => "INT".to_string(),
            ColumnType::Year => "YEAR".to_string(),
            ColumnType::Decimal(precision, scale) => format!("DECIMAL({},{})", precision, scale),
        }
    }
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub col_type: ColumnType,
}

impl Column {
    pub const fn new(name: &'static str, col_type: ColumnType) -> Self {
        Self { name, col_type }
    }
}

/// Foreign key reference
#[derive(Debug, Clone)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
}

impl ForeignKey {
    pub const fn new(column: &'static str, references_table: &'static str) -> Self {
        Self {
            column,
            references_table,
            references_column: "id",
        }
    }
}

/// Table schema definition
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    /// Curated CSV file this table is loaded from
    pub source_file: &'static str,
    pub columns: &'static [Column],
    /// Primary key columns, possibly composite
    pub primary_key: &'static [&'static str],
    pub foreign_keys: &'static [ForeignKey],
}
