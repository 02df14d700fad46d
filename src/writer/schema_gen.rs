use crate::schema::tables::ALL_TABLES;
use crate::schema::TableSchema;

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);
    let mut lines = Vec::new();

    for col in schema.columns {
        lines.push(format!("  {} {}", col.name, col.col_type.sql()));
    }

    lines.push(format!("  PRIMARY KEY ({})", schema.primary_key.join(", ")));

    for fk in schema.foreign_keys {
        lines.push(format!(
            "  FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&lines.join(",\n"));
    sql.push_str("\n);");

    sql
}

/// The full DDL preamble: one CREATE TABLE per target table, dimensions first
pub fn generate_ddl() -> String {
    let mut out = String::from("-- SQL DDL file: create_and_populate.sql\n\n");
    for schema in ALL_TABLES {
        out.push_str(&generate_create_table(schema));
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{COUNTRY, EMISSIONS};

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table(&EMISSIONS);
        assert!(sql.contains("CREATE TABLE Emissions"));
        assert!(sql.contains("country_id VARCHAR(3)"));
        assert!(sql.contains("emission_amount DECIMAL(18,10)"));
        assert!(sql.contains("PRIMARY KEY (country_id, sector_id, substance, year)"));
        assert!(sql.contains("FOREIGN KEY (sector_id) REFERENCES Sector(id)"));
    }

    #[test]
    fn test_generate_create_table_single_key() {
        let sql = generate_create_table(&COUNTRY);
        assert!(sql.contains("id VARCHAR(3)"));
        assert!(sql.contains("PRIMARY KEY (id)"));
        assert!(!sql.contains("FOREIGN KEY"));
    }

    #[test]
    fn test_generate_ddl_covers_all_tables() {
        let ddl = generate_ddl();
        for schema in ALL_TABLES {
            assert!(
                ddl.contains(&format!("CREATE TABLE {} (", schema.name)),
                "missing DDL for {}",
                schema.name
            );
        }
        // Dimensions must be declared before the facts that reference them.
        let country = ddl.find("CREATE TABLE Country").unwrap();
        let emissions = ddl.find("CREATE TABLE Emissions").unwrap();
        assert!(country < emissions);
    }
}
