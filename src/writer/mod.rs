pub mod schema_gen;
pub mod script;

pub use schema_gen::{generate_create_table, generate_ddl};
pub use script::{emit_script, SqlValue};
