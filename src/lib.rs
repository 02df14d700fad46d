pub mod cli;
pub mod normalize;
pub mod schema;
pub mod sources;
pub mod writer;

pub use cli::{Cli, Commands};
