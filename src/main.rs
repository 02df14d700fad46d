use agrifood_to_sql::{
    cli::{Cli, Commands},
    normalize,
    schema::table_names,
    writer::emit_script,
};
use anyhow::Result;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Normalize {
            raw_dir,
            out_dir,
            cutoff_year,
        } => {
            let start = Instant::now();

            println!("Normalizing raw datasets...");
            let summary = normalize::run(&raw_dir, &out_dir, cutoff_year)?;

            println!(
                "\nWrote {} curated rows to {:?} in {:.1}s",
                summary.total_rows(),
                out_dir,
                start.elapsed().as_secs_f64()
            );
        }

        Commands::Emit { data_dir, output } => {
            let start = Instant::now();

            println!("Emitting SQL script...");
            let statements = emit_script(&data_dir, &output)?;

            println!(
                "\nCreated {:?} ({} insert statements) in {:.1}s",
                output,
                statements,
                start.elapsed().as_secs_f64()
            );
        }

        Commands::Run {
            raw_dir,
            out_dir,
            output,
            cutoff_year,
        } => {
            let start = Instant::now();

            println!("Normalizing raw datasets...");
            let summary = normalize::run(&raw_dir, &out_dir, cutoff_year)?;

            println!("\nEmitting SQL script...");
            let statements = emit_script(&out_dir, &output)?;

            println!(
                "\nCreated {:?} ({} curated rows, {} insert statements) in {:.1}s",
                output,
                summary.total_rows(),
                statements,
                start.elapsed().as_secs_f64()
            );
        }

        Commands::ListTables => {
            println!("Target tables:\n");
            for name in table_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}
