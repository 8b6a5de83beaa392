use anyhow::Result;
use navigate_city::{
    bootstrap::rebuild,
    catalog::Catalog,
    cli::{Cli, Commands},
    schema::table_names,
};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Rebuild { db, data_dir } => {
            let start = Instant::now();

            println!("Rebuilding {:?} from {:?}...", db, data_dir);
            let report = rebuild(&db, &data_dir)?;

            for (table, count) in &report.tables {
                println!("  {}: {} rows", table, count);
            }

            let elapsed = start.elapsed();
            println!(
                "\nCreated {:?} ({} rows) in {:.1}s",
                db,
                report.total(),
                elapsed.as_secs_f64()
            );
        }

        Commands::Places { db } => {
            let catalog = Catalog::open(db)?;
            let places = catalog.places()?;
            println!("{}", serde_json::to_string_pretty(&places)?);
        }

        Commands::Lookup {
            db,
            dimension,
            value,
            category,
        } => {
            let catalog = Catalog::open(db)?;
            let rows = catalog.lookup(&dimension, &category, &value)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }

        Commands::Random { db, category } => {
            let catalog = Catalog::open(db)?;
            let rows = catalog.random_sample(&category)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }

        Commands::ListTables => {
            println!("Tables:\n");
            for name in table_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}
