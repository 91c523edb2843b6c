//! coverdb-cli — Command-line interface for coverdb-core
//!
//! This binary provides a simple way to inspect a coverage-area dataset
//! from your terminal and to resolve free-form delivery addresses against
//! it. It supports printing basic statistics, listing cities and zones,
//! substring search, address resolution, and writing the binary cache.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ coverdb-cli stats
//!
//! - List all cities (optionally restricted)
//!   $ coverdb-cli cities
//!   $ coverdb-cli --filter=Dhaka,Sylhet cities
//!
//! - List zones of a city
//!   $ coverdb-cli zones dhaka
//!
//! - Search areas by substring
//!   $ coverdb-cli search gulshan
//!
//! - Resolve an address
//!   $ coverdb-cli resolve "House 5, Road 11, Gulshan 1, Dhaka"
//!   $ coverdb-cli resolve --explain "near Mirpur, Dhaka"
//!
//! - Build the binary cache for faster subsequent loads
//!   $ coverdb-cli cache coverage.bin.gz
//!
//! Data source
//! -----------
//!
//! By default, the CLI loads the dataset bundled with the `coverdb-core`
//! crate. Use `--input <path>` to point to a custom `.json`/`.json.gz`
//! dataset or a previously written `.bin`/`.bin.gz` cache, and
//! `--filter <City,City,...>` to restrict loading to specific cities.
mod args;

use crate::args::{CliArgs, Commands};
use clap::Parser;
use coverdb_core::DefaultCoverageDb;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Determine input file (default dataset inside coverdb-core)
    let input_path = args.input.unwrap_or_else(|| {
        let dir = DefaultCoverageDb::default_data_dir();
        let filename = DefaultCoverageDb::default_dataset_filename();
        dir.join(filename).to_string_lossy().to_string()
    });
    // Parse filter if provided
    let city_filter: Option<Vec<&str>> = args.filter.as_ref().map(|s| {
        s.split(',')
            .map(|x| x.trim())
            .filter(|x| !x.is_empty())
            .collect()
    });

    // Load DB (with filter if any)
    let filter_slice = city_filter.as_deref();
    let db = DefaultCoverageDb::load_from_path(&input_path, filter_slice)?;

    match args.command {
        Commands::Stats => {
            let stats = db.stats();
            println!("Database statistics:");
            println!("  Coverage areas: {}", stats.areas);
            println!("  Cities: {}", stats.cities);
            println!("  Zones: {}", stats.zones);
        }

        Commands::Cities => {
            for city in db.city_names() {
                println!("{city}");
            }
        }

        Commands::Zones { city } => {
            let zones = db.zones_for_city(&city);
            if zones.is_empty() {
                eprintln!("No zones found for city: {city}");
            } else {
                println!("Zones in {city}:");
                for z in zones {
                    println!("- {z}");
                }
            }
        }

        Commands::Search { query } => {
            let matches = db.find_areas_by_substring(&query);
            if matches.is_empty() {
                println!("No areas found matching: {query}");
            } else {
                for a in matches {
                    println!("{} — {}, {} (id {})", a.area(), a.zone(), a.city(), a.id);
                }
            }
        }

        Commands::Resolve { address, explain } => {
            let resolver = db.resolver();
            match resolver.resolve_detailed(&address) {
                Some(res) => {
                    let a = res.area;
                    println!("Matched coverage area:");
                    println!("  Area: {}", a.area());
                    println!("  Zone: {}", a.zone());
                    println!("  City: {}", a.city());
                    println!("  Division: {}", a.division());
                    println!("  Id: {}", a.id);
                    println!("  Inside Dhaka: {}", a.inside_dhaka);
                    if explain {
                        println!("  Strategy: {}", res.strategy);
                        match res.score {
                            Some(score) => println!("  Score: {score:.3}"),
                            None => println!("  Score: exact"),
                        }
                    }
                }
                None => {
                    eprintln!("No coverage area matched: {address}");
                }
            }
        }

        Commands::Cache { output } => {
            db.save_cache(&output)?;
            println!("Wrote cache for {} areas to {output}", db.area_count());
        }
    }

    Ok(())
}
