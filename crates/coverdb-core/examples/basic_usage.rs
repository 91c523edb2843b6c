//! Basic usage example for coverdb-core
//!
//! This example demonstrates how to:
//! - Build a coverage database from JSON
//! - Inspect cities, zones, and statistics
//! - Resolve free-form delivery addresses

use coverdb_core::{DefaultCoverageDb, Result};

const DATASET: &str = r#"[
    {"id": 1, "division": "Dhaka", "city": "Dhaka", "zone": "Gulshan",
     "area": "Gulshan 1", "insideDhaka": true},
    {"id": 2, "division": "Dhaka", "city": "Dhaka", "zone": "Gulshan",
     "area": "Gulshan 2", "insideDhaka": true},
    {"id": 3, "division": "Dhaka", "city": "Dhaka", "zone": "Mirpur",
     "area": "Mirpur 10", "insideDhaka": true},
    {"id": 4, "division": "Chattogram", "city": "Chattogram",
     "zone": "Agrabad", "area": "Agrabad C/A", "insideDhaka": false}
]"#;

fn main() -> Result<()> {
    println!("=== coverdb-core Basic Usage Example ===\n");

    // Build the database from inline JSON; production code would use
    // DefaultCoverageDb::load() or load_from_path() instead.
    let db = DefaultCoverageDb::from_json_str(DATASET)?;

    // Example 1: Statistics
    println!("--- Example 1: Database statistics ---");
    let stats = db.stats();
    println!("Areas: {}", stats.areas);
    println!("Cities: {}", stats.cities);
    println!("Zones: {}\n", stats.zones);

    // Example 2: Browse cities and zones
    println!("--- Example 2: Cities and zones ---");
    for city in db.city_names() {
        println!("{city}: {:?}", db.zones_for_city(city));
    }
    println!();

    // Example 3: Substring search
    println!("--- Example 3: Substring search ---");
    for a in db.find_areas_by_substring("gulshan") {
        println!("{} — {}, {}", a.area(), a.zone(), a.city());
    }
    println!();

    // Example 4: Resolve addresses
    println!("--- Example 4: Address resolution ---");
    let resolver = db.resolver();
    let addresses = [
        "House 5, Road 11, Gulshan 1, Dhaka",
        "near Mirpur, Dhaka",
        "Agrabad, Chattogram",
        "somewhere unknown",
    ];
    for address in addresses {
        match resolver.resolve_detailed(address) {
            Some(res) => println!(
                "{address:45} -> {} ({}, via {})",
                res.area.area(),
                res.area.city(),
                res.strategy
            ),
            None => println!("{address:45} -> no match"),
        }
    }

    Ok(())
}
