//! Error handling example for coverdb-core
//!
//! Demonstrates loader error cases and the resolver's "no match is not an
//! error" contract.

use coverdb_core::{CoverError, DefaultCoverageDb};

fn main() -> coverdb_core::Result<()> {
    println!("=== coverdb-core Error Handling Example ===\n");

    // Example 1: Loading a missing dataset
    println!("--- Example 1: Missing dataset file ---");
    match DefaultCoverageDb::load_from_path("no/such/coverage.json.gz", None) {
        Ok(db) => println!("✓ Loaded {} areas", db.area_count()),
        Err(e) => println!("✗ As expected: {e}"),
    }
    println!();

    // Example 2: Unsupported file format
    println!("--- Example 2: Unsupported format ---");
    match DefaultCoverageDb::load_from_path("coverage.csv", None) {
        Ok(_) => println!("unexpectedly loaded"),
        Err(e @ CoverError::UnsupportedFormat(_)) => println!("✗ As expected: {e}"),
        Err(e) => println!("✗ Other error: {e}"),
    }
    println!();

    // Example 3: Malformed rows are skipped, not errors
    println!("--- Example 3: Rows without an area are dropped ---");
    let db = DefaultCoverageDb::from_json_str(
        r#"[
            {"id": 1, "city": "Dhaka", "zone": "Badda", "area": "Merul Badda"},
            {"id": 2, "city": "Dhaka", "zone": "Badda"}
        ]"#,
    )?;
    println!("Loaded {} of 2 rows\n", db.area_count());

    // Example 4: "No match" is None, never an error
    println!("--- Example 4: Unmatched addresses ---");
    let resolver = db.resolver();
    for address in ["", "!!!", "completely unrelated text"] {
        match resolver.resolve(address) {
            Some(a) => println!("{address:30} -> {}", a.area()),
            None => println!("{address:30} -> no match (None)"),
        }
    }

    Ok(())
}
