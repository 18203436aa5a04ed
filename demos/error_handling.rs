//! Error handling example for circledb-rs
//!
//! This example demonstrates proper error handling and edge cases

use circledb_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== circledb-rs Error Handling Example ===\n");
    let source = DirectorySource::bundled();
    let mut session: Session = Session::default();

    // Example 1: A district without data degrades to an empty session
    println!("--- Example 1: Loading a district with no file ---");
    match session.load_with(&source, "Supaul") {
        Ok(outcome) => println!("✓ Loaded: {outcome:?}"),
        Err(CircleDbError::DataUnavailable { district, reason }) => {
            println!("✗ No data for {district}: {reason}");
            session.type_name("Ramnagar");
            println!("  Search still works, results: {}", session.results().len());
        }
        Err(e) => return Err(e),
    }
    println!();

    // Example 2: Names that could leave the data directory are refused
    println!("--- Example 2: Unusable district names ---");
    for name in ["../secrets", "", "a/b"] {
        match source.fetch(name) {
            Ok(rows) => println!("  {name:?}: {} rows", rows.len()),
            Err(e) => println!("  {name:?}: {e}"),
        }
    }
    println!();

    // Example 3: A slow load is dropped when the user moved on
    println!("--- Example 3: Superseded load ---");
    let slow = session.select_district("Patna");
    let fast = session.select_district("Gaya");
    println!("  Gaya: {:?}", session.complete_load(&fast, source.fetch("Gaya"))?);
    println!("  Patna: {:?}", session.complete_load(&slow, source.fetch("Patna"))?);
    println!("  Active district: {:?}", session.district());
    println!();

    // Example 4: Queries below the length gate never search
    println!("--- Example 4: Short and odd queries ---");
    for query in ["", "Ra", "Ram", "   "] {
        session.type_name(query);
        println!("  name {query:?}: {} groups", session.results().len());
    }
    for query in ["", "10a", "104"] {
        session.type_number(query);
        println!("  number {query:?}: {} groups", session.results().len());
    }

    Ok(())
}
