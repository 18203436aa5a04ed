//! Basic usage example for circledb-rs
//!
//! This example demonstrates how to:
//! - Load a district from the bundled sample data
//! - Search villages by (misspelled) name
//! - Look up a thana number
//! - Expand a picked village to every village sharing its thana

use circledb_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== circledb-rs Basic Usage Example ===\n");

    println!("Loading district Patna...");
    let mut session: Session = Session::default();
    session.load_with(&DirectorySource::bundled(), "Patna")?;
    let stats = session.store().stats();
    println!(
        "✓ {} records, {} circles, {} thanas\n",
        stats.records, stats.circles, stats.thanas
    );

    // Example 1: Name search tolerates typos
    println!("--- Example 1: Search \"Ramnagr\" ---");
    session.type_name("Ramnagr");
    for group in session.results() {
        println!(
            "Thana {:>3} | {:<10} | {}",
            group.thana_no,
            group.circle_name,
            group.villages.join(", ")
        );
    }
    println!();

    // Example 2: All-digit input is an exact thana lookup
    println!("--- Example 2: Thana 12 ---");
    session.type_number("12");
    for group in session.results() {
        println!("Circle {}: {}", group.circle_name, group.villages.join(", "));
    }
    println!();

    // Example 3: Suggestions, then a pick
    println!("--- Example 3: Pick from suggestions for \"Sultanpur\" ---");
    session.type_name("Sultanpur");
    for (i, r) in session.village_suggestions().iter().enumerate() {
        println!("{i}. {} (thana {}, {})", r.village_name, r.thana_no, r.circle_name);
    }
    if let Some(picked) = session.pick_village_suggestion(1) {
        println!("Picked {} in {}", picked.village_name, picked.circle_name);
        for group in session.results() {
            println!("Same thana: {}", group.villages.join(", "));
        }
    }

    Ok(())
}
