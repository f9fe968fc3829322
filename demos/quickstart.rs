/// Quickstart example - the simplest possible usage
use jsontab::{JsonTable, TableOptions};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    println!("=== jsontab Quick Start ===\n");

    // Step 1: A document that is not tabular - a dict of lists
    let my_data = json!({
        "employees": [
            {"name": "  Alice ", "age": 30, "city": "Berlin"},
            {"name": "Bob", "age": null, "city": "Paris"},
            {"name": "Bob", "age": null, "city": "Paris"}
        ],
        "contractors": [
            {"name": "Carol", "age": "41", "city": "Oslo"}
        ]
    });

    println!("Original JSON:");
    println!("{}\n", serde_json::to_string_pretty(&my_data)?);

    // Step 2: Run the whole pipeline - detect, flatten, convert, clean
    let table = JsonTable::from_value(my_data, TableOptions::default());

    // Step 3: Look at what we got
    println!("{}\n", table.info());
    println!("{}\n", table.summary());

    println!("Records:");
    for record in table.records() {
        println!("{}", serde_json::to_string(record)?);
    }

    // Step 4: Slice and dice
    let by_city = table.sort_by("city", true)?;
    println!("\nSorted by city, first record: {:?}", by_city[0].get("city"));

    let contractors = table.filter("source", &json!("contractors"))?;
    println!("Contractors: {}", contractors.len());

    Ok(())
}
