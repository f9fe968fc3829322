//! jsontab-summary: inspect a JSON file's structure and column statistics
//!
//! Usage:
//!   # Structure report plus per-column summary
//!   jsontab-summary data.json
//!
//!   # Machine-readable statistics
//!   jsontab-summary data.json --stats-json
//!
//!   # Skip the type-conversion pass
//!   jsontab-summary data.json --no-convert

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use jsontab::{JsonTable, TableOptions};

#[derive(Parser, Debug)]
#[command(name = "jsontab-summary")]
#[command(about = "Inspect a JSON file's structure and column statistics", long_about = None)]
struct Args {
    /// Input JSON file
    #[arg(value_name = "FILE")]
    input: String,

    /// Print statistics as JSON instead of the formatted summary
    #[arg(long)]
    stats_json: bool,

    /// Don't infer and convert column types
    #[arg(long)]
    no_convert: bool,

    /// Number of records to show after the summary (default: 0)
    #[arg(long, short = 'n', default_value_t = 0)]
    head: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let options = TableOptions {
        convert_types: !args.no_convert,
        ..TableOptions::default()
    };

    let table = JsonTable::open_with(&args.input, options)
        .with_context(|| format!("failed to process '{}'", args.input))?;

    println!("{}", table.structure().render());
    println!();

    if args.stats_json {
        println!("{}", serde_json::to_string_pretty(&table.stats())?);
    } else {
        println!("{}", table.summary());
    }

    if args.head > 0 {
        println!();
        println!("First {} record(s):", args.head.min(table.len()));
        for record in table.head(args.head) {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
    }

    Ok(())
}
