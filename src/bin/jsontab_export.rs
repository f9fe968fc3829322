//! jsontab-export: normalize a JSON file and export it as CSV or JSON
//!
//! Usage:
//!   # Flatten any JSON shape into a CSV table
//!   jsontab-export annotations.json --csv out.csv
//!
//!   # Normalized records as a JSON array
//!   jsontab-export nested.json --json out.json
//!
//!   # Keep the data exactly as normalized, no cleaning
//!   jsontab-export raw.json --csv out.csv --keep-nulls --keep-duplicates --no-trim --no-convert

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use jsontab::{JsonTable, TableOptions};

#[derive(Parser, Debug)]
#[command(name = "jsontab-export")]
#[command(about = "Normalize a JSON file and export it as CSV or JSON", long_about = None)]
struct Args {
    /// Input JSON file
    #[arg(value_name = "FILE")]
    input: String,

    /// Write the records as CSV to this path
    #[arg(long)]
    csv: Option<String>,

    /// Write the records as a JSON array to this path
    #[arg(long)]
    json: Option<String>,

    /// Don't infer and convert column types
    #[arg(long)]
    no_convert: bool,

    /// Don't trim whitespace from strings
    #[arg(long)]
    no_trim: bool,

    /// Keep null keys and null array elements
    #[arg(long)]
    keep_nulls: bool,

    /// Keep exact duplicate records
    #[arg(long)]
    keep_duplicates: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.csv.is_none() && args.json.is_none() {
        bail!("nothing to do: pass --csv and/or --json");
    }

    let options = TableOptions {
        convert_types: !args.no_convert,
        trim: !args.no_trim,
        drop_null: !args.keep_nulls,
        drop_duplicates: !args.keep_duplicates,
    };

    let table = JsonTable::open_with(&args.input, options)
        .with_context(|| format!("failed to process '{}'", args.input))?;

    let (rows, cols) = table.shape();
    eprintln!(
        "Detected format: {} ({} records, {} columns)",
        table.format(),
        rows,
        cols
    );

    if let Some(path) = &args.csv {
        table
            .to_csv(path)
            .with_context(|| format!("failed to export CSV to '{}'", path))?;
        println!("Exported {} records to {}", rows, path);
    }

    if let Some(path) = &args.json {
        table
            .to_json(path)
            .with_context(|| format!("failed to export JSON to '{}'", path))?;
        println!("Exported {} records to {}", rows, path);
    }

    Ok(())
}
