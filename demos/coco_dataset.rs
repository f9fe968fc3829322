/// Flattening a COCO-style annotation bundle into a CSV table
use jsontab::{detect, normalize, JsonTable, TableOptions};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    println!("=== COCO annotation flattening ===\n");

    let dataset = json!({
        "images": [
            {"id": 1, "file_name": "street_01.jpg", "width": 1920, "height": 1080},
            {"id": 2, "file_name": "street_02.jpg", "width": 1920, "height": 1080}
        ],
        "categories": [
            {"id": 1, "name": "person"},
            {"id": 2, "name": "bicycle"},
            {"id": 3, "name": "car"}
        ],
        "annotations": [
            {"id": 101, "image_id": 1, "category_id": 1, "bbox": [120, 80, 60, 180], "area": 10800, "iscrowd": 0},
            {"id": 102, "image_id": 1, "category_id": 3, "bbox": [500, 300, 220, 140], "area": 30800, "iscrowd": 0},
            {"id": 103, "image_id": 2, "category_id": 2, "bbox": [50, 400, 90, 60], "area": 5400, "iscrowd": 0},
            {"id": 104, "image_id": 2, "category_id": 9, "area": 12, "iscrowd": 1}
        ]
    });

    // The detector classifies the bundle before any flattening happens
    println!("Detected format: {}\n", detect(&dataset));

    // Low-level path: just the normalizer
    let records = normalize(dataset.clone(), detect(&dataset));
    println!("One record per annotation ({} total):", records.len());
    for record in &records {
        println!("{}", serde_json::to_string(record)?);
    }

    // High-level path: the full pipeline plus export
    let table = JsonTable::from_value(dataset, TableOptions::default());
    println!("\n{}", table.summary());

    let out = std::env::temp_dir().join("coco_annotations.csv");
    table.to_csv(&out)?;
    println!("\nWrote {} rows to {}", table.len(), out.display());

    Ok(())
}
