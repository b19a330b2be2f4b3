//! Export a result to CSV and JSON, then run the sample batch.
//!
//! Run from the project root:
//!   cargo run --example export_results

use std::path::Path;

use tank_mass_calculator::{
    io::{self, CsvFormat, JsonFormat, ResultWriter},
    models::CalculationInput,
    TankCalculator,
};

fn main() {
    let tables = io::load_tables("data").expect("Failed to load reference tables");
    let calc = TankCalculator::new(&tables);

    let result = calc
        .calculate(&CalculationInput::new(0.552, 24.0, 25.0, 610.0))
        .expect("Calculation failed");

    let csv_path = Path::new("tank_mass_results.csv");
    CsvFormat.write(&result, csv_path).expect("Failed to write CSV");
    println!("Wrote {}", csv_path.display());

    let json_path = Path::new("tank_mass_results.json");
    JsonFormat { pretty: true }
        .write(&result, json_path)
        .expect("Failed to write JSON");
    println!("Wrote {}", json_path.display());

    let inputs =
        io::read_inputs_csv("data/sample_inputs.csv").expect("Failed to read sample inputs");
    let outcomes = calc.calculate_batch(inputs);
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    println!("Batch: {} rows, {} failed", outcomes.len(), failed);

    // Clean up output files
    let _ = std::fs::remove_file(csv_path);
    let _ = std::fs::remove_file(json_path);
    println!("Cleaned up output files");
}
