use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::correction::BatchOutcome;
use crate::models::{CalculationResult, HeightCapacityTable, PcfTable, ScfTable, VcfGrid};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn heading(title: &str, width: usize) -> String {
    format!("\n{}\n{}\n", title.bold().green(), "=".repeat(width))
}

/// Format the calculation result card as a string.
pub fn format_result_card(result: &CalculationResult) -> String {
    let mut output = heading("Results", 50);

    let mut table = new_table();
    table.set_header(vec!["Quantity", "Value"]);

    let rows = [
        ("Reference Volume (L)", format!("{:.3}", result.reference_volume)),
        ("Product Temperature Factor (VCF)", format!("{:.6}", result.vcf)),
        ("Shell Correction Factor (SCF)", format!("{:.6}", result.scf)),
        ("Corrected Volume (L)", format!("{:.3}", result.corrected_volume)),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    if let Some(pcf) = result.pcf {
        table.add_row(vec![
            Cell::new(format!("PCF used ({:.1} bar)", result.used_pressure)),
            Cell::new(format!("{pcf:.6}")),
        ]);
    }
    table.add_row(vec![
        Cell::new("Product Density used (kg/L)"),
        Cell::new(format!("{:.3}", result.used_density)),
    ]);
    table.add_row(vec![
        Cell::new("Mass (kg)"),
        Cell::new(format!("{:.3}", result.mass)),
    ]);

    output.push_str(&format!("{table}\n"));
    if result.clamped.any() {
        output.push_str(&format!(
            "{}\n",
            format!(
                "Clamped to the table boundary: {}",
                result.clamped.fields().join(", ")
            )
            .yellow()
        ));
    }
    output
}

/// Print the calculation result card.
pub fn print_result_card(result: &CalculationResult) {
    print!("{}", format_result_card(result));
}

/// Format the product temperature factor grid.
pub fn format_vcf_table(grid: &VcfGrid) -> String {
    let mut output = heading("Thermal Factors (VCF)", 60);

    let mut table = new_table();
    let mut header = vec!["T (°C) \\ ρ (kg/L)".to_string()];
    header.extend(grid.densities().iter().map(|d| format!("{d:.3}")));
    table.set_header(header);

    for (t, row) in grid.temperatures().iter().zip(grid.rows()) {
        let mut cells = vec![Cell::new(format!("{t:.1}"))];
        cells.extend(row.iter().map(|v| Cell::new(format!("{v:.6}"))));
        table.add_row(cells);
    }

    output.push_str(&format!("{table}\n"));
    output
}

pub fn print_vcf_table(grid: &VcfGrid) {
    print!("{}", format_vcf_table(grid));
}

/// Format the pressure correction table.
pub fn format_pcf_table(pcf: &PcfTable) -> String {
    let mut output = heading("Pressure Correction Factors", 40);

    let mut table = new_table();
    table.set_header(vec!["Pressure (bar)", "PCF"]);
    for row in pcf.rows() {
        table.add_row(vec![
            Cell::new(format!("{:.1}", row.pressure_bar)),
            Cell::new(format!("{:.6}", row.factor)),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

pub fn print_pcf_table(pcf: &PcfTable) {
    print!("{}", format_pcf_table(pcf));
}

/// Format the shell correction table.
pub fn format_scf_table(scf: &ScfTable) -> String {
    let mut output = heading("Shell Correction Factors (SCF)", 40);

    let mut table = new_table();
    table.set_header(vec!["Shell Temperature (°C)", "SCF"]);
    for row in scf.rows() {
        table.add_row(vec![
            Cell::new(format!("{:.1}", row.temperature_c)),
            Cell::new(format!("{:.6}", row.factor)),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

pub fn print_scf_table(scf: &ScfTable) {
    print!("{}", format_scf_table(scf));
}

/// Format the height-capacity calibration table.
pub fn format_height_table(heights: &HeightCapacityTable) -> String {
    let mut output = heading("Height / Capacity", 40);

    let mut table = new_table();
    table.set_header(vec!["Height (mm)", "Capacity (L)"]);
    for row in heights.rows() {
        table.add_row(vec![
            Cell::new(format!("{:.1}", row.height_mm)),
            Cell::new(format!("{:.1}", row.capacity_l)),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

pub fn print_height_table(heights: &HeightCapacityTable) {
    print!("{}", format_height_table(heights));
}

/// Format a batch run, one line per input row.
pub fn format_batch_table(outcomes: &[BatchOutcome]) -> String {
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    let mut output = heading("Batch Results", 70);
    output.push_str(&format!(
        "{}\n",
        format!("{} rows | {} failed", outcomes.len(), failed).dimmed()
    ));

    let mut table = new_table();
    table.set_header(vec![
        "Row", "ρ (kg/L)", "T (°C)", "Height (mm)", "VCF", "Corr. Vol (L)", "Mass (kg)",
    ]);

    for outcome in outcomes {
        let mut cells = vec![Cell::new(outcome.row + 1)];
        match &outcome.input {
            Some(input) => cells.extend([
                Cell::new(format!("{:.3}", input.density)),
                Cell::new(format!("{:.1}", input.product_temperature)),
                Cell::new(format!("{:.1}", input.height_mm)),
            ]),
            None => cells.extend([Cell::new("-"), Cell::new("-"), Cell::new("-")]),
        }
        match &outcome.result {
            Ok(r) => cells.extend([
                Cell::new(format!("{:.6}", r.vcf)),
                Cell::new(format!("{:.3}", r.corrected_volume)),
                Cell::new(format!("{:.3}", r.mass)),
            ]),
            Err(e) => cells.extend([Cell::new(e.to_string()), Cell::new(""), Cell::new("")]),
        }
        table.add_row(cells);
    }

    output.push_str(&format!("{table}\n"));
    output
}

pub fn print_batch_table(outcomes: &[BatchOutcome]) {
    print!("{}", format_batch_table(outcomes));
}
