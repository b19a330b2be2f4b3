use colored::Colorize;

use crate::correction::{capacity_from_percent, fill_percent, lookup_reference_volume_clamped};
use crate::models::{HeightCapacityTable, PercentHeightTable};

const BAR_WIDTH: usize = 40;
const LOW_LEVEL_PERCENT: f64 = 25.0;

/// A single level reading for the text gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeReading {
    pub height_mm: f64,
    pub volume_l: f64,
    pub percent: f64,
    pub clamped: bool,
}

impl GaugeReading {
    pub fn from_height(height_mm: f64, table: &HeightCapacityTable, total_capacity_l: f64) -> Self {
        let lookup = lookup_reference_volume_clamped(height_mm, table);
        Self {
            height_mm,
            volume_l: lookup.volume_l,
            percent: fill_percent(height_mm, table, total_capacity_l),
            clamped: lookup.clamped,
        }
    }
}

/// Format a horizontal fill bar with the level, volume and reference marks.
pub fn format_tank_gauge(reading: &GaugeReading, marks: Option<&PercentHeightTable>) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Tank Gauge".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let percent = reading.percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let bar = "\u{2588}".repeat(filled);
    let empty = "\u{2591}".repeat(BAR_WIDTH - filled);
    let bar = if percent < LOW_LEVEL_PERCENT {
        bar.yellow()
    } else {
        bar.green()
    };

    output.push_str(&format!("  [{bar}{empty}] {percent:>5.1}%\n"));
    output.push_str(&format!("  Height:   {:>10.1} mm\n", reading.height_mm));
    output.push_str(&format!("  Capacity: {:>10.1} L\n", reading.volume_l));

    if reading.clamped {
        output.push_str(&format!(
            "  {}\n",
            "Height outside the calibration table.".yellow()
        ));
    }
    if percent < LOW_LEVEL_PERCENT {
        output.push_str(&format!("  {}\n", "Low level".yellow().bold()));
    }

    if let Some(table) = marks.filter(|t| !t.is_empty()) {
        output.push_str(&format!("\n  {:>7}  {:>10}  {:>10}\n", "Fill", "Height", "Capacity"));
        output.push_str(&format!("  {}\n", "-".repeat(32)));
        for mark in [25.0, 50.0, 75.0, 100.0] {
            let Some(row) = table.rows().iter().find(|r| r.percent == mark) else {
                continue;
            };
            output.push_str(&format!(
                "  {:>6.0}%  {:>7.1} mm  {:>8.1} L\n",
                mark,
                row.height_mm,
                capacity_from_percent(mark, table)
            ));
        }
    }

    output.push('\n');
    output
}

/// Print the text tank gauge.
pub fn print_tank_gauge(reading: &GaugeReading, marks: Option<&PercentHeightTable>) {
    print!("{}", format_tank_gauge(reading, marks));
}
