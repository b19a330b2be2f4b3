use tracing::debug;

use crate::error::TankError;
use crate::models::{
    HeightCapacityTable, PcfRow, PcfTable, PercentHeightTable, ScfTable, VcfGrid,
};

use super::bracket::{find_bracket, Bracket};
use super::interpolation::{bilinear_interpolate_vcf, linear_interpolate};

/// Product temperature factor at `temperature` °C and `density` kg/L.
pub fn lookup_vcf(temperature: f64, density: f64, grid: &VcfGrid) -> f64 {
    let vcf = bilinear_interpolate_vcf(temperature, density, grid);
    debug!(temperature, density, vcf, "VCF lookup");
    vcf
}

/// Pressure correction factor at `pressure` bar.
///
/// Pressures outside the table are extrapolated along the line through the first
/// and last entries; they are not clamped.
pub fn lookup_pcf(pressure: f64, table: &PcfTable) -> f64 {
    let rows = table.rows();
    let bracket = find_bracket(rows, pressure, |r| r.pressure_bar);
    let pcf = match bracket {
        Bracket::Exact(i) => rows[i].factor,
        Bracket::Between(lo, hi) => interpolate_pcf(pressure, rows[lo], rows[hi]),
        Bracket::OutOfRange => interpolate_pcf(pressure, rows[0], rows[rows.len() - 1]),
    };
    debug!(pressure, pcf, ?bracket, "PCF lookup");
    pcf
}

fn interpolate_pcf(pressure: f64, lower: PcfRow, upper: PcfRow) -> f64 {
    linear_interpolate(
        pressure,
        lower.pressure_bar,
        upper.pressure_bar,
        lower.factor,
        upper.factor,
    )
}

/// Shell correction factor for an exact shell temperature.
pub fn lookup_scf(shell_temperature: f64, table: &ScfTable) -> Result<f64, TankError> {
    table
        .rows()
        .iter()
        .find(|r| r.temperature_c == shell_temperature)
        .map(|r| r.factor)
        .ok_or_else(|| {
            let listed = table
                .temperatures()
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            TankError::Lookup(format!(
                "Shell temperature {shell_temperature} °C not found in SCF table. \
                 Use a listed temperature from the SCF table ({listed})."
            ))
        })
}

/// Reference volume at a liquid height, and whether the height fell outside the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightLookup {
    pub volume_l: f64,
    pub clamped: bool,
}

/// Nominal capacity in litres at `height_mm`, clamped to the table's first and last rows.
pub fn lookup_reference_volume(height_mm: f64, table: &HeightCapacityTable) -> f64 {
    lookup_reference_volume_clamped(height_mm, table).volume_l
}

/// Like [`lookup_reference_volume`], also reporting whether a boundary clamp applied.
pub fn lookup_reference_volume_clamped(height_mm: f64, table: &HeightCapacityTable) -> HeightLookup {
    let first = table.min_row();
    let last = table.max_row();

    if height_mm <= first.height_mm {
        return HeightLookup {
            volume_l: first.capacity_l,
            clamped: height_mm < first.height_mm,
        };
    }
    if height_mm >= last.height_mm {
        return HeightLookup {
            volume_l: last.capacity_l,
            clamped: height_mm > last.height_mm,
        };
    }

    let rows = table.rows();
    let volume_l = match find_bracket(rows, height_mm, |r| r.height_mm) {
        Bracket::Exact(i) => rows[i].capacity_l,
        Bracket::Between(lo, hi) => {
            let (a, b) = (rows[lo], rows[hi]);
            if a.height_mm == b.height_mm {
                a.capacity_l
            } else {
                linear_interpolate(height_mm, a.height_mm, b.height_mm, a.capacity_l, b.capacity_l)
            }
        }
        // Only reachable for NaN heights
        Bracket::OutOfRange => {
            return HeightLookup {
                volume_l: last.capacity_l,
                clamped: true,
            }
        }
    };
    HeightLookup {
        volume_l,
        clamped: false,
    }
}

/// Capacity in litres at a fill percentage of the gauge table.
///
/// Percentages outside the table take the nearest edge row. An empty table yields 0.
pub fn capacity_from_percent(percent: f64, table: &PercentHeightTable) -> f64 {
    let rows = table.rows();
    if rows.is_empty() {
        return 0.0;
    }
    let (lower, upper) = match find_bracket(rows, percent, |r| r.percent) {
        Bracket::Exact(i) => return rows[i].capacity_l,
        Bracket::Between(lo, hi) => (rows[lo], rows[hi]),
        Bracket::OutOfRange => (rows[0], rows[rows.len() - 1]),
    };
    if percent <= lower.percent {
        return lower.capacity_l;
    }
    if percent >= upper.percent {
        return upper.capacity_l;
    }
    linear_interpolate(
        percent,
        lower.percent,
        upper.percent,
        lower.capacity_l,
        upper.capacity_l,
    )
}

/// Tank fill level at `height_mm` as a percentage of `total_capacity_l`, within 0..=100.
pub fn fill_percent(height_mm: f64, table: &HeightCapacityTable, total_capacity_l: f64) -> f64 {
    if total_capacity_l <= 0.0 {
        return 0.0;
    }
    let volume = lookup_reference_volume(height_mm, table);
    (volume / total_capacity_l * 100.0).clamp(0.0, 100.0)
}
