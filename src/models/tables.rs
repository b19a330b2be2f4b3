use serde::{Deserialize, Serialize};

use crate::error::TankError;

fn check_finite(values: &[f64], what: &str) -> Result<(), TankError> {
    if let Some(v) = values.iter().find(|v| !v.is_finite()) {
        return Err(TankError::InvalidTable(format!(
            "{what} contains a non-finite value: {v}"
        )));
    }
    Ok(())
}

fn check_strictly_ascending(axis: &[f64], what: &str) -> Result<(), TankError> {
    if axis.is_empty() {
        return Err(TankError::InvalidTable(format!("{what} is empty")));
    }
    check_finite(axis, what)?;
    if let Some(pair) = axis.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(TankError::InvalidTable(format!(
            "{what} must be strictly ascending, found {} followed by {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

/// Product temperature volume correction factors over a temperature × density grid.
///
/// `values[i][j]` is the factor at `temperatures[i]` and `densities[j]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VcfGrid {
    temperatures: Vec<f64>,
    densities: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl VcfGrid {
    /// Build a grid, rejecting empty or unsorted axes and ragged rows.
    pub fn new(
        temperatures: Vec<f64>,
        densities: Vec<f64>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, TankError> {
        check_strictly_ascending(&temperatures, "VCF temperature axis")?;
        check_strictly_ascending(&densities, "VCF density axis")?;
        if values.len() != temperatures.len() {
            return Err(TankError::InvalidTable(format!(
                "VCF grid has {} rows but {} temperatures",
                values.len(),
                temperatures.len()
            )));
        }
        for (i, row) in values.iter().enumerate() {
            if row.len() != densities.len() {
                return Err(TankError::InvalidTable(format!(
                    "VCF row for {} °C has {} values, expected {}",
                    temperatures[i],
                    row.len(),
                    densities.len()
                )));
            }
            check_finite(row, "VCF grid")?;
        }
        Ok(Self {
            temperatures,
            densities,
            values,
        })
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Stored factor at a temperature row and density column.
    pub fn value(&self, temperature_idx: usize, density_idx: usize) -> f64 {
        self.values[temperature_idx][density_idx]
    }
}

/// One row of the pressure correction table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PcfRow {
    #[serde(alias = "pressure")]
    pub pressure_bar: f64,
    pub factor: f64,
}

/// Pressure correction factors, strictly increasing by pressure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PcfTable {
    rows: Vec<PcfRow>,
}

impl PcfTable {
    pub fn new(rows: Vec<PcfRow>) -> Result<Self, TankError> {
        let pressures: Vec<f64> = rows.iter().map(|r| r.pressure_bar).collect();
        check_strictly_ascending(&pressures, "PCF pressure column")?;
        let factors: Vec<f64> = rows.iter().map(|r| r.factor).collect();
        check_finite(&factors, "PCF factor column")?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[PcfRow] {
        &self.rows
    }

    /// Lowest and highest pressure covered by the table.
    pub fn pressure_span(&self) -> (f64, f64) {
        (
            self.rows[0].pressure_bar,
            self.rows[self.rows.len() - 1].pressure_bar,
        )
    }
}

/// One row of the shell correction table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScfRow {
    #[serde(alias = "temperature")]
    pub temperature_c: f64,
    pub factor: f64,
}

/// Shell correction factors, looked up by exact shell temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScfTable {
    rows: Vec<ScfRow>,
}

impl ScfTable {
    pub fn new(rows: Vec<ScfRow>) -> Result<Self, TankError> {
        if rows.is_empty() {
            return Err(TankError::InvalidTable("SCF table is empty".to_string()));
        }
        let values: Vec<f64> = rows
            .iter()
            .flat_map(|r| [r.temperature_c, r.factor])
            .collect();
        check_finite(&values, "SCF table")?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ScfRow] {
        &self.rows
    }

    /// Shell temperatures accepted by the exact-match lookup.
    pub fn temperatures(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.temperature_c).collect()
    }
}

/// One row of the tank calibration (strapping) table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightCapacityRow {
    #[serde(alias = "height")]
    pub height_mm: f64,
    #[serde(alias = "capacity")]
    pub capacity_l: f64,
}

/// Liquid height to nominal capacity, sorted ascending by height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeightCapacityTable {
    rows: Vec<HeightCapacityRow>,
}

impl HeightCapacityTable {
    /// Build the table, sorting rows by height since source order is not guaranteed.
    pub fn new(mut rows: Vec<HeightCapacityRow>) -> Result<Self, TankError> {
        if rows.is_empty() {
            return Err(TankError::InvalidTable(
                "Height-capacity table is empty".to_string(),
            ));
        }
        let values: Vec<f64> = rows
            .iter()
            .flat_map(|r| [r.height_mm, r.capacity_l])
            .collect();
        check_finite(&values, "Height-capacity table")?;
        rows.sort_by(|a, b| a.height_mm.total_cmp(&b.height_mm));
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[HeightCapacityRow] {
        &self.rows
    }

    pub fn min_row(&self) -> &HeightCapacityRow {
        &self.rows[0]
    }

    pub fn max_row(&self) -> &HeightCapacityRow {
        &self.rows[self.rows.len() - 1]
    }
}

/// Gauge reference row: fill percentage, matching liquid height and capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentHeightRow {
    pub percent: f64,
    pub height_mm: f64,
    pub capacity_l: f64,
}

/// Fill percentage reference table used by the tank gauge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PercentHeightTable {
    rows: Vec<PercentHeightRow>,
}

impl PercentHeightTable {
    /// Derive capacities from `(percent, height_mm)` pairs and the tank's total capacity.
    pub fn from_percent_heights(
        pairs: impl IntoIterator<Item = (f64, f64)>,
        total_capacity_l: f64,
    ) -> Result<Self, TankError> {
        let mut rows: Vec<PercentHeightRow> = pairs
            .into_iter()
            .map(|(percent, height_mm)| PercentHeightRow {
                percent,
                height_mm,
                capacity_l: percent / 100.0 * total_capacity_l,
            })
            .collect();
        let values: Vec<f64> = rows
            .iter()
            .flat_map(|r| [r.percent, r.height_mm, r.capacity_l])
            .collect();
        check_finite(&values, "Percent-height table")?;
        rows.sort_by(|a, b| a.percent.total_cmp(&b.percent));
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[PercentHeightRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The four reference tables a calculation needs.
///
/// Built once and shared read-only by every calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSet {
    pub vcf: VcfGrid,
    pub pcf: PcfTable,
    pub scf: ScfTable,
    pub height_capacity: HeightCapacityTable,
}

impl TableSet {
    pub fn new(
        vcf: VcfGrid,
        pcf: PcfTable,
        scf: ScfTable,
        height_capacity: HeightCapacityTable,
    ) -> Self {
        Self {
            vcf,
            pcf,
            scf,
            height_capacity,
        }
    }
}
