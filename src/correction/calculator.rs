use crate::config::Settings;
use crate::correction::{
    calculate_with, fill_percent, lookup_pcf, lookup_reference_volume, lookup_scf, lookup_vcf,
    run_batch, run_batch_rows, BatchOutcome,
};
use crate::error::TankError;
use crate::models::{CalculationInput, CalculationResult, TableSet};

/// Unified API over one loaded table set and its settings.
pub struct TankCalculator<'a> {
    tables: &'a TableSet,
    settings: Settings,
}

impl<'a> TankCalculator<'a> {
    /// Create a calculator with default settings.
    pub fn new(tables: &'a TableSet) -> Self {
        Self {
            tables,
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tables(&self) -> &TableSet {
        self.tables
    }

    /// Full correction pipeline for one set of readings.
    pub fn calculate(&self, input: &CalculationInput) -> Result<CalculationResult, TankError> {
        calculate_with(input, self.tables, &self.settings)
    }

    pub fn calculate_batch(&self, inputs: Vec<CalculationInput>) -> Vec<BatchOutcome> {
        run_batch(inputs, self.tables, &self.settings)
    }

    /// Batch over rows read with [`crate::io::read_input_rows_csv`].
    pub fn calculate_batch_rows(
        &self,
        rows: Vec<Result<CalculationInput, TankError>>,
    ) -> Vec<BatchOutcome> {
        run_batch_rows(rows, self.tables, &self.settings)
    }

    pub fn lookup_vcf(&self, temperature: f64, density: f64) -> f64 {
        lookup_vcf(temperature, density, &self.tables.vcf)
    }

    pub fn lookup_pcf(&self, pressure: f64) -> f64 {
        lookup_pcf(pressure, &self.tables.pcf)
    }

    pub fn lookup_scf(&self, shell_temperature: f64) -> Result<f64, TankError> {
        lookup_scf(shell_temperature, &self.tables.scf)
    }

    /// Nominal capacity at a liquid height, independent of a full calculation.
    pub fn reference_volume(&self, height_mm: f64) -> f64 {
        lookup_reference_volume(height_mm, &self.tables.height_capacity)
    }

    /// Gauge fill level in percent of the configured total capacity.
    pub fn fill_percent(&self, height_mm: f64) -> f64 {
        fill_percent(
            height_mm,
            &self.tables.height_capacity,
            self.settings.total_capacity_l,
        )
    }
}
