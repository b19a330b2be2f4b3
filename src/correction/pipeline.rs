use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::TankError;
use crate::models::{CalculationInput, CalculationResult, ClampFlags, TableSet};

use super::lookup::{lookup_pcf, lookup_reference_volume_clamped, lookup_scf, lookup_vcf};
use super::validation::validate_input;

/// Compute the corrected volume and mass for one set of readings using default settings.
pub fn calculate(
    input: &CalculationInput,
    tables: &TableSet,
) -> Result<CalculationResult, TankError> {
    calculate_with(input, tables, &Settings::default())
}

/// Compute the corrected volume and mass for one set of readings.
///
/// `corrected_volume = reference_volume × VCF × SCF × PCF` and
/// `mass = corrected_volume × density`. The PCF factor is 1 when pressure
/// correction is disabled on either the input or the settings.
pub fn calculate_with(
    input: &CalculationInput,
    tables: &TableSet,
    settings: &Settings,
) -> Result<CalculationResult, TankError> {
    let pressure = input.pressure.unwrap_or(settings.nominal_pressure_bar);

    validate_input(input, pressure, &settings.ranges)?;

    let vcf = lookup_vcf(input.product_temperature, input.density, &tables.vcf);
    let scf = lookup_scf(input.shell_temperature, &tables.scf)?;
    let height = lookup_reference_volume_clamped(input.height_mm, &tables.height_capacity);
    if height.clamped {
        warn!(
            height_mm = input.height_mm,
            volume_l = height.volume_l,
            "liquid height outside calibration table, volume clamped"
        );
    }
    let reference_volume = height.volume_l;

    let pcf = (input.pressure_correction.is_applied()
        && settings.pressure_correction.is_applied())
    .then(|| lookup_pcf(pressure, &tables.pcf));

    let corrected_volume = reference_volume * vcf * scf * pcf.unwrap_or(1.0);
    let mass = corrected_volume * input.density;

    debug!(
        vcf,
        scf,
        ?pcf,
        reference_volume,
        corrected_volume,
        mass,
        "calculation complete"
    );

    Ok(CalculationResult {
        used_density: input.density,
        used_product_temperature: input.product_temperature,
        used_shell_temperature: input.shell_temperature,
        used_pressure: pressure,
        vcf,
        scf,
        reference_volume,
        corrected_volume,
        pcf,
        corrected_volume_with_pressure: corrected_volume,
        mass,
        clamped: ClampFlags {
            height: height.clamped,
            ..ClampFlags::default()
        },
    })
}

/// Outcome of one row of a batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Zero-based row position in the input sequence
    pub row: usize,
    /// `None` when the row itself could not be read
    pub input: Option<CalculationInput>,
    pub result: Result<CalculationResult, TankError>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run independent calculations for each input. A failing row does not stop the batch.
pub fn run_batch(
    inputs: Vec<CalculationInput>,
    tables: &TableSet,
    settings: &Settings,
) -> Vec<BatchOutcome> {
    run_batch_rows(inputs.into_iter().map(Ok), tables, settings)
}

/// Like [`run_batch`], for rows that may have failed to parse.
///
/// A parse failure becomes that row's error and the remaining rows still run.
pub fn run_batch_rows<I>(rows: I, tables: &TableSet, settings: &Settings) -> Vec<BatchOutcome>
where
    I: IntoIterator<Item = Result<CalculationInput, TankError>>,
{
    rows.into_iter()
        .enumerate()
        .map(|(row, parsed)| {
            let (input, result) = match parsed {
                Ok(input) => {
                    let result = calculate_with(&input, tables, settings);
                    (Some(input), result)
                }
                Err(e) => (None, Err(e)),
            };
            if let Err(e) = &result {
                warn!(row, error = %e, "batch row failed");
            }
            BatchOutcome { row, input, result }
        })
        .collect()
}
