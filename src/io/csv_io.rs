use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::correction::BatchOutcome;
use crate::error::TankError;
use crate::models::{
    CalculationInput, CalculationResult, HeightCapacityRow, HeightCapacityTable, PcfRow,
    PcfTable, PercentHeightTable, PressureCorrection, ScfRow, ScfTable, VcfGrid,
};

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true).trim(csv::Trim::All);
    builder
}

fn parse_number(raw: &str, context: impl FnOnce() -> String) -> Result<f64, TankError> {
    raw.parse::<f64>()
        .map_err(|_| TankError::ParseError(format!("{}: invalid number '{raw}'", context())))
}

fn deserialize_rows<T: DeserializeOwned, R: Read>(
    rdr: &mut csv::Reader<R>,
) -> Result<Vec<T>, TankError> {
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

fn parse_vcf_records<R: Read>(rdr: &mut csv::Reader<R>) -> Result<VcfGrid, TankError> {
    let densities = rdr
        .headers()?
        .iter()
        .skip(1)
        .enumerate()
        .map(|(col, raw)| parse_number(raw, || format!("VCF header column {}", col + 2)))
        .collect::<Result<Vec<f64>, TankError>>()?;

    let mut temperatures = Vec::new();
    let mut values = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let mut fields = record.iter();
        let temperature = match fields.next() {
            Some(raw) if !raw.is_empty() => {
                parse_number(raw, || format!("VCF row {} temperature", line + 1))?
            }
            _ => {
                return Err(TankError::ParseError(format!(
                    "VCF row {}: missing temperature",
                    line + 1
                )))
            }
        };
        let row = fields
            .map(|raw| parse_number(raw, || format!("VCF row {} ({temperature} °C)", line + 1)))
            .collect::<Result<Vec<f64>, TankError>>()?;
        temperatures.push(temperature);
        values.push(row);
    }

    VcfGrid::new(temperatures, densities, values)
}

/// Read the VCF grid: header `label,<density>,...`, rows `<temperature>,<factor>,...`.
pub fn read_vcf_csv(path: impl AsRef<Path>) -> Result<VcfGrid, TankError> {
    let mut rdr = reader_builder().from_path(path.as_ref())?;
    parse_vcf_records(&mut rdr)
}

pub fn read_vcf_csv_from_bytes(data: &[u8]) -> Result<VcfGrid, TankError> {
    let mut rdr = reader_builder().from_reader(data);
    parse_vcf_records(&mut rdr)
}

/// Read the pressure correction table (`pressure_bar,factor`).
pub fn read_pcf_csv(path: impl AsRef<Path>) -> Result<PcfTable, TankError> {
    let mut rdr = reader_builder().from_path(path.as_ref())?;
    PcfTable::new(deserialize_rows::<PcfRow, _>(&mut rdr)?)
}

pub fn read_pcf_csv_from_bytes(data: &[u8]) -> Result<PcfTable, TankError> {
    let mut rdr = reader_builder().from_reader(data);
    PcfTable::new(deserialize_rows::<PcfRow, _>(&mut rdr)?)
}

/// Read the shell correction table (`temperature_c,factor`).
pub fn read_scf_csv(path: impl AsRef<Path>) -> Result<ScfTable, TankError> {
    let mut rdr = reader_builder().from_path(path.as_ref())?;
    ScfTable::new(deserialize_rows::<ScfRow, _>(&mut rdr)?)
}

pub fn read_scf_csv_from_bytes(data: &[u8]) -> Result<ScfTable, TankError> {
    let mut rdr = reader_builder().from_reader(data);
    ScfTable::new(deserialize_rows::<ScfRow, _>(&mut rdr)?)
}

/// Read the calibration table (`height_mm,capacity_l`), sorted by height on load.
pub fn read_height_capacity_csv(path: impl AsRef<Path>) -> Result<HeightCapacityTable, TankError> {
    let mut rdr = reader_builder().from_path(path.as_ref())?;
    HeightCapacityTable::new(deserialize_rows::<HeightCapacityRow, _>(&mut rdr)?)
}

pub fn read_height_capacity_csv_from_bytes(
    data: &[u8],
) -> Result<HeightCapacityTable, TankError> {
    let mut rdr = reader_builder().from_reader(data);
    HeightCapacityTable::new(deserialize_rows::<HeightCapacityRow, _>(&mut rdr)?)
}

#[derive(Debug, serde::Deserialize)]
struct PercentHeightRecord {
    percent: f64,
    height_mm: f64,
}

/// Read the gauge table (`percent,height_mm`); capacities derive from `total_capacity_l`.
pub fn read_percent_height_csv(
    path: impl AsRef<Path>,
    total_capacity_l: f64,
) -> Result<PercentHeightTable, TankError> {
    let mut rdr = reader_builder().from_path(path.as_ref())?;
    let records = deserialize_rows::<PercentHeightRecord, _>(&mut rdr)?;
    PercentHeightTable::from_percent_heights(
        records.into_iter().map(|r| (r.percent, r.height_mm)),
        total_capacity_l,
    )
}

/// CSV row structure for batch inputs.
#[derive(Debug, serde::Deserialize)]
struct InputRow {
    density: f64,
    product_temperature: f64,
    shell_temperature: f64,
    height_mm: f64,
    pressure: Option<f64>,
    apply_pressure_correction: Option<bool>,
}

impl From<InputRow> for CalculationInput {
    fn from(row: InputRow) -> Self {
        let correction = match row.apply_pressure_correction {
            Some(false) => PressureCorrection::Disabled,
            _ => PressureCorrection::Applied,
        };
        let input = CalculationInput::new(
            row.density,
            row.product_temperature,
            row.shell_temperature,
            row.height_mm,
        )
        .with_pressure_correction(correction);
        match row.pressure {
            Some(p) => input.with_pressure(p),
            None => input,
        }
    }
}

fn parse_input_records<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> Result<Vec<CalculationInput>, TankError> {
    let rows = deserialize_rows::<InputRow, _>(rdr)?;
    Ok(rows.into_iter().map(CalculationInput::from).collect())
}

/// Read batch inputs: `density,product_temperature,shell_temperature,height_mm[,pressure]`.
pub fn read_inputs_csv(path: impl AsRef<Path>) -> Result<Vec<CalculationInput>, TankError> {
    let mut rdr = reader_builder().from_path(path.as_ref())?;
    parse_input_records(&mut rdr)
}

pub fn read_inputs_csv_from_bytes(data: &[u8]) -> Result<Vec<CalculationInput>, TankError> {
    let mut rdr = reader_builder().from_reader(data);
    parse_input_records(&mut rdr)
}

fn parse_input_rows<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> Result<Vec<Result<CalculationInput, TankError>>, TankError> {
    // Header problems are fatal; a bad data row only fails that row
    rdr.headers()?;
    Ok(rdr
        .deserialize::<InputRow>()
        .map(|row| row.map(CalculationInput::from).map_err(TankError::from))
        .collect())
}

/// Read batch inputs keeping one entry per data row, so an unreadable row
/// is reported in place instead of aborting the batch.
pub fn read_input_rows_csv(
    path: impl AsRef<Path>,
) -> Result<Vec<Result<CalculationInput, TankError>>, TankError> {
    let mut rdr = reader_builder().from_path(path.as_ref())?;
    parse_input_rows(&mut rdr)
}

pub fn read_input_rows_csv_from_bytes(
    data: &[u8],
) -> Result<Vec<Result<CalculationInput, TankError>>, TankError> {
    let mut rdr = reader_builder().from_reader(data);
    parse_input_rows(&mut rdr)
}

/// Label/value rows of the result export, in display order.
fn result_rows(result: &CalculationResult) -> Vec<(&'static str, String)> {
    vec![
        ("Reference Volume (L)", result.reference_volume.to_string()),
        ("Product Density (kg/L)", result.used_density.to_string()),
        (
            "Product Temperature (°C)",
            result.used_product_temperature.to_string(),
        ),
        (
            "Shell Temperature (°C)",
            result.used_shell_temperature.to_string(),
        ),
        ("Product Temperature Factor (VCF)", result.vcf.to_string()),
        ("Shell Correction Factor (SCF)", result.scf.to_string()),
        ("Corrected Volume (L)", result.corrected_volume.to_string()),
        (
            "PCF used",
            result.pcf.map(|p| p.to_string()).unwrap_or_default(),
        ),
        (
            "Corrected Volume with Pressure (L)",
            result.corrected_volume_with_pressure.to_string(),
        ),
        ("Mass (kg)", result.mass.to_string()),
    ]
}

fn write_result_records<W: Write>(
    wtr: &mut csv::Writer<W>,
    result: &CalculationResult,
) -> Result<(), TankError> {
    for (label, value) in result_rows(result) {
        wtr.write_record([label, value.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a single result as `label,value` lines at full precision.
pub fn write_result_csv(result: &CalculationResult, path: impl AsRef<Path>) -> Result<(), TankError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())?;
    write_result_records(&mut wtr, result)
}

pub fn result_to_csv_string(result: &CalculationResult) -> Result<String, TankError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    write_result_records(&mut wtr, result)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| TankError::ParseError(format!("CSV buffer error: {e}")))?;
    String::from_utf8(bytes).map_err(|e| TankError::ParseError(format!("Invalid UTF-8: {e}")))
}

/// CSV row structure for batch output.
#[derive(Debug, serde::Serialize)]
struct BatchRow {
    row: usize,
    density: Option<f64>,
    product_temperature: Option<f64>,
    shell_temperature: Option<f64>,
    height_mm: Option<f64>,
    pressure: Option<f64>,
    vcf: Option<f64>,
    scf: Option<f64>,
    pcf: Option<f64>,
    reference_volume_l: Option<f64>,
    corrected_volume_l: Option<f64>,
    mass_kg: Option<f64>,
    error: Option<String>,
}

impl From<&BatchOutcome> for BatchRow {
    fn from(outcome: &BatchOutcome) -> Self {
        let ok = outcome.result.as_ref().ok();
        let input = outcome.input.as_ref();
        BatchRow {
            row: outcome.row + 1,
            density: input.map(|i| i.density),
            product_temperature: input.map(|i| i.product_temperature),
            shell_temperature: input.map(|i| i.shell_temperature),
            height_mm: input.map(|i| i.height_mm),
            pressure: ok
                .map(|r| r.used_pressure)
                .or_else(|| input.and_then(|i| i.pressure)),
            vcf: ok.map(|r| r.vcf),
            scf: ok.map(|r| r.scf),
            pcf: ok.and_then(|r| r.pcf),
            reference_volume_l: ok.map(|r| r.reference_volume),
            corrected_volume_l: ok.map(|r| r.corrected_volume),
            mass_kg: ok.map(|r| r.mass),
            error: outcome.result.as_ref().err().map(|e| e.to_string()),
        }
    }
}

/// Write one line per batch row, with an `error` column for failed rows.
pub fn write_batch_csv(outcomes: &[BatchOutcome], path: impl AsRef<Path>) -> Result<(), TankError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for outcome in outcomes {
        wtr.serialize(BatchRow::from(outcome))?;
    }
    wtr.flush()?;
    Ok(())
}
