use std::path::Path;

use serde::Serialize;

use crate::error::TankError;
use crate::models::{CalculationInput, CalculationResult};

/// Full-precision result payload, keyed the way operators paste it into reports.
#[derive(Debug, Serialize)]
struct ResultPayload {
    #[serde(rename = "Reference_Volume_L")]
    reference_volume_l: f64,
    #[serde(rename = "Product_Density_kg_per_L")]
    product_density: f64,
    #[serde(rename = "Product_Temperature_C")]
    product_temperature: f64,
    #[serde(rename = "Shell_Temperature_C")]
    shell_temperature: f64,
    #[serde(rename = "Product_Temperature_Factor_VCF")]
    vcf: f64,
    #[serde(rename = "Shell_Correction_Factor_SCF")]
    scf: f64,
    #[serde(rename = "Corrected_Volume_L")]
    corrected_volume_l: f64,
    #[serde(rename = "PCF_used")]
    pcf: Option<f64>,
    #[serde(rename = "Corrected_Volume_with_Pressure_L")]
    corrected_volume_with_pressure_l: f64,
    #[serde(rename = "Mass_kg")]
    mass_kg: f64,
}

impl From<&CalculationResult> for ResultPayload {
    fn from(r: &CalculationResult) -> Self {
        Self {
            reference_volume_l: r.reference_volume,
            product_density: r.used_density,
            product_temperature: r.used_product_temperature,
            shell_temperature: r.used_shell_temperature,
            vcf: r.vcf,
            scf: r.scf,
            corrected_volume_l: r.corrected_volume,
            pcf: r.pcf,
            corrected_volume_with_pressure_l: r.corrected_volume_with_pressure,
            mass_kg: r.mass,
        }
    }
}

/// Serialize a result as the report payload JSON.
pub fn result_to_json_string(result: &CalculationResult, pretty: bool) -> Result<String, TankError> {
    let payload = ResultPayload::from(result);
    let content = if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    Ok(content)
}

/// Write a result as report payload JSON to a file.
pub fn write_result_json(
    result: &CalculationResult,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), TankError> {
    let content = result_to_json_string(result, pretty)?;
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

/// Read a single set of readings from a JSON file.
pub fn read_input_json(path: impl AsRef<Path>) -> Result<CalculationInput, TankError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let input: CalculationInput = serde_json::from_str(&content)?;
    Ok(input)
}

/// Read a single set of readings from JSON bytes.
pub fn read_input_json_from_bytes(data: &[u8]) -> Result<CalculationInput, TankError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| TankError::ParseError(format!("Invalid UTF-8: {e}")))?;
    let input: CalculationInput = serde_json::from_str(content)?;
    Ok(input)
}
