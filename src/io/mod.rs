mod csv_io;
mod json_io;

use std::path::Path;

use tracing::{info, warn};

use crate::config::{InputRanges, Settings};
use crate::error::TankError;
use crate::models::{CalculationResult, PercentHeightTable, TableSet};

pub use csv_io::{
    read_height_capacity_csv, read_height_capacity_csv_from_bytes, read_input_rows_csv,
    read_input_rows_csv_from_bytes, read_inputs_csv, read_inputs_csv_from_bytes, read_pcf_csv, read_pcf_csv_from_bytes, read_percent_height_csv,
    read_scf_csv, read_scf_csv_from_bytes, read_vcf_csv, read_vcf_csv_from_bytes,
    result_to_csv_string, write_batch_csv, write_result_csv,
};
pub use json_io::{
    read_input_json, read_input_json_from_bytes, result_to_json_string, write_result_json,
};

pub const VCF_FILE: &str = "vcf_table.csv";
pub const PCF_FILE: &str = "pressure_correction_factors.csv";
pub const SCF_FILE: &str = "shell_correction_factors.csv";
pub const HEIGHT_CAPACITY_FILE: &str = "height_capacity.csv";
pub const PERCENT_HEIGHT_FILE: &str = "percent_height.csv";

/// Load the four reference tables from a directory using the standard file names.
pub fn load_tables(dir: impl AsRef<Path>) -> Result<TableSet, TankError> {
    let dir = dir.as_ref();
    let tables = TableSet::new(
        read_vcf_csv(dir.join(VCF_FILE))?,
        read_pcf_csv(dir.join(PCF_FILE))?,
        read_scf_csv(dir.join(SCF_FILE))?,
        read_height_capacity_csv(dir.join(HEIGHT_CAPACITY_FILE))?,
    );
    info!(
        dir = %dir.display(),
        vcf_temperatures = tables.vcf.temperatures().len(),
        vcf_densities = tables.vcf.densities().len(),
        pcf_rows = tables.pcf.rows().len(),
        scf_rows = tables.scf.rows().len(),
        height_rows = tables.height_capacity.rows().len(),
        "loaded reference tables"
    );
    Ok(tables)
}

/// Warn when the supported input ranges reach past what the tables cover.
///
/// Returns the number of ranges that exceed table coverage.
pub fn check_coverage(tables: &TableSet, ranges: &InputRanges) -> usize {
    let temps = tables.vcf.temperatures();
    let dens = tables.vcf.densities();
    let (p_min, p_max) = tables.pcf.pressure_span();
    let checks = [
        (
            "product_temperature",
            ranges.product_temperature.min,
            ranges.product_temperature.max,
            temps[0],
            temps[temps.len() - 1],
        ),
        (
            "density",
            ranges.density.min,
            ranges.density.max,
            dens[0],
            dens[dens.len() - 1],
        ),
        (
            "pressure",
            ranges.pressure.min,
            ranges.pressure.max,
            p_min,
            p_max,
        ),
    ];
    let mut gaps = 0;
    for (field, min, max, lo, hi) in checks {
        if min < lo || max > hi {
            warn!(field, min, max, table_min = lo, table_max = hi, "range exceeds table coverage");
            gaps += 1;
        }
    }
    gaps
}

/// Trait for writing a calculation result to a file.
pub trait ResultWriter {
    fn write(&self, result: &CalculationResult, path: &Path) -> Result<(), TankError>;
}

/// CSV `label,value` exporter.
pub struct CsvFormat;

impl ResultWriter for CsvFormat {
    fn write(&self, result: &CalculationResult, path: &Path) -> Result<(), TankError> {
        write_result_csv(result, path)
    }
}

/// JSON report payload exporter.
pub struct JsonFormat {
    pub pretty: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ResultWriter for JsonFormat {
    fn write(&self, result: &CalculationResult, path: &Path) -> Result<(), TankError> {
        write_result_json(result, path, self.pretty)
    }
}

/// Pick an exporter from the file extension (`.csv` or `.json`).
pub fn writer_for_path(path: &Path) -> Result<Box<dyn ResultWriter>, TankError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "csv" => Ok(Box::new(CsvFormat)),
        "json" => Ok(Box::new(JsonFormat::default())),
        _ => Err(TankError::ParseError(format!(
            "Unsupported export format: .{ext}. Use .csv or .json"
        ))),
    }
}

/// Load the gauge table next to the reference tables, if present.
pub fn load_percent_height(
    dir: impl AsRef<Path>,
    settings: &Settings,
) -> Result<Option<PercentHeightTable>, TankError> {
    let path = dir.as_ref().join(PERCENT_HEIGHT_FILE);
    if !path.exists() {
        return Ok(None);
    }
    read_percent_height_csv(&path, settings.total_capacity_l).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bounds;
    use crate::models::ClampFlags;

    fn write_tables(dir: &Path) {
        std::fs::write(
            dir.join(VCF_FILE),
            "T,0.50,0.59\n0,1.03,1.02\n30,0.98,0.97\n",
        )
        .unwrap();
        std::fs::write(dir.join(PCF_FILE), "pressure_bar,factor\n10,1.01\n24,0.99\n").unwrap();
        std::fs::write(dir.join(SCF_FILE), "temperature_c,factor\n15,1.0\n").unwrap();
        std::fs::write(
            dir.join(HEIGHT_CAPACITY_FILE),
            "height_mm,capacity_l\n1114,39557\n0,0\n",
        )
        .unwrap();
    }

    fn sample_result() -> CalculationResult {
        CalculationResult {
            used_density: 0.55,
            used_product_temperature: 20.0,
            used_shell_temperature: 15.0,
            used_pressure: 17.0,
            vcf: 1.0,
            scf: 1.0,
            reference_volume: 100.0,
            corrected_volume: 100.0,
            pcf: Some(1.0),
            corrected_volume_with_pressure: 100.0,
            mass: 55.0,
            clamped: ClampFlags::default(),
        }
    }

    #[test]
    fn test_load_tables_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        let tables = load_tables(dir.path()).unwrap();
        assert_eq!(tables.vcf.temperatures(), &[0.0, 30.0]);
        assert_eq!(tables.height_capacity.min_row().height_mm, 0.0);
    }

    #[test]
    fn test_load_tables_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        std::fs::remove_file(dir.path().join(SCF_FILE)).unwrap();
        assert!(load_tables(dir.path()).is_err());
    }

    #[test]
    fn test_check_coverage() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        let tables = load_tables(dir.path()).unwrap();
        assert_eq!(check_coverage(&tables, &InputRanges::default()), 0);

        let wide = InputRanges {
            pressure: Bounds::new(5.0, 30.0),
            ..InputRanges::default()
        };
        assert_eq!(check_coverage(&tables, &wide), 1);
    }

    #[test]
    fn test_percent_height_optional() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_percent_height(dir.path(), &Settings::default())
            .unwrap()
            .is_none());
        std::fs::write(dir.path().join(PERCENT_HEIGHT_FILE), "percent,height_mm\n0,0\n").unwrap();
        assert!(load_percent_height(dir.path(), &Settings::default())
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_writer_trait_csv_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("out.csv");
        let json_path = dir.path().join("out.json");

        let writer: &dyn ResultWriter = &CsvFormat;
        writer.write(&sample_result(), &csv_path).unwrap();
        let writer: &dyn ResultWriter = &JsonFormat::default();
        writer.write(&sample_result(), &json_path).unwrap();

        assert!(std::fs::read_to_string(&csv_path).unwrap().contains("Mass (kg),55"));
        assert!(std::fs::read_to_string(&json_path).unwrap().contains("\"Mass_kg\": 55.0"));
    }

    #[test]
    fn test_writer_for_path() {
        assert!(writer_for_path(Path::new("results.CSV")).is_ok());
        assert!(writer_for_path(Path::new("results.json")).is_ok());
        let err = writer_for_path(Path::new("results.xlsx")).err().unwrap();
        assert!(err.to_string().contains("Unsupported export format"));
    }

    #[test]
    fn test_json_format_default_is_pretty() {
        assert!(JsonFormat::default().pretty);
    }
}
