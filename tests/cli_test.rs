use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("tank-mass").unwrap();
    cmd.arg("--tables").arg(data_dir());
    cmd
}

// --- Calculate subcommand ---

#[test]
fn test_calculate_reference_conditions() {
    cmd()
        .args([
            "calculate",
            "--density",
            "0.55",
            "--product-temperature",
            "20",
            "--shell-temperature",
            "15",
            "--height",
            "560",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Results"))
        .stdout(predicate::str::contains("19914.100"))
        .stdout(predicate::str::contains("10952.755"))
        .stdout(predicate::str::contains("PCF used (17.0 bar)"));
}

#[test]
fn test_calculate_json_output() {
    cmd()
        .args([
            "calculate", "-d", "0.55", "-t", "20", "-s", "15", "--height", "560", "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Product_Temperature_Factor_VCF\": 1.0"))
        .stdout(predicate::str::contains("\"PCF_used\": 1.0"))
        .stdout(predicate::str::contains("\"Mass_kg\""));
}

#[test]
fn test_calculate_no_pressure_correction() {
    cmd()
        .args([
            "calculate",
            "-d",
            "0.55",
            "-t",
            "20",
            "-s",
            "15",
            "--height",
            "560",
            "--pressure",
            "12",
            "--no-pressure-correction",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"PCF_used\": null"));
}

#[test]
fn test_calculate_density_out_of_range() {
    cmd()
        .args([
            "calculate", "-d", "0.60", "-t", "20", "-s", "15", "--height", "560",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product density out of supported range"));
}

#[test]
fn test_calculate_pressure_out_of_range() {
    cmd()
        .args([
            "calculate", "-d", "0.55", "-t", "20", "-s", "15", "--height", "560", "-p", "30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pressure out of supported range"));
}

#[test]
fn test_calculate_negative_pressure_is_range_error() {
    cmd()
        .args([
            "calculate", "-d", "0.55", "-t", "20", "-s", "15", "--height", "560", "-p", "-1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pressure out of supported range"));
}

#[test]
fn test_calculate_from_json_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reading.json");
    std::fs::write(
        &path,
        r#"{"density":0.55,"product_temperature":20.0,"shell_temperature":15.0,"height_mm":560.0}"#,
    )
    .unwrap();

    cmd()
        .args(["calculate", "--json", "--input"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Mass_kg\""));
}

#[test]
fn test_calculate_input_conflicts_with_flags() {
    cmd()
        .args(["calculate", "--input", "reading.json", "-d", "0.55"])
        .assert()
        .failure();
}

#[test]
fn test_calculate_requires_readings() {
    cmd()
        .args(["calculate", "-d", "0.55"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--product-temperature"));
}

#[test]
fn test_calculate_unlisted_shell_temperature() {
    cmd()
        .args([
            "calculate", "-d", "0.55", "-t", "20", "-s", "12.5", "--height", "560",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found in SCF table"));
}

#[test]
fn test_calculate_negative_shell_temperature() {
    cmd()
        .args([
            "calculate", "-d", "0.55", "-t", "20", "-s", "-10", "--height", "560",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.999400"));
}

#[test]
fn test_calculate_export_csv() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("tank_mass_results.csv");

    cmd()
        .args([
            "calculate", "-d", "0.55", "-t", "20", "-s", "15", "--height", "560", "--export",
        ])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported results"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("Reference Volume (L),19914.1"));
    assert!(content.contains("Mass (kg),"));
}

#[test]
fn test_calculate_export_json() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("result.json");

    cmd()
        .args([
            "calculate", "-d", "0.55", "-t", "20", "-s", "15", "--height", "560", "--export",
        ])
        .arg(&out)
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["Reference_Volume_L"], 19914.1);
    assert_eq!(value["Shell_Correction_Factor_SCF"], 1.0);
}

#[test]
fn test_calculate_export_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("result.xlsx");

    cmd()
        .args([
            "calculate", "-d", "0.55", "-t", "20", "-s", "15", "--height", "560", "--export",
        ])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported export format"));
}

// --- Config ---

#[test]
fn test_config_disables_pressure_correction() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("tank-mass.toml");
    std::fs::write(&config, "pressure_correction = \"disabled\"\n").unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .args([
            "calculate", "-d", "0.55", "-t", "20", "-s", "15", "--height", "560", "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"PCF_used\": null"));
}

#[test]
fn test_config_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("broken.toml");
    std::fs::write(&config, "nominal_pressure_bar = \"high\"\n").unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .args(["lookup", "pcf", "-p", "17"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn test_missing_tables_dir() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("tank-mass")
        .unwrap()
        .arg("--tables")
        .arg(dir.path().join("nope"))
        .args(["tables", "vcf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load reference tables"));
}

// --- Lookup subcommand ---

#[test]
fn test_lookup_vcf_grid_point() {
    cmd()
        .args(["lookup", "vcf", "-t", "0", "-d", "0.54"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.056000"));
}

#[test]
fn test_lookup_pcf() {
    cmd()
        .args(["lookup", "pcf", "-p", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.008400"));
}

#[test]
fn test_lookup_pcf_negative_pressure() {
    cmd()
        .args(["lookup", "pcf", "-p", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PCF at -1 bar"));
}

#[test]
fn test_lookup_scf() {
    cmd()
        .args(["lookup", "scf", "-t", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.000240"));
}

#[test]
fn test_lookup_scf_missing() {
    cmd()
        .args(["lookup", "scf", "-t", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use a listed temperature"));
}

#[test]
fn test_lookup_volume() {
    cmd()
        .args(["lookup", "volume", "--height", "560"])
        .assert()
        .success()
        .stdout(predicate::str::contains("19914.100 L"));
}

// --- Tables subcommand ---

#[test]
fn test_tables_vcf() {
    cmd()
        .args(["tables", "vcf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thermal Factors"))
        .stdout(predicate::str::contains("1.068000"));
}

#[test]
fn test_tables_height() {
    cmd()
        .args(["tables", "height"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Height / Capacity"))
        .stdout(predicate::str::contains("39557.0"));
}

#[test]
fn test_tables_unknown_kind() {
    cmd().args(["tables", "density"]).assert().failure();
}

// --- Gauge subcommand ---

#[test]
fn test_gauge_half_full() {
    cmd()
        .args(["gauge", "--height", "557"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tank Gauge"))
        .stdout(predicate::str::contains("50.0%"))
        .stdout(predicate::str::contains("1114.0 mm"));
}

#[test]
fn test_gauge_low_level() {
    cmd()
        .args(["gauge", "--height", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Low level"));
}

// --- Batch subcommand ---

#[test]
fn test_batch_reports_failed_rows() {
    let input = data_dir().join("sample_inputs.csv");
    cmd()
        .args(["batch", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 rows | 2 failed"))
        .stdout(predicate::str::contains("10952.755"));
}

#[test]
fn test_batch_writes_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("batch.csv");
    let input = data_dir().join("sample_inputs.csv");

    cmd()
        .args(["batch", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 5 rows"));

    let content = std::fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert!(lines.next().unwrap().starts_with("row,density"));
    assert_eq!(content.lines().count(), 6);
    assert!(content.contains("Product density out of supported range"));
}

#[test]
fn test_batch_unreadable_row_does_not_stop_batch() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("inputs.csv");
    std::fs::write(
        &input,
        "density,product_temperature,shell_temperature,height_mm\n\
         0.55,20,15,560\n\
         abc,20,15,560\n\
         0.54,0,15,332\n",
    )
    .unwrap();
    let out = dir.path().join("batch.csv");

    cmd()
        .args(["batch", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 rows | 1 failed"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 4);
    assert!(content.lines().nth(2).unwrap().starts_with("2,,,,"));
}

#[test]
fn test_batch_missing_input() {
    cmd()
        .args(["batch", "--input", "does_not_exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read inputs"));
}

#[test]
fn test_no_subcommand() {
    Command::cargo_bin("tank-mass").unwrap().assert().failure();
}
