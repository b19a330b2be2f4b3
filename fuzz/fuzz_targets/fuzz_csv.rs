#![no_main]

use libfuzzer_sys::fuzz_target;
use tank_mass_calculator::{
    correction::{lookup_reference_volume, lookup_vcf},
    io,
};

fuzz_target!(|data: &[u8]| {
    if let Ok(grid) = io::read_vcf_csv_from_bytes(data) {
        let t = grid.temperatures()[0];
        let rho = grid.densities()[0];
        let _ = lookup_vcf(t, rho, &grid);
    }
    let _ = io::read_pcf_csv_from_bytes(data);
    let _ = io::read_scf_csv_from_bytes(data);
    if let Ok(table) = io::read_height_capacity_csv_from_bytes(data) {
        let _ = lookup_reference_volume(table.min_row().height_mm, &table);
    }
    let _ = io::read_inputs_csv_from_bytes(data);
    let _ = io::read_input_rows_csv_from_bytes(data);
});
