//! Build a table set in code instead of loading CSV files.
//!
//! Run from the project root:
//!   cargo run --example synthetic_tables

use tank_mass_calculator::{
    calculate,
    models::{
        CalculationInput, HeightCapacityRow, HeightCapacityTable, PcfRow, PcfTable, ScfRow,
        ScfTable, TableSet, VcfGrid,
    },
    visualization::{print_result_card, print_vcf_table},
};

fn main() {
    let vcf = VcfGrid::new(
        vec![0.0, 20.0, 30.0],
        vec![0.54, 0.55, 0.58],
        vec![
            vec![1.056, 1.0525, 1.042],
            vec![1.0, 1.0, 1.0],
            vec![0.972, 0.97375, 0.978],
        ],
    )
    .expect("Invalid VCF grid");
    let pcf = PcfTable::new(vec![
        PcfRow { pressure_bar: 10.0, factor: 1.0084 },
        PcfRow { pressure_bar: 17.0, factor: 1.0 },
        PcfRow { pressure_bar: 24.0, factor: 0.9916 },
    ])
    .expect("Invalid PCF table");
    let scf = ScfTable::new(vec![ScfRow { temperature_c: 15.0, factor: 1.0 }])
        .expect("Invalid SCF table");
    let heights = HeightCapacityTable::new(vec![
        HeightCapacityRow { height_mm: 0.0, capacity_l: 0.0 },
        HeightCapacityRow { height_mm: 100.0, capacity_l: 100.0 },
    ])
    .expect("Invalid height table");

    let tables = TableSet::new(vcf, pcf, scf, heights);
    print_vcf_table(&tables.vcf);

    for (density, temperature) in [(0.550, 20.0), (0.540, 0.0), (0.580, 30.0)] {
        let input = CalculationInput::new(density, temperature, 15.0, 100.0);
        let result = calculate(&input, &tables).expect("Calculation failed");
        print_result_card(&result);
    }

    // A ragged grid is rejected when the table is built
    let ragged = VcfGrid::new(vec![0.0, 10.0], vec![0.5, 0.6], vec![vec![1.0, 1.0], vec![1.0]]);
    assert!(ragged.is_err());
    println!("Ragged grid rejected: {}", ragged.unwrap_err());
}
