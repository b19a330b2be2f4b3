//! Basic calculation example: load the shipped tables and compute one tank mass.
//!
//! Run from the project root:
//!   cargo run --example basic_calculation

use tank_mass_calculator::{
    io, models::CalculationInput, visualization::print_result_card, TankCalculator,
};

fn main() {
    let tables = io::load_tables("data").expect("Failed to load reference tables");
    let calc = TankCalculator::new(&tables);

    let input = CalculationInput::new(0.545, 18.5, 20.0, 742.0).with_pressure(16.5);
    let result = calc.calculate(&input).expect("Calculation failed");
    print_result_card(&result);

    println!(
        "Fill level: {:.1}% of {:.0} L",
        calc.fill_percent(input.height_mm),
        calc.settings().total_capacity_l
    );

    // Shell temperatures must match a table row exactly
    match calc.lookup_scf(20.5) {
        Ok(scf) => println!("SCF at 20.5 °C: {scf:.6}"),
        Err(e) => println!("Expected failure: {e}"),
    }
}
