use tracing::warn;

use crate::config::{Bounds, InputRanges};
use crate::error::TankError;
use crate::models::CalculationInput;

fn check(field: &'static str, value: f64, bounds: Bounds) -> Result<(), TankError> {
    if bounds.contains(value) {
        Ok(())
    } else {
        Err(TankError::Range {
            field,
            value,
            min: bounds.min,
            max: bounds.max,
        })
    }
}

/// Range-check the inputs that the correction tables cannot safely extend past.
///
/// Height is advisory: outside its range only a warning is logged and the height
/// lookup clamps to the calibration table instead.
pub fn validate_input(
    input: &CalculationInput,
    pressure: f64,
    ranges: &InputRanges,
) -> Result<(), TankError> {
    check("Product density", input.density, ranges.density)?;
    check(
        "Product temperature",
        input.product_temperature,
        ranges.product_temperature,
    )?;
    if !ranges.height_mm.contains(input.height_mm) {
        warn!(
            height_mm = input.height_mm,
            min = ranges.height_mm.min,
            max = ranges.height_mm.max,
            "liquid height outside advisory range, relying on table clamp"
        );
    }
    check("Pressure", pressure, ranges.pressure)?;
    Ok(())
}
