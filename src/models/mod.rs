mod calculation;
mod tables;

pub use calculation::{CalculationInput, CalculationResult, ClampFlags, PressureCorrection};
pub use tables::{
    HeightCapacityRow, HeightCapacityTable, PcfRow, PcfTable, PercentHeightRow,
    PercentHeightTable, ScfRow, ScfTable, TableSet, VcfGrid,
};
