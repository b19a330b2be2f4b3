mod bracket;
mod calculator;
mod interpolation;
mod lookup;
mod pipeline;
mod validation;

pub use bracket::{find_bracket, Bracket};
pub use calculator::TankCalculator;
pub use interpolation::{bilinear_interpolate_vcf, linear_interpolate};
pub use lookup::{
    capacity_from_percent, fill_percent, lookup_pcf, lookup_reference_volume,
    lookup_reference_volume_clamped, lookup_scf, lookup_vcf, HeightLookup,
};
pub use pipeline::{calculate, calculate_with, run_batch, run_batch_rows, BatchOutcome};
pub use validation::validate_input;
