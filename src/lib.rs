pub mod config;
pub mod correction;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

pub use config::Settings;
pub use correction::{calculate, calculate_with, TankCalculator};
pub use error::TankError;
pub use io::{load_tables, ResultWriter};
pub use models::{CalculationInput, CalculationResult, PressureCorrection, TableSet};
