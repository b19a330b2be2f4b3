use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TankError;
use crate::models::PressureCorrection;

/// Nominal operating pressure used when no pressure reading is supplied.
pub const NOMINAL_PRESSURE_BAR: f64 = 17.0;

/// Total tank capacity in litres from the tank datasheet.
pub const TOTAL_CAPACITY_L: f64 = 39557.0;

/// Inclusive lower and upper bound for an input field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `false` for NaN as well as for values outside `min..=max`.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Supported ranges for the manual inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRanges {
    /// kg/L
    pub density: Bounds,
    /// °C
    pub product_temperature: Bounds,
    /// bar
    pub pressure: Bounds,
    /// mm, advisory only
    pub height_mm: Bounds,
}

impl Default for InputRanges {
    fn default() -> Self {
        Self {
            density: Bounds::new(0.50, 0.59),
            product_temperature: Bounds::new(0.0, 30.0),
            pressure: Bounds::new(10.0, 24.0),
            height_mm: Bounds::new(0.0, 1114.0),
        }
    }
}

/// Calculator settings, usually read from a `tank-mass.toml` file.
///
/// Every field is optional in the file; missing fields take their defaults.
///
/// ```
/// use tank_mass_calculator::config::Settings;
///
/// let settings = Settings::from_toml_str("nominal_pressure_bar = 16.0").unwrap();
/// assert_eq!(settings.nominal_pressure_bar, 16.0);
/// assert_eq!(settings.ranges.density.max, 0.59);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the reference table CSV files
    pub tables_dir: PathBuf,
    pub nominal_pressure_bar: f64,
    pub pressure_correction: PressureCorrection,
    pub total_capacity_l: f64,
    pub ranges: InputRanges,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tables_dir: PathBuf::from("data"),
            nominal_pressure_bar: NOMINAL_PRESSURE_BAR,
            pressure_correction: PressureCorrection::Applied,
            total_capacity_l: TOTAL_CAPACITY_L,
            ranges: InputRanges::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, TankError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TankError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Read settings from `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, TankError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), TankError> {
        let ranges = [
            ("density", self.ranges.density),
            ("product_temperature", self.ranges.product_temperature),
            ("pressure", self.ranges.pressure),
            ("height_mm", self.ranges.height_mm),
        ];
        for (name, bounds) in ranges {
            if bounds.min.is_nan() || bounds.max.is_nan() || bounds.min > bounds.max {
                return Err(TankError::ParseError(format!(
                    "ranges.{name}: min {} exceeds max {}",
                    bounds.min, bounds.max
                )));
            }
        }
        if !self.nominal_pressure_bar.is_finite() {
            return Err(TankError::ParseError(
                "nominal_pressure_bar must be finite".to_string(),
            ));
        }
        if self.total_capacity_l.is_nan() || self.total_capacity_l <= 0.0 {
            return Err(TankError::ParseError(format!(
                "total_capacity_l must be positive, got {}",
                self.total_capacity_l
            )));
        }
        Ok(())
    }
}
