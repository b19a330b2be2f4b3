use serde::{Deserialize, Serialize};

/// Whether the pressure correction factor takes part in the volume formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureCorrection {
    #[default]
    Applied,
    Disabled,
}

impl PressureCorrection {
    pub fn is_applied(self) -> bool {
        self == PressureCorrection::Applied
    }
}

impl std::fmt::Display for PressureCorrection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PressureCorrection::Applied => write!(f, "applied"),
            PressureCorrection::Disabled => write!(f, "disabled"),
        }
    }
}

/// Manual field readings for a single tank calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Product density in kg/L
    pub density: f64,
    /// Product temperature in °C (drives the VCF lookup)
    pub product_temperature: f64,
    /// Shell temperature in °C (exact SCF table entry)
    pub shell_temperature: f64,
    /// Liquid height in mm
    pub height_mm: f64,
    /// Tank pressure in bar; the nominal pressure is used when absent
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub pressure_correction: PressureCorrection,
}

impl CalculationInput {
    pub fn new(
        density: f64,
        product_temperature: f64,
        shell_temperature: f64,
        height_mm: f64,
    ) -> Self {
        Self {
            density,
            product_temperature,
            shell_temperature,
            height_mm,
            pressure: None,
            pressure_correction: PressureCorrection::Applied,
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_pressure_correction(mut self, correction: PressureCorrection) -> Self {
        self.pressure_correction = correction;
        self
    }
}

/// Which inputs were pulled back to a table boundary.
///
/// Density, temperature and pressure are rejected rather than clamped, so only
/// `height` is ever set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampFlags {
    pub density: bool,
    pub temperature: bool,
    pub pressure: bool,
    pub height: bool,
}

impl ClampFlags {
    pub fn any(&self) -> bool {
        self.density || self.temperature || self.pressure || self.height
    }

    /// Names of the flagged inputs, in input order.
    pub fn fields(&self) -> Vec<&'static str> {
        [
            ("density", self.density),
            ("temperature", self.temperature),
            ("pressure", self.pressure),
            ("height", self.height),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

/// Every factor and volume produced by one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub used_density: f64,
    pub used_product_temperature: f64,
    pub used_shell_temperature: f64,
    pub used_pressure: f64,
    /// Product temperature factor
    pub vcf: f64,
    /// Shell correction factor
    pub scf: f64,
    /// Nominal capacity at the measured height, in litres
    pub reference_volume: f64,
    /// Reference volume × VCF × SCF × PCF, in litres
    pub corrected_volume: f64,
    /// Pressure factor, `None` when pressure correction is disabled
    pub pcf: Option<f64>,
    pub corrected_volume_with_pressure: f64,
    /// Product mass in kg
    pub mass: f64,
    pub clamped: ClampFlags,
}
