//! Fluid and rock-fluid collaborators.
//!
//! Saturations passed to [`RelativePermeability::kr`] are always gas
//! saturations; the liquid saturation is `1 - s_gas`.

use serde::Deserialize;

/// The two phases of the injection model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The resident liquid (brine).
    Liquid,
    /// The injected gas.
    Gas,
}

impl Phase {
    /// Both phases, liquid first.
    pub const ALL: [Phase; 2] = [Phase::Liquid, Phase::Gas];
}

/// Density and viscosity of one phase at given conditions.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct FluidState {
    /// Density in kg/m³.
    pub density: f64,
    /// Dynamic viscosity in Pa·s.
    pub viscosity: f64,
}

impl FluidState {
    /// Mass mobility `ρ · kr / μ`.
    pub fn mobility(&self, kr: f64) -> f64 {
        self.density * kr / self.viscosity
    }
}

/// PVT evaluation: `(pressure, temperature, phase) -> (density, viscosity)`.
pub trait FluidProperties {
    /// Properties of `phase` at `pressure` (Pa) and `temperature` (K).
    fn properties(&self, pressure: f64, temperature: f64, phase: Phase) -> FluidState;
}

/// Pressure- and temperature-independent properties.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ConstantFluid {
    /// Liquid properties.
    pub liquid: FluidState,
    /// Gas properties.
    pub gas: FluidState,
}

impl Default for ConstantFluid {
    /// Brine and supercritical CO2 at roughly 100 bar and 40 °C.
    fn default() -> Self {
        Self {
            liquid: FluidState {
                density: 1000.0,
                viscosity: 1e-3,
            },
            gas: FluidState {
                density: 630.0,
                viscosity: 5e-5,
            },
        }
    }
}

impl FluidProperties for ConstantFluid {
    fn properties(&self, _pressure: f64, _temperature: f64, phase: Phase) -> FluidState {
        match phase {
            Phase::Liquid => self.liquid,
            Phase::Gas => self.gas,
        }
    }
}

/// Relative permeability as a function of gas saturation.
pub trait RelativePermeability {
    /// Relative permeability of `phase` at gas saturation `s_gas`.
    fn kr(&self, s_gas: f64, phase: Phase) -> f64;
}

/// Corey-type power-law relative permeabilities.
///
/// With the effective saturation
/// `s_e = (s - s_r) / (1 - s_lr - s_gr)` clamped to `[0, 1]`,
/// `kr = s_e^n` for each phase.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoreyRelPerm {
    /// Liquid exponent. Default: 2.
    pub liquid_exponent: f64,
    /// Gas exponent. Default: 2.
    pub gas_exponent: f64,
    /// Residual liquid saturation. Default: 0.
    pub residual_liquid: f64,
    /// Residual gas saturation. Default: 0.
    pub residual_gas: f64,
}

impl Default for CoreyRelPerm {
    fn default() -> Self {
        Self {
            liquid_exponent: 2.0,
            gas_exponent: 2.0,
            residual_liquid: 0.0,
            residual_gas: 0.0,
        }
    }
}

impl RelativePermeability for CoreyRelPerm {
    fn kr(&self, s_gas: f64, phase: Phase) -> f64 {
        let mobile = 1.0 - self.residual_liquid - self.residual_gas;
        if mobile <= 0.0 {
            return 0.0;
        }
        let (s, residual, exponent) = match phase {
            Phase::Liquid => (1.0 - s_gas, self.residual_liquid, self.liquid_exponent),
            Phase::Gas => (s_gas, self.residual_gas, self.gas_exponent),
        };
        ((s - residual) / mobile).clamp(0.0, 1.0).powf(exponent)
    }
}
