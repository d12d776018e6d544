//! Upscaling configuration.

use std::f64::consts::{PI, TAU};

use serde::Deserialize;

use crate::error::UpscaleError;

/// Dimensions of the radial simulation and the target Cartesian blocks.
///
/// Cells are ordered with the radial (x) index fastest, so cell
/// `z * num_xcells + x` lies in z-row `z`. The `num_zcells` rows are split
/// into `num_layers` contiguous layers of equal thickness.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpscaleConfig {
    /// Ensemble members.
    pub num_members: usize,
    /// Report steps per member.
    pub num_timesteps: usize,
    /// Geological layers.
    pub num_layers: usize,
    /// Z-cells over all layers.
    pub num_zcells: usize,
    /// Radial cells per z-row.
    pub num_xcells: usize,
    /// Sector angle of the radial model in radians. Default: π/3.
    pub angle: f64,
    /// Well radius in metres. Default: 0.25.
    pub well_radius: f64,
    /// Side lengths of the Cartesian blocks to upscale to.
    pub block_sidelengths: Vec<f64>,
}

impl Default for UpscaleConfig {
    fn default() -> Self {
        Self {
            num_members: 1,
            num_timesteps: 1,
            num_layers: 1,
            num_zcells: 1,
            num_xcells: 1,
            angle: PI / 3.0,
            well_radius: 0.25,
            block_sidelengths: Vec::new(),
        }
    }
}

impl UpscaleConfig {
    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), UpscaleError> {
        // 1. Every dimension >= 1.
        for (which, value) in [
            ("num_members", self.num_members),
            ("num_timesteps", self.num_timesteps),
            ("num_layers", self.num_layers),
            ("num_zcells", self.num_zcells),
            ("num_xcells", self.num_xcells),
        ] {
            if value == 0 {
                return Err(UpscaleError::ZeroDimension { which });
            }
        }
        // 2. Layers partition the z-cells.
        if self.num_zcells % self.num_layers != 0 {
            return Err(UpscaleError::UnevenLayers {
                zcells: self.num_zcells,
                layers: self.num_layers,
            });
        }
        // 3. Angle in (0, 2π].
        if !self.angle.is_finite() || self.angle <= 0.0 || self.angle > TAU {
            return Err(UpscaleError::InvalidAngle { angle: self.angle });
        }
        // 4. Lengths finite and positive.
        check_positive("well_radius", self.well_radius)?;
        for &s in &self.block_sidelengths {
            check_positive("block_sidelength", s)?;
        }
        Ok(())
    }

    /// Z-cells per layer. Only meaningful after [`validate`](Self::validate).
    pub fn zcells_per_layer(&self) -> usize {
        self.num_zcells / self.num_layers
    }

    /// Cells per member and step.
    pub fn num_cells(&self) -> usize {
        self.num_zcells * self.num_xcells
    }

    /// Factor scaling a sector quantity to the full circle, `2π/angle`.
    pub fn full_circle_factor(&self) -> f64 {
        TAU / self.angle
    }
}

pub(crate) fn check_positive(quantity: &'static str, value: f64) -> Result<(), UpscaleError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(UpscaleError::NonPositive { quantity, value });
    }
    Ok(())
}
