//! Closed-form well-index formulas.

use std::f64::consts::TAU;

use crate::config::check_positive;
use crate::error::UpscaleError;

/// Productivity index of a fully penetrating vertical well,
/// `2π·kh / ln(r_e/r_w)`.
///
/// `kh` is permeability times thickness, `r_e` the radius at which the
/// pressure is sampled (the equivalent well-block radius for a Cartesian
/// block) and `r_w` the well radius.
pub fn peaceman_wi(kh: f64, r_e: f64, r_w: f64) -> Result<f64, UpscaleError> {
    check_positive("well_radius", r_w)?;
    if !r_e.is_finite() || r_e <= r_w {
        return Err(UpscaleError::RadiusInsideWell {
            radius: r_e,
            well_radius: r_w,
        });
    }
    Ok(TAU * kh / (r_e / r_w).ln())
}

/// Two-phase Peaceman well index: the productivity index times the total
/// mass mobility `Σ ρ·kr/μ`.
pub fn two_phase_peaceman_wi(
    kh: f64,
    r_e: f64,
    r_w: f64,
    liquid_mobility: f64,
    gas_mobility: f64,
) -> Result<f64, UpscaleError> {
    Ok(peaceman_wi(kh, r_e, r_w)? * (liquid_mobility + gas_mobility))
}

/// Well index from data, `q / (p_w - p_gb)`.
///
/// # Errors
///
/// [`UpscaleError::DegenerateWellIndex`] if the result is not finite,
/// which covers `p_w == p_gb` as well as non-finite inputs.
pub fn data_wi(q: f64, p_w: f64, p_gb: f64) -> Result<f64, UpscaleError> {
    let pressure_difference = p_w - p_gb;
    let wi = q / pressure_difference;
    if !wi.is_finite() {
        return Err(UpscaleError::DegenerateWellIndex {
            rate: q,
            pressure_difference,
        });
    }
    Ok(wi)
}
