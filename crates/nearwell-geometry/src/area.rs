//! Closed-form overlap area of a centred disk and a centred square.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI};

use ndarray::{ArrayD, ArrayViewD, IxDyn, Zip};

use crate::broadcast::broadcast_shape;
use crate::error::GeometryError;

/// Area of the intersection of a disk of `radius` and an axis-aligned square
/// of side `sidelength`, both centred at the origin.
///
/// Three regimes, continuous at both breakpoints:
///
/// - `r <= s/2`: the disk lies inside the square, area `π r²`.
/// - `r >= s/√2`: the disk contains the square, area `s²`.
/// - otherwise the disk pokes out of the square through four circular
///   segments. With `θ = acos(s / 2r)` and `y = r sin θ`, each of the eight
///   symmetric slices contributes a sector `(π/4 − θ) r²/2` plus a triangle
///   `y s/4`.
///
/// # Errors
///
/// Returns [`GeometryError::NegativeInput`] or [`GeometryError::NonFinite`]
/// for negative or non-finite inputs.
pub fn area_squaredcircle(radius: f64, sidelength: f64) -> Result<f64, GeometryError> {
    check_length("radius", radius)?;
    check_length("sidelength", sidelength)?;
    Ok(overlap_area(radius, sidelength))
}

/// Elementwise [`area_squaredcircle`] over two broadcastable arrays.
///
/// # Errors
///
/// Fails on the first negative or non-finite entry, or if the shapes cannot
/// be broadcast together.
pub fn area_squaredcircle_array(
    radii: ArrayViewD<'_, f64>,
    sidelengths: ArrayViewD<'_, f64>,
) -> Result<ArrayD<f64>, GeometryError> {
    for &r in radii.iter() {
        check_length("radius", r)?;
    }
    for &s in sidelengths.iter() {
        check_length("sidelength", s)?;
    }
    let shape = broadcast_shape(radii.shape(), sidelengths.shape()).ok_or_else(|| {
        GeometryError::IncompatibleShapes {
            lhs: radii.shape().to_vec(),
            rhs: sidelengths.shape().to_vec(),
        }
    })?;
    let dim = IxDyn(&shape);
    // broadcast_shape already validated compatibility.
    let (r, s) = match (radii.broadcast(dim.clone()), sidelengths.broadcast(dim)) {
        (Some(r), Some(s)) => (r, s),
        _ => {
            return Err(GeometryError::IncompatibleShapes {
                lhs: radii.shape().to_vec(),
                rhs: sidelengths.shape().to_vec(),
            })
        }
    };
    Ok(Zip::from(&r).and(&s).map_collect(|&r, &s| overlap_area(r, s)))
}

/// Peaceman equivalent well-block radius of a square block, `s·e^{-π/2}`.
///
/// The radius at which the steady radial-flow pressure equals the block's
/// average pressure; approximately `0.208 s`.
pub fn equivalent_radius(sidelength: f64) -> f64 {
    sidelength * (-FRAC_PI_2).exp()
}

/// Unchecked overlap area. Callers validate inputs.
pub(crate) fn overlap_area(r: f64, s: f64) -> f64 {
    let half = 0.5 * s;
    if r <= half {
        PI * r * r
    } else if r >= s * FRAC_1_SQRT_2 {
        s * s
    } else {
        let theta = (half / r).acos();
        let y = r * theta.sin();
        8.0 * ((FRAC_PI_4 - theta) * r * r / 2.0 + y * s / 4.0)
    }
}

pub(crate) fn check_length(quantity: &'static str, value: f64) -> Result<(), GeometryError> {
    if !value.is_finite() {
        return Err(GeometryError::NonFinite { quantity, value });
    }
    if value < 0.0 {
        return Err(GeometryError::NegativeInput { quantity, value });
    }
    Ok(())
}
