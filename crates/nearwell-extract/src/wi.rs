//! Data-driven well index.
//!
//! For each report step the well index of grid block `c` is
//! `q / (p_well - p_c)`, with the well pressure in column 0 of the
//! pressure array and the grid-block pressures in the remaining columns.
//!
//! [`member_well_index`] is the single per-member primitive and reports a
//! non-finite result as [`WiError::NonFinite`]. Callers choose the policy:
//! [`calculate_wi`] records the member and moves on, while the upscaler's
//! data well index propagates the error.

use ndarray::{s, Array2, Array3, ArrayView1, ArrayView2, ArrayView3, Axis, Zip};
use tracing::{info, warn};

use crate::error::WiError;

/// Well index of one member, shape `(steps, cells - 1)`.
///
/// `pressures` has shape `(steps, cells)` with the well in column 0;
/// `rates` has one injection rate per step.
pub fn member_well_index(
    pressures: ArrayView2<'_, f64>,
    rates: ArrayView1<'_, f64>,
) -> Result<Array2<f64>, WiError> {
    let (steps, cells) = pressures.dim();
    if steps != rates.len() {
        return Err(WiError::ShapeMismatch {
            pressures: pressures.shape().to_vec(),
            rates: rates.shape().to_vec(),
        });
    }
    if cells < 2 {
        return Err(WiError::TooFewCells { cells });
    }

    let mut wi = Array2::zeros((steps, cells - 1));
    Zip::from(wi.rows_mut())
        .and(pressures.rows())
        .and(&rates)
        .for_each(|mut out, p, &q| {
            let p_well = p[0];
            Zip::from(&mut out)
                .and(p.slice(s![1..]))
                .for_each(|w, &p_block| *w = q / (p_well - p_block));
        });

    if let Some((idx, _)) = wi.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(WiError::NonFinite {
            step: idx.0,
            cell: idx.1 + 1,
        });
    }
    Ok(wi)
}

/// Well indices of an ensemble with the failed members left out.
#[derive(Clone, Debug, PartialEq)]
pub struct WiBatch {
    /// Shape `(kept members, steps, cells - 1)`.
    pub values: Array3<f64>,
    /// Members present in `values`, in order.
    pub kept: Vec<usize>,
    /// Members whose well index was not finite.
    pub failed: Vec<usize>,
}

/// Well index for every member of `pressures` `(members, steps, cells)`
/// with `rates` `(members, steps)`.
///
/// A member with a NaN or infinite well index is logged, listed in
/// [`WiBatch::failed`] and excluded from [`WiBatch::values`].
///
/// # Errors
///
/// Only when the array shapes are inconsistent, which affects every member.
/// An ensemble with no members yields an empty batch whatever its extents.
pub fn calculate_wi(
    pressures: ArrayView3<'_, f64>,
    rates: ArrayView2<'_, f64>,
) -> Result<WiBatch, WiError> {
    let (members, steps, cells) = pressures.dim();
    if rates.dim() != (members, steps) {
        return Err(WiError::ShapeMismatch {
            pressures: pressures.shape().to_vec(),
            rates: rates.shape().to_vec(),
        });
    }
    if cells < 2 && members > 0 {
        return Err(WiError::TooFewCells { cells });
    }

    let mut kept = Vec::with_capacity(members);
    let mut failed = Vec::new();
    let mut values = Vec::with_capacity(members);
    for (j, (p, q)) in pressures
        .axis_iter(Axis(0))
        .zip(rates.axis_iter(Axis(0)))
        .enumerate()
    {
        match member_well_index(p, q) {
            Ok(wi) => {
                kept.push(j);
                values.push(wi);
            }
            Err(e) => {
                failed.push(j);
                warn!(member = j, error = %e, failed = failed.len(), "well index discarded");
            }
        }
    }

    let views: Vec<_> = values.iter().map(|v| v.view()).collect();
    let values = if views.is_empty() {
        Array3::zeros((0, steps, cells.saturating_sub(1)))
    } else {
        ndarray::stack(Axis(0), &views).map_err(|_| WiError::ShapeMismatch {
            pressures: pressures.shape().to_vec(),
            rates: rates.shape().to_vec(),
        })?
    };
    info!(kept = kept.len(), failed = failed.len(), "well index computed");
    Ok(WiBatch {
        values,
        kept,
        failed,
    })
}
