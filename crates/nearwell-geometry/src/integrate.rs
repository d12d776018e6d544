//! Radial-to-Cartesian quadrature.

use std::f64::consts::FRAC_1_SQRT_2;

use ndarray::{Array2, ArrayD, ArrayView1, ArrayViewD, Axis, IxDyn, Zip};

use crate::area::{check_length, overlap_area};
use crate::error::GeometryError;
use crate::grid::check_strictly_increasing;

/// Integrate a radially symmetric field over centred squares.
///
/// `radial_values` holds one value per ring along `axis`; `radii` holds the
/// `rings + 1` ring boundaries. For each side length `s`, the result is
///
/// ```text
/// Σ_i value_i · (A(r_{i+1}, s) − A(r_i, s))
/// ```
///
/// with `A` = [`area_squaredcircle`](crate::area_squaredcircle). The
/// output has the same shape as `radial_values` except that `axis` holds
/// one entry per side length. Divide by `s²` for a block average.
///
/// Zero rings yield zeros without further checks.
///
/// # Errors
///
/// - [`GeometryError::AxisOutOfBounds`] if `axis` is invalid.
/// - [`GeometryError::RadiiMismatch`] if `radii.len() != rings + 1`.
/// - [`GeometryError::NonMonotonicRadii`] / [`GeometryError::NegativeInput`]
///   for malformed radii or side lengths.
/// - [`GeometryError::DiskTooSmall`] if the outermost ring does not cover a
///   square, i.e. `max(radii) < s/√2`.
pub fn integrate_fine_scale_value(
    radial_values: ArrayViewD<'_, f64>,
    radii: ArrayView1<'_, f64>,
    block_sidelengths: &[f64],
    axis: usize,
) -> Result<ArrayD<f64>, GeometryError> {
    let ndim = radial_values.ndim();
    if axis >= ndim {
        return Err(GeometryError::AxisOutOfBounds { axis, ndim });
    }
    let rings = radial_values.len_of(Axis(axis));
    let mut out_shape = radial_values.shape().to_vec();
    out_shape[axis] = block_sidelengths.len();
    let mut out = ArrayD::<f64>::zeros(IxDyn(&out_shape));
    if rings == 0 {
        return Ok(out);
    }

    if radii.len() != rings + 1 {
        return Err(GeometryError::RadiiMismatch {
            expected: rings + 1,
            actual: radii.len(),
        });
    }
    for &r in radii.iter() {
        check_length("radius", r)?;
    }
    check_strictly_increasing(radii)?;
    let max_radius = radii[rings];

    let mut weights = Array2::<f64>::zeros((block_sidelengths.len(), rings));
    for (b, &s) in block_sidelengths.iter().enumerate() {
        check_length("sidelength", s)?;
        let required = s * FRAC_1_SQRT_2;
        if max_radius < required {
            return Err(GeometryError::DiskTooSmall {
                sidelength: s,
                required,
                max_radius,
            });
        }
        let mut row = weights.row_mut(b);
        let mut inner_area = overlap_area(radii[0], s);
        for i in 0..rings {
            let outer_area = overlap_area(radii[i + 1], s);
            row[i] = outer_area - inner_area;
            inner_area = outer_area;
        }
    }

    Zip::from(out.lanes_mut(Axis(axis)))
        .and(radial_values.lanes(Axis(axis)))
        .for_each(|mut blocks, values| {
            for (b, w) in weights.outer_iter().enumerate() {
                blocks[b] = values.dot(&w);
            }
        });
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, Array, Array1};
    use proptest::prelude::*;

    #[test]
    fn worked_example() {
        let values = arr1(&[2.0, 2.0, 2.0, 2.0]).into_dyn();
        let radii = arr1(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let out = integrate_fine_scale_value(values.view(), radii.view(), &[4.0], 0).unwrap();
        assert_eq!(out.shape(), &[1]);
        assert!((out[[0]] - 32.0).abs() < 1e-12);
    }

    #[test]
    fn empty_values_give_zeros() {
        let values = Array::<f64, _>::zeros((3, 0)).into_dyn();
        let radii = Array1::<f64>::zeros(0);
        let out =
            integrate_fine_scale_value(values.view(), radii.view(), &[1.0, 2.0], 1).unwrap();
        assert_eq!(out.shape(), &[3, 2]);
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn small_disk_is_rejected() {
        let values = arr1(&[1.0, 1.0]).into_dyn();
        let radii = arr1(&[0.0, 1.0, 2.0]);
        match integrate_fine_scale_value(values.view(), radii.view(), &[4.0], 0) {
            Err(GeometryError::DiskTooSmall { max_radius, .. }) => assert_eq!(max_radius, 2.0),
            other => panic!("expected DiskTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn radii_length_must_match() {
        let values = arr1(&[1.0, 1.0]).into_dyn();
        let radii = arr1(&[0.0, 5.0]);
        assert!(matches!(
            integrate_fine_scale_value(values.view(), radii.view(), &[1.0], 0),
            Err(GeometryError::RadiiMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn axis_must_exist() {
        let values = arr1(&[1.0]).into_dyn();
        let radii = arr1(&[0.0, 5.0]);
        assert!(matches!(
            integrate_fine_scale_value(values.view(), radii.view(), &[1.0], 1),
            Err(GeometryError::AxisOutOfBounds { axis: 1, ndim: 1 })
        ));
    }

    #[test]
    fn integrates_along_inner_axis_for_several_blocks() {
        // Two lanes; the second doubles the first.
        let values = ndarray::arr2(&[[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]).into_dyn();
        let radii = arr1(&[0.0, 1.0, 2.0, 10.0]);
        let out =
            integrate_fine_scale_value(values.view(), radii.view(), &[2.0, 4.0], 1).unwrap();
        assert_eq!(out.shape(), &[2, 2]);
        assert!((out[[0, 0]] - 4.0).abs() < 1e-12);
        assert!((out[[0, 1]] - 16.0).abs() < 1e-12);
        assert!((out[[1, 0]] - 8.0).abs() < 1e-12);
        assert!((out[[1, 1]] - 32.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn constant_field_integrates_to_value_times_area(
            value in -5.0f64..5.0,
            s in 0.1f64..10.0,
            rings in 1usize..20,
        ) {
            // Rings out to exactly the covering radius and a little beyond.
            let r_max = s * FRAC_1_SQRT_2 * 1.01;
            let radii = Array1::linspace(0.0, r_max, rings + 1);
            let values = Array1::from_elem(rings, value).into_dyn();
            let out = integrate_fine_scale_value(values.view(), radii.view(), &[s], 0).unwrap();
            prop_assert!((out[[0]] - value * s * s).abs() <= 1e-9 * (1.0 + (value * s * s).abs()));
        }
    }
}
