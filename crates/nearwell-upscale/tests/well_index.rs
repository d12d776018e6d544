//! Well-index policies and the analytical model over small ensembles.

use std::f64::consts::TAU;

use ndarray::{Array, Array3, Array4};
use nearwell_extract::calculate_wi;
use nearwell_geometry::RadialGrid;
use nearwell_test_utils::assert_close;
use nearwell_upscale::{
    ConstantFluid, CoreyRelPerm, FluidState, UpscaleConfig, UpscaleError, Upscaler,
};

fn upscaler(members: usize, steps: usize, angle: f64) -> Upscaler {
    let config = UpscaleConfig {
        num_members: members,
        num_timesteps: steps,
        num_layers: 2,
        num_zcells: 4,
        num_xcells: 3,
        angle,
        well_radius: 0.1,
        block_sidelengths: vec![10.0],
    };
    let grid = RadialGrid::new(vec![0.1, 1.0, 4.0, 10.0]).unwrap();
    Upscaler::new(config, grid).unwrap()
}

#[test]
fn data_wi_aggregates_layers_and_corrects_the_sector() {
    let up = upscaler(1, 2, TAU / 6.0);
    // BHP per z-cell 100 + z, rate 1 per z-cell.
    let bhp = Array::from_shape_fn((1, 2, 4), |(_, _, z)| 100.0 + z as f64);
    let rates = Array3::from_elem((1, 2, 4), 1.0);
    let blocks = Array4::from_elem((1, 2, 2, 1), 90.0);

    let wi = up.data_wi(bhp.view(), blocks.view(), rates.view()).unwrap();
    assert_eq!(wi.dim(), (1, 2, 2, 1));
    // Layer 0: q = 2, p_w = 100.5 -> 6 * 2 / 10.5.
    assert_close(wi[[0, 0, 0, 0]], 6.0 * 2.0 / 10.5, 1e-12);
    // Layer 1: p_w = 102.5 -> 6 * 2 / 12.5.
    assert_close(wi[[0, 1, 1, 0]], 6.0 * 2.0 / 12.5, 1e-12);
}

#[test]
fn non_finite_rate_is_not_reported_as_zero_pressure_difference() {
    let up = upscaler(1, 2, TAU);
    let bhp = Array3::from_elem((1, 2, 4), 100.0);
    let mut rates = Array3::from_elem((1, 2, 4), 1.0);
    rates[[0, 1, 2]] = f64::NAN;
    let blocks = Array4::from_elem((1, 2, 2, 1), 90.0);

    assert_eq!(
        up.data_wi(bhp.view(), blocks.view(), rates.view()),
        Err(UpscaleError::NonFiniteWellIndex {
            member: 0,
            step: 1,
            layer: 1,
            cell: 0,
        })
    );
}

#[test]
fn zero_pressure_difference_is_fatal_here_but_soft_in_calculate_wi() {
    let up = upscaler(2, 1, TAU);
    let bhp = Array3::from_elem((2, 1, 4), 100.0);
    let rates = Array3::from_elem((2, 1, 4), 1.0);
    let mut blocks = Array4::from_elem((2, 1, 2, 1), 90.0);
    blocks[[1, 0, 1, 0]] = 100.0;

    assert_eq!(
        up.data_wi(bhp.view(), blocks.view(), rates.view()),
        Err(UpscaleError::ZeroPressureDifference {
            member: 1,
            step: 0,
            layer: 1,
            cell: 0,
        })
    );

    // The same layer-1 data through the soft policy: member 1 is dropped.
    let pressures = Array::from_shape_fn((2, 1, 2), |(j, _, c)| {
        if c == 0 {
            100.0
        } else {
            blocks[[j, 0, 1, 0]]
        }
    });
    let batch = calculate_wi(pressures.view(), rates.slice(ndarray::s![.., .., 0]))
        .unwrap();
    assert_eq!(batch.failed, vec![1]);
    assert_eq!(batch.kept, vec![0]);
}

#[test]
fn data_wi_checks_shapes() {
    let up = upscaler(1, 1, TAU);
    let bhp = Array3::from_elem((1, 1, 3), 100.0);
    let rates = Array3::from_elem((1, 1, 4), 1.0);
    let blocks = Array4::from_elem((1, 1, 2, 1), 90.0);
    assert!(matches!(
        up.data_wi(bhp.view(), blocks.view(), rates.view()),
        Err(UpscaleError::ShapeMismatch { what: "bhp", .. })
    ));
}

#[test]
fn analytical_wi_single_phase_liquid() {
    let up = upscaler(1, 1, TAU);
    let kh = Array3::from_elem((1, 1, 2), 1e-12);
    let radii = up.block_equivalent_radii();
    let pi = up.analytical_pi(kh.view(), radii.view()).unwrap();
    assert_eq!(pi.dim(), (1, 1, 2, 1));

    let shape = pi.raw_dim();
    let pressures = Array4::from_elem(shape, 1e7);
    let temperatures = Array4::from_elem(shape, 313.15);
    let no_gas = Array4::zeros(shape);
    let fluid = ConstantFluid {
        liquid: FluidState {
            density: 1000.0,
            viscosity: 1e-3,
        },
        ..ConstantFluid::default()
    };

    let wi = up
        .analytical_wi(
            pi.view(),
            pressures.view(),
            temperatures.view(),
            no_gas.view(),
            &fluid,
            &CoreyRelPerm::default(),
        )
        .unwrap();
    // Without gas only the liquid moves: WI = PI * rho / mu.
    assert_close(wi[[0, 0, 1, 0]], pi[[0, 0, 1, 0]] * 1e6, 1e-12);
}

#[test]
fn analytical_wi_rejects_mismatched_inputs() {
    let up = upscaler(1, 1, TAU);
    let pi = Array4::from_elem((1, 1, 2, 1), 1.0);
    let small = Array4::from_elem((1, 1, 1, 1), 1.0);
    assert!(matches!(
        up.analytical_wi(
            pi.view(),
            small.view(),
            pi.view(),
            pi.view(),
            &ConstantFluid::default(),
            &CoreyRelPerm::default(),
        ),
        Err(UpscaleError::ShapeMismatch {
            what: "pressures",
            ..
        })
    ));
}

#[test]
fn well_radius_beyond_evaluation_radius_is_rejected() {
    let up = upscaler(1, 1, TAU);
    let kh = Array3::from_elem((1, 1, 2), 1.0);
    let radii = ndarray::arr1(&[0.05]);
    assert!(matches!(
        up.analytical_pi(kh.view(), radii.view()),
        Err(UpscaleError::RadiusInsideWell { .. })
    ));
}
