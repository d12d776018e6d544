//! Benchmark profiles for the nearwell workspace.
//!
//! - [`geometric_grid`]: radial grid with geometrically growing rings
//! - [`synthetic_features`]: a logarithmic pressure profile per member
//! - [`reference_upscaler`]: 50 members, 20 steps, 5 layers, 100 rings

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ndarray::Array4;
use nearwell_geometry::RadialGrid;
use nearwell_upscale::{UpscaleConfig, Upscaler};

/// `rings` rings from the well radius out to `outer`, each wider than the
/// last by a constant factor.
pub fn geometric_grid(rings: usize, well_radius: f64, outer: f64) -> RadialGrid {
    let ratio = (outer / well_radius).powf(1.0 / rings as f64);
    let boundaries: Vec<f64> = std::iter::once(0.0)
        .chain((1..=rings).map(|i| well_radius * ratio.powi(i as i32)))
        .collect();
    RadialGrid::new(boundaries).expect("geometric radii are strictly increasing")
}

/// Flat feature tensor `(members, steps, zcells * xcells, 2)` for `config`.
///
/// Feature 0 is a steady radial pressure profile `p_w - a ln(r/r_w)`,
/// feature 1 a per-member temperature.
pub fn synthetic_features(config: &UpscaleConfig, grid: &RadialGrid) -> Array4<f64> {
    let centres = grid.cell_center_radii();
    let xcells = config.num_xcells;
    Array4::from_shape_fn(
        (
            config.num_members,
            config.num_timesteps,
            config.num_cells(),
            2,
        ),
        |(j, t, cell, f)| {
            if f == 1 {
                20.0 + j as f64
            } else {
                let r = centres[cell % xcells].max(config.well_radius);
                250.0 + t as f64 - (1.0 + 0.1 * j as f64) * (r / config.well_radius).ln()
            }
        },
    )
}

/// Reference profile: 50 members, 20 report steps, 5 layers of 4 z-cells,
/// 100 rings out to 500 m, three block sizes.
pub fn reference_upscaler() -> Upscaler {
    let config = UpscaleConfig {
        num_members: 50,
        num_timesteps: 20,
        num_layers: 5,
        num_zcells: 20,
        num_xcells: 100,
        well_radius: 0.1,
        block_sidelengths: vec![10.0, 50.0, 100.0],
        ..UpscaleConfig::default()
    };
    let grid = geometric_grid(config.num_xcells, config.well_radius, 500.0);
    Upscaler::new(config, grid).expect("reference profile is valid")
}
