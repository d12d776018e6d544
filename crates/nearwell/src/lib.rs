//! Nearwell: ensemble generation and upscaling for near-well surrogate models.
//!
//! This is the facade crate that re-exports the public API of every
//! sub-crate. The pipeline it supports:
//!
//! 1. Describe the uncertain inputs as [`RunSpecs`](types::RunSpecs) and
//!    draw an ensemble with [`sampler::create_ensemble`].
//! 2. Run the external simulator per member with [`runner::run_ensemble`].
//! 3. Turn the collected arrays into features and well-index targets with
//!    [`extract`].
//! 4. Upscale radial fields to Cartesian blocks and compare data-driven
//!    and analytical well indices with [`upscale::Upscaler`].
//!
//! # Quick start
//!
//! ```rust
//! use nearwell::prelude::*;
//!
//! let specs = RunSpecs::from_toml_str(
//!     r#"
//!     npoints = 4
//!
//!     [[variables]]
//!     name = "PERM"
//!     min = 1.0e-14
//!     max = 1.0e-12
//!     npoints = 2
//!
//!     [[variables]]
//!     name = "TEMP"
//!     min = 20.0
//!     max = 60.0
//!     npoints = 2
//!     "#,
//! )?;
//! let ensemble = create_ensemble(&specs, &SamplingConfig::seeded(42))?;
//! assert_eq!(ensemble.len(), 4);
//!
//! // A constant field of 2 on rings out to r = 4 covers a 4x4 square.
//! let grid = RadialGrid::new(vec![0.0, 1.0, 2.0, 3.0, 4.0])?;
//! let values = ndarray::arr1(&[2.0, 2.0, 2.0, 2.0]).into_dyn();
//! let total = integrate_fine_scale_value(values.view(), grid.boundary_radii(), &[4.0], 0)?;
//! assert!((total[[0]] - 32.0).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `nearwell-core` | Variable specs, run specs, ensembles |
//! | [`geometry`] | `nearwell-geometry` | Circle/square overlap, radial grids, quadrature |
//! | [`sampler`] | `nearwell-sampler` | Parameter-space sampling |
//! | [`runner`] | `nearwell-runner` | Batched simulator runs and result collection |
//! | [`extract`] | `nearwell-extract` | Features, grid radii, well index, datasets |
//! | [`upscale`] | `nearwell-upscale` | Layer reductions, block averages, Peaceman model |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Shared data model (`nearwell-core`).
pub use nearwell_core as types;

/// Geometry kernel (`nearwell-geometry`).
///
/// [`geometry::area_squaredcircle`] and
/// [`geometry::integrate_fine_scale_value`] are also in the [`prelude`].
pub use nearwell_geometry as geometry;

/// Ensemble sampling (`nearwell-sampler`).
pub use nearwell_sampler as sampler;

/// Simulator orchestration (`nearwell-runner`).
///
/// Decoding the simulator's binary output is left to an implementation of
/// [`runner::ResultReader`].
pub use nearwell_runner as runner;

/// Feature and target extraction (`nearwell-extract`).
pub use nearwell_extract as extract;

/// Upscaling and well-index models (`nearwell-upscale`).
pub use nearwell_upscale as upscale;

/// Common imports for typical nearwell usage.
///
/// ```rust
/// use nearwell::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use nearwell_core::{DistributionKind, Ensemble, EnsembleMember, ParamValue, RunSpecs, VariableSpec};

    // Geometry
    pub use nearwell_geometry::{
        area_squaredcircle, equivalent_radius, integrate_fine_scale_value, RadialGrid,
    };

    // Sampling
    pub use nearwell_sampler::{create_ensemble, SamplingConfig};

    // Running
    pub use nearwell_runner::{
        run_ensemble, CancelToken, EnsembleResults, Keywords, ResultReader, RunConfig,
        SimulationOutput,
    };

    // Extraction
    pub use nearwell_extract::{
        calculate_radii, calculate_wi, extract_features, KeywordScalings, RadiiOptions, Scalings,
    };

    // Upscaling
    pub use nearwell_upscale::{UpscaleConfig, Upscaler};

    // Errors
    pub use nearwell_core::SpecError;
    pub use nearwell_extract::{ExtractError, WiError};
    pub use nearwell_geometry::GeometryError;
    pub use nearwell_runner::RunError;
    pub use nearwell_sampler::SampleError;
    pub use nearwell_upscale::UpscaleError;
}
