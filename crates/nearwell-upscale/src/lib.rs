//! Upscaling of near-well radial simulations to Cartesian grid blocks.
//!
//! The [`Upscaler`] reduces per-cell features of a layered radial
//! simulation to per-layer values, integrates them over square blocks of
//! a coarse Cartesian grid, and computes the analytical (Peaceman) and the
//! data-driven well index that a surrogate model is trained to bridge.
//!
//! Fluid properties and relative permeabilities are supplied through the
//! [`FluidProperties`] and [`RelativePermeability`] traits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod fluid;
pub mod formulas;
pub mod upscaler;

pub use config::UpscaleConfig;
pub use error::UpscaleError;
pub use fluid::{ConstantFluid, CoreyRelPerm, FluidProperties, FluidState, Phase, RelativePermeability};
pub use upscaler::Upscaler;
