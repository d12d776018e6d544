//! Geometry kernel for radial-to-Cartesian upscaling.
//!
//! Near-well simulations resolve the pressure field on concentric rings.
//! Coarse reservoir models use square grid blocks. This crate bridges the
//! two with closed-form circle/square overlap areas:
//!
//! - [`area_squaredcircle`]: overlap of a disk and a square, both centred
//!   at the origin, in three continuous regimes.
//! - [`integrate_fine_scale_value`]: ring-weighted quadrature of a radially
//!   symmetric field inside one or more squares.
//! - [`RadialGrid`]: validated ring boundaries with derived centres.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod area;
pub mod broadcast;
pub mod error;
pub mod grid;
pub mod integrate;

pub use area::{area_squaredcircle, area_squaredcircle_array, equivalent_radius};
pub use broadcast::broadcast_shape;
pub use error::GeometryError;
pub use grid::RadialGrid;
pub use integrate::integrate_fine_scale_value;
