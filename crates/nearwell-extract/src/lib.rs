//! Turning collected simulator arrays into training data.
//!
//! - [`extract_features`]: per-keyword unit scaling, broadcasting and
//!   stacking into one feature tensor with a trailing feature axis.
//! - [`calculate_radii`]: cell radii from a grid-geometry text file.
//! - [`member_well_index`] / [`calculate_wi`]: data-driven well index from
//!   well and grid-block pressures and injection rates.
//! - [`Scalings`]: min/max normalisation ranges persisted as CSV.
//! - [`save_dataset`] / [`load_dataset`]: feature/target pairs as `.npy`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod dataset;
pub mod error;
pub mod features;
pub mod radii;
pub mod scalings;
pub mod wi;

pub use dataset::{load_dataset, save_dataset, Dataset};
pub use error::{ExtractError, WiError};
pub use features::{extract_features, KeywordScalings, Scaling};
pub use radii::{calculate_radii, parse_radii, RadiiOptions, GRID_HEADER_LINES};
pub use scalings::{MinMax, Scalings, ValueRange};
pub use wi::{calculate_wi, member_well_index, WiBatch};
