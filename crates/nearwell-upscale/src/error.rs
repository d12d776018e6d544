//! Error types for upscaling.

use nearwell_extract::WiError;
use nearwell_geometry::GeometryError;
use thiserror::Error;

/// Errors from [`UpscaleConfig::validate`](crate::UpscaleConfig::validate)
/// and the [`Upscaler`](crate::Upscaler).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum UpscaleError {
    /// A dimension of the configuration is zero.
    #[error("{which} must be at least 1")]
    ZeroDimension {
        /// Which dimension.
        which: &'static str,
    },
    /// The z-cells cannot be split evenly into layers.
    #[error("{zcells} z-cells cannot be split into {layers} equal layers")]
    UnevenLayers {
        /// Total z-cells.
        zcells: usize,
        /// Requested layers.
        layers: usize,
    },
    /// Sector angle outside `(0, 2π]`.
    #[error("sector angle must be in (0, 2π], got {angle}")]
    InvalidAngle {
        /// The offending angle in radians.
        angle: f64,
    },
    /// A length that must be finite and positive is not.
    #[error("{quantity} must be finite and positive, got {value}")]
    NonPositive {
        /// Which quantity.
        quantity: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The radial grid does not have one ring per x-cell.
    #[error("radial grid has {cells} rings but the model has {xcells} x-cells")]
    GridMismatch {
        /// Rings in the grid.
        cells: usize,
        /// Configured x-cells.
        xcells: usize,
    },
    /// An input array has the wrong shape.
    #[error("{what} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        /// Which input.
        what: &'static str,
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        actual: Vec<usize>,
    },
    /// Feature index past the trailing axis.
    #[error("feature index {index} out of range for {features} features")]
    FeatureIndex {
        /// Requested index.
        index: usize,
        /// Number of features.
        features: usize,
    },
    /// The radius at which a well index is evaluated lies inside the well.
    #[error("radius {radius} must exceed the well radius {well_radius}")]
    RadiusInsideWell {
        /// Evaluation radius.
        radius: f64,
        /// Well radius.
        well_radius: f64,
    },
    /// Well and grid-block pressure are equal.
    #[error(
        "zero pressure difference for member {member}, step {step}, layer {layer}, cell {cell}"
    )]
    ZeroPressureDifference {
        /// Ensemble member.
        member: usize,
        /// Report step.
        step: usize,
        /// Layer.
        layer: usize,
        /// Radial cell.
        cell: usize,
    },
    /// A rate or pressure entering the well index is NaN or infinite.
    #[error(
        "non-finite well index for member {member}, step {step}, layer {layer}, cell {cell}"
    )]
    NonFiniteWellIndex {
        /// Ensemble member.
        member: usize,
        /// Report step.
        step: usize,
        /// Layer.
        layer: usize,
        /// Radial cell.
        cell: usize,
    },
    /// `q / Δp` of a single pair of values is not finite.
    #[error("well index {rate} / {pressure_difference} is not finite")]
    DegenerateWellIndex {
        /// Rate `q`.
        rate: f64,
        /// Pressure difference `p_w - p_gb`.
        pressure_difference: f64,
    },
    /// The well-index primitive rejected its input.
    #[error(transparent)]
    WellIndex(WiError),
    /// Geometry kernel failure.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
