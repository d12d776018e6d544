//! Error types for geometry operations.

use thiserror::Error;

/// Errors from the geometry kernel.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeometryError {
    /// A radius or side length is negative.
    #[error("{quantity} must be non-negative, got {value}")]
    NegativeInput {
        /// Which input was negative (`"radius"` or `"sidelength"`).
        quantity: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A radius or side length is NaN or infinite.
    #[error("{quantity} must be finite, got {value}")]
    NonFinite {
        /// Which input was not finite.
        quantity: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The outermost ring does not cover a requested square.
    #[error(
        "square with side {sidelength} needs radius >= {required}, \
         but the outermost radius is {max_radius}"
    )]
    DiskTooSmall {
        /// Side length of the uncovered square.
        sidelength: f64,
        /// Radius required to cover it (`sidelength / sqrt(2)`).
        required: f64,
        /// Largest radius available.
        max_radius: f64,
    },
    /// The number of radii does not match the number of rings plus one.
    #[error("expected {expected} radii for the ring axis, got {actual}")]
    RadiiMismatch {
        /// `rings + 1`.
        expected: usize,
        /// Number of radii provided.
        actual: usize,
    },
    /// Radii are not strictly increasing.
    #[error("radii must be strictly increasing (violated at index {index})")]
    NonMonotonicRadii {
        /// Index of the first radius not larger than its predecessor.
        index: usize,
    },
    /// The integration axis does not exist.
    #[error("axis {axis} out of bounds for array with {ndim} dimensions")]
    AxisOutOfBounds {
        /// Requested axis.
        axis: usize,
        /// Dimensionality of the input.
        ndim: usize,
    },
    /// Two shapes cannot be broadcast together.
    #[error("shapes {lhs:?} and {rhs:?} cannot be broadcast together")]
    IncompatibleShapes {
        /// First shape.
        lhs: Vec<usize>,
        /// Second shape.
        rhs: Vec<usize>,
    },
    /// A radial grid needs at least two boundaries (one cell).
    #[error("radial grid needs at least 2 boundaries, got {boundaries}")]
    EmptyGrid {
        /// Number of boundaries supplied.
        boundaries: usize,
    },
    /// A sector angle outside `(0, 2π]`.
    #[error("sector angle must lie in (0, 2π], got {angle}")]
    InvalidAngle {
        /// The offending angle in radians.
        angle: f64,
    },
}
