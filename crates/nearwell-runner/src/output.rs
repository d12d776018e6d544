//! The simulator-output reader seam.
//!
//! The simulator writes restart, init and summary files in its own binary
//! format. Decoding them is delegated to a [`ResultReader`] so the
//! collector only sees plain arrays.

use std::io;
use std::path::PathBuf;

use ndarray::{Array1, Array2};
use thiserror::Error;

use crate::layout::MemberPaths;

/// Errors raised while reading a member's output.
///
/// These never abort an ensemble run; the member is disregarded instead.
#[derive(Debug, Error)]
pub enum OutputError {
    /// An expected output file does not exist.
    #[error("missing output file {path}")]
    MissingFile {
        /// The missing file.
        path: PathBuf,
    },
    /// The output does not contain the keyword.
    #[error("keyword '{keyword}' not present in output")]
    MissingKeyword {
        /// The missing keyword.
        keyword: String,
    },
    /// The file exists but could not be decoded.
    #[error("malformed output: {reason}")]
    Malformed {
        /// Decoder message.
        reason: String,
    },
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One member's decoded simulator output.
pub trait SimulationOutput {
    /// Number of report steps written.
    fn report_steps(&self) -> usize;

    /// Restart field `keyword`, shape `(report_steps, cells)`.
    fn field(&self, keyword: &str) -> Result<Array2<f64>, OutputError>;

    /// Init array `keyword`, shape `(cells,)`.
    fn init(&self, keyword: &str) -> Result<Array1<f64>, OutputError>;

    /// Summary vector `keyword`, one value per report step.
    fn summary(&self, keyword: &str) -> Result<Array1<f64>, OutputError>;
}

/// Opens a member's output directory.
pub trait ResultReader {
    /// Decode the output of `member`.
    fn open(&self, member: &MemberPaths) -> Result<Box<dyn SimulationOutput>, OutputError>;
}
