//! Feature/target datasets on disk.

use std::fs;
use std::path::Path;

use ndarray::ArrayD;
use ndarray_npy::{read_npy, write_npy};
use tracing::debug;

use crate::error::ExtractError;

const FEATURES_FILE: &str = "features.npy";
const TARGETS_FILE: &str = "targets.npy";

/// A feature tensor and its targets.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    /// Features, trailing axis = feature.
    pub features: ArrayD<f64>,
    /// Targets.
    pub targets: ArrayD<f64>,
}

/// Write `features.npy` and `targets.npy` into `dir`, creating it if needed.
pub fn save_dataset(dir: &Path, dataset: &Dataset) -> Result<(), ExtractError> {
    fs::create_dir_all(dir)?;
    write_npy(dir.join(FEATURES_FILE), &dataset.features)?;
    write_npy(dir.join(TARGETS_FILE), &dataset.targets)?;
    debug!(
        dir = %dir.display(),
        features = ?dataset.features.shape(),
        targets = ?dataset.targets.shape(),
        "dataset saved"
    );
    Ok(())
}

/// Read a dataset written by [`save_dataset`].
pub fn load_dataset(dir: &Path) -> Result<Dataset, ExtractError> {
    Ok(Dataset {
        features: read_npy(dir.join(FEATURES_FILE))?,
        targets: read_npy(dir.join(TARGETS_FILE))?,
    })
}
