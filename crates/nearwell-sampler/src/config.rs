//! Sampling options.

use serde::Deserialize;

/// Options for [`create_ensemble`](crate::create_ensemble).
///
/// The ensemble size itself comes from
/// [`RunSpecs::npoints`](nearwell_core::RunSpecs::npoints).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Variables drawn per member instead of being meshed.
    pub efficient_sampling: Vec<String>,
    /// RNG seed. `None` draws a fresh seed, which is logged at debug level.
    pub seed: Option<u64>,
}

impl SamplingConfig {
    /// Config with a fixed seed and no efficient sampling.
    pub fn seeded(seed: u64) -> Self {
        Self {
            efficient_sampling: Vec::new(),
            seed: Some(seed),
        }
    }

    /// Add variables to draw per member.
    pub fn with_efficient_sampling<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.efficient_sampling
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether `name` is drawn per member.
    pub fn is_efficient(&self, name: &str) -> bool {
        self.efficient_sampling.iter().any(|n| n == name)
    }
}
