//! Run specifications: the variables to sample, the constants shared by
//! every member, and the requested ensemble size.
//!
//! ```toml
//! npoints = 12
//!
//! [constants]
//! FLOW = "flow"
//! INJECTION_RATE = 1.0e3
//!
//! [[variables]]
//! name = "PERM"
//! min = 1.0e-13
//! max = 1.0e-11
//! npoints = 3
//!
//! [[variables]]
//! name = "TEMP"
//! min = 20.0
//! max = 60.0
//! npoints = 4
//! distribution = "uniform-float"
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::SpecError;
use crate::value::ParamValue;
use crate::variable::VariableSpec;

/// Everything the sampler needs to build an ensemble.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RunSpecs {
    /// Variables to sample, in meshing order.
    #[serde(default)]
    pub variables: Vec<VariableSpec>,
    /// Values copied into every member.
    #[serde(default)]
    pub constants: IndexMap<String, ParamValue>,
    /// Requested ensemble size. `None` requests the full Cartesian product.
    #[serde(default)]
    pub npoints: Option<usize>,
}

impl RunSpecs {
    /// Parse and validate run specs from a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, SpecError> {
        let specs: Self = toml::from_str(text).map_err(|e| SpecError::Parse {
            reason: e.to_string(),
        })?;
        specs.validate()?;
        Ok(specs)
    }

    /// Validate every variable and reject duplicate names.
    pub fn validate(&self) -> Result<(), SpecError> {
        let mut seen = HashSet::new();
        for var in &self.variables {
            var.validate()?;
            if !seen.insert(var.name.as_str()) {
                return Err(SpecError::DuplicateVariable {
                    name: var.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up a variable by name.
    pub fn variable(&self, name: &str) -> Option<&VariableSpec> {
        self.variables.iter().find(|v| v.name == name)
    }
}
