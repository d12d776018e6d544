//! In-memory simulator output.

use std::collections::HashMap;

use ndarray::{Array1, Array2};
use nearwell_runner::{MemberPaths, OutputError, ResultReader, SimulationOutput};

/// Decoded output of one fake member.
#[derive(Clone, Debug, Default)]
pub struct FakeOutput {
    pub steps: usize,
    pub fields: HashMap<String, Array2<f64>>,
    pub init: HashMap<String, Array1<f64>>,
    pub summary: HashMap<String, Array1<f64>>,
}

impl FakeOutput {
    pub fn new(steps: usize) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    /// Field whose value at `(t, c)` is `base + 10 t + c`.
    pub fn with_ramp_field(mut self, keyword: &str, cells: usize, base: f64) -> Self {
        let values = Array2::from_shape_fn((self.steps, cells), |(t, c)| base + (10 * t + c) as f64);
        self.fields.insert(keyword.to_string(), values);
        self
    }

    pub fn with_field(mut self, keyword: &str, values: Array2<f64>) -> Self {
        self.fields.insert(keyword.to_string(), values);
        self
    }

    pub fn with_init(mut self, keyword: &str, values: Array1<f64>) -> Self {
        self.init.insert(keyword.to_string(), values);
        self
    }

    pub fn with_summary(mut self, keyword: &str, values: Array1<f64>) -> Self {
        self.summary.insert(keyword.to_string(), values);
        self
    }
}

fn lookup<A: Clone>(map: &HashMap<String, A>, keyword: &str) -> Result<A, OutputError> {
    map.get(keyword)
        .cloned()
        .ok_or_else(|| OutputError::MissingKeyword {
            keyword: keyword.to_string(),
        })
}

impl SimulationOutput for FakeOutput {
    fn report_steps(&self) -> usize {
        self.steps
    }

    fn field(&self, keyword: &str) -> Result<Array2<f64>, OutputError> {
        lookup(&self.fields, keyword)
    }

    fn init(&self, keyword: &str) -> Result<Array1<f64>, OutputError> {
        lookup(&self.init, keyword)
    }

    fn summary(&self, keyword: &str) -> Result<Array1<f64>, OutputError> {
        lookup(&self.summary, keyword)
    }
}

/// Serves a [`FakeOutput`] per member index, with an optional fallback.
///
/// Members with neither an entry nor a fallback fail with
/// [`OutputError::MissingFile`].
#[derive(Clone, Debug, Default)]
pub struct FakeReader {
    pub members: HashMap<usize, FakeOutput>,
    pub fallback: Option<FakeOutput>,
}

impl FakeReader {
    /// Every member returns `output`.
    pub fn uniform(output: FakeOutput) -> Self {
        Self {
            members: HashMap::new(),
            fallback: Some(output),
        }
    }

    pub fn with_member(mut self, index: usize, output: FakeOutput) -> Self {
        self.members.insert(index, output);
        self
    }
}

impl ResultReader for FakeReader {
    fn open(&self, member: &MemberPaths) -> Result<Box<dyn SimulationOutput>, OutputError> {
        self.members
            .get(&member.index)
            .or(self.fallback.as_ref())
            .cloned()
            .map(|o| Box::new(o) as Box<dyn SimulationOutput>)
            .ok_or_else(|| OutputError::MissingFile {
                path: member.output_file("UNRST"),
            })
    }
}
