//! Per-member directory layout under the ensemble path.

use std::path::{Path, PathBuf};

/// Paths owned by one ensemble member.
///
/// ```text
/// <ensemble>/runfiles_<j>/<DECK>_<j>.DATA   input deck
/// <ensemble>/results_<j>/                   simulator output
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberPaths {
    /// Member index `j`.
    pub index: usize,
    /// Input deck passed to the simulator.
    pub deck: PathBuf,
    /// Directory holding the deck and any other run files.
    pub runfiles: PathBuf,
    /// Output directory passed as `--output-dir`.
    pub results: PathBuf,
}

impl MemberPaths {
    /// Layout for member `index` with deck base name `deck_name`.
    pub fn new(ensemble_path: &Path, deck_name: &str, index: usize) -> Self {
        let runfiles = ensemble_path.join(format!("runfiles_{index}"));
        let deck = runfiles.join(format!("{deck_name}_{index}.DATA"));
        let results = ensemble_path.join(format!("results_{index}"));
        Self {
            index,
            deck,
            runfiles,
            results,
        }
    }

    /// Output file with `extension` for this member, named after the deck,
    /// e.g. `results_3/RUN_3.UNRST`.
    pub fn output_file(&self, extension: &str) -> PathBuf {
        let stem = self
            .deck
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_default();
        let mut name = stem;
        name.push(".");
        name.push(extension);
        self.results.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_follows_member_index() {
        let p = MemberPaths::new(Path::new("/tmp/ens"), "RUN", 3);
        assert_eq!(p.deck, Path::new("/tmp/ens/runfiles_3/RUN_3.DATA"));
        assert_eq!(p.results, Path::new("/tmp/ens/results_3"));
        assert_eq!(
            p.output_file("UNRST"),
            Path::new("/tmp/ens/results_3/RUN_3.UNRST")
        );
    }
}
