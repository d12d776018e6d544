//! On-disk fixtures.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use nearwell_extract::GRID_HEADER_LINES;
use nearwell_runner::MemberPaths;

/// Grid-geometry text with a [`GRID_HEADER_LINES`]-line header and one row
/// per boundary.
///
/// Each row carries the radius followed by two filler columns, the way the
/// grid generator writes them.
pub fn grid_file_contents(boundaries: &[f64]) -> String {
    let mut text = String::new();
    for i in 0..GRID_HEADER_LINES {
        text.push_str(&format!("-- header line {i}\n"));
    }
    for (i, r) in boundaries.iter().enumerate() {
        text.push_str(&format!("{r:.6}  {i}  0.0\n"));
    }
    text
}

/// Write [`grid_file_contents`] to `dir/GRID.txt`.
pub fn write_grid_file(dir: &Path, boundaries: &[f64]) -> io::Result<PathBuf> {
    let path = dir.join("GRID.txt");
    fs::write(&path, grid_file_contents(boundaries))?;
    Ok(path)
}

/// Create `runfiles_<index>/<deck_name>_<index>.DATA` holding `script`.
///
/// Run with `sh` as the executable, the deck is executed as a shell script
/// and receives `--output-dir=<results>` as `$1`.
pub fn write_script_deck(
    ensemble_path: &Path,
    deck_name: &str,
    index: usize,
    script: &str,
) -> io::Result<MemberPaths> {
    let paths = MemberPaths::new(ensemble_path, deck_name, index);
    fs::create_dir_all(&paths.runfiles)?;
    fs::write(&paths.deck, script)?;
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearwell_extract::{parse_radii, RadiiOptions};

    #[test]
    fn grid_fixture_parses_with_extract_header() {
        let text = grid_file_contents(&[0.0, 0.5, 2.0]);
        let grid = parse_radii(text.as_bytes(), 2, RadiiOptions::default()).unwrap();
        assert_eq!(grid.num_cells(), 2);
        assert_eq!(grid.max_radius(), 2.0);
    }
}
