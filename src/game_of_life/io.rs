//! Seed file loading and saving
//!
//! Seed format:
//!
//! ```text
//! 5      <- height
//! 5      <- width
//! 1 2    <- x y of a live cell, one per line
//! 2 2
//! 3 2
//! ```
//!
//! The first two lines must hold the dimensions; a bad header aborts the load.
//! Blank lines after the header are ignored. A bad coordinate line is rejected
//! on its own and the rest of the seed still loads.

use super::{Grid, GridError};
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A parsed seed, not yet applied to a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub width: usize,
    pub height: usize,
    pub coordinates: Vec<SeedCoordinate>,
    pub malformed: Vec<SeedRejection>,
}

/// A live-cell coordinate and the 1-based line it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCoordinate {
    pub line: usize,
    pub x: isize,
    pub y: isize,
}

/// A seed line that could not be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRejection {
    pub line: usize,
    pub content: String,
    pub reason: String,
}

impl fmt::Display for SeedRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: '{}': {}", self.line, self.content, self.reason)
    }
}

/// A grid built from a seed, plus the lines that were skipped
#[derive(Debug, Clone)]
pub struct SeedLoad {
    pub grid: Grid,
    pub rejected: Vec<SeedRejection>,
}

impl Seed {
    /// Build the grid and mark every coordinate alive.
    ///
    /// Fails only if the grid cannot be constructed. Out-of-bounds coordinates
    /// join the malformed lines in [`SeedLoad::rejected`].
    pub fn into_grid(self) -> Result<SeedLoad, GridError> {
        let mut grid = Grid::new(self.width, self.height)?;
        let mut rejected = self.malformed;

        for coord in self.coordinates {
            if let Err(e) = grid.set_alive(coord.x, coord.y) {
                rejected.push(SeedRejection {
                    line: coord.line,
                    content: format!("{} {}", coord.x, coord.y),
                    reason: e.to_string(),
                });
            }
        }

        rejected.sort_by_key(|r| r.line);
        for rejection in &rejected {
            warn!(line = rejection.line, reason = %rejection.reason, "Skipping seed line '{}'", rejection.content);
        }

        Ok(SeedLoad { grid, rejected })
    }
}

/// Parse a seed from its text representation
pub fn parse_seed(content: &str) -> Result<Seed> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()));

    // The header is always the first two lines, blank or not
    let height = parse_dimension(lines.next(), "height")?;
    let width = parse_dimension(lines.next(), "width")?;

    let invalid = GridError::InvalidDimension { width, height };
    let (Ok(width), Ok(height)) = (usize::try_from(width), usize::try_from(height)) else {
        return Err(invalid.into());
    };
    if width == 0 || height == 0 {
        return Err(invalid.into());
    }

    let mut coordinates = Vec::new();
    let mut malformed = Vec::new();

    for (line_no, line) in lines.filter(|(_, line)| !line.is_empty()) {
        match parse_coordinate(line) {
            Ok((x, y)) => coordinates.push(SeedCoordinate { line: line_no, x, y }),
            Err(reason) => malformed.push(SeedRejection {
                line: line_no,
                content: line.to_string(),
                reason,
            }),
        }
    }

    Ok(Seed {
        width,
        height,
        coordinates,
        malformed,
    })
}

fn parse_dimension(line: Option<(usize, &str)>, name: &str) -> Result<i64> {
    let (line_no, text) = line.with_context(|| format!("Seed is missing the grid {name} line"))?;
    text.parse::<i64>()
        .with_context(|| format!("Invalid grid {name} '{text}' on line {line_no}"))
}

fn parse_coordinate(line: &str) -> std::result::Result<(isize, isize), String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let &[x, y] = tokens.as_slice() else {
        return Err(format!("expected 2 coordinates, found {}", tokens.len()));
    };

    let parse = |token: &str| {
        token
            .parse::<isize>()
            .map_err(|_| format!("'{token}' is not an integer coordinate"))
    };

    Ok((parse(x)?, parse(y)?))
}

/// Load a seed file and build its grid
pub fn load_seed_from_file<P: AsRef<Path>>(path: P) -> Result<SeedLoad> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read seed file: {}", path.as_ref().display()))?;

    let seed = parse_seed(&content)
        .with_context(|| format!("Failed to parse seed file: {}", path.as_ref().display()))?;

    seed.into_grid()
        .with_context(|| format!("Failed to build grid from seed file: {}", path.as_ref().display()))
}

/// Convert a grid to seed text: height, width, then one live cell per line
pub fn grid_to_seed_string(grid: &Grid) -> String {
    let mut result = format!("{}\n{}\n", grid.height(), grid.width());
    for (x, y) in grid.living_cells() {
        result.push_str(&format!("{x} {y}\n"));
    }
    result
}

/// Save a grid as a seed file
pub fn save_seed_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid_to_seed_string(grid))
        .with_context(|| format!("Failed to write seed file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Write the example seed files into `output_dir`.
///
/// Existing files are left alone unless `overwrite` is set. Returns the paths
/// that were written.
pub fn create_example_seeds<P: AsRef<Path>>(output_dir: P, overwrite: bool) -> Result<Vec<PathBuf>> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        ("glider.txt", "10\n10\n1 0\n2 1\n0 2\n1 2\n2 2\n"),
        ("blinker.txt", "5\n5\n1 2\n2 2\n3 2\n"),
        ("block.txt", "4\n4\n1 1\n2 1\n1 2\n2 2\n"),
        ("beacon.txt", "6\n6\n1 1\n2 1\n1 2\n2 2\n3 3\n4 3\n3 4\n4 4\n"),
    ];

    let mut written = Vec::new();
    for (name, content) in examples {
        let path = dir.join(name);
        if path.exists() && !overwrite {
            continue;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}
