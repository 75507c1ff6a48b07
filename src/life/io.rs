//! Loading colonies from setup files and random seeding

use super::{Age, Grid};
use anyhow::Context;
use rand::Rng;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a colony setup file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read setup file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: grid row appears before the row and column counts")]
    RowBeforeDimensions { line: usize },
    #[error("line {line}: expected a dimension or grid row, found '{content}'")]
    InvalidLine { line: usize, content: String },
    #[error("line {line}: unexpected extra dimension {value}")]
    ExtraDimension { line: usize, value: usize },
    #[error("line {line}: more than the declared {rows} rows")]
    TooManyRows { line: usize, rows: usize },
    #[error("setup file is missing its {0} count")]
    MissingDimension(&'static str),
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
}

/// Load a colony from a setup file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_setup(&content)
}

/// Parse the setup format.
///
/// `#` lines are comments. The first two bare integers are the row and column
/// counts. Lines starting with `X` or `-` are rows, where `X` is a live cell of
/// age 1 and anything else is dead.
pub fn parse_setup(content: &str) -> Result<Grid, LoadError> {
    let mut rows: Option<usize> = None;
    let mut grid: Option<Grid> = None;
    let mut current_row = 0;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('X') || line.starts_with('-') {
            let grid = grid
                .as_mut()
                .ok_or(LoadError::RowBeforeDimensions { line: line_no })?;
            if current_row >= grid.rows {
                return Err(LoadError::TooManyRows {
                    line: line_no,
                    rows: grid.rows,
                });
            }
            if line.chars().count() < grid.cols {
                tracing::warn!(line = line_no, "short grid row padded with dead cells");
            }
            for (col, ch) in line.chars().take(grid.cols).enumerate() {
                let idx = grid.index(current_row, col);
                grid.cells[idx] = if ch == 'X' { 1 } else { 0 };
            }
            current_row += 1;
            continue;
        }

        let value: usize = line.trim().parse().map_err(|_| LoadError::InvalidLine {
            line: line_no,
            content: line.to_string(),
        })?;

        match (rows, grid.is_some()) {
            (None, _) => rows = Some(value),
            (Some(r), false) => {
                if r == 0 || value == 0 {
                    return Err(LoadError::EmptyGrid { rows: r, cols: value });
                }
                grid = Some(Grid::new(r, value));
            }
            (Some(_), true) => {
                return Err(LoadError::ExtraDimension { line: line_no, value });
            }
        }
    }

    match (rows, grid) {
        (_, Some(grid)) => {
            if current_row < grid.rows {
                tracing::debug!(
                    declared = grid.rows,
                    found = current_row,
                    "setup file has fewer rows than declared, remainder left dead"
                );
            }
            Ok(grid)
        }
        (Some(_), None) => Err(LoadError::MissingDimension("column")),
        (None, None) => Err(LoadError::MissingDimension("row")),
    }
}

/// Seed a colony at random: each cell is dead half the time, otherwise alive
/// with an age drawn uniformly from `1..=seed_max_age`.
pub fn generate_random_grid<R: Rng>(
    rows: usize,
    cols: usize,
    seed_max_age: Age,
    rng: &mut R,
) -> Grid {
    let seed_max_age = seed_max_age.max(1);
    let mut grid = Grid::new(rows, cols);
    for cell in grid.cells.iter_mut() {
        *cell = if rng.random_bool(0.5) {
            rng.random_range(1..=seed_max_age)
        } else {
            0
        };
    }
    grid
}

/// Render a colony in the setup format. Any live age is written as `X`.
pub fn grid_to_setup_string(grid: &Grid, comment: &str) -> String {
    let mut result = String::with_capacity(grid.rows * (grid.cols + 1) + 32);

    for line in comment.lines() {
        result.push_str("# ");
        result.push_str(line);
        result.push('\n');
    }
    result.push_str(&format!("{}\n{}\n", grid.rows, grid.cols));

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            result.push(if grid.is_alive(row, col) { 'X' } else { '-' });
        }
        result.push('\n');
    }

    result
}

/// Save a colony to a setup file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P, comment: &str) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, grid_to_setup_string(grid, comment))
        .with_context(|| format!("Failed to write setup file: {}", path.display()))?;

    Ok(())
}

/// Build a colony from pattern rows, `X` alive at age 1 and anything else dead
pub fn grid_from_pattern(pattern: &[&str]) -> anyhow::Result<Grid> {
    let rows: Vec<Vec<Age>> = pattern
        .iter()
        .map(|line| line.chars().map(|ch| if ch == 'X' { 1 } else { 0 }).collect())
        .collect();
    Grid::from_rows(rows)
}

/// Write a handful of well-known starting colonies into `output_dir`
pub fn create_example_colonies<P: AsRef<Path>>(output_dir: P) -> anyhow::Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let colonies: [(&str, &str, &[&str]); 5] = [
        (
            "glider.txt",
            "Glider",
            &[
                "--X-----", "X-X-----", "-XX-----", "--------",
                "--------", "--------", "--------", "--------",
            ],
        ),
        (
            "block.txt",
            "Still life, stabilizes once every cell is fully aged",
            &["----", "-XX-", "-XX-", "----"],
        ),
        (
            "simplebar.txt",
            "Blinker, oscillates forever",
            &["-----", "-----", "-XXX-", "-----", "-----"],
        ),
        (
            "beacon.txt",
            "Period two oscillator",
            &["------", "-XX---", "-XX---", "---XX-", "---XX-", "------"],
        ),
        (
            "edge-pair.txt",
            "Pair on the top edge, fate depends on the boundary mode",
            &["XX--", "----", "----", "----"],
        ),
    ];

    for (name, comment, pattern) in colonies {
        let grid = grid_from_pattern(pattern)
            .with_context(|| format!("Invalid pattern for {}", name))?;
        save_grid_to_file(&grid, dir.join(name), comment)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    #[test]
    fn test_parse_setup() {
        let content = "# a comment\n3\n4\nX--X\n-XX-\n--X-\n";
        let grid = parse_setup(content).unwrap();

        assert_eq!(grid.rows, 3);
        assert_eq!(grid.cols, 4);
        assert_eq!(grid.living_count(), 5);
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(0, 3), 1);
        assert_eq!(grid.get(1, 1), 1);
        assert_eq!(grid.get(2, 2), 1);
        assert_eq!(grid.get(2, 0), 0);
    }

    #[test]
    fn test_other_characters_are_dead() {
        let grid = parse_setup("1\n4\nXoX.\n").unwrap();
        assert_eq!(grid.cells, vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_short_and_missing_rows() {
        let grid = parse_setup("3\n3\nX\n-X\n").unwrap();
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.cols, 3);
        assert_eq!(grid.cells, vec![1, 0, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_long_rows_truncated() {
        let grid = parse_setup("1\n2\nXXXX\n").unwrap();
        assert_eq!(grid.cells, vec![1, 1]);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let grid = parse_setup("2\r\n\r\n2\r\nX-\r\n-X\r\n").unwrap();
        assert_eq!(grid.cells, vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_invalid_setup() {
        assert!(matches!(
            parse_setup("X--\n3\n3\n"),
            Err(LoadError::RowBeforeDimensions { line: 1 })
        ));
        assert!(matches!(
            parse_setup("1\n2\nXX\n-X\n"),
            Err(LoadError::TooManyRows { line: 4, rows: 1 })
        ));
        assert!(matches!(
            parse_setup("2\n2\n2\n"),
            Err(LoadError::ExtraDimension { line: 3, value: 2 })
        ));
        assert!(matches!(
            parse_setup("2\nabc\n"),
            Err(LoadError::InvalidLine { line: 2, .. })
        ));
        assert!(matches!(parse_setup("0\n3\n"), Err(LoadError::EmptyGrid { .. })));
        assert!(matches!(parse_setup("# only\n"), Err(LoadError::MissingDimension("row"))));
        assert!(matches!(parse_setup("4\n"), Err(LoadError::MissingDimension("column"))));
    }

    #[test]
    fn test_setup_string_output() {
        let grid = Grid::from_rows(vec![vec![1, 0, 7], vec![0, 12, 0]]).unwrap();
        let text = grid_to_setup_string(&grid, "two rows");
        assert_eq!(text, "# two rows\n2\n3\nX-X\n-X-\n");

        let reloaded = parse_setup(&text).unwrap();
        assert_eq!(reloaded.cells, vec![1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_random_grid_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = generate_random_grid(70, 90, 12, &mut rng);

        assert_eq!(grid.rows, 70);
        assert_eq!(grid.cols, 90);
        assert!(grid.cells.iter().all(|&age| age <= 12));

        let living = grid.living_count();
        let total = grid.cells.len();
        // Roughly half alive
        assert!(living > total / 3 && living < total * 2 / 3);
        assert!(grid.cells.iter().any(|&age| age == 12));
        assert!(grid.cells.iter().any(|&age| age == 1));
    }

    #[test]
    fn test_random_grid_is_reproducible() {
        let a = generate_random_grid(10, 10, 5, &mut StdRng::seed_from_u64(9));
        let b = generate_random_grid(10, 10, 5, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/colony.txt");

        let original = Grid::from_rows(vec![vec![1, 0, 1], vec![0, 1, 0]]).unwrap();
        save_grid_to_file(&original, &file_path, "saved").unwrap();

        let loaded = load_grid_from_file(&file_path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempdir().unwrap();
        let err = load_grid_from_file(temp_dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_create_example_colonies() {
        let temp_dir = tempdir().unwrap();
        create_example_colonies(temp_dir.path()).unwrap();

        for name in ["glider.txt", "block.txt", "simplebar.txt", "beacon.txt", "edge-pair.txt"] {
            assert!(temp_dir.path().join(name).exists(), "{} missing", name);
        }

        let glider = load_grid_from_file(temp_dir.path().join("glider.txt")).unwrap();
        assert_eq!(glider.rows, 8);
        assert_eq!(glider.cols, 8);
        assert_eq!(glider.living_count(), 5);

        let block = std::fs::read_to_string(temp_dir.path().join("block.txt")).unwrap();
        assert_eq!(
            block,
            "# Still life, stabilizes once every cell is fully aged\n4\n4\n----\n-XX-\n-XX-\n----\n"
        );
    }

    #[test]
    fn test_grid_from_pattern() {
        let grid = grid_from_pattern(&["X-", "oX"]).unwrap();
        assert_eq!(grid.cells, vec![1, 0, 0, 1]);
        assert!(grid_from_pattern(&["XX", "X"]).is_err());
    }
}
