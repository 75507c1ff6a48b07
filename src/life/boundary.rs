//! Neighbor coordinate resolution for each boundary mode

use crate::config::BoundaryMode;
use itertools::iproduct;

/// The eight Moore-neighborhood offsets, row-major, excluding `(0, 0)`
pub fn moore_offsets() -> impl Iterator<Item = (isize, isize)> {
    iproduct!(-1isize..=1, -1isize..=1).filter(|&offset| offset != (0, 0))
}

impl BoundaryMode {
    /// Resolve one coordinate axis of a neighbor lookup.
    ///
    /// `coord` must lie in `[-1, len]`, i.e. a valid index shifted by at most
    /// one step. Only that single-step overflow is handled. Returns `None` when
    /// the lookup falls off the grid and the mode treats it as empty.
    #[inline]
    pub fn resolve(self, coord: isize, len: usize) -> Option<usize> {
        debug_assert!(coord >= -1 && coord <= len as isize);
        let last = len as isize - 1;

        match self {
            BoundaryMode::Plateau => {
                if coord < 0 || coord > last {
                    None
                } else {
                    Some(coord as usize)
                }
            }
            BoundaryMode::Donut => {
                if coord < 0 {
                    Some(last as usize)
                } else if coord > last {
                    Some(0)
                } else {
                    Some(coord as usize)
                }
            }
            BoundaryMode::Mirror => {
                if coord < 0 {
                    Some(0)
                } else if coord > last {
                    Some(last as usize)
                } else {
                    Some(coord as usize)
                }
            }
        }
    }

    /// Resolve a full `(row, col)` neighbor lookup from a cell and an offset
    #[inline]
    pub fn resolve_neighbor(
        self,
        row: usize,
        col: usize,
        (d_row, d_col): (isize, isize),
        rows: usize,
        cols: usize,
    ) -> Option<(usize, usize)> {
        let r = self.resolve(row as isize + d_row, rows)?;
        let c = self.resolve(col as isize + d_col, cols)?;
        Some((r, c))
    }
}
