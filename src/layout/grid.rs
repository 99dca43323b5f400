//! Coordinate-based view over a layout.
//!
//! Panels are addressed as `(row, col)`. Layouts are currently composed
//! into a single row, so every valid coordinate has `row == 0` and the
//! column is the insertion index of the panel.

use crate::error::{LayoutError, Result};
use crate::layout::Layout;

/// Number of rows and columns in a grid view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    pub rows: usize,
    pub cols: usize,
}

pub struct Grid<'a, P> {
    layout: &'a Layout<P>,
}

impl<'a, P> Grid<'a, P> {
    pub(crate) fn new(layout: &'a Layout<P>) -> Self {
        Self { layout }
    }

    pub fn dims(&self) -> GridDims {
        let cols = self.layout.len();
        GridDims {
            rows: usize::from(cols > 0),
            cols,
        }
    }

    /// Key of the panel at the given position.
    pub fn get(&self, row: usize, col: usize) -> Result<&'a str> {
        if row != 0 {
            return Err(LayoutError::GridOutOfRange { row, col });
        }
        self.layout
            .key_at(col)
            .ok_or(LayoutError::GridOutOfRange { row, col })
    }

    /// Panels of one row, left to right.
    pub fn row(&self, row: usize) -> Result<impl Iterator<Item = &'a P> + use<'a, P>> {
        if row >= self.dims().rows {
            return Err(LayoutError::GridOutOfRange { row, col: 0 });
        }
        Ok(self.layout.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_addressing() {
        let layout: Layout<char> = [("left", 'l'), ("right", 'r')].into_iter().collect();
        let grid = layout.grid();

        assert_eq!(grid.dims(), GridDims { rows: 1, cols: 2 });
        assert_eq!(grid.get(0, 0).unwrap(), "left");
        assert_eq!(grid.get(0, 1).unwrap(), "right");
        assert!(matches!(
            grid.get(0, 2),
            Err(LayoutError::GridOutOfRange { row: 0, col: 2 })
        ));
        assert!(matches!(
            grid.get(1, 0),
            Err(LayoutError::GridOutOfRange { row: 1, col: 0 })
        ));
        assert_eq!(grid.row(0).unwrap().copied().collect::<String>(), "lr");
    }

    #[test]
    fn empty_layout_has_no_rows() {
        let layout: Layout<char> = Layout::new();
        let grid = layout.grid();
        assert_eq!(grid.dims(), GridDims { rows: 0, cols: 0 });
        assert!(grid.row(0).is_err());
    }
}
