//! Shape validation shared by room tile grids and the maze room grid.

use thiserror::Error;

use crate::error::{ErrorSeverity, GameError};

/// Construction-time violations of the non-empty rectangle invariant.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no rows")]
    EmptyHeight,

    #[error("grid has no columns")]
    EmptyWidth,

    #[error("grid row {row} has {found} cells, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid position ({x}, {y}) is outside a {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            GridError::EmptyHeight => "GRID_EMPTY_HEIGHT",
            GridError::EmptyWidth => "GRID_EMPTY_WIDTH",
            GridError::NotRectangular { .. } => "GRID_NOT_RECTANGULAR",
            GridError::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
        }
    }
}

/// Returns `(height, width)` of `rows` when every row has the same, non-zero
/// length.
pub fn rectangle_dimensions<T>(rows: &[Vec<T>]) -> Result<(usize, usize), GridError> {
    let Some(first) = rows.first() else {
        return Err(GridError::EmptyHeight);
    };
    let width = first.len();
    if width == 0 {
        return Err(GridError::EmptyWidth);
    }

    for (row, cells) in rows.iter().enumerate().skip(1) {
        if cells.len() != width {
            return Err(GridError::NotRectangular {
                row,
                expected: width,
                found: cells.len(),
            });
        }
    }

    Ok((rows.len(), width))
}

/// Converts signed coordinates into indices when they fall inside the grid.
pub(crate) fn index(x: i32, y: i32, width: usize, height: usize) -> Option<(usize, usize)> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;
    (x < width && y < height).then_some((x, y))
}
