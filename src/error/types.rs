use std::fmt;

use thiserror::Error;

/// Unified result type for the panel flow crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Frame axis referenced by invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Errors surfaced by the layout engine.
///
/// None of these are produced by degenerate geometry; they all indicate
/// a caller breaking an API contract.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("frame {axis} is {dim:?} but fixed_{axis} is {fixed:?}")]
    InvalidFrame {
        axis: Axis,
        dim: Option<u16>,
        fixed: Option<bool>,
    },
    #[error("panel is already fully rendered")]
    AlreadyFullyRendered,
    #[error("panel content is not a layout")]
    NotALayout,
    #[error("panel `{0}` not found in layout")]
    PanelNotFound(String),
    #[error("grid position ({row}, {col}) is out of range")]
    GridOutOfRange { row: usize, col: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
