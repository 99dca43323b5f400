//! Error types shared across the layout engine.

mod types;

pub use types::{Axis, LayoutError, Result};
