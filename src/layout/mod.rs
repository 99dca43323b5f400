//! Layout module orchestrator.
//!
//! Downstream code imports layout types from here while the implementation
//! details live in the private `core` module.

mod core;
pub mod grid;

pub use core::{Layout, PanelKey};
pub use grid::{Grid, GridDims};
