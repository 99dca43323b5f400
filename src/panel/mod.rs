//! Panels and their rendering stages.
//!
//! A panel advances through three stages: [`DraftPanel`] (content known),
//! [`DimensionsAwarePanel`] (natural and cropped size known) and
//! [`FullyRenderedPanel`] (final text available). [`Panel`] holds a panel
//! in any of the stages.

mod core;
pub mod cropping;
mod draft;
mod measured;
mod rendered;

pub use core::{Panel, Stage};
pub use draft::{Content, DraftPanel};
pub use measured::{DimensionsAwarePanel, PanelBody};
pub use rendered::FullyRenderedPanel;
