//! Width/height value types and the frames panels are fitted into.

mod dimensions;
mod frame;

pub use dimensions::{Dimensions, DimensionsFit, Proportionally, SizedDims};
pub use frame::Frame;
