use serde::Serialize;

use crate::error::{Axis, LayoutError, Result};
use crate::geometry::{Dimensions, SizedDims};

/// Width/height budget a panel must fit into.
///
/// `fixed_width` is `Some` exactly when a width is present (same for the
/// height). `Some(true)` makes the dimension a hard requirement, while
/// `Some(false)` marks it as an advisory bound that may be tightened or
/// grown by the layout flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Frame {
    dims: Dimensions,
    fixed_width: Option<bool>,
    fixed_height: Option<bool>,
}

impl Frame {
    /// Frame without constraints in either axis.
    pub const fn unbounded() -> Self {
        Self {
            dims: Dimensions::unbounded(),
            fixed_width: None,
            fixed_height: None,
        }
    }

    /// Create a frame, validating that every fixed flag matches a dimension.
    pub fn try_new(
        dims: Dimensions,
        fixed_width: Option<bool>,
        fixed_height: Option<bool>,
    ) -> Result<Self> {
        check_axis(Axis::Width, dims.width, fixed_width)?;
        check_axis(Axis::Height, dims.height, fixed_height)?;
        Ok(Self {
            dims,
            fixed_width,
            fixed_height,
        })
    }

    /// Create a frame.
    ///
    /// # Panics
    /// Panics if a fixed flag is set for an absent dimension or missing for
    /// a present one.
    pub fn new(dims: Dimensions, fixed_width: Option<bool>, fixed_height: Option<bool>) -> Self {
        match Self::try_new(dims, fixed_width, fixed_height) {
            Ok(frame) => frame,
            Err(err) => panic!("invalid frame: {err}"),
        }
    }

    /// Frame whose present dimensions are hard requirements.
    pub fn fixed(width: Option<u16>, height: Option<u16>) -> Self {
        Self::with_flags(width, height, true)
    }

    /// Frame whose present dimensions are advisory upper bounds.
    pub fn flexible(width: Option<u16>, height: Option<u16>) -> Self {
        Self::with_flags(width, height, false)
    }

    fn with_flags(width: Option<u16>, height: Option<u16>, fixed: bool) -> Self {
        Self {
            dims: Dimensions::new(width, height),
            fixed_width: width.map(|_| fixed),
            fixed_height: height.map(|_| fixed),
        }
    }

    pub const fn dims(&self) -> Dimensions {
        self.dims
    }

    pub const fn width(&self) -> Option<u16> {
        self.dims.width
    }

    pub const fn height(&self) -> Option<u16> {
        self.dims.height
    }

    pub const fn fixed_width(&self) -> Option<bool> {
        self.fixed_width
    }

    pub const fn fixed_height(&self) -> Option<bool> {
        self.fixed_height
    }

    pub fn is_width_fixed(&self) -> bool {
        self.fixed_width == Some(true)
    }

    pub fn is_height_fixed(&self) -> bool {
        self.fixed_height == Some(true)
    }

    /// Replace the width, keeping the current fixed flag. A width added to
    /// a frame that had none starts out flexible.
    pub fn with_width(self, width: Option<u16>) -> Self {
        let fixed = self.fixed_width.unwrap_or(false);
        self.with_width_fixed(width, fixed)
    }

    pub fn with_width_fixed(mut self, width: Option<u16>, fixed: bool) -> Self {
        self.dims.width = width;
        self.fixed_width = width.map(|_| fixed);
        self
    }

    /// Replace the height, keeping the current fixed flag. A height added
    /// to a frame that had none starts out flexible.
    pub fn with_height(self, height: Option<u16>) -> Self {
        let fixed = self.fixed_height.unwrap_or(false);
        self.with_height_fixed(height, fixed)
    }

    pub fn with_height_fixed(mut self, height: Option<u16>, fixed: bool) -> Self {
        self.dims.height = height;
        self.fixed_height = height.map(|_| fixed);
        self
    }

    /// Clamp a width to the frame. A fixed frame width wins outright unless
    /// `ignore_fixed_dims` is set, in which case it only acts as a bound.
    pub fn crop_width(&self, width: u16, ignore_fixed_dims: bool) -> u16 {
        crop_dim(width, self.dims.width, self.fixed_width, ignore_fixed_dims)
    }

    pub fn crop_height(&self, height: u16, ignore_fixed_dims: bool) -> u16 {
        crop_dim(height, self.dims.height, self.fixed_height, ignore_fixed_dims)
    }

    pub fn crop_dims(&self, dims: SizedDims) -> SizedDims {
        SizedDims::new(
            self.crop_width(dims.width, false),
            self.crop_height(dims.height, false),
        )
    }
}

fn check_axis(axis: Axis, dim: Option<u16>, fixed: Option<bool>) -> Result<()> {
    if dim.is_some() == fixed.is_some() {
        Ok(())
    } else {
        Err(LayoutError::InvalidFrame { axis, dim, fixed })
    }
}

fn crop_dim(value: u16, frame_dim: Option<u16>, fixed: Option<bool>, ignore_fixed: bool) -> u16 {
    match frame_dim {
        None => value,
        Some(limit) if fixed == Some(true) && !ignore_fixed => limit,
        Some(limit) => value.min(limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_fixed_flag_without_dimension() {
        let err = Frame::try_new(Dimensions::new(None, Some(3)), Some(true), Some(false))
            .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidFrame {
                axis: Axis::Width,
                ..
            }
        ));

        let err = Frame::try_new(Dimensions::new(Some(3), Some(3)), Some(true), None).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidFrame {
                axis: Axis::Height,
                ..
            }
        ));
    }

    #[test]
    #[should_panic(expected = "invalid frame")]
    fn new_panics_on_invalid_frame() {
        Frame::new(Dimensions::new(Some(4), None), None, None);
    }

    #[test]
    fn crop_respects_fixed_flag() {
        let fixed = Frame::fixed(Some(10), Some(2));
        assert_eq!(fixed.crop_width(4, false), 10);
        assert_eq!(fixed.crop_width(4, true), 4);
        assert_eq!(fixed.crop_width(14, true), 10);

        let flexible = Frame::flexible(Some(10), None);
        assert_eq!(flexible.crop_width(4, false), 4);
        assert_eq!(flexible.crop_width(14, false), 10);
        assert_eq!(flexible.crop_height(99, false), 99);
        assert_eq!(
            flexible.crop_dims(SizedDims::new(12, 7)),
            SizedDims::new(10, 7)
        );
    }

    #[test]
    fn modifiers_keep_flag_invariant() {
        let frame = Frame::unbounded().with_width(Some(5));
        assert_eq!(frame.fixed_width(), Some(false));

        let frame = Frame::fixed(Some(5), None).with_width(Some(7));
        assert_eq!(frame.fixed_width(), Some(true));
        assert_eq!(frame.width(), Some(7));

        let frame = frame.with_width(None);
        assert_eq!(frame.fixed_width(), None);

        let frame = frame.with_height_fixed(Some(3), true);
        assert!(frame.is_height_fixed());
        assert!(Frame::try_new(frame.dims(), frame.fixed_width(), frame.fixed_height()).is_ok());
    }
}
