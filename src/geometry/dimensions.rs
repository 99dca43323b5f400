use std::cmp::Ordering;

use serde::Serialize;

/// Width and height measured in terminal character cells. A missing axis
/// means "no constraint".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: Option<u16>,
    pub height: Option<u16>,
}

impl Dimensions {
    pub const fn new(width: Option<u16>, height: Option<u16>) -> Self {
        Self { width, height }
    }

    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    pub const fn has_width(&self) -> bool {
        self.width.is_some()
    }

    pub const fn has_height(&self) -> bool {
        self.height.is_some()
    }

    pub const fn has_width_and_height(&self) -> bool {
        self.has_width() && self.has_height()
    }

    /// Both axes, if both are defined.
    pub fn sized(&self) -> Option<SizedDims> {
        Some(SizedDims::new(self.width?, self.height?))
    }
}

/// Dimensions where both axes are known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SizedDims {
    pub width: u16,
    pub height: u16,
}

impl SizedDims {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl From<SizedDims> for Dimensions {
    fn from(dims: SizedDims) -> Self {
        Dimensions::new(Some(dims.width), Some(dims.height))
    }
}

/// Shape of a size relative to the aspect ratio of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Proportionally {
    Thinner,
    Same,
    Wider,
}

/// How a concrete size fits inside (possibly unconstrained) frame dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DimensionsFit {
    pub width: Option<bool>,
    pub height: Option<bool>,
    pub proportionality: Option<Proportionally>,
}

impl DimensionsFit {
    pub fn new(dims: SizedDims, frame_dims: Dimensions) -> Self {
        let width = frame_dims.width.map(|fw| dims.width <= fw);
        let height = frame_dims.height.map(|fh| dims.height <= fh);

        let proportionality = match (frame_dims.width, frame_dims.height) {
            (Some(fw), Some(fh)) if fw > 0 && fh > 0 => {
                // dims.height * (fw / fh) compared with dims.width, kept in integers
                let proportional = u32::from(dims.height) * u32::from(fw);
                let actual = u32::from(dims.width) * u32::from(fh);
                Some(match proportional.cmp(&actual) {
                    Ordering::Less => Proportionally::Wider,
                    Ordering::Equal => Proportionally::Same,
                    Ordering::Greater => Proportionally::Thinner,
                })
            }
            _ => None,
        };

        Self {
            width,
            height,
            proportionality,
        }
    }

    /// `None` unless both axes were constrained.
    pub fn both(&self) -> Option<bool> {
        Some(self.width? && self.height?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_ignores_unconstrained_axes() {
        let fit = DimensionsFit::new(SizedDims::new(10, 4), Dimensions::new(Some(12), None));
        assert_eq!(fit.width, Some(true));
        assert_eq!(fit.height, None);
        assert_eq!(fit.both(), None);
        assert_eq!(fit.proportionality, None);
    }

    #[test]
    fn fit_reports_overflow_and_proportions() {
        let fit = DimensionsFit::new(SizedDims::new(30, 2), Dimensions::new(Some(20), Some(4)));
        assert_eq!(fit.width, Some(false));
        assert_eq!(fit.height, Some(true));
        assert_eq!(fit.both(), Some(false));
        assert_eq!(fit.proportionality, Some(Proportionally::Wider));

        let same = DimensionsFit::new(SizedDims::new(10, 2), Dimensions::new(Some(20), Some(4)));
        assert_eq!(same.proportionality, Some(Proportionally::Same));

        let thinner = DimensionsFit::new(SizedDims::new(4, 4), Dimensions::new(Some(20), Some(4)));
        assert_eq!(thinner.proportionality, Some(Proportionally::Thinner));
    }

    #[test]
    fn zero_sized_frame_has_no_proportionality() {
        let fit = DimensionsFit::new(SizedDims::new(0, 0), Dimensions::new(Some(0), Some(3)));
        assert_eq!(fit.width, Some(true));
        assert_eq!(fit.proportionality, None);
    }

    #[test]
    fn sized_requires_both_axes() {
        assert_eq!(Dimensions::new(Some(3), None).sized(), None);
        assert_eq!(
            Dimensions::new(Some(3), Some(1)).sized(),
            Some(SizedDims::new(3, 1))
        );
    }
}
