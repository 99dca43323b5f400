use crate::layout::Layout;
use crate::panel::DimensionsAwarePanel;

/// A layout panel whose sub-panels have been fitted to its frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedLayoutDraftPanel {
    panel: DimensionsAwarePanel,
    layout: Layout<DimensionsAwarePanel>,
}

impl ResizedLayoutDraftPanel {
    pub(crate) fn new(panel: DimensionsAwarePanel, layout: Layout<DimensionsAwarePanel>) -> Self {
        Self { panel, layout }
    }

    /// The fitted sub-panels, in layout order.
    pub fn layout(&self) -> &Layout<DimensionsAwarePanel> {
        &self.layout
    }

    /// The layout panel itself, measured over the fitted sub-panels.
    pub fn panel(&self) -> &DimensionsAwarePanel {
        &self.panel
    }

    pub fn into_panel(self) -> DimensionsAwarePanel {
        self.panel
    }
}
