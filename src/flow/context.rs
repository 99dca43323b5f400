use std::cell::OnceCell;
use std::collections::BTreeSet;

use crate::flow::{FlowEngine, ResizedLayoutDraftPanel};
use crate::geometry::{Frame, SizedDims};
use crate::layout::{Layout, PanelKey};
use crate::panel::{DimensionsAwarePanel, DraftPanel, Panel};

/// Sort key used to pick the next panel to resize. Lower sorts first when
/// shrinking; the order is reversed when growing.
pub(crate) type ResizePriority = (i64, i64, i64, i64);

const UNRANKED: i64 = i64::MAX;

/// How a resize attempt changed the set of resizable panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resizability {
    Unchanged,
    NoLongerResizable,
    ResizableAgain,
}

/// Working state of one layout run.
///
/// Cloning is cheap: both layouts share their panels with the clone.
#[derive(Clone)]
pub struct LayoutFlowContext<'a> {
    engine: &'a FlowEngine,
    input: &'a DraftPanel,
    input_layout: &'a Layout<Panel>,
    draft_layout: Layout<Panel>,
    dim_aware_layout: Layout<DimensionsAwarePanel>,
    resizable: BTreeSet<PanelKey>,
    removed: BTreeSet<PanelKey>,
}

impl<'a> LayoutFlowContext<'a> {
    pub(crate) fn new(
        engine: &'a FlowEngine,
        input: &'a DraftPanel,
        input_layout: &'a Layout<Panel>,
        draft_layout: Layout<Panel>,
    ) -> Self {
        let dim_aware_layout = draft_layout.render_until_dimensions_aware(engine);
        let resizable = draft_layout
            .iter()
            .filter(|(_, panel)| !panel.frame().is_width_fixed() && !panel.is_dimensions_aware())
            .map(|(key, _)| key.to_string())
            .collect();

        Self {
            engine,
            input,
            input_layout,
            draft_layout,
            dim_aware_layout,
            resizable,
            removed: BTreeSet::new(),
        }
    }

    pub fn frame(&self) -> Frame {
        self.input.frame
    }

    pub fn engine(&self) -> &'a FlowEngine {
        self.engine
    }

    /// Panels as passed in, before any width or height was assigned.
    pub fn input_layout(&self) -> &'a Layout<Panel> {
        self.input_layout
    }

    /// Panels after width and height distribution.
    pub fn draft_layout(&self) -> &Layout<Panel> {
        &self.draft_layout
    }

    pub fn dim_aware_layout(&self) -> &Layout<DimensionsAwarePanel> {
        &self.dim_aware_layout
    }

    pub(crate) fn replace_panel(&mut self, key: &str, panel: DimensionsAwarePanel) {
        self.dim_aware_layout.insert(key, panel);
    }

    /// Size of the layout over the cropped content of its panels, titles
    /// excluded.
    pub fn layout_dims(&self) -> SizedDims {
        self.dim_aware_layout
            .calc_dims(self.input.config.panel_design, false)
    }

    /// Frame width minus layout width, if the frame has a width.
    pub fn delta_width(&self) -> Option<i32> {
        self.frame()
            .width()
            .map(|width| i32::from(width) - i32::from(self.layout_dims().width))
    }

    pub fn panel_width_ok(&self) -> bool {
        self.delta_width().is_none_or(|delta| delta == 0)
    }

    pub fn too_wide_panel(&self) -> bool {
        self.delta_width().is_some_and(|delta| delta < 0)
    }

    pub fn extra_width_available(&self) -> bool {
        self.delta_width().is_some_and(|delta| delta > 0)
    }

    /// Unused frame width, if any.
    pub fn extra_width(&self) -> Option<u16> {
        self.delta_width()
            .filter(|delta| *delta > 0)
            .and_then(|delta| u16::try_from(delta).ok())
    }

    /// Narrowest frame width a panel may be shrunk to: zero once the
    /// content is too narrow to show a column per panel, else one.
    pub fn min_frame_width(&self) -> u16 {
        let total = usize::from(self.dim_aware_layout.total_cropped_dims().width);
        if total <= self.dim_aware_layout.len() { 0 } else { 1 }
    }

    pub fn is_resizable(&self, key: &str) -> bool {
        self.resizable.contains(key)
    }

    pub fn is_removed(&self, key: &str) -> bool {
        self.removed.contains(key)
    }

    pub fn changed_since(&self, prev: &LayoutFlowContext<'_>) -> bool {
        self.layout_dims() != prev.layout_dims()
            || self.resizable != prev.resizable
            || self.removed != prev.removed
    }

    /// Keys in the order they should be tried for resizing.
    pub fn resize_priority(&self) -> Vec<PanelKey> {
        let mut ranked: Vec<(ResizePriority, &str)> = self
            .dim_aware_layout
            .iter()
            .enumerate()
            .map(|(index, (key, panel))| (self.priority(index, key, panel), key))
            .collect();
        ranked.sort_by_key(|(priority, _)| *priority);
        if self.extra_width_available() {
            ranked.reverse();
        }
        ranked.into_iter().map(|(_, key)| key.to_string()).collect()
    }

    fn priority(&self, index: usize, key: &str, panel: &DimensionsAwarePanel) -> ResizePriority {
        let resizable = self.is_resizable(key);
        let frame = panel.frame();

        let shortest = if !resizable {
            UNRANKED
        } else if frame.is_height_fixed() {
            i64::from(frame.crop_height(panel.dims().height, true))
        } else {
            i64::from(panel.dims().height)
        };
        let widest_frame = match frame.width() {
            Some(width) if resizable => -i64::from(width),
            _ => UNRANKED,
        };
        let widest = -i64::from(panel.cropped_dims().width);
        let rightmost = -i64::try_from(index).unwrap_or(i64::MAX);

        (shortest, widest_frame, widest, rightmost)
    }

    pub(crate) fn resize_helper(&self, key: &str) -> Option<PanelResizeHelper<'a>> {
        let draft_panel = self.input_layout.get(key)?;
        let dim_aware_panel = self.dim_aware_layout.get(key)?.clone();
        Some(PanelResizeHelper::new(self.engine, draft_panel, dim_aware_panel))
    }

    /// Track panels that no longer react to shrinking, and panels that
    /// react to growing again.
    pub(crate) fn update_resizability(
        &mut self,
        key: &str,
        helper: &PanelResizeHelper<'_>,
    ) -> Resizability {
        if self.resizable.contains(key) {
            if self.too_wide_panel() && helper.frame_tightened() && helper.same_cropped_dims() {
                self.resizable.remove(key);
                return Resizability::NoLongerResizable;
            }
        } else if helper.widened_cropped_dims() {
            self.resizable.insert(key.to_string());
            return Resizability::ResizableAgain;
        }
        Resizability::Unchanged
    }

    /// Replace a panel cropped below its minimum width with an ellipsis
    /// placeholder. Placeholders directly following another are deleted.
    /// The first panel is never removed.
    pub(crate) fn remove_panel_if_overly_cropped(&mut self, key: &str) -> bool {
        let Some(panel) = self.dim_aware_layout.get(key) else {
            return false;
        };
        if !panel.config().use_min_crop_width
            || self.dim_aware_layout.first_key() == Some(key)
            || self.removed.contains(key)
            || !panel.overly_cropped()
        {
            return false;
        }

        let ellipsis = panel
            .draft()
            .derive("", "…")
            .with_frame(Frame::fixed(Some(1), None))
            .render_next_stage(self.engine);
        self.removed.insert(key.to_string());
        self.dim_aware_layout.insert(key, ellipsis);
        self.delete_consecutively_removed_panels();
        true
    }

    fn delete_consecutively_removed_panels(&mut self) {
        let mut prev_removed = false;
        let mut doomed = Vec::new();
        for key in self.dim_aware_layout.keys() {
            let removed = self.removed.contains(key);
            if removed && prev_removed {
                doomed.push(key.to_string());
            }
            prev_removed = removed;
        }
        for key in doomed {
            self.dim_aware_layout.remove(&key);
        }
    }

    pub(crate) fn into_resized_panel(self) -> ResizedLayoutDraftPanel {
        let panel =
            DimensionsAwarePanel::from_layout(self.input.clone(), self.dim_aware_layout.clone());
        ResizedLayoutDraftPanel::new(panel, self.dim_aware_layout)
    }
}

/// One attempt at changing the frame width of a panel.
///
/// The new frame is derived from the panel's frame as originally passed
/// in, so repeated attempts never compound earlier distribution passes.
pub struct PanelResizeHelper<'a> {
    engine: &'a FlowEngine,
    draft_panel: &'a Panel,
    dim_aware_panel: DimensionsAwarePanel,
    frame_width: Option<u16>,
    frame_height: Option<u16>,
    new_panel: OnceCell<DimensionsAwarePanel>,
}

impl<'a> PanelResizeHelper<'a> {
    pub(crate) fn new(
        engine: &'a FlowEngine,
        draft_panel: &'a Panel,
        dim_aware_panel: DimensionsAwarePanel,
    ) -> Self {
        let frame = dim_aware_panel.frame();
        Self {
            engine,
            draft_panel,
            frame_width: frame.width(),
            frame_height: frame.height(),
            dim_aware_panel,
            new_panel: OnceCell::new(),
        }
    }

    /// Move the frame width `delta` columns away from the cropped width,
    /// never below `min_frame_width` and never past a fixed original width.
    pub fn adjust_frame_width(&mut self, delta: i32, min_frame_width: u16) {
        let width = (i32::from(self.dim_aware_panel.cropped_dims().width) + delta)
            .max(i32::from(min_frame_width));
        let mut width = u16::try_from(width).unwrap_or(u16::MAX);

        let orig = self.orig_frame();
        if orig.is_width_fixed() {
            width = orig.crop_width(width, true);
        }
        self.frame_width = Some(width);
        self.new_panel = OnceCell::new();
    }

    pub fn orig_frame(&self) -> Frame {
        self.draft_panel.frame()
    }

    pub fn new_frame(&self) -> Frame {
        self.orig_frame()
            .with_width(self.frame_width)
            .with_height(self.frame_height)
    }

    pub fn frame_changed(&self) -> bool {
        self.new_frame() != self.orig_frame()
    }

    pub fn frame_tightened(&self) -> bool {
        match (self.new_frame().width(), self.orig_frame().width()) {
            (Some(new), Some(orig)) => new < orig,
            _ => false,
        }
    }

    /// The panel re-measured under the new frame, computed once.
    pub fn new_resized_panel(&self) -> &DimensionsAwarePanel {
        self.new_panel.get_or_init(|| {
            self.draft_panel
                .measure_with_frame(self.new_frame(), self.engine)
        })
    }

    pub fn prev_cropped_dims(&self) -> SizedDims {
        self.dim_aware_panel.cropped_dims()
    }

    pub fn new_cropped_dims(&self) -> SizedDims {
        self.new_resized_panel().cropped_dims()
    }

    pub fn same_cropped_dims(&self) -> bool {
        self.new_cropped_dims() == self.prev_cropped_dims()
    }

    pub fn widened_cropped_dims(&self) -> bool {
        self.new_cropped_dims().width > self.prev_cropped_dims().width
    }

    pub(crate) fn into_new_panel(self) -> DimensionsAwarePanel {
        let (engine, draft_panel, frame) = (self.engine, self.draft_panel, self.new_frame());
        self.new_panel
            .into_inner()
            .unwrap_or_else(|| draft_panel.measure_with_frame(frame, engine))
    }
}
