//! Single-sweep passes run before and after the resize loop.

use crate::flow::{FlowEngine, LayoutFlowContext};
use crate::layout::Layout;
use crate::panel::{DraftPanel, Panel};

/// Give every panel without a width an equal share of what the panels
/// with a known width leave over.
pub(crate) fn distribute_widths(
    input: &DraftPanel,
    layout: &Layout<Panel>,
    frame_width: u16,
    engine: &FlowEngine,
) -> Layout<Panel> {
    let per_panel_width = per_panel_width(input, layout, frame_width);
    layout.map(|_, panel| match per_panel_width {
        Some(width) if needs_width(panel) => {
            panel.with_frame(panel.frame().with_width_fixed(Some(width), false), engine)
        }
        _ => panel.clone(),
    })
}

fn needs_width(panel: &Panel) -> bool {
    panel.frame().width().is_none() && !panel.is_dimensions_aware()
}

/// Width for each panel without a preset width, or `None` when every panel
/// already has one.
fn per_panel_width(input: &DraftPanel, layout: &Layout<Panel>, frame_width: u16) -> Option<u16> {
    let design_dims = input.config.design_dims();
    let per_panel_chars = i64::from(design_dims.horizontal_chars_per_panel);

    let mut preset = i64::from(design_dims.horizontal_end_chars);
    let mut unset = 0i64;
    for panel in layout.values() {
        let known = match (panel.frame().width(), panel.dimensions_aware()) {
            (Some(width), _) => Some(width),
            (None, Some(measured)) => Some(measured.dims().width),
            (None, None) => None,
        };
        match known {
            Some(width) => preset += i64::from(width) + per_panel_chars,
            None => unset += 1,
        }
    }

    if unset == 0 {
        return None;
    }
    let available = i64::from(frame_width) - preset;
    let width = (available.div_euclid(unset) - per_panel_chars).max(0);
    Some(u16::try_from(width).unwrap_or(u16::MAX))
}

/// Give every panel without a fixed height the inner height of the frame.
pub(crate) fn set_inner_panel_heights(
    input: &DraftPanel,
    layout: &Layout<Panel>,
    frame_height: u16,
    engine: &FlowEngine,
) -> Layout<Panel> {
    let border_lines = input.config.design_dims().extra_vertical_lines(1);
    let inner = u32::from(frame_height).saturating_sub(border_lines);
    let inner = u16::try_from(inner).unwrap_or(u16::MAX);

    layout.map(|_, panel| {
        let frame = panel.frame();
        if frame.is_height_fixed() {
            panel.clone()
        } else {
            panel.with_frame(frame.with_height_fixed(Some(inner), false), engine)
        }
    })
}

/// Shrink flexible frame widths to the width of the content.
pub(crate) fn tighten_panel_frame_widths(context: &mut LayoutFlowContext<'_>) {
    let engine = context.engine();
    let tightened: Vec<_> = context
        .dim_aware_layout()
        .iter()
        .filter_map(|(key, panel)| {
            let frame = panel.frame();
            if frame.width().is_none() || frame.is_width_fixed() {
                return None;
            }
            let new_frame = frame.with_width(Some(frame.crop_width(panel.dims().width, false)));
            (new_frame != frame).then(|| (key.to_string(), panel.with_frame(new_frame, engine)))
        })
        .collect();

    for (key, panel) in tightened {
        context.replace_panel(&key, panel);
    }
}

/// Shrink flexible frame heights to the height the panels actually use.
pub(crate) fn reduce_panel_heights(context: &mut LayoutFlowContext<'_>) {
    let engine = context.engine();
    let reduced: Vec<_> = context
        .dim_aware_layout()
        .iter()
        .filter_map(|(key, panel)| {
            let frame = panel.frame();
            if frame.is_height_fixed() {
                return None;
            }
            let new_frame = frame.with_height_fixed(Some(panel.outer_dims().height), false);
            (new_frame != frame).then(|| (key.to_string(), panel.with_frame(new_frame, engine)))
        })
        .collect();

    for (key, panel) in reduced {
        context.replace_panel(&key, panel);
    }
}
