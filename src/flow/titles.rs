//! Hand out leftover frame width to panels whose titles do not fit.

use std::collections::{BTreeMap, VecDeque};

use serde_json::Value;

use crate::flow::{FlowEngine, LayoutFlowContext};
use crate::layout::PanelKey;
use crate::metrics::FlowMetrics;

/// A panel narrower than its title.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CrampedPanel {
    key: PanelKey,
    width: u16,
}

impl FlowEngine {
    pub(crate) fn widen_inner_panels_for_titles(&self, context: &mut LayoutFlowContext<'_>) {
        let Some(extra_width) = context.extra_width() else {
            return;
        };
        let cramped = identify_cramped_panels(context);
        if cramped.is_empty() {
            return;
        }

        let additions = distribute_width_to_cramped_panels(cramped, extra_width);
        let granted: usize = additions.iter().map(|(_, add)| usize::from(*add)).sum();
        self.record(|metrics: &mut FlowMetrics| metrics.record_title_columns(granted));
        self.log(
            "titles.widened",
            additions
                .iter()
                .map(|(key, add)| (key.clone(), Value::from(*add))),
        );

        apply_width_additions(context, &additions);
    }
}

/// Cramped panels grouped by title width, each group in layout order.
fn identify_cramped_panels(
    context: &LayoutFlowContext<'_>,
) -> BTreeMap<u16, VecDeque<CrampedPanel>> {
    let mut groups: BTreeMap<u16, VecDeque<CrampedPanel>> = BTreeMap::new();
    for (key, panel) in context.dim_aware_layout().iter() {
        let frame = panel.frame();
        let title_width = panel.title_width();
        let width = panel.cropped_dims().width;
        if title_width > 0
            && panel.title_height() > 0
            && frame.width().is_some()
            && !frame.is_width_fixed()
            && width < title_width
        {
            groups.entry(title_width).or_default().push_back(CrampedPanel {
                key: key.to_string(),
                width,
            });
        }
    }
    groups
}

/// Give out one column at a time to the group with the narrowest titles,
/// cycling through the panels of that group until they all fit.
fn distribute_width_to_cramped_panels(
    mut groups: BTreeMap<u16, VecDeque<CrampedPanel>>,
    mut extra_width: u16,
) -> Vec<(PanelKey, u16)> {
    let mut additions: Vec<(PanelKey, u16)> = Vec::new();

    while extra_width > 0 {
        let Some(mut entry) = groups.first_entry() else {
            break;
        };
        let title_width = *entry.key();
        let Some(panel) = entry.get_mut().pop_front() else {
            entry.remove();
            continue;
        };

        match additions.iter_mut().find(|(key, _)| *key == panel.key) {
            Some((_, add)) => *add += 1,
            None => additions.push((panel.key.clone(), 1)),
        }
        extra_width -= 1;

        if panel.width + 1 < title_width {
            entry.get_mut().push_back(CrampedPanel {
                width: panel.width + 1,
                ..panel
            });
        } else if entry.get().is_empty() {
            entry.remove();
        }
    }

    additions
}

fn apply_width_additions(context: &mut LayoutFlowContext<'_>, additions: &[(PanelKey, u16)]) {
    let engine = context.engine();
    for (key, add) in additions {
        let (Some(measured), Some(draft)) = (
            context.dim_aware_layout().get(key),
            context.draft_layout().get(key),
        ) else {
            continue;
        };
        let width = measured.cropped_dims().width.saturating_add(*add);
        let frame = measured.frame().with_width_fixed(Some(width), true);
        let widened = draft.measure_with_frame(frame, engine);
        context.replace_panel(key, widened);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cramped(entries: &[(u16, &str, u16)]) -> BTreeMap<u16, VecDeque<CrampedPanel>> {
        let mut groups: BTreeMap<u16, VecDeque<CrampedPanel>> = BTreeMap::new();
        for (title_width, key, width) in entries {
            groups.entry(*title_width).or_default().push_back(CrampedPanel {
                key: key.to_string(),
                width: *width,
            });
        }
        groups
    }

    #[test]
    fn narrowest_titles_are_served_first() {
        let groups = cramped(&[(3, "a", 2), (4, "b", 2), (5, "c", 2)]);
        let additions = distribute_width_to_cramped_panels(groups, 2);
        assert_eq!(additions, [("a".to_string(), 1), ("b".to_string(), 1)]);
    }

    #[test]
    fn panels_in_one_group_take_turns() {
        let groups = cramped(&[(6, "a", 2), (6, "b", 3)]);
        let additions = distribute_width_to_cramped_panels(groups, 5);
        // a needs 4, b needs 3: a, b, a, b, a
        assert_eq!(additions, [("a".to_string(), 3), ("b".to_string(), 2)]);
    }

    #[test]
    fn stops_when_everyone_fits() {
        let groups = cramped(&[(3, "a", 2)]);
        let additions = distribute_width_to_cramped_panels(groups, 10);
        assert_eq!(additions, [("a".to_string(), 1)]);
    }
}
