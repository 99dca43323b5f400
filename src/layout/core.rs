use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::config::PanelDesign;
use crate::error::{LayoutError, Result};
use crate::geometry::SizedDims;
use crate::layout::grid::Grid;
use crate::panel::DimensionsAwarePanel;

/// Key naming a panel within a layout.
pub type PanelKey = String;

/// Insertion-ordered mapping from panel key to panel.
///
/// Panels are stored behind `Arc`, so cloning a layout shares every panel
/// with the original; replacing a panel only affects the layout it is
/// replaced in.
pub struct Layout<P> {
    panels: IndexMap<PanelKey, Arc<P>>,
}

impl<P> Layout<P> {
    pub fn new() -> Self {
        Self {
            panels: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Insert or replace a panel. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<PanelKey>, panel: P) {
        self.panels.insert(key.into(), Arc::new(panel));
    }

    pub fn get(&self, key: &str) -> Option<&P> {
        self.panels.get(key).map(Arc::as_ref)
    }

    pub fn try_get(&self, key: &str) -> Result<&P> {
        self.get(key)
            .ok_or_else(|| LayoutError::PanelNotFound(key.to_string()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.panels.contains_key(key)
    }

    /// Remove a panel, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> bool {
        self.panels.shift_remove(key).is_some()
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.panels.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &P> + ExactSizeIterator {
        self.panels.values().map(Arc::as_ref)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &P)> + ExactSizeIterator {
        self.panels
            .iter()
            .map(|(key, panel)| (key.as_str(), panel.as_ref()))
    }

    pub fn first_key(&self) -> Option<&str> {
        self.panels.keys().next().map(String::as_str)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.panels.get_index_of(key)
    }

    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.panels.get_index(index).map(|(key, _)| key.as_str())
    }

    /// Row/column view of the layout. Layouts are currently a single row.
    pub fn grid(&self) -> Grid<'_, P> {
        Grid::new(self)
    }

    /// New layout with the same keys in the same order.
    pub fn map<Q>(&self, mut f: impl FnMut(&str, &P) -> Q) -> Layout<Q> {
        self.iter().map(|(key, panel)| (key, f(key, panel))).collect()
    }
}

impl Layout<DimensionsAwarePanel> {
    /// Summed widths and maximum height of the panels' cropped dims.
    pub fn total_cropped_dims(&self) -> SizedDims {
        total_dims(self.values().map(DimensionsAwarePanel::cropped_dims))
    }

    /// Summed widths and maximum height of the panels' outer dims
    /// (cropped content plus title).
    pub fn total_outer_dims(&self) -> SizedDims {
        total_dims(self.values().map(DimensionsAwarePanel::outer_dims))
    }

    /// Size of the composed layout including borders and separators.
    pub fn calc_dims(&self, design: PanelDesign, use_outer_dims_for_panels: bool) -> SizedDims {
        if self.is_empty() {
            return SizedDims::new(0, 1);
        }

        let total = if use_outer_dims_for_panels {
            self.total_outer_dims()
        } else {
            self.total_cropped_dims()
        };

        let design_dims = crate::config::PanelDesignDims::for_design(design);
        let width = u32::from(total.width) + design_dims.extra_horizontal_chars(self.len());
        let height = u32::from(total.height) + design_dims.extra_vertical_lines(1);
        SizedDims::new(saturate(width), saturate(height))
    }
}

fn total_dims(all: impl Iterator<Item = SizedDims>) -> SizedDims {
    let (width, height) = all.fold((0u32, 0u16), |(width, height), dims| {
        (width + u32::from(dims.width), height.max(dims.height))
    });
    SizedDims::new(saturate(width), height)
}

fn saturate(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

impl<P> Default for Layout<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for Layout<P> {
    fn clone(&self) -> Self {
        Self {
            panels: self.panels.clone(),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for Layout<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Layouts are equal when they hold equal panels under the same keys in
/// the same order.
impl<P: PartialEq> PartialEq for Layout<P> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .panels
                .iter()
                .zip(other.panels.iter())
                .all(|((ka, a), (kb, b))| ka == kb && (Arc::ptr_eq(a, b) || a == b))
    }
}

impl<P: Eq> Eq for Layout<P> {}

impl<K: Into<PanelKey>, P> FromIterator<(K, P)> for Layout<P> {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut layout = Layout::new();
        layout.extend(iter);
        layout
    }
}

impl<K: Into<PanelKey>, P> Extend<(K, P)> for Layout<P> {
    fn extend<I: IntoIterator<Item = (K, P)>>(&mut self, iter: I) {
        for (key, panel) in iter {
            self.insert(key, panel);
        }
    }
}

impl<P> Index<&str> for Layout<P> {
    type Output = P;

    /// # Panics
    /// Panics if the key is not present.
    fn index(&self, key: &str) -> &P {
        match self.get(key) {
            Some(panel) => panel,
            None => panic!("panel `{key}` not found in layout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Layout<u32> {
        [("a", 1), ("b", 2), ("c", 3)].into_iter().collect()
    }

    #[test]
    fn keeps_insertion_order_on_replace_and_remove() {
        let mut layout = abc();
        layout.insert("b", 20);
        assert_eq!(layout.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(layout["b"], 20);

        assert!(layout.remove("a"));
        assert!(!layout.remove("a"));
        assert_eq!(layout.keys().collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(layout.first_key(), Some("b"));
        assert_eq!(layout.keys().rev().collect::<Vec<_>>(), ["c", "b"]);
    }

    #[test]
    fn clone_is_independent() {
        let original = abc();
        let mut copy = original.clone();
        copy.insert("a", 100);
        copy.remove("c");

        assert_eq!(original["a"], 1);
        assert_eq!(original.len(), 3);
        assert_eq!(copy["a"], 100);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let forward = abc();
        let backward: Layout<u32> = [("c", 3), ("b", 2), ("a", 1)].into_iter().collect();
        assert_ne!(forward, backward);
        assert_eq!(forward, abc());
    }

    #[test]
    fn map_keeps_keys() {
        let doubled = abc().map(|_, value| value * 2);
        assert_eq!(doubled.values().copied().collect::<Vec<_>>(), [2, 4, 6]);
        assert_eq!(doubled.index_of("c"), Some(2));
        assert_eq!(doubled.key_at(1), Some("b"));
    }

    #[test]
    fn try_get_reports_missing_key() {
        let layout = abc();
        assert_eq!(layout.try_get("b").copied().unwrap(), 2);
        assert!(matches!(
            layout.try_get("z"),
            Err(LayoutError::PanelNotFound(key)) if key == "z"
        ));
    }
}
