use std::sync::Arc;

use crate::config::{Constraints, OutputConfig};
use crate::flow::FlowEngine;
use crate::geometry::Frame;
use crate::layout::Layout;
use crate::panel::{DimensionsAwarePanel, Panel};

/// What a panel shows: plain text or a nested layout of panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(Arc<str>),
    Layout(Layout<Panel>),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Layout(_) => None,
        }
    }

    pub fn as_layout(&self) -> Option<&Layout<Panel>> {
        match self {
            Content::Text(_) => None,
            Content::Layout(layout) => Some(layout),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(Arc::from(text))
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(Arc::from(text))
    }
}

impl From<Layout<Panel>> for Content {
    fn from(layout: Layout<Panel>) -> Self {
        Content::Layout(layout)
    }
}

/// A panel whose content is known but whose size is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPanel {
    pub content: Content,
    pub title: String,
    pub frame: Frame,
    pub constraints: Constraints,
    pub config: OutputConfig,
}

impl DraftPanel {
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            title: String::new(),
            frame: Frame::unbounded(),
            constraints: Constraints::default(),
            config: OutputConfig::default(),
        }
    }

    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Self::new(Content::Text(text.into()))
    }

    pub fn layout(layout: Layout<Panel>) -> Self {
        Self::new(Content::Layout(layout))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_config(mut self, config: OutputConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Copy of this panel with different content and title. Frame and
    /// configuration are carried over unless replaced afterwards.
    pub(crate) fn derive(&self, content: impl Into<Content>, title: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: title.into(),
            frame: self.frame,
            constraints: self.constraints,
            config: self.config,
        }
    }

    /// Measure the panel. Layout content is first optimized to fit the
    /// frame by `engine`.
    pub fn render_next_stage(&self, engine: &FlowEngine) -> DimensionsAwarePanel {
        match &self.content {
            Content::Text(text) => DimensionsAwarePanel::measure_text(self.clone(), text),
            Content::Layout(layout) => engine.flow_layout(self, layout).into_panel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_fill_fields() {
        let panel = DraftPanel::text("hello")
            .with_title("greeting")
            .with_frame(Frame::fixed(Some(3), None));
        assert_eq!(panel.content.as_text(), Some("hello"));
        assert_eq!(panel.title, "greeting");
        assert!(panel.frame.is_width_fixed());
        assert_eq!(panel.config, OutputConfig::default());
    }

    #[test]
    fn derive_keeps_frame_and_config() {
        let config = OutputConfig::default().with_min_crop_width(2);
        let panel = DraftPanel::text("abc")
            .with_frame(Frame::flexible(Some(4), Some(2)))
            .with_config(config);
        let derived = panel.derive("", "…");
        assert_eq!(derived.frame, panel.frame);
        assert_eq!(derived.config, config);
        assert_eq!(derived.title, "…");
        assert_eq!(derived.content.as_text(), Some(""));
    }
}
