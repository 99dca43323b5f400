use crate::config::OutputConfig;
use crate::error::{LayoutError, Result};
use crate::flow::FlowEngine;
use crate::geometry::Frame;
use crate::layout::Layout;
use crate::panel::{DimensionsAwarePanel, DraftPanel, FullyRenderedPanel};

/// Rendering stage of a panel. Stages only ever advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Draft,
    DimensionsAware,
    FullyRendered,
}

/// A panel in any rendering stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Draft(DraftPanel),
    DimensionsAware(DimensionsAwarePanel),
    FullyRendered(FullyRenderedPanel),
}

impl Panel {
    pub fn stage(&self) -> Stage {
        match self {
            Panel::Draft(_) => Stage::Draft,
            Panel::DimensionsAware(_) => Stage::DimensionsAware,
            Panel::FullyRendered(_) => Stage::FullyRendered,
        }
    }

    /// The draft the panel was produced from.
    pub fn draft(&self) -> &DraftPanel {
        match self {
            Panel::Draft(draft) => draft,
            Panel::DimensionsAware(panel) => panel.draft(),
            Panel::FullyRendered(panel) => panel.measured().draft(),
        }
    }

    pub fn frame(&self) -> Frame {
        self.draft().frame
    }

    pub fn title(&self) -> &str {
        &self.draft().title
    }

    pub fn config(&self) -> &OutputConfig {
        &self.draft().config
    }

    /// Measured form of the panel, if it has been measured.
    pub fn dimensions_aware(&self) -> Option<&DimensionsAwarePanel> {
        match self {
            Panel::Draft(_) => None,
            Panel::DimensionsAware(panel) => Some(panel),
            Panel::FullyRendered(panel) => Some(panel.measured()),
        }
    }

    pub fn is_dimensions_aware(&self) -> bool {
        self.dimensions_aware().is_some()
    }

    /// Advance one stage. Fails for fully rendered panels.
    pub fn try_render_next_stage(&self, engine: &FlowEngine) -> Result<Panel> {
        match self {
            Panel::Draft(draft) => Ok(Panel::DimensionsAware(draft.render_next_stage(engine))),
            Panel::DimensionsAware(panel) => Ok(Panel::FullyRendered(panel.render_next_stage())),
            Panel::FullyRendered(_) => Err(LayoutError::AlreadyFullyRendered),
        }
    }

    /// Advance one stage with a default [`FlowEngine`].
    ///
    /// The default engine carries no logger and no metrics, so a nested
    /// layout fitted here is neither logged nor counted. Use
    /// [`Panel::try_render_next_stage`] to fit it with a configured engine.
    ///
    /// # Panics
    /// Panics if the panel is already fully rendered.
    pub fn render_next_stage(&self) -> Panel {
        match self.try_render_next_stage(&FlowEngine::default()) {
            Ok(panel) => panel,
            Err(err) => panic!("cannot render next stage: {err}"),
        }
    }

    /// Measure the panel, reusing the measurement when it already exists.
    pub fn to_dimensions_aware(&self, engine: &FlowEngine) -> DimensionsAwarePanel {
        match self.dimensions_aware() {
            Some(panel) => panel.clone(),
            None => self.draft().render_next_stage(engine),
        }
    }

    /// Measured copy of the panel under a new frame.
    pub(crate) fn measure_with_frame(
        &self,
        frame: Frame,
        engine: &FlowEngine,
    ) -> DimensionsAwarePanel {
        match self.dimensions_aware() {
            Some(panel) => panel.with_frame(frame, engine),
            None => self.draft().clone().with_frame(frame).render_next_stage(engine),
        }
    }

    /// Copy of the panel under a new frame, in the same stage.
    pub fn with_frame(&self, frame: Frame, engine: &FlowEngine) -> Panel {
        match self {
            Panel::Draft(draft) => Panel::Draft(draft.clone().with_frame(frame)),
            Panel::DimensionsAware(_) => {
                Panel::DimensionsAware(self.measure_with_frame(frame, engine))
            }
            Panel::FullyRendered(_) => {
                Panel::FullyRendered(self.measure_with_frame(frame, engine).render_next_stage())
            }
        }
    }
}

impl From<DraftPanel> for Panel {
    fn from(panel: DraftPanel) -> Self {
        Panel::Draft(panel)
    }
}

impl From<DimensionsAwarePanel> for Panel {
    fn from(panel: DimensionsAwarePanel) -> Self {
        Panel::DimensionsAware(panel)
    }
}

impl From<FullyRenderedPanel> for Panel {
    fn from(panel: FullyRenderedPanel) -> Self {
        Panel::FullyRendered(panel)
    }
}

impl Layout<Panel> {
    /// Measure every panel that is not measured yet.
    pub fn render_until_dimensions_aware(
        &self,
        engine: &FlowEngine,
    ) -> Layout<DimensionsAwarePanel> {
        self.map(|_, panel| panel.to_dimensions_aware(engine))
    }

    /// Render every panel to its final text.
    pub fn render_fully(&self, engine: &FlowEngine) -> Layout<FullyRenderedPanel> {
        self.map(|_, panel| match panel {
            Panel::FullyRendered(panel) => panel.clone(),
            other => other.to_dimensions_aware(engine).render_next_stage(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowConfig;
    use crate::geometry::SizedDims;
    use crate::logging::{Logger, MemorySink};

    #[test]
    fn stages_advance_in_order() {
        let draft = Panel::from(DraftPanel::text("abc"));
        assert_eq!(draft.stage(), Stage::Draft);
        assert!(!draft.is_dimensions_aware());

        let measured = draft.render_next_stage();
        assert_eq!(measured.stage(), Stage::DimensionsAware);
        assert_eq!(
            measured.dimensions_aware().map(DimensionsAwarePanel::dims),
            Some(SizedDims::new(3, 1))
        );

        let rendered = measured.render_next_stage();
        assert_eq!(rendered.stage(), Stage::FullyRendered);
        assert!(rendered.is_dimensions_aware());

        let err = rendered
            .try_render_next_stage(&FlowEngine::default())
            .unwrap_err();
        assert!(matches!(err, LayoutError::AlreadyFullyRendered));
    }

    #[test]
    #[should_panic(expected = "cannot render next stage")]
    fn render_next_stage_panics_when_done() {
        Panel::from(DraftPanel::text("x"))
            .render_next_stage()
            .render_next_stage()
            .render_next_stage();
    }

    #[test]
    fn nested_layouts_are_fitted_with_the_given_engine() {
        let sink = MemorySink::new();
        let engine = FlowEngine::new(FlowConfig {
            logger: Some(Logger::new(sink.clone())),
            ..FlowConfig::default()
        });
        let inner: Layout<Panel> = [("a", Panel::from(DraftPanel::text("ab")))]
            .into_iter()
            .collect();
        let panel = Panel::from(DraftPanel::layout(inner));

        let measured = panel.try_render_next_stage(&engine).unwrap();
        assert_eq!(measured.stage(), Stage::DimensionsAware);
        assert_eq!(sink.messages(), ["layout.start", "layout.done"]);

        sink.clear();
        assert_eq!(panel.render_next_stage(), measured);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn with_frame_keeps_stage() {
        let engine = FlowEngine::default();
        let frame = Frame::flexible(Some(2), None);
        for panel in [
            Panel::from(DraftPanel::text("abcd")),
            Panel::from(DraftPanel::text("abcd")).render_next_stage(),
            Panel::from(DraftPanel::text("abcd"))
                .render_next_stage()
                .render_next_stage(),
        ] {
            let reframed = panel.with_frame(frame, &engine);
            assert_eq!(reframed.stage(), panel.stage());
            assert_eq!(reframed.frame(), frame);
            assert_eq!(reframed.title(), "");
        }
    }

    #[test]
    fn layout_rendering_helpers() {
        let engine = FlowEngine::default();
        let layout: Layout<Panel> = [
            ("a", Panel::from(DraftPanel::text("ab"))),
            ("b", Panel::from(DraftPanel::text("abc")).render_next_stage()),
        ]
        .into_iter()
        .collect();

        let measured = layout.render_until_dimensions_aware(&engine);
        assert_eq!(measured["a"].dims(), SizedDims::new(2, 1));
        assert_eq!(measured["b"].dims(), SizedDims::new(3, 1));

        let rendered = layout.render_fully(&engine);
        assert_eq!(rendered["b"].lines(), ["abc"]);
    }
}
