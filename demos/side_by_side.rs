//! Lay out the files given on the command line side by side, fitted to the
//! current terminal.
//!
//! ```text
//! cargo run --example side_by_side -- Cargo.toml src/lib.rs
//! ```

use std::io::{self, Write};

use crossterm::terminal;
use panel_flow::render::write_lines;
use panel_flow::{
    DraftPanel, FileSink, FlowConfig, FlowEngine, Frame, Layout, Logger, OutputConfig, Panel,
    Result,
};

fn main() -> Result<()> {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: side_by_side <file>...");
        return Ok(());
    }

    let (columns, rows) = terminal::size().unwrap_or((100, 30));
    let config = OutputConfig::default().with_min_crop_width(8);

    let mut layout = Layout::new();
    for path in &paths {
        let text = std::fs::read_to_string(path)?;
        let panel = DraftPanel::text(text).with_title(path.as_str()).with_config(config);
        layout.insert(path.as_str(), Panel::from(panel));
    }

    let mut flow_config = FlowConfig::default();
    if let Ok(log_path) = std::env::var("PANEL_FLOW_LOG") {
        match FileSink::new(&log_path, 1 << 20) {
            Ok(sink) => flow_config.logger = Some(Logger::new(sink)),
            Err(err) => eprintln!("logging disabled: {err}"),
        }
    }
    flow_config.enable_metrics();
    let engine = FlowEngine::new(flow_config);

    let input = DraftPanel::layout(layout)
        .with_frame(Frame::fixed(Some(columns), Some(rows.saturating_sub(1))));
    let resized = engine.optimize(&input)?;
    let rendered = resized.panel().render_next_stage();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_lines(&mut out, &rendered)?;

    if let Some(metrics) = engine.config().metrics_handle() {
        if let Ok(guard) = metrics.lock() {
            let snapshot = guard.snapshot();
            writeln!(
                out,
                "{} panels, {} iterations, {} resizes",
                resized.layout().len(),
                snapshot.iterations,
                snapshot.resizes
            )?;
        }
    }
    Ok(())
}
