//! Text output for measured panels and layouts.

mod core;

pub use core::{AnsiRenderer, RendererSettings, pad_line, render_table, write_lines};
