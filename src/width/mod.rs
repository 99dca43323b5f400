//! Terminal display width helpers.
//!
//! Widths are ANSI-aware so that content carrying escape sequences measures
//! the same as its plain rendering.

mod utils;

pub use utils::{
    display_width, expand_tabs, line_width, soft_wrap_words, truncate_to_width,
    wrap_to_width,
};
