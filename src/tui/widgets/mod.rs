//! Dashboard widgets.

mod charts;
mod info;
mod status;

pub use charts::{render_bar_chart, render_line_chart, render_sparkline};
pub use info::{render_help, render_info};
pub use status::render_status;
