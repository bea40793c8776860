//! Frame layout for the dashboard.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::fmt::bytes_to_mib;

use super::state::{AppState, Dashboard};
use super::widgets::{
    render_bar_chart, render_help, render_info, render_line_chart, render_sparkline, render_status,
};

/// Renders one frame. `dashboard` is a pre-collected copy of the store's
/// projections; nothing here touches the history lock.
pub fn render(frame: &mut Frame, state: &AppState, dashboard: &Dashboard) {
    let rows = Layout::vertical([
        Constraint::Length(4), // identity table + help
        Constraint::Min(8),    // gc line charts
        Constraint::Min(8),    // memory bar charts
        Constraint::Length(5), // goroutine sparkline
        Constraint::Length(3), // status line
    ])
    .split(frame.area());

    let half = [Constraint::Percentage(50), Constraint::Percentage(50)];

    let top = Layout::horizontal(half).split(rows[0]);
    render_info(frame, top[0], &dashboard.runtime);
    render_help(frame, top[1]);

    let gc = Layout::horizontal(half).split(rows[1]);
    render_line_chart(frame, gc[0], "gc_per_second", &dashboard.gc_per_second);
    render_line_chart(
        frame,
        gc[1],
        "gc_pause_per_second",
        &dashboard.gc_pause_per_second,
    );

    // Bars show whole mebibytes; exact byte counts stay in the store.
    let memory = Layout::horizontal(half).split(rows[2]);
    render_bar_chart(
        frame,
        memory[0],
        "memory_alloc (MiB)",
        &bytes_to_mib(&dashboard.memory_alloc),
    );
    render_bar_chart(
        frame,
        memory[1],
        "memory_total_alloc (MiB)",
        &bytes_to_mib(&dashboard.memory_total_alloc),
    );

    render_sparkline(frame, rows[3], "goroutine_num", &dashboard.goroutine_num);
    render_status(frame, rows[4], state);
}
