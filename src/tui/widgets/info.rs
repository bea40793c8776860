//! Identity table and help panel.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::stats::RuntimeInfo;

/// Renders the identity table: static fields mirrored from the latest
/// snapshot.
pub fn render_info(frame: &mut Frame, area: Rect, runtime: &RuntimeInfo) {
    let header = Row::new(["go_version", "go_os", "go_arch", "cpu_num", "gomaxprocs"])
        .style(Style::default().fg(Color::Cyan));
    let values = Row::new([
        Cell::from(runtime.go_version.clone()),
        Cell::from(runtime.go_os.clone()),
        Cell::from(runtime.go_arch.clone()),
        Cell::from(runtime.cpu_num.to_string()),
        Cell::from(runtime.gomaxprocs.to_string()),
    ]);
    let widths = [Constraint::Percentage(20); 5];
    let table = Table::new([header, values], widths)
        .block(Block::default().borders(Borders::ALL).title("runtime"));
    frame.render_widget(table, area);
}

/// Renders the keybinding help panel.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new("q: quit   r: reload")
        .block(Block::default().borders(Borders::ALL).title("help"));
    frame.render_widget(help, area);
}
