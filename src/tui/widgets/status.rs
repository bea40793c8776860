//! Status line widget.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::state::{AppState, PollState};

/// Renders the status line: sample count, last poll time, and poll health.
pub fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = if state.poll == PollState::Halted {
        Line::from(vec![
            Span::styled(
                "halted ",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "after {} failures: {}",
                state.consecutive_failures,
                state.last_error.as_deref().unwrap_or("unknown error")
            )),
        ])
    } else if let Some(err) = &state.last_error {
        Line::from(vec![
            Span::styled(
                format!(
                    "retry {}/{} ",
                    state.consecutive_failures, state.failure_budget
                ),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(err.clone()),
        ])
    } else {
        let mut parts = vec![format!("samples: {}", state.samples)];
        if let Some(ts) = state.last_poll {
            parts.push(format!("last poll: {}", ts.format("%H:%M:%S")));
        }
        if let Some(message) = &state.message {
            parts.push(message.clone());
        }
        Line::from(parts.join("   "))
    };

    let status =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("status"));
    frame.render_widget(status, area);
}
