//! Time-series chart widgets.
//!
//! All widgets take pre-projected copies; newer samples are on the right.
//! Bar charts and sparklines window the series to the visible width.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Sparkline};

/// Renders a rate series as a line chart, sample index on the x-axis.
pub fn render_line_chart(frame: &mut Frame, area: Rect, title: &str, values: &[f64]) {
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let x_max = points.len().saturating_sub(1).max(1) as f64;
    let mut y_max = values.iter().fold(0.0_f64, |acc, v| acc.max(*v));
    if y_max <= 0.0 {
        y_max = 1.0;
    }

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::White))
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::White))
                .bounds([0.0, y_max])
                .labels([Line::from("0"), Line::from(format!("{:.3}", y_max))]),
        );
    frame.render_widget(chart, area);
}

/// Renders a counter series as a bar chart.
///
/// `values` should already be display-scaled (see [`crate::fmt::bytes_to_mib`]).
pub fn render_bar_chart(frame: &mut Frame, area: Rect, title: &str, values: &[u64]) {
    let visible = usize::from(area.width.saturating_sub(2));
    let start = values.len().saturating_sub(visible);
    let bars: Vec<(&str, u64)> = values[start..].iter().map(|v| ("", *v)).collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Green))
        .data(&bars);
    frame.render_widget(chart, area);
}

/// Renders a counter series as a sparkline.
pub fn render_sparkline(frame: &mut Frame, area: Rect, title: &str, values: &[u64]) {
    let visible = usize::from(area.width.saturating_sub(2));
    let start = values.len().saturating_sub(visible);

    let spark = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(Style::default().fg(Color::Yellow))
        .data(&values[start..]);
    frame.render_widget(spark, area);
}
