//! Labelled progress bar

use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Percentage of `value` over `max`, clamped to 0..=100
pub fn percentage(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

/// One row: `label ████░░░░ 50%`
pub fn render_progress(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: f64,
    max: f64,
    palette: &Palette,
) {
    let pct = percentage(value, max);
    let value_label = format!(" {}%", pct.round() as u16);
    let prefix = format!("{label} ");

    let track = area
        .width
        .saturating_sub((prefix.chars().count() + value_label.len()) as u16) as usize;
    let filled = ((track as f64) * pct / 100.0).round() as usize;

    let line = Line::from(vec![
        Span::styled(prefix, palette.dim()),
        Span::styled("█".repeat(filled), Style::default().fg(palette.accent)),
        Span::styled("░".repeat(track - filled), palette.dim()),
        Span::styled(value_label, palette.text()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
