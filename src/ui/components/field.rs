//! Text input rendering

use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// Draw a bordered multi-line text field.
/// An empty inactive field shows `placeholder` dimmed.
pub fn render_text_area(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    is_active: bool,
    palette: &Palette,
) {
    let mut lines: Vec<Line> = if value.is_empty() && !is_active {
        vec![Line::from(Span::styled(placeholder.to_string(), palette.dim()))]
    } else {
        value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), palette.text())))
            .collect()
    };

    if is_active {
        let cursor = Span::styled(CURSOR, palette.text().fg(palette.accent));
        match lines.last_mut() {
            Some(last) => last.spans.push(cursor),
            None => lines.push(Line::from(cursor)),
        }
    }

    // Keep the cursor line visible once the text outgrows the box
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = visual_rows(value, area.width.saturating_sub(2)).saturating_sub(inner_height);

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(palette.border(is_active));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll as u16, 0))
            .block(block),
        area,
    );
}

/// Rows `text` occupies when wrapped at `width`, counting the cursor cell
fn visual_rows(text: &str, width: u16) -> usize {
    let width = usize::from(width.max(1));
    text.split('\n')
        .map(|l| (l.chars().count() + 1).div_ceil(width).max(1))
        .sum()
}
