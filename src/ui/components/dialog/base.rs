//! Base dialog component

use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear},
    Frame,
};

/// Configuration for rendering a dialog frame
pub struct DialogConfig<'a> {
    /// Dialog title, drawn in the top border
    pub title: &'a str,
    /// Border and title color
    pub accent: Color,
    /// Preferred size; clamped to the screen
    pub width: u16,
    pub height: u16,
}

/// Center a `width` x `height` box inside `area`
pub fn dialog_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Clear the area, draw the bordered box and return its inner area
pub fn render_dialog_frame(
    frame: &mut Frame,
    area: Rect,
    config: &DialogConfig,
    palette: &Palette,
) -> (Rect, Rect) {
    let dialog_area = dialog_rect(area, config.width, config.height);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", config.title),
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.accent))
        .style(Style::default().bg(palette.surface));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);
    (dialog_area, inner)
}

/// Wrap text to fit within a maximum width
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let current_len = current_line.chars().count();
            if current_len + word.chars().count() + 1 > max_width && !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
