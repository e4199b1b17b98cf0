//! Select trigger and popover list

use crate::state::{popover_rect, SelectState};
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Trigger box width for a select placed in `available` columns
pub fn trigger_width(state: &SelectState, available: u16) -> u16 {
    state.width.cells().min(available)
}

/// Draw the closed select box. `required` marks the label with an asterisk.
#[allow(clippy::too_many_arguments)]
pub fn render_select_trigger(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    required: bool,
    state: &SelectState,
    focused: bool,
    has_error: bool,
    palette: &Palette,
) {
    let border = if has_error {
        palette.error_text()
    } else {
        palette.border(focused || state.open)
    };
    let title = if required {
        format!(" {label} * ")
    } else {
        format!(" {label} ")
    };
    let value_style = if state.selected_keys().is_empty() {
        palette.dim()
    } else {
        palette.text()
    };
    let arrow = if state.open { "▴" } else { "▾" };

    let inner_width = area.width.saturating_sub(4) as usize;
    let text = truncate(&state.display_text(), inner_width);
    let pad = inner_width.saturating_sub(text.chars().count());

    let line = Line::from(vec![
        Span::styled(text, value_style),
        Span::raw(" ".repeat(pad)),
        Span::styled(arrow, palette.border(focused)),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Draw the open list under `trigger`; returns one rect per visible option
pub fn render_select_popover(
    frame: &mut Frame,
    trigger: Rect,
    viewport: Rect,
    state: &SelectState,
    palette: &Palette,
) -> Vec<(usize, Rect)> {
    let area = popover_rect(trigger, viewport, state.items.len());
    if area.height < 3 {
        return Vec::new();
    }
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true))
        .style(ratatui::style::Style::default().bg(palette.surface));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Keep the highlighted option in view when the list is clipped
    let visible = inner.height as usize;
    let first = state.highlighted.saturating_sub(visible.saturating_sub(1));

    let mut rects = Vec::new();
    for (row, (idx, item)) in state
        .items
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .enumerate()
    {
        let rect = Rect {
            y: inner.y + row as u16,
            height: 1,
            ..inner
        };
        let selected = state.is_selected(item.key);
        let mark = if selected { "✓ " } else { "  " };
        let mut style = if selected {
            palette.text().fg(palette.accent)
        } else {
            palette.text()
        };
        if idx == state.highlighted {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let label = truncate(item.label, inner.width.saturating_sub(2) as usize);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(label, style),
            ])),
            rect,
        );
        rects.push((idx, rect));
    }
    rects
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
