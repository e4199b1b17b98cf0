//! Sidebar drawing functions

use crate::mock_data::{MenuSection, MENU_SECTIONS};
use crate::state::{AppState, HitTarget};
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Rows a section takes: title, items and a blank separator
fn section_rows(section: &MenuSection) -> u16 {
    section.items.len() as u16 + 2
}

/// Draw the menu drawer. `overlay` draws it over the page on its own surface.
pub fn draw_sidebar(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    overlay: bool,
    palette: &Palette,
) {
    if overlay {
        frame.render_widget(Clear, area);
    }
    let mut block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(palette.border(false));
    if overlay {
        block = block.style(Style::default().bg(palette.surface));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut y = inner.y;
    for section in MENU_SECTIONS {
        if y + section_rows(section) > inner.bottom() + 1 {
            break;
        }
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", section.title.to_uppercase()),
                palette.dim().add_modifier(Modifier::BOLD),
            )),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 1;

        for item in section.items {
            let rect = Rect::new(inner.x, y, inner.width, 1);
            let style = if item.active {
                palette.title().fg(palette.accent)
            } else {
                palette.text()
            };
            let marker = if item.active { "▍" } else { " " };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("{marker}{} {}", item.icon, item.label),
                    style,
                )),
                rect,
            );
            state.record_hit(rect, HitTarget::SidebarItem(item.id));
            y += 1;
        }
        y += 1;
    }
}
