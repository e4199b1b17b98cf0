//! Document images: three tiles side by side, or a carousel when narrow

use crate::state::{AppState, HitTarget, ImageItem, TabType, ACCEPTED_EXTENSION};
use crate::ui::page_layout::IMAGE_TILE_HEIGHT;
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const IMAGE_SECTION_TITLE: &str = "Tabla de identificación";

pub fn render_image_grid(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    tab: TabType,
    focused: bool,
    palette: &Palette,
) {
    let items = state.images.items(tab);
    frame.render_widget(
        Paragraph::new(Span::styled(IMAGE_SECTION_TITLE, palette.title())),
        Rect { height: 1, ..area },
    );
    let body = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1),
        ..area
    };

    if state.narrow {
        render_carousel(frame, body, state, &items, focused, palette);
    } else {
        let tiles = Layout::horizontal(vec![Constraint::Fill(1); items.len()])
            .spacing(1)
            .split(Rect {
                height: body.height.min(IMAGE_TILE_HEIGHT),
                ..body
            });
        for (idx, (item, rect)) in items.iter().zip(tiles.iter()).enumerate() {
            draw_tile(frame, *rect, item, focused && state.image_focus == idx, palette);
            state.record_hit(*rect, HitTarget::ImageSlot(idx));
        }
    }
}

fn render_carousel(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    items: &[ImageItem],
    focused: bool,
    palette: &Palette,
) {
    let count = items.len();
    let index = state.carousel.index(count);
    let tile = Rect {
        height: area.height.min(IMAGE_TILE_HEIGHT),
        ..area
    };
    if let Some(item) = items.get(index) {
        draw_tile(frame, tile, item, focused, palette);
        state.record_hit(tile, HitTarget::Carousel);
    }

    if area.height <= IMAGE_TILE_HEIGHT {
        return;
    }
    let controls = Rect {
        y: tile.bottom(),
        height: 1,
        ..area
    };
    let prev = Rect { width: 3, ..controls };
    let next = Rect {
        x: controls.right().saturating_sub(3),
        width: 3,
        ..controls
    };
    let arrow = palette.text().fg(palette.accent);
    frame.render_widget(Paragraph::new(Span::styled(" ‹ ", arrow)), prev);
    frame.render_widget(Paragraph::new(Span::styled(" › ", arrow)), next);
    state.record_hit(prev, HitTarget::CarouselPrev);
    state.record_hit(next, HitTarget::CarouselNext);

    // Dots are two cells apart, centered
    let dots_width = (count as u16 * 2).saturating_sub(1);
    let start = controls.x + controls.width.saturating_sub(dots_width) / 2;
    for i in 0..count {
        let dot = Rect::new(start + i as u16 * 2, controls.y, 1, 1);
        let (symbol, style) = if i == index {
            ("●", arrow)
        } else {
            ("○", palette.dim())
        };
        frame.render_widget(Paragraph::new(Span::styled(symbol, style)), dot);
        state.record_hit(dot, HitTarget::CarouselDot(i));
    }
}

fn draw_tile(frame: &mut Frame, area: Rect, item: &ImageItem, focused: bool, palette: &Palette) {
    let block = Block::default()
        .title(format!(" {} ", item.label))
        .borders(Borders::ALL)
        .border_style(palette.border(focused));

    let mut lines = Vec::new();
    match &item.source {
        Some(source) => {
            let art = if source.is_uploaded() {
                Style::default().fg(palette.success)
            } else {
                palette.dim()
            };
            lines.push(Line::from(Span::styled("▨▨▨▨▨▨▨▨", art)));
            lines.push(Line::from(Span::styled(source.describe(), palette.text())));
        }
        None => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Sin imagen", palette.dim())));
        }
    }
    let hint_style = if focused {
        palette.text().add_modifier(Modifier::BOLD)
    } else {
        palette.dim()
    };
    lines.push(Line::from(Span::styled(
        format!("Enter: subir .{ACCEPTED_EXTENSION}"),
        hint_style,
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{TabNavigation, ThemeMode};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn draw(narrow: bool) -> AppState {
        let mut state = AppState::new(TabNavigation::Section, ThemeMode::Dark, Duration::from_secs(5));
        state.narrow = narrow;
        let palette = Palette::for_mode(ThemeMode::Dark);
        let mut terminal = Terminal::new(TestBackend::new(90, 9)).unwrap();
        terminal
            .draw(|f| {
                render_image_grid(f, f.area(), &mut state, TabType::Propiedad, true, &palette)
            })
            .unwrap();
        state
    }

    #[test]
    fn test_wide_records_one_hit_per_slot() {
        let state = draw(false);
        let slots: Vec<_> = state
            .hit_regions
            .iter()
            .filter_map(|(_, t)| match t {
                HitTarget::ImageSlot(i) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn test_narrow_records_carousel_controls() {
        let state = draw(true);
        let targets: Vec<_> = state.hit_regions.iter().map(|(_, t)| *t).collect();
        assert!(targets.contains(&HitTarget::Carousel));
        assert!(targets.contains(&HitTarget::CarouselPrev));
        assert!(targets.contains(&HitTarget::CarouselNext));
        assert!(targets.contains(&HitTarget::CarouselDot(2)));
        assert!(!targets.iter().any(|t| matches!(t, HitTarget::ImageSlot(_))));
    }
}
