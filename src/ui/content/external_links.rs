//! Row of external lookup links

use crate::mock_data::EXTERNAL_LINKS;
use crate::state::{AppState, HitTarget};
use crate::ui::theme::Palette;
use ratatui::{layout::Rect, style::Modifier, text::Span, widgets::Paragraph, Frame};

pub const LINKS_TITLE: &str = "Links Externos";

pub fn render_external_links(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    focused: bool,
    palette: &Palette,
) {
    frame.render_widget(
        Paragraph::new(Span::styled(LINKS_TITLE, palette.title())),
        Rect { height: 1, ..area },
    );
    if area.height < 2 {
        return;
    }

    let y = area.y + 1;
    let mut x = area.x;
    for (idx, link) in EXTERNAL_LINKS.iter().enumerate() {
        let width = link.label.chars().count() as u16;
        if x + width > area.right() {
            break;
        }
        let rect = Rect::new(x, y, width, 1);
        let mut style = palette.link();
        if focused && state.link_index == idx {
            style = style.fg(palette.accent).add_modifier(Modifier::REVERSED);
        }
        frame.render_widget(Paragraph::new(Span::styled(link.label, style)), rect);
        state.record_hit(rect, HitTarget::ExternalLink(idx));
        x += width + 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{TabNavigation, ThemeMode};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    #[test]
    fn test_every_link_is_clickable() {
        let mut state = AppState::new(TabNavigation::Section, ThemeMode::Dark, Duration::from_secs(5));
        let palette = Palette::for_mode(ThemeMode::Dark);
        let mut terminal = Terminal::new(TestBackend::new(60, 2)).unwrap();
        terminal
            .draw(|f| render_external_links(f, f.area(), &mut state, false, &palette))
            .unwrap();
        assert_eq!(state.hit_regions.len(), EXTERNAL_LINKS.len());
        assert_eq!(state.hit_test(0, 1), Some(HitTarget::ExternalLink(0)));
    }
}
