//! Scrollable tab strip with an animated underline

use crate::state::{ScrollDir, TabBox, TabItem, TabsState};
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::Span,
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Rows used by the strip: labels and underline
pub const TABS_HEIGHT: u16 = 2;

const ARROW_WIDTH: u16 = 2;
const BADGE_WIDTH: u16 = 4;
const TAB_GAP: u16 = 1;

/// Clickable parts of the strip from the last draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabStripHits {
    pub tabs: Vec<(usize, Rect)>,
    pub arrows: Vec<(ScrollDir, Rect)>,
}

/// Bounds of every tab button relative to the start of the strip
pub fn measure(tabs: &[TabItem]) -> Vec<TabBox> {
    let mut left = 0;
    tabs.iter()
        .map(|t| {
            let width = t.label.chars().count() as u16 + 2;
            let b = TabBox { left, width };
            left += width + TAB_GAP;
            b
        })
        .collect()
}

/// Width left for tabs once arrows and the badge are reserved
pub fn strip_viewport(area_width: u16, boxes: &[TabBox]) -> (u16, u16) {
    let content = boxes.last().map(|b| b.right()).unwrap_or(0);
    if content <= area_width {
        (0, area_width)
    } else {
        let reserved = ARROW_WIDTH * 2 + BADGE_WIDTH;
        (ARROW_WIDTH, area_width.saturating_sub(reserved))
    }
}

/// Draw the strip, updating overflow and cursor from fresh measurements
pub fn render_tabs(
    frame: &mut Frame,
    area: Rect,
    state: &mut TabsState,
    highlight: Option<usize>,
    focused: bool,
    now: Instant,
    palette: &Palette,
) -> (Vec<TabBox>, u16, TabStripHits) {
    let boxes = measure(&state.tabs);
    let (offset, viewport) = strip_viewport(area.width, &boxes);
    state.overflow.check(viewport, &boxes);

    let mut hits = TabStripHits::default();
    let strip_x = area.x + offset;
    let scroll = state.overflow.scroll;
    let selected = state.current_index();

    for (idx, (tab, b)) in state.tabs.iter().zip(boxes.iter()).enumerate() {
        // Only fully visible tabs are drawn
        if b.left < scroll || b.right() > scroll + viewport {
            continue;
        }
        let rect = Rect::new(strip_x + b.left - scroll, area.y, b.width, 1);
        let mut style = if tab.disabled {
            palette.dim().add_modifier(Modifier::CROSSED_OUT)
        } else if Some(idx) == selected {
            palette.title().fg(palette.accent)
        } else {
            palette.text()
        };
        if focused && Some(idx) == highlight {
            style = style.add_modifier(Modifier::REVERSED);
        }
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {} ", tab.label), style)),
            rect,
        );
        hits.tabs.push((idx, rect));
    }

    if offset > 0 {
        let left = Rect::new(area.x, area.y, ARROW_WIDTH, 1);
        let right = Rect::new(strip_x + viewport, area.y, ARROW_WIDTH, 1);
        let arrow_style = |enabled: bool| {
            if enabled {
                palette.text().fg(palette.accent)
            } else {
                palette.dim()
            }
        };
        frame.render_widget(
            Paragraph::new(Span::styled("‹ ", arrow_style(state.overflow.can_scroll_left))),
            left,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(" ›", arrow_style(state.overflow.can_scroll_right))),
            right,
        );
        if state.overflow.can_scroll_left {
            hits.arrows.push((ScrollDir::Left, left));
        }
        if state.overflow.can_scroll_right {
            hits.arrows.push((ScrollDir::Right, right));
        }

        let hidden = state.overflow.right_hidden_count;
        if state.show_right_counter && hidden > 0 {
            let badge = Rect::new(right.x + ARROW_WIDTH, area.y, BADGE_WIDTH, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" +{hidden}"),
                    palette.dim().add_modifier(Modifier::BOLD),
                )),
                badge,
            );
        }
    }

    if let Some(b) = selected.and_then(|i| boxes.get(i)) {
        state.cursor.set_target(*b, now);
    }
    state.cursor.tick(now);
    if area.height > 1 {
        draw_cursor(frame, area, strip_x, scroll, viewport, state.cursor.bounds(), palette);
    }

    (boxes, viewport, hits)
}

fn draw_cursor(
    frame: &mut Frame,
    area: Rect,
    strip_x: u16,
    scroll: u16,
    viewport: u16,
    bounds: TabBox,
    palette: &Palette,
) {
    let start = bounds.left.max(scroll);
    let end = bounds.right().min(scroll + viewport);
    if end <= start {
        return;
    }
    let rect = Rect::new(strip_x + start - scroll, area.y + 1, end - start, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "━".repeat((end - start) as usize),
            palette.text().fg(palette.accent),
        )),
        rect,
    );
}
