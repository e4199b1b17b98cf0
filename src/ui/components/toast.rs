//! Toast stack in the bottom-right corner

use crate::state::{Toast, ToastVariant};
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use uuid::Uuid;

const TOAST_WIDTH: u16 = 44;
const DISMISS: &str = "[x]";

/// Rows a toast needs: borders, title and optional description lines
fn toast_height(toast: &Toast, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2).max(1));
    let desc = toast
        .description
        .as_deref()
        .map(|d| d.chars().count().div_ceil(inner).max(1) as u16)
        .unwrap_or(0);
    2 + 1 + desc
}

/// Draw toasts newest at the bottom; returns the dismiss button of each
pub fn render_toasts(
    frame: &mut Frame,
    area: Rect,
    toasts: &[Toast],
    palette: &Palette,
) -> Vec<(Uuid, Rect)> {
    let width = TOAST_WIDTH.min(area.width);
    let mut bottom = area.bottom();
    let mut hits = Vec::new();

    for toast in toasts {
        let height = toast_height(toast, width);
        if bottom < area.y + height {
            break;
        }
        let rect = Rect::new(area.right() - width, bottom - height, width, height);
        bottom = rect.y;

        let accent = match toast.variant {
            ToastVariant::Default => palette.accent,
            ToastVariant::Destructive => palette.error,
        };

        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(palette.surface));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let mut lines = vec![Line::from(Span::styled(
            toast.title.clone(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))];
        if let Some(desc) = &toast.description {
            lines.push(Line::from(Span::styled(desc.clone(), palette.text())));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let dismiss = Rect::new(
            rect.right().saturating_sub(DISMISS.len() as u16 + 1),
            rect.y,
            DISMISS.len() as u16,
            1,
        );
        frame.render_widget(Paragraph::new(Span::styled(DISMISS, palette.dim())), dismiss);
        hits.push((toast.id, dismiss));
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ThemeMode, ToastQueue};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::{Duration, Instant};

    #[test]
    fn test_stack_draws_each_toast_with_dismiss() {
        let mut queue = ToastQueue::new(Duration::from_secs(5));
        let now = Instant::now();
        queue.info("Formulario enviado", now);
        queue.error("Error al enviar", "No se pudo escribir", now);

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let palette = Palette::for_mode(ThemeMode::Dark);
        let mut hits = Vec::new();
        terminal
            .draw(|f| hits = render_toasts(f, f.area(), queue.toasts(), &palette))
            .unwrap();

        assert_eq!(hits.len(), 2);
        // Newest toast sits at the bottom
        assert_eq!(hits[0].0, queue.toasts()[0].id);
        assert!(hits[0].1.y > hits[1].1.y);

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Error al enviar"));
        assert!(text.contains("Formulario enviado"));
    }
}
