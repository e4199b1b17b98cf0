//! Path prompt standing in for a file picker

use super::base::{render_dialog_frame, DialogConfig};
use crate::state::{HitTarget, UploadPrompt, ACCEPTED_EXTENSION};
use crate::ui::components::button::{button_width, render_button, ButtonVariant, BUTTON_HEIGHT};
use crate::ui::components::field::render_text_area;
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const DIALOG_WIDTH: u16 = 60;
const DIALOG_HEIGHT: u16 = 12;

/// Draw the prompt; returns clickable regions, topmost last
pub fn render_upload_dialog(
    frame: &mut Frame,
    area: Rect,
    prompt: &UploadPrompt,
    palette: &Palette,
) -> Vec<(Rect, HitTarget)> {
    let title = format!("Subir imagen: {}", prompt.label);
    let (dialog_area, inner) = render_dialog_frame(
        frame,
        area,
        &DialogConfig {
            title: &title,
            accent: palette.accent,
            width: DIALOG_WIDTH,
            height: DIALOG_HEIGHT,
        },
        palette,
    );
    let mut hits = vec![(area, HitTarget::ModalBackdrop), (dialog_area, HitTarget::ModalBackdrop)];

    let hint = Line::from(vec![
        Span::styled("Ruta del archivo ", palette.dim()),
        Span::styled(format!("(.{ACCEPTED_EXTENSION})"), palette.text()),
    ]);
    frame.render_widget(Paragraph::new(hint), Rect { height: 1, ..inner });

    let input = Rect {
        y: inner.y + 2,
        height: 3,
        ..inner
    };
    render_text_area(frame, input, "Archivo", &prompt.input, "", true, palette);

    let y = inner.bottom().saturating_sub(BUTTON_HEIGHT);
    let accept_w = button_width("Subir");
    let cancel_w = button_width("Cancelar");
    let accept = Rect::new(inner.right().saturating_sub(accept_w), y, accept_w, BUTTON_HEIGHT);
    let cancel = Rect::new(accept.x.saturating_sub(cancel_w + 1), y, cancel_w, BUTTON_HEIGHT);
    render_button(frame, cancel, "Cancelar", ButtonVariant::Secondary, false, true, palette);
    render_button(
        frame,
        accept,
        "Subir",
        ButtonVariant::Primary,
        false,
        !prompt.input.trim().is_empty(),
        palette,
    );
    hits.push((cancel, HitTarget::UploadCancel));
    hits.push((accept, HitTarget::UploadAccept));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{TabType, ThemeMode};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_prompt_shows_label_and_input() {
        let prompt = UploadPrompt {
            tab: TabType::Identificacion,
            slot: "img-2".into(),
            label: "INE reverso",
            input: "/tmp/ine.webp".into(),
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let palette = Palette::for_mode(ThemeMode::Dark);
        let mut hits = Vec::new();
        terminal
            .draw(|f| hits = render_upload_dialog(f, f.area(), &prompt, &palette))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("INE reverso"));
        assert!(text.contains("/tmp/ine.webp"));
        assert_eq!(hits.last().map(|(_, t)| *t), Some(HitTarget::UploadAccept));
    }
}
