//! Confirmation modal shown after a valid submit

use super::base::{render_dialog_frame, wrap_text, DialogConfig};
use crate::mock_data::{motivo_options, option_label, respuesta_options, tipo_expediente_options};
use crate::state::{FormPayload, HitTarget, ImageItem, SummaryPhase};
use crate::ui::components::button::{button_width, render_button, ButtonVariant, BUTTON_HEIGHT};
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const MODAL_WIDTH: u16 = 64;
const NOT_SELECTED: &str = "No seleccionado";

/// What the modal shows
pub struct SummaryView<'a> {
    pub payload: &'a FormPayload,
    /// Slots of the payload's tab
    pub images: &'a [ImageItem],
    pub phase: SummaryPhase,
    /// Keyboard highlight on the button row
    pub highlighted: usize,
}

/// Review body: general details then the documentation list
pub fn review_lines<'a>(
    payload: &FormPayload,
    images: &[ImageItem],
    palette: &Palette,
) -> Vec<Line<'a>> {
    let heading = palette.title();
    let key = palette.dim();
    let value = palette.text();

    let tipo = payload
        .tipo_expediente
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| option_label(&tipo_expediente_options(), t).unwrap_or(NOT_SELECTED))
        .unwrap_or(NOT_SELECTED);
    let respuesta = option_label(&respuesta_options(), &payload.respuesta)
        .map(str::to_string)
        .unwrap_or_else(|| payload.respuesta.clone());

    let mut lines = vec![
        Line::from(Span::styled("Detalles Generales", heading)),
        Line::from(vec![
            Span::styled("Tipo de Expediente: ", key),
            Span::styled(tipo.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Respuesta: ", key),
            Span::styled(respuesta, value),
        ]),
    ];
    if !payload.motivo.is_empty() {
        let motivo = option_label(&motivo_options(&payload.respuesta), &payload.motivo)
            .map(str::to_string)
            .unwrap_or_else(|| payload.motivo.clone());
        lines.push(Line::from(vec![
            Span::styled("Motivo: ", key),
            Span::styled(motivo, value),
        ]));
    }
    if !payload.observaciones.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Observaciones: ", key),
            Span::styled(payload.observaciones.clone(), value),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Documentación ({})", payload.active_tab.label()),
        heading,
    )));
    for (label, item) in payload.images.iter().zip(images.iter()) {
        let detail = item
            .source
            .as_ref()
            .map(|s| format!("  {}", s.describe()))
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("• {label}"), value),
            Span::styled(detail, key),
        ]));
    }
    lines
}

/// Buttons of the current phase, left to right
pub fn phase_buttons(phase: SummaryPhase) -> Vec<(&'static str, ButtonVariant, HitTarget)> {
    match phase {
        SummaryPhase::Review => vec![
            ("Cancelar", ButtonVariant::Secondary, HitTarget::ModalCancel),
            ("Confirmar envío", ButtonVariant::Primary, HitTarget::ModalConfirm),
        ],
        SummaryPhase::Success { show_details } => vec![
            (
                if show_details {
                    "Ocultar información enviada"
                } else {
                    "Ver información enviada"
                },
                ButtonVariant::Secondary,
                HitTarget::ModalToggleDetails,
            ),
            ("Finalizar", ButtonVariant::Primary, HitTarget::ModalFinish),
        ],
    }
}

fn success_lines<'a>(payload: &FormPayload, show_details: bool, palette: &Palette) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "¡Solicitud enviada con éxito!",
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "La información ha sido registrada correctamente.",
            palette.text(),
        )),
    ];
    if show_details {
        lines.push(Line::from(""));
        match serde_json::to_string_pretty(payload) {
            Ok(json) => lines.extend(
                json.lines()
                    .map(|l| Line::from(Span::styled(l.to_string(), palette.dim()))),
            ),
            Err(err) => lines.push(Line::from(Span::styled(err.to_string(), palette.error_text()))),
        }
        lines.push(Line::from(Span::styled("y: copiar JSON", palette.dim())));
    }
    lines
}

/// Draw the modal over `area`; returns the clickable regions, topmost last
pub fn render_summary_modal(
    frame: &mut Frame,
    area: Rect,
    view: &SummaryView,
    palette: &Palette,
) -> Vec<(Rect, HitTarget)> {
    let (title, accent, body) = match view.phase {
        SummaryPhase::Review => (
            "Resumen de la solicitud",
            palette.accent,
            review_lines(view.payload, view.images, palette),
        ),
        SummaryPhase::Success { show_details } => (
            "Solicitud enviada",
            palette.success,
            success_lines(view.payload, show_details, palette),
        ),
    };

    let width = MODAL_WIDTH.min(area.width);
    let inner_width = usize::from(width.saturating_sub(4).max(1));
    let body_rows: usize = body
        .iter()
        .map(|l| wrap_text(&l.to_string(), inner_width).len())
        .sum();
    let height = body_rows as u16 + BUTTON_HEIGHT + 3;

    let mut hits = vec![(area, HitTarget::ModalBackdrop)];
    let (dialog_area, inner) = render_dialog_frame(
        frame,
        area,
        &DialogConfig {
            title,
            accent,
            width,
            height,
        },
        palette,
    );
    // Swallow clicks on the dialog body
    hits.push((dialog_area, HitTarget::ModalBackdrop));

    let text_area = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        height: inner.height.saturating_sub(BUTTON_HEIGHT + 1),
        ..inner
    };
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), text_area);

    // Buttons right-aligned on the last rows
    let buttons = phase_buttons(view.phase);
    let y = inner.bottom().saturating_sub(BUTTON_HEIGHT);
    let mut x = inner.right().saturating_sub(1);
    let mut placed = Vec::new();
    for (idx, (label, variant, target)) in buttons.iter().enumerate().rev() {
        let w = button_width(label);
        x = x.saturating_sub(w);
        let rect = Rect::new(x.max(inner.x), y, w.min(inner.width), BUTTON_HEIGHT);
        render_button(frame, rect, label, *variant, view.highlighted == idx, true, palette);
        placed.push((rect, *target));
        x = x.saturating_sub(1);
    }
    placed.reverse();
    hits.extend(placed);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormData, ImageSlots, QuestionAnswer, TabType, ThemeMode};
    use ratatui::{backend::TestBackend, Terminal};

    fn payload(motivo: &str, observaciones: &str) -> FormPayload {
        let mut data = FormData {
            respuesta: "rechazada".into(),
            motivo: motivo.into(),
            observaciones: observaciones.into(),
            ..FormData::default()
        };
        data.question_answers
            .insert("color".into(), Some(QuestionAnswer::No));
        FormPayload::from_form(&data)
    }

    fn text(lines: &[Line]) -> String {
        lines.iter().map(|l| l.to_string()).collect::<Vec<_>>().join("\n")
    }

    mod review {
        use super::*;

        #[test]
        fn test_unselected_tipo_and_optional_fields() {
            let palette = Palette::for_mode(ThemeMode::Dark);
            let images = ImageSlots::with_mocks().items(TabType::Identificacion);
            let body = text(&review_lines(&payload("", ""), &images, &palette));
            assert!(body.contains("Tipo de Expediente: No seleccionado"));
            assert!(body.contains("Respuesta: Rechazada"));
            assert!(!body.contains("Motivo:"));
            assert!(!body.contains("Observaciones:"));
            assert!(body.contains("Documentación (Identificación)"));
            assert!(body.contains("• INE reverso"));
        }

        #[test]
        fn test_motivo_and_observaciones_when_present() {
            let palette = Palette::for_mode(ThemeMode::Dark);
            let body = text(&review_lines(&payload("foto-borrosa", "revisar"), &[], &palette));
            assert!(body.contains("Motivo: Fotografía borrosa o manipulada"));
            assert!(body.contains("Observaciones: revisar"));
        }
    }

    mod render {
        use super::*;

        #[test]
        fn test_review_buttons_are_topmost_hits() {
            let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
            let palette = Palette::for_mode(ThemeMode::Dark);
            let p = payload("", "");
            let images = ImageSlots::with_mocks().items(p.active_tab);
            let view = SummaryView {
                payload: &p,
                images: &images,
                phase: SummaryPhase::Review,
                highlighted: 1,
            };
            let mut hits = Vec::new();
            terminal
                .draw(|f| hits = render_summary_modal(f, f.area(), &view, &palette))
                .unwrap();

            let targets: Vec<_> = hits.iter().map(|(_, t)| *t).collect();
            assert_eq!(targets[0], HitTarget::ModalBackdrop);
            assert_eq!(
                &targets[targets.len() - 2..],
                &[HitTarget::ModalCancel, HitTarget::ModalConfirm]
            );
            let (cancel, confirm) = (hits[hits.len() - 2].0, hits[hits.len() - 1].0);
            assert!(cancel.x < confirm.x);
        }

        #[test]
        fn test_success_toggle_label() {
            let labels = |show| {
                phase_buttons(SummaryPhase::Success { show_details: show })
                    .into_iter()
                    .map(|(l, _, _)| l)
                    .collect::<Vec<_>>()
            };
            assert_eq!(labels(false), vec!["Ver información enviada", "Finalizar"]);
            assert_eq!(labels(true), vec!["Ocultar información enviada", "Finalizar"]);
        }
    }
}
