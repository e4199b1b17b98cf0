//! Respuesta, motivo and observaciones with the form actions

use crate::state::{
    AppState, FocusArea, FormController, HitTarget, SelectId, RESPUESTA_RECHAZADA,
};
use crate::ui::components::{
    button_width, render_button, render_select_trigger, render_text_area, trigger_width,
    ButtonVariant, BUTTON_HEIGHT,
};
use crate::ui::page_layout::{NARROW_TEXTAREA_HEIGHT, SELECT_HEIGHT, WIDE_TEXTAREA_HEIGHT};
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Span,
    widgets::Paragraph,
    Frame,
};

pub const OBSERVACIONES_PLACEHOLDER: &str = "Agregue observaciones adicionales...";
pub const RESET_LABEL: &str = "Limpiar formulario";
pub const SUBMIT_LABEL: &str = "Finalizar";

/// Draw the form; returns the select triggers for popover placement
pub fn render_response_form(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    controller: &FormController,
    palette: &Palette,
) -> Vec<(SelectId, Rect)> {
    let data = controller.form_data();
    let errors = controller.validation_errors();

    let selects_height = (SELECT_HEIGHT + 1) * 2;
    let (selects_area, text_area, buttons_y) = if state.narrow {
        let [selects, text, _] = Layout::vertical([
            Constraint::Length(selects_height),
            Constraint::Length(NARROW_TEXTAREA_HEIGHT),
            Constraint::Min(0),
        ])
        .areas(area);
        (selects, text, text.bottom())
    } else {
        let [top, _] = Layout::vertical([
            Constraint::Length(selects_height.max(WIDE_TEXTAREA_HEIGHT)),
            Constraint::Min(0),
        ])
        .areas(area);
        let [left, right] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
            .spacing(2)
            .areas(top);
        (left, Rect { height: WIDE_TEXTAREA_HEIGHT.min(right.height), ..right }, top.bottom())
    };

    let [respuesta_row, respuesta_err, motivo_row, motivo_err] = Layout::vertical([
        Constraint::Length(SELECT_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(SELECT_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(selects_area);

    let mut anchors = Vec::new();
    let fields = [
        (
            SelectId::Respuesta,
            "Respuesta",
            true,
            respuesta_row,
            respuesta_err,
            errors.respuesta.as_deref(),
            FocusArea::Respuesta,
        ),
        (
            SelectId::Motivo,
            "Motivo",
            data.respuesta == RESPUESTA_RECHAZADA,
            motivo_row,
            motivo_err,
            errors.motivo.as_deref(),
            FocusArea::Motivo,
        ),
    ];
    for (id, label, required, row, err_row, error, focus) in fields {
        let trigger = Rect {
            width: trigger_width(state.select(id), row.width),
            ..row
        };
        render_select_trigger(
            frame,
            trigger,
            label,
            required,
            state.select(id),
            state.focus == focus,
            error.is_some(),
            palette,
        );
        state.record_hit(trigger, HitTarget::SelectTrigger(id));
        anchors.push((id, trigger));
        if let Some(message) = error {
            frame.render_widget(
                Paragraph::new(Span::styled(message.to_string(), palette.error_text())),
                err_row,
            );
        }
    }

    render_text_area(
        frame,
        text_area,
        "Observaciones",
        &data.observaciones,
        OBSERVACIONES_PLACEHOLDER,
        state.focus == FocusArea::Observaciones,
        palette,
    );
    state.record_hit(text_area, HitTarget::Observaciones);

    if buttons_y + BUTTON_HEIGHT <= area.bottom() {
        let submit_w = button_width(SUBMIT_LABEL);
        let reset_w = button_width(RESET_LABEL);
        let submit = Rect::new(
            area.right().saturating_sub(submit_w),
            buttons_y,
            submit_w,
            BUTTON_HEIGHT,
        );
        let reset = Rect::new(
            submit.x.saturating_sub(reset_w + 1),
            buttons_y,
            reset_w,
            BUTTON_HEIGHT,
        );
        render_button(
            frame,
            reset,
            RESET_LABEL,
            ButtonVariant::Secondary,
            state.focus == FocusArea::ResetButton,
            controller.can_reset(),
            palette,
        );
        render_button(
            frame,
            submit,
            SUBMIT_LABEL,
            ButtonVariant::Primary,
            state.focus == FocusArea::SubmitButton,
            controller.can_submit(),
            palette,
        );
        state.record_hit(reset, HitTarget::ResetButton);
        state.record_hit(submit, HitTarget::SubmitButton);
    }
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormField, FormStore, MemoryStorage, TabNavigation, ThemeMode};
    use crate::ui::page_layout::response_form_height;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn draw(narrow: bool, controller: &FormController) -> (AppState, String) {
        let mut state = AppState::new(TabNavigation::Section, ThemeMode::Dark, Duration::from_secs(5));
        state.narrow = narrow;
        let palette = Palette::for_mode(ThemeMode::Dark);
        let width = if narrow { 60 } else { 100 };
        let mut terminal =
            Terminal::new(TestBackend::new(width, response_form_height(narrow))).unwrap();
        terminal
            .draw(|f| {
                render_response_form(f, f.area(), &mut state, controller, &palette);
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        (state, text)
    }

    fn controller() -> FormController {
        FormController::new(FormStore::new(Box::new(MemoryStorage::default())))
    }

    #[test]
    fn test_all_controls_fit_in_both_layouts() {
        for narrow in [false, true] {
            let (state, text) = draw(narrow, &controller());
            let targets: Vec<_> = state.hit_regions.iter().map(|(_, t)| *t).collect();
            assert!(targets.contains(&HitTarget::SelectTrigger(SelectId::Respuesta)));
            assert!(targets.contains(&HitTarget::SelectTrigger(SelectId::Motivo)));
            assert!(targets.contains(&HitTarget::Observaciones));
            assert!(targets.contains(&HitTarget::ResetButton));
            assert!(targets.contains(&HitTarget::SubmitButton));
            assert!(text.contains(OBSERVACIONES_PLACEHOLDER));
        }
    }

    #[test]
    fn test_errors_render_under_selects() {
        let mut c = controller();
        c.update_field(FormField::Respuesta(RESPUESTA_RECHAZADA.into()));
        c.handle_submit();
        let (_, text) = draw(false, &c);
        assert!(text.contains("Motivo *"));
        assert!(text.contains("El motivo es obligatorio"));
        assert!(!text.contains("La respuesta es obligatoria"));
    }
}
