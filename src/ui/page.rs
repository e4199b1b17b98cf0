//! The verification page

use crate::mock_data::{self, FOLIO_COLUMNS, LINK_COLUMNS};
use crate::state::{
    AppState, Column, FocusArea, FormController, HitTarget, QuestionGroupId, SelectId,
    SelectWidth, TableRow,
};
use crate::ui::components::{
    render_progress, render_select_trigger, render_table, render_tabs, trigger_width,
};
use crate::ui::content::{
    render_external_links, render_image_grid, render_question_group, render_response_form,
};
use crate::ui::page_layout::{self, Section};
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

pub const PAGE_TITLE: &str = "Verificación Biométrica";
pub const PAGE_SUBTITLE: &str =
    "Complete el formulario de verificación con los datos biométricos del solicitante";
const PROGRESS_LABEL: &str = "Estado del Folio";
const PROGRESS_VALUE: f64 = 50.0;
const PROGRESS_WIDTH: u16 = 48;

/// Draw the visible slice of the page; returns select triggers that were drawn
pub fn draw_page(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    controller: &FormController,
    now: Instant,
    palette: &Palette,
) -> Vec<(SelectId, Rect)> {
    let data = controller.form_data();
    let folios = mock_data::folios();
    let sections = page_layout::page_sections(state.narrow, folios.len());

    state.page_viewport = area;
    state.page_height = page_layout::page_height(&sections);
    state.page_scroll = state.page_scroll.min(state.max_scroll());
    state
        .tabs
        .set_value(Some(data.active_tab.key().to_string()));
    state.tipo_select.width = if state.narrow {
        SelectWidth::Md
    } else {
        SelectWidth::Lg
    };

    let mut anchors = Vec::new();
    for placed in &sections {
        let Some(rect) = page_layout::screen_rect(placed, state.page_scroll, area) else {
            continue;
        };
        let rect = Rect {
            x: rect.x + 1,
            width: rect.width.saturating_sub(2),
            ..rect
        };
        let focus = state.focus;
        let focused = |f: FocusArea| focus == f;

        match placed.section {
            Section::Header => {
                let lines = vec![
                    Line::from(Span::styled(PAGE_TITLE, palette.title())),
                    Line::from(Span::styled(PAGE_SUBTITLE, palette.dim())),
                ];
                frame.render_widget(Paragraph::new(lines), rect);
            }
            Section::Progress => {
                let width = PROGRESS_WIDTH.min(rect.width);
                let bar = Rect {
                    x: rect.right() - width,
                    width,
                    ..rect
                };
                render_progress(frame, bar, PROGRESS_LABEL, PROGRESS_VALUE, 100.0, palette);
            }
            Section::Folios => {
                let is_focused = focused(FocusArea::Folios);
                let active_link = LINK_COLUMNS.get(state.folio_link).copied();
                let link_style = palette.link();
                let text_style = palette.text();
                let highlight = palette.link().add_modifier(Modifier::REVERSED);
                let render = |row: &mock_data::FolioRow, column: &Column| {
                    let value = row.cell(column.key).unwrap_or("").to_string();
                    if LINK_COLUMNS.contains(&column.key) {
                        if is_focused && active_link == Some(column.key) {
                            Span::styled(value, highlight)
                        } else {
                            Span::styled(value, link_style)
                        }
                    } else {
                        Span::styled(value, text_style)
                    }
                };
                let cells = render_table(
                    frame,
                    rect,
                    "Folios",
                    FOLIO_COLUMNS,
                    &folios,
                    Some(&render),
                    palette,
                    is_focused,
                );
                for cell in cells {
                    if LINK_COLUMNS.contains(&cell.column) {
                        let width = folios
                            .get(cell.row)
                            .and_then(|r| r.cell(cell.column))
                            .map(|v| v.chars().count() as u16)
                            .unwrap_or(0);
                        let link = Rect {
                            width: width.min(cell.area.width),
                            ..cell.area
                        };
                        state.record_hit(
                            link,
                            HitTarget::FolioLink {
                                row: cell.row,
                                column: cell.column,
                            },
                        );
                    }
                }
            }
            Section::TipoExpediente => {
                let trigger = Rect {
                    width: trigger_width(&state.tipo_select, rect.width),
                    ..rect
                };
                render_select_trigger(
                    frame,
                    trigger,
                    "Tipo de Expediente",
                    false,
                    &state.tipo_select,
                    focused(FocusArea::TipoExpediente),
                    false,
                    palette,
                );
                state.record_hit(trigger, HitTarget::SelectTrigger(SelectId::TipoExpediente));
                anchors.push((SelectId::TipoExpediente, trigger));
            }
            Section::Tabs => {
                let is_focused = focused(FocusArea::Tabs);
                let highlight = Some(state.tab_highlight);
                let (boxes, viewport, hits) =
                    render_tabs(frame, rect, &mut state.tabs, highlight, is_focused, now, palette);
                state.tab_boxes = boxes;
                state.tab_viewport_width = viewport;
                for (idx, r) in hits.tabs {
                    state.record_hit(r, HitTarget::Tab(idx));
                }
                for (dir, r) in hits.arrows {
                    state.record_hit(r, HitTarget::TabScroll(dir));
                }
            }
            Section::Images => {
                let is_focused = focused(FocusArea::Images);
                render_image_grid(frame, rect, state, data.active_tab, is_focused, palette);
            }
            Section::PhotoQuestions | Section::SearchQuestions => {
                let (id, group_focus) = if placed.section == Section::PhotoQuestions {
                    (QuestionGroupId::Photo, FocusArea::PhotoQuestions)
                } else {
                    (QuestionGroupId::Search, FocusArea::SearchQuestions)
                };
                let is_focused = focused(group_focus);
                render_question_group(
                    frame,
                    rect,
                    state,
                    id,
                    data,
                    controller.validation_errors().preguntas.as_deref(),
                    is_focused,
                    palette,
                );
            }
            Section::ExternalLinks => {
                let is_focused = focused(FocusArea::ExternalLinks);
                render_external_links(frame, rect, state, is_focused, palette);
            }
            Section::ResponseForm => {
                anchors.extend(render_response_form(frame, rect, state, controller, palette));
            }
        }
    }
    anchors
}

/// Virtual rows of the section holding the current focus
pub fn focus_span(state: &AppState, folio_rows: usize) -> Option<(u16, u16)> {
    let sections = page_layout::page_sections(state.narrow, folio_rows);
    page_layout::find(&sections, Section::for_focus(state.focus)).map(|s| (s.top, s.bottom()))
}
