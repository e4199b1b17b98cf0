//! Sí / No / No aplica question block

use crate::state::{AppState, FormData, HitTarget, QuestionAnswer, QuestionGroupId};
use crate::ui::theme::Palette;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const CLEAR_LABEL: &str = "Limpiar campos";

/// Option button width: label plus brackets and padding
fn option_width(answer: QuestionAnswer) -> u16 {
    answer.label().chars().count() as u16 + 4
}

#[allow(clippy::too_many_arguments)]
pub fn render_question_group(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    id: QuestionGroupId,
    data: &FormData,
    error: Option<&str>,
    focused: bool,
    palette: &Palette,
) {
    let group = id.group();
    let cursor = match id {
        QuestionGroupId::Photo => state.photo_cursor,
        QuestionGroupId::Search => state.search_cursor,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    frame.render_widget(
        Paragraph::new(Span::styled(group.title, palette.title())),
        Rect { height: 1, ..inner },
    );

    let mut y = inner.y + 1;
    for (row, question) in group.questions.iter().enumerate() {
        if y + 1 >= inner.bottom() {
            break;
        }
        frame.render_widget(
            Paragraph::new(Span::styled(question.text, palette.text())),
            Rect::new(inner.x, y, inner.width, 1),
        );

        let current = data.answer(question.id);
        let mut x = inner.x + 2;
        for (col, answer) in QuestionAnswer::ALL.into_iter().enumerate() {
            let width = option_width(answer);
            if x + width > inner.right() {
                break;
            }
            let rect = Rect::new(x, y + 1, width, 1);
            let selected = current == Some(answer);
            let mut style = if selected {
                palette.title().fg(palette.accent)
            } else {
                palette.dim()
            };
            if focused && cursor.row == row && cursor.option == col {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let mark = if selected { "●" } else { "○" };
            frame.render_widget(
                Paragraph::new(Span::styled(format!("{mark} {} ", answer.label()), style)),
                rect,
            );
            state.record_hit(
                rect,
                HitTarget::QuestionOption {
                    group: id,
                    row,
                    option: answer,
                },
            );
            x += width + 1;
        }
        y += 2;
    }

    if y >= inner.bottom() {
        return;
    }
    let enabled = group.has_any_selected(data);
    let mut clear_style = if enabled {
        palette.text().add_modifier(Modifier::UNDERLINED)
    } else {
        palette.dim()
    };
    if focused && cursor.on_clear_button(group.questions.len()) {
        clear_style = clear_style.add_modifier(Modifier::REVERSED);
    }
    let clear_width = CLEAR_LABEL.chars().count() as u16 + 2;
    let clear = Rect::new(inner.x, y, clear_width.min(inner.width), 1);
    frame.render_widget(
        Paragraph::new(Span::styled(format!("[{CLEAR_LABEL}]"), clear_style)),
        clear,
    );
    if enabled {
        state.record_hit(clear, HitTarget::QuestionClear(id));
    }

    if let Some(message) = error {
        let x = clear.right() + 2;
        if x < inner.right() {
            frame.render_widget(
                Paragraph::new(Span::styled(message.to_string(), palette.error_text())),
                Rect::new(x, y, inner.right() - x, 1),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{TabNavigation, ThemeMode};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn draw(data: &FormData) -> AppState {
        let mut state = AppState::new(TabNavigation::Section, ThemeMode::Dark, Duration::from_secs(5));
        let palette = Palette::for_mode(ThemeMode::Dark);
        let mut terminal = Terminal::new(TestBackend::new(100, 8)).unwrap();
        terminal
            .draw(|f| {
                render_question_group(
                    f,
                    f.area(),
                    &mut state,
                    QuestionGroupId::Photo,
                    data,
                    None,
                    true,
                    &palette,
                )
            })
            .unwrap();
        state
    }

    #[test]
    fn test_three_options_per_question() {
        let state = draw(&FormData::default());
        let options = state
            .hit_regions
            .iter()
            .filter(|(_, t)| matches!(t, HitTarget::QuestionOption { .. }))
            .count();
        assert_eq!(options, 6);
    }

    #[test]
    fn test_clear_only_clickable_when_answered() {
        let state = draw(&FormData::default());
        assert!(!state
            .hit_regions
            .iter()
            .any(|(_, t)| matches!(t, HitTarget::QuestionClear(_))));

        let mut data = FormData::default();
        data.question_answers
            .insert("match".into(), Some(QuestionAnswer::NoAplica));
        let state = draw(&data);
        assert!(state
            .hit_regions
            .iter()
            .any(|(_, t)| *t == HitTarget::QuestionClear(QuestionGroupId::Photo)));
    }
}
