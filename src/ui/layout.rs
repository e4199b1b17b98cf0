//! Layout components (navbar, sidebar placement, status bar)

use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{AppState, FocusArea, HitTarget, SummaryPhase, ThemeMode};
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the navbar (with borders: top + content + bottom)
pub const NAVBAR_HEIGHT: u16 = 3;
pub const SIDEBAR_WIDTH: u16 = 26;

const APP_TITLE: &str = "Biométricos";
const USER_NAME: &str = "Javier Estorquem";
const MENU_LABEL: &str = " ☰ ";

/// Screen regions for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub navbar: Rect,
    /// Drawer area; overlaps `page` in the narrow layout
    pub sidebar: Option<Rect>,
    pub page: Rect,
    pub status: Rect,
}

/// Split the screen. When wide, an open sidebar pushes the page right.
/// When narrow it floats over the page.
pub fn create_layout(area: Rect, sidebar_open: bool, narrow: bool) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAVBAR_HEIGHT),
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    let body = chunks[1];

    let (sidebar, page) = match (sidebar_open, narrow) {
        (false, _) => (None, body),
        (true, true) => (
            Some(Rect {
                width: SIDEBAR_WIDTH.min(body.width),
                ..body
            }),
            body,
        ),
        (true, false) => {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(body);
            (Some(split[0]), split[1])
        }
    };

    ScreenLayout {
        navbar: chunks[0],
        sidebar,
        page,
        status: chunks[2],
    }
}

/// Draw the navbar: menu toggle, title, theme toggle and user
pub fn draw_navbar(frame: &mut Frame, area: Rect, state: &mut AppState, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let menu_style = if state.sidebar_open {
        palette.text().fg(palette.accent)
    } else {
        palette.text()
    };
    let menu = Rect {
        width: MENU_LABEL.chars().count() as u16,
        height: 1,
        ..inner
    };
    frame.render_widget(Paragraph::new(Span::styled(MENU_LABEL, menu_style)), menu);
    state.record_hit(menu, HitTarget::MenuToggle);

    let title = Rect {
        x: menu.right() + 1,
        width: inner.width.saturating_sub(menu.width + 1),
        height: 1,
        ..inner
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            APP_TITLE,
            palette.title().fg(palette.accent),
        )),
        title,
    );

    let theme_label = match state.theme {
        ThemeMode::Dark => " ☾ Oscuro ",
        ThemeMode::Light => " ☀ Claro ",
    };
    let user = format!(" {USER_NAME} ");
    let user_width = user.chars().count() as u16;
    let theme_width = theme_label.chars().count() as u16;
    if inner.width > menu.width + APP_TITLE.chars().count() as u16 + user_width + theme_width + 4 {
        let user_area = Rect {
            x: inner.right() - user_width,
            width: user_width,
            height: 1,
            ..inner
        };
        let theme_area = Rect {
            x: user_area.x - theme_width - 1,
            width: theme_width,
            height: 1,
            ..inner
        };
        frame.render_widget(
            Paragraph::new(Span::styled(theme_label, palette.text().add_modifier(Modifier::BOLD))),
            theme_area,
        );
        frame.render_widget(Paragraph::new(Span::styled(user, palette.dim())), user_area);
        state.record_hit(theme_area, HitTarget::ThemeToggle);
    }
}

/// Draw the status bar; `modal` is the summary phase when the modal is open
pub fn draw_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    modal: Option<SummaryPhase>,
    palette: &Palette,
) {
    let bar = Style::default().bg(palette.bar);
    let mut spans = vec![Span::styled(
        format!(" {} ", status_hints(state, modal)),
        Style::default().fg(palette.fg),
    )];

    if let Some(msg) = &state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.clone(), Style::default().fg(palette.success)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);

    // Quit hint on the right
    let quit_hint = " ^C:salir ";
    let quit_area = Rect {
        x: area.right().saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    frame.render_widget(
        Paragraph::new(quit_hint).style(bar.fg(palette.muted)),
        quit_area,
    );
}

/// Keyboard hints for whatever currently takes input
pub fn status_hints(state: &AppState, modal: Option<SummaryPhase>) -> String {
    if state.upload_prompt.is_some() {
        return "Enter:subir  Esc:cancelar".to_string();
    }
    if state.open_select().is_some() {
        return "↑/↓:mover  Enter:elegir  Esc:cerrar".to_string();
    }
    match modal {
        Some(SummaryPhase::Review) => return "←/→:botón  Enter:activar  Esc:cancelar".to_string(),
        Some(SummaryPhase::Success { .. }) => {
            return "←/→:botón  Enter:activar  y:copiar JSON".to_string()
        }
        None => {}
    }

    let local = match state.focus {
        FocusArea::Folios | FocusArea::ExternalLinks => "←/→:link  Enter:abrir",
        FocusArea::TipoExpediente | FocusArea::Respuesta | FocusArea::Motivo => "Enter:abrir",
        FocusArea::Tabs => "←/→:mover  Enter:elegir  [/]:desplazar",
        FocusArea::Images => "←/→:imagen  Enter:subir",
        FocusArea::PhotoQuestions | FocusArea::SearchQuestions => {
            "↑/↓:fila  1/2/3:responder  c:limpiar"
        }
        FocusArea::Observaciones => "Esc:salir del campo",
        FocusArea::ResetButton | FocusArea::SubmitButton => "Enter:activar",
    };
    format!("Tab:sección  {local}  t:tema  m:menú  {SUBMIT_SHORTCUT}:finalizar  q:salir")
}
