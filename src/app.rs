//! Application state and core logic

use crate::config::TuiConfig;
use crate::mock_data::{self, EXTERNAL_LINKS, FOLIO_COLUMNS, LINK_COLUMNS, MENU_SECTIONS};
use crate::platform::SUBMIT_MODIFIER;
use crate::state::{
    slot_id, AppState, FocusArea, FormController, FormField, FormStore, HitTarget, Navigator,
    QuestionAnswer, QuestionGroup, QuestionGroupId, SelectId, SubmitOutcome, SummaryPhase,
    TableRow, TabType, ToastVariant, UploadPrompt, SLOT_COUNT,
};
use crate::submission::{SubmissionPackage, SubmissionSink};
use crate::ui::{focus_span, phase_buttons};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::path::PathBuf;
use std::time::Instant;

/// Rows moved per mouse wheel notch
const WHEEL_STEP: i32 = 3;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Form store, validation and submit flow
    pub controller: FormController,
    /// Where confirmed verifications go
    sink: Box<dyn SubmissionSink>,
    pub config: TuiConfig,
    /// File the theme preference is written back to
    config_path: Option<PathBuf>,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App instance
    pub fn new(
        config: TuiConfig,
        config_path: Option<PathBuf>,
        store: FormStore,
        sink: Box<dyn SubmissionSink>,
    ) -> Self {
        let mut state = AppState::new(
            config.tab_navigation(),
            config.theme(),
            config.toast_duration(),
        );
        state.images.show_mocks = config.show_mock_images();

        let mut app = Self {
            state,
            controller: FormController::new(store),
            sink,
            config,
            config_path,
            quit: false,
            terminal_size: None,
        };
        app.sync_tab_from_location();
        app.resync_selects_from_form();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Record the terminal size and pick the layout for it
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = Some((height, width));
        let narrow = width < self.config.narrow_breakpoint();
        if narrow && !self.state.narrow {
            // Drawer starts closed when it would cover the page
            self.state.sidebar_open = false;
        }
        self.state.narrow = narrow;
    }

    /// Expire toasts
    pub fn tick(&mut self, now: Instant) {
        self.state.toasts.expire(now);
    }

    /// Whether the next frames should be drawn at animation rate
    pub fn is_animating(&self, now: Instant) -> bool {
        self.state.tabs.cursor.is_animating(now)
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.state.status_message = None;

        if self.state.upload_prompt.is_some() {
            self.handle_upload_key(key);
            return Ok(());
        }
        if self.controller.show_modal() {
            return self.handle_modal_key(key).await;
        }
        if let Some(id) = self.state.open_select() {
            self.handle_select_key(id, key);
            return Ok(());
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(SUBMIT_MODIFIER) {
            self.submit();
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => {
                self.state.focus_next();
                self.scroll_focus_into_view();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.state.focus_prev();
                self.scroll_focus_into_view();
                return Ok(());
            }
            KeyCode::PageDown => {
                self.scroll_page(self.page_step());
                return Ok(());
            }
            KeyCode::PageUp => {
                self.scroll_page(-self.page_step());
                return Ok(());
            }
            _ => {}
        }

        if self.state.focus.is_text_input() {
            self.handle_text_key(key);
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') => {
                self.quit = true;
                return Ok(());
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
                return Ok(());
            }
            KeyCode::Char('m') => {
                self.state.sidebar_open = !self.state.sidebar_open;
                return Ok(());
            }
            KeyCode::Char('x') => {
                self.state.toasts.dismiss(None);
                return Ok(());
            }
            _ => {}
        }

        match self.state.focus {
            FocusArea::Folios => self.handle_folios_key(key),
            FocusArea::TipoExpediente => self.handle_trigger_key(SelectId::TipoExpediente, key),
            FocusArea::Respuesta => self.handle_trigger_key(SelectId::Respuesta, key),
            FocusArea::Motivo => self.handle_trigger_key(SelectId::Motivo, key),
            FocusArea::Tabs => self.handle_tabs_key(key),
            FocusArea::Images => self.handle_images_key(key),
            FocusArea::PhotoQuestions => self.handle_question_key(QuestionGroupId::Photo, key),
            FocusArea::SearchQuestions => self.handle_question_key(QuestionGroupId::Search, key),
            FocusArea::ExternalLinks => self.handle_links_key(key),
            FocusArea::Observaciones => self.handle_text_key(key),
            FocusArea::ResetButton => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.reset();
                }
            }
            FocusArea::SubmitButton => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
                    && self.controller.can_submit()
                {
                    self.submit();
                }
            }
        }
        Ok(())
    }

    fn handle_upload_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.upload_prompt = None,
            KeyCode::Enter => self.accept_upload(),
            KeyCode::Backspace => {
                if let Some(prompt) = self.state.upload_prompt.as_mut() {
                    prompt.input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(prompt) = self.state.upload_prompt.as_mut() {
                    prompt.input.push(c);
                }
            }
            _ => {}
        }
    }

    async fn handle_modal_key(&mut self, key: KeyEvent) -> Result<()> {
        let buttons = phase_buttons(self.state.summary_phase);
        match key.code {
            KeyCode::Esc => self.close_modal(),
            KeyCode::Left | KeyCode::BackTab => {
                self.state.modal_button = self.state.modal_button.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Tab => {
                self.state.modal_button = (self.state.modal_button + 1).min(buttons.len() - 1);
            }
            KeyCode::Char('y') if matches!(self.state.summary_phase, SummaryPhase::Success { .. }) => {
                self.copy_payload();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some((_, _, target)) = buttons.get(self.state.modal_button) {
                    self.activate_modal_target(*target).await?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_select_key(&mut self, id: SelectId, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.select_mut(id).close(),
            KeyCode::Up => self.state.select_mut(id).highlight_prev(),
            KeyCode::Down => self.state.select_mut(id).highlight_next(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let keys = self.state.select_mut(id).select_highlighted();
                self.apply_select_change(id, keys);
            }
            KeyCode::Tab => {
                self.state.focus_next();
                self.scroll_focus_into_view();
            }
            KeyCode::BackTab => {
                self.state.focus_prev();
                self.scroll_focus_into_view();
            }
            _ => {}
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let mut text = self.controller.form_data().observaciones.clone();
        match key.code {
            KeyCode::Esc => {
                self.state.focus_next();
                self.scroll_focus_into_view();
                return;
            }
            KeyCode::Enter => text.push('\n'),
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => text.push(c),
            _ => return,
        }
        self.controller.update_field(FormField::Observaciones(text));
    }

    fn handle_folios_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.state.folio_link = self.state.folio_link.saturating_sub(1),
            KeyCode::Right => {
                self.state.folio_link = (self.state.folio_link + 1).min(LINK_COLUMNS.len() - 1);
            }
            KeyCode::Enter => {
                if let Some(column) = LINK_COLUMNS.get(self.state.folio_link) {
                    self.open_folio_link(0, column);
                }
            }
            _ => {}
        }
    }

    fn handle_trigger_key(&mut self, id: SelectId, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down) {
            self.state.select_mut(id).open_list();
        }
    }

    fn handle_tabs_key(&mut self, key: KeyEvent) {
        let selected = match key.code {
            KeyCode::Left => {
                let nav: &mut dyn Navigator = &mut self.state.navigator;
                self.state.tabs.select_prev(Some(nav))
            }
            KeyCode::Right => {
                let nav: &mut dyn Navigator = &mut self.state.navigator;
                self.state.tabs.select_next(Some(nav))
            }
            KeyCode::Char('[') => {
                self.scroll_tab_strip(crate::state::ScrollDir::Left);
                None
            }
            KeyCode::Char(']') => {
                self.scroll_tab_strip(crate::state::ScrollDir::Right);
                None
            }
            _ => None,
        };
        if let Some(key) = selected {
            self.apply_tab_change(&key);
        }
    }

    fn handle_images_key(&mut self, key: KeyEvent) {
        let narrow = self.state.narrow;
        match key.code {
            KeyCode::Left if narrow => self.state.carousel.prev(SLOT_COUNT),
            KeyCode::Right if narrow => self.state.carousel.next(SLOT_COUNT),
            KeyCode::Left => self.state.image_focus = self.state.image_focus.saturating_sub(1),
            KeyCode::Right => {
                self.state.image_focus = (self.state.image_focus + 1).min(SLOT_COUNT - 1);
            }
            KeyCode::Enter => {
                let slot = if narrow {
                    self.state.carousel.index(SLOT_COUNT)
                } else {
                    self.state.image_focus
                };
                self.open_upload_prompt(slot);
            }
            _ => {}
        }
    }

    fn handle_question_key(&mut self, group: QuestionGroupId, key: KeyEvent) {
        let count = group.group().questions.len();
        let cursor = *self.state.question_cursor_mut(group);
        match key.code {
            KeyCode::Up => self.state.question_cursor_mut(group).move_up(),
            KeyCode::Down => self.state.question_cursor_mut(group).move_down(count),
            KeyCode::Left => self.state.question_cursor_mut(group).move_left(),
            KeyCode::Right => self.state.question_cursor_mut(group).move_right(),
            KeyCode::Char('c') => self.clear_question_group(group),
            KeyCode::Char(c @ '1'..='3') => {
                let option = QuestionAnswer::ALL[(c as usize) - ('1' as usize)];
                self.answer_question(group, cursor.row, option);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if cursor.on_clear_button(count) {
                    self.clear_question_group(group);
                } else {
                    self.answer_question(group, cursor.row, cursor.highlighted_option());
                }
            }
            _ => {}
        }
    }

    fn handle_links_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.state.link_index = self.state.link_index.saturating_sub(1),
            KeyCode::Right => {
                self.state.link_index = (self.state.link_index + 1).min(EXTERNAL_LINKS.len() - 1);
            }
            KeyCode::Enter => self.open_external_link(self.state.link_index),
            _ => {}
        }
    }

    /// Handle mouse input
    pub async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let overlay_open = self.state.upload_prompt.is_some() || self.controller.show_modal();
        match mouse.kind {
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                if overlay_open {
                    return Ok(());
                }
                let down = matches!(mouse.kind, MouseEventKind::ScrollDown);
                match self.state.open_select() {
                    Some(id) if down => self.state.select_mut(id).highlight_next(),
                    Some(id) => self.state.select_mut(id).highlight_prev(),
                    None if down => self.scroll_page(WHEEL_STEP),
                    None => self.scroll_page(-WHEEL_STEP),
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.state.carousel.is_dragging() {
                    self.state.carousel.drag_move(mouse.column);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.state.carousel.is_dragging() {
                    let swiped = self.state.carousel.drag_end(SLOT_COUNT);
                    let on_tile =
                        self.state.hit_test(mouse.column, mouse.row) == Some(HitTarget::Carousel);
                    if !swiped && on_tile {
                        self.open_upload_prompt(self.state.carousel.index(SLOT_COUNT));
                    }
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(target) = self.state.hit_test(mouse.column, mouse.row) else {
                    self.state.close_selects();
                    return Ok(());
                };
                if let HitTarget::ToastDismiss(id) = target {
                    self.state.toasts.dismiss(Some(id));
                    return Ok(());
                }
                if self.state.upload_prompt.is_some() {
                    match target {
                        HitTarget::UploadAccept => self.accept_upload(),
                        HitTarget::UploadCancel => self.state.upload_prompt = None,
                        _ => {}
                    }
                    return Ok(());
                }
                if self.controller.show_modal() {
                    return self.activate_modal_target(target).await;
                }
                if let Some(open) = self.state.open_select() {
                    match target {
                        HitTarget::SelectOption(id, index) if id == open => {
                            let keys = {
                                let select = self.state.select_mut(id);
                                select.highlighted = index;
                                select.select_highlighted()
                            };
                            self.apply_select_change(id, keys);
                        }
                        _ => self.state.close_selects(),
                    }
                    return Ok(());
                }
                self.activate_target(target, mouse.column);
            }
            _ => {}
        }
        Ok(())
    }

    /// Act on a clicked page region
    fn activate_target(&mut self, target: HitTarget, mouse_column: u16) {
        match target {
            HitTarget::MenuToggle => self.state.sidebar_open = !self.state.sidebar_open,
            HitTarget::ThemeToggle => self.toggle_theme(),
            HitTarget::SidebarItem(id) => self.open_menu_item(id),
            HitTarget::SidebarBackdrop => self.state.sidebar_open = false,
            HitTarget::FolioLink { row, column } => {
                self.state.set_focus(FocusArea::Folios);
                if let Some(pos) = LINK_COLUMNS.iter().position(|c| *c == column) {
                    self.state.folio_link = pos;
                }
                self.open_folio_link(row, column);
            }
            HitTarget::SelectTrigger(id) => {
                self.state.set_focus(focus_for_select(id));
                self.state.select_mut(id).toggle_open();
            }
            HitTarget::Tab(index) => {
                self.state.set_focus(FocusArea::Tabs);
                if let Some(key) = self.state.tabs.tabs.get(index).map(|t| t.key.clone()) {
                    self.select_tab(&key);
                }
            }
            HitTarget::TabScroll(dir) => self.scroll_tab_strip(dir),
            HitTarget::ImageSlot(index) => {
                self.state.set_focus(FocusArea::Images);
                self.state.image_focus = index;
                self.open_upload_prompt(index);
            }
            HitTarget::Carousel => {
                self.state.set_focus(FocusArea::Images);
                self.state.carousel.drag_start(mouse_column);
            }
            HitTarget::CarouselPrev => self.state.carousel.prev(SLOT_COUNT),
            HitTarget::CarouselNext => self.state.carousel.next(SLOT_COUNT),
            HitTarget::CarouselDot(index) => self.state.carousel.go_to(index as isize, SLOT_COUNT),
            HitTarget::QuestionOption { group, row, option } => {
                self.state.set_focus(focus_for_group(group));
                let cursor = self.state.question_cursor_mut(group);
                cursor.row = row;
                cursor.option = QuestionAnswer::ALL
                    .iter()
                    .position(|o| *o == option)
                    .unwrap_or(0);
                self.answer_question(group, row, option);
            }
            HitTarget::QuestionClear(group) => {
                self.state.set_focus(focus_for_group(group));
                self.clear_question_group(group);
            }
            HitTarget::ExternalLink(index) => {
                self.state.set_focus(FocusArea::ExternalLinks);
                self.state.link_index = index;
                self.open_external_link(index);
            }
            HitTarget::Observaciones => self.state.set_focus(FocusArea::Observaciones),
            HitTarget::ResetButton => {
                self.state.set_focus(FocusArea::ResetButton);
                self.reset();
            }
            HitTarget::SubmitButton => {
                self.state.set_focus(FocusArea::SubmitButton);
                if self.controller.can_submit() {
                    self.submit();
                }
            }
            // Overlay targets are routed before page targets
            HitTarget::SelectOption(..)
            | HitTarget::ModalCancel
            | HitTarget::ModalConfirm
            | HitTarget::ModalToggleDetails
            | HitTarget::ModalFinish
            | HitTarget::ModalBackdrop
            | HitTarget::UploadAccept
            | HitTarget::UploadCancel
            | HitTarget::ToastDismiss(_) => {}
        }
    }

    async fn activate_modal_target(&mut self, target: HitTarget) -> Result<()> {
        match (target, self.state.summary_phase) {
            (HitTarget::ModalCancel, SummaryPhase::Review) => self.close_modal(),
            (HitTarget::ModalConfirm, SummaryPhase::Review) => {
                self.state.summary_phase = SummaryPhase::Success {
                    show_details: false,
                };
                self.state.modal_button = 1;
            }
            (HitTarget::ModalToggleDetails, SummaryPhase::Success { show_details }) => {
                self.state.summary_phase = SummaryPhase::Success {
                    show_details: !show_details,
                };
            }
            (HitTarget::ModalFinish, SummaryPhase::Success { .. }) => self.final_submit().await?,
            _ => {}
        }
        Ok(())
    }

    /// Apply the outcome of a select interaction to the form
    fn apply_select_change(&mut self, id: SelectId, keys: Option<Vec<String>>) {
        let Some(keys) = keys else {
            return;
        };
        let value = keys.into_iter().next().unwrap_or_default();
        match id {
            SelectId::TipoExpediente => {
                self.controller
                    .update_field(FormField::TipoExpediente(value));
            }
            SelectId::Respuesta => {
                self.controller
                    .update_field(FormField::Respuesta(value.clone()));
                let options = mock_data::motivo_options(&value);
                let motivo = self.controller.form_data().motivo.clone();
                if !motivo.is_empty() && !options.iter().any(|o| o.key == motivo) {
                    self.controller.update_field(FormField::Motivo(String::new()));
                }
                self.state.motivo_select.set_items(options);
            }
            SelectId::Motivo => self.controller.update_field(FormField::Motivo(value)),
        }
    }

    /// Mirror persisted form values into the select widgets
    fn resync_selects_from_form(&mut self) {
        let data = self.controller.form_data();
        let tipo = data.tipo_expediente().to_string();
        let respuesta = data.respuesta.clone();
        let motivo = data.motivo.clone();

        self.state.tipo_select.set_selected_keys(non_empty(&tipo));
        self.state
            .respuesta_select
            .set_selected_keys(non_empty(&respuesta));
        self.state
            .motivo_select
            .set_items(mock_data::motivo_options(&respuesta));
        self.state.motivo_select.set_selected_keys(non_empty(&motivo));
    }

    /// Routed tab modes: the current location picks the initial tab
    fn sync_tab_from_location(&mut self) {
        let location = self.state.navigator.location();
        let key = self
            .state
            .tabs
            .navigation
            .key_from_location(&self.state.tabs.tabs, &location)
            .map(str::to_string);
        if let Some(key) = key {
            self.apply_tab_change(&key);
        } else {
            let active = self.controller.form_data().active_tab;
            self.state.tabs.set_value(Some(active.key().to_string()));
            self.state.tab_highlight = self.state.tabs.current_index().unwrap_or(0);
        }
    }

    /// Point the strip and the location at the form's tab after a reset
    fn follow_form_tab(&mut self) {
        let key = self.controller.form_data().active_tab.key();
        self.select_tab(key);
    }

    fn select_tab(&mut self, key: &str) {
        let nav: &mut dyn Navigator = &mut self.state.navigator;
        if let Some(key) = self.state.tabs.select(key, Some(nav)) {
            tracing::debug!(location = %self.state.navigator.location().href(), "tab selected");
            self.apply_tab_change(&key);
        }
    }

    fn apply_tab_change(&mut self, key: &str) {
        let Some(tab) = TabType::from_key(key) else {
            return;
        };
        if tab != self.controller.form_data().active_tab {
            tracing::debug!(tab = tab.key(), "active tab changed");
            self.controller.update_field(FormField::ActiveTab(tab));
            self.state.carousel.reset();
            self.state.image_focus = 0;
        }
        self.state.tabs.set_value(Some(tab.key().to_string()));
        if let Some(index) = self.state.tabs.current_index() {
            self.state.tab_highlight = index;
            if let Some(tab_box) = self.state.tab_boxes.get(index).copied() {
                self.state.tabs.overflow.scroll_into_view(
                    tab_box,
                    self.state.tab_viewport_width,
                    &self.state.tab_boxes,
                );
            }
        }
    }

    fn scroll_tab_strip(&mut self, dir: crate::state::ScrollDir) {
        self.state.tabs.overflow.scroll_by_step(
            dir,
            self.state.tab_viewport_width,
            &self.state.tab_boxes,
        );
    }

    fn answer_question(&mut self, group: QuestionGroupId, row: usize, option: QuestionAnswer) {
        let Some(question) = group.group().questions.get(row) else {
            return;
        };
        let current = self.controller.form_data().answer(question.id);
        let next = QuestionGroup::toggle(current, option);
        self.controller.set_question_answer(question.id, next);
    }

    fn clear_question_group(&mut self, group: QuestionGroupId) {
        let targets = group.group().clear_all_targets(self.controller.form_data());
        for id in targets {
            self.controller.set_question_answer(id, None);
        }
    }

    fn open_upload_prompt(&mut self, slot: usize) {
        let tab = self.controller.form_data().active_tab;
        let Some(label) = tab.image_labels().get(slot).copied() else {
            return;
        };
        self.state.close_selects();
        self.state.upload_prompt = Some(UploadPrompt {
            tab,
            slot: slot_id(slot),
            label,
            input: String::new(),
        });
    }

    /// Validate the typed path and attach it to the prompt's slot
    pub fn accept_upload(&mut self) {
        let Some(prompt) = self.state.upload_prompt.as_ref() else {
            return;
        };
        let input = prompt.input.trim();
        if input.is_empty() {
            return;
        }
        let path = PathBuf::from(input);
        let (tab, slot) = (prompt.tab, prompt.slot.clone());
        self.state.upload_prompt = None;

        let now = Instant::now();
        match self.state.images.upload(tab, &slot, &path) {
            Ok(file) => {
                let name = file
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.state.toasts.push(
                    "Imagen cargada",
                    Some(format!("{slot}: {name}")),
                    ToastVariant::Default,
                    now,
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, slot = %slot, "upload rejected");
                self.state.toasts.error("Archivo no válido", err.to_string(), now);
            }
        }
    }

    /// Validate; when valid the confirmation modal opens
    pub fn submit(&mut self) {
        self.state.close_selects();
        match self.controller.handle_submit() {
            SubmitOutcome::Invalid => {
                self.state.status_message = Some("Revise los campos marcados".to_string());
                let errors = self.controller.validation_errors();
                let focus = if errors.respuesta.is_some() {
                    FocusArea::Respuesta
                } else if errors.motivo.is_some() {
                    FocusArea::Motivo
                } else if !self.controller.has_at_least_one_answer() {
                    FocusArea::PhotoQuestions
                } else {
                    self.state.focus
                };
                self.state.set_focus(focus);
                self.scroll_focus_into_view();
            }
            SubmitOutcome::ReadyForConfirmation => {
                self.state.summary_phase = SummaryPhase::Review;
                self.state.modal_button = 1;
            }
        }
    }

    fn close_modal(&mut self) {
        self.controller.close_modal();
        self.state.summary_phase = SummaryPhase::Review;
        self.state.modal_button = 0;
    }

    /// Deliver the confirmed payload and start over on success
    pub async fn final_submit(&mut self) -> Result<()> {
        self.controller.confirm_submit();
        self.state.summary_phase = SummaryPhase::Review;
        self.state.modal_button = 0;
        let Some(payload) = self.controller.payload().cloned() else {
            return Ok(());
        };
        let files = self.state.images.files_for(payload.active_tab);
        let package = SubmissionPackage::new(payload, files);

        let now = Instant::now();
        match self.sink.submit(&package).await {
            Ok(receipt) => {
                tracing::info!(id = %receipt.id, "verification accepted");
                self.controller.reset_form();
                self.state.images.clear();
                self.state.carousel.reset();
                self.resync_selects_from_form();
                self.follow_form_tab();
                self.state.toasts.push(
                    "Verificación enviada",
                    Some(format!("Folio {}", receipt.id)),
                    ToastVariant::Default,
                    now,
                );
            }
            Err(err) => {
                tracing::error!(error = %err, "verification submit failed");
                self.state
                    .toasts
                    .error("No se pudo enviar la verificación", err.to_string(), now);
            }
        }
        Ok(())
    }

    /// Clear the form back to its initial values
    pub fn reset(&mut self) {
        if !self.controller.can_reset() {
            return;
        }
        tracing::debug!(uploads = self.state.images.upload_count(), "form reset");
        self.controller.reset_form();
        self.state.images.clear();
        self.state.carousel.reset();
        self.resync_selects_from_form();
        self.follow_form_tab();
        self.state.status_message = Some("Formulario reiniciado".to_string());
    }

    fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggle();
        self.config.set_theme(self.state.theme);
        if let Some(path) = &self.config_path {
            if let Err(err) = self.config.save_to(path) {
                tracing::warn!(error = %err, "failed to save theme preference");
            }
        }
    }

    fn open_menu_item(&mut self, id: &str) {
        let item = MENU_SECTIONS
            .iter()
            .flat_map(|s| s.items.iter())
            .find(|i| i.id == id);
        if let Some(item) = item {
            if !item.active {
                self.state.status_message = Some(format!("{}: no disponible", item.label));
            }
        }
        if self.state.narrow {
            self.state.sidebar_open = false;
        }
    }

    fn open_folio_link(&mut self, row: usize, column: &str) {
        let folios = mock_data::folios();
        let Some(folio) = folios.get(row) else {
            return;
        };
        let label = FOLIO_COLUMNS
            .iter()
            .find(|c| c.key == column)
            .map(|c| c.label)
            .unwrap_or(column);
        tracing::debug!(row = folio.row_key(), column, "folio link");
        self.state.status_message = Some(format!("{label}: {}", folio.nombre_cliente));
    }

    /// Links open outside the terminal; the URL goes to the clipboard
    fn open_external_link(&mut self, index: usize) {
        let Some(link) = EXTERNAL_LINKS.get(index) else {
            return;
        };
        if link.url == "#" {
            self.state.status_message = Some(format!("{}: sin enlace", link.label));
            return;
        }
        match self.copy_to_clipboard(link.url) {
            Ok(()) => self.state.status_message = Some(format!("Copiado: {}", link.url)),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard unavailable");
                self.state.status_message = Some(link.url.to_string());
            }
        }
    }

    fn copy_payload(&mut self) {
        let Some(payload) = self.controller.payload() else {
            return;
        };
        let result = serde_json::to_string_pretty(payload)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.copy_to_clipboard(&json));
        match result {
            Ok(()) => self.state.status_message = Some("JSON copiado".to_string()),
            Err(err) => {
                self.state
                    .toasts
                    .error("No se pudo copiar", err.to_string(), Instant::now());
            }
        }
    }

    /// Copy text to the system clipboard
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }

    fn page_step(&self) -> i32 {
        i32::from(self.state.page_viewport.height.saturating_sub(1).max(1))
    }

    fn scroll_page(&mut self, delta: i32) {
        self.state.close_selects();
        self.state.scroll_by(delta);
    }

    fn scroll_focus_into_view(&mut self) {
        if let Some((top, bottom)) = focus_span(&self.state, mock_data::folios().len()) {
            self.state.scroll_into_view(top, bottom);
        }
    }
}

fn focus_for_select(id: SelectId) -> FocusArea {
    match id {
        SelectId::TipoExpediente => FocusArea::TipoExpediente,
        SelectId::Respuesta => FocusArea::Respuesta,
        SelectId::Motivo => FocusArea::Motivo,
    }
}

fn focus_for_group(group: QuestionGroupId) -> FocusArea {
    match group {
        QuestionGroupId::Photo => FocusArea::PhotoQuestions,
        QuestionGroupId::Search => FocusArea::SearchQuestions,
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
