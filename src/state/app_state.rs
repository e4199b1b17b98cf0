//! Application state definitions

use super::carousel::CarouselState;
use super::form_data::{QuestionAnswer, TabType};
use super::image_slots::ImageSlots;
use super::questions::{QuestionCursor, QuestionGroupId};
use super::select::{SelectState, SelectWidth};
use super::tabs::{HistoryNavigator, ScrollDir, TabBox, TabItem, TabNavigation, TabsState};
use super::toast::ToastQueue;
use crate::mock_data;
use ratatui::layout::Rect;
use std::time::Duration;
use uuid::Uuid;

/// Color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Focusable sections of the page, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusArea {
    Folios,
    #[default]
    TipoExpediente,
    Tabs,
    Images,
    PhotoQuestions,
    ExternalLinks,
    SearchQuestions,
    Respuesta,
    Motivo,
    Observaciones,
    ResetButton,
    SubmitButton,
}

impl FocusArea {
    pub const ALL: [FocusArea; 12] = [
        Self::Folios,
        Self::TipoExpediente,
        Self::Tabs,
        Self::Images,
        Self::PhotoQuestions,
        Self::ExternalLinks,
        Self::SearchQuestions,
        Self::Respuesta,
        Self::Motivo,
        Self::Observaciones,
        Self::ResetButton,
        Self::SubmitButton,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Keys typed here are text, not shortcuts
    pub fn is_text_input(self) -> bool {
        matches!(self, Self::Observaciones)
    }
}

/// The three selects on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectId {
    TipoExpediente,
    Respuesta,
    Motivo,
}

/// Phase of the summary modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryPhase {
    #[default]
    Review,
    Success { show_details: bool },
}

/// Path input shown when an image slot is activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPrompt {
    pub tab: TabType,
    pub slot: String,
    pub label: &'static str,
    pub input: String,
}

/// Clickable regions recorded while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    MenuToggle,
    ThemeToggle,
    SidebarItem(&'static str),
    /// Dimmed page behind the narrow-layout drawer
    SidebarBackdrop,
    FolioLink { row: usize, column: &'static str },
    SelectTrigger(SelectId),
    SelectOption(SelectId, usize),
    TabScroll(ScrollDir),
    Tab(usize),
    ImageSlot(usize),
    Carousel,
    CarouselPrev,
    CarouselNext,
    CarouselDot(usize),
    QuestionOption {
        group: QuestionGroupId,
        row: usize,
        option: QuestionAnswer,
    },
    QuestionClear(QuestionGroupId),
    ExternalLink(usize),
    Observaciones,
    ResetButton,
    SubmitButton,
    ModalCancel,
    ModalConfirm,
    ModalToggleDetails,
    ModalFinish,
    ModalBackdrop,
    UploadAccept,
    UploadCancel,
    ToastDismiss(Uuid),
}

/// Main application state
pub struct AppState {
    // Layout
    pub focus: FocusArea,
    pub theme: ThemeMode,
    pub sidebar_open: bool,
    pub narrow: bool,
    pub page_scroll: u16,
    /// Page viewport from the last draw
    pub page_viewport: Rect,
    /// Full page height from the last draw
    pub page_height: u16,

    // Tabs
    pub tabs: TabsState,
    pub navigator: HistoryNavigator,
    /// Tab button bounds from the last draw, relative to the strip
    pub tab_boxes: Vec<TabBox>,
    pub tab_viewport_width: u16,
    /// Keyboard highlight inside the strip
    pub tab_highlight: usize,

    // Selects
    pub tipo_select: SelectState,
    pub respuesta_select: SelectState,
    pub motivo_select: SelectState,

    // Questions
    pub photo_cursor: QuestionCursor,
    pub search_cursor: QuestionCursor,

    // Images
    pub images: ImageSlots,
    pub image_focus: usize,
    pub carousel: CarouselState,
    pub upload_prompt: Option<UploadPrompt>,

    // Misc page widgets
    pub link_index: usize,
    pub folio_link: usize,

    // Overlays
    pub summary_phase: SummaryPhase,
    /// Highlighted button in the summary modal
    pub modal_button: usize,
    pub toasts: ToastQueue,
    pub status_message: Option<String>,

    /// Regions recorded by the last draw, topmost last
    pub hit_regions: Vec<(Rect, HitTarget)>,
}

impl AppState {
    pub fn new(navigation: TabNavigation, theme: ThemeMode, toast_duration: Duration) -> Self {
        let tabs = TabType::ALL
            .iter()
            .map(|t| TabItem::new(t.key(), t.label()))
            .collect();

        Self {
            focus: FocusArea::default(),
            theme,
            sidebar_open: true,
            narrow: false,
            page_scroll: 0,
            page_viewport: Rect::default(),
            page_height: 0,
            tabs: TabsState::new(tabs, navigation, None),
            navigator: HistoryNavigator::new("/verificacion"),
            tab_boxes: Vec::new(),
            tab_viewport_width: 0,
            tab_highlight: 0,
            tipo_select: SelectState::new(mock_data::tipo_expediente_options(), "Select")
                .width(SelectWidth::Lg),
            respuesta_select: SelectState::new(
                mock_data::respuesta_options(),
                "Seleccione una opción",
            )
            .width(SelectWidth::Xl),
            motivo_select: SelectState::new(
                mock_data::motivo_options(""),
                "Seleccione un motivo",
            )
            .width(SelectWidth::Xl),
            photo_cursor: QuestionCursor::default(),
            search_cursor: QuestionCursor::default(),
            images: ImageSlots::with_mocks(),
            image_focus: 0,
            carousel: CarouselState::default(),
            upload_prompt: None,
            link_index: 0,
            folio_link: 0,
            summary_phase: SummaryPhase::default(),
            modal_button: 0,
            toasts: ToastQueue::new(toast_duration),
            status_message: None,
            hit_regions: Vec::new(),
        }
    }

    pub fn select(&self, id: SelectId) -> &SelectState {
        match id {
            SelectId::TipoExpediente => &self.tipo_select,
            SelectId::Respuesta => &self.respuesta_select,
            SelectId::Motivo => &self.motivo_select,
        }
    }

    pub fn select_mut(&mut self, id: SelectId) -> &mut SelectState {
        match id {
            SelectId::TipoExpediente => &mut self.tipo_select,
            SelectId::Respuesta => &mut self.respuesta_select,
            SelectId::Motivo => &mut self.motivo_select,
        }
    }

    /// The select whose list is open, if any
    pub fn open_select(&self) -> Option<SelectId> {
        [SelectId::TipoExpediente, SelectId::Respuesta, SelectId::Motivo]
            .into_iter()
            .find(|id| self.select(*id).open)
    }

    pub fn close_selects(&mut self) {
        self.tipo_select.close();
        self.respuesta_select.close();
        self.motivo_select.close();
    }

    pub fn question_cursor_mut(&mut self, group: QuestionGroupId) -> &mut QuestionCursor {
        match group {
            QuestionGroupId::Photo => &mut self.photo_cursor,
            QuestionGroupId::Search => &mut self.search_cursor,
        }
    }

    /// Move focus, closing any open list
    pub fn set_focus(&mut self, focus: FocusArea) {
        self.close_selects();
        self.focus = focus;
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.prev());
    }

    pub fn max_scroll(&self) -> u16 {
        self.page_height.saturating_sub(self.page_viewport.height)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.page_scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.page_scroll = next as u16;
    }

    /// Scroll so the rows `top..bottom` of the page are visible
    pub fn scroll_into_view(&mut self, top: u16, bottom: u16) {
        let height = self.page_viewport.height;
        if height == 0 {
            return;
        }
        if top < self.page_scroll {
            self.page_scroll = top;
        } else if bottom > self.page_scroll + height {
            self.page_scroll = bottom.saturating_sub(height).min(top);
        }
    }

    /// Topmost recorded region under a screen position
    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.hit_regions
            .iter()
            .rev()
            .find(|(r, _)| {
                column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|(_, target)| *target)
    }

    pub fn record_hit(&mut self, area: Rect, target: HitTarget) {
        if area.width > 0 && area.height > 0 {
            self.hit_regions.push((area, target));
        }
    }
}
