//! Vertical placement of the page sections
//!
//! The page is taller than most terminals, so sections are laid out on a
//! virtual column and the visible slice is picked from `AppState::page_scroll`.

use crate::state::FocusArea;
use crate::ui::components::{table_height, BUTTON_HEIGHT, TABS_HEIGHT};
use ratatui::layout::Rect;

/// Rows between sections
const SECTION_GAP: u16 = 1;

pub const HEADER_HEIGHT: u16 = 2;
pub const SELECT_HEIGHT: u16 = 3;
pub const IMAGE_TILE_HEIGHT: u16 = 7;
pub const QUESTION_GROUP_HEIGHT: u16 = 8;
pub const LINKS_HEIGHT: u16 = 2;
/// Observaciones box height next to the selects
pub const WIDE_TEXTAREA_HEIGHT: u16 = 8;
pub const NARROW_TEXTAREA_HEIGHT: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Progress,
    Folios,
    TipoExpediente,
    Tabs,
    Images,
    PhotoQuestions,
    ExternalLinks,
    SearchQuestions,
    ResponseForm,
}

impl Section {
    /// Section that holds a focus target
    pub fn for_focus(focus: FocusArea) -> Self {
        match focus {
            FocusArea::Folios => Self::Folios,
            FocusArea::TipoExpediente => Self::TipoExpediente,
            FocusArea::Tabs => Self::Tabs,
            FocusArea::Images => Self::Images,
            FocusArea::PhotoQuestions => Self::PhotoQuestions,
            FocusArea::ExternalLinks => Self::ExternalLinks,
            FocusArea::SearchQuestions => Self::SearchQuestions,
            FocusArea::Respuesta
            | FocusArea::Motivo
            | FocusArea::Observaciones
            | FocusArea::ResetButton
            | FocusArea::SubmitButton => Self::ResponseForm,
        }
    }
}

/// A section at a virtual row of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedSection {
    pub section: Section,
    pub top: u16,
    pub height: u16,
}

impl PlacedSection {
    pub fn bottom(&self) -> u16 {
        self.top + self.height
    }
}

pub fn response_form_height(narrow: bool) -> u16 {
    let selects = (SELECT_HEIGHT + 1) * 2;
    if narrow {
        selects + NARROW_TEXTAREA_HEIGHT + BUTTON_HEIGHT
    } else {
        selects.max(WIDE_TEXTAREA_HEIGHT) + BUTTON_HEIGHT
    }
}

fn section_height(section: Section, narrow: bool, folio_rows: usize) -> u16 {
    match section {
        Section::Header => HEADER_HEIGHT,
        Section::Progress => 1,
        Section::Folios => table_height(folio_rows),
        Section::TipoExpediente => SELECT_HEIGHT,
        Section::Tabs => TABS_HEIGHT,
        // Title row, tiles, and the carousel controls when narrow
        Section::Images => 1 + IMAGE_TILE_HEIGHT + u16::from(narrow),
        Section::PhotoQuestions | Section::SearchQuestions => QUESTION_GROUP_HEIGHT,
        Section::ExternalLinks => LINKS_HEIGHT,
        Section::ResponseForm => response_form_height(narrow),
    }
}

/// Every section in page order with its virtual position
pub fn page_sections(narrow: bool, folio_rows: usize) -> Vec<PlacedSection> {
    const ORDER: [Section; 10] = [
        Section::Header,
        Section::Progress,
        Section::Folios,
        Section::TipoExpediente,
        Section::Tabs,
        Section::Images,
        Section::PhotoQuestions,
        Section::ExternalLinks,
        Section::SearchQuestions,
        Section::ResponseForm,
    ];

    let mut top = 0;
    ORDER
        .into_iter()
        .map(|section| {
            let height = section_height(section, narrow, folio_rows);
            let placed = PlacedSection {
                section,
                top,
                height,
            };
            top += height + SECTION_GAP;
            placed
        })
        .collect()
}

pub fn page_height(sections: &[PlacedSection]) -> u16 {
    sections.last().map(PlacedSection::bottom).unwrap_or(0)
}

pub fn find(sections: &[PlacedSection], section: Section) -> Option<PlacedSection> {
    sections.iter().find(|s| s.section == section).copied()
}

/// Screen area of a section, or `None` when its first row is scrolled out.
/// Sections running past the bottom edge are cut short.
pub fn screen_rect(placed: &PlacedSection, scroll: u16, viewport: Rect) -> Option<Rect> {
    if placed.top < scroll || placed.top >= scroll + viewport.height {
        return None;
    }
    let y = viewport.y + placed.top - scroll;
    Some(Rect {
        x: viewport.x,
        y,
        width: viewport.width,
        height: placed.height.min(viewport.bottom() - y),
    })
}
