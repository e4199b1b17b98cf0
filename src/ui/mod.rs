//! UI module for rendering the TUI

mod components;
mod content;
mod layout;
mod page;
mod page_layout;
mod sidebar;
mod theme;

pub use components::phase_buttons;
pub use page::focus_span;

use crate::app::App;
use crate::state::HitTarget;
use components::{
    render_select_popover, render_summary_modal, render_toasts, render_upload_dialog, SummaryView,
};
use ratatui::{style::Style, widgets::Block, Frame};
use std::time::Instant;
use theme::Palette;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let now = Instant::now();
    let palette = Palette::for_mode(app.state.theme);
    let state = &mut app.state;
    let controller = &app.controller;

    state.hit_regions.clear();
    frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);

    let screen = layout::create_layout(area, state.sidebar_open, state.narrow);
    layout::draw_navbar(frame, screen.navbar, state, &palette);

    let anchors = page::draw_page(frame, screen.page, state, controller, now, &palette);

    if let Some(sidebar_area) = screen.sidebar {
        let overlay = state.narrow;
        if overlay {
            // Clicking the page behind the drawer closes it
            state.record_hit(screen.page, HitTarget::SidebarBackdrop);
        }
        sidebar::draw_sidebar(frame, sidebar_area, state, overlay, &palette);
    }

    if let Some(id) = state.open_select() {
        if let Some((_, trigger)) = anchors.iter().find(|(a, _)| *a == id) {
            let options =
                render_select_popover(frame, *trigger, screen.page, state.select(id), &palette);
            for (index, rect) in options {
                state.record_hit(rect, HitTarget::SelectOption(id, index));
            }
        }
    }

    if controller.show_modal() {
        if let Some(payload) = controller.payload() {
            let images = state.images.items(payload.active_tab);
            let view = SummaryView {
                payload,
                images: &images,
                phase: state.summary_phase,
                highlighted: state.modal_button,
            };
            for (rect, target) in render_summary_modal(frame, area, &view, &palette) {
                state.record_hit(rect, target);
            }
        }
    } else if let Some(prompt) = &state.upload_prompt {
        let hits = render_upload_dialog(frame, area, prompt, &palette);
        for (rect, target) in hits {
            state.record_hit(rect, target);
        }
    }

    for (id, rect) in render_toasts(frame, screen.page, state.toasts.toasts(), &palette) {
        state.record_hit(rect, HitTarget::ToastDismiss(id));
    }

    let modal = controller.show_modal().then_some(state.summary_phase);
    layout::draw_status_bar(frame, screen.status, state, modal, &palette);
}
