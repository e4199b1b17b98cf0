//! Dialog components for TUI

mod base;
mod summary_modal;
mod upload_dialog;

pub use summary_modal::{phase_buttons, render_summary_modal, SummaryView};
pub use upload_dialog::render_upload_dialog;
