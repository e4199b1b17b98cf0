//! Reusable UI components

pub mod button;
mod dialog;
pub mod field;
pub mod progress;
pub mod select;
pub mod table;
pub mod tabs;
pub mod toast;

pub use button::{button_width, render_button, ButtonVariant, BUTTON_HEIGHT};
pub use dialog::{phase_buttons, render_summary_modal, render_upload_dialog, SummaryView};
pub use field::render_text_area;
pub use progress::render_progress;
pub use select::{render_select_popover, render_select_trigger, trigger_width};
pub use table::{render_table, table_height};
pub use tabs::{render_tabs, TABS_HEIGHT};
pub use toast::render_toasts;
