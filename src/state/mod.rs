//! Application state module

mod app_state;
mod carousel;
mod form_data;
mod forms;
mod image_slots;
mod questions;
mod select;
mod store;
mod table;
mod tabs;
mod toast;

pub use app_state::*;
pub use carousel::*;
pub use form_data::*;
pub use forms::*;
pub use image_slots::*;
pub use questions::*;
pub use select::*;
pub use store::*;
pub use table::*;
pub use tabs::*;
pub use toast::*;
