//! Page sections below the header

mod external_links;
mod image_grid;
mod question_group;
mod response_form;

pub use external_links::render_external_links;
pub use image_grid::render_image_grid;
pub use question_group::render_question_group;
pub use response_form::render_response_form;
