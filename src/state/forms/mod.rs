//! Form domain layer
//!
//! Validation rules and the submit state machine for the verification form.

mod form_state;
pub mod validation;

pub use form_state::{FormController, SubmitOutcome};
