//! Form controller: store access, validation and the submit state machine

use super::validation;
use crate::state::form_data::{FormData, FormField, FormPayload, QuestionAnswer, ValidationErrors};
use crate::state::store::FormStore;

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; messages were published and nothing else happened
    Invalid,
    /// Payload built and the confirmation view opened
    ReadyForConfirmation,
}

/// Wraps the [`FormStore`] with validation state, the pending payload and
/// the confirmation modal flag.
#[derive(Debug)]
pub struct FormController {
    store: FormStore,
    validation_errors: ValidationErrors,
    show_modal: bool,
    payload: Option<FormPayload>,
}

impl FormController {
    pub fn new(store: FormStore) -> Self {
        Self {
            store,
            validation_errors: ValidationErrors::default(),
            show_modal: false,
            payload: None,
        }
    }

    pub fn form_data(&self) -> &FormData {
        self.store.form_data()
    }

    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.validation_errors
    }

    pub fn show_modal(&self) -> bool {
        self.show_modal
    }

    pub fn payload(&self) -> Option<&FormPayload> {
        self.payload.as_ref()
    }

    /// Write a field; clears the matching validation message
    pub fn update_field(&mut self, field: FormField) {
        match &field {
            FormField::Respuesta(_) => self.validation_errors.respuesta = None,
            FormField::Motivo(_) => self.validation_errors.motivo = None,
            _ => {}
        }
        self.store.set_field(field);
    }

    pub fn set_question_answer(&mut self, question_id: &str, answer: Option<QuestionAnswer>) {
        self.store.set_question_answer(question_id, answer);
        self.validation_errors.preguntas = None;
    }

    pub fn has_at_least_one_answer(&self) -> bool {
        self.form_data().has_any_answer()
    }

    pub fn can_submit(&self) -> bool {
        validation::can_submit(self.form_data())
    }

    pub fn can_reset(&self) -> bool {
        validation::can_reset(self.form_data())
    }

    /// Validate and, when valid, build the payload and open the confirmation view
    pub fn handle_submit(&mut self) -> SubmitOutcome {
        let errors = validation::validate(self.form_data());
        if errors.has_errors() {
            tracing::debug!(?errors, "submit blocked by validation");
            self.validation_errors = errors;
            return SubmitOutcome::Invalid;
        }

        self.validation_errors = ValidationErrors::default();
        self.payload = Some(FormPayload::from_form(self.form_data()));
        self.show_modal = true;
        SubmitOutcome::ReadyForConfirmation
    }

    /// Close the confirmation view; the store is left untouched
    pub fn confirm_submit(&mut self) {
        self.show_modal = false;
    }

    pub fn close_modal(&mut self) {
        self.show_modal = false;
    }

    /// Restore initial values and clear all transient state
    pub fn reset_form(&mut self) {
        self.store.reset();
        self.validation_errors = ValidationErrors::default();
        self.show_modal = false;
        self.payload = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::form_data::TabType;
    use crate::state::forms::validation::{MOTIVO_REQUIRED, PREGUNTAS_REQUIRED, RESPUESTA_REQUIRED};
    use crate::state::store::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn controller() -> FormController {
        FormController::new(FormStore::new(Box::new(MemoryStorage::default())))
    }

    fn valid_controller() -> FormController {
        let mut c = controller();
        c.update_field(FormField::Respuesta("aprobada".into()));
        c.set_question_answer("color", Some(QuestionAnswer::Si));
        c
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_invalid_submit_publishes_errors_and_keeps_modal_closed() {
            let mut c = controller();
            assert_eq!(c.handle_submit(), SubmitOutcome::Invalid);
            assert!(!c.show_modal());
            assert!(c.payload().is_none());
            assert_eq!(
                c.validation_errors().respuesta.as_deref(),
                Some(RESPUESTA_REQUIRED)
            );
            assert_eq!(
                c.validation_errors().preguntas.as_deref(),
                Some(PREGUNTAS_REQUIRED)
            );
        }

        #[test]
        fn test_zero_answers_never_produces_payload() {
            let mut c = controller();
            c.update_field(FormField::Respuesta("aprobada".into()));
            c.update_field(FormField::Motivo("datos-verificados".into()));
            assert_eq!(c.handle_submit(), SubmitOutcome::Invalid);
            assert!(c.payload().is_none());
            assert!(c.validation_errors().preguntas.is_some());
        }

        #[test]
        fn test_rechazada_requires_motivo() {
            let mut c = controller();
            c.update_field(FormField::Respuesta("rechazada".into()));
            c.set_question_answer("match", Some(QuestionAnswer::No));
            assert_eq!(c.handle_submit(), SubmitOutcome::Invalid);
            assert_eq!(c.validation_errors().motivo.as_deref(), Some(MOTIVO_REQUIRED));

            c.update_field(FormField::Motivo("foto-borrosa".into()));
            assert_eq!(c.handle_submit(), SubmitOutcome::ReadyForConfirmation);
        }

        #[test]
        fn test_valid_submit_builds_payload_and_opens_modal() {
            let mut c = valid_controller();
            c.update_field(FormField::ActiveTab(TabType::Comprobante));
            assert_eq!(c.handle_submit(), SubmitOutcome::ReadyForConfirmation);
            assert!(c.show_modal());
            assert_eq!(c.validation_errors(), &ValidationErrors::default());

            let payload = c.payload().unwrap();
            assert_eq!(payload.active_tab, TabType::Comprobante);
            assert_eq!(payload.images[0], "Comprobante 1");
            assert_eq!(payload.answers.get("color"), Some(&Some(QuestionAnswer::Si)));
        }

        #[test]
        fn test_confirm_submit_closes_modal_without_clearing_store() {
            let mut c = valid_controller();
            c.handle_submit();
            c.confirm_submit();
            assert!(!c.show_modal());
            assert_eq!(c.form_data().respuesta, "aprobada");
            assert!(c.payload().is_some());
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_errors_clear_individually_on_change() {
            let mut c = controller();
            c.update_field(FormField::Respuesta("rechazada".into()));
            c.handle_submit();
            // respuesta is set so only motivo and preguntas fail
            assert!(c.validation_errors().respuesta.is_none());
            assert!(c.validation_errors().motivo.is_some());
            assert!(c.validation_errors().preguntas.is_some());

            c.update_field(FormField::Motivo("foto-no-visible".into()));
            assert!(c.validation_errors().motivo.is_none());
            assert!(c.validation_errors().preguntas.is_some());

            c.set_question_answer("vigente", Some(QuestionAnswer::NoAplica));
            assert!(c.validation_errors().preguntas.is_none());
        }

        #[test]
        fn test_observaciones_change_keeps_errors() {
            let mut c = controller();
            c.handle_submit();
            c.update_field(FormField::Observaciones("nota".into()));
            assert!(c.validation_errors().respuesta.is_some());
        }
    }

    mod reset {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reset_restores_everything() {
            let mut c = valid_controller();
            c.update_field(FormField::Observaciones("nota".into()));
            c.handle_submit();
            assert!(c.can_reset());

            c.reset_form();
            assert_eq!(c.form_data(), &FormData::default());
            assert_eq!(c.validation_errors(), &ValidationErrors::default());
            assert!(!c.show_modal());
            assert!(c.payload().is_none());
            assert!(!c.can_reset());
        }

        #[test]
        fn test_reset_clears_published_errors() {
            let mut c = controller();
            c.handle_submit();
            c.reset_form();
            assert!(!c.validation_errors().has_errors());
        }
    }
}
