//! Client-side submit rules

use crate::state::form_data::{FormData, ValidationErrors, RESPUESTA_RECHAZADA};

pub const RESPUESTA_REQUIRED: &str = "La respuesta es obligatoria";
pub const MOTIVO_REQUIRED: &str = "El motivo es obligatorio cuando la respuesta es Rechazada";
pub const PREGUNTAS_REQUIRED: &str = "Debe responder al menos una pregunta";

/// True when motivo must be filled in for the given respuesta
pub fn motivo_required(respuesta: &str) -> bool {
    respuesta == RESPUESTA_RECHAZADA
}

/// Whether all three submit preconditions hold
pub fn can_submit(data: &FormData) -> bool {
    let has_respuesta = !data.respuesta.is_empty();
    let has_motivo = !data.motivo.is_empty();
    has_respuesta && (!motivo_required(&data.respuesta) || has_motivo) && data.has_any_answer()
}

/// Whether anything differs from the initial form
pub fn can_reset(data: &FormData) -> bool {
    !data.respuesta.is_empty()
        || !data.motivo.is_empty()
        || !data.observaciones.is_empty()
        || !data.tipo_expediente().is_empty()
        || data.has_any_answer()
}

/// Compute every validation message independently.
///
/// Each message describes exactly one missing precondition.
pub fn validate(data: &FormData) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if data.respuesta.is_empty() {
        errors.respuesta = Some(RESPUESTA_REQUIRED.to_string());
    }
    if motivo_required(&data.respuesta) && data.motivo.is_empty() {
        errors.motivo = Some(MOTIVO_REQUIRED.to_string());
    }
    if !data.has_any_answer() {
        errors.preguntas = Some(PREGUNTAS_REQUIRED.to_string());
    }

    errors
}
