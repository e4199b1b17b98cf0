//! Verification form data model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Document tab under review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabType {
    #[default]
    Identificacion,
    Comprobante,
    Propiedad,
    Contrato,
    Contacto,
    Fotografia,
}

impl TabType {
    /// All tabs in display order
    pub const ALL: [TabType; 6] = [
        TabType::Identificacion,
        TabType::Comprobante,
        TabType::Propiedad,
        TabType::Contrato,
        TabType::Contacto,
        TabType::Fotografia,
    ];

    /// Stable key used for persistence and tab navigation
    pub fn key(self) -> &'static str {
        match self {
            Self::Identificacion => "identificacion",
            Self::Comprobante => "comprobante",
            Self::Propiedad => "propiedad",
            Self::Contrato => "contrato",
            Self::Contacto => "contacto",
            Self::Fotografia => "fotografia",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Identificacion => "Identificación",
            Self::Comprobante => "Comprobante",
            Self::Propiedad => "Propiedad",
            Self::Contrato => "Contrato",
            Self::Contacto => "Contacto",
            Self::Fotografia => "Fotografía",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    /// The three canonical image labels for this tab
    pub fn image_labels(self) -> [&'static str; 3] {
        match self {
            Self::Identificacion => ["INE frontal", "INE reverso", "Selfie"],
            Self::Comprobante => ["Comprobante 1", "Comprobante 2", "Comprobante 3"],
            Self::Propiedad => ["Escritura 1", "Escritura 2", "Fachada"],
            Self::Contrato => ["Contrato página 1", "Contrato página 2", "Firma"],
            Self::Contacto => ["Referencia 1", "Referencia 2", "Referencia 3"],
            Self::Fotografia => ["Foto frontal", "Foto perfil", "Foto cuerpo completo"],
        }
    }
}

/// Answer to a tri-state question. Unset is represented as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionAnswer {
    #[serde(rename = "si")]
    Si,
    #[serde(rename = "no")]
    No,
    #[serde(rename = "no-aplica")]
    NoAplica,
}

impl QuestionAnswer {
    /// Options in the order they are shown
    pub const ALL: [QuestionAnswer; 3] = [Self::Si, Self::No, Self::NoAplica];

    pub fn label(self) -> &'static str {
        match self {
            Self::Si => "Sí",
            Self::No => "No",
            Self::NoAplica => "No aplica",
        }
    }
}

/// Map of question id to answer, ordered for stable serialization
pub type QuestionAnswers = BTreeMap<String, Option<QuestionAnswer>>;

/// The value of the "rechazada" response, which makes motivo mandatory
pub const RESPUESTA_RECHAZADA: &str = "rechazada";
pub const RESPUESTA_APROBADA: &str = "aprobada";

/// Complete form state for one verification session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub active_tab: TabType,
    #[serde(default)]
    pub question_answers: QuestionAnswers,
    #[serde(default)]
    pub respuesta: String,
    #[serde(default)]
    pub motivo: String,
    #[serde(default)]
    pub observaciones: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_expediente: Option<String>,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            active_tab: TabType::Identificacion,
            question_answers: QuestionAnswers::new(),
            respuesta: String::new(),
            motivo: String::new(),
            observaciones: String::new(),
            tipo_expediente: Some(String::new()),
        }
    }
}

impl FormData {
    /// Current answer for a question (unset if never answered)
    pub fn answer(&self, question_id: &str) -> Option<QuestionAnswer> {
        self.question_answers.get(question_id).copied().flatten()
    }

    /// True when any question holds a non-null answer
    pub fn has_any_answer(&self) -> bool {
        self.question_answers.values().any(Option::is_some)
    }

    pub fn tipo_expediente(&self) -> &str {
        self.tipo_expediente.as_deref().unwrap_or("")
    }
}

/// A settable scalar field of [`FormData`] together with its new value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    ActiveTab(TabType),
    Respuesta(String),
    Motivo(String),
    Observaciones(String),
    TipoExpediente(String),
}

impl FormField {
    /// Apply this field to the given form data
    pub fn apply(self, data: &mut FormData) {
        match self {
            FormField::ActiveTab(tab) => data.active_tab = tab,
            FormField::Respuesta(v) => data.respuesta = v,
            FormField::Motivo(v) => data.motivo = v,
            FormField::Observaciones(v) => data.observaciones = v,
            FormField::TipoExpediente(v) => data.tipo_expediente = Some(v),
        }
    }
}

/// Per-field validation messages; `None` means no error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub respuesta: Option<String>,
    pub motivo: Option<String>,
    pub preguntas: Option<String>,
}

impl ValidationErrors {
    pub fn has_errors(&self) -> bool {
        self.respuesta.is_some() || self.motivo.is_some() || self.preguntas.is_some()
    }
}

/// Snapshot built when the form passes validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPayload {
    pub active_tab: TabType,
    pub images: [String; 3],
    pub answers: QuestionAnswers,
    pub respuesta: String,
    pub motivo: String,
    pub observaciones: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_expediente: Option<String>,
}

impl FormPayload {
    /// Build a payload from the current form data
    pub fn from_form(data: &FormData) -> Self {
        Self {
            active_tab: data.active_tab,
            images: data.active_tab.image_labels().map(str::to_string),
            answers: data.question_answers.clone(),
            respuesta: data.respuesta.clone(),
            motivo: data.motivo.clone(),
            observaciones: data.observaciones.clone(),
            tipo_expediente: data.tipo_expediente.clone(),
        }
    }
}
