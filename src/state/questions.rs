//! Tri-state question groups

use super::form_data::{FormData, QuestionAnswer};

/// A single yes/no/not-applicable question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionItem {
    pub id: &'static str,
    pub text: &'static str,
}

pub const PHOTO_QUESTIONS: &[QuestionItem] = &[
    QuestionItem {
        id: "color",
        text: "¿La digitalización de la ID para este folio está a color?",
    },
    QuestionItem {
        id: "match",
        text: "¿Los datos en ambas ID, expediente y digitalizada coinciden?",
    },
];

pub const SEARCH_QUESTIONS: &[QuestionItem] = &[
    QuestionItem {
        id: "vigente",
        text: "¿La información devuelta por tus consultas es vigente?",
    },
    QuestionItem {
        id: "coincide",
        text: "¿La información devuelta por las consultas coincide con la identificación del cliente?",
    },
];

/// Which of the two page groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionGroupId {
    Photo,
    Search,
}

impl QuestionGroupId {
    pub fn group(self) -> QuestionGroup {
        match self {
            Self::Photo => QuestionGroup::new(
                "Selecciona tu respuesta de acuerdo a lo que visualizas en las fotografías",
                PHOTO_QUESTIONS,
            ),
            Self::Search => QuestionGroup::new(
                "Selecciona tu respuesta de acuerdo al resultado de la búsqueda",
                SEARCH_QUESTIONS,
            ),
        }
    }
}

/// A titled set of questions sharing a "clear all" action
#[derive(Debug, Clone, Copy)]
pub struct QuestionGroup {
    pub title: &'static str,
    pub questions: &'static [QuestionItem],
}

impl QuestionGroup {
    pub const fn new(title: &'static str, questions: &'static [QuestionItem]) -> Self {
        Self { title, questions }
    }

    /// New value after clicking `option` on a row currently holding `current`.
    /// Clicking the selected option deselects it.
    pub fn toggle(
        current: Option<QuestionAnswer>,
        option: QuestionAnswer,
    ) -> Option<QuestionAnswer> {
        if current == Some(option) {
            None
        } else {
            Some(option)
        }
    }

    /// "Clear all" is enabled only when a question in this group is answered
    pub fn has_any_selected(&self, data: &FormData) -> bool {
        self.questions.iter().any(|q| data.answer(q.id).is_some())
    }

    /// Ids that need an unset write for "clear all".
    /// Unanswered questions are skipped.
    pub fn clear_all_targets(&self, data: &FormData) -> Vec<&'static str> {
        self.questions
            .iter()
            .filter(|q| data.answer(q.id).is_some())
            .map(|q| q.id)
            .collect()
    }
}

/// Keyboard cursor inside a question group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionCursor {
    /// Row index; `questions.len()` is the "clear" footer button
    pub row: usize,
    /// Highlighted option column
    pub option: usize,
}

impl QuestionCursor {
    pub fn move_down(&mut self, question_count: usize) {
        if self.row < question_count {
            self.row += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn move_left(&mut self) {
        self.option = self.option.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.option + 1 < QuestionAnswer::ALL.len() {
            self.option += 1;
        }
    }

    pub fn on_clear_button(&self, question_count: usize) -> bool {
        self.row >= question_count
    }

    pub fn highlighted_option(&self) -> QuestionAnswer {
        QuestionAnswer::ALL[self.option.min(QuestionAnswer::ALL.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FormController;
    use crate::state::store::{FormStore, MemoryStorage};

    fn controller() -> FormController {
        FormController::new(FormStore::new(Box::new(MemoryStorage::default())))
    }

    /// Mirror of the page handler: toggle and write through
    fn click(c: &mut FormController, id: &str, option: QuestionAnswer) {
        let next = QuestionGroup::toggle(c.form_data().answer(id), option);
        c.set_question_answer(id, next);
    }

    fn clear(c: &mut FormController, group: QuestionGroup) {
        for id in group.clear_all_targets(c.form_data()) {
            c.set_question_answer(id, None);
        }
    }

    #[test]
    fn test_toggle_selects_and_deselects() {
        assert_eq!(
            QuestionGroup::toggle(None, QuestionAnswer::Si),
            Some(QuestionAnswer::Si)
        );
        assert_eq!(
            QuestionGroup::toggle(Some(QuestionAnswer::Si), QuestionAnswer::No),
            Some(QuestionAnswer::No)
        );
        assert_eq!(
            QuestionGroup::toggle(Some(QuestionAnswer::NoAplica), QuestionAnswer::NoAplica),
            None
        );
    }

    #[test]
    fn test_double_click_returns_to_initial_state() {
        let mut c = controller();
        click(&mut c, "color", QuestionAnswer::No);
        click(&mut c, "color", QuestionAnswer::No);
        assert_eq!(c.form_data().answer("color"), None);
        assert!(!c.has_at_least_one_answer());
    }

    #[test]
    fn test_has_any_selected() {
        let mut c = controller();
        let group = QuestionGroupId::Photo.group();
        assert!(!group.has_any_selected(c.form_data()));
        click(&mut c, "vigente", QuestionAnswer::Si);
        assert!(!group.has_any_selected(c.form_data()));
        click(&mut c, "match", QuestionAnswer::Si);
        assert!(group.has_any_selected(c.form_data()));
    }

    #[test]
    fn test_clear_all_only_touches_own_group() {
        let mut c = controller();
        click(&mut c, "color", QuestionAnswer::Si);
        click(&mut c, "match", QuestionAnswer::NoAplica);
        click(&mut c, "coincide", QuestionAnswer::No);

        clear(&mut c, QuestionGroupId::Photo.group());
        assert_eq!(c.form_data().answer("color"), None);
        assert_eq!(c.form_data().answer("match"), None);
        assert_eq!(c.form_data().answer("coincide"), Some(QuestionAnswer::No));
    }

    #[test]
    fn test_clear_all_skips_unanswered_questions() {
        let mut c = controller();
        click(&mut c, "vigente", QuestionAnswer::Si);
        let targets = QuestionGroupId::Search.group().clear_all_targets(c.form_data());
        assert_eq!(targets, vec!["vigente"]);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut cursor = QuestionCursor::default();
        cursor.move_up();
        assert_eq!(cursor.row, 0);
        cursor.move_down(2);
        cursor.move_down(2);
        cursor.move_down(2);
        assert_eq!(cursor.row, 2);
        assert!(cursor.on_clear_button(2));

        cursor.move_right();
        cursor.move_right();
        cursor.move_right();
        assert_eq!(cursor.highlighted_option(), QuestionAnswer::NoAplica);
        cursor.move_left();
        assert_eq!(cursor.highlighted_option(), QuestionAnswer::No);
    }
}
