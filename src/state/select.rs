//! Dropdown select state

use ratatui::layout::Rect;

/// An option of a select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub key: &'static str,
    pub label: &'static str,
}

impl SelectItem {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Trigger width presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectWidth {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
    Xxl,
}

impl SelectWidth {
    /// Width in cells, borders included
    pub fn cells(self) -> u16 {
        match self {
            Self::Sm => 14,
            Self::Md => 22,
            Self::Lg => 28,
            Self::Xl => 34,
            Self::Xxl => 42,
        }
    }
}

/// Selection, popover and keyboard highlight of one select
#[derive(Debug, Clone)]
pub struct SelectState {
    pub items: Vec<SelectItem>,
    pub multiple: bool,
    /// Selected keys in insertion order
    selected: Vec<String>,
    pub open: bool,
    pub highlighted: usize,
    pub placeholder: &'static str,
    pub width: SelectWidth,
}

impl SelectState {
    pub fn new(items: Vec<SelectItem>, placeholder: &'static str) -> Self {
        Self {
            items,
            multiple: false,
            selected: Vec::new(),
            open: false,
            highlighted: 0,
            placeholder,
            width: SelectWidth::default(),
        }
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn width(mut self, width: SelectWidth) -> Self {
        self.width = width;
        self
    }

    pub fn selected_keys(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.iter().any(|k| k == key)
    }

    /// Resync from outside; unknown keys are kept out
    pub fn set_selected_keys<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selected.clear();
        for key in keys {
            let key = key.as_ref();
            if self.items.iter().any(|i| i.key == key) && !self.is_selected(key) {
                self.selected.push(key.to_string());
            }
        }
    }

    /// Replace the option list, dropping selections that no longer exist
    pub fn set_items(&mut self, items: Vec<SelectItem>) {
        self.items = items;
        let items = &self.items;
        self.selected.retain(|k| items.iter().any(|i| i.key == k));
        self.highlighted = self.highlighted.min(self.items.len().saturating_sub(1));
    }

    /// Pick an option. Returns the new key list when the selection changed.
    ///
    /// Single mode replaces the selection and closes the list. Multi mode
    /// toggles but never empties the selection.
    pub fn select(&mut self, key: &str) -> Option<Vec<String>> {
        if !self.items.iter().any(|i| i.key == key) {
            return None;
        }
        if self.multiple {
            let mut next = self.selected.clone();
            if let Some(pos) = next.iter().position(|k| k == key) {
                next.remove(pos);
            } else {
                next.push(key.to_string());
            }
            if next.is_empty() {
                return None;
            }
            self.selected = next;
        } else {
            // The list stays open; Esc or a click outside closes it
            if self.selected.len() == 1 && self.selected[0] == key {
                return None;
            }
            self.selected = vec![key.to_string()];
        }
        Some(self.selected.clone())
    }

    /// Select the highlighted option
    pub fn select_highlighted(&mut self) -> Option<Vec<String>> {
        let key = self.items.get(self.highlighted)?.key;
        self.select(key)
    }

    /// Labels of the selection joined with ", ", or the placeholder
    pub fn display_text(&self) -> String {
        if self.selected.is_empty() {
            return self.placeholder.to_string();
        }
        self.selected
            .iter()
            .filter_map(|k| self.items.iter().find(|i| i.key == k).map(|i| i.label))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn toggle_open(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open_list();
        }
    }

    pub fn open_list(&mut self) {
        self.open = true;
        self.highlighted = self
            .selected
            .first()
            .and_then(|k| self.items.iter().position(|i| i.key == k))
            .unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn highlight_next(&mut self) {
        if self.highlighted + 1 < self.items.len() {
            self.highlighted += 1;
        }
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }
}

/// Where the option list goes: directly below the trigger, as wide as the
/// trigger and never outside the viewport.
pub fn popover_rect(trigger: Rect, viewport: Rect, item_count: usize) -> Rect {
    let width = trigger.width.min(viewport.width);
    let max_x = viewport.right().saturating_sub(width);
    let x = trigger.x.clamp(viewport.x, max_x.max(viewport.x));

    let wanted = item_count as u16 + 2;
    let below = trigger.bottom();
    let space_below = viewport.bottom().saturating_sub(below);
    let space_above = trigger.y.saturating_sub(viewport.y);

    if space_below >= wanted || space_below >= space_above {
        Rect::new(x, below, width, wanted.min(space_below))
    } else {
        let height = wanted.min(space_above);
        Rect::new(x, trigger.y - height, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items() -> Vec<SelectItem> {
        vec![
            SelectItem::new("credito", "Expediente Crédito"),
            SelectItem::new("captacion", "Expediente Captación"),
            SelectItem::new("otro", "Otro"),
        ]
    }

    mod selection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_placeholder_when_empty() {
            let s = SelectState::new(items(), "Select");
            assert_eq!(s.display_text(), "Select");
        }

        #[test]
        fn test_single_mode_replaces_and_stays_open() {
            let mut s = SelectState::new(items(), "Select");
            s.open_list();
            assert_eq!(s.select("credito"), Some(vec!["credito".to_string()]));
            assert!(s.open);
            assert_eq!(s.select("captacion"), Some(vec!["captacion".to_string()]));
            assert_eq!(s.display_text(), "Expediente Captación");
            // Re-selecting the same key is not a change
            assert_eq!(s.select("captacion"), None);
        }

        #[test]
        fn test_multi_mode_never_empties() {
            let mut s = SelectState::new(items(), "Select").multiple(true);
            s.select("otro");
            s.select("credito");
            assert_eq!(s.display_text(), "Otro, Expediente Crédito");
            s.select("otro");
            assert_eq!(s.selected_keys(), ["credito".to_string()]);
            assert_eq!(s.select("credito"), None);
            assert_eq!(s.selected_keys(), ["credito".to_string()]);
        }

        #[test]
        fn test_unknown_key_is_ignored() {
            let mut s = SelectState::new(items(), "Select");
            assert_eq!(s.select("nope"), None);
            assert!(s.selected_keys().is_empty());
        }

        #[test]
        fn test_resync_from_outside() {
            let mut s = SelectState::new(items(), "Select");
            s.select("credito");
            s.set_selected_keys(Vec::<String>::new());
            assert_eq!(s.display_text(), "Select");
            s.set_selected_keys(["captacion", "bogus"]);
            assert_eq!(s.selected_keys(), ["captacion".to_string()]);
        }

        #[test]
        fn test_set_items_drops_stale_selection() {
            let mut s = SelectState::new(items(), "Select");
            s.select("otro");
            s.set_items(vec![SelectItem::new("credito", "Expediente Crédito")]);
            assert!(s.selected_keys().is_empty());
        }

        #[test]
        fn test_highlight_follows_selection_on_open() {
            let mut s = SelectState::new(items(), "Select");
            s.select("otro");
            s.open_list();
            assert_eq!(s.highlighted, 2);
            s.highlight_next();
            assert_eq!(s.highlighted, 2);
            s.highlight_prev();
            assert_eq!(s.select_highlighted(), Some(vec!["captacion".to_string()]));
        }
    }

    mod popover {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_below_trigger_with_trigger_width() {
            let r = popover_rect(Rect::new(10, 5, 20, 3), Rect::new(0, 0, 100, 40), 3);
            assert_eq!(r, Rect::new(10, 8, 20, 5));
        }

        #[test]
        fn test_clamped_to_viewport_width() {
            let r = popover_rect(Rect::new(70, 5, 40, 3), Rect::new(0, 0, 80, 40), 2);
            assert_eq!(r.width, 40);
            assert_eq!(r.right(), 80);

            let narrow = popover_rect(Rect::new(0, 5, 40, 3), Rect::new(0, 0, 30, 40), 2);
            assert_eq!(narrow.width, 30);
        }

        #[test]
        fn test_flips_above_when_no_room_below() {
            let r = popover_rect(Rect::new(0, 30, 20, 3), Rect::new(0, 0, 80, 34), 6);
            assert_eq!(r, Rect::new(0, 22, 20, 8));
        }

        #[test]
        fn test_height_clamped_to_available_rows() {
            let r = popover_rect(Rect::new(0, 2, 20, 3), Rect::new(0, 0, 80, 10), 20);
            assert_eq!(r.y, 5);
            assert_eq!(r.height, 5);
        }
    }
}
