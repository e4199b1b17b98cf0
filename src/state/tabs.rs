//! Tab strip state: selection, navigation modes, overflow and cursor animation

use std::time::{Duration, Instant};

/// A single tab in the strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    pub key: String,
    pub label: String,
    /// Explicit route target, overrides `base_path/key` in route mode
    pub to: Option<String>,
    pub disabled: bool,
}

impl TabItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            to: None,
            disabled: false,
        }
    }

    pub fn to(mut self, target: impl Into<String>) -> Self {
        self.to = Some(target.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Current location as seen by the host router
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    /// Query string, with or without the leading `?`
    pub search: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: search.into(),
        }
    }

    /// Parse `"/path?query"` into a location
    pub fn parse(url: &str) -> Self {
        match url.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(url, ""),
        }
    }

    pub fn href(&self) -> String {
        let query = self.search.trim_start_matches('?');
        if query.is_empty() {
            self.pathname.clone()
        } else {
            format!("{}?{}", self.pathname, query)
        }
    }

    /// Decoded value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        parse_query(&self.search)
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Copy of the query string with `name` set to `value`, preserving other params
    pub fn with_query_param(&self, name: &str, value: &str) -> String {
        let mut params = parse_query(&self.search);
        match params.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => params.push((name.to_string(), value.to_string())),
        }
        params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn parse_query(search: &str) -> Vec<(String, String)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Join two path segments with exactly one slash between them
pub fn join_path(base: Option<&str>, segment: &str) -> String {
    let joined = format!(
        "{}/{}",
        base.unwrap_or("").trim_end_matches('/'),
        segment.trim_start_matches('/')
    );
    let mut out = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Host routing context
pub trait Navigator {
    fn navigate(&mut self, target: &str);
    fn location(&self) -> Location;
}

/// In-memory router used by the terminal host
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    history: Vec<Location>,
}

impl HistoryNavigator {
    pub fn new(initial: &str) -> Self {
        Self {
            history: vec![Location::parse(initial)],
        }
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&mut self, target: &str) {
        tracing::debug!(target, "navigate");
        self.history.push(Location::parse(target));
    }

    fn location(&self) -> Location {
        self.history.last().cloned().unwrap_or_default()
    }
}

/// How selecting a tab is reflected outside the strip
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TabNavigation {
    /// Local selection only
    #[default]
    Section,
    /// Each tab is a path: explicit `to` or `base_path/key`
    Route { base_path: Option<String> },
    /// Selection lives in a query-string parameter
    Query { param: String },
}

impl TabNavigation {
    /// URL to navigate to when `tab` is selected, `None` in section mode
    pub fn target_for(&self, tab: &TabItem, location: &Location) -> Option<String> {
        match self {
            Self::Section => None,
            Self::Route { base_path } => Some(route_target(tab, base_path.as_deref())),
            Self::Query { param } => Some(format!(
                "{}?{}",
                location.pathname,
                location.with_query_param(param, &tab.key)
            )),
        }
    }

    /// Tab key the given location points at, if any
    pub fn key_from_location<'a>(&self, tabs: &'a [TabItem], location: &Location) -> Option<&'a str> {
        match self {
            Self::Section => None,
            Self::Route { base_path } => {
                let pathname = location.pathname.trim_end_matches('/');
                tabs.iter()
                    .find(|t| {
                        let target = route_target(t, base_path.as_deref());
                        pathname.ends_with(target.trim_end_matches('/'))
                    })
                    .map(|t| t.key.as_str())
            }
            Self::Query { param } => {
                let value = location.query_param(param)?;
                tabs.iter().find(|t| t.key == value).map(|t| t.key.as_str())
            }
        }
    }
}

fn route_target(tab: &TabItem, base_path: Option<&str>) -> String {
    tab.to
        .clone()
        .unwrap_or_else(|| join_path(base_path, &tab.key))
}

/// Horizontal bounds of a rendered tab button, in cells relative to the strip start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabBox {
    pub left: u16,
    pub width: u16,
}

impl TabBox {
    pub fn right(self) -> u16 {
        self.left + self.width
    }
}

/// Scroll direction for the overflow arrows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDir {
    Left,
    Right,
}

/// Tabs ending this far past the viewport edge still count as visible
pub const HIDDEN_TOLERANCE: u16 = 1;
/// Smallest scroll step for the arrows
pub const MIN_SCROLL_STEP: u16 = 12;

/// Overflow state of a horizontally scrollable strip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabsOverflow {
    pub scroll: u16,
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
    pub right_hidden_count: usize,
}

impl TabsOverflow {
    /// Recompute arrow availability and hidden counter from the current geometry
    pub fn check(&mut self, viewport_width: u16, boxes: &[TabBox]) {
        let content_width = content_width(boxes);
        self.scroll = self.scroll.min(content_width.saturating_sub(viewport_width));
        self.can_scroll_left = self.scroll > 0;
        self.can_scroll_right = self.scroll + viewport_width < content_width;

        let viewport_right = self.scroll + viewport_width;
        self.right_hidden_count = boxes
            .iter()
            .filter(|b| b.right() > viewport_right + HIDDEN_TOLERANCE)
            .count();
    }

    pub fn scroll_by_step(&mut self, dir: ScrollDir, viewport_width: u16, boxes: &[TabBox]) {
        let step = MIN_SCROLL_STEP.max(viewport_width / 2);
        let max_scroll = content_width(boxes).saturating_sub(viewport_width);
        self.scroll = match dir {
            ScrollDir::Left => self.scroll.saturating_sub(step),
            ScrollDir::Right => (self.scroll + step).min(max_scroll),
        };
        self.check(viewport_width, boxes);
    }

    /// Adjust scroll so the given tab is fully visible
    pub fn scroll_into_view(&mut self, tab: TabBox, viewport_width: u16, boxes: &[TabBox]) {
        if tab.left < self.scroll {
            self.scroll = tab.left;
        } else if tab.right() > self.scroll + viewport_width {
            self.scroll = tab.right().saturating_sub(viewport_width);
        }
        self.check(viewport_width, boxes);
    }
}

fn content_width(boxes: &[TabBox]) -> u16 {
    boxes.iter().map(|b| b.right()).max().unwrap_or(0)
}

/// Animated selection indicator under the strip
#[derive(Debug, Clone)]
pub struct TabCursor {
    from: (f32, f32),
    target: TabBox,
    started: Option<Instant>,
    current: (f32, f32),
}

impl TabCursor {
    pub const DURATION: Duration = Duration::from_millis(220);

    pub fn new() -> Self {
        Self {
            from: (0.0, 0.0),
            target: TabBox::default(),
            started: None,
            current: (0.0, 0.0),
        }
    }

    /// Point the cursor at a freshly measured box; restarts the animation
    /// only when the target moved.
    pub fn set_target(&mut self, target: TabBox, now: Instant) {
        if target == self.target && self.started.is_some() {
            return;
        }
        if self.started.is_none() {
            // First measurement: jump straight there
            self.current = (f32::from(target.left), f32::from(target.width));
            self.from = self.current;
            self.target = target;
            self.started = Some(now);
            return;
        }
        self.from = self.current;
        self.target = target;
        self.started = Some(now);
    }

    /// Advance the animation
    pub fn tick(&mut self, now: Instant) {
        let Some(start) = self.started else {
            return;
        };
        let progress =
            (now.saturating_duration_since(start).as_secs_f32() / Self::DURATION.as_secs_f32())
                .clamp(0.0, 1.0);
        let eased = simple_easing::cubic_out(progress);
        let (tl, tw) = (f32::from(self.target.left), f32::from(self.target.width));
        self.current = (
            self.from.0 + (tl - self.from.0) * eased,
            self.from.1 + (tw - self.from.1) * eased,
        );
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|s| now.saturating_duration_since(s) < Self::DURATION)
    }

    /// Current rounded bounds
    pub fn bounds(&self) -> TabBox {
        TabBox {
            left: self.current.0.round().max(0.0) as u16,
            width: self.current.1.round().max(0.0) as u16,
        }
    }

    pub fn target(&self) -> TabBox {
        self.target
    }
}

impl Default for TabCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Selection state of a tab strip
#[derive(Debug, Clone)]
pub struct TabsState {
    pub tabs: Vec<TabItem>,
    pub navigation: TabNavigation,
    /// Externally controlled selection; when set it always wins
    value: Option<String>,
    internal_value: String,
    pub overflow: TabsOverflow,
    pub cursor: TabCursor,
    pub show_right_counter: bool,
}

impl TabsState {
    pub fn new(tabs: Vec<TabItem>, navigation: TabNavigation, default_value: Option<&str>) -> Self {
        let internal_value = default_value
            .map(str::to_string)
            .or_else(|| tabs.first().map(|t| t.key.clone()))
            .unwrap_or_default();
        Self {
            tabs,
            navigation,
            value: None,
            internal_value,
            overflow: TabsOverflow::default(),
            cursor: TabCursor::new(),
            show_right_counter: true,
        }
    }

    /// Drive selection from outside
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    pub fn is_controlled(&self) -> bool {
        self.value.is_some()
    }

    pub fn selected_key(&self) -> &str {
        let key = self.value.as_deref().unwrap_or(&self.internal_value);
        if key.is_empty() {
            self.tabs.first().map(|t| t.key.as_str()).unwrap_or("")
        } else {
            key
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        let key = self.selected_key();
        self.tabs.iter().position(|t| t.key == key)
    }

    /// Select a tab. Returns the key to report as a value change, or `None`
    /// when the key is unknown or disabled.
    pub fn select(&mut self, key: &str, navigator: Option<&mut dyn Navigator>) -> Option<String> {
        let tab = self.tabs.iter().find(|t| t.key == key && !t.disabled)?.clone();
        if !self.is_controlled() {
            self.internal_value = tab.key.clone();
        }
        if let Some(nav) = navigator {
            if let Some(target) = self.navigation.target_for(&tab, &nav.location()) {
                nav.navigate(&target);
            }
        }
        Some(tab.key)
    }

    pub fn select_prev(&mut self, navigator: Option<&mut dyn Navigator>) -> Option<String> {
        let current = self.current_index()?;
        let key = self.tabs[..current]
            .iter()
            .rev()
            .find(|t| !t.disabled)?
            .key
            .clone();
        self.select(&key, navigator)
    }

    pub fn select_next(&mut self, navigator: Option<&mut dyn Navigator>) -> Option<String> {
        let current = self.current_index()?;
        let key = self.tabs[current + 1..]
            .iter()
            .find(|t| !t.disabled)?
            .key
            .clone();
        self.select(&key, navigator)
    }

    /// Reflect an inbound location change into the selection
    pub fn sync_from_location(&mut self, location: &Location) {
        if self.is_controlled() {
            return;
        }
        if let Some(key) = self.navigation.key_from_location(&self.tabs, location) {
            if key != self.internal_value {
                self.internal_value = key.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tabs() -> Vec<TabItem> {
        vec![
            TabItem::new("identificacion", "Identificación"),
            TabItem::new("comprobante", "Comprobante"),
            TabItem::new("propiedad", "Propiedad").disabled(true),
            TabItem::new("contrato", "Contrato"),
        ]
    }

    mod paths {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_join_path_collapses_slashes() {
            assert_eq!(join_path(Some("/docs/"), "/identificacion"), "/docs/identificacion");
            assert_eq!(join_path(None, "contrato"), "/contrato");
            assert_eq!(join_path(Some("//a//"), "b"), "/a/b");
        }

        #[test]
        fn test_query_param_round_trip() {
            let loc = Location::new("/verificacion", "?folio=12&tab=contrato");
            assert_eq!(loc.query_param("tab").as_deref(), Some("contrato"));
            assert_eq!(
                loc.with_query_param("tab", "contacto"),
                "folio=12&tab=contacto"
            );
            assert_eq!(
                Location::new("/", "").with_query_param("q", "a b"),
                "q=a%20b"
            );
        }

        #[test]
        fn test_location_parse_and_href() {
            let loc = Location::parse("/v?tab=contacto");
            assert_eq!(loc.pathname, "/v");
            assert_eq!(loc.href(), "/v?tab=contacto");
            assert_eq!(Location::parse("/v").href(), "/v");
        }
    }

    mod selection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_defaults_to_first_tab() {
            let state = TabsState::new(tabs(), TabNavigation::Section, None);
            assert_eq!(state.selected_key(), "identificacion");
            assert_eq!(state.current_index(), Some(0));
        }

        #[test]
        fn test_explicit_default() {
            let state = TabsState::new(tabs(), TabNavigation::Section, Some("contrato"));
            assert_eq!(state.selected_key(), "contrato");
        }

        #[test]
        fn test_controlled_value_wins() {
            let mut state = TabsState::new(tabs(), TabNavigation::Section, None);
            state.set_value(Some("comprobante".into()));
            assert_eq!(state.select("contrato", None), Some("contrato".into()));
            // Parent has not updated the value yet
            assert_eq!(state.selected_key(), "comprobante");
        }

        #[test]
        fn test_disabled_tab_cannot_be_selected() {
            let mut state = TabsState::new(tabs(), TabNavigation::Section, None);
            assert_eq!(state.select("propiedad", None), None);
            assert_eq!(state.selected_key(), "identificacion");
        }

        #[test]
        fn test_prev_next_skip_disabled_without_wrapping() {
            let mut state = TabsState::new(tabs(), TabNavigation::Section, Some("comprobante"));
            assert_eq!(state.select_next(None), Some("contrato".into()));
            assert_eq!(state.select_next(None), None);
            assert_eq!(state.select_prev(None), Some("comprobante".into()));
            assert_eq!(state.select_prev(None), Some("identificacion".into()));
            assert_eq!(state.select_prev(None), None);
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_route_mode_navigates_to_joined_path() {
            let mut nav = HistoryNavigator::new("/verificacion");
            let mut state = TabsState::new(
                tabs(),
                TabNavigation::Route {
                    base_path: Some("/verificacion/".into()),
                },
                None,
            );
            state.select("contrato", Some(&mut nav));
            assert_eq!(nav.location().pathname, "/verificacion/contrato");
        }

        #[test]
        fn test_route_mode_prefers_explicit_target() {
            let mut nav = HistoryNavigator::default();
            let mut items = tabs();
            items[1] = TabItem::new("comprobante", "Comprobante").to("/docs/domicilio");
            let mut state = TabsState::new(items, TabNavigation::Route { base_path: None }, None);
            state.select("comprobante", Some(&mut nav));
            assert_eq!(nav.location().pathname, "/docs/domicilio");
        }

        #[test]
        fn test_route_mode_syncs_from_path_suffix() {
            let mut state = TabsState::new(
                tabs(),
                TabNavigation::Route {
                    base_path: Some("/v".into()),
                },
                None,
            );
            state.sync_from_location(&Location::new("/app/v/contrato/", ""));
            assert_eq!(state.selected_key(), "contrato");
        }

        #[test]
        fn test_query_mode_round_trip() {
            let mut nav = HistoryNavigator::new("/verificacion?folio=7");
            let mut state = TabsState::new(
                tabs(),
                TabNavigation::Query {
                    param: "tab".into(),
                },
                None,
            );
            state.select("comprobante", Some(&mut nav));
            let loc = nav.location();
            assert_eq!(loc.href(), "/verificacion?folio=7&tab=comprobante");

            let mut fresh = TabsState::new(
                tabs(),
                TabNavigation::Query {
                    param: "tab".into(),
                },
                None,
            );
            fresh.sync_from_location(&loc);
            assert_eq!(fresh.selected_key(), "comprobante");
        }

        #[test]
        fn test_query_mode_ignores_unknown_value() {
            let mut state = TabsState::new(
                tabs(),
                TabNavigation::Query {
                    param: "tab".into(),
                },
                None,
            );
            state.sync_from_location(&Location::new("/", "tab=nope"));
            assert_eq!(state.selected_key(), "identificacion");
        }

        #[test]
        fn test_section_mode_never_navigates() {
            let mut nav = HistoryNavigator::default();
            let mut state = TabsState::new(tabs(), TabNavigation::Section, None);
            state.select("contrato", Some(&mut nav));
            assert_eq!(nav.len(), 1);
        }

        #[test]
        fn test_controlled_state_ignores_inbound_location() {
            let mut state = TabsState::new(
                tabs(),
                TabNavigation::Query {
                    param: "tab".into(),
                },
                None,
            );
            state.set_value(Some("identificacion".into()));
            state.sync_from_location(&Location::new("/", "tab=contrato"));
            assert_eq!(state.selected_key(), "identificacion");
        }
    }

    mod overflow {
        use super::*;
        use pretty_assertions::assert_eq;

        fn boxes() -> Vec<TabBox> {
            (0..6)
                .map(|i| TabBox {
                    left: i * 10,
                    width: 10,
                })
                .collect()
        }

        #[test]
        fn test_everything_fits() {
            let mut o = TabsOverflow::default();
            o.check(80, &boxes());
            assert!(!o.can_scroll_left);
            assert!(!o.can_scroll_right);
            assert_eq!(o.right_hidden_count, 0);
        }

        #[test]
        fn test_hidden_tabs_on_the_right() {
            let mut o = TabsOverflow::default();
            o.check(35, &boxes());
            assert!(!o.can_scroll_left);
            assert!(o.can_scroll_right);
            // tab 3 ends at 40 > 36, tabs 4 and 5 also hidden
            assert_eq!(o.right_hidden_count, 3);
        }

        #[test]
        fn test_tolerance_counts_nearly_visible_tab_as_visible() {
            let mut o = TabsOverflow::default();
            o.check(39, &boxes());
            assert_eq!(o.right_hidden_count, 2);
        }

        #[test]
        fn test_scroll_by_step_clamps() {
            let mut o = TabsOverflow::default();
            let b = boxes();
            o.scroll_by_step(ScrollDir::Right, 30, &b);
            assert_eq!(o.scroll, 15);
            assert!(o.can_scroll_left);
            o.scroll_by_step(ScrollDir::Right, 30, &b);
            assert_eq!(o.scroll, 30);
            assert!(!o.can_scroll_right);
            o.scroll_by_step(ScrollDir::Left, 30, &b);
            o.scroll_by_step(ScrollDir::Left, 30, &b);
            assert_eq!(o.scroll, 0);
            assert!(!o.can_scroll_left);
        }

        #[test]
        fn test_scroll_into_view() {
            let mut o = TabsOverflow::default();
            let b = boxes();
            o.scroll_into_view(b[5], 30, &b);
            assert_eq!(o.scroll, 30);
            o.scroll_into_view(b[1], 30, &b);
            assert_eq!(o.scroll, 10);
        }
    }

    mod cursor {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_first_target_is_immediate() {
            let now = Instant::now();
            let mut c = TabCursor::new();
            c.set_target(TabBox { left: 4, width: 8 }, now);
            c.tick(now);
            assert_eq!(c.bounds(), TabBox { left: 4, width: 8 });
        }

        #[test]
        fn test_animates_towards_new_target() {
            let start = Instant::now();
            let mut c = TabCursor::new();
            c.set_target(TabBox { left: 0, width: 10 }, start);
            c.set_target(TabBox { left: 20, width: 12 }, start);

            c.tick(start + TabCursor::DURATION / 2);
            let mid = c.bounds();
            assert!(mid.left > 0 && mid.left < 20);
            assert!(c.is_animating(start + TabCursor::DURATION / 2));

            c.tick(start + TabCursor::DURATION);
            assert_eq!(c.bounds(), TabBox { left: 20, width: 12 });
            assert!(!c.is_animating(start + TabCursor::DURATION));
        }

        #[test]
        fn test_same_target_does_not_restart() {
            let start = Instant::now();
            let mut c = TabCursor::new();
            c.set_target(TabBox { left: 0, width: 10 }, start);
            c.set_target(TabBox { left: 20, width: 10 }, start);
            let later = start + TabCursor::DURATION * 2;
            c.set_target(TabBox { left: 20, width: 10 }, later);
            assert!(!c.is_animating(later));
        }
    }
}
