//! Color palettes for the dark and light themes

use crate::state::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

/// Colors used by every draw function; passed down explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub surface: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub error: Color,
    pub success: Color,
    pub bar: Color,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                bg: Color::Reset,
                surface: Color::Black,
                fg: Color::White,
                muted: Color::DarkGray,
                border: Color::DarkGray,
                accent: Color::Cyan,
                error: Color::Red,
                success: Color::Green,
                bar: Color::DarkGray,
            },
            ThemeMode::Light => Self {
                bg: Color::White,
                surface: Color::Gray,
                fg: Color::Black,
                muted: Color::Gray,
                border: Color::Gray,
                accent: Color::Blue,
                error: Color::Red,
                success: Color::Green,
                bar: Color::Gray,
            },
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    /// Border for a focused or idle control
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn error_text(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn link(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .add_modifier(Modifier::UNDERLINED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ() {
        let dark = Palette::for_mode(ThemeMode::Dark);
        let light = Palette::for_mode(ThemeMode::Light);
        assert_ne!(dark.fg, light.fg);
        assert_eq!(dark.error, light.error);
    }
}
