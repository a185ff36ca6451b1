//! Color theme and styling for the dossier TUI

use ratatui::style::{Color, Modifier, Style};

/// Terminal color theme
#[derive(Debug, Clone)]
pub struct DossierTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Menu bar
    pub bar_foreground: Color,
    pub bar_background: Color,
    pub logged_in: Color,

    // Record colors
    pub label: Color,
    pub warning: Color,
    pub legacy: Color,
    pub available: Color,
    pub unavailable: Color,

    // Selection
    pub highlight_foreground: Color,
    pub highlight_background: Color,

    pub hint_text: Color,
}

impl Default for DossierTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            bar_foreground: Color::Black,
            bar_background: Color::Gray,
            logged_in: Color::Green,

            label: Color::Cyan,
            warning: Color::LightRed,
            legacy: Color::Yellow,
            available: Color::Green,
            unavailable: Color::DarkGray,

            highlight_foreground: Color::Black,
            highlight_background: Color::Cyan,

            hint_text: Color::DarkGray,
        }
    }
}

impl DossierTheme {
    /// Get style for normal text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    /// Get style for the top menu bar
    pub fn bar_style(&self) -> Style {
        Style::default()
            .fg(self.bar_foreground)
            .bg(self.bar_background)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for the logged-in marker in the top bar
    pub fn logged_in_style(&self) -> Style {
        Style::default()
            .fg(self.logged_in)
            .bg(self.bar_background)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for field labels
    pub fn label_style(&self) -> Style {
        Style::default()
            .fg(self.label)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for a record warning banner
    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn legacy_style(&self) -> Style {
        Style::default()
            .fg(self.legacy)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for a related entry marker
    pub fn availability_style(&self, available: bool) -> Style {
        Style::default().fg(if available {
            self.available
        } else {
            self.unavailable
        })
    }

    /// Get style for the selected row of a list or table
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_foreground)
            .bg(self.highlight_background)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for hints and secondary text
    pub fn hint_style(&self) -> Style {
        Style::default()
            .fg(self.hint_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get title style
    pub fn title_style(&self, focused: bool) -> Style {
        let style = Style::default().fg(if focused {
            self.border_focused
        } else {
            self.foreground
        });

        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}
