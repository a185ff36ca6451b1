//! Menu bar, status bar and hotkey bar widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::View;
use crate::ui::theme::DossierTheme;

/// Operator id shown in the top bar
pub const OPERATOR_ID: &str = "3204-412-41-C";

/// Decorative system menu entries in the top bar
const BAR_MENUS: [&str; 7] = [
    "System",
    "Access",
    "Screen",
    "Edit Profile",
    "Settings",
    "Print Screen",
    "Help",
];

/// Top bar with the logged-in banner and system menus
pub struct MenuBarWidget<'a> {
    theme: &'a DossierTheme,
}

impl<'a> MenuBarWidget<'a> {
    pub fn new(theme: &'a DossierTheme) -> Self {
        Self { theme }
    }
}

impl Widget for MenuBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            format!(" LOGGED IN <{OPERATOR_ID}> "),
            self.theme.logged_in_style(),
        )];
        for menu in BAR_MENUS {
            spans.push(Span::raw(format!("  {menu}")));
        }

        Paragraph::new(Line::from(spans))
            .style(self.theme.bar_style())
            .render(area, buf);
    }
}

/// Status line showing the current screen and any status message
pub struct StatusBarWidget<'a> {
    screen: &'a str,
    message: Option<&'a str>,
    theme: &'a DossierTheme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(screen: &'a str, theme: &'a DossierTheme) -> Self {
        Self {
            screen,
            message: None,
            theme,
        }
    }

    pub fn message(mut self, msg: Option<&'a str>) -> Self {
        self.message = msg;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.screen),
            self.theme.label_style().add_modifier(Modifier::REVERSED),
        )];

        if let Some(msg) = self.message {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(msg, self.theme.legacy_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey hints for the current screen
pub struct HotkeyBarWidget<'a> {
    hints: &'static [(&'static str, &'static str)],
    theme: &'a DossierTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(view: &View<'_>, theme: &'a DossierTheme) -> Self {
        Self {
            hints: hints_for(view),
            theme,
        }
    }
}

/// Screen name shown in the status bar
pub fn screen_name(view: &View<'_>) -> &'static str {
    match view {
        View::Menu { .. } => "MENU",
        View::Search => "SEARCH",
        View::Results { .. } => "RESULTS",
        View::Record { .. } => "RECORD",
        View::Related { .. } => "RELATED",
        View::Events { .. } => "EVENTS",
    }
}

fn hints_for(view: &View<'_>) -> &'static [(&'static str, &'static str)] {
    match view {
        View::Menu { .. } => &[("j/k", "move"), ("Enter", "select"), ("Esc", "log out")],
        View::Search => &[("Enter", "search"), ("↑/↓", "history"), ("Esc", "menu")],
        View::Results { .. } => &[("j/k", "move"), ("Enter", "open"), ("Esc", "back")],
        View::Record { .. } => &[
            ("j/k", "scroll"),
            ("r", "related"),
            ("e", "events"),
            ("Esc", "back"),
        ],
        View::Related { .. } => &[("j/k", "move"), ("Enter", "follow"), ("Esc", "back")],
        View::Events { .. } => &[("j/k", "move"), ("Esc", "back")],
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::raw(" ")];
        for (key, action) in self.hints {
            spans.push(Span::styled(*key, self.theme.label_style()));
            spans.push(Span::styled(format!(" {action}  "), self.theme.hint_style()));
        }
        spans.push(Span::styled("Ctrl+C quit", self.theme.hint_style()));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
