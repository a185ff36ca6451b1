//! Selector input field widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::DossierTheme;

/// Input field widget
pub struct InputWidget<'a> {
    content: &'a str,
    cursor_position: usize,
    theme: &'a DossierTheme,
    title: &'static str,
    placeholder: &'a str,
    is_active: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a DossierTheme) -> Self {
        Self {
            content,
            cursor_position: content.chars().count(),
            theme,
            title: " Enter Surname Selector ",
            placeholder: "SURNAME, FORENAME",
            is_active: true,
        }
    }

    pub fn cursor_position(mut self, pos: usize) -> Self {
        self.cursor_position = pos;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(self.title, self.theme.title_style(self.is_active)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.is_active));

        let inner = block.inner(area);
        block.render(area, buf);

        let prompt = Span::styled("> ", self.theme.label_style());

        let line = if self.content.is_empty() {
            Line::from(vec![
                prompt,
                Span::styled(" ", Style::default().add_modifier(Modifier::UNDERLINED)),
                Span::styled(self.placeholder, self.theme.hint_style()),
            ])
        } else {
            // Character-based slicing keeps the cursor unicode safe
            let before_cursor: String = self.content.chars().take(self.cursor_position).collect();
            let at_cursor = self
                .content
                .chars()
                .nth(self.cursor_position)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after_cursor: String = self.content.chars().skip(self.cursor_position + 1).collect();

            Line::from(vec![
                prompt,
                Span::styled(before_cursor, self.theme.text_style()),
                Span::styled(
                    at_cursor,
                    Style::default()
                        .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
                        .fg(self.theme.foreground),
                ),
                Span::styled(after_cursor, self.theme.text_style()),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}
