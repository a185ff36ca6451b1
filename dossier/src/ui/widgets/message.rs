//! Message box widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::Message;
use crate::ui::theme::DossierTheme;

pub struct MessageWidget<'a> {
    message: &'a Message,
    theme: &'a DossierTheme,
}

impl<'a> MessageWidget<'a> {
    pub fn new(message: &'a Message, theme: &'a DossierTheme) -> Self {
        Self { message, theme }
    }
}

impl Widget for MessageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.message.title),
                self.theme.warning_style(),
            ))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let text = vec![
            Line::from(""),
            Line::from(self.message.body),
            Line::from(""),
            Line::from(Span::styled("Press any key", self.theme.hint_style())),
        ];

        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
