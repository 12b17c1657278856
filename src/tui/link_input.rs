//! Dialog for pasting a shared link.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::Theme;

/// Text typed into the link dialog.
#[derive(Debug, Clone, Default)]
pub struct LinkInputState {
    pub input: String,
}

impl LinkInputState {
    pub fn clear(&mut self) {
        self.input.clear();
    }
}

/// Render the link input dialog
pub fn render_link_input(f: &mut Frame, state: &LinkInputState, theme: &Theme) {
    let area = super::centered_rect(70, 30, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Open Shared Link (o) ")
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Prompt
            Constraint::Min(3),    // Input
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let prompt = Paragraph::new("Paste a link or a #list=...&favs=... fragment:")
        .style(Style::default().fg(theme.text_secondary));
    f.render_widget(prompt, chunks[0]);

    let input = Paragraph::new(format!("{}█", state.input))
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: false });
    f.render_widget(input, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(theme.primary)),
        Span::raw(": Open  "),
        Span::styled("Ctrl+U", Style::default().fg(theme.primary)),
        Span::raw(": Clear  "),
        Span::styled("Esc", Style::default().fg(theme.primary)),
        Span::raw(": Cancel"),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().fg(theme.text_muted));
    f.render_widget(help, chunks[2]);
}
