//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, PopupType, Theme};
use crate::favorites::ActiveList;

/// Lines available between the borders, including the help line.
const CONTENT_LINES: usize = 4;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut lines = Self::content_lines(state, theme);
        lines.truncate(CONTENT_LINES - 1);
        while lines.len() < CONTENT_LINES - 1 {
            lines.push(Line::from(""));
        }
        lines.push(Self::help_line(state, theme));

        let status = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );
        f.render_widget(status, area);
    }

    /// Message, selection and list lines above the help line.
    pub fn content_lines(state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        // First line: error or status message
        if let Some(error) = &state.error_message {
            let first = error.lines().next().unwrap_or_default().to_string();
            lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(first),
            ]));
        } else {
            lines.push(Line::from(state.status_message.clone()));
        }

        if let Some(stand) = state.view.selected_stand() {
            let favorite = state.lists.store().is_favorite(&stand.label);
            lines.push(Line::from(vec![
                Span::styled(
                    if favorite { "★ " } else { "  " },
                    Style::default().fg(theme.favorite),
                ),
                Span::styled(stand.label.clone(), Style::default().fg(theme.accent)),
                Span::raw("  "),
                Span::styled(stand.info.title.clone(), Style::default().fg(theme.text)),
            ]));
        } else {
            lines.push(Line::from(""));
        }

        let mut list_line = match state.lists.state() {
            ActiveList::Active(name) => vec![
                Span::styled("List: ", Style::default().fg(theme.primary)),
                Span::styled(name, Style::default().fg(theme.text)),
                Span::styled(
                    format!(" ({} ★)", state.lists.store().active_labels().len()),
                    Style::default().fg(theme.text_muted),
                ),
            ],
            ActiveList::NoActiveList => vec![Span::styled(
                "No active list (f creates one)",
                Style::default().fg(theme.text_muted),
            )],
        };
        if !state.print.is_available() {
            list_line.push(Span::styled(
                "  printing unavailable",
                Style::default().fg(theme.warning),
            ));
        }
        lines.push(Line::from(list_line));
        lines
    }

    /// Key hints for the current context
    fn help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let hints: &[(&str, &str)] = match state.active_popup {
            Some(PopupType::StandDetails) => &[("f", "Favorite"), ("Tab", "Next"), ("Esc", "Close")],
            Some(PopupType::ListManager) => {
                &[("n", "New"), ("d", "Delete"), ("Enter", "Activate"), ("Esc", "Close")]
            }
            Some(PopupType::LinkInput) => &[("Enter", "Open"), ("Esc", "Cancel")],
            Some(PopupType::Help) => &[("↑/↓", "Scroll"), ("Esc", "Close")],
            None => &[
                ("Tab", "Stands"),
                ("f", "Favorite"),
                ("[/]", "Hall"),
                ("L", "Lists"),
                ("s", "Share"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*action, Style::default().fg(theme.text_muted)));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::app;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_content_shows_selection_and_list() {
        let mut state = app();
        state.view.select_label("1.A2");
        state.lists.toggle("1.A2").unwrap();

        let lines = StatusBar::content_lines(&state, &Theme::dark());
        assert_eq!(text(&lines[1]), "★ 1.A2  Globex");
        assert!(text(&lines[2]).starts_with("List: "));
        assert!(text(&lines[2]).contains("(1 ★)"));
        assert!(text(&lines[2]).ends_with("printing unavailable"));
    }

    #[test]
    fn test_error_takes_first_line() {
        let mut state = app();
        state.set_error("Failed to load hall 3:\nmissing file");
        let lines = StatusBar::content_lines(&state, &Theme::dark());
        assert_eq!(text(&lines[0]), "ERROR: Failed to load hall 3:");
    }
}
