//! List manager for browsing, creating, selecting and deleting favorites lists.
//!
//! Accessible via the `L` shortcut.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use super::Theme;
use crate::favorites::ListManager;

/// Manager mode - determines what operation is being performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerMode {
    /// Browsing lists (default mode)
    Browsing,
    /// Creating a new list (entering name)
    CreatingName {
        /// User input for list name
        input: String,
    },
    /// Confirming deletion
    ConfirmingDelete {
        /// Name of the list to delete
        name: String,
    },
}

/// State for the list manager dialog
#[derive(Debug, Clone)]
pub struct ListManagerState {
    /// Currently selected row
    pub selected: usize,
    /// Current operation mode
    pub mode: ManagerMode,
}

impl ListManagerState {
    /// Create a new list manager state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: 0,
            mode: ManagerMode::Browsing,
        }
    }

    /// Reset to browsing with `selected` highlighted
    pub fn reset(&mut self, selected: usize) {
        self.selected = selected;
        self.mode = ManagerMode::Browsing;
    }

    /// Move selection up
    pub const fn select_previous(&mut self, count: usize) {
        if count > 0 {
            if self.selected > 0 {
                self.selected -= 1;
            } else {
                self.selected = count - 1;
            }
        }
    }

    /// Move selection down
    pub const fn select_next(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    /// Start creating a new list
    pub fn start_creating(&mut self) {
        self.mode = ManagerMode::CreatingName {
            input: String::new(),
        };
    }

    /// Start confirming deletion of `name`
    pub fn start_deleting(&mut self, name: String) {
        self.mode = ManagerMode::ConfirmingDelete { name };
    }

    /// Cancel current operation and return to browsing
    pub fn cancel(&mut self) {
        self.mode = ManagerMode::Browsing;
    }

    #[must_use]
    pub const fn is_browsing(&self) -> bool {
        matches!(self.mode, ManagerMode::Browsing)
    }

    /// Name being typed, if any
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        match &self.mode {
            ManagerMode::CreatingName { input } => Some(input),
            _ => None,
        }
    }

    pub const fn input_mut(&mut self) -> Option<&mut String> {
        match &mut self.mode {
            ManagerMode::CreatingName { input } => Some(input),
            _ => None,
        }
    }
}

impl Default for ListManagerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the list manager dialog
pub fn render_list_manager(
    f: &mut Frame,
    area: Rect,
    state: &ListManagerState,
    lists: &ListManager,
    theme: &Theme,
) {
    let dialog_area = super::centered_rect(60, 70, area);

    // Clear the background area first
    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Favorites Lists (L) ")
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(theme.background));
    f.render_widget(block, dialog_area);

    let inner_area = Rect {
        x: dialog_area.x + 2,
        y: dialog_area.y + 1,
        width: dialog_area.width.saturating_sub(4),
        height: dialog_area.height.saturating_sub(2),
    };

    match &state.mode {
        ManagerMode::Browsing => render_lists(f, inner_area, state, lists, theme),
        ManagerMode::CreatingName { input } => {
            render_name_input(f, inner_area, input, theme);
        }
        ManagerMode::ConfirmingDelete { name } => {
            let count = lists.store().load(name).len();
            render_delete_confirmation(f, inner_area, name, count, theme);
        }
    }
}

fn render_lists(
    f: &mut Frame,
    area: Rect,
    state: &ListManagerState,
    lists: &ListManager,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4)])
        .split(area);

    let active = lists.store().active_name();
    let names = lists.list_names();
    let items: Vec<ListItem> = if names.is_empty() {
        vec![ListItem::new(Span::styled(
            "No lists yet. Press n to create one.",
            Style::default().fg(theme.text_muted),
        ))]
    } else {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if i == state.selected {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                let marker = if active == Some(name.as_str()) {
                    Span::styled("● ", Style::default().fg(theme.success))
                } else {
                    Span::raw("  ")
                };
                let count = lists.store().load(name).len();
                ListItem::new(Line::from(vec![
                    marker,
                    Span::styled(name.as_str(), style),
                    Span::styled(format!("  ({count} ★)"), Style::default().fg(theme.text_muted)),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Lists"));
    f.render_widget(list, chunks[0]);

    let help_text = vec![
        Line::from(vec![
            Span::styled("n", Style::default().fg(theme.primary)),
            Span::raw(": New  "),
            Span::styled("d", Style::default().fg(theme.primary)),
            Span::raw(": Delete  "),
            Span::styled("Enter", Style::default().fg(theme.primary)),
            Span::raw(": Make active"),
        ]),
        Line::from(vec![
            Span::styled("↑/↓", Style::default().fg(theme.primary)),
            Span::raw(": Navigate  "),
            Span::styled("Esc", Style::default().fg(theme.primary)),
            Span::raw(": Close"),
        ]),
    ];
    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Left);
    f.render_widget(help, chunks[1]);
}

fn render_name_input(f: &mut Frame, area: Rect, input: &str, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Prompt
            Constraint::Length(3), // Input
            Constraint::Min(1),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(area);

    let prompt = Paragraph::new("Enter list name:")
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text));
    f.render_widget(prompt, chunks[0]);

    let input_text = Paragraph::new(format!("{input}█"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("New List")
                .style(Style::default().fg(theme.primary)),
        )
        .style(Style::default().fg(theme.text));
    f.render_widget(input_text, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(theme.primary)),
        Span::raw(": Confirm  "),
        Span::styled("Esc", Style::default().fg(theme.primary)),
        Span::raw(": Cancel"),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().fg(theme.text_muted));
    f.render_widget(help, chunks[3]);
}

fn render_delete_confirmation(f: &mut Frame, area: Rect, name: &str, count: usize, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Warning
            Constraint::Length(2), // List info
            Constraint::Min(1),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(area);

    let warning = Paragraph::new(format!("Delete list '{name}'?"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD));
    f.render_widget(warning, chunks[0]);

    let info = Paragraph::new(format!("{count} favorite(s) will be lost"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text));
    f.render_widget(info, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("y", Style::default().fg(theme.primary)),
        Span::raw(": Yes, delete  "),
        Span::styled("n/Esc", Style::default().fg(theme.primary)),
        Span::raw(": No, cancel"),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().fg(theme.text_muted));
    f.render_widget(help, chunks[3]);
}
