//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod handlers;
pub mod help_overlay;
pub mod link_input;
pub mod list_manager;
pub mod map_canvas;
pub mod stand_popup;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::Config;
use crate::favorites::{ActiveList, ClipboardSink, ListManager};
use crate::print::{PrintAdapter, PrintScene};
use crate::view::{MapView, ViewNotice};

pub use help_overlay::HelpOverlayState;
pub use link_input::LinkInputState;
pub use list_manager::ListManagerState;
pub use map_canvas::MapScene;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Popup types that can be displayed over the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Exhibitor details of the selected stand
    StandDetails,
    /// Favorites list manager
    ListManager,
    /// Paste a shared link
    LinkInput,
    /// Keyboard shortcuts
    Help,
}

/// Application state - single source of truth
pub struct AppState {
    /// User configuration
    pub config: Config,
    /// Current color theme
    pub theme: Theme,
    /// Halls, stands and camera
    pub view: MapView,
    /// Named favorites lists and the URL fragment
    pub lists: ListManager,
    /// Print support
    pub print: PrintAdapter,
    /// Destination of share links
    pub clipboard: Box<dyn ClipboardSink>,

    /// Currently open popup, if any
    pub active_popup: Option<PopupType>,
    /// List manager dialog state
    pub list_manager_state: ListManagerState,
    /// Link input dialog state
    pub link_input_state: LinkInputState,
    /// Help overlay scroll state
    pub help_overlay_state: HelpOverlayState,

    /// Status line text
    pub status_message: String,
    /// Error shown in the overlay until dismissed
    pub error_message: Option<String>,
    /// Set to leave the main loop
    pub should_quit: bool,
}

impl AppState {
    /// Creates the application state. Printing stays unavailable until
    /// [`PrintAdapter::mount`] is called on `print`.
    pub fn new(
        config: Config,
        view: MapView,
        lists: ListManager,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let theme = Theme::for_mode(config.ui.theme_mode);
        let print = PrintAdapter::new(Duration::from_millis(config.viewer.print_revalidate_ms));
        let active_popup = config.ui.show_help_on_startup.then_some(PopupType::Help);
        Self {
            config,
            theme,
            view,
            lists,
            print,
            clipboard,
            active_popup,
            list_manager_state: ListManagerState::new(),
            link_input_state: LinkInputState::default(),
            help_overlay_state: HelpOverlayState::new(),
            status_message: String::new(),
            error_message: None,
            should_quit: false,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Detaches print support. Call once the main loop is over, however it
    /// ended.
    pub fn teardown(&mut self) {
        self.print.unmount();
    }

    /// Turns load notices into status and error messages.
    pub fn apply_notices(&mut self, notices: Vec<ViewNotice>) {
        for notice in notices {
            match notice {
                ViewNotice::IndexLoaded { halls } => {
                    self.set_status(format!("{halls} hall(s) available"));
                }
                ViewNotice::IndexFailed(error) => {
                    self.set_error(format!("Failed to load the hall index:\n{error}"));
                }
                ViewNotice::HallLoaded { hall, stands } => {
                    let name = self
                        .view
                        .selected_hall()
                        .map_or_else(|| format!("Hall {hall}"), |h| h.name.clone());
                    self.set_status(format!("{name}: {stands} stand(s)"));
                }
                ViewNotice::HallFailed { hall, error } => {
                    self.set_error(format!("Failed to load hall {hall}:\n{error}"));
                }
            }
        }
    }

    /// Status text describing the active list after a list change.
    pub fn describe_active_list(&self) -> String {
        match self.lists.state() {
            ActiveList::Active(name) => format!(
                "Active list: {name} ({} favorite(s))",
                self.lists.store().active_labels().len()
            ),
            ActiveList::NoActiveList => "No active list".to_string(),
        }
    }

    /// Whether the map currently shows `label`.
    pub fn is_visible(&self, label: &str) -> bool {
        !self.view.favorites_only() || self.lists.store().is_favorite(label)
    }

    /// Prints the selected hall through the mounted print control.
    pub fn print_hall(&mut self) {
        let Some(info) = self.view.selected_hall().cloned() else {
            self.set_error("No hall selected");
            return;
        };
        let selected = self.view.selected_stand().map(|s| s.label.clone());
        let favorites_only = self.view.favorites_only();
        let (viewport, stands, overlay) = self.view.split_mut();
        let mut scene = PrintScene {
            hall: info.id,
            hall_name: &info.name,
            viewport,
            map: MapScene {
                stands,
                overlay,
                favorites: self.lists.store().active_labels(),
                selected: selected.as_deref(),
                favorites_only,
            },
        };

        match self.print.print(&mut scene) {
            Ok(path) => self.set_status(format!("Printed {} to {}", info.name, path.display())),
            Err(e) => self.set_error(format!("Print failed: {e:#}")),
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        let notices = state.view.poll();
        state.apply_notices(notices);
        if state.print.tick(&mut state.view.viewport, Instant::now()) {
            debug!("Map layout re-validated after print");
        }

        // Keep the camera in sync with the terminal size
        let size = terminal.size().context("Failed to read terminal size")?;
        let map = map_area(Rect::new(0, 0, size.width, size.height));
        if state.view.viewport.needs_layout() || state.view.viewport.size() != (map.width, map.height)
        {
            state.view.viewport.set_size(map.width, map.height);
        }

        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                Event::Mouse(mouse) => handlers::handle_mouse_input(state, mouse, map)?,
                // Terminal resized, will re-render on next loop
                _ => {}
            }
        }

        // Check if should quit
        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Title bar, map and status bar areas.
fn main_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(5),    // Map
            Constraint::Length(6), // Status bar
        ])
        .split(area)
}

/// Area inside the map border, where canvas cells map to viewport cells.
#[must_use]
pub fn map_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(main_layout(area)[1])
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = main_layout(f.area());

    render_title_bar(f, chunks[0], state);
    render_map(f, chunks[1], state);
    StatusBar::render(f, chunks[2], state, &state.theme);

    // Render popup if active
    if let Some(popup_type) = state.active_popup {
        render_popup(f, popup_type, state);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with hall tabs and the active list
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let selected = state.view.selected_hall_id();

    let mut spans = vec![Span::styled(
        " HallMap ",
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
    )];
    for hall in state.view.halls() {
        let style = if Some(hall.id) == selected {
            Style::default()
                .fg(theme.accent)
                .bg(theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_secondary)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", hall.name), style));
    }
    if state.view.halls().is_empty() {
        spans.push(Span::styled(" loading halls...", Style::default().fg(theme.text_muted)));
    }

    let list = match state.lists.state() {
        ActiveList::Active(name) => format!(" ★ {name} "),
        ActiveList::NoActiveList => " no list ".to_string(),
    };

    let title_widget = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(theme.text).bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_top(Line::from(list).right_aligned())
                .style(Style::default().bg(theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Render the hall map
fn render_map(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let title = match state.view.selected_hall() {
        Some(hall) if state.view.is_loading() => format!(" {} (loading...) ", hall.name),
        Some(hall) if state.view.favorites_only() => format!(" {} (favorites only) ", hall.name),
        Some(hall) => format!(" {} ", hall.name),
        None => " Map ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(theme.background));

    let scene = MapScene {
        stands: state.view.stands(),
        overlay: state.view.overlay(),
        favorites: state.lists.store().active_labels(),
        selected: state.view.selected_stand().map(|s| s.label.as_str()),
        favorites_only: state.view.favorites_only(),
    };
    let canvas = map_canvas::map_canvas(scene, &state.view.viewport, theme, Marker::Braille, Some(block));
    f.render_widget(canvas, area);
}

/// Render active popup
fn render_popup(f: &mut Frame, popup_type: PopupType, state: &AppState) {
    match popup_type {
        PopupType::StandDetails => {
            if let Some(stand) = state.view.selected_stand() {
                stand_popup::render_stand_popup(
                    f,
                    stand,
                    state.lists.store().is_favorite(&stand.label),
                    state.lists.store().active_name(),
                    &state.theme,
                );
            }
        }
        PopupType::ListManager => {
            list_manager::render_list_manager(
                f,
                f.area(),
                &state.list_manager_state,
                &state.lists,
                &state.theme,
            );
        }
        PopupType::LinkInput => {
            link_input::render_link_input(f, &state.link_input_state, &state.theme);
        }
        PopupType::Help => {
            state.help_overlay_state.render(f, f.area(), &state.theme);
        }
    }
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 40, f.area());

    // Clear the background area first
    f.render_widget(Clear, area);

    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(1), // Help text
        ])
        .split(area);

    let title = Paragraph::new("ERROR")
        .style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Enter/Esc", Style::default().fg(theme.primary)),
        Span::raw(": Dismiss"),
    ]))
    .style(Style::default().fg(theme.text_muted).bg(theme.background))
    .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(help, chunks[2]);
}

/// Helper to create a centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events
fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::KeyCode;

    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    // Route to popup handler if popup is active
    if state.active_popup.is_some() {
        return handlers::handle_popup_input(state, key);
    }

    handlers::handle_main_input(state, key)
}


#[cfg(test)]
mod tests {
    use super::test_support::app;
    use super::*;
    use crate::view::ViewNotice;

    #[test]
    fn test_new_state_shows_first_hall() {
        let state = app();
        assert_eq!(state.active_popup, None);
        assert_eq!(state.status_message, "Hall 1: 3 stand(s)");
        assert_eq!(state.view.stands().len(), 3);
    }

    #[test]
    fn test_load_failures_become_errors() {
        let mut state = app();
        state.apply_notices(vec![ViewNotice::HallFailed {
            hall: 7,
            error: "missing file".into(),
        }]);
        assert!(state.error_message.as_deref().unwrap().contains("hall 7"));

        state.set_status("ok");
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_map_area_is_inside_borders() {
        let area = map_area(Rect::new(0, 0, 100, 40));
        assert_eq!(area, Rect::new(1, 4, 98, 29));
    }

    #[test]
    fn test_print_without_control_reports_error() {
        let mut state = app();
        state.print_hall();
        assert!(state.error_message.as_deref().unwrap().contains("Print failed"));
    }

    #[test]
    fn test_teardown_detaches_print() {
        let dir = tempfile::tempdir().unwrap();
        let factory = crate::print::SnapshotFactory::new(dir.path());
        let mut state = app();
        assert!(state.print.mount(&factory));
        assert!(state.print.is_available());

        state.teardown();
        assert!(!state.print.is_available());
        assert!(!state.print.mount(&factory), "No re-attach after teardown");
    }

    #[test]
    fn test_centered_rect() {
        let r = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(r, Rect::new(25, 10, 50, 20));
    }
}
