//! Main map input handler.

use anyhow::Result;
use crossterm::event::{self, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use super::actions;
use crate::tui::{AppState, PopupType};

/// Cells moved per pan key press.
const PAN_COLUMNS: f64 = 4.0;
const PAN_ROWS: f64 = 2.0;

/// Zoom levels per key press or scroll step.
const ZOOM_STEP: f64 = 0.5;

/// Handle input for the map
pub fn handle_main_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        match key.code {
            KeyCode::Left => actions::navigate_history(state, false),
            KeyCode::Right => actions::navigate_history(state, true),
            _ => {}
        }
        return Ok(false);
    }

    let viewport = &mut state.view.viewport;
    match key.code {
        KeyCode::Char('q') => return Ok(true),

        KeyCode::Left | KeyCode::Char('h') => viewport.pan(-PAN_COLUMNS, 0.0),
        KeyCode::Right | KeyCode::Char('l') => viewport.pan(PAN_COLUMNS, 0.0),
        KeyCode::Up | KeyCode::Char('k') => viewport.pan(0.0, -PAN_ROWS),
        KeyCode::Down | KeyCode::Char('j') => viewport.pan(0.0, PAN_ROWS),
        KeyCode::Char('+' | '=') => viewport.zoom_by(ZOOM_STEP),
        KeyCode::Char('-') => viewport.zoom_by(-ZOOM_STEP),
        KeyCode::Char('0') => state.view.fit(),

        KeyCode::Tab => actions::cycle_stand(state, true),
        KeyCode::BackTab => actions::cycle_stand(state, false),
        KeyCode::Enter => actions::open_stand_details(state),
        KeyCode::Esc => state.view.clear_selection(),

        KeyCode::Char('f') => actions::toggle_selected_favorite(state),
        KeyCode::Char('F') => {
            let enabled = !state.view.favorites_only();
            state.view.set_favorites_only(enabled);
            if let Some(label) = state.view.selected_stand().map(|s| s.label.clone()) {
                if !state.is_visible(&label) {
                    state.view.clear_selection();
                }
            }
            state.set_status(if enabled {
                "Showing favorites only"
            } else {
                "Showing all stands"
            });
        }

        KeyCode::Char('[') => {
            if let Err(e) = state.view.cycle_hall(false) {
                state.set_error(format!("{e:#}"));
            }
        }
        KeyCode::Char(']') => {
            if let Err(e) = state.view.cycle_hall(true) {
                state.set_error(format!("{e:#}"));
            }
        }

        KeyCode::Char('L') => {
            let names = state.lists.list_names();
            let current = state
                .lists
                .store()
                .active_name()
                .and_then(|active| names.iter().position(|n| n == active))
                .unwrap_or(0);
            state.list_manager_state.reset(current);
            state.active_popup = Some(PopupType::ListManager);
        }
        KeyCode::Char('s') => actions::share_active_list(state),
        KeyCode::Char('o') => {
            state.link_input_state.clear();
            state.active_popup = Some(PopupType::LinkInput);
        }
        KeyCode::Char('p') => state.print_hall(),
        KeyCode::Char('?') => {
            state.help_overlay_state.scroll_to_top();
            state.active_popup = Some(PopupType::Help);
        }
        _ => {}
    }
    Ok(false)
}

/// Handle mouse input; `map` is the canvas area of the last layout.
pub fn handle_mouse_input(state: &mut AppState, mouse: MouseEvent, map: Rect) -> Result<()> {
    if state.error_message.is_some() || state.active_popup.is_some() {
        return Ok(());
    }
    if !map.contains(Position::new(mouse.column, mouse.row)) {
        return Ok(());
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let column = mouse.column - map.x;
            let row = mouse.row - map.y;
            let label = state
                .view
                .select_at_cell(column, row)
                .map(|stand| stand.label.clone());
            match label {
                Some(label) if state.is_visible(&label) => {
                    state.active_popup = Some(PopupType::StandDetails);
                }
                Some(_) => state.view.clear_selection(),
                None => {}
            }
        }
        MouseEventKind::ScrollUp => state.view.viewport.zoom_by(ZOOM_STEP),
        MouseEventKind::ScrollDown => state.view.viewport.zoom_by(-ZOOM_STEP),
        _ => {}
    }
    Ok(())
}
