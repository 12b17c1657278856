//! Popup input handlers.

use anyhow::Result;
use crossterm::event::{self, KeyCode, KeyModifiers};

use super::actions;
use crate::tui::{AppState, PopupType};

/// Routes input to the active popup.
pub fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match state.active_popup {
        Some(PopupType::StandDetails) => handle_stand_details_input(state, key),
        Some(PopupType::ListManager) => super::handle_list_manager_input(state, key),
        Some(PopupType::LinkInput) => handle_link_input(state, key),
        Some(PopupType::Help) => handle_help_input(state, key),
        None => Ok(false),
    }
}

fn handle_stand_details_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            state.active_popup = None;
        }
        KeyCode::Char('f') => actions::toggle_selected_favorite(state),
        KeyCode::Tab => actions::cycle_stand(state, true),
        KeyCode::BackTab => actions::cycle_stand(state, false),
        _ => {}
    }
    if state.view.selected_stand().is_none() {
        state.active_popup = None;
    }
    Ok(false)
}

fn handle_link_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            state.active_popup = None;
            state.set_status("Cancelled");
        }
        KeyCode::Enter => {
            let link = state.link_input_state.input.trim().to_string();
            state.active_popup = None;
            if link.is_empty() {
                return Ok(false);
            }
            match state.lists.open_link(&link) {
                Ok(true) => {
                    let message = state.describe_active_list();
                    state.set_status(message);
                }
                Ok(false) => state.set_status("Link matches the current list"),
                Err(e) => state.set_error(format!("Failed to open link: {e:#}")),
            }
        }
        KeyCode::Backspace => {
            state.link_input_state.input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.link_input_state.clear();
        }
        KeyCode::Char(c) => state.link_input_state.input.push(c),
        _ => {}
    }
    Ok(false)
}

fn handle_help_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let help = &mut state.help_overlay_state;
    match key.code {
        KeyCode::Esc | KeyCode::Char('?' | 'q') => state.active_popup = None,
        KeyCode::Up | KeyCode::Char('k') => help.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => help.scroll_down(),
        KeyCode::PageUp => help.page_up(10),
        KeyCode::PageDown => help.page_down(10),
        KeyCode::Home => help.scroll_to_top(),
        KeyCode::End => help.scroll_to_bottom(),
        _ => {}
    }
    Ok(false)
}
