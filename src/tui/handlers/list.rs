//! List manager input handler

use anyhow::Result;
use crossterm::event::{self, KeyCode};

use crate::tui::list_manager::ManagerMode;
use crate::tui::AppState;

/// Handle input for the list manager
pub fn handle_list_manager_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let names = state.lists.list_names();

    match state.list_manager_state.mode.clone() {
        ManagerMode::Browsing => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                state.active_popup = None;
                state.set_status("List manager closed");
            }
            KeyCode::Up | KeyCode::Char('k') => {
                state.list_manager_state.select_previous(names.len());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                state.list_manager_state.select_next(names.len());
            }
            KeyCode::Enter => {
                if let Some(name) = names.get(state.list_manager_state.selected) {
                    match state.lists.select_list(name) {
                        Ok(()) => {
                            state.active_popup = None;
                            let message = state.describe_active_list();
                            state.set_status(message);
                        }
                        Err(e) => state.set_error(format!("{e:#}")),
                    }
                }
            }
            KeyCode::Char('n') => state.list_manager_state.start_creating(),
            KeyCode::Char('d') => {
                if let Some(name) = names.get(state.list_manager_state.selected) {
                    state.list_manager_state.start_deleting(name.clone());
                }
            }
            _ => {}
        },
        ManagerMode::CreatingName { .. } => match key.code {
            KeyCode::Esc => state.list_manager_state.cancel(),
            KeyCode::Enter => {
                let input = state.list_manager_state.input().unwrap_or_default().to_string();
                match state.lists.create_list(&input) {
                    Ok(name) => {
                        let names = state.lists.list_names();
                        let index = names.iter().position(|n| *n == name).unwrap_or(0);
                        state.list_manager_state.reset(index);
                        state.set_status(format!("Created list '{name}'"));
                    }
                    Err(e) => state.set_error(format!("{e:#}")),
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = state.list_manager_state.input_mut() {
                    input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = state.list_manager_state.input_mut() {
                    input.push(c);
                }
            }
            _ => {}
        },
        ManagerMode::ConfirmingDelete { name } => {
            let answer = match key.code {
                KeyCode::Char('y' | 'Y') => true,
                KeyCode::Char('n' | 'N') | KeyCode::Esc => false,
                _ => return Ok(false),
            };
            match state.lists.delete_list(&name, &mut |_: &str| answer) {
                Ok(true) => {
                    let remaining = state.lists.list_names().len();
                    let selected = state.list_manager_state.selected.min(remaining.saturating_sub(1));
                    state.list_manager_state.reset(selected);
                    state.set_status(format!("Deleted list '{name}'"));
                }
                Ok(false) => {
                    state.list_manager_state.cancel();
                    state.set_status(format!("Kept list '{name}'"));
                }
                Err(e) => {
                    state.list_manager_state.cancel();
                    state.set_error(format!("{e:#}"));
                }
            }
        }
    }
    Ok(false)
}
