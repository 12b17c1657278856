//! Actions shared by the main view and the popups.

use crate::tui::{AppState, PopupType};

/// Toggles the selected stand in the active list.
pub fn toggle_selected_favorite(state: &mut AppState) {
    let Some(label) = state.view.selected_stand().map(|s| s.label.clone()) else {
        state.set_status("Select a stand first (Tab or click)");
        return;
    };

    match state.lists.toggle(&label) {
        Ok(added) => {
            let list = state.lists.store().active_name().unwrap_or_default().to_string();
            if added {
                state.set_status(format!("★ {label} added to {list}"));
            } else {
                state.set_status(format!("{label} removed from {list}"));
            }
        }
        Err(e) => state.set_error(format!("Failed to update favorites: {e:#}")),
    }
}

/// Copies the share link of the active list to the clipboard.
pub fn share_active_list(state: &mut AppState) {
    let base = state.config.viewer.share_base_url.clone();
    match state.lists.share(&base, state.clipboard.as_mut()) {
        Ok(url) => state.set_status(format!("Link copied: {url}")),
        Err(e) => {
            // The link is still useful when the clipboard is not
            let url = state.lists.share_url(&base);
            state.set_error(format!("{e:#}\n\nLink: {url}"));
        }
    }
}

/// Steps through fragment history.
pub fn navigate_history(state: &mut AppState, forward: bool) {
    let result = if forward {
        state.lists.forward()
    } else {
        state.lists.back()
    };
    match result {
        Ok(true) => {
            let message = state.describe_active_list();
            state.set_status(message);
        }
        Ok(false) => state.set_status(if forward {
            "Already at the newest link"
        } else {
            "Already at the oldest link"
        }),
        Err(e) => state.set_error(format!("Failed to apply link: {e:#}")),
    }
}

/// Opens the stand popup if a stand is selected.
pub fn open_stand_details(state: &mut AppState) {
    if state.view.selected_stand().is_some() {
        state.active_popup = Some(PopupType::StandDetails);
    } else {
        state.set_status("No stand selected");
    }
}

/// Moves the selection to the next visible stand.
pub fn cycle_stand(state: &mut AppState, forward: bool) {
    let favorites_only = state.view.favorites_only();
    let store = state.lists.store();
    let label = state
        .view
        .cycle_stand(forward, |stand| !favorites_only || store.is_favorite(&stand.label))
        .map(|stand| format!("{} {}", stand.label, stand.info.title));
    match label {
        Some(text) => state.set_status(text),
        None if favorites_only => state.set_status("No favorites in this hall"),
        None => state.set_status("No stands in this hall"),
    }
}
