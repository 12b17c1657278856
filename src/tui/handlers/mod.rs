//! Input handler modules for different TUI contexts.

pub mod actions;
pub mod list;
pub mod main;
pub mod popups;

// Re-export handler functions
pub use list::handle_list_manager_input;
pub use main::{handle_main_input, handle_mouse_input};
pub use popups::handle_popup_input;
