//! CLI command handlers for HallMap.
//!
//! Headless, scriptable access to the hall data and the favorites lists.

pub mod common;
pub mod halls;
pub mod lists;
pub mod print;

// Re-export types used by main.rs and tests
pub use common::{CliContext, CliError, CliResult, ExitCode};
pub use halls::{HallsArgs, StandsArgs};
pub use lists::{CreateListArgs, DeleteListArgs, ListsArgs, ShareArgs, ToggleArgs};
pub use print::PrintArgs;
