//! HallMap Library
//!
//! Floor plans of exhibition halls with exhibitor lookup and named,
//! shareable favorites lists. The library holds the data model, loading,
//! favorites management, printing and the terminal viewer; the binary adds
//! the command line.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod favorites;
pub mod models;
pub mod print;
pub mod services;
pub mod tui;
pub mod view;
