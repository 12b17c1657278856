//! Shared CLI plumbing: errors, exit codes and access to data and lists.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::favorites::{FileStorage, ListManager, MemoryLocation};
use crate::services::{DataSource, FsDataSource};

/// Process exit codes of the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    /// Bad arguments or unknown names
    ValidationError = 1,
    /// Files could not be read or written
    IoError = 2,
}

/// Error reported by a CLI command.
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    /// Invalid input from the user.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::ValidationError,
        }
    }

    /// Failure reading or writing data.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

pub type CliResult<T> = Result<T, CliError>;

/// Settings every command runs with.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub config: Config,
}

impl CliContext {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Hall data under the configured data directory.
    pub fn data_source(&self) -> Arc<dyn DataSource> {
        Arc::new(FsDataSource::new(&self.config.paths.data_dir))
    }

    /// Storage file holding the favorites lists.
    pub fn storage_file(&self) -> PathBuf {
        self.config.paths.storage_file.clone()
    }

    /// Opens the favorites lists as seen from `fragment`.
    ///
    /// Unlike the viewer, commands refuse to run on a corrupt storage file
    /// so that nothing is silently lost.
    pub fn open_lists(&self, fragment: &str) -> CliResult<ListManager> {
        let path = self.storage_file();
        let storage = FileStorage::open(&path).map_err(|e| {
            CliError::io(format!("Failed to open favorites storage {}: {e:#}", path.display()))
        })?;
        Ok(ListManager::open(
            Box::new(storage),
            Box::new(MemoryLocation::new(fragment)),
        ))
    }
}
