//! Favorites list commands.

use std::io::{self, BufRead, Write};

use clap::Args;
use serde::Serialize;

use crate::cli::common::{CliContext, CliError, CliResult};
use crate::favorites::{fragment_of, ActiveList, Confirm, ListManager, SystemClipboard};

/// Show all favorites lists
#[derive(Debug, Clone, Args)]
pub struct ListsArgs {
    /// Resolve lists as if this shared link had been opened
    #[arg(long, value_name = "URL")]
    pub link: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON response for the lists command
#[derive(Debug, Serialize)]
struct ListsResponse {
    active: Option<String>,
    lists: Vec<ListData>,
}

#[derive(Debug, Serialize)]
struct ListData {
    name: String,
    favorites: Vec<String>,
}

impl ListsArgs {
    /// Execute the lists command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let fragment = self.link.as_deref().map(fragment_of).unwrap_or_default();
        let mut lists = ctx.open_lists(fragment)?;
        let active = match resolve(&mut lists)? {
            ActiveList::Active(name) => Some(name),
            ActiveList::NoActiveList => None,
        };

        let data: Vec<ListData> = lists
            .list_names()
            .into_iter()
            .map(|name| ListData {
                favorites: lists.store().load(&name),
                name,
            })
            .collect();

        if self.json {
            let response = ListsResponse {
                active,
                lists: data,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        if data.is_empty() {
            println!("No lists");
        }
        for list in &data {
            let marker = if active.as_deref() == Some(list.name.as_str()) { "*" } else { " " };
            println!("{marker} {} ({})", list.name, list.favorites.join(", "));
        }
        Ok(())
    }
}

/// Create an empty favorites list
#[derive(Debug, Clone, Args)]
pub struct CreateListArgs {
    /// Name of the new list
    pub name: String,
}

impl CreateListArgs {
    /// Execute the create-list command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut lists = ctx.open_lists("")?;
        let name = lists
            .create_list(&self.name)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        println!("Created list '{name}'");
        Ok(())
    }
}

/// Delete a favorites list
#[derive(Debug, Clone, Args)]
pub struct DeleteListArgs {
    /// Name of the list to delete
    pub name: String,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Asks on stdin; anything but y/yes declines.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

impl DeleteListArgs {
    /// Execute the delete-list command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut lists = ctx.open_lists("")?;
        if !lists.store().registry().contains(&self.name) {
            return Err(CliError::validation(format!("No list named '{}'", self.name)));
        }

        let deleted = if self.yes {
            lists.delete_list(&self.name, &mut |_: &str| true)
        } else {
            lists.delete_list(&self.name, &mut StdinConfirm)
        }
        .map_err(|e| CliError::io(format!("{e:#}")))?;

        if deleted {
            println!("Deleted list '{}'", self.name);
        } else {
            println!("Kept list '{}'", self.name);
        }
        Ok(())
    }
}

/// Add a stand to a list, or remove it if already present
#[derive(Debug, Clone, Args)]
pub struct ToggleArgs {
    /// List to change
    #[arg(short, long, value_name = "NAME")]
    pub list: String,

    /// Stand label (e.g. 1.E211)
    pub label: String,
}

impl ToggleArgs {
    /// Execute the toggle command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut lists = ctx.open_lists("")?;
        lists
            .select_list(&self.list)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        let added = lists
            .toggle(&self.label)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        if added {
            println!("Added {} to '{}'", self.label, self.list);
        } else {
            println!("Removed {} from '{}'", self.label, self.list);
        }
        Ok(())
    }
}

/// Print the share link of a list
#[derive(Debug, Clone, Args)]
pub struct ShareArgs {
    /// List to share (defaults to the first list)
    #[arg(short, long, value_name = "NAME")]
    pub list: Option<String>,

    /// Also copy the link to the clipboard
    #[arg(long)]
    pub copy: bool,
}

impl ShareArgs {
    /// Execute the share command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let mut lists = ctx.open_lists("")?;
        match &self.list {
            Some(name) => lists
                .select_list(name)
                .map_err(|e| CliError::validation(format!("{e:#}")))?,
            None => {
                if resolve(&mut lists)? == ActiveList::NoActiveList {
                    return Err(CliError::validation("No lists to share"));
                }
            }
        }

        let base = &ctx.config.viewer.share_base_url;
        let url = if self.copy {
            lists
                .share(base, &mut SystemClipboard)
                .map_err(|e| CliError::io(format!("{e:#}")))?
        } else {
            lists.share_url(base)
        };
        println!("{url}");
        Ok(())
    }
}

fn resolve(lists: &mut ListManager) -> CliResult<ActiveList> {
    lists
        .resolve_startup()
        .map_err(|e| CliError::io(format!("Failed to resolve favorites lists: {e:#}")))
}
