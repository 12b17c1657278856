//! `print` command: writes a hall snapshot without opening the viewer.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::cli::common::{CliContext, CliError, CliResult};
use crate::models::HallId;
use crate::print::{PageSize, PrintAdapter, PrintScene, SnapshotFactory};
use crate::tui::MapScene;
use crate::view::{MapView, ViewNotice};

/// Print a hall to a text snapshot
#[derive(Debug, Clone, Args)]
pub struct PrintArgs {
    /// Hall identifier
    #[arg(long, value_name = "ID")]
    pub hall: HallId,

    /// Output file (defaults to a timestamped file in the snapshot directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Favorites list to highlight (defaults to the first list)
    #[arg(short, long, value_name = "NAME")]
    pub list: Option<String>,

    /// Page width in cells
    #[arg(long, default_value_t = PageSize::default().width)]
    pub width: u16,

    /// Page height in cells
    #[arg(long, default_value_t = PageSize::default().height)]
    pub height: u16,
}

impl PrintArgs {
    /// Execute the print command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CliError::validation("Page size must be at least 1x1"));
        }

        let mut view = MapView::new(ctx.data_source(), ctx.config.viewer.coordinate_policy);
        view.start(Some(self.hall));
        for notice in view.wait() {
            match notice {
                ViewNotice::IndexFailed(error) => {
                    return Err(CliError::io(format!("Failed to load hall index: {error}")));
                }
                ViewNotice::HallFailed { hall, error } if hall == self.hall => {
                    return Err(CliError::io(format!("Failed to load hall {hall}: {error}")));
                }
                _ => {}
            }
        }
        let Some(info) = view.selected_hall().filter(|h| h.id == self.hall).cloned() else {
            return Err(CliError::validation(format!("Unknown hall {}", self.hall)));
        };

        let mut lists = ctx.open_lists("")?;
        match &self.list {
            Some(name) => lists
                .select_list(name)
                .map_err(|e| CliError::validation(format!("{e:#}")))?,
            // Read-only: startup resolution would migrate or create lists
            None => match lists.store().registry().first_name().map(String::from) {
                Some(first) => lists
                    .select_list(&first)
                    .map_err(|e| CliError::io(format!("{e:#}")))?,
                None => debug!("No favorites list to highlight"),
            },
        }

        let page = PageSize {
            width: self.width,
            height: self.height,
        };
        let factory = SnapshotFactory {
            dir: ctx.config.paths.snapshot_dir.clone(),
            page,
            output: self.output.clone(),
        };
        let mut adapter = PrintAdapter::new(std::time::Duration::ZERO);
        if !adapter.mount(&factory) {
            return Err(CliError::io("Printing is unavailable, see the log for details"));
        }

        // Lay the hall out for the page before the print zoom is applied
        view.viewport.set_size(page.width, page.height);
        view.fit();

        let (viewport, stands, overlay) = view.split_mut();
        let mut scene = PrintScene {
            hall: info.id,
            hall_name: &info.name,
            viewport,
            map: MapScene {
                stands,
                overlay,
                favorites: lists.store().active_labels(),
                selected: None,
                favorites_only: false,
            },
        };
        let result = adapter.print(&mut scene);
        adapter.unmount();

        let path = result.map_err(|e| CliError::io(format!("{e:#}")))?;
        println!("{}", path.display());
        Ok(())
    }
}
