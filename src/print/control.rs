//! Print controls and the factory that provides them.
//!
//! A control renders the current map and reports the start and end of each
//! print job to a [`PrintLifecycle`] listener, which may move the camera in
//! between.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::widgets::Widget;
use tracing::{debug, info};

use crate::models::HallId;
use crate::tui::map_canvas::{map_canvas, MapScene};
use crate::tui::theme::Theme;
use crate::view::MapViewport;

/// The map as it is handed to a print job.
pub struct PrintScene<'a> {
    pub hall: HallId,
    pub hall_name: &'a str,
    pub viewport: &'a mut MapViewport,
    pub map: MapScene<'a>,
}

/// Observer of print jobs.
pub trait PrintLifecycle {
    /// Called before the map is rendered for printing.
    fn print_start(&mut self, scene: &mut PrintScene<'_>);

    /// Called after the print job finished, successfully or not.
    fn print_finish(&mut self, scene: &mut PrintScene<'_>);
}

/// Something that can print the map.
pub trait PrintControl {
    /// Adds the control to the map.
    fn attach(&mut self) -> Result<()>;

    /// Removes the control from the map.
    fn detach(&mut self) -> Result<()>;

    /// Prints `scene`, notifying `lifecycle` around the render.
    ///
    /// Returns where the output went.
    fn print(
        &mut self,
        scene: &mut PrintScene<'_>,
        lifecycle: &mut dyn PrintLifecycle,
    ) -> Result<PathBuf>;
}

/// Provides the print control at mount time.
pub trait PrintControlFactory {
    fn create(&self) -> Result<Box<dyn PrintControl>>;
}

/// Page size of a snapshot, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize {
    pub width: u16,
    pub height: u16,
}

impl Default for PageSize {
    fn default() -> Self {
        Self {
            width: 160,
            height: 60,
        }
    }
}

/// Prints the map as a text snapshot file.
#[derive(Debug)]
pub struct SnapshotControl {
    dir: PathBuf,
    page: PageSize,
    output: Option<PathBuf>,
    attached: bool,
}

impl SnapshotControl {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, page: PageSize) -> Self {
        Self {
            dir: dir.into(),
            page,
            output: None,
            attached: false,
        }
    }

    /// Writes to exactly `path` instead of a generated file name.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    fn output_path(&self, hall_name: &str) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        let stem: String = hall_name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        let timestamp = Local::now().format("%Y%m%d-%H%M%S");
        self.dir.join(format!("{stem}_{timestamp}.txt"))
    }
}

/// Renders `scene` into plain text, one line per row.
#[must_use]
pub fn render_text(scene: &PrintScene<'_>, theme: &Theme) -> String {
    let (width, height) = scene.viewport.size();
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    map_canvas(scene.map, &*scene.viewport, theme, Marker::Braille, None).render(area, &mut buffer);

    let mut text = String::new();
    for y in 0..height {
        let row: String = (0..width)
            .filter_map(|x| buffer.cell((x, y)).map(|cell| cell.symbol().to_string()))
            .collect();
        text.push_str(row.trim_end());
        text.push('\n');
    }
    text
}

impl PrintControl for SnapshotControl {
    fn attach(&mut self) -> Result<()> {
        if self.output.is_none() {
            fs::create_dir_all(&self.dir).with_context(|| {
                format!("Failed to create snapshot directory: {}", self.dir.display())
            })?;
        }
        self.attached = true;
        Ok(())
    }

    fn detach(&mut self) -> Result<()> {
        self.attached = false;
        Ok(())
    }

    fn print(
        &mut self,
        scene: &mut PrintScene<'_>,
        lifecycle: &mut dyn PrintLifecycle,
    ) -> Result<PathBuf> {
        if !self.attached {
            anyhow::bail!("Print control is not attached");
        }

        let screen_size = scene.viewport.size();
        scene.viewport.set_size(self.page.width, self.page.height);
        lifecycle.print_start(scene);

        let mut content = format!("{}\n\n", scene.hall_name);
        content.push_str(&render_text(scene, &Theme::dark()));
        if !scene.map.favorites.is_empty() {
            content.push_str("\n★ ");
            content.push_str(&scene.map.favorites.join(", "));
            content.push('\n');
        }

        let path = self.output_path(scene.hall_name);
        let written = fs::write(&path, content)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()));

        lifecycle.print_finish(scene);
        scene.viewport.set_size(screen_size.0, screen_size.1);
        written?;

        info!("Printed hall {} to {}", scene.hall, path.display());
        Ok(path)
    }
}

/// Creates [`SnapshotControl`]s.
#[derive(Debug, Clone)]
pub struct SnapshotFactory {
    pub dir: PathBuf,
    pub page: PageSize,
    pub output: Option<PathBuf>,
}

impl SnapshotFactory {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            page: PageSize::default(),
            output: None,
        }
    }
}

impl PrintControlFactory for SnapshotFactory {
    fn create(&self) -> Result<Box<dyn PrintControl>> {
        debug!("Creating snapshot print control in {}", self.dir.display());
        let mut control = SnapshotControl::new(&self.dir, self.page);
        if let Some(output) = &self.output {
            control = control.with_output(output);
        }
        Ok(Box::new(control))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExhibitorInfo, MapPoint, Stand};
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(&'static str, (u16, u16))>,
    }

    impl PrintLifecycle for Recorder {
        fn print_start(&mut self, scene: &mut PrintScene<'_>) {
            self.events.push(("start", scene.viewport.size()));
        }

        fn print_finish(&mut self, scene: &mut PrintScene<'_>) {
            self.events.push(("finish", scene.viewport.size()));
        }
    }

    fn booth() -> Vec<Stand> {
        vec![Stand {
            label: "3.C4".to_string(),
            points: vec![
                MapPoint::new(0.0, 0.0),
                MapPoint::new(0.0, 300.0),
                MapPoint::new(-200.0, 300.0),
                MapPoint::new(-200.0, 0.0),
            ],
            info: ExhibitorInfo::default(),
        }]
    }

    #[test]
    fn test_snapshot_writes_file_between_lifecycle_events() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("snaps");
        let mut control = SnapshotFactory::new(&dir).create().unwrap();
        control.attach().unwrap();

        let stands = booth();
        let favorites = vec!["3.C4".to_string()];
        let mut viewport = MapViewport::new(80, 24);
        viewport.set_view(MapPoint::new(-100.0, 150.0), 0.0);
        let mut scene = PrintScene {
            hall: 3,
            hall_name: "Hall 3",
            viewport: &mut viewport,
            map: MapScene {
                stands: &stands,
                overlay: None,
                favorites: &favorites,
                selected: None,
                favorites_only: false,
            },
        };

        let mut recorder = Recorder::default();
        let path = control.print(&mut scene, &mut recorder).unwrap();

        let page = PageSize::default();
        assert_eq!(
            recorder.events,
            vec![("start", (page.width, page.height)), ("finish", (page.width, page.height))]
        );
        assert_eq!(viewport.size(), (80, 24));

        assert!(path.starts_with(&dir));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("Hall_3_"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Hall 3\n"));
        assert!(content.contains("★C4"));
        assert!(content.contains("★ 3.C4"));
    }

    #[test]
    fn test_print_requires_attach() {
        let temp = TempDir::new().unwrap();
        let mut control = SnapshotControl::new(temp.path(), PageSize::default());
        let mut viewport = MapViewport::default();
        let mut scene = PrintScene {
            hall: 1,
            hall_name: "Hall 1",
            viewport: &mut viewport,
            map: MapScene {
                stands: &[],
                overlay: None,
                favorites: &[],
                selected: None,
                favorites_only: false,
            },
        };
        assert!(control.print(&mut scene, &mut Recorder::default()).is_err());
    }

    #[test]
    fn test_explicit_output_path() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.txt");
        let mut control = SnapshotControl::new(temp.path().join("unused"), PageSize { width: 20, height: 5 })
            .with_output(&output);
        control.attach().unwrap();
        assert!(!temp.path().join("unused").exists());

        let mut viewport = MapViewport::default();
        let mut scene = PrintScene {
            hall: 1,
            hall_name: "Hall 1",
            viewport: &mut viewport,
            map: MapScene {
                stands: &[],
                overlay: None,
                favorites: &[],
                selected: None,
                favorites_only: false,
            },
        };
        let path = control.print(&mut scene, &mut Recorder::default()).unwrap();
        assert_eq!(path, output);
        assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 2 + 5);
    }
}
