//! Access to the hall index, per-hall data and raster paths.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::constants::{HALL_DATA_DIR, HALL_IMAGE_DIR, HALL_INDEX_FILE};
use crate::models::{HallData, HallId, HallIndex};

/// Source of hall map data.
///
/// Implementations must be shareable with the background loader thread.
pub trait DataSource: Send + Sync {
    /// Loads the hall index.
    fn fetch_index(&self) -> Result<HallIndex>;

    /// Loads map elements and companies for one hall.
    fn fetch_hall(&self, hall: HallId) -> Result<HallData>;

    /// Location of the hall's raster image.
    fn image_path(&self, hall: HallId) -> PathBuf;
}

/// Data directory laid out as:
///
/// ```text
/// <root>/maps.json
/// <root>/maps/<id>.json
/// <root>/images/<id>.png
/// ```
#[derive(Debug, Clone)]
pub struct FsDataSource {
    root: PathBuf,
}

impl FsDataSource {
    /// Creates a data source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the data source.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the hall index file.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.root.join(HALL_INDEX_FILE)
    }

    /// Path of one hall's data file.
    #[must_use]
    pub fn hall_path(&self, hall: HallId) -> PathBuf {
        self.root.join(HALL_DATA_DIR).join(format!("{hall}.json"))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

impl DataSource for FsDataSource {
    fn fetch_index(&self) -> Result<HallIndex> {
        read_json(&self.index_path())
    }

    fn fetch_hall(&self, hall: HallId) -> Result<HallData> {
        read_json(&self.hall_path(hall))
    }

    fn image_path(&self, hall: HallId) -> PathBuf {
        self.root.join(HALL_IMAGE_DIR).join(format!("{hall}.png"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_layout() {
        let source = FsDataSource::new("/data");
        assert_eq!(source.index_path(), PathBuf::from("/data/maps.json"));
        assert_eq!(source.hall_path(3), PathBuf::from("/data/maps/3.json"));
        assert_eq!(source.image_path(3), PathBuf::from("/data/images/3.png"));
    }

    #[test]
    fn test_fetch_index_and_hall() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("maps.json"),
            r#"{"maps":[{"id":1,"width":10,"height":10,"name":"Hall 1"}]}"#,
        )
        .unwrap();
        fs::create_dir(temp.path().join("maps")).unwrap();
        fs::write(
            temp.path().join("maps/1.json"),
            r#"{"mapElements":[],"companies":[{"name":"Acme"}]}"#,
        )
        .unwrap();

        let source = FsDataSource::new(temp.path());
        assert_eq!(source.fetch_index().unwrap().maps[0].name, "Hall 1");
        assert_eq!(source.fetch_hall(1).unwrap().companies[0].name, "Acme");

        let err = source.fetch_hall(2).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read"));
    }

    #[test]
    fn test_fetch_reports_parse_errors() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("maps.json"), "{not json").unwrap();
        let err = FsDataSource::new(temp.path()).fetch_index().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse"));
    }
}
