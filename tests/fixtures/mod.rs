//! Shared test fixtures for E2E and integration tests.
//!
//! Builds a small exhibition on disk: two halls of three booths each, with
//! a company spread over two booths of hall 1.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use hallmap::config::Config;
use serde_json::{json, Value};
use tempfile::TempDir;

/// A data directory, storage file and config file inside one temp dir.
pub struct Exhibition {
    pub temp_dir: TempDir,
    pub data_dir: PathBuf,
    pub storage_file: PathBuf,
    pub snapshot_dir: PathBuf,
    pub config_file: PathBuf,
}

impl Exhibition {
    /// Global CLI arguments pointing at this exhibition.
    pub fn global_args(&self) -> Vec<String> {
        vec![
            "--config".to_string(),
            self.config_file.display().to_string(),
            "--data-dir".to_string(),
            self.data_dir.display().to_string(),
            "--storage".to_string(),
            self.storage_file.display().to_string(),
        ]
    }

    /// Raw contents of the storage file, if it was written.
    pub fn storage_json(&self) -> Option<Value> {
        let content = fs::read_to_string(&self.storage_file).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Seeds the storage file with raw key-value entries.
    pub fn seed_storage(&self, entries: &[(&str, &str)]) {
        let map: serde_json::Map<String, Value> = entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
            .collect();
        fs::write(&self.storage_file, serde_json::to_string_pretty(&map).unwrap()).unwrap();
    }
}

/// Map elements of one hall: booths `{hall}.A1`..`{hall}.A3` side by side
/// plus a wall.
pub fn hall_elements(hall: u32) -> Value {
    let id = u64::from(hall) * 100;
    json!([
        { "ID": id + 1, "MAPID": hall, "X": 0, "Y": 0, "W": 80, "H": 100, "TYPE": 0, "STANDID": format!("{hall}.A1") },
        { "ID": id + 2, "MAPID": hall, "X": "100", "Y": "0", "W": "80", "H": "100", "TYPE": "0", "STANDID": format!("{hall}.A2") },
        {
            "ID": id + 3, "MAPID": hall, "X": 0, "Y": 0, "W": 0, "H": 0, "TYPE": 0,
            "STANDID": format!("{hall}.A3"),
            "XCOORDS": "200|280|280|200", "YCOORDS": "0|0|100|100"
        },
        { "ID": id + 4, "MAPID": hall, "X": 0, "Y": 0, "W": 300, "H": 1, "TYPE": 1, "NAME": "Wall" }
    ])
}

/// Companies of hall 1.
pub fn hall_one_companies() -> Value {
    json!([
        {
            "id": "acme",
            "name": "Acme",
            "description": "Rockets and anvils",
            "website": "https://acme.example",
            "booths": ["A1", "A3"]
        },
        { "id": "globex", "name": "Globex", "booths": ["A2"] }
    ])
}

/// Writes `maps.json` and one data file per hall into `data_dir`.
pub fn write_data_dir(data_dir: &Path) {
    fs::create_dir_all(data_dir.join("maps")).unwrap();
    fs::create_dir_all(data_dir.join("images")).unwrap();

    let index = json!({
        "maps": [
            { "id": 1, "width": 300, "height": 100, "name": "Hall 1" },
            { "id": 2, "width": 300, "height": 100, "name": "Hall 2", "floor": "1" }
        ]
    });
    fs::write(data_dir.join("maps.json"), index.to_string()).unwrap();

    let hall_one = json!({ "mapElements": hall_elements(1), "companies": hall_one_companies() });
    fs::write(data_dir.join("maps").join("1.json"), hall_one.to_string()).unwrap();

    let hall_two = json!({ "mapElements": hall_elements(2), "companies": [] });
    fs::write(data_dir.join("maps").join("2.json"), hall_two.to_string()).unwrap();
}

/// Creates a complete exhibition with a config file pointing at it.
///
/// # Returns
///
/// The exhibition; its temp dir is removed when it is dropped.
pub fn create_exhibition() -> Exhibition {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let data_dir = root.join("data");
    write_data_dir(&data_dir);

    let storage_file = root.join("favorites.json");
    let snapshot_dir = root.join("snapshots");
    let config_file = root.join("config.toml");

    let mut config = Config::default();
    config.paths.data_dir.clone_from(&data_dir);
    config.paths.storage_file.clone_from(&storage_file);
    config.paths.snapshot_dir.clone_from(&snapshot_dir);
    config.viewer.share_base_url = "https://halls.example.org/".to_string();
    config.save_to(&config_file).expect("Failed to write config");

    Exhibition {
        temp_dir,
        data_dir,
        storage_file,
        snapshot_dir,
        config_file,
    }
}
