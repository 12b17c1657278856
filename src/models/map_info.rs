//! Hall metadata from the hall index file.

use serde::{Deserialize, Serialize};

/// Identifier of one exhibition hall (one map).
pub type HallId = u32;

/// Metadata for one hall as listed in `maps.json`.
///
/// Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapInfo {
    /// Hall identifier, also used in data and image paths
    pub id: HallId,
    /// Raster width in pixels
    pub width: f64,
    /// Raster height in pixels
    pub height: f64,
    /// Display name (e.g. "Hall 3")
    pub name: String,
    /// Parent map identifier (venue), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<HallId>,
    /// Floor label, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
}

impl MapInfo {
    /// Creates hall metadata without parent or floor.
    #[must_use]
    pub fn new(id: HallId, name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id,
            width,
            height,
            name: name.into(),
            parent_id: None,
            floor: None,
        }
    }
}

/// Contents of the hall index file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HallIndex {
    /// All halls, in display order
    #[serde(default)]
    pub maps: Vec<MapInfo>,
}

impl HallIndex {
    /// Looks up a hall by id.
    #[must_use]
    pub fn get(&self, id: HallId) -> Option<&MapInfo> {
        self.maps.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hall_index() {
        let json = r#"{"maps":[
            {"id":1,"width":4000,"height":2000,"name":"Hall 1","parentId":100,"floor":"EG"},
            {"id":2,"width":1000,"height":1000,"name":"Hall 2"}
        ]}"#;
        let index: HallIndex = serde_json::from_str(json).unwrap();

        assert_eq!(index.maps.len(), 2);
        assert_eq!(index.maps[0].parent_id, Some(100));
        assert_eq!(index.maps[0].floor.as_deref(), Some("EG"));
        assert!(index.maps[1].floor.is_none());
        assert_eq!(index.get(2).map(|m| m.name.as_str()), Some("Hall 2"));
        assert!(index.get(3).is_none());
    }

    #[test]
    fn test_missing_maps_is_empty() {
        let index: HallIndex = serde_json::from_str("{}").unwrap();
        assert!(index.maps.is_empty());
    }
}
