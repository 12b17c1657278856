//! Map-space points and the derived stand view model.

use serde::{Deserialize, Serialize};

use super::{Company, MapElement};

/// A point in map space.
///
/// Map space flips the raster's y axis: a raster pixel `(x, y)` lives at
/// `lat = -y`, `lng = x`, so rows further down the image have smaller `lat`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    /// Vertical coordinate (negated raster row)
    pub lat: f64,
    /// Horizontal coordinate (raster column)
    pub lng: f64,
}

impl MapPoint {
    /// Creates a point from map-space coordinates.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Converts a raster pixel position into map space.
    #[must_use]
    pub fn from_raster(x: f64, y: f64) -> Self {
        Self { lat: -y, lng: x }
    }
}

impl From<(f64, f64)> for MapPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned bounds in map space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    /// Corner with the smallest lat/lng
    pub south_west: MapPoint,
    /// Corner with the largest lat/lng
    pub north_east: MapPoint,
}

impl MapBounds {
    /// Bounds of a raster image of the given size, anchored at the origin.
    #[must_use]
    pub fn for_raster(width: f64, height: f64) -> Self {
        Self {
            south_west: MapPoint::new(-height, 0.0),
            north_east: MapPoint::new(0.0, width),
        }
    }

    /// Smallest bounds containing all points, or `None` for an empty slice.
    #[must_use]
    pub fn enclosing(points: &[MapPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            south_west: *first,
            north_east: *first,
        };
        for p in &points[1..] {
            bounds.south_west.lat = bounds.south_west.lat.min(p.lat);
            bounds.south_west.lng = bounds.south_west.lng.min(p.lng);
            bounds.north_east.lat = bounds.north_east.lat.max(p.lat);
            bounds.north_east.lng = bounds.north_east.lng.max(p.lng);
        }
        Some(bounds)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> MapPoint {
        MapPoint::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.north_east.lng - self.south_west.lng
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.north_east.lat - self.south_west.lat
    }
}

/// Merged exhibitor information shown in a stand's popup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitorInfo {
    /// Joined company names, or the element's own name
    pub title: String,
    /// Joined company descriptions
    pub description: String,
    /// First website found among the matching companies
    pub website: Option<String>,
    /// Booths of the first matching company
    pub siblings: Vec<String>,
    /// Number of companies that matched the booth
    pub match_count: usize,
}

/// A booth as displayed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stand {
    /// Booth label, unique within a hall
    pub label: String,
    /// Outline in map space, at least one point
    pub points: Vec<MapPoint>,
    /// Exhibitor information
    pub info: ExhibitorInfo,
}

impl Stand {
    /// Bounds of the outline.
    #[must_use]
    pub fn bounds(&self) -> Option<MapBounds> {
        MapBounds::enclosing(&self.points)
    }
}

/// Per-hall data file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HallData {
    /// Booths and structural shapes of the hall
    #[serde(default)]
    pub map_elements: Vec<MapElement>,
    /// Exhibitor directory for the hall
    #[serde(default)]
    pub companies: Vec<Company>,
}
