//! Zoomable, pannable window onto map space.
//!
//! Zoom works on a base-2 scale: at zoom 0 one terminal column covers
//! [`UNITS_PER_COLUMN`] map units and one row covers [`UNITS_PER_ROW`]
//! (cells are roughly twice as tall as wide). Each zoom level halves or
//! doubles that. Levels may be fractional.

use std::path::PathBuf;

use crate::models::{MapBounds, MapPoint};

/// Map units per column at zoom 0.
pub const UNITS_PER_COLUMN: f64 = 8.0;

/// Map units per row at zoom 0.
pub const UNITS_PER_ROW: f64 = 16.0;

/// Most zoomed-out level.
pub const MIN_ZOOM: f64 = -10.0;

/// Most zoomed-in level.
pub const MAX_ZOOM: f64 = 6.0;

/// Raster image laid over map space.
///
/// The raster is not decoded; its bounds frame the hall on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOverlay {
    /// Image file on disk
    pub path: PathBuf,
    /// Area the image covers
    pub bounds: MapBounds,
}

impl ImageOverlay {
    /// Overlay for a raster of `width` x `height` pixels.
    #[must_use]
    pub fn for_raster(path: PathBuf, width: f64, height: f64) -> Self {
        Self {
            path,
            bounds: MapBounds::for_raster(width, height),
        }
    }
}

/// Camera over map space, sized in terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewport {
    center: MapPoint,
    zoom: f64,
    width: u16,
    height: u16,
    size_valid: bool,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl MapViewport {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            center: MapPoint::new(0.0, 0.0),
            zoom: 0.0,
            width,
            height,
            size_valid: true,
        }
    }

    #[must_use]
    pub const fn center(&self) -> MapPoint {
        self.center
    }

    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Size in cells as `(columns, rows)`.
    #[must_use]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Sets the size and marks it valid.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.size_valid = true;
    }

    /// Marks the size as stale so the next layout pass re-measures.
    pub fn invalidate_size(&mut self) {
        self.size_valid = false;
    }

    /// Whether the size must be re-measured before the next draw.
    #[must_use]
    pub const fn needs_layout(&self) -> bool {
        !self.size_valid
    }

    /// Moves the camera without animation; zoom is clamped.
    pub fn set_view(&mut self, center: MapPoint, zoom: f64) {
        self.center = center;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Changes zoom around the current center.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.set_view(self.center, zoom);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.set_zoom(self.zoom + delta);
    }

    /// Map units covered by one column at the current zoom.
    #[must_use]
    pub fn units_per_column(&self) -> f64 {
        UNITS_PER_COLUMN / self.zoom.exp2()
    }

    /// Map units covered by one row at the current zoom.
    #[must_use]
    pub fn units_per_row(&self) -> f64 {
        UNITS_PER_ROW / self.zoom.exp2()
    }

    /// Pans by a number of cells; positive rows move the view down.
    pub fn pan(&mut self, columns: f64, rows: f64) {
        self.center.lng += columns * self.units_per_column();
        self.center.lat -= rows * self.units_per_row();
    }

    /// Area of map space currently visible.
    #[must_use]
    pub fn visible_bounds(&self) -> MapBounds {
        let half_w = f64::from(self.width) * self.units_per_column() / 2.0;
        let half_h = f64::from(self.height) * self.units_per_row() / 2.0;
        MapBounds {
            south_west: MapPoint::new(self.center.lat - half_h, self.center.lng - half_w),
            north_east: MapPoint::new(self.center.lat + half_h, self.center.lng + half_w),
        }
    }

    /// Largest zoom at which `bounds` fits entirely.
    #[must_use]
    pub fn fit_zoom(&self, bounds: &MapBounds) -> f64 {
        let fit = |cells: u16, per_cell: f64, extent: f64| {
            (cells > 0 && extent > 0.0)
                .then(|| (per_cell * f64::from(cells) / extent).log2())
        };
        let zoom = match (
            fit(self.width, UNITS_PER_COLUMN, bounds.width()),
            fit(self.height, UNITS_PER_ROW, bounds.height()),
        ) {
            (Some(x), Some(y)) => x.min(y),
            (Some(z), None) | (None, Some(z)) => z,
            (None, None) => self.zoom,
        };
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }

    /// Centers on `bounds` at the largest zoom that shows all of it.
    pub fn fit_bounds(&mut self, bounds: &MapBounds) {
        let zoom = self.fit_zoom(bounds);
        self.set_view(bounds.center(), zoom);
    }

    /// Map point under the middle of cell (`column`, `row`), counted from
    /// the viewport's top-left cell.
    #[must_use]
    pub fn cell_to_map(&self, column: u16, row: u16) -> MapPoint {
        let visible = self.visible_bounds();
        MapPoint::new(
            visible.north_east.lat - (f64::from(row) + 0.5) * self.units_per_row(),
            visible.south_west.lng + (f64::from(column) + 0.5) * self.units_per_column(),
        )
    }
}
