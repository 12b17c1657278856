//! Zoom level used while printing each hall.
//!
//! Levels are relative zoom-outs tuned per hall so the whole floor fits a
//! page; halls not in the table use [`DEFAULT_PRINT_ZOOM`].

use crate::models::HallId;

/// Zoom for halls without a table entry.
pub const DEFAULT_PRINT_ZOOM: f64 = -2.0;

const PRINT_ZOOM: [(HallId, f64); 11] = [
    (1, -2.0),
    (2, -2.5),
    (3, -2.5),
    (4, -1.5),
    (5, -3.0),
    (6, -2.25),
    (7, -1.75),
    (8, -3.5),
    (9, -2.0),
    (10, -1.25),
    (11, -2.75),
];

/// Print zoom for `hall`.
#[must_use]
pub fn print_zoom(hall: HallId) -> f64 {
    PRINT_ZOOM
        .iter()
        .find(|(id, _)| *id == hall)
        .map_or(DEFAULT_PRINT_ZOOM, |(_, zoom)| *zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_halls() {
        assert!((print_zoom(5) - -3.0).abs() < f64::EPSILON);
        assert!((print_zoom(6) - -2.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_hall_uses_default() {
        assert!((print_zoom(0) - DEFAULT_PRINT_ZOOM).abs() < f64::EPSILON);
        assert!((print_zoom(999) - DEFAULT_PRINT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_every_level_zooms_out() {
        assert!(PRINT_ZOOM.iter().all(|(_, zoom)| *zoom < 0.0));
    }
}
