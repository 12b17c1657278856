//! Booth outline geometry.
//!
//! This module turns raw map elements into polygon outlines in map space and
//! provides the small amount of polygon math the viewer needs (hit testing,
//! centroids).

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{MapElement, MapPoint};

/// What to do with an element whose coordinate lists contain non-numeric tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinatePolicy {
    /// Drop the element and log a warning
    #[default]
    Skip,
    /// Propagate the parse error to the caller
    Fail,
}

/// Parses a pipe-delimited list of numbers such as `"0|10.5|10|0"`.
///
/// Tokens are trimmed and empty tokens are ignored.
///
/// # Errors
///
/// Returns an error naming the first token that is not a number.
pub fn parse_coordinate_list(raw: &str) -> Result<Vec<f64>> {
    raw.split('|')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .with_context(|| format!("Invalid coordinate token {token:?}"))
        })
        .collect()
}

/// Builds the outline of an element in map space.
///
/// With both detailed coordinate lists present the outline follows them,
/// paired index-wise (the longer list is truncated). Otherwise the four
/// rectangle corners are produced in the order top-left, top-right,
/// bottom-right, bottom-left.
///
/// # Errors
///
/// Returns an error if a coordinate list contains a non-numeric token.
pub fn element_outline(element: &MapElement) -> Result<Vec<MapPoint>> {
    let detailed = match (element.x_coords.as_deref(), element.y_coords.as_deref()) {
        (Some(xs), Some(ys)) if !xs.trim().is_empty() && !ys.trim().is_empty() => Some((xs, ys)),
        _ => None,
    };

    if let Some((xs, ys)) = detailed {
        let xs = parse_coordinate_list(xs)
            .with_context(|| format!("Element {} has malformed XCOORDS", element.id))?;
        let ys = parse_coordinate_list(ys)
            .with_context(|| format!("Element {} has malformed YCOORDS", element.id))?;
        return Ok(xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| MapPoint::from_raster(x, y))
            .collect());
    }

    let (x, y, w, h) = (element.x, element.y, element.w, element.h);
    Ok(vec![
        MapPoint::from_raster(x, y),
        MapPoint::from_raster(x + w, y),
        MapPoint::from_raster(x + w, y + h),
        MapPoint::from_raster(x, y + h),
    ])
}

/// Builds the outline of a renderable booth, or `None` if the element is not shown.
///
/// Structural elements and elements with an empty outline are not shown.
/// Malformed coordinates follow `policy`.
///
/// # Errors
///
/// Returns an error only under [`CoordinatePolicy::Fail`].
pub fn booth_outline(element: &MapElement, policy: CoordinatePolicy) -> Result<Option<Vec<MapPoint>>> {
    if !element.is_booth() {
        return Ok(None);
    }

    let points = match element_outline(element) {
        Ok(points) => points,
        Err(e) => match policy {
            CoordinatePolicy::Skip => {
                warn!("Skipping map element {}: {e:#}", element.id);
                return Ok(None);
            }
            CoordinatePolicy::Fail => return Err(e),
        },
    };

    if points.is_empty() {
        return Ok(None);
    }

    Ok(Some(points))
}

/// Ray-casting point-in-polygon test. Points on an edge may fall either way.
#[must_use]
pub fn polygon_contains(points: &[MapPoint], target: MapPoint) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        let crosses = (a.lat > target.lat) != (b.lat > target.lat);
        if crosses {
            let lng_at = (b.lng - a.lng) * (target.lat - a.lat) / (b.lat - a.lat) + a.lng;
            if target.lng < lng_at {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Average of the outline's vertices, used to place labels.
///
/// # Errors
///
/// Returns an error for an empty outline.
pub fn vertex_centroid(points: &[MapPoint]) -> Result<MapPoint> {
    if points.is_empty() {
        bail!("Cannot compute the centroid of an empty outline");
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let (lat, lng) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    Ok(MapPoint::new(lat / n, lng / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<MapPoint> {
        raw.iter().copied().map(MapPoint::from).collect()
    }

    #[test]
    fn test_detailed_outline_is_flipped() {
        let element = MapElement::booth(1, 1, 0.0, 0.0, 0.0, 0.0)
            .with_coords("0|10|10|0", "0|0|10|10");
        let points = element_outline(&element).unwrap();
        assert_eq!(
            points,
            pts(&[(0.0, 0.0), (0.0, 10.0), (-10.0, 10.0), (-10.0, 0.0)])
        );
    }

    #[test]
    fn test_rectangle_outline_corner_order() {
        let element = MapElement::booth(1, 1, 5.0, 5.0, 2.0, 3.0);
        let points = element_outline(&element).unwrap();
        assert_eq!(
            points,
            pts(&[(-5.0, 5.0), (-5.0, 7.0), (-8.0, 7.0), (-8.0, 5.0)])
        );
    }

    #[test]
    fn test_single_coordinate_list_falls_back_to_rectangle() {
        let mut element = MapElement::booth(1, 1, 1.0, 1.0, 1.0, 1.0);
        element.x_coords = Some("0|10".to_string());
        let points = element_outline(&element).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], MapPoint::new(-1.0, 1.0));
    }

    #[test]
    fn test_uneven_lists_pair_index_wise() {
        let element = MapElement::booth(1, 1, 0.0, 0.0, 0.0, 0.0).with_coords("1|2|3", "4|5");
        let points = element_outline(&element).unwrap();
        assert_eq!(points, pts(&[(-4.0, 1.0), (-5.0, 2.0)]));
    }

    #[test]
    fn test_parse_coordinate_list_tolerates_whitespace() {
        assert_eq!(parse_coordinate_list(" 1 | 2.5 ||3").unwrap(), vec![1.0, 2.5, 3.0]);
        assert!(parse_coordinate_list("1|x|3").is_err());
    }

    #[test]
    fn test_structural_elements_are_hidden() {
        let mut element = MapElement::booth(1, 1, 0.0, 0.0, 1.0, 1.0);
        element.kind = 2;
        assert!(booth_outline(&element, CoordinatePolicy::Skip).unwrap().is_none());
    }

    #[test]
    fn test_empty_detailed_outline_is_hidden() {
        let element = MapElement::booth(1, 1, 0.0, 0.0, 1.0, 1.0).with_coords("|", "|");
        assert!(booth_outline(&element, CoordinatePolicy::Fail).unwrap().is_none());
    }

    #[test]
    fn test_malformed_coordinates_follow_policy() {
        let element = MapElement::booth(9, 1, 0.0, 0.0, 1.0, 1.0).with_coords("0|a", "0|1");

        assert!(booth_outline(&element, CoordinatePolicy::Skip).unwrap().is_none());

        let err = booth_outline(&element, CoordinatePolicy::Fail).unwrap_err();
        assert!(format!("{err:#}").contains("Element 9"));
    }

    #[test]
    fn test_polygon_contains() {
        let square = pts(&[(0.0, 0.0), (0.0, 10.0), (-10.0, 10.0), (-10.0, 0.0)]);
        assert!(polygon_contains(&square, MapPoint::new(-5.0, 5.0)));
        assert!(!polygon_contains(&square, MapPoint::new(-15.0, 5.0)));
        assert!(!polygon_contains(&square, MapPoint::new(5.0, 5.0)));
        assert!(!polygon_contains(&square[..2], MapPoint::new(-5.0, 5.0)));
    }

    #[test]
    fn test_vertex_centroid() {
        let square = pts(&[(0.0, 0.0), (0.0, 10.0), (-10.0, 10.0), (-10.0, 0.0)]);
        assert_eq!(vertex_centroid(&square).unwrap(), MapPoint::new(-5.0, 5.0));
        assert!(vertex_centroid(&[]).is_err());
    }
}
