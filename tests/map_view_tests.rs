//! Integration tests for loading halls from a data directory into the map view.

use std::fs;
use std::sync::Arc;

use hallmap::models::MapPoint;
use hallmap::services::{build_stands, CoordinatePolicy, DataSource, FsDataSource};
use hallmap::view::{MapView, ViewNotice};

mod fixtures;
use fixtures::*;

fn view_for(exhibition: &Exhibition, policy: CoordinatePolicy) -> MapView {
    MapView::new(Arc::new(FsDataSource::new(&exhibition.data_dir)), policy)
}

#[test]
fn test_first_hall_is_selected_when_none_requested() {
    let exhibition = create_exhibition();
    let mut view = view_for(&exhibition, CoordinatePolicy::Skip);

    view.start(None);
    let notices = view.wait();

    assert!(notices.contains(&ViewNotice::IndexLoaded { halls: 2 }));
    assert!(notices.contains(&ViewNotice::HallLoaded { hall: 1, stands: 3 }));
    assert_eq!(view.selected_hall_id(), Some(1));
    assert!(view.overlay().is_some());
}

#[test]
fn test_requested_hall_and_switching() {
    let exhibition = create_exhibition();
    let mut view = view_for(&exhibition, CoordinatePolicy::Skip);

    view.start(Some(2));
    view.wait();
    assert_eq!(view.selected_hall().map(|h| h.name.as_str()), Some("Hall 2"));
    assert_eq!(view.stands()[0].label, "2.A1");

    view.cycle_hall(true).unwrap();
    view.wait();
    assert_eq!(view.selected_hall_id(), Some(1));
    assert_eq!(view.stands()[0].label, "1.A1");

    assert!(view.select_hall(7).is_err());
    assert_eq!(view.selected_hall_id(), Some(1));
}

#[test]
fn test_stand_lookup_by_position() {
    let exhibition = create_exhibition();
    let mut view = view_for(&exhibition, CoordinatePolicy::Skip);
    view.start(None);
    view.wait();

    let a1 = view.stand_at(MapPoint::from_raster(40.0, 50.0)).unwrap();
    assert_eq!(view.stands()[a1].label, "1.A1");

    let a3 = view.stand_at(MapPoint::from_raster(250.0, 10.0)).unwrap();
    assert_eq!(view.stands()[a3].info.title, "Acme");

    // Gap between booths
    assert!(view.stand_at(MapPoint::from_raster(90.0, 50.0)).is_none());
}

#[test]
fn test_missing_hall_file_is_reported() {
    let exhibition = create_exhibition();
    fs::remove_file(exhibition.data_dir.join("maps").join("2.json")).unwrap();
    let mut view = view_for(&exhibition, CoordinatePolicy::Skip);

    view.start(Some(2));
    let notices = view.wait();

    assert!(notices
        .iter()
        .any(|n| matches!(n, ViewNotice::HallFailed { hall: 2, .. })));
    assert!(view.stands().is_empty());
}

#[test]
fn test_malformed_coordinates_follow_policy() {
    let exhibition = create_exhibition();
    let source = FsDataSource::new(&exhibition.data_dir);
    let mut data = source.fetch_hall(1).unwrap();
    data.map_elements[2].x_coords = Some("200|abc|280|200".to_string());

    let skipped = build_stands(&data, CoordinatePolicy::Skip).unwrap();
    let labels: Vec<&str> = skipped.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["1.A1", "1.A2"]);

    assert!(build_stands(&data, CoordinatePolicy::Fail).is_err());
}

#[test]
fn test_image_path_follows_layout() {
    let exhibition = create_exhibition();
    let source = FsDataSource::new(&exhibition.data_dir);

    assert_eq!(
        source.image_path(2),
        exhibition.data_dir.join("images").join("2.png")
    );
}
