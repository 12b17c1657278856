//! Integration tests for printing a loaded hall to a snapshot file.

use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use hallmap::print::{PageSize, PrintAdapter, PrintScene, SnapshotFactory};
use hallmap::services::{CoordinatePolicy, FsDataSource};
use hallmap::tui::MapScene;
use hallmap::view::MapView;

mod fixtures;
use fixtures::*;

fn loaded_view(exhibition: &Exhibition) -> MapView {
    let source = Arc::new(FsDataSource::new(&exhibition.data_dir));
    let mut view = MapView::new(source, CoordinatePolicy::Skip);
    view.start(Some(1));
    view.wait();
    view.viewport.set_size(40, 12);
    view.fit();
    view
}

fn print(view: &mut MapView, adapter: &mut PrintAdapter, favorites: &[String]) -> std::path::PathBuf {
    let name = view.selected_hall().map(|h| h.name.clone()).unwrap();
    let (viewport, stands, overlay) = view.split_mut();
    let mut scene = PrintScene {
        hall: 1,
        hall_name: &name,
        viewport,
        map: MapScene {
            stands,
            overlay,
            favorites,
            selected: None,
            favorites_only: false,
        },
    };
    adapter.print(&mut scene).expect("Print should succeed")
}

#[test]
fn test_snapshot_written_to_directory() {
    let exhibition = create_exhibition();
    let mut view = loaded_view(&exhibition);
    let before = (view.viewport.center(), view.viewport.zoom(), view.viewport.size());

    let mut adapter = PrintAdapter::new(Duration::ZERO);
    let factory = SnapshotFactory {
        dir: exhibition.snapshot_dir.clone(),
        page: PageSize {
            width: 30,
            height: 10,
        },
        output: None,
    };
    assert!(adapter.mount(&factory));
    assert!(exhibition.snapshot_dir.is_dir(), "Attaching creates the directory");

    let path = print(&mut view, &mut adapter, &["1.A1".to_string()]);

    assert!(path.starts_with(&exhibition.snapshot_dir));
    let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("Hall_1_"), "file name: {file_name}");

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("Hall 1\n\n"));
    assert!(content.trim_end().ends_with("★ 1.A1"));

    // The screen view is back once the job is done
    assert_eq!(
        (view.viewport.center(), view.viewport.zoom(), view.viewport.size()),
        before
    );

    // A layout re-validation follows the print
    assert!(adapter.revalidation_pending());
    assert!(adapter.tick(&mut view.viewport, Instant::now()));
    assert!(!adapter.revalidation_pending());

    adapter.unmount();
    assert!(!adapter.is_available());
}

#[test]
fn test_unmounted_adapter_does_not_print() {
    let exhibition = create_exhibition();
    let mut adapter = PrintAdapter::new(Duration::ZERO);
    adapter.unmount();

    assert!(!adapter.mount(&SnapshotFactory::new(&exhibition.snapshot_dir)));
    assert!(!adapter.is_available());
}

#[test]
fn test_snapshot_to_explicit_output() {
    let exhibition = create_exhibition();
    let mut view = loaded_view(&exhibition);
    let output = exhibition.temp_dir.path().join("plan.txt");

    let mut adapter = PrintAdapter::new(Duration::from_secs(60));
    let factory = SnapshotFactory::new(&exhibition.snapshot_dir);
    let factory = SnapshotFactory {
        output: Some(output.clone()),
        ..factory
    };
    assert!(adapter.mount(&factory));

    let path = print(&mut view, &mut adapter, &[]);
    assert_eq!(path, output);
    let content = fs::read_to_string(&output).unwrap();
    assert!(!content.contains('★'), "No favorites line without favorites");

    // Not due yet
    assert!(!adapter.tick(&mut view.viewport, Instant::now()));
}
