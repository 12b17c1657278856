//! Map view state: hall index, selected hall, its stands and the camera.
//!
//! Loading is asynchronous; the UI loop calls [`MapView::poll`] every tick
//! and reacts to the returned notices.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::{HallId, HallIndex, MapInfo, MapPoint, Stand};
use crate::services::geometry::polygon_contains;
use crate::services::{build_stands, CoordinatePolicy, DataSource, HallLoader, LoadEvent};
use crate::view::viewport::{ImageOverlay, MapViewport};

/// Something the UI should tell the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNotice {
    /// Hall index is available
    IndexLoaded { halls: usize },
    /// Hall index could not be loaded
    IndexFailed(String),
    /// Stands of the selected hall are ready
    HallLoaded { hall: HallId, stands: usize },
    /// Selected hall could not be loaded
    HallFailed { hall: HallId, error: String },
}

/// Everything the map shows.
pub struct MapView {
    loader: HallLoader,
    policy: CoordinatePolicy,
    halls: Vec<MapInfo>,
    initial_hall: Option<HallId>,
    selected_hall: Option<HallId>,
    stands: Vec<Stand>,
    overlay: Option<ImageOverlay>,
    selected_stand: Option<usize>,
    favorites_only: bool,
    /// Camera over the selected hall
    pub viewport: MapViewport,
}

impl MapView {
    pub fn new(source: Arc<dyn DataSource>, policy: CoordinatePolicy) -> Self {
        Self {
            loader: HallLoader::new(source),
            policy,
            halls: Vec::new(),
            initial_hall: None,
            selected_hall: None,
            stands: Vec::new(),
            overlay: None,
            selected_stand: None,
            favorites_only: false,
            viewport: MapViewport::default(),
        }
    }

    /// Starts loading the index; `hall` is selected once it arrives, the
    /// first hall otherwise.
    pub fn start(&mut self, hall: Option<HallId>) {
        self.initial_hall = hall;
        self.loader.request_index();
    }

    #[must_use]
    pub fn halls(&self) -> &[MapInfo] {
        &self.halls
    }

    #[must_use]
    pub fn stands(&self) -> &[Stand] {
        &self.stands
    }

    #[must_use]
    pub const fn overlay(&self) -> Option<&ImageOverlay> {
        self.overlay.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    #[must_use]
    pub const fn selected_hall_id(&self) -> Option<HallId> {
        self.selected_hall
    }

    /// Index entry of the selected hall.
    #[must_use]
    pub fn selected_hall(&self) -> Option<&MapInfo> {
        let id = self.selected_hall?;
        self.halls.iter().find(|h| h.id == id)
    }

    /// Switches to another hall and starts loading its data.
    ///
    /// The previous hall's stands are cleared immediately; late responses
    /// for earlier selections are ignored.
    pub fn select_hall(&mut self, id: HallId) -> Result<()> {
        let info = self
            .halls
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .with_context(|| format!("Unknown hall {id}"))?;

        let image = self.loader.source().image_path(id);
        let overlay = ImageOverlay::for_raster(image, info.width, info.height);
        self.viewport.fit_bounds(&overlay.bounds);
        self.overlay = Some(overlay);
        self.selected_hall = Some(id);
        self.stands.clear();
        self.selected_stand = None;

        info!("Selected hall {id} ({})", info.name);
        self.loader.request_hall(id);
        Ok(())
    }

    /// Selects the hall after (or before) the current one, wrapping around.
    pub fn cycle_hall(&mut self, forward: bool) -> Result<()> {
        if self.halls.is_empty() {
            return Ok(());
        }
        let current = self
            .selected_hall
            .and_then(|id| self.halls.iter().position(|h| h.id == id));
        let len = self.halls.len();
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.select_hall(self.halls[next].id)
    }

    /// Applies finished loads.
    pub fn poll(&mut self) -> Vec<ViewNotice> {
        let events = self.loader.poll();
        self.apply(events)
    }

    /// Blocks until all loads finish, then applies them.
    pub fn wait(&mut self) -> Vec<ViewNotice> {
        let mut notices = Vec::new();
        while self.loader.is_loading() {
            let events = self.loader.wait();
            notices.extend(self.apply(events));
        }
        notices
    }

    fn apply(&mut self, events: Vec<LoadEvent>) -> Vec<ViewNotice> {
        let mut notices = Vec::new();
        for event in events {
            match event {
                LoadEvent::Index(Ok(index)) => notices.extend(self.apply_index(index)),
                LoadEvent::Index(Err(error)) => {
                    warn!("Failed to load hall index: {error}");
                    notices.push(ViewNotice::IndexFailed(error));
                }
                LoadEvent::Hall { hall, result } => {
                    let built = result.and_then(|data| {
                        build_stands(&data, self.policy).map_err(|e| format!("{e:#}"))
                    });
                    match built {
                        Ok(stands) => {
                            info!("Hall {hall}: {} stand(s)", stands.len());
                            notices.push(ViewNotice::HallLoaded {
                                hall,
                                stands: stands.len(),
                            });
                            self.stands = stands;
                        }
                        Err(error) => {
                            warn!("Failed to load hall {hall}: {error}");
                            notices.push(ViewNotice::HallFailed { hall, error });
                        }
                    }
                }
            }
        }
        notices
    }

    fn apply_index(&mut self, index: HallIndex) -> Vec<ViewNotice> {
        let mut notices = vec![ViewNotice::IndexLoaded {
            halls: index.maps.len(),
        }];
        self.halls = index.maps;

        let wanted = self
            .initial_hall
            .take()
            .filter(|id| self.halls.iter().any(|h| h.id == *id));
        if let Some(id) = wanted.or_else(|| self.halls.first().map(|h| h.id)) {
            if let Err(e) = self.select_hall(id) {
                notices.push(ViewNotice::HallFailed {
                    hall: id,
                    error: format!("{e:#}"),
                });
            }
        }
        notices
    }

    /// Re-centers on the whole hall.
    pub fn fit(&mut self) {
        if let Some(overlay) = &self.overlay {
            let bounds = overlay.bounds;
            self.viewport.fit_bounds(&bounds);
        }
    }

    #[must_use]
    pub const fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    pub fn set_favorites_only(&mut self, enabled: bool) {
        self.favorites_only = enabled;
    }

    /// Topmost stand whose outline contains `point`.
    #[must_use]
    pub fn stand_at(&self, point: MapPoint) -> Option<usize> {
        self.stands
            .iter()
            .rposition(|stand| polygon_contains(&stand.points, point))
    }

    /// Selects the stand under a viewport cell. Returns the new selection.
    pub fn select_at_cell(&mut self, column: u16, row: u16) -> Option<&Stand> {
        let point = self.viewport.cell_to_map(column, row);
        self.selected_stand = self.stand_at(point);
        self.selected_stand()
    }

    #[must_use]
    pub fn selected_stand(&self) -> Option<&Stand> {
        self.stands.get(self.selected_stand?)
    }

    pub fn clear_selection(&mut self) {
        self.selected_stand = None;
    }

    /// Selects the stand with `label`, if it exists in this hall.
    pub fn select_label(&mut self, label: &str) -> Option<&Stand> {
        self.selected_stand = self.stands.iter().position(|s| s.label == label);
        self.selected_stand()
    }

    /// Moves the selection to the next (or previous) stand accepted by
    /// `visible`, in data order, wrapping around.
    pub fn cycle_stand(&mut self, forward: bool, visible: impl Fn(&Stand) -> bool) -> Option<&Stand> {
        let candidates: Vec<usize> = self
            .stands
            .iter()
            .enumerate()
            .filter(|(_, s)| visible(s))
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            self.selected_stand = None;
            return None;
        }

        let position = self
            .selected_stand
            .and_then(|current| candidates.iter().position(|&i| i == current));
        let len = candidates.len();
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(p), true) => (p + 1) % len,
            (Some(p), false) => (p + len - 1) % len,
        };
        self.selected_stand = Some(candidates[next]);
        self.focus_selected();
        self.selected_stand()
    }

    /// Camera and drawable content borrowed at once, for print jobs that
    /// move the camera while reading the stands.
    pub fn split_mut(&mut self) -> (&mut MapViewport, &[Stand], Option<&ImageOverlay>) {
        (&mut self.viewport, &self.stands, self.overlay.as_ref())
    }

    /// Centers the camera on the selected stand without changing zoom.
    pub fn focus_selected(&mut self) {
        if let Some(bounds) = self.selected_stand().and_then(Stand::bounds) {
            let zoom = self.viewport.zoom();
            self.viewport.set_view(bounds.center(), zoom);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Company, HallData, MapElement};
    use std::path::PathBuf;

    struct TwoHalls;

    impl DataSource for TwoHalls {
        fn fetch_index(&self) -> Result<HallIndex> {
            Ok(HallIndex {
                maps: vec![
                    MapInfo::new(1, "Hall 1", 100.0, 50.0),
                    MapInfo::new(2, "Hall 2", 200.0, 100.0),
                ],
            })
        }

        fn fetch_hall(&self, hall: HallId) -> Result<HallData> {
            Ok(HallData {
                map_elements: vec![
                    MapElement::booth(1, hall, 0.0, 0.0, 10.0, 10.0).with_stand_id(format!("{hall}.A1")),
                    MapElement::booth(2, hall, 20.0, 0.0, 10.0, 10.0).with_stand_id(format!("{hall}.A2")),
                ],
                companies: vec![Company::new("c", "Acme", &["A1"])],
            })
        }

        fn image_path(&self, hall: HallId) -> PathBuf {
            PathBuf::from(format!("images/{hall}.png"))
        }
    }

    fn loaded_view(hall: Option<HallId>) -> MapView {
        let mut view = MapView::new(Arc::new(TwoHalls), CoordinatePolicy::Skip);
        view.start(hall);
        view.wait();
        view
    }

    #[test]
    fn test_start_selects_first_hall() {
        let view = loaded_view(None);
        assert_eq!(view.halls().len(), 2);
        assert_eq!(view.selected_hall_id(), Some(1));
        assert_eq!(view.stands().len(), 2);
        assert_eq!(view.stands()[0].info.title, "Acme");
        assert_eq!(
            view.overlay().unwrap().path,
            PathBuf::from("images/1.png")
        );
    }

    #[test]
    fn test_start_honors_requested_hall() {
        let view = loaded_view(Some(2));
        assert_eq!(view.selected_hall().unwrap().name, "Hall 2");
        assert_eq!(view.stands()[0].label, "2.A1");

        let fallback = loaded_view(Some(99));
        assert_eq!(fallback.selected_hall_id(), Some(1));
    }

    #[test]
    fn test_cycle_hall_wraps() {
        let mut view = loaded_view(None);
        view.cycle_hall(false).unwrap();
        assert_eq!(view.selected_hall_id(), Some(2));
        assert!(view.stands().is_empty());
        view.wait();
        view.cycle_hall(true).unwrap();
        assert_eq!(view.selected_hall_id(), Some(1));
        assert!(view.select_hall(42).is_err());
    }

    #[test]
    fn test_hit_testing() {
        let view = loaded_view(None);
        assert_eq!(view.stand_at(MapPoint::from_raster(5.0, 5.0)), Some(0));
        assert_eq!(view.stand_at(MapPoint::from_raster(25.0, 5.0)), Some(1));
        assert_eq!(view.stand_at(MapPoint::from_raster(15.0, 5.0)), None);
    }

    #[test]
    fn test_cycle_stand_with_filter() {
        let mut view = loaded_view(None);
        assert_eq!(view.cycle_stand(true, |_| true).unwrap().label, "1.A1");
        assert_eq!(view.cycle_stand(true, |_| true).unwrap().label, "1.A2");
        assert_eq!(view.cycle_stand(true, |_| true).unwrap().label, "1.A1");
        assert_eq!(view.cycle_stand(false, |_| true).unwrap().label, "1.A2");

        let only_a2 = |s: &Stand| s.label.ends_with("A2");
        assert_eq!(view.cycle_stand(true, only_a2).unwrap().label, "1.A2");
        assert!(view.cycle_stand(true, |_| false).is_none());
        assert!(view.selected_stand().is_none());
    }

    #[test]
    fn test_select_label() {
        let mut view = loaded_view(None);
        assert!(view.select_label("1.A2").is_some());
        assert!(view.select_label("9.Z9").is_none());
    }
}
