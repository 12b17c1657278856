//! Map view: camera, hall overlay and the state of the selected hall.

pub mod map_view;
pub mod viewport;

pub use map_view::{MapView, ViewNotice};
pub use viewport::{ImageOverlay, MapViewport};
