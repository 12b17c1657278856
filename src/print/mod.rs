//! Printing the map: per-hall zoom table, print controls and the adapter
//! that prepares the view for a print job.

pub mod adapter;
pub mod control;
pub mod zoom;

pub use adapter::PrintAdapter;
pub use control::{
    PageSize, PrintControl, PrintControlFactory, PrintLifecycle, PrintScene, SnapshotControl,
    SnapshotFactory,
};
pub use zoom::{print_zoom, DEFAULT_PRINT_ZOOM};
