//! Service layer for hall data.
//!
//! This module contains the logic between raw hall data and what the viewer
//! shows: loading, outline geometry, exhibitor matching and stand building.

pub mod data_source;
pub mod exhibitors;
pub mod geometry;
pub mod loader;
pub mod stands;

// Re-export commonly used types and functions
pub use data_source::{DataSource, FsDataSource};
pub use geometry::CoordinatePolicy;
pub use loader::{HallLoader, LoadEvent};
pub use stands::build_stands;
