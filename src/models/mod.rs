//! Data models for halls, map elements, exhibitors and stands.
//!
//! Models are plain serde types with no knowledge of the UI, storage or
//! loading machinery.

pub mod company;
pub mod map_element;
pub mod map_info;
pub mod stand;

pub use company::Company;
pub use map_element::{MapElement, BOOTH_ELEMENT_TYPE};
pub use map_info::{HallId, HallIndex, MapInfo};
pub use stand::{ExhibitorInfo, HallData, MapBounds, MapPoint, Stand};
