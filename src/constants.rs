//! Application-wide constants.
//!
//! This module defines names, file layout and storage/URL keys shared across
//! the application.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "HallMap";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "hallmap";

/// Hall index file inside the data directory.
pub const HALL_INDEX_FILE: &str = "maps.json";

/// Directory holding one JSON data file per hall.
pub const HALL_DATA_DIR: &str = "maps";

/// Directory holding one raster image per hall.
pub const HALL_IMAGE_DIR: &str = "images";

/// Storage key prefix for named favorites lists (`favorites:<name>`).
pub const FAVORITES_KEY_PREFIX: &str = "favorites:";

/// Storage key of the single pre-multi-list favorites array.
pub const LEGACY_FAVORITES_KEY: &str = "favorites";

/// URL fragment parameter naming the active list.
pub const FRAGMENT_LIST_PARAM: &str = "list";

/// URL fragment parameter carrying the compressed favorites.
pub const FRAGMENT_FAVS_PARAM: &str = "favs";
