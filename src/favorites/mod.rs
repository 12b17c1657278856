//! Favorites lists.
//!
//! Lists live in three places that are kept in step: persistent key-value
//! storage, the in-memory active list and the shareable URL fragment.

pub mod fragment;
pub mod location;
pub mod manager;
pub mod names;
pub mod registry;
pub mod share;
pub mod storage;
pub mod store;

pub use fragment::{decode_favorites, encode_favorites, Fragment};
pub use location::{fragment_of, Location, MemoryLocation};
pub use manager::{ActiveList, Confirm, ListManager};
pub use registry::ListRegistry;
pub use share::{ClipboardSink, MemoryClipboard, SystemClipboard};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::FavoritesStore;
