// Cache module for local persistence.
// Stores the last recent-feed page so it can be shown when the network fails.

#![allow(dead_code, unused_imports)]

pub mod images;
pub mod paths;
pub mod store;

pub use images::{CACHE_KEY, read_images, write_images};
pub use paths::{cache_dir, log_path};
pub use store::{FileStore, KeyValueStore};
