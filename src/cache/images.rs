// Cached image list for the recent feed.
// Reads both the descriptor shape and the older plain-URL shape.

use serde::Deserialize;

use crate::error::Result;
use crate::flickr::ImageDescriptor;

use super::store::KeyValueStore;

/// Fixed key the recent feed caches its first page under.
pub const CACHE_KEY: &str = "@cached_images";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CacheEntry {
    Descriptors(Vec<ImageDescriptor>),
    Urls(Vec<String>),
}

impl CacheEntry {
    fn into_descriptors(self) -> Vec<ImageDescriptor> {
        match self {
            CacheEntry::Descriptors(images) => images,
            CacheEntry::Urls(urls) => urls
                .into_iter()
                .filter(|url| !url.trim().is_empty())
                .map(|url| ImageDescriptor::new(id_from_url(&url), url))
                .collect(),
        }
    }
}

/// Derive a stable id from a photo URL's file stem.
fn id_from_url(url: &str) -> String {
    let name = url.rsplit('/').next().unwrap_or(url);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}

/// Parse a cache value in either supported shape.
pub fn decode_images(raw: &str) -> Result<Vec<ImageDescriptor>> {
    let entry: CacheEntry = serde_json::from_str(raw)?;
    Ok(entry.into_descriptors())
}

/// Read the cached image list, if any.
pub fn read_images<S: KeyValueStore>(store: &S) -> Result<Option<Vec<ImageDescriptor>>> {
    match store.get(CACHE_KEY)? {
        Some(raw) => decode_images(&raw).map(Some),
        None => Ok(None),
    }
}

/// Write the image list, skipping the write when the stored value is identical.
/// Returns whether anything was written.
pub fn write_images<S: KeyValueStore>(store: &S, images: &[ImageDescriptor]) -> Result<bool> {
    let json = serde_json::to_string(images)?;
    if store.get(CACHE_KEY).ok().flatten().as_deref() == Some(json.as_str()) {
        return Ok(false);
    }
    store.set(CACHE_KEY, &json)?;
    Ok(true)
}
