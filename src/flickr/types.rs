// Flickr API response types.
// Defines the raw wire structs and the descriptors the feeds work with.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShutterError};

/// One displayable photo: a unique id and the URL of its small rendition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub id: String,
    pub url: String,
}

impl ImageDescriptor {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// A parsed page of results from one remote query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhotoPage {
    pub images: Vec<ImageDescriptor>,
    pub page: u32,
    pub total_pages: u32,
}

/// Top-level response envelope. Flickr reports API failures in-band with
/// `stat: "fail"` and an HTTP 200.
#[derive(Debug, Deserialize)]
pub(crate) struct PhotosResponse {
    #[serde(default)]
    pub stat: Option<String>,
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
    pub photos: Option<PhotoList>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhotoList {
    #[serde(default)]
    pub page: u32,
    pub pages: u32,
    #[serde(default)]
    pub photo: Vec<Photo>,
}

/// A single photo entry as returned with `extras=url_s`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Photo {
    pub id: String,
    pub secret: String,
    #[serde(default)]
    pub url_s: Option<String>,
}

impl Photo {
    /// Convert to a descriptor, dropping entries without a usable URL.
    pub fn into_descriptor(self) -> Option<ImageDescriptor> {
        let url = self.url_s.filter(|u| !u.trim().is_empty())?;
        Some(ImageDescriptor {
            id: format!("{}_{}", self.id, self.secret),
            url,
        })
    }
}

/// Parse a `flickr.photos.*` JSON body into a page of descriptors.
pub fn parse_photo_page(body: &str) -> Result<PhotoPage> {
    let response: PhotosResponse = serde_json::from_str(body)?;

    if response.stat.as_deref() == Some("fail") {
        return Err(ShutterError::Flickr {
            code: response.code.unwrap_or_default(),
            message: response
                .message
                .unwrap_or_else(|| "unknown failure".to_string()),
        });
    }

    let photos = response
        .photos
        .ok_or_else(|| ShutterError::Other("response is missing `photos`".to_string()))?;

    Ok(PhotoPage {
        images: photos
            .photo
            .into_iter()
            .filter_map(Photo::into_descriptor)
            .collect(),
        page: photos.page,
        total_pages: photos.pages,
    })
}
