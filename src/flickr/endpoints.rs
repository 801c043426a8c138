// Flickr photo listing endpoints.
// Typed wrappers for getRecent and search, plus the PhotoSource seam used by feeds.

use std::future::Future;

use crate::error::Result;

use super::client::FlickrClient;
use super::types::{PhotoPage, parse_photo_page};

pub const METHOD_GET_RECENT: &str = "flickr.photos.getRecent";
pub const METHOD_SEARCH: &str = "flickr.photos.search";

/// Which listing a request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Recent,
    Search { text: String },
}

/// A single page request against a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRequest {
    pub kind: RequestKind,
    pub page: u32,
}

impl PhotoRequest {
    pub fn recent(page: u32) -> Self {
        Self {
            kind: RequestKind::Recent,
            page,
        }
    }

    pub fn search(text: impl Into<String>, page: u32) -> Self {
        Self {
            kind: RequestKind::Search { text: text.into() },
            page,
        }
    }
}

/// Anything that can answer a page request. Implemented by the HTTP client
/// and by scripted sources in tests.
pub trait PhotoSource {
    fn fetch(&self, request: &PhotoRequest) -> impl Future<Output = Result<PhotoPage>> + Send;
}

impl FlickrClient {
    /// Get a page of the most recent public photos.
    pub async fn get_recent(&self, page: u32) -> Result<PhotoPage> {
        let params = [
            ("page", page.to_string()),
            ("per_page", self.config().per_page.to_string()),
        ];
        let response = self.get_with_params(METHOD_GET_RECENT, &params).await?;
        let body = response.text().await?;
        parse_photo_page(&body)
    }

    /// Search public photos by free text.
    pub async fn search(&self, text: &str, page: u32) -> Result<PhotoPage> {
        let params = [
            ("text", text.to_string()),
            ("page", page.to_string()),
            ("per_page", self.config().per_page.to_string()),
        ];
        let response = self.get_with_params(METHOD_SEARCH, &params).await?;
        let body = response.text().await?;
        parse_photo_page(&body)
    }
}

impl PhotoSource for FlickrClient {
    fn fetch(&self, request: &PhotoRequest) -> impl Future<Output = Result<PhotoPage>> + Send {
        let client = self.clone();
        let request = request.clone();
        async move {
            match &request.kind {
                RequestKind::Recent => client.get_recent(request.page).await,
                RequestKind::Search { text } => client.search(text, request.page).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_search_request_encodes_text() {
        let client = FlickrClient::new(Config::new("k")).unwrap();
        let request = client
            .build_request(
                METHOD_SEARCH,
                &[
                    ("text", "cats & dogs".to_string()),
                    ("page", "1".to_string()),
                    ("per_page", "20".to_string()),
                ],
            )
            .unwrap();

        let query = request.url().query().unwrap_or_default().to_string();
        assert!(query.contains("method=flickr.photos.search"));
        assert!(query.contains("text=cats+%26+dogs"));
        assert!(query.contains("per_page=20"));
    }

    #[test]
    fn test_request_constructors() {
        assert_eq!(PhotoRequest::recent(3).kind, RequestKind::Recent);
        assert_eq!(
            PhotoRequest::search("owls", 1).kind,
            RequestKind::Search {
                text: "owls".to_string()
            }
        );
    }
}
