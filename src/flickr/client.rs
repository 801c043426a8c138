// Flickr REST API HTTP client.
// Builds signed-by-key requests and converts HTTP failures into errors.

use reqwest::{
    Client, Request, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ShutterError};

/// Flickr API client. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct FlickrClient {
    client: Client,
    config: Config,
}

impl FlickrClient {
    /// Create a new client from an explicit configuration.
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("shutter-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ShutterError::Http)?;

        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a GET request for a REST method with extra query parameters.
    /// Common parameters (key, format, extras) are always appended.
    pub fn build_request(&self, method: &str, params: &[(&str, String)]) -> Result<Request> {
        let common = [
            ("method", method.to_string()),
            ("api_key", self.config.api_key.clone()),
            ("format", "json".to_string()),
            ("nojsoncallback", "1".to_string()),
            ("extras", "url_s".to_string()),
        ];

        self.client
            .get(self.config.endpoint.as_str())
            .query(&common)
            .query(params)
            .build()
            .map_err(ShutterError::Http)
    }

    /// Make a GET request for a REST method and return the checked response.
    pub async fn get_with_params(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<Response> {
        let request = self.build_request(method, params)?;
        debug!(method, url = %redact(request.url().as_str(), &self.config.api_key), "flickr request");

        let response = self.client.execute(request).await?;
        check_response(response).await
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK => Ok(response),
        status => Err(ShutterError::Status {
            status,
            body: response.text().await.unwrap_or_default(),
        }),
    }
}

/// Strip the API key out of a URL before it reaches the log.
fn redact(url: &str, key: &str) -> String {
    if key.is_empty() {
        url.to_string()
    } else {
        url.replace(key, "***")
    }
}
