// Runtime configuration.
// Loads the Flickr API key and optional overrides from the environment.

use crate::error::{Result, ShutterError};

pub const DEFAULT_ENDPOINT: &str = "https://api.flickr.com/services/rest/";
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Settings injected into the Flickr client at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub endpoint: String,
    pub per_page: u32,
}

impl Config {
    /// Create a config with default endpoint and page size.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("FLICKR_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ShutterError::MissingApiKey)?;

        let endpoint = lookup("FLICKR_ENDPOINT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let per_page = match lookup("SHUTTER_PER_PAGE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if (1..=500).contains(&n) => n,
                _ => {
                    return Err(ShutterError::InvalidConfig(format!(
                        "SHUTTER_PER_PAGE must be between 1 and 500, got {:?}",
                        raw
                    )));
                }
            },
            None => DEFAULT_PER_PAGE,
        };

        Ok(Self {
            api_key,
            endpoint,
            per_page,
        })
    }
}
